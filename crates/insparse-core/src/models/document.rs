//! Cleaned document text with line-oriented access.

/// A cleaned document: the full text and the same text split into lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    lines: Vec<String>,
}

impl Document {
    /// Build a document from cleaned text. Lines are split on `'\n'` only.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text.split('\n').map(str::to_string).collect();
        Self { text, lines }
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the document has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_split_on_newline() {
        let doc = Document::new("Policy No: 1\n\nPremium: 200");
        assert_eq!(doc.lines(), &["Policy No: 1", "", "Premium: 200"]);
        assert_eq!(doc.text(), "Policy No: 1\n\nPremium: 200");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("");
        assert!(doc.is_blank());
        assert_eq!(doc.lines().len(), 1);
    }
}
