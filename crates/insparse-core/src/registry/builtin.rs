//! Built-in field registries for common Indian life insurers.
//!
//! Patterns are compiled case-insensitive and multi-line by the extractor.

use super::FieldSpec;

/// Names accepted by [`super::PatternRegistry::builtin`].
pub const BUILTIN_PROVIDERS: &[&str] = &["base", "hdfc", "lic"];

// Shared value fragments.
const SEP: &str = r"\s*[:\-]?\s*";
const AMOUNT: &str = r"(?:Rs\.?|INR|₹)?\s*(\d[\d,]*(?:\.\d{1,2})?)";
const DATE: &str = r"(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|\d{1,2}[\s\-][A-Za-z]{3,9}[\s\-,]+\d{4})";
const REST_OF_LINE: &str = r"\s*[:\-]?[ \t]*([^\n]*)";

pub(super) fn fields(provider: &str) -> Option<Vec<FieldSpec>> {
    match provider {
        "base" => Some(base_fields()),
        "hdfc" => Some(hdfc_fields()),
        "lic" => Some(lic_fields()),
        _ => None,
    }
}

pub(super) fn base_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(
            "policy_number",
            format!(r"(Policy\s*(?:Number|No\b\.?|#)){SEP}([A-Z0-9][A-Z0-9/\-]*)"),
            &["Policy Number", "Policy No", "Policy #"],
        ),
        FieldSpec::new(
            "policy_holder",
            format!(
                r"(Policy\s*holder(?:'s)?\s*Name|Name\s+of\s+(?:the\s+)?(?:Policy\s*holder|Proposer|Life\s+Assured)|Proposer\s*Name|Insured\s*Name){REST_OF_LINE}"
            ),
            &["Policyholder Name", "Proposer Name", "Insured Name"],
        ),
        FieldSpec::new(
            "premium",
            format!(
                r"((?:Total\s+|Annual\s+|Modal\s+|Instal?l?ment\s+)?Premium(?:\s+Amount|\s+Payable)?)\s*(?:\(.*?\))?{SEP}{AMOUNT}"
            ),
            &["Total Premium", "Premium Amount", "Premium"],
        ),
        FieldSpec::new(
            "sum_assured",
            format!(r"((?:Basic\s+)?Sum\s+(?:Assured|Insured))\s*(?:\(.*?\))?{SEP}{AMOUNT}"),
            &["Sum Assured", "Sum Insured"],
        ),
        FieldSpec::new(
            "start_date",
            format!(
                r"((?:Policy\s+)?(?:Start|Commencement|Inception|Issue)\s+Date|Date\s+of\s+(?:Commencement|Issue)){SEP}{DATE}"
            ),
            &["Start Date", "Date of Commencement", "Commencement Date"],
        ),
        FieldSpec::new(
            "maturity_date",
            format!(
                r"((?:Policy\s+)?(?:Maturity|Expiry|End)\s+Date|Date\s+of\s+(?:Maturity|Expiry)){SEP}{DATE}"
            ),
            &["Maturity Date", "Date of Maturity", "Expiry Date"],
        ),
    ]
}

fn hdfc_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(
            "policy_number",
            format!(r"(Policy\s*(?:Number|No\b\.?)){SEP}(\d{{8,12}})"),
            &["Policy Number", "Policy No"],
        ),
        FieldSpec::new(
            "application_number",
            format!(r"(Application\s*(?:Number|No\b\.?)){SEP}([A-Z0-9]+)"),
            &["Application Number", "Application No"],
        ),
        FieldSpec::new(
            "plan_name",
            format!(r"(Plan\s*Name|Product\s*Name){REST_OF_LINE}"),
            &["Plan Name", "Product Name"],
        ),
        FieldSpec::new(
            "premium",
            format!(
                r"((?:Total\s+)?(?:Instal?l?ment\s+)?Premium(?:\s+Amount)?)\s*(?:\(.*?\))?{SEP}{AMOUNT}"
            ),
            &["Total Installment Premium", "Installment Premium", "Premium"],
        ),
        FieldSpec::new(
            "sum_assured",
            format!(r"((?:Basic\s+)?Sum\s+Assured(?:\s+on\s+Death)?)\s*(?:\(.*?\))?{SEP}{AMOUNT}"),
            &["Sum Assured on Death", "Sum Assured"],
        ),
        FieldSpec::new(
            "policy_term",
            format!(r"(Policy\s+Term){SEP}(\d{{1,3}})"),
            &["Policy Term"],
        ),
        FieldSpec::new(
            "start_date",
            format!(r"((?:Risk\s+)?Commencement\s+Date|Policy\s+Issue\s+Date){SEP}{DATE}"),
            &["Risk Commencement Date", "Commencement Date", "Policy Issue Date"],
        ),
        FieldSpec::new(
            "maturity_date",
            format!(r"(Maturity\s+Date|Policy\s+Maturity\s+Date){SEP}{DATE}"),
            &["Maturity Date"],
        ),
    ]
}

fn lic_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(
            "policy_number",
            format!(r"(Policy\s*(?:Number|No\b\.?)){SEP}(\d{{9}})"),
            &["Policy No", "Policy Number"],
        ),
        FieldSpec::new(
            "plan_term",
            format!(r"(Plan\s*(?:&|and|/)\s*Term|Plan\s*No\b\.?){REST_OF_LINE}"),
            &["Plan & Term", "Plan and Term", "Plan No"],
        ),
        FieldSpec::new(
            "premium",
            format!(r"(Instal?l?ment\s+Premium|Premium\s+Amount)\s*(?:\(.*?\))?{SEP}{AMOUNT}"),
            &["Instalment Premium", "Premium Amount", "Premium"],
        ),
        FieldSpec::new(
            "sum_assured",
            format!(r"((?:Basic\s+)?Sum\s+Assured)\s*(?:\(.*?\))?{SEP}{AMOUNT}"),
            &["Sum Assured", "Basic Sum Assured"],
        ),
        FieldSpec::new(
            "date_of_commencement",
            format!(r"(Date\s+of\s+Commencement(?:\s+of\s+Policy)?|D\.?\s*O\.?\s*C\.?){SEP}{DATE}"),
            &["Date of Commencement", "DOC"],
        ),
        FieldSpec::new(
            "date_of_maturity",
            format!(r"(Date\s+of\s+Maturity|D\.?\s*O\.?\s*M\.?){SEP}{DATE}"),
            &["Date of Maturity", "DOM"],
        ),
        FieldSpec::new(
            "agency_code",
            format!(r"(Agency\s*Code|Agent\s*Code){SEP}([A-Z0-9]+)"),
            &["Agency Code", "Agent Code"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::PatternRegistry;
    use crate::extract::HybridFieldExtractor;
    use crate::models::result::ExtractionMethod;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_schedule() {
        let extractor = HybridFieldExtractor::new(&PatternRegistry::base()).unwrap();
        let text = "Policy Schedule\n\
                    Policy No.: PLC/2024/00123\n\
                    Name of the Policyholder: Asha Verma\n\
                    Annual Premium (incl. GST): Rs. 24,500.00\n\
                    Sum Assured: ₹ 10,00,000\n\
                    Policy Start Date: 01/04/2024\n\
                    Maturity Date: 01-Apr-2044";
        let result = extractor.extract_text(text).unwrap();

        assert_eq!(result["policy_number"].value.as_deref(), Some("PLC/2024/00123"));
        assert_eq!(result["policy_holder"].value.as_deref(), Some("Asha Verma"));
        assert_eq!(result["premium"].value.as_deref(), Some("24,500.00"));
        assert_eq!(result["sum_assured"].value.as_deref(), Some("10,00,000"));
        assert_eq!(result["start_date"].value.as_deref(), Some("01/04/2024"));
        assert_eq!(result["maturity_date"].value.as_deref(), Some("01-Apr-2044"));
        assert!(result.values().all(|r| r.method == ExtractionMethod::Regex));
    }

    #[test]
    fn test_amount_needs_a_digit() {
        let extractor = HybridFieldExtractor::new(&PatternRegistry::base()).unwrap();
        let text = "Premium Amount: , see schedule\n\
                    Premium paid 4,200";
        let result = extractor.extract_text(text).unwrap();

        assert_eq!(result["premium"].value.as_deref(), Some("4,200"));
        assert!(matches!(result["premium"].method, ExtractionMethod::Fuzzy { .. }));
    }

    #[test]
    fn test_lic_schedule() {
        let extractor = HybridFieldExtractor::new(&PatternRegistry::builtin("lic").unwrap()).unwrap();
        let text = "LIFE INSURANCE CORPORATION OF INDIA\n\
                    Policy No: 512345678\n\
                    Plan & Term: 914-20\n\
                    Instalment Premium: 5,432.00\n\
                    Sum Assured 2,00,000\n\
                    Date of Commencement: 15/06/2019\n\
                    Agency Code: 0123456N";
        let result = extractor.extract_text(text).unwrap();

        assert_eq!(result["policy_number"].value.as_deref(), Some("512345678"));
        assert_eq!(result["plan_term"].value.as_deref(), Some("914-20"));
        assert_eq!(result["premium"].value.as_deref(), Some("5,432.00"));
        assert_eq!(result["sum_assured"].value.as_deref(), Some("2,00,000"));
        assert_eq!(result["date_of_commencement"].value.as_deref(), Some("15/06/2019"));
        assert_eq!(result["agency_code"].value.as_deref(), Some("0123456N"));
        assert_eq!(result["date_of_maturity"].value, None);
    }
}
