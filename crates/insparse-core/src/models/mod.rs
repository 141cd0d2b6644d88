//! Data models for documents, extraction results and configuration.

pub mod config;
pub mod document;
pub mod result;
