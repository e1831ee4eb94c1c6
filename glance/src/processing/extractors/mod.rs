//! Format-specific text extractors.
//!
//! Each extractor takes raw bytes and returns plain text. They never fail:
//! a document that cannot be parsed logs an error and produces an empty
//! string, which the processor reports as "no content".

pub mod docx;
pub mod pdf;

pub use docx::extract_docx_text;
pub use pdf::extract_pdf_text;
