//! Document extraction pipeline.
//!
//! A request carries exactly one [`DocumentInput`]. The [`DocumentProcessor`]
//! picks the matching source handler (uploaded file, Drive link, web page or
//! raw text), applies the empty-content and truncation policies, and returns
//! an [`ExtractionResult`].

mod document;
mod processor;
mod web;

pub mod extractors;

pub use document::{DocumentInput, ExtractionResult, SourceType};
pub use processor::{
    truncate_content, DocumentProcessor, DRIVE_ACCESS_ERROR, NO_CONTENT_ERROR, NO_INPUT_ERROR,
    TRUNCATION_MARKER, URL_ACCESS_ERROR,
};
pub use web::{extract_text_from_html, flatten_text, WebExtractor};
