//! Glance: image and document analysis over HTTP.
//!
//! Uploaded images go straight to a hosted vision model. Documents (PDF,
//! DOCX, web pages, Google Drive files or raw text) first pass through the
//! [`processing`] pipeline, which extracts and truncates their text. The
//! analysis endpoints sit behind a cookie session issued by `/api/login`.

pub mod api;
pub mod auth;
pub mod config;
pub mod drive;
pub mod error;
pub mod llm;
pub mod processing;
