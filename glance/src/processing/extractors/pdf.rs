use std::panic::{self, AssertUnwindSafe};

/// Extract the text layer of a PDF held in memory.
///
/// Pages are emitted in order, separated by a newline, and the result is
/// trimmed. Any parse failure yields an empty string.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match outcome {
        Ok(Ok(pages)) => join_pages(&pages),
        Ok(Err(e)) => {
            tracing::error!(error = %e, size = bytes.len(), "Error extracting PDF text");
            String::new()
        }
        Err(_) => {
            tracing::error!(size = bytes.len(), "PDF parser panicked while extracting text");
            String::new()
        }
    }
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_pages_separates_with_newline_and_trims() {
        let pages = vec![
            "  First page".to_string(),
            "Second page".to_string(),
            "Third page\n\n".to_string(),
        ];
        assert_eq!(join_pages(&pages), "First page\nSecond page\nThird page");
    }

    #[test]
    fn join_pages_of_blank_pages_is_empty() {
        let pages = vec!["   ".to_string(), "\n".to_string()];
        assert_eq!(join_pages(&pages), "");
    }

    #[test]
    fn garbage_bytes_yield_empty_string() {
        assert_eq!(extract_pdf_text(b"definitely not a pdf"), "");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(extract_pdf_text(&[]), "");
    }
}
