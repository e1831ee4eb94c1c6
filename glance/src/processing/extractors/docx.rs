/// Extract body paragraph text from a DOCX held in memory.
///
/// Paragraphs are joined with a newline in document order (empty
/// paragraphs keep their blank line) and the result is trimmed. Tables,
/// headers and footers are not part of the paragraph stream. Any parse
/// failure yields an empty string.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    let docx = match docx_rs::read_docx(bytes) {
        Ok(docx) => docx,
        Err(e) => {
            tracing::error!(error = %e, size = bytes.len(), "Error extracting DOCX text");
            return String::new();
        }
    };

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    paragraphs.join("\n").trim().to_string()
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut content = String::new();
    push_paragraph_children(&paragraph.children, &mut content);
    content
}

/// Runs nested in hyperlinks are part of the visible paragraph text.
fn push_paragraph_children(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(text) => out.push_str(&text.text),
                        docx_rs::RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                push_paragraph_children(&link.children, out);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bytes_yield_empty_string() {
        assert_eq!(extract_docx_text(b"PK\x03\x04 not really a zip"), "");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(extract_docx_text(&[]), "");
    }
}
