//! Prompt templates for image and document analysis
//!
//! These templates use basic `format!()` interpolation for type safety.

use crate::processing::SourceType;

/// Prompt sent alongside an uploaded image.
///
/// Asks for an eight-part analysis: visual description, objects, setting,
/// colors and lighting, composition, mood, details, and likely context.
///
/// # Example
/// ```
/// use glance::llm::prompts::image_analysis_prompt;
///
/// let prompt = image_analysis_prompt();
/// assert!(prompt.contains("Visual Description"));
/// ```
pub fn image_analysis_prompt() -> String {
    r#"Please provide a comprehensive and detailed analysis of this image. Include:

1. **Visual Description**: Describe what you see in the image in detail
2. **Objects and Elements**: List and describe all visible objects, people, animals, or elements
3. **Setting and Environment**: Describe the location, background, and environment
4. **Colors and Lighting**: Analyze the color scheme, lighting, and visual atmosphere
5. **Composition**: Describe the layout, perspective, and visual composition
6. **Mood and Atmosphere**: What feeling or mood does the image convey?
7. **Details and Textures**: Describe any notable details, textures, or patterns
8. **Potential Context**: What might be happening or what could this image represent?

Please be thorough and descriptive in your analysis."#
        .to_string()
}

/// Prompt that wraps extracted document text.
///
/// # Arguments
/// * `content` - Extracted (and possibly truncated) document text
/// * `source_type` - Where the text came from, named in the prompt
///
/// # Example
/// ```
/// use glance::llm::prompts::document_analysis_prompt;
/// use glance::processing::SourceType;
///
/// let prompt = document_analysis_prompt("Quarterly revenue grew 12%.", SourceType::Pdf);
/// assert!(prompt.contains("PDF"));
/// assert!(prompt.contains("Quarterly revenue"));
/// ```
pub fn document_analysis_prompt(content: &str, source_type: SourceType) -> String {
    format!(
        r#"Please analyze the following document (source: {source_type}) and provide:

1. **Summary**: A concise overview of what the document is about
2. **Key Points**: The most important facts, arguments, or findings
3. **Structure**: How the document is organized
4. **Notable Details**: Names, dates, figures, or terms worth highlighting
5. **Analysis**: The purpose, audience, and any conclusions or recommendations

Document content:
---
{content}
---

Please be clear and well organized in your response."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompt_lists_all_sections_in_order() {
        let prompt = image_analysis_prompt();
        let sections = [
            "Visual Description",
            "Objects and Elements",
            "Setting and Environment",
            "Colors and Lighting",
            "Composition",
            "Mood and Atmosphere",
            "Details and Textures",
            "Potential Context",
        ];

        let mut last = 0;
        for section in sections {
            let pos = prompt.find(section).expect("section should be present");
            assert!(pos >= last, "{section} out of order");
            last = pos;
        }
    }

    #[test]
    fn document_prompt_embeds_content_verbatim() {
        let content = "Line one\nLine {two} with braces";
        let prompt = document_analysis_prompt(content, SourceType::GoogleDrive);
        assert!(prompt.contains(content));
        assert!(prompt.contains("source: Google Drive"));
    }
}
