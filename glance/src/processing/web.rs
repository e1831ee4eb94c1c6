use std::time::Duration;

use scraper::{ElementRef, Html, Node};

use crate::config::ProcessingConfig;
use crate::error::{GlanceError, Result};

const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Fetches a web page and flattens its visible text into a single line.
#[derive(Clone)]
pub struct WebExtractor {
    http_client: reqwest::Client,
}

impl WebExtractor {
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.url_fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|error| {
                GlanceError::Internal(format!("Failed to create URL fetch client: {error}"))
            })?;

        Ok(Self { http_client })
    }

    /// Fetch `url` and return its flattened text, or an empty string on any
    /// failure (network error, timeout, non-2xx status, undecodable body).
    pub async fn extract(&self, url: &str) -> String {
        match self.fetch(url).await {
            Ok(html) => extract_text_from_html(&html),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Error extracting URL content");
                String::new()
            }
        }
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        let response = self.http_client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}

/// Visible text of an HTML document with `script`/`style` content removed,
/// flattened by [`flatten_text`].
pub fn extract_text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    flatten_text(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse text into one line: every line is trimmed, split on runs of two
/// spaces, each fragment trimmed, empty fragments dropped, and the survivors
/// joined with a single space.
pub fn flatten_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flatten_collapses_lines_into_single_line() {
        let text = "\n  Title  \n\n   First paragraph.\nSecond   line  here\n\t\n";
        assert_eq!(
            flatten_text(text),
            "Title First paragraph. Second line here"
        );
    }

    #[test]
    fn flatten_keeps_single_spaces_inside_fragments() {
        assert_eq!(flatten_text("a b c"), "a b c");
    }

    #[test]
    fn flatten_of_whitespace_is_empty() {
        assert_eq!(flatten_text("   \n\t\n  "), "");
    }

    #[test]
    fn html_text_drops_script_and_style() {
        let html = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Example Page</title>
    <style>body { color: red; }</style>
    <script>var hidden = "secret";</script>
  </head>
  <body>
    <h1>Welcome</h1>
    <p>Visible   text.</p>
    <script>console.log("also hidden")</script>
  </body>
</html>"#;

        let text = extract_text_from_html(html);
        assert_eq!(text, "Example Page Welcome Visible text.");
        assert!(!text.contains("secret"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn html_text_is_deterministic() {
        let html = "<html><body><p>Same</p><p>content</p></body></html>";
        assert_eq!(extract_text_from_html(html), extract_text_from_html(html));
    }
}
