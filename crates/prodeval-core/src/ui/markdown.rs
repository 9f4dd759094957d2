//! Restricted markdown-to-HTML formatter for AI-generated summaries.
//!
//! Supports exactly: `# ` and `## ` headers, `[text](url)` links, `**bold**`,
//! `*italic*` and blank-line separated paragraphs. Rules are applied once,
//! in that order, with no nesting. Input is trusted: embedded HTML passes
//! through unescaped.

use once_cell::sync::Lazy;
use regex::Regex;

static H1_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mR)^#\s+(.+)$").expect("Invalid regex"));

static H2_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mR)^##\s+(.+)$").expect("Invalid regex"));

static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid regex"));

static BOLD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid regex"));

static ITALIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("Invalid regex"));

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex"));

const H1_HTML: &str = r#"<h3 class="font-semibold text-indigo-800 text-lg mt-4 mb-2">${1}</h3>"#;
const H2_HTML: &str = r#"<h4 class="font-semibold text-indigo-700 mt-3 mb-1">${1}</h4>"#;
const LINK_HTML: &str =
    r#"<a href="${2}" class="text-indigo-600 hover:text-indigo-800" target="_blank">${1}</a>"#;

pub fn format_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = H1_REGEX.replace_all(text, H1_HTML);
    let html = H2_REGEX.replace_all(&html, H2_HTML);
    let html = LINK_REGEX.replace_all(&html, LINK_HTML);
    let html = BOLD_REGEX.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC_REGEX.replace_all(&html, "<em>${1}</em>");

    PARAGRAPH_BREAK
        .split(&html)
        .map(|block| {
            if block.starts_with("<h") {
                block.to_string()
            } else if block.trim().is_empty() {
                String::new()
            } else {
                format!(r#"<p class="mb-2">{}</p>"#, block.trim())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_paragraph_with_bold() {
        let html = format_markdown("# Title\n\nBody **bold**");
        assert_eq!(
            html,
            concat!(
                r#"<h3 class="font-semibold text-indigo-800 text-lg mt-4 mb-2">Title</h3>"#,
                r#"<p class="mb-2">Body <strong>bold</strong></p>"#,
            )
        );
    }

    #[test]
    fn test_second_level_header() {
        let html = format_markdown("## Pros");
        assert_eq!(html, r#"<h4 class="font-semibold text-indigo-700 mt-3 mb-1">Pros</h4>"#);
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let html = format_markdown("See [the docs](https://example.com/a?b=1).");
        assert_eq!(
            html,
            r#"<p class="mb-2">See <a href="https://example.com/a?b=1" class="text-indigo-600 hover:text-indigo-800" target="_blank">the docs</a>.</p>"#
        );
    }

    #[test]
    fn test_italic_after_bold() {
        let html = format_markdown("*soft* and **hard**");
        assert_eq!(html, r#"<p class="mb-2"><em>soft</em> and <strong>hard</strong></p>"#);
    }

    #[test]
    fn test_blank_blocks_dropped_and_lines_kept() {
        let html = format_markdown("\n\nline one\nline two\n  \n\n");
        assert_eq!(html, "<p class=\"mb-2\">line one\nline two</p>");
    }

    #[test]
    fn test_embedded_html_not_escaped() {
        assert_eq!(format_markdown("<b>x</b>"), r#"<p class="mb-2"><b>x</b></p>"#);
    }

    #[test]
    fn test_crlf_line_endings_stay_out_of_headers() {
        let html = format_markdown("# Title\r\n\r\nBody");
        assert!(html.starts_with(
            r#"<h3 class="font-semibold text-indigo-800 text-lg mt-4 mb-2">Title</h3>"#
        ));
        assert!(html.ends_with(r#"<p class="mb-2">Body</p>"#));

        let html = format_markdown("## Cons\r\n");
        assert!(html.contains(">Cons</h4>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_markdown(""), "");
    }
}
