//! Markup stripping and paragraph derivation.
//!
//! The renderers consume plain paragraphs; this module flattens the
//! intermediate markup back down: tags out, escaped entities decoded,
//! whitespace normalized.

use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid tag regex"))
}

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\r\x0b\x0c]+").expect("valid whitespace regex"))
}

/// Strips structural tags and decodes the escaped entities the extractor (or
/// an HTML-flavored template) may have introduced. Closing `</p>` tags become
/// newlines so paragraph boundaries survive the strip.
pub fn strip_markup(text: &str) -> String {
    let text = text.replace("</p>", "\n").replace("<br>", "\n").replace("<br/>", "\n");
    let text = tag_re().replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    ws_re().replace_all(&text, " ").into_owned()
}

/// Derives the renderable paragraphs: markup-stripped, newline-split, trimmed,
/// empties dropped.
pub fn to_paragraphs(text: &str) -> Vec<String> {
    strip_markup(text)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Collapses everything into a single whitespace-normalized line. Used by the
/// fixed-layout renderer, which re-wraps by width rather than by paragraph.
pub fn to_flat_text(text: &str) -> String {
    strip_markup(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_paragraph_tags_to_newlines() {
        let out = strip_markup("<p>first</p>\n<p>second</p>\n");
        assert!(out.contains("first\n"));
        assert!(out.contains("second\n"));
        assert!(!out.contains('<'));
    }

    #[test]
    fn test_decodes_entities() {
        let out = strip_markup("a&nbsp;b &amp; c &lt;d&gt;");
        assert_eq!(out, "a b & c <d>");
    }

    #[test]
    fn test_to_paragraphs_drops_empties() {
        let paragraphs = to_paragraphs("<p>one</p>\n<p></p>\n<p>  </p>\n<p>two</p>\n");
        assert_eq!(paragraphs, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_to_flat_text_collapses_whitespace() {
        let flat = to_flat_text("<p>one   two</p>\n<p>three</p>");
        assert_eq!(flat, "one two three");
    }

    #[test]
    fn test_plain_text_unchanged_apart_from_whitespace() {
        let out = strip_markup("Dear {{firstName}} {{lastName}}");
        assert_eq!(out, "Dear {{firstName}} {{lastName}}");
    }
}
