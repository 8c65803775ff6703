//! Fixed-layout renderer.
//!
//! Lays the substituted text out onto a single fixed-size page: greedy word
//! wrap against a character budget derived from the usable page width and an
//! average glyph-width heuristic, lines emitted top to bottom at a fixed
//! pitch. No real font metrics are consulted — the approximation is the
//! point, faithful typography is out of scope.
//!
//! Output stops at the configured line budget and a literal truncation marker
//! is appended. Single-page cap is current behavior; the budget is explicit
//! configuration so operators can at least size the page.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::extract::markup::to_flat_text;

/// Fraction of the font size a typical Helvetica glyph occupies. Crude, but
/// close enough for a budget expressed in characters.
const AVG_GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Appended when the page's line budget cuts the document short.
pub const TRUNCATION_MARKER: &str = "... [content truncated]";

/// Page dimensions and the pagination budget for the fixed-layout renderer.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub font_size_pt: f32,
    pub line_pitch_pt: f32,
    /// Explicit per-page line budget. Emission stops once it is reached.
    pub max_lines: u16,
}

impl Default for LayoutConfig {
    /// A4 portrait, 50pt margins, 11pt type at a 14pt pitch. The default
    /// budget is what fits between the margins at that pitch.
    fn default() -> Self {
        LayoutConfig {
            page_width_pt: 595.0,
            page_height_pt: 842.0,
            margin_pt: 50.0,
            font_size_pt: 11.0,
            line_pitch_pt: 14.0,
            max_lines: 53,
        }
    }
}

impl LayoutConfig {
    pub fn with_line_budget(max_lines: u16) -> Self {
        LayoutConfig {
            max_lines,
            ..LayoutConfig::default()
        }
    }

    /// Character budget per line from the width heuristic.
    pub fn chars_per_line(&self) -> usize {
        let usable = self.page_width_pt - 2.0 * self.margin_pt;
        let per_char = self.font_size_pt * AVG_GLYPH_WIDTH_RATIO;
        (usable / per_char).floor().max(1.0) as usize
    }
}

/// Greedy word wrap. Words longer than the budget are hard-split rather than
/// overflowing the line.
fn wrap_words(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        // Hard-split oversized words
        while word.chars().count() > budget {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split: usize = word.char_indices().nth(budget).map(|(i, _)| i).unwrap_or(word.len());
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > budget && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Strips markup, collapses whitespace and wraps into page lines, applying
/// the line budget and the truncation marker.
pub fn layout_lines(text: &str, config: &LayoutConfig) -> Vec<String> {
    let flat = to_flat_text(text);
    let mut lines = wrap_words(&flat, config.chars_per_line());
    if lines.len() > config.max_lines as usize {
        lines.truncate(config.max_lines as usize);
        lines.push(TRUNCATION_MARKER.to_string());
    }
    lines
}

/// Renders substituted text into single-page PDF bytes.
pub fn render_pdf(text: &str, config: &LayoutConfig) -> Result<Vec<u8>> {
    let lines = layout_lines(text, config);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    // One text object, fixed line pitch, top-down emission.
    let top = config.page_height_pt - config.margin_pt - config.font_size_pt;
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), config.font_size_pt.into()]),
        Operation::new("TL", vec![config.line_pitch_pt.into()]),
        Operation::new("Td", vec![config.margin_pt.into(), top.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("failed to encode PDF content stream")?,
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            config.page_width_pt.into(),
            config.page_height_pt.into(),
        ],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).context("failed to serialize PDF")?;
    Ok(buf)
}

/// MIME type of the rendered artifact.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_character_budget() {
        let lines = wrap_words("the quick brown fox jumps over the lazy dog", 15);
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.chars().count() <= 15, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_oversized_word_hard_split() {
        let lines = wrap_words("a bbbbbbbbbbbbbbbbbbbb c", 8);
        for line in &lines {
            assert!(line.chars().count() <= 8, "line too long: {line:?}");
        }
        assert!(lines.concat().contains("bbbbbbbb"));
    }

    #[test]
    fn test_line_budget_truncates_with_marker() {
        let config = LayoutConfig::with_line_budget(10);
        let words: Vec<String> = (0..2000).map(|i| format!("word{i}")).collect();
        let lines = layout_lines(&words.join(" "), &config);

        assert_eq!(lines.len(), 11, "budget lines plus the marker");
        assert_eq!(lines.last().unwrap(), TRUNCATION_MARKER);
    }

    #[test]
    fn test_short_text_not_truncated() {
        let config = LayoutConfig::default();
        let lines = layout_lines("a short line of text", &config);
        assert_eq!(lines.len(), 1);
        assert_ne!(lines.last().unwrap(), TRUNCATION_MARKER);
    }

    #[test]
    fn test_markup_stripped_before_layout() {
        let config = LayoutConfig::default();
        let lines = layout_lines("<p>hello&nbsp;world</p>", &config);
        assert_eq!(lines, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_pdf_bytes_have_header() {
        let config = LayoutConfig::default();
        let bytes = render_pdf("Dear Jane Doe, welcome to Acme Ltd.", &config).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_renders_even_when_empty() {
        let config = LayoutConfig::default();
        let bytes = render_pdf("", &config).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_default_chars_per_line_is_sane() {
        let config = LayoutConfig::default();
        // 495pt usable at ~5.5pt per glyph → 90 characters
        assert_eq!(config.chars_per_line(), 90);
    }
}
