//! Structured DOCX extraction.
//!
//! Unpacks the container with `docx-rs` and concatenates the textual runs of
//! each paragraph into the intermediate markup representation. Styling, tables
//! and images are intentionally dropped — this is a lossy text pipeline.

use anyhow::{anyhow, Result};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

/// Parses a DOCX payload into intermediate markup, one `<p>…</p>` per
/// paragraph. Returns an error for anything `docx-rs` cannot parse; the caller
/// decides whether to degrade.
pub fn extract_docx_markup(content: &[u8]) -> Result<String> {
    let docx = read_docx(content).map_err(|e| anyhow!("failed to parse DOCX container: {e:?}"))?;

    let mut markup = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        match rc {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push(' '),
                            RunChild::Break(_) => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            markup.push_str("<p>");
            markup.push_str(&escape_markup(&text));
            markup.push_str("</p>\n");
        }
    }

    Ok(markup)
}

/// Escapes the three characters that would collide with the markup tags.
/// Placeholder braces survive untouched so substitution can run on markup.
fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for p in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
        }
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    #[test]
    fn test_round_trips_paragraph_text_as_markup() {
        let bytes = build_docx(&["Dear {{firstName}},", "Your contract starts soon."]);
        let markup = extract_docx_markup(&bytes).expect("extract");
        assert!(markup.contains("<p>Dear {{firstName}},</p>"));
        assert!(markup.contains("<p>Your contract starts soon.</p>"));
    }

    #[test]
    fn test_escapes_angle_brackets_and_ampersand() {
        let bytes = build_docx(&["Salary & benefits < bonus > none"]);
        let markup = extract_docx_markup(&bytes).expect("extract");
        assert!(markup.contains("Salary &amp; benefits &lt; bonus &gt; none"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(extract_docx_markup(b"PK\x03\x04garbage").is_err());
    }
}
