//! Editable-document renderer.
//!
//! Serializes the substituted text as a fresh DOCX: one plain paragraph per
//! non-empty line after markup stripping. Styling, tables and images from the
//! original template are not carried over.

use anyhow::{Context, Result};
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;

use crate::extract::markup::to_paragraphs;

/// Renders substituted text into DOCX bytes.
pub fn render_docx(text: &str) -> Result<Vec<u8>> {
    let mut docx = Docx::new();
    for paragraph in to_paragraphs(text) {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph)));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .context("failed to pack DOCX archive")?;
    Ok(cursor.into_inner())
}

/// MIME type of the rendered artifact.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_text;

    #[test]
    fn test_output_is_zip_container() {
        let bytes = render_docx("Dear Jane Doe,\nWelcome to Acme.").expect("render");
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_markup_input_round_trips_through_extractor() {
        let bytes =
            render_docx("<p>Dear Jane,</p>\n<p>Your start date is 01/06/2024.</p>").expect("render");
        // The extractor must be able to read what the renderer wrote.
        let markup = extract_text(&bytes);
        assert!(markup.contains("<p>Dear Jane,</p>"));
        assert!(markup.contains("<p>Your start date is 01/06/2024.</p>"));
    }

    #[test]
    fn test_empty_text_still_produces_valid_document() {
        let bytes = render_docx("").expect("render");
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }
}
