//! Format detection and best-effort text extraction.
//!
//! Uploaded templates arrive as opaque bytes. A short signature sniff decides
//! whether to attempt structured DOCX extraction; anything else (or any
//! structured-extraction failure) degrades to lossy raw-text interpretation.
//! Extraction never fails for a non-empty payload — degradation is logged,
//! not surfaced.

pub mod docx;
pub mod markup;

use tracing::warn;

/// ZIP local-file-header signature. DOCX is a ZIP container, so this is the
/// cheapest possible "might be a structured document" check.
const ZIP_SIGNATURE: &[u8; 4] = b"PK\x03\x04";

/// Returns true if the payload starts with the ZIP container signature.
pub fn looks_like_container(content: &[u8]) -> bool {
    content.len() >= ZIP_SIGNATURE.len() && &content[..ZIP_SIGNATURE.len()] == ZIP_SIGNATURE
}

/// Extracts an intermediate markup string from an uploaded template binary.
///
/// The result may contain simple `<p>…</p>` structural tags (structured path)
/// or be the raw payload interpreted as UTF-8 text (fallback path). Downstream
/// stages substitute placeholders directly in this representation and strip
/// the markup when deriving paragraphs.
pub fn extract_text(content: &[u8]) -> String {
    if looks_like_container(content) {
        match docx::extract_docx_markup(content) {
            Ok(markup) => return markup,
            Err(e) => {
                // Degradation, not failure: corrupt archive or an internal
                // layout we do not understand. Fall through to raw text.
                warn!("Structured extraction failed, falling back to raw text: {e}");
            }
        }
    }

    String::from_utf8_lossy(content).into_owned()
}
