// Binary artifact renderers: editable DOCX for contracts, fixed-layout PDF
// for on-demand previews. Both consume the substituted markup text.

pub mod docx;
pub mod pdf;
