// Variable resolution: flatten directory records into a request-scoped
// dictionary, then substitute {{placeholder}} tokens in one scanner pass.

pub mod dict;
pub mod substitute;

pub use dict::{build_dictionary, VariableDict};
pub use substitute::substitute;
