// Contract generation: extract → substitute → render → persist, in that
// order. No contract row exists unless rendering succeeded.

pub mod generate;
pub mod handlers;
