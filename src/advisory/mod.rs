//! Advisory knowledge base
//!
//! Pure, stateless lookup tables keyed by predicted labels. Unknown keys
//! resolve to a named default entry, never an error.

pub mod disease;
pub mod fertilizer;
