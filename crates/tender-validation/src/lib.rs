//! Tender Validation Core
//!
//! Pure validation primitives with no side effects.
//! Used by the field validator in `tender-forms` and by the WASM bindings.

pub mod date;
pub mod email;
pub mod string;

// Re-export all validators
pub use date::*;
pub use email::*;
pub use string::*;
