//! Core definitions (error taxonomy and common macros), relied upon by all
//! colonnade-* crates.

pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;
