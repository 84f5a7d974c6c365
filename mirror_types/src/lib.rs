//! Mirror Type Definitions
//!
//! This crate contains the data model describing a module's type namespace:
//! packages, their named type declarations, and the structural type
//! expressions those declarations are built from. It provides pure data
//! structures without any file I/O or code generation logic.

pub mod format;
pub mod names;
pub mod types;

// Re-export commonly used types at the crate root
pub use names::*;
pub use types::*;
