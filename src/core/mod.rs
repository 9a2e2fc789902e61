// Public modules
pub mod case;
pub mod compare;
pub mod error;
pub mod fields;
pub mod generator;
pub mod stats;
pub mod tokenizer;
pub mod transliterate;
pub mod unicode;

// Internal modules - not part of public API
pub(crate) mod paths;

// Public modules for CLI access
pub mod defaults;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
