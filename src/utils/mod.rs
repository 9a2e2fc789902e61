//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File and stdin reading with consistent error handling
//! - `parser` - Line splitting and argument list parsing

pub mod io;
pub mod parser;
