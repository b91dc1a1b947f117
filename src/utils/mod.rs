//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Subprocess execution for best-effort probes
//! - `parser` - Small string parsing helpers

pub mod command;
pub mod parser;
