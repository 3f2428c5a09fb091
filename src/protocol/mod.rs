//! Protocol Module
//!
//! Defines the newline-delimited text protocol spoken by bloomd.
//!
//! ## Request Format
//! ```text
//! verb [arg ...] [name=value ...]
//! ```
//!
//! ### Verbs
//! - create, list, drop, close, clear, info, flush
//! - c: check one key
//! - m: check many keys
//! - s: set one key
//! - b: set many keys
//!
//! ## Reply Format
//! - Scalar: one line (`Done`, `Yes`, `No`, `No Yes No`, or an error line)
//! - Block: `START`, zero or more lines, `END`
//!
//! ### Error Lines
//! - `Client Error: <detail>`
//! - `Filter does not exist`

mod command;
mod reply;
mod codec;

pub use command::{Command, CreateOptions, Verb, MAX_COMMAND_ECHO};
pub use reply::{classify, unexpected, ErrorMarker, Reply, BLOCK_END, BLOCK_START};
pub use codec::{read_reply, write_command, write_line, LINE_TERMINATOR};
