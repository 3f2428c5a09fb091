//! Reply definitions
//!
//! Represents replies from the daemon and the error markers that can
//! appear in them.

use std::fmt;

use super::Command;
use crate::error::{BloomError, Result};

/// Line opening a multi-line block reply
pub const BLOCK_START: &str = "START";

/// Line closing a multi-line block reply
pub const BLOCK_END: &str = "END";

/// Marker found in replies to operations on unknown filters
const FILTER_MISSING_MARKER: &str = "filter does not exist";

/// Prefix of generic client errors
const CLIENT_ERROR_PREFIX: &str = "Client Error:";

/// A reply read from the daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A single line
    Scalar(String),

    /// Lines between `START` and `END`, sentinels excluded
    Block(Vec<String>),
}

impl Reply {
    /// Fail with a protocol error if this is a scalar error line
    ///
    /// Blocks are never classified.
    pub fn check(self, command: &Command) -> Result<Reply> {
        if let Reply::Scalar(ref line) = self {
            if let Some(kind) = classify(line) {
                return Err(BloomError::Protocol {
                    kind,
                    reply: line.clone(),
                    command: command.echo(),
                });
            }
        }
        Ok(self)
    }

    /// Unwrap a scalar reply
    pub fn into_scalar(self, command: &Command) -> Result<String> {
        match self {
            Reply::Scalar(line) => Ok(line),
            Reply::Block(lines) => {
                Err(unexpected(command, &format!("block of {} lines", lines.len())))
            }
        }
    }

    /// Unwrap a block reply
    pub fn into_block(self, command: &Command) -> Result<Vec<String>> {
        match self {
            Reply::Block(lines) => Ok(lines),
            Reply::Scalar(line) => Err(unexpected(command, &line)),
        }
    }
}

/// Build an `UnexpectedReply` error for `command`
pub fn unexpected(command: &Command, reply: &str) -> BloomError {
    BloomError::UnexpectedReply {
        command: command.echo(),
        reply: reply.to_string(),
    }
}

/// Application-level error markers, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMarker {
    /// The named filter does not exist
    FilterMissing,

    /// Generic `Client Error:` reply
    ClientError,
}

impl ErrorMarker {
    const ALL: [ErrorMarker; 2] = [ErrorMarker::FilterMissing, ErrorMarker::ClientError];

    fn matches(&self, line: &str) -> bool {
        match self {
            ErrorMarker::FilterMissing => {
                line.to_ascii_lowercase().contains(FILTER_MISSING_MARKER)
            }
            ErrorMarker::ClientError => line.starts_with(CLIENT_ERROR_PREFIX),
        }
    }
}

impl fmt::Display for ErrorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMarker::FilterMissing => f.write_str("filter does not exist"),
            ErrorMarker::ClientError => f.write_str("client error"),
        }
    }
}

/// Return the first error marker a scalar line matches, if any
pub fn classify(line: &str) -> Option<ErrorMarker> {
    ErrorMarker::ALL.into_iter().find(|marker| marker.matches(line))
}
