//! Error types for the bloomd client
//!
//! Every operation returns either a typed value or one of these kinds.
//! Transport failures are split from application-level protocol errors so
//! the retry policy (and callers) can treat them differently.

use std::io::ErrorKind;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::ErrorMarker;

/// Result type alias using BloomError
pub type Result<T> = std::result::Result<T, BloomError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum BloomError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Establishing the connection did not complete within the timeout.
    #[error("Connection to {endpoint} timed out after {timeout:?}")]
    ConnectionTimeout { endpoint: String, timeout: Duration },

    /// Reset, aborted, refused, broken pipe and other I/O failures.
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[from] std::io::Error),

    /// The reply stream ended before a complete reply was read.
    #[error("Connection closed before a complete reply was received")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The server answered with an application-level error line.
    #[error("Protocol error ({kind}): {reply} (command: {command})")]
    Protocol {
        kind: ErrorMarker,
        reply: String,
        command: String,
    },

    /// A well-framed reply that cannot be shaped into the expected value.
    #[error("Unexpected reply to `{command}`: {reply}")]
    UnexpectedReply { command: String, reply: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BloomError {
    /// Whether the retry policy may invalidate the connection and try again.
    ///
    /// Only dropped connections qualify. Timeouts while connecting and any
    /// error the server reported itself are surfaced on first occurrence.
    pub fn is_retryable(&self) -> bool {
        match self {
            BloomError::ConnectionClosed => true,
            BloomError::ConnectionFailed(err) => matches!(
                err.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::ConnectionRefused
                    | ErrorKind::BrokenPipe
                    | ErrorKind::NotConnected
                    | ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }

    /// Whether this error means the current connection can no longer be used.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BloomError::ConnectionTimeout { .. }
                | BloomError::ConnectionFailed(_)
                | BloomError::ConnectionClosed
        )
    }
}
