//! # bloomd-client
//!
//! A resilient, synchronous client for the bloomd bloom filter daemon:
//! - Newline-delimited text protocol with scalar and block replies
//! - Lazily established, reusable single TCP connection
//! - Bounded fixed-backoff retry on dropped connections
//! - Typed results and a typed error taxonomy
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            BloomClient / Filter (operation facade)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      RetryPolicy                             │
//! │        (fixed backoff, invalidate between attempts)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  ConnectionManager                           │
//! │          (Disconnected <-> Connected(stream))                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ line out / reply in
//!                       ▼
//!               ┌──────────────┐
//!               │   Protocol   │
//!               │ encode/read/ │
//!               │   classify   │
//!               └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bloomd_client::{BloomClient, CreateOptions};
//!
//! let mut client = BloomClient::new("localhost", 8673)?;
//! client.create("users", &CreateOptions::new().capacity(1_000_000).prob(0.001))?;
//!
//! let mut users = client.filter("users");
//! users.set("alice")?;
//! assert!(users.check("alice")?);
//! # Ok::<(), bloomd_client::BloomError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod types;
pub mod filter;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BloomError, Result};
pub use config::{ClientConfig, DEFAULT_PORT};
pub use client::BloomClient;
pub use filter::{Filter, FilterCommands};
pub use network::{Connector, RetryPolicy, TcpConnector};
pub use protocol::{CreateOptions, ErrorMarker};
pub use types::{FilterDescriptor, KeyChecks};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bloomd-client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
