//! Network Module
//!
//! Transport plumbing for the client.
//!
//! ## Architecture
//! - `Connector` opens streams (TCP in production)
//! - `ConnectionManager` caches at most one live connection
//! - `RetryPolicy` re-runs a round trip after dropped connections

mod connector;
mod connection;
mod retry;

pub use connector::{Connector, TcpConnector};
pub use connection::{Connection, ConnectionManager, ConnectionState};
pub use retry::RetryPolicy;
