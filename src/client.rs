//! Client Module
//!
//! The blocking facade over the bloomd protocol.
//!
//! ## Request Path
//! 1. Build a `Command` for the operation
//! 2. Run it through the `RetryPolicy`
//! 3. Each attempt: acquire connection -> write line -> read reply -> classify
//! 4. Shape the scalar/block reply into a typed value
//!
//! Empty key lists for `multi`/`any`/`all`/`bulk` are answered locally
//! without touching the network.

use std::collections::HashMap;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::filter::Filter;
use crate::network::{ConnectionManager, Connector, RetryPolicy, TcpConnector};
use crate::protocol::{unexpected, Command, CreateOptions, Reply, Verb};
use crate::types::{FilterDescriptor, KeyChecks};

/// Reply to successful management commands
const DONE: &str = "Done";

/// Positive answer to key checks and sets
const YES: &str = "Yes";

/// Negative answer to key checks and sets
const NO: &str = "No";

/// Synchronous bloomd client
///
/// ## Concurrency Model
/// One client owns one connection and issues one command at a time. All
/// operations take `&mut self`; share a client across threads only behind
/// your own lock.
pub struct BloomClient<C: Connector = TcpConnector> {
    /// Lazily established connection
    connection: ConnectionManager<C>,

    /// Applied to every operation independently
    retry: RetryPolicy,
}

impl BloomClient<TcpConnector> {
    /// Create a client for `host:port` with default settings
    ///
    /// No connection is opened until the first operation.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::with_config(ClientConfig::builder().host(host).port(port).build())
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            "Client for {} (max_retries={}, connect_timeout={:?})",
            config.endpoint(),
            config.max_retries,
            config.connect_timeout()
        );
        Ok(Self::with_connector(
            TcpConnector::new(&config),
            RetryPolicy::from_config(&config),
        ))
    }
}

impl<C: Connector> BloomClient<C> {
    /// Create a client over a custom transport
    pub fn with_connector(connector: C, retry: RetryPolicy) -> Self {
        Self {
            connection: ConnectionManager::new(connector),
            retry,
        }
    }

    /// Operations bound to a single filter name
    pub fn filter(&mut self, name: impl Into<String>) -> Filter<'_, Self> {
        Filter::new(self, name)
    }

    /// Close the current connection; the next operation reconnects
    pub fn disconnect(&mut self) {
        self.connection.invalidate();
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn connection(&self) -> &ConnectionManager<C> {
        &self.connection
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Send a command and return its classified reply, retrying dropped
    /// connections according to the retry policy
    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        let retry = self.retry;
        let connection = &mut self.connection;

        retry.run(|attempt| {
            tracing::trace!("-> {} (attempt {})", command.echo(), attempt);
            let reply = connection.round_trip(command)?.check(command)?;
            tracing::trace!("<- {:?}", reply);
            Ok(reply)
        })
    }

    fn scalar(&mut self, command: &Command) -> Result<String> {
        self.execute(command)?.into_scalar(command)
    }

    fn block(&mut self, command: &Command) -> Result<Vec<String>> {
        self.execute(command)?.into_block(command)
    }

    fn is_done(&mut self, command: &Command) -> Result<bool> {
        Ok(self.scalar(command)? == DONE)
    }

    fn is_yes(&mut self, command: &Command) -> Result<bool> {
        Ok(self.scalar(command)? == YES)
    }

    // =========================================================================
    // Filter Management
    // =========================================================================

    /// Create a filter. Returns true if the daemon answered `Done`.
    pub fn create(&mut self, filter: &str, options: &CreateOptions) -> Result<bool> {
        self.is_done(&Command::new(Verb::Create).arg(filter).options(options))
    }

    /// List all filters in the order the daemon reports them
    pub fn list(&mut self) -> Result<Vec<FilterDescriptor>> {
        let command = Command::new(Verb::List);
        self.block(&command)?
            .iter()
            .map(|line| {
                FilterDescriptor::parse(line).ok_or_else(|| unexpected(&command, line))
            })
            .collect()
    }

    /// Permanently delete a filter
    pub fn drop_filter(&mut self, filter: &str) -> Result<bool> {
        self.is_done(&Command::new(Verb::Drop).arg(filter))
    }

    /// Unload a filter from memory, keeping it on disk
    pub fn close(&mut self, filter: &str) -> Result<bool> {
        self.is_done(&Command::new(Verb::Close).arg(filter))
    }

    /// Remove a closed filter from the daemon's view without deleting data
    pub fn clear(&mut self, filter: &str) -> Result<bool> {
        self.is_done(&Command::new(Verb::Clear).arg(filter))
    }

    /// Flush one filter to disk, or every filter when `filter` is `None`
    pub fn flush(&mut self, filter: Option<&str>) -> Result<bool> {
        self.is_done(&Command::new(Verb::Flush).opt_arg(filter))
    }

    /// Statistics for a filter, keyed by stat name
    pub fn info(&mut self, filter: &str) -> Result<HashMap<String, String>> {
        let command = Command::new(Verb::Info).arg(filter);
        self.block(&command)?
            .iter()
            .map(|line| -> Result<(String, String)> {
                let (name, value) = line
                    .trim()
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| unexpected(&command, line))?;
                Ok((name.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    // =========================================================================
    // Keys
    // =========================================================================

    /// Whether `key` may be in the filter
    pub fn check(&mut self, filter: &str, key: &str) -> Result<bool> {
        self.is_yes(&Command::new(Verb::Check).arg(filter).arg(key))
    }

    /// Add `key` to the filter
    ///
    /// Returns the daemon's answer as is: true for `Yes`, meaning the key
    /// was already (probably) present before this set, and false for `No`,
    /// meaning it was newly added.
    pub fn set(&mut self, filter: &str, key: &str) -> Result<bool> {
        self.is_yes(&Command::new(Verb::Set).arg(filter).arg(key))
    }

    /// Check many keys at once
    pub fn multi<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<KeyChecks> {
        if keys.is_empty() {
            return Ok(KeyChecks::default());
        }

        let command = Command::new(Verb::Multi).arg(filter).args(keys);
        let reply = self.scalar(&command)?;
        let answers: Vec<&str> = reply.split_whitespace().collect();
        if answers.len() != keys.len() {
            return Err(unexpected(&command, &reply));
        }

        let entries = keys
            .iter()
            .zip(answers)
            .map(|(key, answer)| (key.as_ref().to_string(), answer == YES))
            .collect();
        Ok(KeyChecks::new(entries))
    }

    /// True if at least one key may be in the filter
    pub fn any<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<bool> {
        if keys.is_empty() {
            return Ok(false);
        }
        let reply = self.scalar(&Command::new(Verb::Multi).arg(filter).args(keys))?;
        Ok(reply.split_whitespace().any(|answer| answer == YES))
    }

    /// True if every key may be in the filter
    pub fn all<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<bool> {
        if keys.is_empty() {
            return Ok(true);
        }
        let reply = self.scalar(&Command::new(Verb::Multi).arg(filter).args(keys))?;
        Ok(!reply.split_whitespace().any(|answer| answer == NO))
    }

    /// Add many keys at once and return the raw `Yes`/`No` reply
    pub fn bulk<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<String> {
        if keys.is_empty() {
            return Ok(String::new());
        }
        self.scalar(&Command::new(Verb::Bulk).arg(filter).args(keys))
    }
}
