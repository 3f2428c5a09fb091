//! Connection Management
//!
//! Owns at most one live connection per client. The connection is opened
//! lazily on first use and replaced wholesale after any transport failure.

use std::io::{BufReader, Read, Write};

use super::Connector;
use crate::error::{BloomError, Result};
use crate::protocol::{read_reply, write_line, Command, Reply};

/// A single open stream to the daemon
pub struct Connection<S: Read + Write> {
    /// Buffered for line reads; writes go straight to the inner stream
    reader: BufReader<S>,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::new(stream),
        }
    }

    /// Write one line plus terminator and flush
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        write_line(self.reader.get_mut(), line)
    }

    /// Read one complete scalar or block reply
    pub fn read_reply(&mut self) -> Result<Reply> {
        read_reply(&mut self.reader)
    }

    /// Send one command and read its reply
    pub fn round_trip(&mut self, command: &Command) -> Result<Reply> {
        self.send_line(&command.encode())?;
        self.read_reply()
    }
}

/// Connection slot of a `ConnectionManager`
///
/// ## Transitions
/// - `acquire`: Disconnected -> Connected (may fail, leaves Disconnected)
/// - `invalidate`: Connected -> Disconnected (never fails)
pub enum ConnectionState<S: Read + Write> {
    Disconnected,
    Connected(Connection<S>),
}

impl<S: Read + Write> ConnectionState<S> {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }
}

/// Lazily establishes and caches one connection
pub struct ConnectionManager<C: Connector> {
    connector: C,

    state: ConnectionState<C::Stream>,

    /// Number of connections established so far
    connects: u64,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            state: ConnectionState::Disconnected,
            connects: 0,
        }
    }

    /// Return the live connection, establishing one if needed
    pub fn acquire(&mut self) -> Result<&mut Connection<C::Stream>> {
        if !self.state.is_connected() {
            let stream = self.connector.connect()?;
            self.connects += 1;
            tracing::debug!("Connected to {}", self.connector.endpoint());
            self.state = ConnectionState::Connected(Connection::new(stream));
        }

        match &mut self.state {
            ConnectionState::Connected(conn) => Ok(conn),
            ConnectionState::Disconnected => Err(BloomError::ConnectionClosed),
        }
    }

    /// Drop the cached connection, if any
    pub fn invalidate(&mut self) {
        let previous = std::mem::replace(&mut self.state, ConnectionState::Disconnected);
        if previous.is_connected() {
            tracing::debug!("Dropped connection to {}", self.connector.endpoint());
        }
    }

    /// Run one command over the current connection
    ///
    /// Any transport failure invalidates the connection before the error is
    /// returned, so the next call starts from a fresh one.
    pub fn round_trip(&mut self, command: &Command) -> Result<Reply> {
        let result = self.acquire().and_then(|conn| conn.round_trip(command));
        if let Err(ref err) = result {
            if err.is_transport() {
                self.invalidate();
            }
        }
        result
    }

    pub fn state(&self) -> &ConnectionState<C::Stream> {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn connects(&self) -> u64 {
        self.connects
    }
}
