//! Transport Connectors
//!
//! Opens the byte stream a connection runs over.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{BloomError, Result};

/// Something that can open a fresh stream to the daemon
pub trait Connector {
    type Stream: Read + Write;

    /// Open a new stream
    fn connect(&mut self) -> Result<Self::Stream>;

    /// Human-readable endpoint for logging
    fn endpoint(&self) -> String;
}

/// Connects over TCP with a bounded establishment timeout
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
    connect_timeout: Duration,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    nodelay: bool,
}

impl TcpConnector {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
            nodelay: config.nodelay,
        }
    }

    fn configure(&self, stream: &TcpStream) -> io::Result<()> {
        if self.nodelay {
            // Small request/reply lines; don't wait to coalesce them
            stream.set_nodelay(true)?;
        }
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;
        Ok(())
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&mut self) -> Result<TcpStream> {
        let addrs = (self.host.as_str(), self.port).to_socket_addrs()?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    self.configure(&stream)?;
                    return Ok(stream);
                }
                Err(err) => {
                    tracing::trace!("Connect to {} failed: {}", addr, err);
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                Err(BloomError::ConnectionTimeout {
                    endpoint: self.endpoint(),
                    timeout: self.connect_timeout,
                })
            }
            Some(err) => Err(BloomError::ConnectionFailed(err)),
            None => Err(BloomError::ConnectionFailed(io::Error::new(
                ErrorKind::AddrNotAvailable,
                format!("{} did not resolve to any address", self.endpoint()),
            ))),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
