//! Shared test helpers
//!
//! A scripted transport: every connect pops the next `Session`, which
//! replays canned reply bytes and records what the client wrote.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Cursor, ErrorKind, Read, Write};
use std::rc::Rc;
use std::time::Duration;

use bloomd_client::{BloomClient, BloomError, Connector, Result, RetryPolicy};

/// What the next connection attempt does
#[derive(Debug, Clone)]
pub enum Session {
    /// Connect, serve these bytes, then report end of stream
    Serve(&'static str),
    /// Connect, serve these bytes, then fail reads with this kind
    Fail(&'static str, ErrorKind),
    /// Connect, but fail every write with this kind
    FailWrite(ErrorKind),
    /// Connection refused
    Refuse,
    /// Establishment timed out
    Timeout,
}

/// Everything observed by the scripted transport
#[derive(Debug, Default)]
pub struct Log {
    pub connects: usize,
    pub written: Vec<u8>,
}

impl Log {
    /// Command lines written so far, across all connections
    pub fn sent(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.written)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub struct ScriptedConnector {
    sessions: VecDeque<Session>,
    log: Rc<RefCell<Log>>,
}

impl ScriptedConnector {
    pub fn new(sessions: Vec<Session>) -> (Self, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let connector = Self {
            sessions: sessions.into(),
            log: Rc::clone(&log),
        };
        (connector, log)
    }
}

impl Connector for ScriptedConnector {
    type Stream = ScriptedStream;

    fn connect(&mut self) -> Result<ScriptedStream> {
        self.log.borrow_mut().connects += 1;
        let session = self.sessions.pop_front().unwrap_or(Session::Refuse);
        let (input, read_failure, write_failure) = match session {
            Session::Serve(bytes) => (bytes, None, None),
            Session::Fail(bytes, kind) => (bytes, Some(kind), None),
            Session::FailWrite(kind) => ("", None, Some(kind)),
            Session::Refuse => {
                return Err(io::Error::from(ErrorKind::ConnectionRefused).into())
            }
            Session::Timeout => {
                return Err(BloomError::ConnectionTimeout {
                    endpoint: self.endpoint(),
                    timeout: Duration::from_millis(20),
                })
            }
        };
        Ok(ScriptedStream {
            input: Cursor::new(input.as_bytes().to_vec()),
            read_failure,
            write_failure,
            log: Rc::clone(&self.log),
        })
    }

    fn endpoint(&self) -> String {
        "scripted:8673".to_string()
    }
}

pub struct ScriptedStream {
    input: Cursor<Vec<u8>>,
    read_failure: Option<ErrorKind>,
    write_failure: Option<ErrorKind>,
    log: Rc<RefCell<Log>>,
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.input.read(buf)?;
        match (n, self.read_failure) {
            (0, Some(kind)) => Err(io::Error::from(kind)),
            _ => Ok(n),
        }
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.write_failure {
            return Err(io::Error::from(kind));
        }
        self.log.borrow_mut().written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Backoff accounting
// =============================================================================

thread_local! {
    static SLEEPS: Cell<u32> = const { Cell::new(0) };
}

fn count_sleep(_: Duration) {
    SLEEPS.with(|s| s.set(s.get() + 1));
}

/// Backoff sleeps taken on this thread since the last `scripted_client*`
pub fn sleeps() -> u32 {
    SLEEPS.with(|s| s.get())
}

/// Client with the default retry bound (5) over a scripted transport
pub fn scripted_client(
    sessions: Vec<Session>,
) -> (BloomClient<ScriptedConnector>, Rc<RefCell<Log>>) {
    scripted_client_with_retries(sessions, 5)
}

pub fn scripted_client_with_retries(
    sessions: Vec<Session>,
    max_retries: u32,
) -> (BloomClient<ScriptedConnector>, Rc<RefCell<Log>>) {
    init_tracing();
    SLEEPS.with(|s| s.set(0));
    let (connector, log) = ScriptedConnector::new(sessions);
    let retry = RetryPolicy::new(max_retries, Duration::from_secs(1)).with_sleep(count_sleep);
    (BloomClient::with_connector(connector, retry), log)
}

/// Route client logs to the test writer (`RUST_LOG=bloomd_client=trace`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
