//! Protocol codec
//!
//! Line-level reading and writing for the text protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! verb [arg ...] [name=value ...]\n
//! ```
//!
//! ### Scalar Reply
//! ```text
//! Done\n
//! ```
//!
//! ### Block Reply
//! ```text
//! START\n
//! line\n
//! ...
//! END\n
//! ```

use std::io::{BufRead, Write};

use super::{Command, Reply, BLOCK_END, BLOCK_START};
use crate::error::{BloomError, Result};

/// Line terminator written after every command
pub const LINE_TERMINATOR: &str = "\n";

// =============================================================================
// Writing
// =============================================================================

/// Write a command line to a stream and flush it
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    write_line(writer, &command.encode())
}

/// Write one line plus terminator and flush it
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    let mut out = String::with_capacity(line.len() + LINE_TERMINATOR.len());
    out.push_str(line);
    out.push_str(LINE_TERMINATOR);
    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Reading
// =============================================================================

/// Read one complete reply from a stream
///
/// A stream that ends before the reply is complete yields
/// `BloomError::ConnectionClosed`, whether it ends before the first line,
/// partway through a line, or in the middle of a block.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply> {
    let mut line = String::new();
    read_line(reader, &mut line)?;
    if line != BLOCK_START {
        return Ok(Reply::Scalar(line));
    }

    let mut lines = Vec::new();
    loop {
        read_line(reader, &mut line)?;
        if line == BLOCK_END {
            return Ok(Reply::Block(lines));
        }
        lines.push(line.clone());
    }
}

/// Read a single line with its terminator (`\n` or `\r\n`) stripped
///
/// A line cut off by end of stream is incomplete, not a shorter line.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<()> {
    buf.clear();
    let bytes = reader.read_line(buf)?;
    if bytes == 0 || !buf.ends_with('\n') {
        return Err(BloomError::ConnectionClosed);
    }
    buf.pop();
    if buf.ends_with('\r') {
        buf.pop();
    }
    Ok(())
}
