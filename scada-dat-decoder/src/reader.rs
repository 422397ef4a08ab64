//! Little-endian word reader
//!
//! Pulls fixed-width unsigned words out of a byte stream. Exhaustion before a
//! word is complete is reported as [`ReadError::Incomplete`] together with the
//! number of bytes that were consumed; those bytes are not pushed back.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{self, ErrorKind, Read};

/// Failure to read a complete word
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("input ended after {consumed} of {wanted} bytes")]
    Incomplete { consumed: usize, wanted: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Sequential little-endian reader over any [`Read`] source
pub struct LittleEndianReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> LittleEndianReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Total bytes consumed from the source so far
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read a 16-bit word, byte 0 least significant
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u16(&buf))
    }

    /// Read a 32-bit word, byte 0 least significant
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(ReadError::Incomplete {
                        consumed: filled,
                        wanted: buf.len(),
                    })
                }
                Ok(n) => {
                    filled += n;
                    self.position += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError::Io(e)),
            }
        }
        Ok(())
    }
}
