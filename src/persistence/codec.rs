//! # Save Codec
//!
//! Big-endian primitive framing for save files: `i32` as 4 bytes, booleans
//! as a single `0`/`1` byte, strings as an `i32` byte length followed by
//! UTF-8 bytes. Entity records are built from these primitives by the
//! `encode`/`decode` routines next to each entity.

use crate::{DelveError, DelveResult};
use std::io::{self, Read, Write};

/// Longest string accepted when decoding (1 MiB).
pub const MAX_STRING_LEN: usize = 1024 * 1024;

/// Writes save primitives to an underlying stream.
#[derive(Debug)]
pub struct SaveWriter<W: Write> {
    inner: W,
}

impl<W: Write> SaveWriter<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Writes a big-endian `i32`.
    pub fn write_i32(&mut self, value: i32) -> DelveResult<()> {
        self.inner.write_all(&value.to_be_bytes())?;
        Ok(())
    }

    /// Writes a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) -> DelveResult<()> {
        self.inner.write_all(&[u8::from(value)])?;
        Ok(())
    }

    /// Writes a collection length as `i32`.
    pub fn write_len(&mut self, len: usize) -> DelveResult<()> {
        let len = i32::try_from(len).map_err(|_| {
            DelveError::InvalidState(format!("length {len} does not fit a save record"))
        })?;
        self.write_i32(len)
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) -> DelveResult<()> {
        self.write_len(value.len())?;
        self.inner.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> DelveResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads save primitives from an underlying stream.
#[derive(Debug)]
pub struct SaveReader<R: Read> {
    inner: R,
}

impl<R: Read> SaveReader<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> DelveResult<()> {
        self.inner.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => DelveError::TruncatedSave,
            _ => DelveError::Io(e),
        })
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&mut self) -> DelveResult<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    /// Reads a one-byte boolean. Bytes other than `0` and `1` are corrupt.
    pub fn read_bool(&mut self) -> DelveResult<bool> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        match buf[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DelveError::CorruptSave(format!(
                "invalid boolean byte {other:#04x}"
            ))),
        }
    }

    /// Reads a non-negative `i32` count.
    pub fn read_len(&mut self) -> DelveResult<usize> {
        let len = self.read_i32()?;
        usize::try_from(len)
            .map_err(|_| DelveError::CorruptSave(format!("negative length {len}")))
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> DelveResult<String> {
        let len = self.read_len()?;
        if len > MAX_STRING_LEN {
            return Err(DelveError::CorruptSave(format!(
                "string too long: {len} bytes (max {MAX_STRING_LEN})"
            )));
        }
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| DelveError::CorruptSave(format!("invalid UTF-8 string: {e}")))
    }

    /// Fails unless the stream has been fully consumed.
    pub fn expect_end(&mut self) -> DelveResult<()> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte)? {
            0 => Ok(()),
            _ => Err(DelveError::CorruptSave(
                "trailing bytes after save data".to_string(),
            )),
        }
    }
}
