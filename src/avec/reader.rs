//! Reader-based ingestion loop.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use thiserror::Error;

use crate::sans::{ChecksumMismatch, TagIdentifier};

use super::{TagSink, buffer::StreamBuffer};

extern crate std;

/// Size of the chunk requested from the source on each read.
const CHUNK_LEN: usize = 64;

/// Errors occurring while reading tags from a byte source.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A well-formed frame failed its checksum. Reading may continue.
    #[error(transparent)]
    Checksum(#[from] ChecksumMismatch),
}

/// Iterator over the tags found in a byte source.
///
/// Each call to [`Iterator::next`] blocks on the source until a frame is found
/// or the source ends. A read returning zero bytes ends iteration. Reads
/// failing with [`ErrorKind::Interrupted`] or [`ErrorKind::TimedOut`] mean the
/// source already waited without receiving bytes, and are retried.
///
/// [`Error::Checksum`] items are not fatal. After an [`Error::Io`] item the
/// iterator may be polled again to retry the source. A non-blocking source
/// surfaces [`ErrorKind::WouldBlock`] this way, so the caller can wait for
/// readiness before polling again.
#[derive(Debug)]
pub struct TagReader<R> {
    source: R,
    buffer: StreamBuffer,
    chunk: [u8; CHUNK_LEN],
    // The last attempt consumed a frame, so another may already be buffered.
    draining: bool,
}

impl<R: Read> TagReader<R> {
    /// Read through a buffer with the default resynchronization policy.
    pub fn new(source: R) -> Self {
        Self::with_buffer(source, StreamBuffer::new())
    }

    /// Read through an existing buffer, for example one with a custom policy.
    pub fn with_buffer(source: R, buffer: StreamBuffer) -> Self {
        Self {
            source,
            buffer,
            chunk: [0; CHUNK_LEN],
            draining: false,
        }
    }

    /// Read tags until the source ends, publishing to a receiver.
    ///
    /// Checksum failures are published and reading continues. Only errors
    /// from the source stop the loop, including [`ErrorKind::WouldBlock`]
    /// from a non-blocking source; buffered bytes are kept, so calling this
    /// again once the source is ready resumes where it stopped.
    pub fn publish(&mut self, o: &mut impl TagSink) -> Result<(), Error> {
        for result in self {
            match result {
                Ok(tag) => o.add_tag(tag),
                Err(Error::Checksum(error)) => o.add_checksum_error(error),
                Err(err) => Err(err)?,
            }
        }

        Ok(())
    }

    /// The bytes retained between reads.
    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    /// Get a reference to the byte source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Get a mutable reference to the byte source, for example to wait on
    /// its readiness.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Unwrap the byte source, discarding any retained bytes.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Iterator for TagReader<R> {
    type Item = Result<TagIdentifier, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let outcome = if self.draining {
                self.buffer.advance()
            } else {
                let n = match self.source.read(&mut self.chunk) {
                    Ok(0) => {
                        tracing::debug!(retained = self.buffer.len(), "byte source closed");
                        return None;
                    }
                    Ok(n) => n,
                    Err(err)
                        if matches!(err.kind(), ErrorKind::Interrupted | ErrorKind::TimedOut) =>
                    {
                        continue;
                    }
                    Err(err) => return Some(Err(err.into())),
                };

                tracing::trace!(bytes = n, "read chunk");
                self.buffer.append(&self.chunk[..n])
            };

            match outcome.into_result() {
                Some(result) => {
                    self.draining = true;
                    return Some(result.map_err(Error::from));
                }
                None => self.draining = false,
            }
        }
    }
}

/// Read tags from a byte source until it ends, publishing to a receiver.
///
/// Retained bytes are dropped on return, so this suits blocking sources. For
/// a non-blocking source, keep a [`TagReader`] and call
/// [`TagReader::publish`] again after each readiness wait.
///
/// This method is also re-exported as `tagline::avec::ingest`.
///
/// _Requires Cargo feature `std`._
pub fn ingest(r: &mut impl Read, o: &mut impl TagSink) -> Result<(), Error> {
    TagReader::new(r).publish(o)
}
