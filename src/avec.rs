//! Convenience interfaces for consuming a reader's byte stream.
//!
//! [`StreamBuffer`] accumulates chunks as they arrive and applies the
//! resynchronization policy. The [`reader`] module drives one from any
//! [`std::io::Read`] source, either as an iterator of tags or publishing to a
//! [`TagSink`].

#[cfg(feature = "alloc")]
pub mod buffer;
#[cfg(feature = "std")]
pub mod reader;

#[cfg(feature = "alloc")]
pub use buffer::{PolicyError, ResyncPolicy, StreamBuffer};
#[cfg(feature = "std")]
pub use reader::{TagReader, ingest};

use crate::sans::{ChecksumMismatch, TagIdentifier};

/// Receive the results of frames found in a stream.
///
/// The default implementation of [`TagSink::add_checksum_error`] ignores
/// failures.
pub trait TagSink {
    /// Add a checksum-valid tag.
    fn add_tag(&mut self, tag: TagIdentifier);

    /// Add a well-formed frame that failed its checksum. The frame has already
    /// been discarded.
    #[allow(unused_variables)]
    fn add_checksum_error(&mut self, error: ChecksumMismatch) {}
}

#[cfg(feature = "alloc")]
impl TagSink for alloc::vec::Vec<TagIdentifier> {
    fn add_tag(&mut self, tag: TagIdentifier) {
        self.push(tag);
    }
}
