//! Pure frame grammar, checksum and extraction.
//!
//! Nothing in this module allocates or performs I/O. Callers own the bytes and
//! decide what to keep between attempts; see [`crate::avec`] for a buffer that
//! does this.
//!
//! # Frame Format
//!
//! ```text
//! STX  G1 G2 G3 G4 G5  G6  CR   LF   ETX
//! 0x02 ---- tag ID ---- sum 0x0D 0x0A 0x03
//! ```
//!
//! Each group is two case-insensitive hexadecimal digits encoding one byte.
//! The sixth group is the XOR of the first five.
//!
//! # Architecture
//!
//! [`extract`] scans a slice for the lowest-offset window matching the
//! grammar and reports what it found as a [`ParseOutcome`], along with the
//! span the caller should drop. It never mutates its input and keeps no state,
//! so it may be rerun from scratch whenever more bytes arrive.

pub mod check;
pub mod extract;
pub mod frame;
pub mod tag;

pub use extract::{ParseOutcome, extract};
pub use tag::{ChecksumMismatch, FrameError, TagIdentifier};
