#![no_std]

//! A resynchronizing parser for the ASCII output of ID-series RFID readers.
//!
//! Readers in ASCII mode emit each tag read as a fixed 16-byte frame, mixed in
//! with whatever else the serial line carries: repeated reads, partial frames,
//! line noise. Tagline finds checksum-valid frames anywhere in that stream and
//! discards consumed and stale bytes without losing a frame that arrives split
//! across reads.
//!
//! Most users should begin with the reader-based interfaces in the [`avec`]
//! module. If these prove insufficient (for example on a target without an
//! allocator), the pure frame grammar and extractor live in [`sans`].
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `alloc`: enable the resynchronizing stream buffer.
//! - `std`: enable reader-based ingestion (default).

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod avec;
pub mod sans;
