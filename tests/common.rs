#![cfg(feature = "std")]

use std::{io::Read, path::Path};

use csv::ReaderBuilder;
use tagline::{
    avec::TagSink,
    sans::{ChecksumMismatch, TagIdentifier},
};

const PATH: &str = "fixtures/noisy-capture.bin";

#[test]
fn ingest_file() {
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    tagline::avec::ingest(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn ingest_byte_at_a_time() {
    ingest_chunked(1);
}

#[test]
fn ingest_uneven_chunks() {
    for size in [2, 3, 5, 7, 11, 15, 16, 17, 31, 33, 64] {
        ingest_chunked(size);
    }
}

#[test]
fn ingest_whole_capture() {
    ingest_chunked(4096);
}

fn ingest_chunked(size: usize) {
    let data = std::fs::read(PATH).unwrap();
    let mut source = Chunked(&data, size);
    let mut validator = Validator::new(PATH);
    tagline::avec::ingest(&mut source, &mut validator).unwrap();
    validator.finish();
}

/// A source returning at most a fixed number of bytes per read.
struct Chunked<'a>(&'a [u8], usize);

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.0.len().min(self.1).min(buf.len());
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];
        Ok(n)
    }
}

/// Checks published outcomes against the expected sequence stored alongside
/// the capture.
struct Validator(Vec<(String, String)>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].to_string())
            })
            .collect();

        Self(expected)
    }

    fn next(&mut self) -> (String, String) {
        assert!(!self.0.is_empty(), "more outcomes than expected");
        self.0.remove(0)
    }

    fn finish(self) {
        assert!(self.0.is_empty(), "missing outcomes: {:?}", self.0);
    }
}

impl TagSink for Validator {
    fn add_tag(&mut self, tag: TagIdentifier) {
        assert_eq!(self.next(), ("tag".to_string(), tag.formatted()));
    }

    fn add_checksum_error(&mut self, error: ChecksumMismatch) {
        let (kind, key) = self.next();
        assert_eq!(kind, "checksum");

        let groups: Vec<String> = error
            .groups
            .iter()
            .map(|g| String::from_utf8(g.to_vec()).unwrap())
            .collect();
        assert_eq!(key, groups.join("-"));
        assert_ne!(error.calculated, error.found);
    }
}
