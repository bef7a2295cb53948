//! Scan-and-match over an arbitrary slice.

use super::{
    frame::{self, FRAME_LEN},
    tag::{ChecksumMismatch, TagIdentifier},
};

/// The result of one extraction attempt.
///
/// Offsets are relative to the slice passed to [`extract`]. Bytes before
/// `start` are noise; the caller should drop everything before `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A checksum-valid frame spans `start..end`.
    MatchFound {
        tag: TagIdentifier,
        start: usize,
        end: usize,
    },
    /// No complete frame yet. Nothing should be consumed.
    NoMatchYet,
    /// A well-formed frame spanning `start..end` failed its checksum.
    InvalidChecksum {
        error: ChecksumMismatch,
        start: usize,
        end: usize,
    },
}

impl ParseOutcome {
    /// The number of leading bytes this outcome consumes.
    pub fn consumed(&self) -> usize {
        match self {
            Self::MatchFound { end, .. } | Self::InvalidChecksum { end, .. } => *end,
            Self::NoMatchYet => 0,
        }
    }

    /// Whether a checksum-valid frame was found.
    pub fn is_match_found(&self) -> bool {
        matches!(self, Self::MatchFound { .. })
    }

    /// Whether the slice holds no complete frame.
    pub fn is_no_match_yet(&self) -> bool {
        matches!(self, Self::NoMatchYet)
    }

    /// Whether a well-formed frame failed its checksum.
    pub fn is_invalid_checksum(&self) -> bool {
        matches!(self, Self::InvalidChecksum { .. })
    }

    /// Convert into the tag or checksum failure, if an attempt was made.
    pub fn into_result(self) -> Option<Result<TagIdentifier, ChecksumMismatch>> {
        match self {
            Self::MatchFound { tag, .. } => Some(Ok(tag)),
            Self::InvalidChecksum { error, .. } => Some(Err(error)),
            Self::NoMatchYet => None,
        }
    }
}

/// Find the lowest-offset frame in a slice and check it.
///
/// A trailing STX without the rest of its frame is left alone, as the
/// remainder may still be arriving.
pub fn extract(r: &[u8]) -> ParseOutcome {
    let found = (0..r.len()).find_map(|start| {
        let window = r[start..].first_chunk::<FRAME_LEN>()?;
        Some((start, frame::parse(window)?))
    });

    let Some((start, (groups, values))) = found else {
        return ParseOutcome::NoMatchYet;
    };

    let end = start + FRAME_LEN;

    match TagIdentifier::from_parts(groups, values) {
        Ok(tag) => ParseOutcome::MatchFound { tag, start, end },
        Err(error) => ParseOutcome::InvalidChecksum { error, start, end },
    }
}
