//! Resynchronizing accumulator for a stream of chunks.
//!
//! _Requires Cargo feature `alloc`._

use bytes::{Buf, BytesMut};
use thiserror::Error;

use crate::sans::{ParseOutcome, extract, frame::FRAME_LEN};

/// An invalid resynchronization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Trimming zero bytes never bounds the buffer.
    #[error("Trim amount must be non-zero.")]
    ZeroTrim,
    /// The threshold is below the length of one frame.
    #[error("Threshold ({threshold}) is shorter than a frame.")]
    ThresholdTooSmall { threshold: usize },
    /// Trimming could cut into a partially received frame.
    #[error("Trimming {trim} bytes at threshold {threshold} could cut a partial frame.")]
    TrimTooLarge { threshold: usize, trim: usize },
}

/// When and how much of an unmatched buffer to discard.
///
/// Whenever an attempt finds nothing and the buffer holds at least
/// `threshold` bytes, the oldest `trim` bytes are dropped, repeatedly, until it
/// holds fewer. At least `FRAME_LEN - 1` bytes always survive, so a frame
/// still arriving is never cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResyncPolicy {
    threshold: usize,
    trim: usize,
}

impl ResyncPolicy {
    /// Trim one frame length once two frame lengths have built up.
    pub const DEFAULT: Self = Self {
        threshold: 2 * FRAME_LEN,
        trim: FRAME_LEN,
    };

    /// Validate a threshold and trim amount.
    pub fn new(threshold: usize, trim: usize) -> Result<Self, PolicyError> {
        if trim == 0 {
            Err(PolicyError::ZeroTrim)?;
        }

        if threshold < FRAME_LEN {
            Err(PolicyError::ThresholdTooSmall { threshold })?;
        }

        if threshold - trim.min(threshold) < FRAME_LEN - 1 {
            Err(PolicyError::TrimTooLarge { threshold, trim })?;
        }

        Ok(Self { threshold, trim })
    }

    /// Buffer length at which trimming starts.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of bytes dropped per trim.
    pub fn trim(&self) -> usize {
        self.trim
    }
}

impl Default for ResyncPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Accumulates bytes not yet consumed by a match or discarded by
/// resynchronization.
///
/// Each call to [`StreamBuffer::append`] makes exactly one extraction attempt
/// over the whole buffer. Offsets in the returned [`ParseOutcome`] refer to
/// the buffer as it was before that attempt consumed anything.
#[derive(Debug)]
pub struct StreamBuffer {
    buffer: BytesMut,
    policy: ResyncPolicy,
    // Consecutive attempts finding nothing since the last match or checksum
    // failure.
    misses: usize,
}

impl StreamBuffer {
    /// Create an empty buffer with the default policy.
    pub fn new() -> Self {
        Self::with_policy(ResyncPolicy::DEFAULT)
    }

    /// Create an empty buffer with a custom policy.
    pub fn with_policy(policy: ResyncPolicy) -> Self {
        Self {
            buffer: BytesMut::with_capacity(policy.threshold + FRAME_LEN),
            policy,
            misses: 0,
        }
    }

    /// Append newly arrived bytes, then make one extraction attempt.
    pub fn append(&mut self, r: &[u8]) -> ParseOutcome {
        self.buffer.extend_from_slice(r);
        self.advance()
    }

    /// Make one extraction attempt over the current contents.
    ///
    /// After a match, further complete frames may already be buffered; call
    /// this until it returns [`ParseOutcome::NoMatchYet`] to drain them.
    pub fn advance(&mut self) -> ParseOutcome {
        let outcome = extract(&self.buffer);

        match &outcome {
            ParseOutcome::MatchFound { tag, start, end } => {
                tracing::debug!(%tag, start, end, "consumed tag frame");
                self.buffer.advance(*end);
                self.misses = 0;
            }
            ParseOutcome::InvalidChecksum { error, start, end } => {
                tracing::warn!(%error, start, end, "discarded frame with bad checksum");
                self.buffer.advance(*end);
                self.misses = 0;
            }
            ParseOutcome::NoMatchYet => {
                self.misses = self.misses.saturating_add(1);
                self.resync();
            }
        }

        outcome
    }

    fn resync(&mut self) {
        let ResyncPolicy { threshold, trim } = self.policy;

        while self.buffer.len() >= threshold {
            self.buffer.advance(trim);
            tracing::trace!(trim, retained = self.buffer.len(), "dropped stale bytes");
        }
    }

    /// Number of bytes currently retained.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no bytes are retained.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The bytes currently retained, oldest first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consecutive attempts that found nothing since the last match or
    /// checksum failure.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// The policy applied after unmatched attempts.
    pub fn policy(&self) -> ResyncPolicy {
        self.policy
    }

    /// Discard all retained bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.misses = 0;
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}
