//! The validated tag identifier, and errors producing one.

use core::{
    fmt::{self, Write},
    hash::{Hash, Hasher},
    str::FromStr,
};

use thiserror::Error;

use super::{
    check::{compute_checksum, validate},
    extract::{ParseOutcome, extract},
    frame::{FRAME_LEN, GROUP_COUNT, Groups, ID_LEN, decode},
};

/// Calculated and found checksum values of a well-formed frame do not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "Bad checksum for received key {}: calculated ({calculated:02X}) and found ({found:02X}) values do not match.",
    Dashed(.groups)
)]
pub struct ChecksumMismatch {
    /// The digit groups as received.
    pub groups: Groups,
    /// XOR of the five tag ID groups.
    pub calculated: u8,
    /// Value of the checksum group.
    pub found: u8,
}

/// An error parsing a single tag from bytes or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Fewer bytes than a complete frame.
    #[error("Complete 16 bytes expected, received {len}.")]
    Incomplete { len: usize },
    /// Nothing matching the frame format.
    #[error("No frame matches the expected format.")]
    Malformed,
    /// A well-formed frame failed its checksum.
    #[error(transparent)]
    Checksum(#[from] ChecksumMismatch),
}

/// A tag read, checksum verified.
///
/// The digits are kept as received, so accessors reproduce the reader's
/// casing. Comparison and hashing use the decoded values instead.
#[derive(Debug, Clone, Copy)]
pub struct TagIdentifier {
    groups: Groups,
    values: [u8; GROUP_COUNT],
}

impl TagIdentifier {
    /// Construct from a frame's digit groups and their decoded values, if the
    /// checksum holds.
    pub(super) fn from_parts(
        groups: Groups,
        values: [u8; GROUP_COUNT],
    ) -> Result<Self, ChecksumMismatch> {
        if !validate(&values) {
            Err(ChecksumMismatch {
                groups,
                calculated: compute_checksum(&values[..ID_LEN]),
                found: values[ID_LEN],
            })?;
        }

        Ok(Self { groups, values })
    }

    /// Parse the first frame found anywhere in a slice.
    ///
    /// Unlike [`extract`], this treats a slice without a complete frame as an
    /// error, and reports nothing about where the frame was found.
    pub fn from_frame(r: &[u8]) -> Result<Self, FrameError> {
        if r.len() < FRAME_LEN {
            Err(FrameError::Incomplete { len: r.len() })?;
        }

        match extract(r) {
            ParseOutcome::MatchFound { tag, .. } => Ok(tag),
            ParseOutcome::InvalidChecksum { error, .. } => Err(error.into()),
            ParseOutcome::NoMatchYet => Err(FrameError::Malformed),
        }
    }

    /// The six digit groups, checksum last.
    pub fn raw_hex_groups(&self) -> [&str; GROUP_COUNT] {
        let s = self.raw_concatenated();
        core::array::from_fn(|i| &s[2 * i..2 * i + 2])
    }

    /// The twelve digits without separators.
    pub fn raw_concatenated(&self) -> &str {
        match core::str::from_utf8(self.groups.as_flattened()) {
            Ok(s) => s,
            Err(_) => unreachable!(),
        }
    }

    /// The groups joined with dashes, as rendered by [`fmt::Display`].
    #[cfg(feature = "alloc")]
    pub fn formatted(&self) -> alloc::string::String {
        alloc::string::ToString::to_string(self)
    }

    /// The five tag ID bytes.
    pub fn id(&self) -> [u8; ID_LEN] {
        let mut id = [0; ID_LEN];
        id.copy_from_slice(&self.values[..ID_LEN]);
        id
    }

    /// The checksum byte.
    pub fn checksum(&self) -> u8 {
        self.values[ID_LEN]
    }
}

impl PartialEq for TagIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for TagIdentifier {}

impl Hash for TagIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl fmt::Display for TagIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Dashed(&self.groups), f)
    }
}

/// Parse either the concatenated (`1A2B3C4D5E1E`) or dashed
/// (`1A-2B-3C-4D-5E-1E`) form.
impl FromStr for TagIdentifier {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let r = s.as_bytes();

        // Distance between the starts of consecutive groups.
        let stride = match r.len() {
            12 => 2,
            17 => 3,
            _ => Err(FrameError::Malformed)?,
        };

        let mut groups = [[0; 2]; GROUP_COUNT];

        for (i, g) in groups.iter_mut().enumerate() {
            let at = i * stride;

            if stride == 3 && i > 0 && r[at - 1] != b'-' {
                Err(FrameError::Malformed)?;
            }

            *g = [r[at], r[at + 1]];
        }

        let values = decode(&groups).ok_or(FrameError::Malformed)?;

        Ok(Self::from_parts(groups, values)?)
    }
}

/// Digit groups joined with dashes.
struct Dashed<'a>(&'a Groups);

impl fmt::Display for Dashed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, [hi, lo]) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char('-')?;
            }
            f.write_char(*hi as char)?;
            f.write_char(*lo as char)?;
        }

        Ok(())
    }
}
