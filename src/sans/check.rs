//! Helper for computing frame checksums.

use super::frame::{GROUP_COUNT, ID_LEN};

/// Accumulate a slice of bytes into an XOR checksum.
pub fn compute_checksum(r: &[u8]) -> u8 {
    r.iter().fold(0, |acc, b| acc ^ b)
}

/// Check the final group of decoded frame values against the others.
pub fn validate(values: &[u8; GROUP_COUNT]) -> bool {
    compute_checksum(&values[..ID_LEN]) == values[ID_LEN]
}
