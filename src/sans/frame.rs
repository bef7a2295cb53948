//! Byte-level frame grammar.

use zerocopy::{FromBytes, IntoBytes};

use super::check::compute_checksum;

/// Start-of-text marker opening every frame.
pub const STX: u8 = 0x02;
/// End-of-text marker closing every frame.
pub const ETX: u8 = 0x03;
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';

/// Length of a complete frame, markers included.
pub const FRAME_LEN: usize = 16;
/// Number of two-digit groups in a frame (tag ID plus checksum).
pub const GROUP_COUNT: usize = 6;
/// Number of groups forming the tag ID.
pub const ID_LEN: usize = GROUP_COUNT - 1;

/// The hex digit pairs of a frame, in payload order.
pub type Groups = [[u8; 2]; GROUP_COUNT];

#[repr(C)]
#[derive(FromBytes, IntoBytes)]
struct RawFrame {
    start: u8,
    groups: Groups,
    cr: u8,
    lf: u8,
    end: u8,
}

/// Match a window of bytes against the frame grammar.
///
/// Returns the digit groups as received, and their decoded values, if every
/// marker is in place and every group holds two hex digits.
pub fn parse(r: &[u8; FRAME_LEN]) -> Option<(Groups, [u8; GROUP_COUNT])> {
    let RawFrame {
        start,
        groups,
        cr,
        lf,
        end,
    } = zerocopy::transmute!(*r);

    if start != STX || cr != CR || lf != LF || end != ETX {
        return None;
    }

    let values = decode(&groups)?;

    Some((groups, values))
}

/// Build a valid frame carrying a tag ID, with uppercase digits.
pub fn encode(id: [u8; ID_LEN]) -> [u8; FRAME_LEN] {
    let mut groups = [[0; 2]; GROUP_COUNT];

    let checksum = compute_checksum(&id);
    for (g, v) in groups.iter_mut().zip(id.iter().chain([&checksum])) {
        *g = encode_group(*v);
    }

    zerocopy::transmute!(RawFrame {
        start: STX,
        groups,
        cr: CR,
        lf: LF,
        end: ETX,
    })
}

/// Decode every group, failing on the first that is not a hex pair.
pub fn decode(groups: &Groups) -> Option<[u8; GROUP_COUNT]> {
    let mut values = [0; GROUP_COUNT];

    for (v, g) in values.iter_mut().zip(groups) {
        *v = decode_group(*g)?;
    }

    Some(values)
}

/// Decode a pair of case-insensitive hex digits to a byte.
pub fn decode_group([hi, lo]: [u8; 2]) -> Option<u8> {
    Some(nibble(hi)? << 4 | nibble(lo)?)
}

fn encode_group(v: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    [DIGITS[(v >> 4) as usize], DIGITS[(v & 0xF) as usize]]
}

fn nibble(d: u8) -> Option<u8> {
    match d {
        b'0'..=b'9' => Some(d - b'0'),
        b'a'..=b'f' => Some(d - b'a' + 10),
        b'A'..=b'F' => Some(d - b'A' + 10),
        _ => None,
    }
}
