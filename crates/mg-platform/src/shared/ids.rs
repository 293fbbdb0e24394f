//! Id Generation
//!
//! Time-sorted unique ids in two forms:
//! - Crockford Base32 strings for principals (13 characters, lexicographically
//!   sortable by creation time)
//! - positive `i64` values for catalog records, which key on integers
//!
//! Layout of the underlying 64-bit value:
//! - 42 bits: milliseconds since the Unix epoch
//! - 10 bits: random component
//! - 12 bits: per-process counter (4096 ids per millisecond)

use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Crockford Base32 alphabet (excludes I, L, O, U)
const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

static COUNTER: AtomicU16 = AtomicU16::new(0);

pub struct IdGenerator;

impl IdGenerator {
    /// Generate a new string id, e.g. "0HZXEQ5Y8JY5Z".
    pub fn next() -> String {
        encode(Self::next_raw())
    }

    /// Generate a new numeric id. Always strictly positive, so `0` can serve
    /// as an "unassigned/invalid" sentinel in caller-facing contracts.
    pub fn next_numeric() -> i64 {
        // Clearing the sign bit keeps the value positive; the timestamp
        // component guarantees it is nonzero.
        (Self::next_raw() & 0x7FFF_FFFF_FFFF_FFFF) as i64
    }

    /// Parse a string id back to its numeric form.
    pub fn parse(id: &str) -> Option<i64> {
        decode(id).map(|v| v as i64)
    }

    /// Render a numeric id in string form.
    pub fn render(value: i64) -> String {
        encode(value as u64)
    }

    fn next_raw() -> u64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;

        let counter = COUNTER.fetch_add(1, Ordering::SeqCst) as u64;
        let random = (rand::random::<u16>() as u64) & 0x3FF;

        ((millis & 0x3FF_FFFF_FFFF) << 22) | (random << 12) | (counter & 0xFFF)
    }
}

/// Encode a 64-bit value as 13 Crockford Base32 characters.
fn encode(mut value: u64) -> String {
    let mut out = [b'0'; 13];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Decode a Crockford Base32 string back to its 64-bit value.
fn decode(s: &str) -> Option<u64> {
    if s.len() != 13 {
        return None;
    }
    let mut value: u64 = 0;
    for ch in s.bytes() {
        let digit = ALPHABET.iter().position(|&c| c == ch.to_ascii_uppercase())?;
        value = (value << 5) | digit as u64;
    }
    Some(value)
}
