//! Unsigned 64-bit quantities as a (lower, higher) word pair.
//!
//! Amounts, durations, fees and identifiers all travel as [`UInt64`]. The
//! two-word form is what the REST and JSON layers hand out (`[lower,
//! higher]`), and it is what the wire format writes: lower word first, each
//! word little-endian, for eight bytes that read back as a plain
//! little-endian `u64`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::config::MAX_SAFE_INTEGER;
use crate::error::ConstructionError;

/// A single unsigned 64-bit value stored as two 32-bit words.
///
/// Comparison and arithmetic treat the pair as one number; the derived
/// field order is irrelevant because `Ord` is implemented by hand.
///
/// # Examples
///
/// ```
/// use nem2_protocol::UInt64;
///
/// let delta = UInt64::from_uint(10);
/// assert_eq!(delta.lower(), 10);
/// assert_eq!(delta.higher(), 0);
/// assert_eq!(UInt64::new(0, 1).to_u64(), 1 << 32);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct UInt64 {
    lower: u32,
    higher: u32,
}

impl UInt64 {
    /// Zero.
    pub const ZERO: UInt64 = UInt64 { lower: 0, higher: 0 };

    /// Construct from the two words.
    pub const fn new(lower: u32, higher: u32) -> Self {
        Self { lower, higher }
    }

    /// Construct from a native `u64`.
    pub const fn from_uint(value: u64) -> Self {
        Self {
            lower: value as u32,
            higher: (value >> 32) as u32,
        }
    }

    /// Parse 16 big-endian hex characters (the form ids are shown in).
    pub fn from_hex(hex_str: &str) -> Result<Self, ConstructionError> {
        if hex_str.len() != 16 {
            return Err(ConstructionError::InvalidHex {
                field: "uint64",
                reason: format!("expected 16 characters, got {}", hex_str.len()),
            });
        }
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|e| ConstructionError::InvalidHex {
            field: "uint64",
            reason: e.to_string(),
        })?;
        Ok(Self::from_uint(u64::from_be_bytes(bytes)))
    }

    pub const fn lower(&self) -> u32 {
        self.lower
    }

    pub const fn higher(&self) -> u32 {
        self.higher
    }

    /// The `(lower, higher)` words.
    pub const fn decompose(&self) -> (u32, u32) {
        (self.lower, self.higher)
    }

    pub const fn to_u64(&self) -> u64 {
        ((self.higher as u64) << 32) | self.lower as u64
    }

    /// Eight bytes, lower word first, each word little-endian.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.lower.to_le_bytes());
        out[4..].copy_from_slice(&self.higher.to_le_bytes());
        out
    }

    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self::from_uint(u64::from_le_bytes(bytes))
    }

    /// Big-endian uppercase hex, 16 characters.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_u64().to_be_bytes())
    }

    pub fn is_zero(&self) -> bool {
        self.lower == 0 && self.higher == 0
    }

    /// `None` on overflow.
    pub fn checked_add(self, other: UInt64) -> Option<UInt64> {
        self.to_u64().checked_add(other.to_u64()).map(Self::from_uint)
    }

    /// `None` on underflow.
    pub fn checked_sub(self, other: UInt64) -> Option<UInt64> {
        self.to_u64().checked_sub(other.to_u64()).map(Self::from_uint)
    }
}

impl Ord for UInt64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.higher
            .cmp(&other.higher)
            .then(self.lower.cmp(&other.lower))
    }
}

impl PartialOrd for UInt64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for UInt64 {
    fn from(value: u64) -> Self {
        Self::from_uint(value)
    }
}

impl From<u32> for UInt64 {
    fn from(value: u32) -> Self {
        Self::new(value, 0)
    }
}

impl From<UInt64> for u64 {
    fn from(value: UInt64) -> Self {
        value.to_u64()
    }
}

impl From<[u32; 2]> for UInt64 {
    fn from(words: [u32; 2]) -> Self {
        Self::new(words[0], words[1])
    }
}

impl From<UInt64> for [u32; 2] {
    fn from(value: UInt64) -> Self {
        [value.lower, value.higher]
    }
}

impl TryFrom<i64> for UInt64 {
    type Error = ConstructionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self::from_uint)
            .map_err(|_| ConstructionError::OutOfRange {
                value: value.to_string(),
                reason: "negative",
            })
    }
}

/// Numbers arriving as JSON doubles are only accepted while they are exact.
impl TryFrom<f64> for UInt64 {
    type Error = ConstructionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let reason = if !value.is_finite() || value.fract() != 0.0 {
            Some("not an integer")
        } else if value < 0.0 {
            Some("negative")
        } else if value > MAX_SAFE_INTEGER as f64 {
            Some("exceeds 2^53 - 1 and would lose precision")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ConstructionError::OutOfRange {
                value: value.to_string(),
                reason,
            }),
            None => Ok(Self::from_uint(value as u64)),
        }
    }
}

impl fmt::Display for UInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}

impl fmt::Debug for UInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt64([{}, {}])", self.lower, self.higher)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
