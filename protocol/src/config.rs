//! # Protocol Configuration & Constants
//!
//! Every magic number the encoder and signer rely on lives here. The values
//! are pinned to the catapult wire schema; if a network upgrade changes the
//! layout, this is the file that changes first.
//!
//! Nothing in this module is tunable at runtime. A [`NetworkProfile`] is the
//! closest thing to configuration: it is selected by the network identifier
//! byte and carries the per-network limits the encoder enforces.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EncodingError;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Network identifier byte. Selects address prefixes and the parameter set
/// used when encoding and signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NetworkType {
    /// Public main network.
    Public = 0x68,
    /// Public test network.
    PublicTest = 0x98,
    /// Private (mijin) network.
    Mijin = 0x60,
    /// Private (mijin) test network.
    MijinTest = 0x90,
}

impl NetworkType {
    /// Every known network, in identifier order.
    pub const ALL: [NetworkType; 4] = [
        NetworkType::Mijin,
        NetworkType::Public,
        NetworkType::MijinTest,
        NetworkType::PublicTest,
    ];

    /// The raw identifier byte written into addresses and transaction headers.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Parameter set for this network.
    ///
    /// All current network bytes belong to the same catapult generation, so
    /// they share one profile. A future generation gets its own arm here.
    pub fn profile(self) -> NetworkProfile {
        match self {
            Self::Public | Self::PublicTest | Self::Mijin | Self::MijinTest => CATAPULT_PROFILE,
        }
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x68 => Ok(Self::Public),
            0x98 => Ok(Self::PublicTest),
            0x60 => Ok(Self::Mijin),
            0x90 => Ok(Self::MijinTest),
            other => Err(EncodingError::UnknownNetwork(other)),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "PUBLIC"),
            Self::PublicTest => write!(f, "PUBLIC_TEST"),
            Self::Mijin => write!(f, "MIJIN"),
            Self::MijinTest => write!(f, "MIJIN_TEST"),
        }
    }
}

// ---------------------------------------------------------------------------
// Network Profiles
// ---------------------------------------------------------------------------

/// Per-network encoding limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Largest complete payload (header, body and cosignatures) the network
    /// accepts, in bytes.
    pub max_transaction_size: usize,
    /// Embedded transactions inside an aggregate are zero-padded to a
    /// multiple of this many bytes.
    pub aggregate_alignment: usize,
}

/// The catapult parameter set shared by every current network byte.
pub const CATAPULT_PROFILE: NetworkProfile = NetworkProfile {
    max_transaction_size: MAX_TRANSACTION_SIZE,
    aggregate_alignment: AGGREGATE_ALIGNMENT,
};

/// Hard ceiling on a serialized transaction.
pub const MAX_TRANSACTION_SIZE: usize = 65_536;

/// Alignment boundary for embedded transactions.
pub const AGGREGATE_ALIGNMENT: usize = 8;

// ---------------------------------------------------------------------------
// Header Layout
// ---------------------------------------------------------------------------

/// Length of the leading `size` field.
pub const SIZE_FIELD_LENGTH: usize = 4;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 seed (private key) length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a transaction hash and of the signing digest.
pub const HASH_LENGTH: usize = 32;

/// Byte offset of the signature field.
pub const SIGNATURE_OFFSET: usize = SIZE_FIELD_LENGTH;

/// Byte offset of the signer public key field.
pub const SIGNER_OFFSET: usize = SIGNATURE_OFFSET + SIGNATURE_LENGTH;

/// Byte offset of the version byte. Everything from here on is covered by
/// the signing digest.
pub const VERSION_OFFSET: usize = SIGNER_OFFSET + PUBLIC_KEY_LENGTH;

/// `size ‖ signature ‖ signer ‖ version ‖ network ‖ type ‖ fee ‖ deadline`.
pub const HEADER_SIZE: usize = VERSION_OFFSET + 1 + 1 + 2 + 8 + 8;

/// `size ‖ signer ‖ version ‖ network ‖ type` for transactions embedded in an
/// aggregate.
pub const EMBEDDED_HEADER_SIZE: usize = SIZE_FIELD_LENGTH + PUBLIC_KEY_LENGTH + 1 + 1 + 2;

/// `signer ‖ signature` appended after an aggregate's embedded transactions.
pub const COSIGNATURE_SIZE: usize = PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

/// Version carried by detached cosignature records.
pub const COSIGNATURE_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Decoded address length: network byte, RIPEMD-160 digest, checksum.
pub const ADDRESS_DECODED_SIZE: usize = 25;

/// Base32 address length.
pub const ADDRESS_ENCODED_SIZE: usize = 40;

/// Checksum bytes at the end of a decoded address.
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Network epoch (2016-04-01T00:00:00Z) in Unix milliseconds. Deadlines are
/// encoded relative to this instant.
pub const NETWORK_EPOCH_MS: i64 = 1_459_468_800_000;

/// Default deadline offset used by [`crate::transaction::Deadline::default`].
pub const DEFAULT_DEADLINE_HOURS: i64 = 2;

/// Deadlines must be strictly less than this far in the future.
pub const MAX_DEADLINE_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Names & Identifiers
// ---------------------------------------------------------------------------

/// Longest namespace or mosaic name part, in bytes.
pub const MAX_NAME_LENGTH: usize = 64;

/// Deepest namespace path (`root.sub.leaf`).
pub const MAX_NAMESPACE_DEPTH: usize = 3;

/// Bit 63 of every derived identifier is cleared.
pub const ID_HIGHER_MASK: u32 = 0x7FFF_FFFF;

/// Largest divisibility a mosaic definition may declare.
pub const MAX_DIVISIBILITY: u8 = 6;

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_identifier_bytes() {
        assert_eq!(NetworkType::Public.id(), 0x68);
        assert_eq!(NetworkType::PublicTest.id(), 0x98);
        assert_eq!(NetworkType::Mijin.id(), 0x60);
        assert_eq!(NetworkType::MijinTest.id(), 0x90);
    }

    #[test]
    fn network_type_from_byte() {
        for network in NetworkType::ALL {
            assert_eq!(NetworkType::try_from(network.id()).unwrap(), network);
        }
        assert!(matches!(
            NetworkType::try_from(0x42),
            Err(EncodingError::UnknownNetwork(0x42))
        ));
    }

    #[test]
    fn header_is_120_bytes() {
        assert_eq!(VERSION_OFFSET, 100);
        assert_eq!(HEADER_SIZE, 120);
        assert_eq!(EMBEDDED_HEADER_SIZE, 40);
    }

    #[test]
    fn every_network_uses_catapult_profile() {
        for network in NetworkType::ALL {
            assert_eq!(network.profile(), CATAPULT_PROFILE);
        }
    }

    #[test]
    fn network_type_serde_roundtrip() {
        for network in NetworkType::ALL {
            let json = serde_json::to_string(&network).unwrap();
            let recovered: NetworkType = serde_json::from_str(&json).unwrap();
            assert_eq!(network, recovered);
        }
    }
}
