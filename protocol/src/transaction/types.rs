//! Core type definitions for catapult transactions.
//!
//! These are the small, `Copy` enums every body refers to: the type code
//! carried in the header and the one-byte discriminants written inside
//! bodies. Each enum owns its wire value so the encoder never hardcodes a
//! number.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::HASH_LENGTH;
use crate::error::{ConstructionError, EncodingError};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Header type code.
///
/// The discriminant is the 16-bit value written little-endian at byte 102 of
/// the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum TransactionType {
    /// Move mosaics and/or a message to a recipient address.
    Transfer = 0x4154,
    /// Register a root namespace or a child of an existing one.
    RegisterNamespace = 0x414E,
    /// Create a mosaic under a namespace.
    MosaicDefinition = 0x414D,
    /// Increase or decrease a mosaic's supply.
    MosaicSupplyChange = 0x424D,
    /// Add or remove multisig cosignatories and change thresholds.
    ModifyMultisigAccount = 0x4155,
    /// Aggregate whose cosignatures are all present at announce time.
    AggregateComplete = 0x4141,
    /// Aggregate that collects cosignatures on chain.
    AggregateBonded = 0x4241,
}

impl TransactionType {
    /// Wire value of this type.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Schema version written next to this type code.
    pub fn version(self) -> u8 {
        match self {
            Self::Transfer | Self::ModifyMultisigAccount => 3,
            Self::RegisterNamespace
            | Self::MosaicDefinition
            | Self::MosaicSupplyChange
            | Self::AggregateComplete
            | Self::AggregateBonded => 2,
        }
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl TryFrom<u16> for TransactionType {
    type Error = EncodingError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0x4154 => Ok(Self::Transfer),
            0x414E => Ok(Self::RegisterNamespace),
            0x414D => Ok(Self::MosaicDefinition),
            0x424D => Ok(Self::MosaicSupplyChange),
            0x4155 => Ok(Self::ModifyMultisigAccount),
            0x4141 => Ok(Self::AggregateComplete),
            0x4241 => Ok(Self::AggregateBonded),
            other => Err(EncodingError::UnsupportedVariant { type_code: other }),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "TRANSFER"),
            Self::RegisterNamespace => write!(f, "REGISTER_NAMESPACE"),
            Self::MosaicDefinition => write!(f, "MOSAIC_DEFINITION"),
            Self::MosaicSupplyChange => write!(f, "MOSAIC_SUPPLY_CHANGE"),
            Self::ModifyMultisigAccount => write!(f, "MODIFY_MULTISIG_ACCOUNT"),
            Self::AggregateComplete => write!(f, "AGGREGATE_COMPLETE"),
            Self::AggregateBonded => write!(f, "AGGREGATE_BONDED"),
        }
    }
}

// ---------------------------------------------------------------------------
// Body discriminants
// ---------------------------------------------------------------------------

/// Direction of a supply change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MosaicSupplyType {
    Decrease = 0,
    Increase = 1,
}

impl MosaicSupplyType {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Root or child registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamespaceType {
    Root = 0,
    Sub = 1,
}

impl NamespaceType {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Whether a multisig modification adds or removes a cosignatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MultisigCosignatoryModificationType {
    Add = 0,
    Remove = 1,
}

impl MultisigCosignatoryModificationType {
    pub fn id(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// TransactionHash
// ---------------------------------------------------------------------------

/// 32-byte transaction hash. This is the key confirmation listeners and
/// cosigners use to refer to an announced transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHash([u8; HASH_LENGTH]);

impl TransactionHash {
    pub const fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse 64 hex characters, either case.
    pub fn from_hex(hex_str: &str) -> Result<Self, ConstructionError> {
        let mut bytes = [0u8; HASH_LENGTH];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|e| ConstructionError::InvalidHex {
            field: "transaction hash",
            reason: e.to_string(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Uppercase hex, the form the REST gateway reports.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHash({})", self.to_hex())
    }
}

impl Serialize for TransactionHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TransactionHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TransactionHash::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [TransactionType; 7] = [
        TransactionType::Transfer,
        TransactionType::RegisterNamespace,
        TransactionType::MosaicDefinition,
        TransactionType::MosaicSupplyChange,
        TransactionType::ModifyMultisigAccount,
        TransactionType::AggregateComplete,
        TransactionType::AggregateBonded,
    ];

    #[test]
    fn type_codes_match_wire_values() {
        assert_eq!(TransactionType::Transfer.code(), 16724);
        assert_eq!(TransactionType::RegisterNamespace.code(), 16718);
        assert_eq!(TransactionType::MosaicDefinition.code(), 16717);
        assert_eq!(TransactionType::MosaicSupplyChange.code(), 16973);
        assert_eq!(TransactionType::ModifyMultisigAccount.code(), 16725);
        assert_eq!(TransactionType::AggregateComplete.code(), 16705);
        assert_eq!(TransactionType::AggregateBonded.code(), 16961);
    }

    #[test]
    fn type_code_lookup_is_total_over_known_codes() {
        for ty in ALL_TYPES {
            assert_eq!(TransactionType::try_from(ty.code()).unwrap(), ty);
        }
        assert_eq!(
            TransactionType::try_from(0x4242),
            Err(EncodingError::UnsupportedVariant { type_code: 0x4242 })
        );
    }

    #[test]
    fn versions() {
        assert_eq!(TransactionType::Transfer.version(), 3);
        assert_eq!(TransactionType::ModifyMultisigAccount.version(), 3);
        assert_eq!(TransactionType::MosaicSupplyChange.version(), 2);
        assert_eq!(TransactionType::AggregateBonded.version(), 2);
    }

    #[test]
    fn only_aggregates_are_aggregates() {
        let aggregates: Vec<_> = ALL_TYPES.iter().filter(|t| t.is_aggregate()).collect();
        assert_eq!(aggregates.len(), 2);
    }

    #[test]
    fn body_discriminants() {
        assert_eq!(MosaicSupplyType::Decrease.id(), 0);
        assert_eq!(MosaicSupplyType::Increase.id(), 1);
        assert_eq!(NamespaceType::Root.id(), 0);
        assert_eq!(NamespaceType::Sub.id(), 1);
        assert_eq!(MultisigCosignatoryModificationType::Add.id(), 0);
        assert_eq!(MultisigCosignatoryModificationType::Remove.id(), 1);
    }

    #[test]
    fn hash_hex_roundtrip() {
        let hex_str = "E12A66B8B0E1146A4300311852AA14F415681B869C0A704F58E47F10BEFDA6E3";
        let hash = TransactionHash::from_hex(&hex_str.to_lowercase()).unwrap();
        assert_eq!(hash.to_hex(), hex_str);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hex_str));
        assert!(TransactionHash::from_hex("abcd").is_err());
    }
}
