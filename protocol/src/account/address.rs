//! # Addresses
//!
//! An address is derived from a public key and a network byte:
//!
//! ```text
//! public_key (32 bytes)
//!     -> SHA3-256 -> RIPEMD-160              (20 bytes)
//!     -> network_byte ‖ digest               (21 bytes)
//!     -> ‖ first4(SHA3-256(those 21 bytes))  (25 bytes)
//!     -> base32                              (40 characters)
//! ```
//!
//! The network byte is the first byte, so every address on a network shares
//! its first character (`S` on MIJIN_TEST, `T` on PUBLIC_TEST, ...). The
//! 25 decoded bytes are what a transfer writes as its recipient.

use data_encoding::BASE32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::{
    NetworkType, ADDRESS_CHECKSUM_SIZE, ADDRESS_DECODED_SIZE, ADDRESS_ENCODED_SIZE,
};
use crate::crypto::hash::{address_digest, sha3_256};
use crate::crypto::keys::PublicKey;
use crate::error::ConstructionError;

/// A decoded, checksum-valid address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network_type: NetworkType,
    bytes: [u8; ADDRESS_DECODED_SIZE],
}

impl Address {
    /// Derive the address of `public_key` on `network_type`.
    ///
    /// The network byte leads the address, so it fixes the first base32
    /// character: `N` for Public (0x68), `T` for PublicTest (0x98), `M` for
    /// Mijin (0x60) and `S` for MijinTest (0x90).
    pub fn from_public_key(public_key: &PublicKey, network_type: NetworkType) -> Self {
        let mut bytes = [0u8; ADDRESS_DECODED_SIZE];
        bytes[0] = network_type.id();
        bytes[1..21].copy_from_slice(&address_digest(public_key.as_bytes()));
        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..ADDRESS_CHECKSUM_SIZE]);
        Self {
            network_type,
            bytes,
        }
    }

    /// Parse a plain (`SARNASAS...`) or pretty (`SARNAS-AS2BIA-...`) address.
    ///
    /// Lowercase input is accepted. The network byte must be known and the
    /// checksum must match.
    pub fn from_raw_address(raw: &str) -> Result<Self, ConstructionError> {
        let invalid = |reason| ConstructionError::InvalidAddress {
            address: raw.to_string(),
            reason,
        };
        let plain: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if plain.len() != ADDRESS_ENCODED_SIZE {
            return Err(invalid("expected 40 base32 characters"));
        }
        let decoded = BASE32
            .decode(plain.as_bytes())
            .map_err(|_| invalid("not valid base32"))?;
        let bytes: [u8; ADDRESS_DECODED_SIZE] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| invalid("wrong decoded length"))?;
        let network_type =
            NetworkType::try_from(bytes[0]).map_err(|_| invalid("unknown network byte"))?;
        let checksum = sha3_256(&bytes[..21]);
        if checksum[..ADDRESS_CHECKSUM_SIZE] != bytes[21..] {
            return Err(invalid("checksum mismatch"));
        }
        Ok(Self {
            network_type,
            bytes,
        })
    }

    /// The 25 decoded bytes, as written into a transfer's recipient field.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_DECODED_SIZE] {
        &self.bytes
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// 40-character base32 form.
    pub fn plain(&self) -> String {
        BASE32.encode(&self.bytes)
    }

    /// Plain form with a dash after every six characters.
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.plain())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::from_raw_address(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC_KEY: &str = "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf";

    #[test]
    fn derives_reference_address() {
        let pk = PublicKey::from_hex(PUBLIC_KEY).unwrap();
        let address = Address::from_public_key(&pk, NetworkType::MijinTest);
        assert_eq!(address.plain(), "SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP");
    }

    #[test]
    fn network_byte_selects_prefix() {
        let pk = PublicKey::from_hex(PUBLIC_KEY).unwrap();
        let address = Address::from_public_key(&pk, NetworkType::PublicTest);
        assert_eq!(address.plain(), "TARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJE47FYR3");
        assert_eq!(address.as_bytes()[0], 0x98);

        for (network_type, prefix) in [
            (NetworkType::Public, 'N'),
            (NetworkType::PublicTest, 'T'),
            (NetworkType::Mijin, 'M'),
            (NetworkType::MijinTest, 'S'),
        ] {
            let address = Address::from_public_key(&pk, network_type);
            assert!(address.plain().starts_with(prefix), "{network_type:?}");
        }
    }

    #[test]
    fn parses_plain_and_pretty() {
        let address = Address::from_raw_address("SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBYKC").unwrap();
        assert_eq!(address.network_type(), NetworkType::MijinTest);
        assert_eq!(address.pretty(), "SBILTA-367K2L-X2FEXG-5TFWAS-7GEFYA-GY7QLF-BYKC");
        let reparsed = Address::from_raw_address(&address.pretty()).unwrap();
        assert_eq!(reparsed, address);
        let lower = Address::from_raw_address("sbilta367k2lx2fexg5tfwas7gefyagy7qlfbykc").unwrap();
        assert_eq!(lower, address);
    }

    #[test]
    fn rejects_bad_checksum() {
        let err = Address::from_raw_address("SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBYKD").unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidAddress { .. }));
    }

    #[test]
    fn rejects_bad_length_and_alphabet() {
        assert!(Address::from_raw_address("SBILTA").is_err());
        assert!(Address::from_raw_address("SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBYK1").is_err());
    }

    #[test]
    fn serde_roundtrip_as_plain_string() {
        let address = Address::from_raw_address("SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBYKC").unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"SBILTA367K2LX2FEXG5TFWAS7GEFYAGY7QLFBYKC\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
