//! Namespace and mosaic identifiers.
//!
//! An identifier is a [`UInt64`] derived by hashing a name, optionally under
//! a parent identifier:
//!
//! ```text
//! root id = first8(SHA3-256([0u8; 8] ‖ name))
//! sub id  = first8(SHA3-256(parent.to_le_bytes() ‖ name))
//! ```
//!
//! The eight bytes are read as little-endian (lower, higher) words and bit 63
//! is cleared. Mosaic ids use the same rule with the owning namespace as the
//! parent, so `nem:xem` is `sub_id(id("nem"), "xem")`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ID_HIGHER_MASK, MAX_NAMESPACE_DEPTH, MAX_NAME_LENGTH};
use crate::crypto::hash::sha3_256_multi;
use crate::error::ConstructionError;
use crate::uint64::UInt64;

/// Parent used when deriving a root identifier.
const ROOT_PARENT: UInt64 = UInt64::ZERO;

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Identifier of a root name.
pub fn derive_root_id(name: &str) -> UInt64 {
    derive_sub_id(ROOT_PARENT, name)
}

/// Identifier of `name` under `parent`.
///
/// # Example
///
/// ```
/// use nem2_protocol::id::{derive_root_id, derive_sub_id};
///
/// let parent = derive_root_id("parent-test-namespace");
/// assert_eq!(derive_sub_id(parent, "child"), derive_sub_id(parent, "child"));
/// ```
pub fn derive_sub_id(parent: UInt64, name: &str) -> UInt64 {
    let digest = sha3_256_multi(&[&parent.to_le_bytes(), name.as_bytes()]);
    let lower = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let higher = u32::from_le_bytes([digest[4], digest[5], digest[6], digest[7]]);
    UInt64::new(lower, higher & ID_HIGHER_MASK)
}

/// Check one name part against the network naming rules: 1 to 64 bytes,
/// lowercase alphanumerics plus `-` and `_`, not starting with a separator.
pub fn validate_name_part(name: &str) -> Result<(), ConstructionError> {
    let invalid = |reason| ConstructionError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(invalid("longer than 64 bytes"));
    }
    let mut bytes = name.bytes();
    let first = bytes.next().unwrap_or_default();
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return Err(invalid("must start with a lowercase letter or digit"));
    }
    if !bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_') {
        return Err(invalid("only a-z, 0-9, '-' and '_' are allowed"));
    }
    Ok(())
}

/// Ids of every level of a dotted namespace path, root first.
pub fn namespace_path(name: &str) -> Result<Vec<NamespaceId>, ConstructionError> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > MAX_NAMESPACE_DEPTH {
        return Err(ConstructionError::InvalidName {
            name: name.to_string(),
            reason: "too many namespace levels",
        });
    }
    let mut path = Vec::with_capacity(parts.len());
    let mut parent = ROOT_PARENT;
    for part in parts {
        validate_name_part(part).map_err(|_| ConstructionError::InvalidName {
            name: name.to_string(),
            reason: "invalid namespace part",
        })?;
        parent = derive_sub_id(parent, part);
        path.push(NamespaceId(parent));
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// NamespaceId
// ---------------------------------------------------------------------------

/// Identifier of a namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(pub UInt64);

impl NamespaceId {
    pub const fn new(id: UInt64) -> Self {
        Self(id)
    }

    /// Leaf id of a dotted path such as `"nem"` or `"company.department"`.
    pub fn from_name(name: &str) -> Result<Self, ConstructionError> {
        let path = namespace_path(name)?;
        path.last().copied().ok_or_else(|| ConstructionError::InvalidName {
            name: name.to_string(),
            reason: "empty",
        })
    }

    pub fn id(&self) -> UInt64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<UInt64> for NamespaceId {
    fn from(id: UInt64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// MosaicId
// ---------------------------------------------------------------------------

/// Identifier of a mosaic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MosaicId(pub UInt64);

impl MosaicId {
    pub const fn new(id: UInt64) -> Self {
        Self(id)
    }

    /// Id of a fully qualified `"namespace.path:mosaic"` name.
    pub fn from_name(full_name: &str) -> Result<Self, ConstructionError> {
        let Some((namespace, mosaic)) = full_name.split_once(':') else {
            return Err(ConstructionError::InvalidName {
                name: full_name.to_string(),
                reason: "missing ':' between namespace and mosaic name",
            });
        };
        Self::from_namespace_and_name(NamespaceId::from_name(namespace)?, mosaic)
    }

    /// Id of `mosaic_name` under an already known namespace.
    pub fn from_namespace_and_name(
        namespace: NamespaceId,
        mosaic_name: &str,
    ) -> Result<Self, ConstructionError> {
        validate_name_part(mosaic_name)?;
        Ok(Self(derive_sub_id(namespace.0, mosaic_name)))
    }

    pub fn id(&self) -> UInt64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<UInt64> for MosaicId {
    fn from(id: UInt64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_id_vector() {
        let id = derive_root_id("root-test-namespace");
        assert_eq!(hex::encode_upper(id.to_le_bytes()), "CFCBE72D994BE61B");
        assert_eq!(id.decompose(), (770165711, 468077465));
    }

    #[test]
    fn sub_id_vector() {
        let parent = derive_root_id("parent-test-namespace");
        assert_eq!(hex::encode_upper(parent.to_le_bytes()), "4DF55E7F6D8FB77F");
        let child = derive_sub_id(parent, "root-test-namespace");
        assert_eq!(hex::encode_upper(child.to_le_bytes()), "70BB66539D9C2606");
    }

    #[test]
    fn derivation_is_deterministic() {
        let parent = UInt64::new(929036875, 2226345261);
        for name in ["xem", "a", "some-long_name-0123"] {
            assert_eq!(derive_sub_id(parent, name), derive_sub_id(parent, name));
        }
        assert_ne!(derive_sub_id(parent, "a"), derive_sub_id(parent, "b"));
    }

    #[test]
    fn top_bit_is_always_clear() {
        for i in 0..64 {
            let id = derive_root_id(&format!("name{}", i));
            assert_eq!(id.higher() & 0x8000_0000, 0);
        }
    }

    #[test]
    fn namespace_path_chains_parents() {
        let path = namespace_path("a.b.c").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].id(), derive_root_id("a"));
        assert_eq!(path[1].id(), derive_sub_id(path[0].id(), "b"));
        assert_eq!(path[2].id(), derive_sub_id(path[1].id(), "c"));
        assert_eq!(NamespaceId::from_name("a.b.c").unwrap(), path[2]);
    }

    #[test]
    fn namespace_path_rejects_bad_names() {
        assert!(namespace_path("a.b.c.d").is_err());
        assert!(namespace_path("").is_err());
        assert!(namespace_path("a..b").is_err());
        assert!(namespace_path("Upper").is_err());
        assert!(namespace_path("-leading").is_err());
        assert!(namespace_path(&"x".repeat(65)).is_err());
        assert!(namespace_path(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn mosaic_id_from_full_name() {
        let ns = NamespaceId::from_name("nem").unwrap();
        let expected = derive_sub_id(ns.id(), "xem");
        assert_eq!(MosaicId::from_name("nem:xem").unwrap().id(), expected);
        assert!(MosaicId::from_name("nemxem").is_err());
        assert!(MosaicId::from_name("nem:X").is_err());
    }

    #[test]
    fn ids_serialize_as_word_pairs() {
        let id = MosaicId::new(UInt64::new(3646934825, 3576016193));
        assert_eq!(serde_json::to_string(&id).unwrap(), "[3646934825,3576016193]");
    }
}
