//! # Key Management
//!
//! Ed25519 key pairs for catapult accounts.
//!
//! Catapult uses Ed25519 over Curve25519 but swaps the internal SHA-512 for
//! **SHA3-512**: the seed is expanded with SHA3-512, and the nonce and
//! challenge hashes are SHA3-512 as well. The curve arithmetic is unchanged,
//! so we drive ed25519-dalek's `hazmat` layer with a different digest instead
//! of reimplementing anything.
//!
//! ## Security considerations
//!
//! - The 32-byte seed sits in a `Zeroizing` buffer and the expanded scalar in
//!   dalek's `ExpandedSecretKey`; both are wiped on drop.
//! - `KeyPair` has no `Display`, no `Serialize`, and its `Debug` prints only
//!   the public key. Exporting the seed is an explicit call to
//!   [`KeyPair::private_key_hex`].
//! - A key pair signs 32-byte digests. Callers hash first.

use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_512};
use std::fmt;
use zeroize::Zeroizing;

use crate::config::{HASH_LENGTH, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::error::CryptoError;

/// A signing key pair.
///
/// # Examples
///
/// ```
/// use nem2_protocol::crypto::KeyPair;
///
/// let kp = KeyPair::generate();
/// let digest = [7u8; 32];
/// let sig = kp.sign(&digest);
/// assert!(kp.public_key().verify(&digest, &sig));
/// ```
pub struct KeyPair {
    seed: Zeroizing<[u8; PRIVATE_KEY_LENGTH]>,
    expanded: ExpandedSecretKey,
    verifying_key: VerifyingKey,
}

/// A 32-byte Ed25519 public key.
///
/// Stored as raw bytes without checking that they decompress to a curve
/// point: an address can be derived from any 32 bytes, and verification
/// against an invalid point simply fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "super::hex_serde")] [u8; PUBLIC_KEY_LENGTH]);

/// A 64-byte Ed25519 signature (`R ‖ S`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "super::hex_serde")] [u8; SIGNATURE_LENGTH]);

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

impl KeyPair {
    /// Fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        OsRng.fill_bytes(&mut seed[..]);
        Self::from_seed(&seed)
    }

    /// Deterministic key pair from a 32-byte seed (the catapult "private key").
    pub fn from_seed(seed: &[u8; PRIVATE_KEY_LENGTH]) -> Self {
        let mut hash = Zeroizing::new([0u8; 64]);
        hash.copy_from_slice(&Sha3_512::digest(seed));
        let expanded = ExpandedSecretKey::from_bytes(&hash);
        let verifying_key = VerifyingKey::from(&expanded);
        Self {
            seed: Zeroizing::new(*seed),
            expanded,
            verifying_key,
        }
    }

    /// Parse a 64-character hex private key.
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        hex::decode_to_slice(hex_str, &mut seed[..]).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.verifying_key.to_bytes())
    }

    /// Sign a 32-byte digest.
    ///
    /// Deterministic: the same key and digest always give the same signature.
    pub fn sign(&self, digest: &[u8; HASH_LENGTH]) -> Signature {
        let sig = raw_sign::<Sha3_512>(&self.expanded, digest, &self.verifying_key);
        Signature(sig.to_bytes())
    }

    /// Uppercase hex export of the seed. Handle with care.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(&self.seed[..])
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.seed)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key())
    }
}

impl PartialEq for KeyPair {
    /// Compared by public key; secret bytes are never compared.
    fn eq(&self, other: &Self) -> bool {
        self.verifying_key == other.verifying_key
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse 64 hex characters, either case.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Uppercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Decompress into a dalek verifying key.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidCurvePoint)
    }

    /// `true` when `signature` is valid for `message` under this key.
    ///
    /// A key that is not a curve point verifies nothing and yields `false`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = self.to_verifying_key() else {
            return false;
        };
        let sig = DalekSignature::from_bytes(&signature.0);
        raw_verify::<Sha3_512>(&verifying_key, message, &sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// The `R` half, folded into transaction hashes.
    pub fn r_bytes(&self) -> &[u8] {
        &self.0[..SIGNATURE_LENGTH / 2]
    }

    /// Uppercase hex, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_public_key_vector() {
        let kp = KeyPair::from_seed(&[0u8; 32]);
        assert_eq!(
            kp.public_key().to_hex(),
            "43EEB17F0BAB10DD51AB70983C25200A1742D31B3B7B54C38C34D7B827B26EED"
        );
    }

    #[test]
    fn hex_private_key_matches_seed() {
        let kp = KeyPair::from_private_key_hex(
            "575dbb3062267eff57c970a336ebbc8fbcfe12c5bd3ed7bc11eb0481d7704ced",
        )
        .unwrap();
        assert_eq!(
            kp.public_key().to_hex(),
            "BD8D3F8B7E1B3839C650F458234AB1FF87CDB1EDA36338D9E446E27D454717F2"
        );
        assert_eq!(
            kp.private_key_hex(),
            "575DBB3062267EFF57C970A336EBBC8FBCFE12C5BD3ED7BC11EB0481D7704CED"
        );
    }

    #[test]
    fn bad_private_key_hex_rejected() {
        assert_eq!(
            KeyPair::from_private_key_hex("abcd").unwrap_err(),
            CryptoError::InvalidPrivateKey
        );
        assert!(KeyPair::from_private_key_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = KeyPair::generate();
        let digest = [42u8; 32];
        let sig = kp.sign(&digest);
        assert!(kp.public_key().verify(&digest, &sig));
        assert!(!kp.public_key().verify(&[43u8; 32], &sig));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = KeyPair::from_seed(&[9u8; 32]);
        assert_eq!(kp.sign(&[1u8; 32]), kp.sign(&[1u8; 32]));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let sig = kp1.sign(&[5u8; 32]);
        assert!(!kp2.public_key().verify(&[5u8; 32], &sig));
    }

    #[test]
    fn debug_never_prints_seed() {
        let kp = KeyPair::from_seed(&[0xAB; 32]);
        let debug = format!("{:?}", kp);
        assert!(debug.starts_with("KeyPair(pub="));
        assert!(!debug.contains(&"AB".repeat(32)));
    }

    #[test]
    fn clone_keeps_identity() {
        let kp = KeyPair::generate();
        assert_eq!(kp.clone(), kp);
    }

    #[test]
    fn public_key_hex_is_case_insensitive() {
        let upper = PublicKey::from_hex(
            "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF",
        )
        .unwrap();
        let lower = PublicKey::from_hex(
            "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf",
        )
        .unwrap();
        assert_eq!(upper, lower);
        assert!(PublicKey::from_hex("b4f1").is_err());
    }

    #[test]
    fn public_key_serde_is_hex() {
        let pk = KeyPair::from_seed(&[0u8; 32]).public_key();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(
            json,
            "\"43EEB17F0BAB10DD51AB70983C25200A1742D31B3B7B54C38C34D7B827B26EED\""
        );
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }
}
