//! # Hashing Utilities
//!
//! The catapult schema uses exactly three hash functions, each with one job:
//!
//! - **SHA3-256** — identifiers, signing digests, transaction hashes, and the
//!   first round of address derivation.
//! - **SHA3-512** — internal to the Ed25519 variant (seed expansion, nonce,
//!   challenge). It lives in [`super::keys`] and is not exposed here.
//! - **RIPEMD-160** — the second round of address derivation.
//!
//! These are FIPS-202 SHA3, not the pre-standard Keccak padding. Mixing the
//! two up yields perfectly plausible-looking hashes that the network rejects.

use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

/// SHA3-256 of `data`.
///
/// # Example
///
/// ```
/// use nem2_protocol::crypto::sha3_256;
///
/// assert_eq!(sha3_256(b"").len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// SHA3-256 over the concatenation of `parts`, without building the
/// concatenation.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// `RIPEMD160(SHA3-256(public_key))`, the account part of an address.
pub fn address_digest(public_key: &[u8]) -> [u8; 20] {
    ripemd160(&sha3_256(public_key))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
