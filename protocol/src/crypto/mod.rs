//! # Cryptographic Primitives
//!
//! Everything that touches a key or a digest goes through this module:
//!
//! - **keys** — Ed25519 key pairs with the catapult SHA3-512 variant.
//! - **signatures** — signing of 32-byte digests and strict-format
//!   verification of hex signatures.
//! - **hash** — SHA3-256 and RIPEMD-160 helpers.
//!
//! Nothing here is hand-rolled. Curve arithmetic comes from ed25519-dalek,
//! the hashes from the RustCrypto `sha3` and `ripemd` crates.

pub mod hash;
pub(crate) mod hex_serde;
pub mod keys;
pub mod signatures;

pub use hash::{address_digest, ripemd160, sha3_256, sha3_256_multi};
pub use keys::{KeyPair, PublicKey, Signature};
pub use signatures::{parse_signature_hex, sign, verify, verify_hex};
