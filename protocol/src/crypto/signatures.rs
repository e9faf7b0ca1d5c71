//! # Digital Signatures
//!
//! Signing and verification entry points.
//!
//! Verification input usually arrives as text (a hex signature pasted from
//! the REST API or a listener message), so [`verify_hex`] checks the text's
//! shape before touching the curve. A signature of the wrong length or with
//! non-hex characters is a caller error and comes back as a
//! [`SignatureFormatError`]. A well-formed signature that does not match is
//! not an error at all: it is `Ok(false)`.

use super::keys::{KeyPair, PublicKey, Signature};
use crate::config::{HASH_LENGTH, SIGNATURE_LENGTH};
use crate::error::SignatureFormatError;

/// Sign a 32-byte digest.
pub fn sign(key_pair: &KeyPair, digest: &[u8; HASH_LENGTH]) -> Signature {
    key_pair.sign(digest)
}

/// Verify a typed signature over arbitrary message bytes.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}

/// Parse a hex signature, rejecting anything that is not exactly 128 hex
/// characters.
///
/// The length check runs first, so a short string containing junk reports
/// the length problem.
pub fn parse_signature_hex(signature_hex: &str) -> Result<Signature, SignatureFormatError> {
    if signature_hex.len() != SIGNATURE_LENGTH * 2 {
        return Err(SignatureFormatError::InvalidSignatureLength {
            actual: signature_hex.len(),
        });
    }
    if !signature_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SignatureFormatError::InvalidSignatureEncoding);
    }
    let mut bytes = [0u8; SIGNATURE_LENGTH];
    hex::decode_to_slice(signature_hex, &mut bytes)
        .map_err(|_| SignatureFormatError::InvalidSignatureEncoding)?;
    Ok(Signature::from_bytes(bytes))
}

/// Verify a hex-encoded signature over `message`.
///
/// # Example
///
/// ```
/// use nem2_protocol::crypto::{verify_hex, KeyPair};
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(&[1u8; 32]);
/// assert_eq!(verify_hex(&kp.public_key(), &[1u8; 32], &sig.to_hex()), Ok(true));
/// assert!(verify_hex(&kp.public_key(), &[1u8; 32], "abc").is_err());
/// ```
pub fn verify_hex(
    public_key: &PublicKey,
    message: &[u8],
    signature_hex: &str,
) -> Result<bool, SignatureFormatError> {
    let signature = parse_signature_hex(signature_hex)?;
    Ok(public_key.verify(message, &signature))
}
