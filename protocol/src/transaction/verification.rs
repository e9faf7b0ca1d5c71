//! Verification of signed artifacts.
//!
//! [`verify_signed_transaction`] re-derives everything a signed payload
//! claims about itself from its bytes alone. The checks run from cheapest to
//! most expensive: structure, then the hash, then signatures.

use thiserror::Error;

use super::encoding::{payload_hash, signed_region_end, TransactionHeader};
use super::signing::{CosignatureSignedTransaction, SignedTransaction};
use super::types::TransactionHash;
use crate::config::{COSIGNATURE_SIZE, COSIGNATURE_VERSION, PUBLIC_KEY_LENGTH, VERSION_OFFSET};
use crate::crypto::hash::sha3_256;
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::EncodingError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a signed artifact was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The payload could not be parsed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The size field disagrees with the payload length.
    #[error("size field says {declared} bytes, payload has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    /// Header fields disagree with the metadata carried next to the payload.
    #[error("header {field} does not match the signed transaction")]
    HeaderMismatch { field: &'static str },

    /// The recomputed hash differs from the claimed one.
    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        expected: TransactionHash,
        actual: TransactionHash,
    },

    /// The initiator signature does not verify.
    #[error("invalid signature from {signer}")]
    InvalidSignature { signer: PublicKey },

    /// An appended or detached cosignature does not verify.
    #[error("invalid cosignature from {signer}")]
    InvalidCosignature { signer: PublicKey },

    /// The cosignature record has an unexpected version.
    #[error("unsupported cosignature version {0}")]
    UnsupportedCosignatureVersion(u8),
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Check a signed transaction end to end.
///
/// 1. The header parses and its size field matches the payload length.
/// 2. Signer, type and network in the header match the wrapper fields.
/// 3. The hash recomputed from the payload equals `signed.hash`.
/// 4. The initiator signature verifies over the signing digest.
/// 5. For aggregates, every appended cosignature verifies over the hash.
pub fn verify_signed_transaction(signed: &SignedTransaction) -> Result<(), VerificationError> {
    let payload = &signed.payload;
    let header = TransactionHeader::decode(payload)?;

    if header.size as usize != payload.len() {
        return Err(VerificationError::SizeMismatch {
            declared: header.size as usize,
            actual: payload.len(),
        });
    }
    if header.signer != signed.signer {
        return Err(VerificationError::HeaderMismatch { field: "signer" });
    }
    if header.transaction_type != signed.transaction_type {
        return Err(VerificationError::HeaderMismatch { field: "type" });
    }
    if header.network_type != signed.network_type {
        return Err(VerificationError::HeaderMismatch { field: "network" });
    }

    let hash = TransactionHash::from_bytes(payload_hash(payload)?);
    if hash != signed.hash {
        return Err(VerificationError::HashMismatch {
            expected: signed.hash,
            actual: hash,
        });
    }

    let end = signed_region_end(payload)?;
    let digest = sha3_256(&payload[VERSION_OFFSET..end]);
    if !header.signer.verify(&digest, &header.signature) {
        return Err(VerificationError::InvalidSignature {
            signer: header.signer,
        });
    }

    let trailing = &payload[end..];
    if trailing.len() % COSIGNATURE_SIZE != 0 {
        return Err(EncodingError::Truncated {
            expected: end + trailing.len().next_multiple_of(COSIGNATURE_SIZE),
            actual: payload.len(),
        }
        .into());
    }
    for record in trailing.chunks_exact(COSIGNATURE_SIZE) {
        let (key, sig) = record.split_at(PUBLIC_KEY_LENGTH);
        let signer = PublicKey::from_bytes(key.try_into().map_err(|_| truncated(record))?);
        let signature = Signature::from_bytes(sig.try_into().map_err(|_| truncated(record))?);
        if !signer.verify(hash.as_bytes(), &signature) {
            return Err(VerificationError::InvalidCosignature { signer });
        }
    }
    Ok(())
}

fn truncated(record: &[u8]) -> EncodingError {
    EncodingError::Truncated {
        expected: COSIGNATURE_SIZE,
        actual: record.len(),
    }
}

/// Check a detached cosignature against the hash it references.
pub fn verify_cosignature(cosignature: &CosignatureSignedTransaction) -> Result<(), VerificationError> {
    if cosignature.version != COSIGNATURE_VERSION {
        return Err(VerificationError::UnsupportedCosignatureVersion(
            cosignature.version,
        ));
    }
    if !cosignature
        .signer
        .verify(cosignature.parent_hash.as_bytes(), &cosignature.signature)
    {
        return Err(VerificationError::InvalidCosignature {
            signer: cosignature.signer,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;
    use crate::config::NetworkType;
    use crate::id::MosaicId;
    use crate::transaction::builder::Transaction;
    use crate::transaction::deadline::Deadline;
    use crate::transaction::signing::{
        sign_transaction, sign_transaction_with_cosignatories, CosignatureTransaction,
    };
    use crate::transaction::types::MosaicSupplyType;
    use crate::uint64::UInt64;

    fn supply_change() -> Transaction {
        Transaction::mosaic_supply_change(
            Deadline::from_network_millis(1),
            MosaicId::new(UInt64::new(2262289484, 3405110546)),
            MosaicSupplyType::Increase,
            UInt64::from_uint(10),
            NetworkType::MijinTest,
        )
        .unwrap()
    }

    fn bonded(initiator: &Account, other: &Account) -> Transaction {
        Transaction::aggregate_bonded(
            Deadline::from_network_millis(1),
            vec![
                supply_change().to_aggregate(*initiator.public_account()),
                supply_change().to_aggregate(*other.public_account()),
            ],
            NetworkType::MijinTest,
            vec![],
        )
    }

    #[test]
    fn valid_signed_transaction_passes() {
        let account = Account::generate(NetworkType::MijinTest);
        let signed = sign_transaction(&supply_change(), &account).unwrap();
        assert_eq!(verify_signed_transaction(&signed), Ok(()));
    }

    #[test]
    fn tampered_body_fails_hash() {
        let account = Account::generate(NetworkType::MijinTest);
        let mut signed = sign_transaction(&supply_change(), &account).unwrap();
        let last = signed.payload.len() - 1;
        signed.payload[last] ^= 0x01;
        assert!(matches!(
            verify_signed_transaction(&signed),
            Err(VerificationError::HashMismatch { .. })
        ));
    }

    #[test]
    fn forged_signature_fails() {
        let account = Account::generate(NetworkType::MijinTest);
        let mut signed = sign_transaction(&supply_change(), &account).unwrap();
        // S half of the signature is outside the hash input.
        signed.payload[40] ^= 0x01;
        assert_eq!(
            verify_signed_transaction(&signed),
            Err(VerificationError::InvalidSignature {
                signer: *account.public_key()
            })
        );
    }

    #[test]
    fn wrapper_mismatch_is_reported() {
        let account = Account::generate(NetworkType::MijinTest);
        let mut signed = sign_transaction(&supply_change(), &account).unwrap();
        signed.network_type = NetworkType::Mijin;
        assert_eq!(
            verify_signed_transaction(&signed),
            Err(VerificationError::HeaderMismatch { field: "network" })
        );
    }

    #[test]
    fn size_field_must_match() {
        let account = Account::generate(NetworkType::MijinTest);
        let mut signed = sign_transaction(&supply_change(), &account).unwrap();
        signed.payload.push(0);
        assert!(matches!(
            verify_signed_transaction(&signed),
            Err(VerificationError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn aggregate_with_cosignatures_passes() {
        let initiator = Account::generate(NetworkType::MijinTest);
        let cosigner = Account::generate(NetworkType::MijinTest);
        let signed =
            sign_transaction_with_cosignatories(&bonded(&initiator, &cosigner), &initiator, &[&cosigner])
                .unwrap();
        assert_eq!(verify_signed_transaction(&signed), Ok(()));
    }

    #[test]
    fn bad_appended_cosignature_fails() {
        let initiator = Account::generate(NetworkType::MijinTest);
        let cosigner = Account::generate(NetworkType::MijinTest);
        let mut signed =
            sign_transaction_with_cosignatories(&bonded(&initiator, &cosigner), &initiator, &[&cosigner])
                .unwrap();
        let last = signed.payload.len() - 1;
        signed.payload[last] ^= 0x01;
        assert_eq!(
            verify_signed_transaction(&signed),
            Err(VerificationError::InvalidCosignature {
                signer: *cosigner.public_key()
            })
        );
    }

    #[test]
    fn detached_cosignature() {
        let initiator = Account::generate(NetworkType::MijinTest);
        let cosigner = Account::generate(NetworkType::MijinTest);
        let signed = sign_transaction(&bonded(&initiator, &cosigner), &initiator).unwrap();
        let request = CosignatureTransaction::from_signed(&signed).unwrap();
        let mut cosignature = request.sign_with(&cosigner);
        assert_eq!(cosignature.parent_hash, signed.hash);
        assert_eq!(verify_cosignature(&cosignature), Ok(()));

        cosignature.signer = *initiator.public_key();
        assert!(matches!(
            verify_cosignature(&cosignature),
            Err(VerificationError::InvalidCosignature { .. })
        ));
    }
}
