//! Transaction signing and cosigning.
//!
//! Signing is a separate step from building because the account may not be
//! at hand when the transaction is assembled. The flow:
//!
//! 1. [`serialize`](super::encoding::serialize) the transaction with blank
//!    signature and signer fields.
//! 2. Hash the signed region (`payload[100..end]`) with SHA3-256.
//! 3. Sign that digest with the account's key pair.
//! 4. Splice signature and signer into the header and derive the
//!    transaction hash.
//!
//! Cosigning is simpler: a cosigner signs the aggregate's hash as is and
//! never re-encodes anything.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::Transaction;
use super::encoding::serialize;
use super::types::{TransactionHash, TransactionType};
use crate::account::Account;
use crate::config::{NetworkType, COSIGNATURE_VERSION};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{ConstructionError, EncodingError, Error};

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A finished, signed payload ready for announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    #[serde(with = "crate::crypto::hex_serde::vec")]
    pub payload: Vec<u8>,
    pub hash: TransactionHash,
    pub signer: PublicKey,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub network_type: NetworkType,
}

impl SignedTransaction {
    /// Uppercase hex payload, the form the announce endpoint takes.
    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.payload)
    }
}

/// Sign `tx` as `account`.
///
/// # Errors
///
/// Any [`EncodingError`] raised while encoding `tx`.
pub fn sign_transaction(tx: &Transaction, account: &Account) -> Result<SignedTransaction, EncodingError> {
    let unsigned = serialize(tx)?;
    let signature = account.sign_digest(&unsigned.signing_digest());
    let (payload, hash) = unsigned.into_signed(account.public_key(), &signature);
    let signed = SignedTransaction {
        payload,
        hash: TransactionHash::from_bytes(hash),
        signer: *account.public_key(),
        transaction_type: tx.transaction_type(),
        network_type: tx.network_type(),
    };
    debug!(
        hash = %signed.hash,
        tx_type = %signed.transaction_type,
        size = signed.payload.len(),
        signer = %signed.signer,
        "signed transaction"
    );
    Ok(signed)
}

/// Sign an aggregate as `initiator` and append a cosignature from each of
/// `cosignatories`, in order.
///
/// # Errors
///
/// - [`ConstructionError::NotAnAggregate`] if `tx` is not an aggregate.
/// - [`EncodingError::PayloadTooLarge`] if the cosignatures push the payload
///   over the network maximum.
pub fn sign_transaction_with_cosignatories(
    tx: &Transaction,
    initiator: &Account,
    cosignatories: &[&Account],
) -> Result<SignedTransaction, Error> {
    let tx_type = tx.transaction_type();
    if !tx_type.is_aggregate() {
        return Err(ConstructionError::NotAnAggregate {
            type_code: tx_type.code(),
        }
        .into());
    }

    let mut unsigned = serialize(tx)?;
    let signature = initiator.sign_digest(&unsigned.signing_digest());
    // The hash only covers the signed region, so it can be taken before the
    // cosignatures are appended.
    let (_, hash) = unsigned.clone().into_signed(initiator.public_key(), &signature);
    for cosignatory in cosignatories {
        let cosignature = cosignatory.sign_digest(&hash);
        unsigned.push_cosignature(cosignatory.public_key(), &cosignature)?;
    }
    let (payload, hash) = unsigned.into_signed(initiator.public_key(), &signature);

    let signed = SignedTransaction {
        payload,
        hash: TransactionHash::from_bytes(hash),
        signer: *initiator.public_key(),
        transaction_type: tx_type,
        network_type: tx.network_type(),
    };
    debug!(
        hash = %signed.hash,
        tx_type = %tx_type,
        size = signed.payload.len(),
        cosignatures = cosignatories.len(),
        "signed aggregate with cosignatories"
    );
    Ok(signed)
}

// ---------------------------------------------------------------------------
// Cosignatures
// ---------------------------------------------------------------------------

/// Request to cosign an announced aggregate, identified by its hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureTransaction {
    pub transaction_to_cosign: TransactionHash,
}

impl CosignatureTransaction {
    /// Cosign a signed aggregate.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::NotAnAggregate`] for any other transaction type.
    pub fn from_signed(signed: &SignedTransaction) -> Result<Self, ConstructionError> {
        if !signed.transaction_type.is_aggregate() {
            return Err(ConstructionError::NotAnAggregate {
                type_code: signed.transaction_type.code(),
            });
        }
        Ok(Self::from_hash(signed.hash))
    }

    /// Cosign an aggregate known only by hash, e.g. one reported by a
    /// listener.
    pub fn from_hash(hash: TransactionHash) -> Self {
        Self {
            transaction_to_cosign: hash,
        }
    }

    pub fn sign_with(&self, account: &Account) -> CosignatureSignedTransaction {
        cosign(self, account)
    }
}

/// A detached cosignature, announced separately from the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    pub version: u8,
    pub signer: PublicKey,
    pub signature: Signature,
    pub parent_hash: TransactionHash,
}

/// Sign the referenced aggregate hash as `account`.
pub fn cosign(cosignature: &CosignatureTransaction, account: &Account) -> CosignatureSignedTransaction {
    let parent_hash = cosignature.transaction_to_cosign;
    let signature = account.sign_digest(parent_hash.as_bytes());
    debug!(parent_hash = %parent_hash, signer = %account.public_key(), "cosigned aggregate");
    CosignatureSignedTransaction {
        version: COSIGNATURE_VERSION,
        signer: *account.public_key(),
        signature,
        parent_hash,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
