//! # Transaction Module
//!
//! Construction, canonical encoding, signing and cosigning of catapult
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — Type codes, body discriminants, TransactionHash
//! deadline.rs     — Network-epoch deadlines
//! message.rs      — Plain transfer messages
//! builder.rs      — Transaction envelope, bodies and factories
//! encoding.rs     — Canonical byte layout, header decoding
//! signing.rs      — Signing, aggregate cosignatories, detached cosignatures
//! verification.rs — End-to-end checks of signed artifacts
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — a factory such as [`Transaction::transfer`] returns an
//!    unsigned value.
//! 2. **Sign** — [`sign_transaction`] encodes it, signs the digest and
//!    returns a [`SignedTransaction`] with payload and hash.
//! 3. **Announce** — the payload goes to the transport; the hash is the key
//!    to watch for confirmation.
//! 4. **Cosign** — for bonded aggregates, other signers turn the hash into a
//!    [`CosignatureTransaction`] and sign it.

pub mod builder;
pub mod deadline;
pub mod encoding;
pub mod message;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{
    AggregateBody, AggregateTransactionCosignature, InnerTransaction,
    MultisigCosignatoryModification, NamespaceRegistration, Transaction, TransactionBody,
};
pub use deadline::Deadline;
pub use encoding::{serialize, TransactionHeader, UnsignedPayload};
pub use message::PlainMessage;
pub use signing::{
    cosign, sign_transaction, sign_transaction_with_cosignatories, CosignatureSignedTransaction,
    CosignatureTransaction, SignedTransaction,
};
pub use types::{
    MosaicSupplyType, MultisigCosignatoryModificationType, NamespaceType, TransactionHash,
    TransactionType,
};
pub use verification::{verify_cosignature, verify_signed_transaction, VerificationError};
