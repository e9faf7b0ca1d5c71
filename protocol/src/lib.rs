// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NEM2 Protocol — Client Core
//!
//! Builds, canonically encodes, signs and cosigns catapult transactions, and
//! hands back an opaque payload plus its hash for a transport to announce.
//! No network I/O happens here; every call is a pure function of its inputs.
//!
//! ## Architecture
//!
//! Leaf modules first:
//!
//! - **uint64** — 64-bit quantities as (lower, higher) word pairs.
//! - **config** — Network bytes, wire offsets, limits. Every magic number.
//! - **crypto** — Ed25519 with SHA3-512, SHA3-256 and RIPEMD-160 helpers.
//! - **id** — Namespace and mosaic ids derived from names.
//! - **account** — Key pairs bound to a network, addresses.
//! - **mosaic** — Mosaic amounts, properties, the XEM helper.
//! - **transaction** — Transaction model, encoder, signer, cosigner.
//!
//! ## Quick start
//!
//! ```
//! use nem2_protocol::{
//!     Account, Deadline, MosaicId, MosaicSupplyType, NetworkType, Transaction, UInt64,
//! };
//!
//! let account = Account::generate(NetworkType::MijinTest);
//! let tx = Transaction::mosaic_supply_change(
//!     Deadline::default(),
//!     MosaicId::new(UInt64::new(2262289484, 3405110546)),
//!     MosaicSupplyType::Increase,
//!     UInt64::from_uint(10),
//!     NetworkType::MijinTest,
//! )
//! .unwrap();
//! let signed = account.sign(&tx).unwrap();
//! assert_eq!(signed.hash.to_hex().len(), 64);
//! ```
//!
//! ## Logging
//!
//! Signing and cosigning emit `tracing` events at `debug`, the encoder at
//! `trace`. The library never installs a subscriber. Keys never appear in
//! any event.

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod id;
pub mod mosaic;
pub mod transaction;
pub mod uint64;

pub use account::{Account, Address, PublicAccount};
pub use config::{NetworkProfile, NetworkType};
pub use crypto::{KeyPair, PublicKey, Signature};
pub use error::{ConstructionError, CryptoError, EncodingError, Error, SignatureFormatError};
pub use id::{MosaicId, NamespaceId};
pub use mosaic::{Mosaic, MosaicProperties, Xem};
pub use transaction::{
    CosignatureSignedTransaction, CosignatureTransaction, Deadline, MosaicSupplyType,
    MultisigCosignatoryModification, MultisigCosignatoryModificationType, NamespaceType,
    PlainMessage, SignedTransaction, Transaction, TransactionHash, TransactionType,
};
pub use uint64::UInt64;
