//! Error types shared across the crate.
//!
//! Failures are split by the stage that produces them: building a
//! transaction value, encoding it, checking the shape of a signature handed
//! in for verification, and handling key material. [`Error`] wraps all of
//! them for callers that drive the whole sign pipeline.
//!
//! None of these carry key bytes. A private key never ends up in an error
//! message, even partially.

use thiserror::Error;

/// Invalid field at transaction or value construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A namespace or mosaic name violates the naming rules.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// A quantity that must be strictly positive was zero.
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    /// A value cannot be represented as an unsigned 64-bit quantity without
    /// losing precision.
    #[error("value {value} is out of range: {reason}")]
    OutOfRange { value: String, reason: &'static str },

    /// Hex text could not be decoded into the expected number of bytes.
    #[error("invalid hex for {field}: {reason}")]
    InvalidHex {
        field: &'static str,
        reason: String,
    },

    /// An address string failed base32, length, network or checksum checks.
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress {
        address: String,
        reason: &'static str,
    },

    /// A deadline outside the accepted window.
    #[error("deadline must be in the future and less than {max_hours} hours ahead")]
    InvalidDeadline { max_hours: i64 },

    /// A mosaic divisibility above the network maximum.
    #[error("divisibility {divisibility} exceeds maximum {max}")]
    InvalidDivisibility { divisibility: u8, max: u8 },

    /// A cosignature was requested for something other than an aggregate.
    #[error("transaction type {type_code:#06x} is not an aggregate")]
    NotAnAggregate { type_code: u16 },
}

/// Failure while producing (or parsing) the canonical byte layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The assembled payload exceeds the network's maximum transaction size,
    /// or a length-prefixed field is larger than its prefix can express.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A transaction kind the encoder does not know how to place here.
    #[error("unsupported transaction variant {type_code:#06x}")]
    UnsupportedVariant { type_code: u16 },

    /// A counted list longer than its count field allows.
    #[error("too many {field}: {count} (max {max})")]
    TooManyEntries {
        field: &'static str,
        count: usize,
        max: usize,
    },

    /// Input ended before a complete structure could be read.
    #[error("truncated payload: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The network byte does not name a known network.
    #[error("unknown network identifier {0:#04x}")]
    UnknownNetwork(u8),
}

/// Shape problems with a signature supplied for verification. Raised before
/// any cryptographic work happens; never raised while signing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFormatError {
    #[error("Signature length is incorrect: expected 128 hex characters, got {actual}")]
    InvalidSignatureLength { actual: usize },

    #[error("Signature must be hexadecimal only")]
    InvalidSignatureEncoding,
}

/// Key material could not be used. Treated as fatal; retrying with the same
/// input will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid private key: expected 32 bytes of hex")]
    InvalidPrivateKey,

    #[error("invalid public key: expected 32 bytes of hex")]
    InvalidPublicKey,

    #[error("public key is not a valid curve point")]
    InvalidCurvePoint,
}

/// Any failure from the build, encode and sign pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    SignatureFormat(#[from] SignatureFormatError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
