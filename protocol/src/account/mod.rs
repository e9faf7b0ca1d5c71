//! # Accounts
//!
//! An [`Account`] is a key pair bound to a network: it owns the private key
//! and exposes the derived public key and address. A [`PublicAccount`] is the
//! shareable half, enough to address transfers, name embedded signers and
//! verify signatures.
//!
//! Accounts are the only values in the crate that can sign. They sign
//! digests produced by the encoder (transactions) or fixed aggregate hashes
//! (cosignatures), never free-form input.

pub mod address;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use address::Address;

use crate::config::NetworkType;
use crate::crypto::keys::{KeyPair, PublicKey, Signature};
use crate::crypto::signatures::verify_hex;
use crate::error::{CryptoError, EncodingError, Error, SignatureFormatError};
use crate::transaction::signing::{
    cosign, sign_transaction, sign_transaction_with_cosignatories, CosignatureSignedTransaction,
    CosignatureTransaction, SignedTransaction,
};
use crate::transaction::Transaction;

// ---------------------------------------------------------------------------
// PublicAccount
// ---------------------------------------------------------------------------

/// Public key plus derived address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAccount {
    public_key: PublicKey,
    address: Address,
}

impl PublicAccount {
    /// Build from a 64-character hex public key.
    ///
    /// # Example
    ///
    /// ```
    /// use nem2_protocol::{NetworkType, PublicAccount};
    ///
    /// let account = PublicAccount::create_from_public_key(
    ///     "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf",
    ///     NetworkType::MijinTest,
    /// )
    /// .unwrap();
    /// assert_eq!(account.address().plain(), "SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP");
    /// ```
    pub fn create_from_public_key(
        public_key_hex: &str,
        network_type: NetworkType,
    ) -> Result<Self, CryptoError> {
        Ok(Self::new(PublicKey::from_hex(public_key_hex)?, network_type))
    }

    pub fn new(public_key: PublicKey, network_type: NetworkType) -> Self {
        Self {
            public_key,
            address: Address::from_public_key(&public_key, network_type),
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }

    /// Verify a hex signature over `data`.
    ///
    /// Format problems are errors; a well-formed signature that does not
    /// match is `Ok(false)`.
    pub fn verify_signature(&self, data: &[u8], signature_hex: &str) -> Result<bool, SignatureFormatError> {
        verify_hex(&self.public_key, data, signature_hex)
    }

    /// Verify a typed signature over `data`.
    pub fn verify(&self, data: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(data, signature)
    }
}

impl fmt::Debug for PublicAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicAccount({}, {})", self.address, self.public_key)
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A key pair bound to a network.
///
/// Not `Serialize`, not `Display`. Drop it once signing is done; the seed is
/// wiped when the key pair is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    key_pair: KeyPair,
    public_account: PublicAccount,
}

impl Account {
    /// Fresh random account.
    pub fn generate(network_type: NetworkType) -> Self {
        Self::from_key_pair(KeyPair::generate(), network_type)
    }

    /// Load an account from a 64-character hex private key.
    pub fn create_from_private_key(
        private_key_hex: &str,
        network_type: NetworkType,
    ) -> Result<Self, CryptoError> {
        Ok(Self::from_key_pair(
            KeyPair::from_private_key_hex(private_key_hex)?,
            network_type,
        ))
    }

    pub fn from_key_pair(key_pair: KeyPair, network_type: NetworkType) -> Self {
        let public_account = PublicAccount::new(key_pair.public_key(), network_type);
        Self {
            key_pair,
            public_account,
        }
    }

    pub fn public_account(&self) -> &PublicAccount {
        &self.public_account
    }

    pub fn public_key(&self) -> &PublicKey {
        self.public_account.public_key()
    }

    pub fn address(&self) -> &Address {
        self.public_account.address()
    }

    pub fn network_type(&self) -> NetworkType {
        self.public_account.network_type()
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Explicit export of the private key as uppercase hex.
    pub fn private_key_hex(&self) -> String {
        self.key_pair.private_key_hex()
    }

    /// Sign a 32-byte digest.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Signature {
        self.key_pair.sign(digest)
    }

    /// Encode and sign `transaction`.
    pub fn sign(&self, transaction: &Transaction) -> Result<SignedTransaction, EncodingError> {
        sign_transaction(transaction, self)
    }

    /// Sign an aggregate as initiator and append cosignatures from
    /// `cosignatories` in one step.
    pub fn sign_with_cosignatories(
        &self,
        transaction: &Transaction,
        cosignatories: &[&Account],
    ) -> Result<SignedTransaction, Error> {
        sign_transaction_with_cosignatories(transaction, self, cosignatories)
    }

    /// Attest to an announced aggregate's hash.
    pub fn sign_cosignature_transaction(
        &self,
        cosignature: &CosignatureTransaction,
    ) -> CosignatureSignedTransaction {
        cosign(cosignature, self)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self.public_account.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "575dbb3062267eff57c970a336ebbc8fbcfe12c5bd3ed7bc11eb0481d7704ced";

    #[test]
    fn account_from_private_key() {
        let account = Account::create_from_private_key(PRIVATE_KEY, NetworkType::MijinTest).unwrap();
        assert_eq!(
            account.public_key().to_hex(),
            "BD8D3F8B7E1B3839C650F458234AB1FF87CDB1EDA36338D9E446E27D454717F2"
        );
        assert_eq!(account.address().plain(), "SDIPRQMB3HT7A6ZKV7HOHJQM7JHX6H3FN5EIRD3D");
        assert_eq!(account.network_type(), NetworkType::MijinTest);
    }

    #[test]
    fn public_account_from_public_key() {
        let account = PublicAccount::create_from_public_key(
            "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf",
            NetworkType::PublicTest,
        )
        .unwrap();
        assert_eq!(
            account.public_key().to_hex(),
            "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF"
        );
        assert!(account.address().plain().starts_with('T'));
    }

    #[test]
    fn rejects_malformed_public_key() {
        assert_eq!(
            PublicAccount::create_from_public_key("xyz", NetworkType::MijinTest).unwrap_err(),
            CryptoError::InvalidPublicKey
        );
    }

    #[test]
    fn verify_signature_accepts_account_signature() {
        let account = Account::generate(NetworkType::Mijin);
        let digest = [0x11; 32];
        let sig = account.sign_digest(&digest);
        let public = account.public_account();
        assert_eq!(public.verify_signature(&digest, &sig.to_hex()), Ok(true));
        assert!(public.verify(&digest, &sig));
        assert_eq!(public.verify_signature(&[0x12; 32], &sig.to_hex()), Ok(false));
    }

    #[test]
    fn debug_hides_private_key() {
        let account = Account::create_from_private_key(PRIVATE_KEY, NetworkType::MijinTest).unwrap();
        let debug = format!("{:?}", account);
        assert!(!debug.to_lowercase().contains(PRIVATE_KEY));
        assert!(debug.contains("SDIPRQMB3HT7A6ZKV7HOHJQM7JHX6H3FN5EIRD3D"));
    }
}
