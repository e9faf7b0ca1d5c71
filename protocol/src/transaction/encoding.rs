//! Canonical binary encoding.
//!
//! Every payload starts with the same 120-byte header:
//!
//! ```text
//! offset  size  field
//!      0     4  size (whole payload, u32 LE)
//!      4    64  signature           zeroed until signed
//!     68    32  signer public key   zeroed until signed
//!    100     1  version
//!    101     1  network
//!    102     2  type (u16 LE)
//!    104     8  fee (u64 LE)
//!    112     8  deadline (u64 LE)
//!    120     -  body
//! ```
//!
//! Inside an aggregate, each inner transaction is written as an embedded
//! block (`size ‖ signer ‖ version ‖ network ‖ type ‖ body`, no signature,
//! fee or deadline) and zero-padded to the network alignment. Cosignatures
//! collected so far follow the blocks.
//!
//! The signed region is `payload[100..end]`, where `end` is the end of the
//! body. For aggregates that excludes the trailing cosignatures, so adding a
//! cosignature never changes the aggregate hash.

use tracing::trace;

use super::builder::{
    AggregateBody, InnerTransaction, ModifyMultisigAccountBody, MosaicDefinitionBody,
    MosaicSupplyChangeBody, NamespaceRegistration, RegisterNamespaceBody, Transaction,
    TransactionBody, TransferBody,
};
use super::types::TransactionType;
use crate::config::{
    NetworkProfile, NetworkType, ADDRESS_DECODED_SIZE, COSIGNATURE_SIZE, HASH_LENGTH, HEADER_SIZE,
    PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, SIGNATURE_OFFSET, SIGNER_OFFSET, SIZE_FIELD_LENGTH,
    VERSION_OFFSET,
};
use crate::crypto::hash::{sha3_256, sha3_256_multi};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::EncodingError;
use crate::uint64::UInt64;

/// Optional-property id of a mosaic duration.
const MOSAIC_PROPERTY_DURATION: u8 = 2;

/// Mosaic id plus amount.
const MOSAIC_ENTRY_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Little-endian append-only buffer.
#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn uint64(&mut self, value: UInt64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn zeros(&mut self, count: usize) {
        self.buf.resize(self.buf.len() + count, 0);
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

fn count_u8(field: &'static str, count: usize) -> Result<u8, EncodingError> {
    u8::try_from(count).map_err(|_| EncodingError::TooManyEntries {
        field,
        count,
        max: u8::MAX as usize,
    })
}

fn size_u32(size: usize, max: usize) -> Result<u32, EncodingError> {
    if size > max {
        return Err(EncodingError::PayloadTooLarge { size, max });
    }
    u32::try_from(size).map_err(|_| EncodingError::PayloadTooLarge { size, max })
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

fn write_body(
    w: &mut Writer,
    body: &TransactionBody,
    profile: &NetworkProfile,
) -> Result<(), EncodingError> {
    match body {
        TransactionBody::Transfer(b) => write_transfer(w, b, profile),
        TransactionBody::RegisterNamespace(b) => write_register_namespace(w, b),
        TransactionBody::MosaicDefinition(b) => write_mosaic_definition(w, b),
        TransactionBody::MosaicSupplyChange(b) => {
            write_mosaic_supply_change(w, b);
            Ok(())
        }
        TransactionBody::ModifyMultisigAccount(b) => write_modify_multisig(w, b),
        TransactionBody::AggregateComplete(b) | TransactionBody::AggregateBonded(b) => {
            write_aggregate(w, b, profile)
        }
    }
}

fn write_transfer(
    w: &mut Writer,
    body: &TransferBody,
    profile: &NetworkProfile,
) -> Result<(), EncodingError> {
    // recipient ‖ message size ‖ mosaic count ‖ message ‖ mosaics
    let body_size = ADDRESS_DECODED_SIZE
        + 2
        + 1
        + body.message.encoded_len()
        + MOSAIC_ENTRY_SIZE * body.mosaics.len();
    if HEADER_SIZE + body_size > profile.max_transaction_size {
        return Err(EncodingError::PayloadTooLarge {
            size: HEADER_SIZE + body_size,
            max: profile.max_transaction_size,
        });
    }

    let message_size = body.message.encoded_len();
    let message_size = u16::try_from(message_size).map_err(|_| EncodingError::PayloadTooLarge {
        size: message_size,
        max: u16::MAX as usize,
    })?;
    w.bytes(body.recipient.as_bytes());
    w.u16(message_size);
    w.u8(count_u8("mosaics", body.mosaics.len())?);
    w.u8(body.message.message_type());
    w.bytes(body.message.payload());
    for mosaic in &body.mosaics {
        w.uint64(mosaic.id.id());
        w.uint64(mosaic.amount);
    }
    Ok(())
}

fn write_name(w: &mut Writer, name: &str) -> Result<(), EncodingError> {
    let len = u8::try_from(name.len()).map_err(|_| EncodingError::PayloadTooLarge {
        size: name.len(),
        max: u8::MAX as usize,
    })?;
    w.u8(len);
    w.bytes(name.as_bytes());
    Ok(())
}

fn write_register_namespace(
    w: &mut Writer,
    body: &RegisterNamespaceBody,
) -> Result<(), EncodingError> {
    w.u8(body.namespace_type().id());
    match body.registration {
        NamespaceRegistration::Root { duration } => w.uint64(duration),
        NamespaceRegistration::Sub { parent_id } => w.uint64(parent_id.id()),
    }
    w.uint64(body.namespace_id.id());
    write_name(w, &body.namespace_name)
}

fn write_mosaic_definition(
    w: &mut Writer,
    body: &MosaicDefinitionBody,
) -> Result<(), EncodingError> {
    let props = &body.properties;
    w.uint64(body.parent_id.id());
    w.uint64(body.mosaic_id.id());
    let name_len = u8::try_from(body.mosaic_name.len()).map_err(|_| {
        EncodingError::PayloadTooLarge {
            size: body.mosaic_name.len(),
            max: u8::MAX as usize,
        }
    })?;
    w.u8(name_len);
    w.u8(u8::from(props.duration.is_some()));
    w.u8(props.flags());
    w.u8(props.divisibility());
    w.bytes(body.mosaic_name.as_bytes());
    if let Some(duration) = props.duration {
        w.u8(MOSAIC_PROPERTY_DURATION);
        w.uint64(duration);
    }
    Ok(())
}

fn write_mosaic_supply_change(w: &mut Writer, body: &MosaicSupplyChangeBody) {
    w.uint64(body.mosaic_id.id());
    w.u8(body.direction.id());
    w.uint64(body.delta);
}

fn write_modify_multisig(
    w: &mut Writer,
    body: &ModifyMultisigAccountBody,
) -> Result<(), EncodingError> {
    w.i8(body.min_removal_delta);
    w.i8(body.min_approval_delta);
    w.u8(count_u8("modifications", body.modifications.len())?);
    for modification in &body.modifications {
        w.u8(modification.modification_type.id());
        w.bytes(modification.cosignatory.public_key().as_bytes());
    }
    Ok(())
}

/// Embedded block for one inner transaction, padded to the alignment.
fn write_embedded(
    w: &mut Writer,
    inner: &InnerTransaction,
    profile: &NetworkProfile,
) -> Result<(), EncodingError> {
    let tx = &inner.transaction;
    let tx_type = tx.transaction_type();
    if tx_type.is_aggregate() {
        return Err(EncodingError::UnsupportedVariant {
            type_code: tx_type.code(),
        });
    }

    let mut block = Writer::default();
    block.zeros(SIZE_FIELD_LENGTH);
    block.bytes(inner.signer.public_key().as_bytes());
    block.u8(tx.version());
    block.u8(tx.network_type().id());
    block.u16(tx_type.code());
    write_body(&mut block, tx.body(), profile)?;

    let mut block = block.into_inner();
    let size = size_u32(block.len(), profile.max_transaction_size)?;
    block[..SIZE_FIELD_LENGTH].copy_from_slice(&size.to_le_bytes());

    let padding = (profile.aggregate_alignment - block.len() % profile.aggregate_alignment)
        % profile.aggregate_alignment;
    w.bytes(&block);
    w.zeros(padding);
    Ok(())
}

fn write_aggregate(
    w: &mut Writer,
    body: &AggregateBody,
    profile: &NetworkProfile,
) -> Result<(), EncodingError> {
    let mut blocks = Writer::default();
    for inner in &body.inner_transactions {
        write_embedded(&mut blocks, inner, profile)?;
    }
    w.u32(size_u32(blocks.len(), profile.max_transaction_size)?);
    w.bytes(&blocks.into_inner());
    Ok(())
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// An encoded transaction with blank signature and signer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedPayload {
    bytes: Vec<u8>,
    signed_end: usize,
    max_size: usize,
}

impl UnsignedPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes covered by the signature: version through end of body.
    pub fn signing_bytes(&self) -> &[u8] {
        &self.bytes[VERSION_OFFSET..self.signed_end]
    }

    /// What the signer actually signs.
    pub fn signing_digest(&self) -> [u8; HASH_LENGTH] {
        sha3_256(self.signing_bytes())
    }

    /// Splice in the signer and signature. Returns the signed payload and
    /// its hash.
    pub fn into_signed(
        mut self,
        signer: &PublicKey,
        signature: &Signature,
    ) -> (Vec<u8>, [u8; HASH_LENGTH]) {
        self.bytes[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(signature.as_bytes());
        self.bytes[SIGNER_OFFSET..VERSION_OFFSET].copy_from_slice(signer.as_bytes());
        let hash = transaction_hash(&self.bytes, self.signed_end);
        (self.bytes, hash)
    }

    /// Append one cosignature and rewrite the size field.
    pub fn push_cosignature(
        &mut self,
        signer: &PublicKey,
        signature: &Signature,
    ) -> Result<(), EncodingError> {
        let new_len = self.bytes.len() + COSIGNATURE_SIZE;
        let size = size_u32(new_len, self.max_size)?;
        self.bytes.extend_from_slice(signer.as_bytes());
        self.bytes.extend_from_slice(signature.as_bytes());
        self.bytes[..SIZE_FIELD_LENGTH].copy_from_slice(&size.to_le_bytes());
        Ok(())
    }
}

/// Encode `tx` into its canonical unsigned payload.
///
/// # Errors
///
/// - [`EncodingError::PayloadTooLarge`] if the payload exceeds the network
///   maximum or a length field overflows.
/// - [`EncodingError::TooManyEntries`] if a counted list does not fit its
///   count byte.
/// - [`EncodingError::UnsupportedVariant`] for an aggregate nested inside an
///   aggregate.
pub fn serialize(tx: &Transaction) -> Result<UnsignedPayload, EncodingError> {
    let profile = tx.network_type().profile();
    let tx_type = tx.transaction_type();

    let mut w = Writer::with_capacity(HEADER_SIZE + 64);
    w.zeros(SIZE_FIELD_LENGTH + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH);
    w.u8(tx.version());
    w.u8(tx.network_type().id());
    w.u16(tx_type.code());
    w.uint64(tx.fee());
    w.uint64(tx.deadline().to_uint64());
    write_body(&mut w, tx.body(), &profile)?;
    let signed_end = w.len();

    if let Some(aggregate) = tx.aggregate_body() {
        for cosignature in &aggregate.cosignatures {
            w.bytes(cosignature.signer.public_key().as_bytes());
            w.bytes(cosignature.signature.as_bytes());
        }
    }

    let mut bytes = w.into_inner();
    let size = size_u32(bytes.len(), profile.max_transaction_size)?;
    bytes[..SIZE_FIELD_LENGTH].copy_from_slice(&size.to_le_bytes());
    trace!(tx_type = %tx_type, size, "encoded transaction");

    Ok(UnsignedPayload {
        bytes,
        signed_end,
        max_size: profile.max_transaction_size,
    })
}

/// `SHA3-256(signature.R ‖ signer ‖ payload[100..signed_end])`.
fn transaction_hash(payload: &[u8], signed_end: usize) -> [u8; HASH_LENGTH] {
    sha3_256_multi(&[
        &payload[SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE_LENGTH / 2],
        &payload[SIGNER_OFFSET..VERSION_OFFSET],
        &payload[VERSION_OFFSET..signed_end],
    ])
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// The common header of an encoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionHeader {
    pub size: u32,
    pub signature: Signature,
    pub signer: PublicKey,
    pub version: u8,
    pub network_type: NetworkType,
    pub transaction_type: TransactionType,
    pub fee: UInt64,
    pub deadline: UInt64,
}

fn read_array<const N: usize>(payload: &[u8], offset: usize) -> Result<[u8; N], EncodingError> {
    payload
        .get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(EncodingError::Truncated {
            expected: offset + N,
            actual: payload.len(),
        })
}

impl TransactionHeader {
    /// Parse the first 120 bytes of `payload`.
    pub fn decode(payload: &[u8]) -> Result<Self, EncodingError> {
        if payload.len() < HEADER_SIZE {
            return Err(EncodingError::Truncated {
                expected: HEADER_SIZE,
                actual: payload.len(),
            });
        }
        let size = u32::from_le_bytes(read_array(payload, 0)?);
        let signature = Signature::from_bytes(read_array(payload, SIGNATURE_OFFSET)?);
        let signer = PublicKey::from_bytes(read_array(payload, SIGNER_OFFSET)?);
        let version = payload[VERSION_OFFSET];
        let network_type = NetworkType::try_from(payload[VERSION_OFFSET + 1])?;
        let transaction_type =
            TransactionType::try_from(u16::from_le_bytes(read_array(payload, VERSION_OFFSET + 2)?))?;
        let fee = UInt64::from_le_bytes(read_array(payload, VERSION_OFFSET + 4)?);
        let deadline = UInt64::from_le_bytes(read_array(payload, VERSION_OFFSET + 12)?);
        Ok(Self {
            size,
            signature,
            signer,
            version,
            network_type,
            transaction_type,
            fee,
            deadline,
        })
    }
}

/// End of the signed region of an encoded payload: the whole payload for
/// plain transactions, the end of the inner blocks for aggregates.
pub fn signed_region_end(payload: &[u8]) -> Result<usize, EncodingError> {
    let header = TransactionHeader::decode(payload)?;
    if !header.transaction_type.is_aggregate() {
        return Ok(payload.len());
    }
    let blocks = u32::from_le_bytes(read_array(payload, HEADER_SIZE)?) as usize;
    let end = HEADER_SIZE + SIZE_FIELD_LENGTH + blocks;
    if end > payload.len() {
        return Err(EncodingError::Truncated {
            expected: end,
            actual: payload.len(),
        });
    }
    Ok(end)
}

/// Hash of a signed payload, recomputed from its bytes.
pub fn payload_hash(payload: &[u8]) -> Result<[u8; HASH_LENGTH], EncodingError> {
    let end = signed_region_end(payload)?;
    Ok(transaction_hash(payload, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
