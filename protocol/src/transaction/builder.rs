//! Transaction construction.
//!
//! A [`Transaction`] is the common envelope (network, version, deadline, fee)
//! around a [`TransactionBody`], one variant per transaction kind. Each kind
//! has a factory on `Transaction` that checks structural rules only: name
//! syntax, positive deltas, divisibility. Anything that depends on encoded
//! size is checked later by the encoder.
//!
//! Values are immutable once built: the envelope is read through accessors
//! and [`Transaction::with_fee`] and friends return a new value. The schema
//! version is not stored; it always follows the body's type.

use serde::{Deserialize, Serialize};

use super::deadline::Deadline;
use super::message::PlainMessage;
use super::types::{
    MosaicSupplyType, MultisigCosignatoryModificationType, NamespaceType, TransactionType,
};
use crate::account::{Address, PublicAccount};
use crate::config::NetworkType;
use crate::crypto::keys::Signature;
use crate::error::ConstructionError;
use crate::id::{derive_sub_id, validate_name_part, MosaicId, NamespaceId};
use crate::mosaic::{Mosaic, MosaicProperties};
use crate::uint64::UInt64;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    network_type: NetworkType,
    deadline: Deadline,
    fee: UInt64,
    body: TransactionBody,
}

/// Kind-specific part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionBody {
    Transfer(TransferBody),
    RegisterNamespace(RegisterNamespaceBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    ModifyMultisigAccount(ModifyMultisigAccountBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::RegisterNamespace(_) => TransactionType::RegisterNamespace,
            Self::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            Self::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            Self::ModifyMultisigAccount(_) => TransactionType::ModifyMultisigAccount,
            Self::AggregateComplete(_) => TransactionType::AggregateComplete,
            Self::AggregateBonded(_) => TransactionType::AggregateBonded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBody {
    pub recipient: Address,
    pub mosaics: Vec<Mosaic>,
    pub message: PlainMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNamespaceBody {
    pub namespace_name: String,
    pub namespace_id: NamespaceId,
    pub registration: NamespaceRegistration,
}

impl RegisterNamespaceBody {
    pub fn namespace_type(&self) -> NamespaceType {
        match self.registration {
            NamespaceRegistration::Root { .. } => NamespaceType::Root,
            NamespaceRegistration::Sub { .. } => NamespaceType::Sub,
        }
    }
}

/// Root registrations carry a duration in blocks, child registrations the
/// parent id. Exactly one of the two, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "namespaceType", rename_all = "camelCase")]
pub enum NamespaceRegistration {
    Root { duration: UInt64 },
    #[serde(rename_all = "camelCase")]
    Sub { parent_id: NamespaceId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicDefinitionBody {
    pub parent_id: NamespaceId,
    pub mosaic_id: MosaicId,
    pub mosaic_name: String,
    pub properties: MosaicProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyChangeBody {
    pub mosaic_id: MosaicId,
    pub direction: MosaicSupplyType,
    pub delta: UInt64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyMultisigAccountBody {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    pub modifications: Vec<MultisigCosignatoryModification>,
}

/// One add/remove entry of a multisig modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigCosignatoryModification {
    pub modification_type: MultisigCosignatoryModificationType,
    pub cosignatory: PublicAccount,
}

impl MultisigCosignatoryModification {
    pub fn new(
        modification_type: MultisigCosignatoryModificationType,
        cosignatory: PublicAccount,
    ) -> Self {
        Self {
            modification_type,
            cosignatory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBody {
    pub inner_transactions: Vec<InnerTransaction>,
    /// Cosignatures already collected, appended after the inner transactions.
    pub cosignatures: Vec<AggregateTransactionCosignature>,
}

/// A transaction bound to the account credited as its embedded signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerTransaction {
    pub signer: PublicAccount,
    pub transaction: Transaction,
}

/// A cosignature carried inside an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTransactionCosignature {
    pub signature: Signature,
    pub signer: PublicAccount,
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

impl Transaction {
    fn envelope(deadline: Deadline, body: TransactionBody, network_type: NetworkType) -> Self {
        Self {
            network_type,
            deadline,
            fee: UInt64::ZERO,
            body,
        }
    }

    /// Transfer `mosaics` and `message` to `recipient`. The mosaic list may
    /// be empty.
    pub fn transfer(
        deadline: Deadline,
        recipient: Address,
        mosaics: Vec<Mosaic>,
        message: PlainMessage,
        network_type: NetworkType,
    ) -> Self {
        Self::envelope(
            deadline,
            TransactionBody::Transfer(TransferBody {
                recipient,
                mosaics,
                message,
            }),
            network_type,
        )
    }

    /// Change the supply of `mosaic_id` by a strictly positive `delta`.
    pub fn mosaic_supply_change(
        deadline: Deadline,
        mosaic_id: MosaicId,
        direction: MosaicSupplyType,
        delta: UInt64,
        network_type: NetworkType,
    ) -> Result<Self, ConstructionError> {
        if delta.is_zero() {
            return Err(ConstructionError::NonPositive { field: "delta" });
        }
        Ok(Self::envelope(
            deadline,
            TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic_id,
                direction,
                delta,
            }),
            network_type,
        ))
    }

    /// Register root namespace `name` for `duration` blocks.
    pub fn register_root_namespace(
        deadline: Deadline,
        name: &str,
        duration: UInt64,
        network_type: NetworkType,
    ) -> Result<Self, ConstructionError> {
        validate_name_part(name)?;
        let namespace_id = NamespaceId::from_name(name)?;
        Ok(Self::envelope(
            deadline,
            TransactionBody::RegisterNamespace(RegisterNamespaceBody {
                namespace_name: name.to_string(),
                namespace_id,
                registration: NamespaceRegistration::Root { duration },
            }),
            network_type,
        ))
    }

    /// Register `name` as a child of `parent_id`.
    pub fn register_sub_namespace(
        deadline: Deadline,
        name: &str,
        parent_id: NamespaceId,
        network_type: NetworkType,
    ) -> Result<Self, ConstructionError> {
        validate_name_part(name)?;
        let namespace_id = NamespaceId::new(derive_sub_id(parent_id.id(), name));
        Ok(Self::envelope(
            deadline,
            TransactionBody::RegisterNamespace(RegisterNamespaceBody {
                namespace_name: name.to_string(),
                namespace_id,
                registration: NamespaceRegistration::Sub { parent_id },
            }),
            network_type,
        ))
    }

    /// Register `name` as a child of the namespace at dotted path
    /// `parent_name`.
    pub fn register_sub_namespace_by_name(
        deadline: Deadline,
        name: &str,
        parent_name: &str,
        network_type: NetworkType,
    ) -> Result<Self, ConstructionError> {
        let parent_id = NamespaceId::from_name(parent_name)?;
        Self::register_sub_namespace(deadline, name, parent_id, network_type)
    }

    /// Define mosaic `mosaic_name` under the namespace at `namespace_name`.
    pub fn mosaic_definition(
        deadline: Deadline,
        mosaic_name: &str,
        namespace_name: &str,
        properties: MosaicProperties,
        network_type: NetworkType,
    ) -> Result<Self, ConstructionError> {
        let parent_id = NamespaceId::from_name(namespace_name)?;
        let mosaic_id = MosaicId::from_namespace_and_name(parent_id, mosaic_name)?;
        Ok(Self::envelope(
            deadline,
            TransactionBody::MosaicDefinition(MosaicDefinitionBody {
                parent_id,
                mosaic_id,
                mosaic_name: mosaic_name.to_string(),
                properties,
            }),
            network_type,
        ))
    }

    /// Change multisig thresholds and cosignatories of the signing account.
    pub fn modify_multisig_account(
        deadline: Deadline,
        min_approval_delta: i8,
        min_removal_delta: i8,
        modifications: Vec<MultisigCosignatoryModification>,
        network_type: NetworkType,
    ) -> Self {
        Self::envelope(
            deadline,
            TransactionBody::ModifyMultisigAccount(ModifyMultisigAccountBody {
                min_approval_delta,
                min_removal_delta,
                modifications,
            }),
            network_type,
        )
    }

    /// Aggregate announced with every cosignature already attached.
    pub fn aggregate_complete(
        deadline: Deadline,
        inner_transactions: Vec<InnerTransaction>,
        network_type: NetworkType,
        cosignatures: Vec<AggregateTransactionCosignature>,
    ) -> Self {
        Self::envelope(
            deadline,
            TransactionBody::AggregateComplete(AggregateBody {
                inner_transactions,
                cosignatures,
            }),
            network_type,
        )
    }

    /// Aggregate whose missing cosignatures are collected after announcement.
    pub fn aggregate_bonded(
        deadline: Deadline,
        inner_transactions: Vec<InnerTransaction>,
        network_type: NetworkType,
        cosignatures: Vec<AggregateTransactionCosignature>,
    ) -> Self {
        Self::envelope(
            deadline,
            TransactionBody::AggregateBonded(AggregateBody {
                inner_transactions,
                cosignatures,
            }),
            network_type,
        )
    }

    // -- Accessors ----------------------------------------------------------

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// Schema version of the body, fixed by its type.
    pub fn version(&self) -> u8 {
        self.transaction_type().version()
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn fee(&self) -> UInt64 {
        self.fee
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    // -- Derived values -----------------------------------------------------

    /// Same transaction with a different fee.
    pub fn with_fee(self, fee: UInt64) -> Self {
        Self { fee, ..self }
    }

    /// Same transaction with a different deadline.
    pub fn with_deadline(self, deadline: Deadline) -> Self {
        Self { deadline, ..self }
    }

    /// Bind this transaction to `signer` for embedding in an aggregate.
    pub fn to_aggregate(self, signer: PublicAccount) -> InnerTransaction {
        InnerTransaction {
            signer,
            transaction: self,
        }
    }

    pub fn aggregate_body(&self) -> Option<&AggregateBody> {
        match &self.body {
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => {
                Some(body)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::derive_root_id;

    const PUBLIC_KEY: &str = "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf";

    fn signer() -> PublicAccount {
        PublicAccount::create_from_public_key(PUBLIC_KEY, NetworkType::MijinTest).unwrap()
    }

    #[test]
    fn factories_set_version_from_type() {
        let tx = Transaction::transfer(
            Deadline::default(),
            *signer().address(),
            vec![],
            PlainMessage::empty(),
            NetworkType::MijinTest,
        );
        assert_eq!(tx.version(), 3);
        assert_eq!(tx.transaction_type(), TransactionType::Transfer);
        assert_eq!(tx.fee(), UInt64::ZERO);

        let tx = Transaction::mosaic_supply_change(
            Deadline::default(),
            MosaicId::new(UInt64::new(1, 2)),
            MosaicSupplyType::Increase,
            UInt64::from_uint(10),
            NetworkType::MijinTest,
        )
        .unwrap();
        assert_eq!(tx.version(), 2);
    }

    #[test]
    fn supply_change_requires_positive_delta() {
        let err = Transaction::mosaic_supply_change(
            Deadline::default(),
            MosaicId::new(UInt64::new(1, 2)),
            MosaicSupplyType::Decrease,
            UInt64::ZERO,
            NetworkType::MijinTest,
        )
        .unwrap_err();
        assert_eq!(err, ConstructionError::NonPositive { field: "delta" });
    }

    #[test]
    fn root_namespace_derives_id() {
        let tx = Transaction::register_root_namespace(
            Deadline::default(),
            "root-test-namespace",
            UInt64::from_uint(1000),
            NetworkType::MijinTest,
        )
        .unwrap();
        let TransactionBody::RegisterNamespace(body) = tx.body() else {
            panic!("expected namespace body");
        };
        assert_eq!(body.namespace_type(), NamespaceType::Root);
        assert_eq!(body.namespace_id.id(), derive_root_id("root-test-namespace"));
        assert_eq!(
            body.registration,
            NamespaceRegistration::Root {
                duration: UInt64::from_uint(1000)
            }
        );
    }

    #[test]
    fn sub_namespace_carries_parent_only() {
        let parent_id = NamespaceId::from_name("parent-test-namespace").unwrap();
        let tx = Transaction::register_sub_namespace(
            Deadline::default(),
            "child",
            parent_id,
            NetworkType::MijinTest,
        )
        .unwrap();
        let TransactionBody::RegisterNamespace(body) = tx.body() else {
            panic!("expected namespace body");
        };
        assert_eq!(body.namespace_type(), NamespaceType::Sub);
        assert_eq!(body.registration, NamespaceRegistration::Sub { parent_id });
    }

    #[test]
    fn namespace_registration_json_has_one_arm() {
        let tx = Transaction::register_root_namespace(
            Deadline::from_network_millis(1),
            "abc",
            UInt64::from_uint(10),
            NetworkType::MijinTest,
        )
        .unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        let registration = &json["body"]["registration"];
        assert_eq!(registration["namespaceType"], "root");
        assert!(registration.get("parentId").is_none());

        let back: Transaction = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, tx);

        let mut missing = json;
        missing["body"]["registration"]
            .as_object_mut()
            .unwrap()
            .remove("duration");
        assert!(serde_json::from_value::<Transaction>(missing).is_err());
    }

    #[test]
    fn namespace_names_are_validated() {
        for bad in ["", "Upper", "a.b", "-x", "has space"] {
            assert!(Transaction::register_root_namespace(
                Deadline::default(),
                bad,
                UInt64::from_uint(1),
                NetworkType::MijinTest,
            )
            .is_err());
        }
    }

    #[test]
    fn sub_namespace_by_name_matches_by_id() {
        let by_name = Transaction::register_sub_namespace_by_name(
            Deadline::from_network_millis(1),
            "child",
            "parent-test-namespace",
            NetworkType::MijinTest,
        )
        .unwrap();
        let by_id = Transaction::register_sub_namespace(
            Deadline::from_network_millis(1),
            "child",
            NamespaceId::new(derive_root_id("parent-test-namespace")),
            NetworkType::MijinTest,
        )
        .unwrap();
        assert_eq!(by_name, by_id);
    }

    #[test]
    fn mosaic_definition_ids() {
        let props = MosaicProperties::new(true, true, true, 3, Some(UInt64::from_uint(1000))).unwrap();
        let tx = Transaction::mosaic_definition(
            Deadline::default(),
            "test-mosaic",
            "test-namespace",
            props,
            NetworkType::MijinTest,
        )
        .unwrap();
        let TransactionBody::MosaicDefinition(body) = tx.body() else {
            panic!("expected mosaic definition body");
        };
        assert_eq!(body.parent_id, NamespaceId::from_name("test-namespace").unwrap());
        assert_eq!(
            body.mosaic_id,
            MosaicId::from_name("test-namespace:test-mosaic").unwrap()
        );
    }

    #[test]
    fn with_fee_returns_new_value() {
        let tx = Transaction::modify_multisig_account(
            Deadline::default(),
            2,
            1,
            vec![MultisigCosignatoryModification::new(
                MultisigCosignatoryModificationType::Add,
                signer(),
            )],
            NetworkType::MijinTest,
        );
        let original = tx.clone();
        let with_fee = tx.with_fee(UInt64::from_uint(5));
        assert_eq!(with_fee.fee().to_u64(), 5);
        assert_eq!(original.fee(), UInt64::ZERO);
        assert_eq!(with_fee.body(), original.body());
        assert_eq!(with_fee.version(), original.version());
    }

    #[test]
    fn to_aggregate_binds_signer() {
        let tx = Transaction::transfer(
            Deadline::default(),
            *signer().address(),
            vec![],
            PlainMessage::create("hi"),
            NetworkType::MijinTest,
        );
        let inner = tx.clone().to_aggregate(signer());
        assert_eq!(inner.signer, signer());
        assert_eq!(inner.transaction, tx);

        let aggregate =
            Transaction::aggregate_bonded(Deadline::default(), vec![inner], NetworkType::MijinTest, vec![]);
        assert_eq!(aggregate.transaction_type(), TransactionType::AggregateBonded);
        assert_eq!(aggregate.aggregate_body().unwrap().inner_transactions.len(), 1);
        assert!(tx.aggregate_body().is_none());
    }
}
