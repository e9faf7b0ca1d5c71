//! Mosaics: amounts of a token, and the properties a token is created with.

use serde::{Deserialize, Serialize};

use crate::config::MAX_DIVISIBILITY;
use crate::error::ConstructionError;
use crate::id::{MosaicId, NamespaceId};
use crate::uint64::UInt64;

// ---------------------------------------------------------------------------
// Mosaic
// ---------------------------------------------------------------------------

/// An amount of a mosaic, in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: MosaicId,
    pub amount: UInt64,
}

impl Mosaic {
    pub fn new(id: MosaicId, amount: UInt64) -> Self {
        Self { id, amount }
    }
}

// ---------------------------------------------------------------------------
// MosaicProperties
// ---------------------------------------------------------------------------

/// Flags and parameters fixed when a mosaic is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub levy_mutable: bool,
    divisibility: u8,
    /// Lifetime in blocks. `None` means the mosaic does not expire.
    pub duration: Option<UInt64>,
}

impl MosaicProperties {
    const SUPPLY_MUTABLE: u8 = 0x01;
    const TRANSFERABLE: u8 = 0x02;
    const LEVY_MUTABLE: u8 = 0x04;

    /// # Errors
    ///
    /// [`ConstructionError::InvalidDivisibility`] above six decimal places.
    pub fn new(
        supply_mutable: bool,
        transferable: bool,
        levy_mutable: bool,
        divisibility: u8,
        duration: Option<UInt64>,
    ) -> Result<Self, ConstructionError> {
        if divisibility > MAX_DIVISIBILITY {
            return Err(ConstructionError::InvalidDivisibility {
                divisibility,
                max: MAX_DIVISIBILITY,
            });
        }
        Ok(Self {
            supply_mutable,
            transferable,
            levy_mutable,
            divisibility,
            duration,
        })
    }

    pub fn divisibility(&self) -> u8 {
        self.divisibility
    }

    /// Packed flags byte.
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= Self::SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= Self::TRANSFERABLE;
        }
        if self.levy_mutable {
            flags |= Self::LEVY_MUTABLE;
        }
        flags
    }
}

// ---------------------------------------------------------------------------
// XEM
// ---------------------------------------------------------------------------

/// The network currency, `nem:xem`.
pub struct Xem;

impl Xem {
    pub const MOSAIC_ID: MosaicId = MosaicId::new(UInt64::new(3646934825, 3576016193));
    pub const NAMESPACE_ID: NamespaceId = NamespaceId::new(UInt64::new(929036875, 2226345261));
    pub const DIVISIBILITY: u8 = 6;
    pub const TRANSFERABLE: bool = true;
    pub const SUPPLY_MUTABLE: bool = false;
    pub const LEVY_MUTABLE: bool = false;

    /// Whole XEM, scaled by the divisibility.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::OutOfRange`] if the scaled amount overflows.
    pub fn create_relative(amount: u64) -> Result<Mosaic, ConstructionError> {
        let scaled = amount
            .checked_mul(10u64.pow(u32::from(Self::DIVISIBILITY)))
            .ok_or_else(|| ConstructionError::OutOfRange {
                value: amount.to_string(),
                reason: "overflows when scaled to micro-xem",
            })?;
        Ok(Self::create_absolute(UInt64::from_uint(scaled)))
    }

    /// Amount already expressed in micro-xem.
    pub fn create_absolute(amount: UInt64) -> Mosaic {
        Mosaic::new(Self::MOSAIC_ID, amount)
    }
}
