//! Genesis configuration for an OpenVault ledger.
//!
//! The genesis split is validated up front: reserve allocation plus the sum
//! of all preallocations must equal total supply exactly. A config that
//! fails validation never produces a ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AccountId, Result, VaultError};

/// Describes the initial token distribution.
///
/// `prealloc` is a `BTreeMap` so iteration order (and therefore genesis
/// crediting order and any derived log output) is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The sole account authorized to fund the reserve.
    pub auction_role: AccountId,
    /// Total token supply in base units.
    pub total_supply: u128,
    /// Portion of supply credited to the auction role at genesis.
    pub reserve_allocation: u128,
    /// Initial balances for preallocated holders, in base units.
    pub prealloc: BTreeMap<AccountId, u128>,
}

impl GenesisConfig {
    /// Sum of all preallocated balances. `None` if the sum overflows.
    #[must_use]
    pub fn preallocated_total(&self) -> Option<u128> {
        self.prealloc
            .values()
            .try_fold(0u128, |acc, v| acc.checked_add(*v))
    }

    /// Validate the genesis split.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidAllocation`] if
    /// `reserve_allocation + sum(prealloc) != total_supply`, or if that
    /// sum overflows.
    pub fn validate(&self) -> Result<()> {
        let preallocated = self.preallocated_total();
        let covered = preallocated.and_then(|p| p.checked_add(self.reserve_allocation));
        if covered != Some(self.total_supply) {
            return Err(VaultError::InvalidAllocation {
                total_supply: self.total_supply,
                reserve_allocation: self.reserve_allocation,
                preallocated: preallocated.unwrap_or(u128::MAX),
            });
        }
        Ok(())
    }

    /// Load a genesis config from a JSON string.
    ///
    /// # Errors
    /// Returns `Serialization` on malformed JSON; the result is **not**
    /// validated — callers pass it to the engine, which validates.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
