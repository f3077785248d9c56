//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced after every settlement commit:
//! ```text
//! Σ balances == genesis_supply - Σ burned
//! ```
//!
//! If this invariant ever breaks, something has gone catastrophically
//! wrong upstream; the tracker is the ultimate safety net behind the
//! ledger's own bookkeeping.

use openvault_types::{Result, VaultError};

/// Tracks genesis supply and cumulative burns, and validates that the
/// ledger's observed supply matches the re-derived expectation.
#[derive(Debug)]
pub struct SupplyTracker {
    /// Supply minted at genesis.
    genesis_supply: u128,
    /// Total burned (redeem + burn) since genesis.
    burned: u128,
}

impl SupplyTracker {
    /// Create a tracker for a ledger minted with `genesis_supply`.
    #[must_use]
    pub fn new(genesis_supply: u128) -> Self {
        Self {
            genesis_supply,
            burned: 0,
        }
    }

    /// Record a committed burn or redemption.
    pub fn record_burn(&mut self, amount: u128) {
        self.burned += amount;
    }

    /// Expected supply: genesis minus everything burned.
    #[must_use]
    pub fn expected_supply(&self) -> u128 {
        self.genesis_supply - self.burned
    }

    /// Total burned since genesis.
    #[must_use]
    pub fn total_burned(&self) -> u128 {
        self.burned
    }

    /// Verify that the observed supply matches the expectation.
    ///
    /// # Errors
    /// Returns [`VaultError::SupplyInvariantViolation`] if they differ.
    pub fn verify(&self, actual_supply: u128) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(VaultError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (genesis={}, burned={})",
                    self.genesis_supply, self.burned,
                ),
            });
        }
        Ok(())
    }
}
