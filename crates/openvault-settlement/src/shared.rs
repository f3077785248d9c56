//! Serialized shared handle over the settlement engine.
//!
//! All mutating operations require full mutual exclusion: `redeem` reads
//! supply and reserve and must commit against that same snapshot. The
//! handle wraps the engine in a mutex so exactly one operation commits at
//! a time, from any thread. A poisoned lock is recovered rather than
//! propagated: failed operations never leave partial state, so the inner
//! engine is consistent even if a panicking thread held the lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use openvault_types::{AccountId, GenesisConfig, Receipt, Result};

use crate::engine::SettlementEngine;

/// Cloneable, thread-safe handle to a [`SettlementEngine`].
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<SettlementEngine>>,
}

impl SharedEngine {
    /// Build a shared engine from a genesis split.
    ///
    /// # Errors
    /// Returns [`openvault_types::VaultError::InvalidAllocation`] if the
    /// split is invalid.
    pub fn new(config: &GenesisConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(SettlementEngine::new(config)?)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SettlementEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transfer(&self, from: AccountId, to: AccountId, amount: u128) -> Result<Receipt> {
        self.lock().transfer(from, to, amount)
    }

    pub fn approve(&self, owner: AccountId, spender: AccountId, amount: u128) -> Receipt {
        self.lock().approve(owner, spender, amount)
    }

    pub fn transfer_from(
        &self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<Receipt> {
        self.lock().transfer_from(spender, from, to, amount)
    }

    pub fn fund(&self, caller: AccountId, amount: u128) -> Result<Receipt> {
        self.lock().fund(caller, amount)
    }

    pub fn redeem(&self, caller: AccountId, amount: u128) -> Result<Receipt> {
        self.lock().redeem(caller, amount)
    }

    pub fn burn(&self, caller: AccountId, amount: u128) -> Result<Receipt> {
        self.lock().burn(caller, amount)
    }

    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> u128 {
        self.lock().balance_of(account)
    }

    #[must_use]
    pub fn total_supply(&self) -> u128 {
        self.lock().total_supply()
    }

    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
        self.lock().allowance(owner, spender)
    }

    #[must_use]
    pub fn native_balance_of(&self, account: AccountId) -> u128 {
        self.lock().native_balance_of(account)
    }

    #[must_use]
    pub fn reserve_balance(&self) -> u128 {
        self.lock().reserve_balance()
    }

    #[must_use]
    pub fn received_value(&self) -> u128 {
        self.lock().received_value()
    }

    #[must_use]
    pub fn auction_role(&self) -> AccountId {
        self.lock().auction_role()
    }

    pub fn verify_invariants(&self) -> Result<()> {
        self.lock().verify_invariants()
    }
}
