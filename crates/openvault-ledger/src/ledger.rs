//! Account balances and total supply.
//!
//! Accounts are created implicitly on first credit; a lookup for an account
//! that was never credited returns zero. The invariant `total_supply ==
//! sum(balances)` holds after every committed operation: genesis seeds both
//! sides, `transfer` moves balance without touching supply, and `burn`
//! reduces both together.

use std::collections::HashMap;

use openvault_types::{units, AccountId, GenesisConfig, Result, VaultError};

/// The source of truth for token balances.
#[derive(Debug)]
pub struct Ledger {
    /// Per-account balances in base units.
    balances: HashMap<AccountId, u128>,
    /// Approved delegated-transfer amounts, keyed by (owner, spender).
    allowances: HashMap<(AccountId, AccountId), u128>,
    /// Sum of all balances, reduced only by burns.
    total_supply: u128,
}

impl Ledger {
    /// Build a ledger from a genesis split.
    ///
    /// Each preallocated holder is credited its amount and the reserve
    /// allocation is credited to the auction role's token account. If the
    /// auction role also appears in the preallocation, both credits apply.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidAllocation`] if the split does not sum
    /// to the total supply.
    pub fn genesis(config: &GenesisConfig) -> Result<Self> {
        config.validate()?;

        let mut balances: HashMap<AccountId, u128> = HashMap::new();
        for (account, amount) in &config.prealloc {
            *balances.entry(*account).or_insert(0) += amount;
        }
        *balances.entry(config.auction_role).or_insert(0) += config.reserve_allocation;

        tracing::info!(
            supply = %units::display_tokens(config.total_supply),
            reserve_allocation = %units::display_tokens(config.reserve_allocation),
            holders = config.prealloc.len(),
            auction_role = %config.auction_role,
            "Ledger initialized"
        );

        Ok(Self {
            balances,
            allowances: HashMap::new(),
            total_supply: config.total_supply,
        })
    }

    /// Token balance of an account. Unknown accounts read as zero.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Current total supply.
    #[must_use]
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Move `amount` from `from` to `to`. Atomic; no partial transfer.
    ///
    /// A self-transfer still validates the balance but moves nothing.
    ///
    /// # Errors
    /// - `InsufficientBalance` if `balance_of(from) < amount`
    /// - `BalanceOverflow` if the credit would overflow the recipient
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: u128) -> Result<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(VaultError::BalanceOverflow)?;

        self.balances.insert(from, from_balance - amount);
        self.balances.insert(to, new_to);
        Ok(())
    }

    /// Set (overwrite) the allowance `spender` may move out of `owner`.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Remaining allowance for a (owner, spender) pair. Zero-default.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Delegated transfer: `spender` moves `amount` from `from` to `to`
    /// against a previously approved allowance. The allowance shrinks only
    /// on success.
    ///
    /// # Errors
    /// - `InsufficientAllowance` if the allowance is too small
    /// - `InsufficientBalance` / `BalanceOverflow` as for [`Self::transfer`]
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<()> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(VaultError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        self.transfer(from, to, amount)?;
        self.allowances.insert((from, spender), approved - amount);
        Ok(())
    }

    /// Destroy `amount` from `account` and reduce total supply to match.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the account holds less than `amount`.
    pub fn burn(&mut self, account: AccountId, amount: u128) -> Result<()> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        self.balances.insert(account, balance - amount);
        self.total_supply -= amount;
        Ok(())
    }

    /// Sum of all balances — audit helper for conservation checks.
    #[must_use]
    pub fn sum_of_balances(&self) -> u128 {
        self.balances.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn genesis(total: u128, reserve: u128, holders: &[(AccountId, u128)]) -> Ledger {
        let config = GenesisConfig {
            auction_role: AccountId::from_bytes([0xaa; 20]),
            total_supply: total,
            reserve_allocation: reserve,
            prealloc: holders.iter().copied().collect(),
        };
        Ledger::genesis(&config).unwrap()
    }

    #[test]
    fn genesis_credits_prealloc_and_reserve() {
        let a = AccountId::from_bytes([1; 20]);
        let b = AccountId::from_bytes([2; 20]);
        let ledger = genesis(1000, 600, &[(a, 250), (b, 150)]);

        assert_eq!(ledger.balance_of(a), 250);
        assert_eq!(ledger.balance_of(b), 150);
        assert_eq!(ledger.balance_of(AccountId::from_bytes([0xaa; 20])), 600);
        assert_eq!(ledger.total_supply(), 1000);
        assert_eq!(ledger.sum_of_balances(), 1000);
    }

    #[test]
    fn genesis_rejects_unbalanced_split() {
        let config = GenesisConfig {
            auction_role: AccountId::from_bytes([0xaa; 20]),
            total_supply: 1000,
            reserve_allocation: 600,
            prealloc: BTreeMap::from([(AccountId::from_bytes([1; 20]), 500)]),
        };
        let err = Ledger::genesis(&config).unwrap_err();
        assert!(matches!(err, VaultError::InvalidAllocation { .. }));
    }

    #[test]
    fn genesis_merges_role_appearing_in_prealloc() {
        let role = AccountId::from_bytes([0xaa; 20]);
        let ledger = genesis(1000, 600, &[(role, 400)]);
        assert_eq!(ledger.balance_of(role), 1000);
        assert_eq!(ledger.sum_of_balances(), 1000);
    }

    #[test]
    fn transfer_moves_balance() {
        let a = AccountId::from_bytes([1; 20]);
        let b = AccountId::from_bytes([2; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 400)]);

        ledger.transfer(a, b, 150).unwrap();
        assert_eq!(ledger.balance_of(a), 250);
        assert_eq!(ledger.balance_of(b), 150);
        assert_eq!(ledger.total_supply(), 1000);
    }

    #[test]
    fn transfer_insufficient_fails_cleanly() {
        let a = AccountId::from_bytes([1; 20]);
        let b = AccountId::from_bytes([2; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 400)]);

        let err = ledger.transfer(a, b, 401).unwrap_err();
        assert!(matches!(
            err,
            VaultError::InsufficientBalance {
                needed: 401,
                available: 400
            }
        ));
        assert_eq!(ledger.balance_of(a), 400);
        assert_eq!(ledger.balance_of(b), 0);
    }

    #[test]
    fn transfer_to_unknown_account_creates_it() {
        let a = AccountId::from_bytes([1; 20]);
        let stranger = AccountId::random();
        let mut ledger = genesis(1000, 600, &[(a, 400)]);

        assert_eq!(ledger.balance_of(stranger), 0);
        ledger.transfer(a, stranger, 10).unwrap();
        assert_eq!(ledger.balance_of(stranger), 10);
    }

    #[test]
    fn self_transfer_validates_but_moves_nothing() {
        let a = AccountId::from_bytes([1; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 400)]);

        ledger.transfer(a, a, 400).unwrap();
        assert_eq!(ledger.balance_of(a), 400);

        let err = ledger.transfer(a, a, 401).unwrap_err();
        assert!(matches!(err, VaultError::InsufficientBalance { .. }));
    }

    #[test]
    fn zero_transfer_is_a_valid_noop() {
        let a = AccountId::from_bytes([1; 20]);
        let b = AccountId::from_bytes([2; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 400)]);
        ledger.transfer(a, b, 0).unwrap();
        assert_eq!(ledger.balance_of(a), 400);
        assert_eq!(ledger.balance_of(b), 0);

        // an empty account can still send zero
        ledger.transfer(b, a, 0).unwrap();
    }

    #[test]
    fn approve_and_transfer_from() {
        let owner = AccountId::from_bytes([1; 20]);
        let spender = AccountId::from_bytes([2; 20]);
        let dest = AccountId::from_bytes([3; 20]);
        let mut ledger = genesis(1000, 600, &[(owner, 400)]);

        ledger.approve(owner, spender, 300);
        assert_eq!(ledger.allowance(owner, spender), 300);

        ledger.transfer_from(spender, owner, dest, 120).unwrap();
        assert_eq!(ledger.balance_of(owner), 280);
        assert_eq!(ledger.balance_of(dest), 120);
        assert_eq!(ledger.allowance(owner, spender), 180);
    }

    #[test]
    fn transfer_from_beyond_allowance_fails() {
        let owner = AccountId::from_bytes([1; 20]);
        let spender = AccountId::from_bytes([2; 20]);
        let dest = AccountId::from_bytes([3; 20]);
        let mut ledger = genesis(1000, 600, &[(owner, 400)]);

        ledger.approve(owner, spender, 100);
        let err = ledger.transfer_from(spender, owner, dest, 101).unwrap_err();
        assert!(matches!(err, VaultError::InsufficientAllowance { .. }));
        assert_eq!(ledger.allowance(owner, spender), 100);
        assert_eq!(ledger.balance_of(owner), 400);
    }

    #[test]
    fn transfer_from_failed_balance_keeps_allowance() {
        let owner = AccountId::from_bytes([1; 20]);
        let spender = AccountId::from_bytes([2; 20]);
        let dest = AccountId::from_bytes([3; 20]);
        let mut ledger = genesis(1000, 600, &[(owner, 400)]);

        // allowance larger than the owner's balance
        ledger.approve(owner, spender, 500);
        let err = ledger.transfer_from(spender, owner, dest, 450).unwrap_err();
        assert!(matches!(err, VaultError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(owner, spender), 500);
    }

    #[test]
    fn approve_overwrites() {
        let owner = AccountId::from_bytes([1; 20]);
        let spender = AccountId::from_bytes([2; 20]);
        let mut ledger = genesis(1000, 1000, &[]);

        ledger.approve(owner, spender, 100);
        ledger.approve(owner, spender, 40);
        assert_eq!(ledger.allowance(owner, spender), 40);
    }

    #[test]
    fn burn_reduces_balance_and_supply() {
        let a = AccountId::from_bytes([1; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 400)]);

        ledger.burn(a, 250).unwrap();
        assert_eq!(ledger.balance_of(a), 150);
        assert_eq!(ledger.total_supply(), 750);
        assert_eq!(ledger.sum_of_balances(), 750);
    }

    #[test]
    fn burn_more_than_held_fails() {
        let a = AccountId::from_bytes([1; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 400)]);

        let err = ledger.burn(a, 401).unwrap_err();
        assert!(matches!(err, VaultError::InsufficientBalance { .. }));
        assert_eq!(ledger.total_supply(), 1000);
    }

    #[test]
    fn conservation_across_operation_sequence() {
        let a = AccountId::from_bytes([1; 20]);
        let b = AccountId::from_bytes([2; 20]);
        let mut ledger = genesis(1000, 600, &[(a, 250), (b, 150)]);

        ledger.transfer(a, b, 100).unwrap();
        assert_eq!(ledger.sum_of_balances(), ledger.total_supply());

        ledger.burn(b, 200).unwrap();
        assert_eq!(ledger.sum_of_balances(), ledger.total_supply());

        ledger.transfer(b, a, 50).unwrap();
        assert_eq!(ledger.sum_of_balances(), ledger.total_supply());
        assert_eq!(ledger.total_supply(), 800);
    }
}
