//! The settlement engine: atomic commits over ledger + reserve.
//!
//! Every mutating operation validates completely before its first write,
//! so a failure leaves no partial state. `redeem` reads supply and reserve
//! from the same snapshot it mutates; the engine takes `&mut self` and
//! never suspends mid-commit, which gives the single-writer model for
//! free (see [`crate::shared`] for the lock-wrapped handle).

use std::collections::HashMap;

use chrono::Utc;
use openvault_ledger::{Ledger, SupplyTracker};
use openvault_types::{
    units, AccountId, GenesisConfig, Receipt, ReceiptId, ReceiptKind, Result, VaultError,
};

use crate::reserve::ReserveVault;

/// Floor of `a * b / d` with a 256-bit intermediate product.
///
/// # Errors
/// Returns `PayoutOverflow` if the quotient exceeds `u128`. Callers that
/// guarantee `b <= d` (redemption does: `amount <= total_supply`) never
/// hit this.
fn mul_div_floor(a: u128, b: u128, d: u128) -> Result<u128> {
    debug_assert!(d > 0, "mul_div_floor divisor must be nonzero");
    let (hi, lo) = widening_mul(a, b);
    if hi == 0 {
        return Ok(lo / d);
    }
    if hi >= d {
        return Err(VaultError::PayoutOverflow);
    }
    // Binary long division of the 256-bit (hi, lo) by d. The remainder
    // stays below d; a carry out of the shift means the shifted remainder
    // exceeds 2^128 and d always divides into it.
    let mut rem = hi;
    let mut quot: u128 = 0;
    for i in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quot |= 1 << i;
        }
    }
    Ok(quot)
}

/// Full 128x128 -> 256-bit multiplication as (hi, lo) limbs.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = (1 << 64) - 1;
    let (a_hi, a_lo) = (a >> 64, a & MASK);
    let (b_hi, b_lo) = (b >> 64, b & MASK);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (mid << 64) | (ll & MASK);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// Owns the full settlement state: token ledger, reserve vault, native
/// wallets, and the supply tracker.
#[derive(Debug)]
pub struct SettlementEngine {
    ledger: Ledger,
    reserve: ReserveVault,
    /// Native value credited to redeemers, per account. Zero-default.
    native: HashMap<AccountId, u128>,
    supply: SupplyTracker,
    /// Commit sequence, also the deterministic receipt-id source.
    sequence: u64,
}

impl SettlementEngine {
    /// Build an engine from a genesis split.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidAllocation`] if the split is invalid.
    pub fn new(config: &GenesisConfig) -> Result<Self> {
        let ledger = Ledger::genesis(config)?;
        Ok(Self {
            ledger,
            reserve: ReserveVault::new(config.auction_role),
            native: HashMap::new(),
            supply: SupplyTracker::new(config.total_supply),
            sequence: 0,
        })
    }

    fn issue_receipt(
        &mut self,
        kind: ReceiptKind,
        account: AccountId,
        counterparty: Option<AccountId>,
        token_amount: u128,
        native_amount: u128,
    ) -> Receipt {
        let receipt = Receipt {
            id: ReceiptId::deterministic(self.sequence),
            kind,
            account,
            counterparty,
            token_amount,
            native_amount,
            total_supply_after: self.ledger.total_supply(),
            reserve_after: self.reserve.balance(),
            issued_at: Utc::now(),
        };
        self.sequence += 1;

        tracing::debug!(
            receipt = %receipt.id,
            kind = %receipt.kind,
            account = %account,
            tokens = %units::display_tokens(token_amount),
            native = %units::display_tokens(native_amount),
            supply = %units::display_tokens(receipt.total_supply_after),
            reserve = %units::display_tokens(receipt.reserve_after),
            "Operation committed"
        );
        receipt
    }

    // =====================================================================
    // Mutating operations
    // =====================================================================

    /// Move tokens between accounts.
    ///
    /// # Errors
    /// `InsufficientBalance` if `from` holds less than `amount`.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: u128) -> Result<Receipt> {
        self.ledger.transfer(from, to, amount)?;
        Ok(self.issue_receipt(ReceiptKind::TransferExecuted, from, Some(to), amount, 0))
    }

    /// Set the allowance `spender` may move out of `owner`.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: u128) -> Receipt {
        self.ledger.approve(owner, spender, amount);
        self.issue_receipt(ReceiptKind::AllowanceApproved, owner, Some(spender), amount, 0)
    }

    /// Delegated transfer against a previously approved allowance.
    ///
    /// # Errors
    /// `InsufficientAllowance` or `InsufficientBalance`.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<Receipt> {
        self.ledger.transfer_from(spender, from, to, amount)?;
        Ok(self.issue_receipt(ReceiptKind::TransferExecuted, from, Some(to), amount, 0))
    }

    /// Fund the reserve with native value. Auction role only.
    ///
    /// # Errors
    /// `Unauthorized` if `caller` is not the configured auction role.
    pub fn fund(&mut self, caller: AccountId, amount: u128) -> Result<Receipt> {
        self.reserve.fund(caller, amount)?;
        Ok(self.issue_receipt(ReceiptKind::ReserveFunded, caller, None, 0, amount))
    }

    /// Burn tokens in exchange for a proportional share of the reserve.
    ///
    /// The payout is `floor(reserve * amount / supply)` over the supply
    /// *before* the burn. The balance check runs before any reserve
    /// computation; the funding check runs before any payout math.
    ///
    /// # Errors
    /// - `InsufficientBalance` if the caller holds less than `amount`
    /// - `ReserveNotFunded` if the reserve native balance is zero
    pub fn redeem(&mut self, caller: AccountId, amount: u128) -> Result<Receipt> {
        let balance = self.ledger.balance_of(caller);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        let reserve_balance = self.reserve.balance();
        if reserve_balance == 0 {
            return Err(VaultError::ReserveNotFunded);
        }

        let supply_before = self.ledger.total_supply();
        // amount <= balance <= supply_before, so the quotient fits u128
        // and a zero amount needs no division at all.
        let payout = if amount == 0 {
            0
        } else {
            mul_div_floor(reserve_balance, amount, supply_before)?
        };

        self.ledger.burn(caller, amount)?;
        self.supply.record_burn(amount);
        self.reserve.pay_out(payout)?;
        *self.native.entry(caller).or_insert(0) += payout;

        Ok(self.issue_receipt(ReceiptKind::TokensRedeemed, caller, None, amount, payout))
    }

    /// Destroy tokens with no payout. Works in any reserve state.
    ///
    /// # Errors
    /// `InsufficientBalance` if the caller holds less than `amount`.
    pub fn burn(&mut self, caller: AccountId, amount: u128) -> Result<Receipt> {
        self.ledger.burn(caller, amount)?;
        self.supply.record_burn(amount);
        Ok(self.issue_receipt(ReceiptKind::TokensBurned, caller, None, amount, 0))
    }

    // =====================================================================
    // Read-only queries
    // =====================================================================

    /// Token balance. Unknown accounts read as zero.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> u128 {
        self.ledger.balance_of(account)
    }

    /// Current total token supply.
    #[must_use]
    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    /// Remaining allowance for a (owner, spender) pair.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    /// Native value credited to an account by redemptions. Zero-default.
    #[must_use]
    pub fn native_balance_of(&self, account: AccountId) -> u128 {
        self.native.get(&account).copied().unwrap_or(0)
    }

    /// Current native balance of the reserve.
    #[must_use]
    pub fn reserve_balance(&self) -> u128 {
        self.reserve.balance()
    }

    /// Cumulative native value ever received by the reserve.
    #[must_use]
    pub fn received_value(&self) -> u128 {
        self.reserve.received_value()
    }

    /// The account permitted to fund the reserve.
    #[must_use]
    pub fn auction_role(&self) -> AccountId {
        self.reserve.auction_role()
    }

    /// Re-verify the supply and reserve invariants from scratch.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` or `ReserveInvariantViolation` if the
    /// books no longer reconcile.
    pub fn verify_invariants(&self) -> Result<()> {
        let result = self.try_verify();
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Invariant verification failed");
        }
        result
    }

    fn try_verify(&self) -> Result<()> {
        self.supply.verify(self.ledger.total_supply())?;

        let balance_sum = self.ledger.sum_of_balances();
        if balance_sum != self.ledger.total_supply() {
            return Err(VaultError::SupplyInvariantViolation {
                reason: format!(
                    "sum of balances {balance_sum} != total supply {}",
                    self.ledger.total_supply()
                ),
            });
        }

        let disbursed: u128 = self.native.values().sum();
        self.reserve.verify(disbursed)
    }
}
