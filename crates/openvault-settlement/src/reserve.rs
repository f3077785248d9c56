//! Reserve vault and access gate.
//!
//! The vault holds the native value contributed by the auction process.
//! Only the configured auction role may fund it; the role is fixed at
//! construction and compared explicitly on every call. Accounting is
//! cumulative: current balance is `received - paid_out`, so invariant
//! drift is detectable by reconstruction.

use openvault_types::{units, AccountId, Result, VaultError};

/// Pooled native value backing token redemption.
#[derive(Debug)]
pub struct ReserveVault {
    /// The sole account authorized to fund the vault. Immutable.
    auction_role: AccountId,
    /// Cumulative native value received.
    received: u128,
    /// Cumulative native value paid out to redeemers.
    paid_out: u128,
}

impl ReserveVault {
    /// Create an empty vault gated on `auction_role`.
    #[must_use]
    pub fn new(auction_role: AccountId) -> Self {
        Self {
            auction_role,
            received: 0,
            paid_out: 0,
        }
    }

    /// The account permitted to fund this vault.
    #[must_use]
    pub fn auction_role(&self) -> AccountId {
        self.auction_role
    }

    /// Accept native value from the auction role.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the auction role
    /// - `BalanceOverflow` if cumulative received would overflow
    pub fn fund(&mut self, caller: AccountId, amount: u128) -> Result<()> {
        if caller != self.auction_role {
            return Err(VaultError::Unauthorized { caller });
        }
        self.received = self
            .received
            .checked_add(amount)
            .ok_or(VaultError::BalanceOverflow)?;

        tracing::debug!(
            caller = %caller,
            amount = %units::display_tokens(amount),
            balance = %units::display_tokens(self.balance()),
            "Reserve funded"
        );
        Ok(())
    }

    /// Current native balance: received minus paid out.
    #[must_use]
    pub fn balance(&self) -> u128 {
        self.received - self.paid_out
    }

    /// Cumulative native value received since construction.
    #[must_use]
    pub fn received_value(&self) -> u128 {
        self.received
    }

    /// Cumulative native value paid out since construction.
    #[must_use]
    pub fn total_paid_out(&self) -> u128 {
        self.paid_out
    }

    /// Whether the vault currently holds any native value.
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.balance() > 0
    }

    /// Disburse `amount` from the vault.
    ///
    /// # Errors
    /// Returns `ReserveUnderflow` if `amount` exceeds the current balance.
    pub fn pay_out(&mut self, amount: u128) -> Result<()> {
        let balance = self.balance();
        if amount > balance {
            return Err(VaultError::ReserveUnderflow {
                payout: amount,
                balance,
            });
        }
        self.paid_out += amount;
        Ok(())
    }

    /// Verify the vault's books against the observed total of disbursed
    /// value (the sum of all redeemers' native wallets).
    ///
    /// # Errors
    /// Returns [`VaultError::ReserveInvariantViolation`] on mismatch.
    pub fn verify(&self, observed_disbursed: u128) -> Result<()> {
        if observed_disbursed != self.paid_out {
            return Err(VaultError::ReserveInvariantViolation {
                reason: format!(
                    "disbursed native value {observed_disbursed} != recorded payouts {} \
                     (received={}, balance={})",
                    self.paid_out,
                    self.received,
                    self.balance(),
                ),
            });
        }
        Ok(())
    }
}
