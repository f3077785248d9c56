//! Operation receipts for the OpenVault audit trail.
//!
//! Every successful mutating operation issues a [`Receipt`]. Receipts form
//! an append-only log carrying the post-state supply and reserve balance,
//! so an auditor can replay and cross-check the engine without access to
//! its internal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, ReceiptId};

/// The kind of operation this receipt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptKind {
    /// Tokens moved between two accounts.
    TransferExecuted,
    /// An allowance was set for a spender.
    AllowanceApproved,
    /// Native value entered the reserve through the auction role.
    ReserveFunded,
    /// Tokens were burned in exchange for a proportional reserve payout.
    TokensRedeemed,
    /// Tokens were destroyed with no payout.
    TokensBurned,
}

impl std::fmt::Display for ReceiptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransferExecuted => write!(f, "TRANSFER_EXECUTED"),
            Self::AllowanceApproved => write!(f, "ALLOWANCE_APPROVED"),
            Self::ReserveFunded => write!(f, "RESERVE_FUNDED"),
            Self::TokensRedeemed => write!(f, "TOKENS_REDEEMED"),
            Self::TokensBurned => write!(f, "TOKENS_BURNED"),
        }
    }
}

/// Record of one committed operation.
///
/// `account` is the acting (debited / burning / funding) party;
/// `counterparty` is the credited or approved party where one exists.
/// `total_supply_after` and `reserve_after` snapshot the engine state
/// immediately after the commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub kind: ReceiptKind,
    pub account: AccountId,
    pub counterparty: Option<AccountId>,
    /// Token amount moved, burned, or approved (base units).
    pub token_amount: u128,
    /// Native value moved (base units); zero for pure token operations.
    pub native_amount: u128,
    pub total_supply_after: u128,
    pub reserve_after: u128,
    pub issued_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_kind_display() {
        assert_eq!(format!("{}", ReceiptKind::TokensRedeemed), "TOKENS_REDEEMED");
        assert_eq!(format!("{}", ReceiptKind::ReserveFunded), "RESERVE_FUNDED");
        assert_eq!(
            format!("{}", ReceiptKind::TransferExecuted),
            "TRANSFER_EXECUTED"
        );
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let receipt = Receipt {
            id: ReceiptId::deterministic(1),
            kind: ReceiptKind::TokensBurned,
            account: AccountId::from_bytes([3; 20]),
            counterparty: None,
            token_amount: 250,
            native_amount: 0,
            total_supply_after: 750,
            reserve_after: 150,
            issued_at: Utc::now(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, receipt.id);
        assert_eq!(back.kind, ReceiptKind::TokensBurned);
        assert_eq!(back.token_amount, 250);
    }
}
