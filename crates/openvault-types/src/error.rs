//! Error types for the OpenVault settlement engine.
//!
//! All errors use the `OV_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Genesis / allocation errors
//! - 2xx: Balance errors
//! - 3xx: Reserve / access errors
//! - 4xx: Settlement / invariant errors
//! - 9xx: General / internal errors
//!
//! Every error is synchronous and leaves shared state unmodified: operations
//! validate completely before their first mutation.

use thiserror::Error;

use crate::AccountId;

/// Central error enum for all OpenVault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    // =================================================================
    // Genesis / Allocation Errors (1xx)
    // =================================================================
    /// The genesis split does not add up: reserve allocation plus the sum
    /// of preallocations must equal total supply exactly.
    #[error(
        "OV_ERR_100: Invalid allocation: reserve {reserve_allocation} + prealloc {preallocated} != total supply {total_supply}"
    )]
    InvalidAllocation {
        total_supply: u128,
        reserve_allocation: u128,
        preallocated: u128,
    },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough token balance to perform the operation.
    #[error("OV_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    /// A delegated transfer exceeds the spender's approved allowance.
    #[error("OV_ERR_201: Insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    /// A credit would overflow the receiving balance.
    #[error("OV_ERR_202: Balance overflow")]
    BalanceOverflow,

    // =================================================================
    // Reserve / Access Errors (3xx)
    // =================================================================
    /// The caller is not the configured auction role.
    #[error("OV_ERR_300: Unauthorized: {caller} is not the auction role")]
    Unauthorized { caller: AccountId },

    /// Redemption attempted while the reserve holds no native value.
    #[error("OV_ERR_301: Reserve not funded")]
    ReserveNotFunded,

    /// A payout would drive the reserve balance negative.
    #[error("OV_ERR_302: Reserve underflow: payout {payout} exceeds balance {balance}")]
    ReserveUnderflow { payout: u128, balance: u128 },

    // =================================================================
    // Settlement / Invariant Errors (4xx)
    // =================================================================
    /// The proportional payout quotient does not fit the amount type.
    #[error("OV_ERR_400: Payout overflow")]
    PayoutOverflow,

    /// Supply conservation invariant violated — critical safety alert.
    #[error("OV_ERR_401: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// Reserve accounting invariant violated — critical safety alert.
    #[error("OV_ERR_402: Reserve invariant violation: {reason}")]
    ReserveInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OV_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("OV_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (disk, network).
    #[error("OV_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, VaultError>;

// Conversion from std::io::Error
impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Conversion from serde_json::Error (config loading)
impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = VaultError::InvalidAllocation {
            total_supply: 1000,
            reserve_allocation: 700,
            preallocated: 400,
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("OV_ERR_100"), "Got: {msg}");
        assert!(msg.contains("700"));
    }

    #[test]
    fn insufficient_balance_display() {
        let err = VaultError::InsufficientBalance {
            needed: 100,
            available: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OV_ERR_200"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn unauthorized_names_caller() {
        let caller = AccountId::from_bytes([1u8; 20]);
        let err = VaultError::Unauthorized { caller };
        let msg = format!("{err}");
        assert!(msg.contains("OV_ERR_300"));
        assert!(msg.contains(&format!("{caller}")));
    }

    #[test]
    fn all_errors_have_ov_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(VaultError::ReserveNotFunded),
            Box::new(VaultError::BalanceOverflow),
            Box::new(VaultError::PayoutOverflow),
            Box::new(VaultError::Internal("test".into())),
            Box::new(VaultError::SupplyInvariantViolation {
                reason: "mismatch".into(),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OV_ERR_"),
                "Error missing OV_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VaultError = io.into();
        assert!(matches!(err, VaultError::Io(_)));
    }
}
