//! # openvault-types
//!
//! Shared types, errors, and configuration for the **OpenVault**
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`ReceiptId`]
//! - **Genesis model**: [`GenesisConfig`]
//! - **Receipt model**: [`Receipt`], [`ReceiptKind`]
//! - **Unit scaling**: the `units` module and `constants::TOKEN_MULTIPLIER`
//! - **Errors**: [`VaultError`] with `OV_ERR_` prefix codes
//! - **Constants**: system-wide defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod receipt;
pub mod units;

// Re-export all primary types at crate root for ergonomic imports:
//   use openvault_types::{AccountId, GenesisConfig, VaultError, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;

// Constants and unit helpers are accessed via their modules
// (`openvault_types::constants::FOO`, `openvault_types::units::foo`)
// to avoid name collisions.
