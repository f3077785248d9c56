//! # openvault-ledger
//!
//! The token ledger: account balances, total supply, allowances, and the
//! supply-conservation tracker.
//!
//! ## Architecture
//!
//! - [`Ledger`]: the source of truth for token balances. Seeded once at
//!   genesis from a validated split (preallocations + reserve allocation),
//!   then mutated only through `transfer`, `transfer_from`, and `burn`.
//! - [`SupplyTracker`]: records genesis supply and cumulative burns and
//!   re-derives the expected supply, the safety net behind every
//!   settlement commit.
//!
//! All mutations are atomic: either the full operation succeeds or the
//! ledger is unchanged.

pub mod conservation;
pub mod ledger;

pub use conservation::SupplyTracker;
pub use ledger::Ledger;
