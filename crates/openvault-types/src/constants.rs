//! System-wide constants for the OpenVault settlement engine.

/// Base units per whole token. All ledger and reserve amounts are kept in
/// base units; this constant is the only conversion point.
pub const TOKEN_MULTIPLIER: u128 = 1_000_000_000_000_000_000;

/// Decimal places implied by [`TOKEN_MULTIPLIER`].
pub const TOKEN_DECIMALS: u32 = 18;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenVault";
