//! Identifiers used throughout OpenVault.
//!
//! `AccountId` is an address-like opaque key: 20 bytes, displayed as hex.
//! It can be derived from an ed25519 verifying key (SHA-256 of the public
//! key bytes, last 20 bytes) or built from raw bytes. `ReceiptId` uses
//! UUIDv7 for time-ordered sorting, with a deterministic variant for
//! sequence-derived ids.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Address-like account key. Accounts are created implicitly on first
/// reference; an id that was never credited reads as a zero balance.
///
/// Serializes as a `0x`-prefixed hex string so it can key JSON maps
/// (genesis preallocations) and read naturally in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive an account id from an ed25519 verifying key:
    /// the last 20 bytes of SHA-256 over the raw public key.
    #[must_use]
    pub fn from_pubkey(key: &ed25519_dalek::VerifyingKey) -> Self {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..32]);
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Short hex form (first 4 bytes) for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let stripped = text.strip_prefix("0x").unwrap_or(&text);
        let bytes = hex::decode(stripped).map_err(serde::de::Error::custom)?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("account id must be 20 bytes"))?;
        Ok(Self(bytes))
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl AccountId {
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random::<[u8; 20]>())
    }
}

// ---------------------------------------------------------------------------
// ReceiptId
// ---------------------------------------------------------------------------

/// Globally unique receipt identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Deterministic `ReceiptId` from the engine's commit sequence.
    ///
    /// Replaying the same operation sequence against the same genesis
    /// yields the **exact same** receipt ids — useful for audit replay.
    #[must_use]
    pub fn deterministic(sequence: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"openvault:receipt_id:v1:");
        hasher.update(sequence.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rcpt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
