//! The audit entry shape and its hash-chain linkage.

use masc_crypto::sha256_hex;
use serde::{Deserialize, Serialize};

/// The hash of an absent predecessor — the chain's genesis value.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// One append-only audit record.
///
/// `timestamp`, `agent`, `event_type`, `success`, and `detail` are the
/// `audit_event` fields callers see over MCP and must round-trip verbatim.
/// `seq`, `prev_hash`, and `hash` are the chain-linkage bookkeeping that
/// lets a room's history be verified offline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEntry {
    /// Monotone, dense position of this entry in the room's audit log.
    pub seq: u64,
    /// Unix seconds when the event was recorded.
    pub timestamp: u64,
    /// The agent responsible for the event.
    pub agent: String,
    /// A short, caller-chosen event classification (e.g.
    /// `"token_created"`, `"task_claimed"`).
    pub event_type: String,
    /// Whether the underlying operation succeeded.
    pub success: bool,
    /// Optional free-form detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Hex SHA-256 of the previous entry's `hash`, or [`GENESIS_HASH`] for
    /// the first entry in the room.
    pub prev_hash: String,
    /// Hex SHA-256 over this entry's canonical representation, folding in
    /// `prev_hash`.
    pub hash: String,
}

impl AuditEntry {
    /// Builds a new entry at `seq`, chained onto `prev_hash`, and computes
    /// its own hash.
    pub fn new(
        seq: u64,
        timestamp: u64,
        agent: impl Into<String>,
        event_type: impl Into<String>,
        success: bool,
        detail: Option<String>,
        prev_hash: String,
    ) -> Self {
        let agent = agent.into();
        let event_type = event_type.into();
        let hash = Self::compute_hash(seq, timestamp, &agent, &event_type, success, &detail, &prev_hash);
        Self {
            seq,
            timestamp,
            agent,
            event_type,
            success,
            detail,
            prev_hash,
            hash,
        }
    }

    fn compute_hash(
        seq: u64,
        timestamp: u64,
        agent: &str,
        event_type: &str,
        success: bool,
        detail: &Option<String>,
        prev_hash: &str,
    ) -> String {
        let canonical = format!(
            "{seq}|{timestamp}|{agent}|{event_type}|{success}|{}|{prev_hash}",
            detail.as_deref().unwrap_or("")
        );
        sha256_hex(canonical.as_bytes())
    }

    /// Recomputes the hash from this entry's fields and compares it
    /// against the stored one, detecting tampering or corruption.
    pub fn verify(&self) -> bool {
        let expected = Self::compute_hash(
            self.seq,
            self.timestamp,
            &self.agent,
            &self.event_type,
            self.success,
            &self.detail,
            &self.prev_hash,
        );
        expected == self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_chains_onto_genesis() {
        let entry = AuditEntry::new(1, 1000, "claude", "token_created", true, None, GENESIS_HASH.to_string());
        assert_eq!(entry.prev_hash, GENESIS_HASH);
        assert!(entry.verify());
    }

    #[test]
    fn tampering_breaks_verification() {
        let mut entry = AuditEntry::new(1, 1000, "claude", "token_created", true, None, GENESIS_HASH.to_string());
        entry.success = false;
        assert!(!entry.verify());
    }

    #[test]
    fn detail_round_trips_through_json() {
        let entry = AuditEntry::new(
            2,
            1001,
            "gemini",
            "task_claimed",
            true,
            Some("task-1".to_string()),
            "abc".to_string(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        let back: AuditEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry, back);
    }
}
