//! Roles, capabilities, and the persisted auth types.

use serde::{Deserialize, Serialize};

/// A role assigned to an agent's credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can only read room state.
    Reader,
    /// Can read state, claim tasks, lock files, and broadcast.
    Worker,
    /// Everything a Worker can do, plus init/reset/approve.
    Admin,
}

/// A gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read room state (agents, tasks, messages).
    ReadState,
    /// Claim or complete a task.
    ClaimTask,
    /// Acquire or release a file lock.
    LockFile,
    /// Send a broadcast message.
    Broadcast,
    /// Initialize or reset room state.
    Init,
    /// Reset room state.
    Reset,
    /// Approve a pending action.
    Approve,
}

/// Room-wide authentication configuration.
///
/// Default is fully permissive: `{enabled: false, require_token: false,
/// token_expiry_hours: 24}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Whether the auth layer is enforced at all.
    pub enabled: bool,
    /// Whether `check_permission` requires a token even for capabilities
    /// every role grants.
    pub require_token: bool,
    /// Credential lifetime in hours from issuance.
    pub token_expiry_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            require_token: false,
            token_expiry_hours: 24,
        }
    }
}

/// A persisted, hashed credential for one agent.
///
/// The raw token is never stored; only `token_hash` (SHA-256 hex) is
/// written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The agent this credential belongs to.
    pub agent_name: String,
    /// The role this credential grants.
    pub role: Role,
    /// SHA-256 hex digest of the raw token.
    pub token_hash: String,
    /// Unix seconds at issuance.
    pub created_at: u64,
    /// Unix seconds after which the credential is no longer valid.
    pub expires_at: u64,
}
