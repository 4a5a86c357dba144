use thiserror::Error;

/// Errors from token verification and permission checks.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token was supplied where one was required.
    #[error("unauthorized: no token supplied")]
    Unauthorized,

    /// A valid, unexpired token was supplied, but its role does not grant
    /// the requested capability.
    #[error("forbidden: {agent} (role {role:?}) lacks {capability:?}")]
    Forbidden {
        /// The agent making the request.
        agent: String,
        /// Role the agent currently holds.
        role: crate::types::Role,
        /// Capability that was required.
        capability: crate::types::Capability,
    },

    /// The supplied raw token did not hash to the stored credential.
    #[error("invalid token for agent {0}")]
    InvalidToken(String),

    /// The credential exists and the hash matched, but it has expired.
    #[error("expired token for agent {0}")]
    ExpiredToken(String),

    /// A key was not the required length (32 bytes for an envelope key).
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// No credential is on file for the given agent.
    #[error("no credential for agent {0}")]
    AgentNotFound(String),

    /// The underlying storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] masc_storage::StorageError),
}

/// Convenience alias for fallible auth operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
