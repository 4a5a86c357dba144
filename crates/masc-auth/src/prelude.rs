//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_auth::prelude::*;
//! ```

pub use crate::{
    AuthConfig, AuthError, AuthResult, AuthStore, Capability, Credential, Role,
    role_has_capability,
};
