//! Role/capability matrix and SHA-256 token lifecycle for masc-mcp.
//!
//! Three roles (`Reader`, `Worker`, `Admin`) map to seven capabilities
//! through a fixed matrix (see [`role_has_capability`]). [`AuthStore`]
//! persists a room's [`AuthConfig`] and per-agent [`Credential`]s over a
//! [`masc_storage::Backend`], hashing tokens with `masc-crypto` and never
//! storing the raw value.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod error;
pub mod matrix;
pub mod prelude;
pub mod store;
pub mod types;

pub use error::{AuthError, AuthResult};
pub use matrix::role_has_capability;
pub use store::AuthStore;
pub use types::{AuthConfig, Capability, Credential, Role};
