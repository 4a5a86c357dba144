//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_storage::prelude::*;
//! ```

pub use crate::{Backend, FilesystemBackend, HealthStatus, MemoryBackend, StorageError, StorageResult};
