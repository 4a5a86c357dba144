//! Shared test fixtures for the masc-mcp workspace.
//!
//! This crate provides a deterministic clock and a handful of
//! ready-to-use entity builders so rate-limiter, retry, and lock-expiry
//! tests across the workspace don't each reinvent them.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! masc-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use masc_test::{FakeClock, agent_fixture, temp_room};
//!
//!     #[tokio::test]
//!     async fn registering_sets_presence() {
//!         let (_dir, room) = temp_room();
//!         let agent = room.register_agent("claude", Default::default()).await.unwrap();
//!         assert_eq!(agent, agent_fixture("claude"));
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;

pub use fixtures::{FakeClock, agent_fixture, handover_details_fixture, task_fixture, temp_room};
