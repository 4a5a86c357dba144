//! Library half of the `masc-server` binary: wiring a [`masc_mcp::DispatchContext`]
//! from loaded configuration, and a transport loop driving it over stdio.
//!
//! `main.rs` is deliberately thin — it parses arguments, sets up logging,
//! loads configuration, and calls into [`context::build_dispatch_context`]
//! and [`transport::serve_stdio`]. Keeping the wiring in the library half
//! lets the integration tests in `tests/` drive a real [`masc_mcp::Dispatcher`]
//! without spawning a subprocess.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod context;
pub mod transport;

pub use context::build_dispatch_context;
pub use transport::serve_stdio;
