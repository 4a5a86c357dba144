//! The common shape every tool namespace handler implements.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::DispatchContext;

/// One group of related tools (e.g. `agent`, `lock`, `task`).
///
/// `dispatch` returns `None` when `name` is not one of this handler's
/// tools, letting the [`crate::dispatcher::Dispatcher`] try the next
/// handler in the chain. A recognized tool always returns `Some`, with
/// the inner `bool` reporting success and the `String` a short
/// human-readable summary — never an exception for domain failures.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Attempts to serve `name` against this handler's tools.
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)>;
}
