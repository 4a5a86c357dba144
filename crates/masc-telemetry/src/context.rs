//! Per-request correlation context.
//!
//! Tool handlers open a [`RequestContext`] at dispatch entry so every log
//! line emitted while serving one JSON-RPC request carries the same
//! `request_id`, `component`, and `operation` fields, and drop the
//! returned [`RequestGuard`] at reply time.

use tracing::Span;
use uuid::Uuid;

/// A correlation context for one inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    component: String,
    operation: Option<String>,
    request_id: String,
}

impl RequestContext {
    /// Starts a context for `component` (e.g. a tool namespace), with a
    /// freshly generated `request_id`.
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            operation: None,
            request_id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Records the operation name (e.g. a tool name) on this context.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// The correlation id every log line under this context carries.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Builds (but does not enter) the `tracing::Span` for this context.
    #[must_use]
    pub fn span(&self) -> Span {
        match &self.operation {
            Some(operation) => tracing::info_span!(
                "request",
                request_id = %self.request_id,
                component = %self.component,
                operation = %operation,
            ),
            None => tracing::info_span!(
                "request",
                request_id = %self.request_id,
                component = %self.component,
            ),
        }
    }

    /// Enters this context's span, returning a guard that exits it on
    /// drop. Equivalent to `self.span().entered()` wrapped for callers
    /// who want an owned type rather than a borrowed `Entered<'_>`.
    #[must_use]
    pub fn enter(&self) -> RequestGuard {
        RequestGuard { span: self.span() }
    }
}

/// Holds a [`RequestContext`]'s span open until dropped.
pub struct RequestGuard {
    span: Span,
}

impl RequestGuard {
    /// The held span, for callers that need to attach further fields.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        let a = RequestContext::new("agent");
        let b = RequestContext::new("agent");
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn with_operation_is_chainable() {
        let ctx = RequestContext::new("task").with_operation("claim_task");
        let _guard = ctx.enter();
    }
}
