//! `worktree` tool group.
//!
//! A named working subdirectory under a configured base path, not a full
//! git-worktree checkout — no component in this workspace tracks
//! branches per task.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

use crate::args::get_string;
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

fn sanitize(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".." {
        None
    } else {
        Some(trimmed)
    }
}

/// Handles the `worktree` tool group.
pub struct WorktreeHandler {
    base_path: PathBuf,
}

impl WorktreeHandler {
    /// Creates a handler rooted at `base_path`. Directories are created
    /// lazily on first use.
    #[must_use]
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }
}

impl Default for WorktreeHandler {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join("masc-worktrees"))
    }
}

#[async_trait]
impl ToolHandler for WorktreeHandler {
    async fn dispatch(&self, _ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "worktree_create" => {
                let raw = get_string(args, "name", "");
                let Some(sanitized) = sanitize(&raw) else {
                    return Some((false, "name must be a non-empty path segment".to_string()));
                };
                let path = self.base_path.join(sanitized);
                match tokio::fs::create_dir_all(&path).await {
                    Ok(()) => Some((true, path.display().to_string())),
                    Err(e) => {
                        warn!(error = %e, name = sanitized, "failed to create worktree directory");
                        Some((false, e.to_string()))
                    }
                }
            }
            "worktree_list" => {
                let mut names = Vec::new();
                match tokio::fs::read_dir(&self.base_path).await {
                    Ok(mut entries) => {
                        while let Ok(Some(entry)) = entries.next_entry().await {
                            if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                                names.push(entry.file_name().to_string_lossy().into_owned());
                            }
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Some((false, e.to_string())),
                }
                Some((true, json!({"worktrees": names}).to_string()))
            }
            "worktree_remove" => {
                let raw = get_string(args, "name", "");
                let Some(sanitized) = sanitize(&raw) else {
                    return Some((false, "name must be a non-empty path segment".to_string()));
                };
                let path = self.base_path.join(sanitized);
                match tokio::fs::remove_dir_all(&path).await {
                    Ok(()) => Some((true, format!("removed {sanitized}"))),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Some((true, format!("{sanitized} did not exist"))),
                    Err(e) => Some((false, e.to_string())),
                }
            }
            "worktree_status" => Some((
                true,
                json!({"base_path": self.base_path.display().to_string()}).to_string(),
            )),
            _ => None,
        }
    }
}
