//! Rate-limit categories and the room-wide tuning knobs.

use serde::{Deserialize, Serialize};

/// The three independently-windowed operation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Any tool call not covered by a more specific category.
    General,
    /// `broadcast` calls.
    Broadcast,
    /// `claim_task`/`complete_task`/`cancel_task` calls.
    TaskOps,
}

impl Category {
    /// All categories, in a stable order.
    pub const ALL: [Category; 3] = [Category::General, Category::Broadcast, Category::TaskOps];
}

/// Room-wide rate limit tuning, read from `masc.rate.*` configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Max `General` events per window.
    pub general_limit: u32,
    /// Max `Broadcast` events per window.
    pub broadcast_limit: u32,
    /// Max `TaskOps` events per window.
    pub task_ops_limit: u32,
    /// Sliding window width in seconds, shared by all categories.
    pub window_sec: u64,
    /// Extra events allowed once the window limit is hit, consumed from a
    /// bucket that refills every `burst_window_sec`.
    pub burst_limit: u32,
    /// Burst bucket refill period in seconds.
    pub burst_window_sec: u64,
}

impl RateLimitConfig {
    /// The per-category window limit.
    #[must_use]
    pub fn limit(&self, category: Category) -> u32 {
        match category {
            Category::General => self.general_limit,
            Category::Broadcast => self.broadcast_limit,
            Category::TaskOps => self.task_ops_limit,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_limit: 60,
            broadcast_limit: 20,
            task_ops_limit: 30,
            window_sec: 60,
            burst_limit: 10,
            burst_window_sec: 10,
        }
    }
}
