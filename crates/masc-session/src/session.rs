//! Per-connected-agent [`Session`]s: presence, a bounded inbound message
//! queue, and a rate tracker, all owned by [`SessionRegistry`].

use std::collections::VecDeque;
use std::sync::Arc;

use masc_ratelimit::RateTracker;
use tokio::sync::RwLock;

use crate::error::{SessionError, SessionResult};

/// Inbound messages queued for a session are capped; once full, the
/// oldest queued message is dropped to make room for the newest. Clients
/// are expected to poll promptly rather than rely on unbounded buffering.
pub const MAX_QUEUED_MESSAGES: usize = 256;

/// Outcome of [`SessionRegistry::enqueue`], telling the caller whether an
/// older message was silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The message was queued with room to spare.
    Queued,
    /// The queue was full; the oldest message was dropped to make room.
    QueuedDroppedOldest,
}

/// A snapshot of one connected agent's session state.
#[derive(Debug, Clone)]
pub struct Session {
    /// The agent this session belongs to.
    pub agent_name: String,
    /// Unix seconds at `register`.
    pub connected_at: u64,
    /// Unix seconds at the most recent activity (heartbeat or tool call).
    pub last_activity: u64,
    /// Whether the agent is currently long-polling for messages.
    pub is_listening: bool,
    /// Messages queued for delivery, oldest first.
    pub message_queue: VecDeque<String>,
}

impl Session {
    fn new(agent_name: impl Into<String>, now: u64) -> Self {
        Self {
            agent_name: agent_name.into(),
            connected_at: now,
            last_activity: now,
            is_listening: false,
            message_queue: VecDeque::new(),
        }
    }

    /// Renders a one-line human-readable presence summary.
    #[must_use]
    pub fn status_string(&self) -> String {
        format!(
            "{} (connected {}s ago, {} queued, listening={})",
            self.agent_name,
            self.last_activity.saturating_sub(self.connected_at),
            self.message_queue.len(),
            self.is_listening
        )
    }
}

struct Entry {
    session: Session,
    rate_tracker: Arc<RateTracker>,
}

/// The live set of connected agents: presence, message queues, and
/// per-agent rate trackers.
///
/// Internally synchronized so concurrent transports can register,
/// heartbeat, and enqueue messages for the same room without external
/// locking.
pub struct SessionRegistry {
    sessions: RwLock<std::collections::HashMap<String, Entry>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(std::collections::HashMap::new()),
        }
    }

    /// Registers (or re-registers) `agent_name`'s session, returning its
    /// rate tracker. Re-registering an already-connected agent resets its
    /// `last_activity` but preserves its queued messages.
    pub async fn register(&self, agent_name: &str, now: u64) -> Arc<RateTracker> {
        let mut guard = self.sessions.write().await;
        let entry = guard.entry(agent_name.to_string()).or_insert_with(|| Entry {
            session: Session::new(agent_name, now),
            rate_tracker: Arc::new(RateTracker::new()),
        });
        entry.session.last_activity = now;
        entry.rate_tracker.clone()
    }

    /// Records activity (a heartbeat or any tool call) for `agent_name`.
    pub async fn touch(&self, agent_name: &str, now: u64) -> SessionResult<()> {
        let mut guard = self.sessions.write().await;
        let entry = guard
            .get_mut(agent_name)
            .ok_or_else(|| SessionError::AgentNotFound(agent_name.to_string()))?;
        entry.session.last_activity = now;
        Ok(())
    }

    /// Removes `agent_name`'s session entirely.
    pub async fn remove(&self, agent_name: &str) {
        self.sessions.write().await.remove(agent_name);
    }

    /// Returns a snapshot of `agent_name`'s session.
    pub async fn get(&self, agent_name: &str) -> SessionResult<Session> {
        self.sessions
            .read()
            .await
            .get(agent_name)
            .map(|e| e.session.clone())
            .ok_or_else(|| SessionError::AgentNotFound(agent_name.to_string()))
    }

    /// Returns `agent_name`'s rate tracker, if connected.
    pub async fn rate_tracker(&self, agent_name: &str) -> Option<Arc<RateTracker>> {
        self.sessions.read().await.get(agent_name).map(|e| e.rate_tracker.clone())
    }

    /// Sets the listening flag for `agent_name`.
    pub async fn set_listening(&self, agent_name: &str, listening: bool) -> SessionResult<()> {
        let mut guard = self.sessions.write().await;
        let entry = guard
            .get_mut(agent_name)
            .ok_or_else(|| SessionError::AgentNotFound(agent_name.to_string()))?;
        entry.session.is_listening = listening;
        Ok(())
    }

    /// Appends `message` to `agent_name`'s queue, dropping the oldest
    /// queued message if the queue is already at
    /// [`MAX_QUEUED_MESSAGES`].
    pub async fn enqueue(&self, agent_name: &str, message: String) -> SessionResult<EnqueueOutcome> {
        let mut guard = self.sessions.write().await;
        let entry = guard
            .get_mut(agent_name)
            .ok_or_else(|| SessionError::AgentNotFound(agent_name.to_string()))?;
        let queue = &mut entry.session.message_queue;
        if queue.len() >= MAX_QUEUED_MESSAGES {
            queue.pop_front();
            queue.push_back(message);
            return Ok(EnqueueOutcome::QueuedDroppedOldest);
        }
        queue.push_back(message);
        Ok(EnqueueOutcome::Queued)
    }

    /// Drains and returns all queued messages for `agent_name`.
    pub async fn drain(&self, agent_name: &str) -> SessionResult<Vec<String>> {
        let mut guard = self.sessions.write().await;
        let entry = guard
            .get_mut(agent_name)
            .ok_or_else(|| SessionError::AgentNotFound(agent_name.to_string()))?;
        Ok(entry.session.message_queue.drain(..).collect())
    }

    /// Lists the names of all currently connected agents.
    pub async fn connected_agents(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
