//! Deterministic clock, temp-dir-backed rooms, and entity builders.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use masc_core::Clock;
use masc_room::{Agent, AgentStatus, Room, Task, TaskStatus};
use masc_storage::FilesystemBackend;

/// A [`Clock`] whose time is set and advanced explicitly, for
/// deterministic rate-limiter, retry-backoff, and lock-expiry tests.
///
/// Starts at second 0 unless built with [`FakeClock::at`].
#[derive(Debug, Default)]
pub struct FakeClock {
    secs: AtomicU64,
}

impl FakeClock {
    /// A clock starting at `secs` seconds since the epoch.
    #[must_use]
    pub fn at(secs: u64) -> Self {
        Self { secs: AtomicU64::new(secs) }
    }

    /// Moves the clock forward by `delta` seconds.
    pub fn advance(&self, delta: u64) {
        self.secs.fetch_add(delta, Ordering::SeqCst);
    }

    /// Sets the clock to exactly `secs`.
    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_secs(&self) -> u64 {
        self.secs.load(Ordering::SeqCst)
    }
}

/// A [`Room`] over a [`FilesystemBackend`] rooted in a fresh
/// [`tempfile::TempDir`], with a real [`masc_core::SystemClock`].
///
/// Returns the directory alongside the room — drop order matters: the
/// directory must outlive every operation against the room, so keep the
/// `TempDir` bound in scope even though nothing reads it directly.
#[must_use]
pub fn temp_room() -> (tempfile::TempDir, Arc<Room>) {
    let dir = tempfile::tempdir().expect("create temp dir for test room");
    let backend = Arc::new(FilesystemBackend::new(dir.path()));
    let clock = Arc::new(masc_core::SystemClock);
    let room = Arc::new(Room::new(backend, clock));
    (dir, room)
}

/// A [`Room`] over a [`FilesystemBackend`] rooted in a fresh temp
/// directory, driven by the given `clock` instead of the real one —
/// for tests that need to control "now" (lock expiry, heartbeat
/// staleness).
#[must_use]
pub fn temp_room_with_clock(clock: Arc<dyn Clock>) -> (tempfile::TempDir, Arc<Room>) {
    let dir = tempfile::tempdir().expect("create temp dir for test room");
    let backend = Arc::new(FilesystemBackend::new(dir.path()));
    let room = Arc::new(Room::new(backend, clock));
    (dir, room)
}

/// An [`Agent`] fixture, active, with no declared capabilities, as of
/// second 0 — matches what `register_agent(name, [])` at `FakeClock::at(0)`
/// would persist.
#[must_use]
pub fn agent_fixture(name: &str) -> Agent {
    Agent {
        name: name.to_string(),
        status: AgentStatus::Active,
        capabilities: BTreeSet::new(),
        registered_at: 0,
        last_seen: 0,
    }
}

/// A `Todo` [`Task`] fixture with `id = "task-fixture"`, as of second 0.
#[must_use]
pub fn task_fixture(title: &str) -> Task {
    Task {
        id: "task-fixture".to_string(),
        title: title.to_string(),
        description: String::new(),
        priority: 0,
        status: TaskStatus::Todo,
        files: Vec::new(),
        created_at: 0,
        worktree: None,
    }
}

/// An empty [`masc_handover::HandoverDetails`] fixture, for tests that
/// only care about the headline `(from_agent, task_id, session_id,
/// reason)` and not the narrative fields.
#[must_use]
pub fn handover_details_fixture() -> masc_handover::HandoverDetails {
    masc_handover::HandoverDetails::default()
}
