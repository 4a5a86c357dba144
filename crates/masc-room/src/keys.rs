//! Storage key layout, matching §6's persisted filesystem-backend paths.

pub fn agent_key(name: &str) -> String {
    format!("agents:{name}")
}

pub const AGENTS_PREFIX: &str = "agents:";

pub fn lock_key(resource: &str) -> String {
    format!("locks:{resource}")
}

pub const LOCKS_PREFIX: &str = "locks:";

pub fn message_key(seq: u64) -> String {
    format!("messages:{seq:020}")
}

pub const MESSAGES_PREFIX: &str = "messages:";
pub const NEXT_SEQ_KEY: &str = "messages:next_seq";

pub fn task_key(id: &str) -> String {
    format!("tasks:{id}")
}

pub fn task_claim_key(id: &str) -> String {
    format!("tasks:{id}:claim")
}

pub const TASKS_PREFIX: &str = "tasks:";

pub fn pause_key(scope: &str) -> String {
    format!("pauses:{scope}")
}

pub const ROOM_SCOPE: &str = "room";
