//! `walph` tool group.
//!
//! A namespaced key/value scratchpad for ad hoc agent-to-agent notes that
//! don't fit the `Message` or `PlanningContext` shapes. Process-local, not
//! `Backend`-persisted: `masc_room::Room` keeps its backend handle private
//! to the crate, so this keeps its own small table rather than threading a
//! second storage handle through every dispatch context.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::get_string;
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `walph` tool group.
pub struct WalphHandler {
    entries: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl WalphHandler {
    /// Creates an empty scratchpad.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WalphHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for WalphHandler {
    async fn dispatch(&self, _ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "walph_set" => {
                let namespace = get_string(args, "namespace", "default");
                let key = get_string(args, "key", "");
                if key.is_empty() {
                    return Some((false, "key is required".to_string()));
                }
                let value = get_string(args, "value", "");
                let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
                entries.entry(namespace).or_default().insert(key, value);
                Some((true, "stored".to_string()))
            }
            "walph_get" => {
                let namespace = get_string(args, "namespace", "default");
                let key = get_string(args, "key", "");
                let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
                match entries.get(&namespace).and_then(|ns| ns.get(&key)) {
                    Some(value) => Some((true, value.clone())),
                    None => Some((false, format!("no value for {namespace}:{key}"))),
                }
            }
            "walph_list" => {
                let namespace = get_string(args, "namespace", "default");
                let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
                let keys: Vec<&String> = entries.get(&namespace).map(|ns| ns.keys().collect()).unwrap_or_default();
                Some((true, json!({"namespace": namespace, "keys": keys}).to_string()))
            }
            "walph_status" => {
                let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
                let total_keys: usize = entries.values().map(HashMap::len).sum();
                Some((
                    true,
                    json!({"namespaces": entries.len(), "keys": total_keys}).to_string(),
                ))
            }
            _ => None,
        }
    }
}
