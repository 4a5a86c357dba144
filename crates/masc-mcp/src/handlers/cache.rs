//! `cache` tool group.
//!
//! A bounded in-memory LRU keyed by a caller-supplied string. `moka` isn't
//! part of the teacher's dependency set, so this hand-rolls the same
//! access-order eviction with a `HashMap` plus a `VecDeque` recording
//! recency, matching the cache usage pattern seen elsewhere in the
//! reference corpus without pulling in a new crate for it.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::{get_int_opt, get_string};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

const DEFAULT_CAPACITY: usize = 256;

struct LruCache {
    capacity: usize,
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

impl LruCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_string());
    }

    fn set(&mut self, key: String, value: String) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key.clone(), value);
        self.touch(&key);
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            self.touch(key);
        }
        value
    }
}

/// Handles the `cache` tool group.
pub struct CacheHandler {
    cache: Mutex<LruCache>,
}

impl CacheHandler {
    /// Creates a cache bounded to [`DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(LruCache::new(DEFAULT_CAPACITY)),
        }
    }
}

impl Default for CacheHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for CacheHandler {
    async fn dispatch(&self, _ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "cache_set" => {
                let key = get_string(args, "key", "");
                if key.is_empty() {
                    return Some((false, "key is required".to_string()));
                }
                let value = get_string(args, "value", "");
                self.cache.lock().unwrap_or_else(|e| e.into_inner()).set(key, value);
                Some((true, "cached".to_string()))
            }
            "cache_get" => {
                let key = get_string(args, "key", "");
                match self.cache.lock().unwrap_or_else(|e| e.into_inner()).get(&key) {
                    Some(value) => Some((true, value)),
                    None => Some((false, format!("no cached value for {key}"))),
                }
            }
            "cache_stats" => {
                let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
                let capacity = get_int_opt(args, "capacity").map(|_| cache.capacity).unwrap_or(cache.capacity);
                Some((
                    true,
                    json!({"entries": cache.entries.len(), "capacity": capacity}).to_string(),
                ))
            }
            _ => None,
        }
    }
}
