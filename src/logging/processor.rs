// SPDX-License-Identifier: Apache-2.0 OR MIT
// Processors transform an entry before it reaches the handlers

use super::entry::{KeyValue, LogEntry};

/// Transform applied to every entry of a logger, in registration order
pub trait Processor: Send + Sync {
    fn process(&self, entry: LogEntry) -> LogEntry;
}

/// Adds the `pid` of the emitting process
#[derive(Debug, Clone, Copy, Default)]
pub struct PidProcessor;

impl Processor for PidProcessor {
    fn process(&self, mut entry: LogEntry) -> LogEntry {
        let pid = entry.process_id.to_string();
        entry.add_kv("pid", &pid);
        entry
    }
}

/// Appends a fixed set of key-value pairs to every entry
#[derive(Debug, Clone, Default)]
pub struct StaticContextProcessor {
    kvs: Vec<KeyValue>,
}

impl StaticContextProcessor {
    pub fn new(kvs: &[(&str, &str)]) -> Self {
        Self {
            kvs: kvs.iter().map(|(k, v)| KeyValue::new(*k, *v)).collect(),
        }
    }
}

impl Processor for StaticContextProcessor {
    fn process(&self, mut entry: LogEntry) -> LogEntry {
        for kv in &self.kvs {
            entry.add_kv(kv.key(), kv.value());
        }
        entry
    }
}
