// SPDX-License-Identifier: Apache-2.0 OR MIT
// Log record passed from a logger through its processors to its handlers

use super::Severity;
use chrono::{DateTime, Utc};

/// Key-value pair for structured logging
#[derive(Clone, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    /// Create new key-value pair
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A single log record
///
/// Context pairs keep their insertion order; processors append to the end.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub severity: Severity,
    /// Name of the channel (logger) that produced the record
    pub channel: String,
    pub timestamp: DateTime<Utc>,
    pub process_id: u32,
    message: String,
    kvs: Vec<KeyValue>,
}

impl LogEntry {
    /// Create a new log entry stamped with the current time and process id
    pub fn new(severity: Severity, channel: &str, message: &str) -> Self {
        Self {
            severity,
            channel: channel.to_string(),
            timestamp: Utc::now(),
            process_id: std::process::id(),
            message: message.to_string(),
            kvs: Vec::new(),
        }
    }

    /// Create an entry carrying the given context pairs
    pub fn with_kvs(severity: Severity, channel: &str, message: &str, kvs: &[(&str, &str)]) -> Self {
        let mut entry = Self::new(severity, channel, message);
        for (key, value) in kvs {
            entry.add_kv(key, value);
        }
        entry
    }

    pub fn get_message(&self) -> &str {
        &self.message
    }

    /// Append a key-value pair
    pub fn add_kv(&mut self, key: &str, value: &str) {
        self.kvs.push(KeyValue::new(key, value));
    }

    /// Get key-value pairs in insertion order
    pub fn get_kvs(&self) -> &[KeyValue] {
        &self.kvs
    }

    /// Value of the first pair with the given key
    pub fn get_kv(&self, key: &str) -> Option<&str> {
        self.kvs
            .iter()
            .find(|kv| kv.key() == key)
            .map(KeyValue::value)
    }
}
