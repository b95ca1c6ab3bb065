// SPDX-License-Identifier: Apache-2.0 OR MIT
// Formatters turn a log entry into the text a handler writes

use super::entry::LogEntry;

/// Converts a log entry into its final serialized form
pub trait Formatter: Send + Sync {
    /// Render one entry, without a trailing newline
    fn format(&self, entry: &LogEntry) -> String;
}

/// Plain text formatter
///
/// Format: `[SEVERITY] [channel] message key1=value1 key2=value2`
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormatter;

impl Formatter for LineFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        let kvs = entry.get_kvs();
        if kvs.is_empty() {
            format!(
                "[{}] [{}] {}",
                entry.severity,
                entry.channel,
                entry.get_message()
            )
        } else {
            let kv_str: Vec<String> = kvs.iter().map(|kv| format!("{:?}", kv)).collect();
            format!(
                "[{}] [{}] {} {}",
                entry.severity,
                entry.channel,
                entry.get_message(),
                kv_str.join(" ")
            )
        }
    }
}

/// One JSON object per entry
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        let context: serde_json::Map<String, serde_json::Value> = entry
            .get_kvs()
            .iter()
            .map(|kv| (kv.key().to_string(), serde_json::Value::from(kv.value())))
            .collect();

        let log_msg = serde_json::json!({
            "timestamp": entry.timestamp.to_rfc3339(),
            "level": entry.severity.as_str(),
            "channel": entry.channel,
            "pid": entry.process_id,
            "message": entry.get_message(),
            "context": context,
        });
        log_msg.to_string()
    }
}
