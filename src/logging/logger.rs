// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logger: a named, fully wired set of processors and handlers

use super::entry::LogEntry;
use super::handler::Handler;
use super::processor::Processor;
use super::Severity;
use std::sync::Arc;

/// A channel's logger
///
/// Entries pass through the processors in order, then are offered to every
/// handler in order. A handler only receives entries it reports as handled.
pub struct Logger {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<Arc<dyn Processor>>,
}

impl Logger {
    pub fn new(
        name: &str,
        handlers: Vec<Arc<dyn Handler>>,
        processors: Vec<Arc<dyn Processor>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            handlers,
            processors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handlers in write order
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Processors in application order
    pub fn processors(&self) -> &[Arc<dyn Processor>] {
        &self.processors
    }

    /// Write a log entry with key-value context
    pub fn log(&self, severity: Severity, message: &str, context: &[(&str, &str)]) {
        if !self.handlers.iter().any(|h| h.is_handling(severity)) {
            return;
        }

        let mut entry = LogEntry::with_kvs(severity, &self.name, message, context);
        for processor in &self.processors {
            entry = processor.process(entry);
        }

        for handler in &self.handlers {
            if handler.is_handling(severity) {
                handler.handle(&entry);
            }
        }
    }

    /// Log with emergency severity
    #[inline]
    pub fn emergency(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Emergency, message, context);
    }

    /// Log with alert severity
    #[inline]
    pub fn alert(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Alert, message, context);
    }

    /// Log with critical severity
    #[inline]
    pub fn critical(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Critical, message, context);
    }

    /// Log with error severity
    #[inline]
    pub fn error(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Error, message, context);
    }

    /// Log with warning severity
    #[inline]
    pub fn warning(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Warning, message, context);
    }

    /// Log with notice severity
    #[inline]
    pub fn notice(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Notice, message, context);
    }

    /// Log with info severity
    #[inline]
    pub fn info(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Info, message, context);
    }

    /// Log with debug severity
    #[inline]
    pub fn debug(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Severity::Debug, message, context);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .field("processors", &self.processors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{NullHandler, StaticContextProcessor, TestHandler};

    fn create_test_logger() -> (Logger, Arc<TestHandler>) {
        let handler = Arc::new(TestHandler::new());
        let logger = Logger::new("test", vec![handler.clone() as Arc<dyn Handler>], vec![]);
        (logger, handler)
    }

    #[test]
    fn test_severity_helpers() {
        let (logger, handler) = create_test_logger();

        logger.emergency("Emergency", &[]);
        logger.alert("Alert", &[]);
        logger.critical("Critical", &[]);
        logger.error("Error", &[("code", "42")]);
        logger.warning("Warning", &[]);
        logger.notice("Notice", &[]);
        logger.info("Info", &[]);
        logger.debug("Debug", &[]);

        let seen: Vec<Severity> = handler.records().iter().map(|e| e.severity).collect();
        assert_eq!(seen, Severity::ALL);
        assert!(handler.records().iter().all(|e| e.channel == "test"));
        assert_eq!(handler.records()[3].get_kv("code"), Some("42"));
    }

    #[test]
    fn test_logger_with_kvs() {
        let (logger, handler) = create_test_logger();
        logger.log(
            Severity::Info,
            "Test with context",
            &[("user", "0"), ("request", "1")],
        );

        let records = handler.records();
        assert_eq!(records[0].get_kv("user"), Some("0"));
        assert_eq!(records[0].get_kv("request"), Some("1"));
    }

    #[test]
    fn test_processors_run_in_order() {
        let handler = Arc::new(TestHandler::new());
        let logger = Logger::new(
            "test",
            vec![handler.clone() as Arc<dyn Handler>],
            vec![
                Arc::new(StaticContextProcessor::new(&[("step", "first")])),
                Arc::new(StaticContextProcessor::new(&[("step", "second")])),
            ],
        );
        logger.info("hello", &[]);

        let records = handler.records();
        let steps: Vec<&str> = records[0].get_kvs().iter().map(|kv| kv.value()).collect();
        assert_eq!(steps, ["first", "second"]);
    }

    #[test]
    fn test_handler_level_filtering() {
        let capture = Arc::new(TestHandler::new());
        let logger = Logger::new(
            "test",
            vec![
                Arc::new(NullHandler::new(Severity::Error)) as Arc<dyn Handler>,
                capture.clone() as Arc<dyn Handler>,
            ],
            vec![],
        );
        logger.warning("still captured", &[]);
        assert!(capture.has_warning("still captured"));
    }

    #[test]
    fn test_logger_without_handlers_is_silent() {
        let logger = Logger::new("empty", vec![], vec![]);
        logger.emergency("nobody listens", &[]);
        assert_eq!(logger.name(), "empty");
        assert!(logger.handlers().is_empty());
    }
}
