// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logging macros for convenient logging
//
// Each macro expands to the matching method call, so it works on a `Logger`
// (returns `()`) and on a `Manager` (returns `Result<(), ChannelError>`).

/// Log a message with emergency severity
///
/// # Examples
/// ```ignore
/// log_emergency!(logger, "System is down");
/// ```
#[macro_export]
macro_rules! log_emergency {
    ($logger:expr, $msg:expr) => {
        $logger.emergency($msg, &[])
    };
}

/// Log a message with alert severity
#[macro_export]
macro_rules! log_alert {
    ($logger:expr, $msg:expr) => {
        $logger.alert($msg, &[])
    };
}

/// Log a message with critical severity
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $msg:expr) => {
        $logger.critical($msg, &[])
    };
}

/// Log a message with error severity
///
/// # Examples
/// ```ignore
/// log_error!(logger, "Failed to open audit log");
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $msg:expr) => {
        $logger.error($msg, &[])
    };
}

/// Log a message with warning severity
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $msg:expr) => {
        $logger.warning($msg, &[])
    };
}

/// Log a message with notice severity
#[macro_export]
macro_rules! log_notice {
    ($logger:expr, $msg:expr) => {
        $logger.notice($msg, &[])
    };
}

/// Log a message with info severity
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $msg:expr) => {
        $logger.info($msg, &[])
    };
}

/// Log a message with debug severity
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $msg:expr) => {
        $logger.debug($msg, &[])
    };
}

/// Log a message with key-value pairs
///
/// # Examples
/// ```ignore
/// log_kv!(logger, Severity::Info, "Request served",
///         "user" => "alice", "status" => "200");
/// ```
#[macro_export]
macro_rules! log_kv {
    ($logger:expr, $severity:expr, $msg:expr, $($key:expr => $value:expr),+) => {{
        let kvs: &[(&str, &str)] = &[$(($key, $value)),+];
        $logger.log($severity, $msg, kvs)
    }};
}
