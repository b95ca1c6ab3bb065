// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Manager behaviour through the public API: registration, lazy build and
//! caching, default selection, emergency fallback and the level proxies.

use log_channels::logging::{PidProcessor, Processor};
use log_channels::{
    log_info, log_kv, ChannelConfig, ChannelError, Factory, Handler, HandlerSpec, Manager,
    ProcessorSpec, ServiceMap, Severity, TestHandler, EMERGENCY_CHANNEL,
};
use std::sync::Arc;
use std::thread;

fn capture() -> Arc<TestHandler> {
    Arc::new(TestHandler::new())
}

fn channel_to(handler: &Arc<TestHandler>) -> ChannelConfig {
    ChannelConfig::new().handler(Arc::clone(handler) as Arc<dyn Handler>)
}

fn manager_with_captured_emergency(emergency: &Arc<TestHandler>) -> Manager {
    Manager::new().with_emergency_config(channel_to(emergency))
}

#[test]
fn test_unknown_names_are_not_reported() {
    let manager = Manager::new();
    assert!(!manager.has("app"));
    assert!(!manager.has(EMERGENCY_CHANNEL));
    assert!(manager.channel_names().is_empty());
    assert_eq!(manager.get_default_channel(), None);
}

#[test]
fn test_add_chain_and_default_flag() {
    let handler = capture();
    let manager = Manager::new();
    manager
        .add("app", channel_to(&handler))
        .add("audit", channel_to(&handler).as_default())
        .add("db", channel_to(&handler));

    assert_eq!(manager.channel_names(), ["app", "audit", "db"]);
    assert_eq!(manager.get_default_channel().as_deref(), Some("audit"));

    manager.set_default_channel("db");
    assert_eq!(manager.channel(None).unwrap().name(), "db");
}

#[test]
fn test_readding_does_not_replace_cached_logger() {
    let first_handler = capture();
    let second_handler = capture();
    let manager = Manager::new();
    manager.add("app", channel_to(&first_handler));

    let before = manager.channel(Some("app")).unwrap();
    manager.add("app", channel_to(&second_handler));
    let after = manager.channel(Some("app")).unwrap();
    assert!(Arc::ptr_eq(&before, &after));

    after.info("still routed to the first handler", &[]);
    assert!(first_handler.has_info("still routed to the first handler"));
    assert!(second_handler.records().is_empty());

    manager.forget("app");
    manager
        .channel(Some("app"))
        .unwrap()
        .info("routed to the second handler", &[]);
    assert!(second_handler.has_info("routed to the second handler"));
}

#[test]
fn test_disabled_fallback_propagates_errors() {
    let manager = Manager::new();
    manager.use_emergency_channel(false);
    assert!(!manager.is_using_emergency_channel());

    assert_eq!(manager.channel(None).unwrap_err(), ChannelError::NoDefault);
    assert_eq!(
        manager.channel(Some("missing")).unwrap_err().to_string(),
        "Channel \"missing\" is not defined"
    );
    assert!(!manager.has(EMERGENCY_CHANNEL));
}

#[test]
fn test_fallback_never_fails_and_becomes_default() {
    let emergency = capture();
    let manager = manager_with_captured_emergency(&emergency);

    let logger = manager.channel(Some("missing")).unwrap();
    assert_eq!(logger.name(), EMERGENCY_CHANNEL);
    assert!(manager.has(EMERGENCY_CHANNEL));
    assert_eq!(manager.get_default_channel().as_deref(), Some(EMERGENCY_CHANNEL));

    // The default now resolves, so nothing further is reported
    let default = manager.channel(None).unwrap();
    assert!(Arc::ptr_eq(&logger, &default));
    assert_eq!(emergency.records().len(), 1);
    assert!(emergency.has_emergency("Error encountered, using fallback emergency logger"));
}

#[test]
fn test_resolution_failure_reported_on_emergency_channel() {
    let emergency = capture();
    let manager = manager_with_captured_emergency(&emergency);
    manager.add(
        "app",
        ChannelConfig::new()
            .handler(HandlerSpec::key("handler.missing"))
            .as_default(),
    );

    manager.info("lost", &[]).unwrap();

    let records = emergency.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].severity, Severity::Emergency);
    assert_eq!(
        records[0].get_kv("exception"),
        Some("Could not resolve \"handler.missing\"")
    );
    assert_eq!(records[1].get_message(), "lost");
    assert_eq!(records[1].channel, EMERGENCY_CHANNEL);
}

#[test]
fn test_proxies_match_direct_logger_calls() {
    let via_manager = capture();
    let direct = capture();
    let manager = Manager::new();
    manager.add("app", channel_to(&via_manager).as_default());
    manager.add("other", channel_to(&direct));

    let logger = manager.channel(Some("other")).unwrap();
    for severity in Severity::ALL {
        manager.log(severity, "same", &[("k", "v")]).unwrap();
        logger.log(severity, "same", &[("k", "v")]);
    }

    let a = via_manager.records();
    let b = direct.records();
    assert_eq!(a.len(), 8);
    assert_eq!(a.len(), b.len());
    for (left, right) in a.iter().zip(b.iter()) {
        assert_eq!(left.severity, right.severity);
        assert_eq!(left.get_message(), right.get_message());
        assert_eq!(left.get_kvs(), right.get_kvs());
    }
}

#[test]
fn test_macros_work_on_manager() {
    let handler = capture();
    let manager = Manager::new();
    manager.add("app", channel_to(&handler).as_default());

    assert!(log_info!(manager, "via macro").is_ok());
    let result = log_kv!(manager, Severity::Notice, "with context", "user" => "alice");
    assert!(result.is_ok());

    assert!(handler.has_info("via macro"));
    assert_eq!(handler.records()[1].get_kv("user"), Some("alice"));
}

#[test]
fn test_processors_run_for_managed_channels() {
    let handler = capture();
    let services = ServiceMap::new().with_processor("processor.pid", Arc::new(PidProcessor));
    let manager = Manager::with_factory(Factory::with_locator(Arc::new(services)));
    manager.add(
        "app",
        channel_to(&handler)
            .processor(ProcessorSpec::key("processor.pid"))
            .processor(ProcessorSpec::instance(Arc::new(PidProcessor) as Arc<dyn Processor>))
            .as_default(),
    );

    manager.warning("tagged", &[]).unwrap();
    let pid = std::process::id().to_string();
    let records = handler.records();
    let record = &records[0];
    assert_eq!(record.get_kv("pid"), Some(pid.as_str()));
    assert_eq!(record.get_kvs().len(), 2);
}

#[test]
fn test_concurrent_requests_build_channel_once() {
    let handler = capture();
    let manager = Arc::new(Manager::new());
    manager.add("app", channel_to(&handler));

    let loggers: Vec<_> = (0..8)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.channel(Some("app")).unwrap())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|t| t.join().unwrap())
        .collect();

    for logger in &loggers[1..] {
        assert!(Arc::ptr_eq(&loggers[0], logger));
    }
}

#[test]
fn test_with_channel_forwards_other_operations() {
    let handler = capture();
    let manager = Manager::new();
    manager.add("app", channel_to(&handler).as_default());

    let count = manager
        .with_channel(|logger| logger.handlers().len())
        .unwrap();
    assert_eq!(count, 1);
}
