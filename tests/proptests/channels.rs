//! Property-based tests: channel registration and handler ordering
//!
//! # Coverage
//!
//! - **Never-added names:** a manager reports `has() == false` for every
//!   name it was not given, and `channel()` on such a name fails with the
//!   fallback disabled.
//! - **Order preservation:** a channel's logger carries its handlers and
//!   processors in configuration order, whatever mix of instance, key and
//!   structured entries is used.
//! - **Default selection:** the last channel added with `default` set is
//!   the default.

#[cfg(test)]
mod tests {
    use log_channels::logging::{NullHandler, StaticContextProcessor};
    use log_channels::{
        ChannelConfig, ChannelError, Factory, Handler, HandlerDefinition, HandlerSpec, Manager,
        Processor, ProcessorSpec, ServiceMap,
    };
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[derive(Debug, Clone, Copy)]
    enum EntryKind {
        Instance,
        Key,
        Structured,
    }

    fn entry_kind() -> impl Strategy<Value = EntryKind> {
        prop_oneof![
            Just(EntryKind::Instance),
            Just(EntryKind::Key),
            Just(EntryKind::Structured),
        ]
    }

    proptest! {
        /// **Property:** names never added are never reported.
        #[test]
        fn test_never_added_names(
            added in prop::collection::btree_set("[a-z]{1,8}", 0..8),
            probes in prop::collection::vec("[a-z]{1,8}", 1..16),
        ) {
            let manager = Manager::new();
            manager.use_emergency_channel(false);
            for name in &added {
                manager.add(name, ChannelConfig::new());
            }

            for probe in &probes {
                prop_assert_eq!(manager.has(probe), added.contains(probe));
                if !added.contains(probe) {
                    prop_assert_eq!(
                        manager.channel(Some(probe.as_str())).unwrap_err(),
                        ChannelError::Undefined(probe.clone())
                    );
                }
            }

            let names: BTreeSet<String> = manager.channel_names().into_iter().collect();
            prop_assert_eq!(names, added);
        }

        /// **Property:** handlers and processors keep configuration order.
        ///
        /// **Strategy:** every handler is a distinct `NullHandler` reached
        /// through a random entry kind; structured entries go through a
        /// catalog type that hands out the handler by index.
        #[test]
        fn test_order_is_preserved(
            kinds in prop::collection::vec(entry_kind(), 0..12),
            processor_count in 0usize..6,
        ) {
            let handlers: Vec<Arc<dyn Handler>> = kinds
                .iter()
                .map(|_| Arc::new(NullHandler::default()) as Arc<dyn Handler>)
                .collect();
            let processors: Vec<Arc<dyn Processor>> = (0..processor_count)
                .map(|i| {
                    let index = i.to_string();
                    Arc::new(StaticContextProcessor::new(&[("index", index.as_str())]))
                        as Arc<dyn Processor>
                })
                .collect();

            let mut services = ServiceMap::new();
            for (i, handler) in handlers.iter().enumerate() {
                services = services.with_handler(format!("handler.{}", i), Arc::clone(handler));
            }
            for (i, processor) in processors.iter().enumerate() {
                services = services.with_processor(format!("processor.{}", i), Arc::clone(processor));
            }

            let mut factory = Factory::with_locator(Arc::new(services));
            let by_index = handlers.clone();
            factory.catalog_mut().register("indexed", move |params, _formatter| {
                let index = params
                    .get("index")
                    .and_then(|v| v.as_u64())
                    .unwrap_or_default() as usize;
                Ok(Arc::clone(&by_index[index]))
            });

            let mut config = ChannelConfig::new();
            for (i, kind) in kinds.iter().enumerate() {
                let spec = match kind {
                    EntryKind::Instance => HandlerSpec::instance(Arc::clone(&handlers[i])),
                    EntryKind::Key => HandlerSpec::key(format!("handler.{}", i)),
                    EntryKind::Structured => {
                        HandlerDefinition::new("indexed").param("index", i as u64).into()
                    }
                };
                config = config.handler(spec);
            }
            for (i, processor) in processors.iter().enumerate() {
                config = config.processor(if i % 2 == 0 {
                    ProcessorSpec::instance(Arc::clone(processor))
                } else {
                    ProcessorSpec::key(format!("processor.{}", i))
                });
            }

            let logger = factory.create("ordered", &config).unwrap();
            prop_assert_eq!(logger.handlers().len(), handlers.len());
            for (built, expected) in logger.handlers().iter().zip(&handlers) {
                prop_assert!(Arc::ptr_eq(built, expected));
            }
            prop_assert_eq!(logger.processors().len(), processors.len());
            for (built, expected) in logger.processors().iter().zip(&processors) {
                prop_assert!(Arc::ptr_eq(built, expected));
            }
        }

        /// **Property:** the last channel flagged as default wins.
        #[test]
        fn test_last_default_flag_wins(flags in prop::collection::vec(any::<bool>(), 1..10)) {
            let manager = Manager::new();
            for (i, flag) in flags.iter().enumerate() {
                let config = ChannelConfig::new();
                manager.add(
                    &format!("channel{}", i),
                    if *flag { config.as_default() } else { config },
                );
            }

            let expected = flags
                .iter()
                .rposition(|flag| *flag)
                .map(|i| format!("channel{}", i));
            prop_assert_eq!(manager.get_default_channel(), expected);
        }
    }
}
