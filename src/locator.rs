// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Service locator capability consumed by the [`Factory`](crate::Factory).
//!
//! The locator is a two-method lookup: `has(key)` and `get(key)`. Values are
//! a closed set of services, one variant per configurable component kind.

use crate::logging::{Formatter, Handler, Processor};
use std::collections::HashMap;
use std::sync::Arc;

/// A component a locator can hand out
#[derive(Clone)]
pub enum Service {
    Handler(Arc<dyn Handler>),
    Processor(Arc<dyn Processor>),
    Formatter(Arc<dyn Formatter>),
}

impl Service {
    /// Component kind name, used in error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Service::Handler(_) => "handler",
            Service::Processor(_) => "processor",
            Service::Formatter(_) => "formatter",
        }
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Service::{}", self.kind())
    }
}

/// Minimal has/get lookup used to resolve configuration references
pub trait ServiceLocator: Send + Sync {
    fn has(&self, key: &str) -> bool;

    /// Returns `None` when `key` is absent
    fn get(&self, key: &str) -> Option<Service>;
}

/// Locator with no entries
///
/// Handed to factory callables when the [`Factory`](crate::Factory) has no
/// locator attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

impl ServiceLocator for NoLocator {
    fn has(&self, _key: &str) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Option<Service> {
        None
    }
}

/// `HashMap`-backed locator
#[derive(Debug, Clone, Default)]
pub struct ServiceMap {
    entries: HashMap<String, Service>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, service: Service) -> &mut Self {
        self.entries.insert(key.into(), service);
        self
    }

    pub fn with_handler(mut self, key: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        self.insert(key, Service::Handler(handler));
        self
    }

    pub fn with_processor(mut self, key: impl Into<String>, processor: Arc<dyn Processor>) -> Self {
        self.insert(key, Service::Processor(processor));
        self
    }

    pub fn with_formatter(mut self, key: impl Into<String>, formatter: Arc<dyn Formatter>) -> Self {
        self.insert(key, Service::Formatter(formatter));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ServiceLocator for ServiceMap {
    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Service> {
        self.entries.get(key).cloned()
    }
}

/// Conversion from a located [`Service`] to one concrete component kind
pub trait FromService: Sized {
    /// Kind name, matching [`Service::kind`]
    const KIND: &'static str;

    /// Returns the service back on a kind mismatch
    fn from_service(service: Service) -> Result<Self, Service>;
}

impl FromService for Arc<dyn Handler> {
    const KIND: &'static str = "handler";

    fn from_service(service: Service) -> Result<Self, Service> {
        match service {
            Service::Handler(handler) => Ok(handler),
            other => Err(other),
        }
    }
}

impl FromService for Arc<dyn Processor> {
    const KIND: &'static str = "processor";

    fn from_service(service: Service) -> Result<Self, Service> {
        match service {
            Service::Processor(processor) => Ok(processor),
            other => Err(other),
        }
    }
}

impl FromService for Arc<dyn Formatter> {
    const KIND: &'static str = "formatter";

    fn from_service(service: Service) -> Result<Self, Service> {
        match service {
            Service::Formatter(formatter) => Ok(formatter),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LineFormatter, NullHandler, PidProcessor};

    #[test]
    fn test_service_map_lookup() {
        let map = ServiceMap::new()
            .with_handler("handler.null", Arc::new(NullHandler::default()))
            .with_processor("processor.pid", Arc::new(PidProcessor));

        assert!(map.has("handler.null"));
        assert!(map.has("processor.pid"));
        assert!(!map.has("formatter.line"));
        assert!(map.get("formatter.line").is_none());
        assert_eq!(map.get("processor.pid").map(|s| s.kind()), Some("processor"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_no_locator_is_empty() {
        assert!(!NoLocator.has("anything"));
        assert!(NoLocator.get("anything").is_none());
    }

    #[test]
    fn test_from_service_kind_mismatch() {
        let service = Service::Formatter(Arc::new(LineFormatter));
        let rejected = <Arc<dyn Handler>>::from_service(service)
            .err()
            .expect("formatter is not a handler");
        assert_eq!(rejected.kind(), "formatter");

        let service = Service::Formatter(Arc::new(LineFormatter));
        assert!(<Arc<dyn Formatter>>::from_service(service).is_ok());
    }
}
