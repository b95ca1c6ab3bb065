// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Factory: turns a [`ChannelConfig`] into a wired [`Logger`].
//!
//! With a service locator attached, string keys are looked up with
//! `has`/`get`; callables and invokable types are called with the locator.
//! Without one, no key lookup is attempted: only literal instances and
//! directly-invokable callables can be used, and a key is unresolvable.
//!
//! Resolution is fail-fast: the first entry that cannot be resolved aborts
//! the whole `create` and no logger is returned.

use crate::channel::{ChannelConfig, FormatterSpec, HandlerSpec, ProcessorSpec, Reference};
use crate::error::ResolutionError;
use crate::locator::{FromService, NoLocator, ServiceLocator};
use crate::logging::{Formatter, Handler, HandlerCatalog, Logger, Processor};
use std::sync::Arc;

/// Builds channel loggers from configuration
#[derive(Clone, Default)]
pub struct Factory {
    locator: Option<Arc<dyn ServiceLocator>>,
    catalog: HandlerCatalog,
}

impl Factory {
    /// Factory without a locator and with the built-in handler catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locator(locator: Arc<dyn ServiceLocator>) -> Self {
        Self {
            locator: Some(locator),
            catalog: HandlerCatalog::new(),
        }
    }

    /// Replace the catalog used for structured handler entries
    pub fn with_catalog(mut self, catalog: HandlerCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Attach, replace or (with `None`) detach the service locator
    pub fn use_locator(&mut self, locator: Option<Arc<dyn ServiceLocator>>) {
        self.locator = locator;
    }

    pub fn has_locator(&self) -> bool {
        self.locator.is_some()
    }

    pub fn catalog(&self) -> &HandlerCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut HandlerCatalog {
        &mut self.catalog
    }

    /// Build the logger `name` from `config`
    pub fn create(&self, name: &str, config: &ChannelConfig) -> Result<Logger, ResolutionError> {
        let locator: &dyn ServiceLocator = match &self.locator {
            Some(locator) => locator.as_ref(),
            None => &NoLocator,
        };

        let handlers = config
            .handlers
            .iter()
            .map(|spec| self.resolve_handler(spec, locator))
            .collect::<Result<Vec<_>, _>>()?;

        let processors = config
            .processors
            .iter()
            .map(|spec| resolve_processor(spec, locator))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Logger::new(name, handlers, processors))
    }

    fn resolve_handler(
        &self,
        spec: &HandlerSpec,
        locator: &dyn ServiceLocator,
    ) -> Result<Arc<dyn Handler>, ResolutionError> {
        match spec {
            HandlerSpec::Instance(handler) => Ok(Arc::clone(handler)),
            HandlerSpec::Reference(reference) => resolve(reference, locator),
            HandlerSpec::Structured(definition) => {
                let formatter = definition
                    .formatter
                    .as_ref()
                    .map(|formatter| resolve_formatter(formatter, locator))
                    .transpose()?;
                self.catalog
                    .build(&definition.name, &definition.params, formatter)
            }
        }
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("has_locator", &self.has_locator())
            .field("catalog", &self.catalog)
            .finish()
    }
}

fn resolve_processor(
    spec: &ProcessorSpec,
    locator: &dyn ServiceLocator,
) -> Result<Arc<dyn Processor>, ResolutionError> {
    match spec {
        ProcessorSpec::Instance(processor) => Ok(Arc::clone(processor)),
        ProcessorSpec::Reference(reference) => resolve(reference, locator),
    }
}

fn resolve_formatter(
    spec: &FormatterSpec,
    locator: &dyn ServiceLocator,
) -> Result<Arc<dyn Formatter>, ResolutionError> {
    match spec {
        FormatterSpec::Instance(formatter) => Ok(Arc::clone(formatter)),
        FormatterSpec::Reference(reference) | FormatterSpec::Named(reference) => {
            resolve(reference, locator)
        }
    }
}

/// Locator key first, then invocation; anything else is unresolvable
fn resolve<T: FromService>(
    reference: &Reference<T>,
    locator: &dyn ServiceLocator,
) -> Result<T, ResolutionError> {
    match reference {
        Reference::Key(key) if locator.has(key) => {
            let service = locator
                .get(key)
                .ok_or_else(|| ResolutionError::Unresolvable(key.clone()))?;
            T::from_service(service).map_err(|found| ResolutionError::WrongKind {
                reference: key.clone(),
                expected: T::KIND,
                found: found.kind(),
            })
        }
        Reference::Key(key) => Err(ResolutionError::Unresolvable(key.clone())),
        Reference::Callable(f) => Ok(f(locator)),
        Reference::Invokable { invoke, .. } => Ok(invoke(locator)),
    }
}
