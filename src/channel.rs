// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Channel configuration: what a channel's logger is built from.
//!
//! Every handler, processor and formatter entry is one of a closed set of
//! variants, decided when the configuration is built or decoded:
//!
//! - a literal instance, used as-is;
//! - a [`Reference`]: a service-locator key, an inline callable, or a named
//!   zero-argument [`Invokable`] type;
//! - for handlers, a structured [`HandlerDefinition`] built by the
//!   [`HandlerCatalog`](crate::HandlerCatalog); for formatters, a `{name}`
//!   form wrapping a reference.

use crate::locator::ServiceLocator;
use crate::logging::{Formatter, Handler, Processor};
use std::sync::Arc;

/// Construction parameters for a structured handler
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Inline factory, invoked with the locator as its single argument
pub type Callable<T> = Arc<dyn Fn(&dyn ServiceLocator) -> T + Send + Sync>;

/// A type whose default value builds a component when invoked
pub trait Invokable<T>: Default {
    fn invoke(&self, locator: &dyn ServiceLocator) -> T;
}

/// Reference to a component that must be resolved before use
pub enum Reference<T> {
    /// Service-locator key
    Key(String),
    Callable(Callable<T>),
    /// Named zero-argument factory type
    Invokable {
        type_name: &'static str,
        invoke: fn(&dyn ServiceLocator) -> T,
    },
}

fn invoke_default<I: Invokable<T>, T>(locator: &dyn ServiceLocator) -> T {
    I::default().invoke(locator)
}

impl<T> Reference<T> {
    pub fn key(key: impl Into<String>) -> Self {
        Reference::Key(key.into())
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&dyn ServiceLocator) -> T + Send + Sync + 'static,
    {
        Reference::Callable(Arc::new(f))
    }

    pub fn invokable<I: Invokable<T> + 'static>() -> Self {
        Reference::Invokable {
            type_name: std::any::type_name::<I>(),
            invoke: invoke_default::<I, T>,
        }
    }
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        match self {
            Reference::Key(key) => Reference::Key(key.clone()),
            Reference::Callable(f) => Reference::Callable(Arc::clone(f)),
            Reference::Invokable { type_name, invoke } => Reference::Invokable {
                type_name: *type_name,
                invoke: *invoke,
            },
        }
    }
}

/// String form used in error messages
impl<T> std::fmt::Display for Reference<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Key(key) => write!(f, "{}", key),
            Reference::Callable(_) => write!(f, "<closure>"),
            Reference::Invokable { type_name, .. } => write!(f, "{}", type_name),
        }
    }
}

impl<T> std::fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Key(key) => write!(f, "Key({:?})", key),
            Reference::Callable(_) => write!(f, "Callable"),
            Reference::Invokable { type_name, .. } => write!(f, "Invokable({})", type_name),
        }
    }
}

/// How a formatter is specified
#[derive(Clone)]
pub enum FormatterSpec {
    Instance(Arc<dyn Formatter>),
    Reference(Reference<Arc<dyn Formatter>>),
    /// Map form `{name: ...}`; only `name` is used
    Named(Reference<Arc<dyn Formatter>>),
}

impl std::fmt::Debug for FormatterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatterSpec::Instance(_) => write!(f, "Instance"),
            FormatterSpec::Reference(r) => write!(f, "Reference({:?})", r),
            FormatterSpec::Named(r) => write!(f, "Named({:?})", r),
        }
    }
}

/// Structured handler entry, built by the handler catalog
#[derive(Debug, Clone)]
pub struct HandlerDefinition {
    /// Catalog name of the handler type, e.g. `stream`
    pub name: String,
    pub params: Params,
    pub formatter: Option<FormatterSpec>,
}

impl HandlerDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
            formatter: None,
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn formatter(mut self, formatter: FormatterSpec) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

/// How a handler is specified
#[derive(Clone)]
pub enum HandlerSpec {
    Instance(Arc<dyn Handler>),
    Reference(Reference<Arc<dyn Handler>>),
    Structured(HandlerDefinition),
}

impl HandlerSpec {
    pub fn instance(handler: Arc<dyn Handler>) -> Self {
        HandlerSpec::Instance(handler)
    }

    pub fn key(key: impl Into<String>) -> Self {
        HandlerSpec::Reference(Reference::key(key))
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&dyn ServiceLocator) -> Arc<dyn Handler> + Send + Sync + 'static,
    {
        HandlerSpec::Reference(Reference::callable(f))
    }

    pub fn invokable<I: Invokable<Arc<dyn Handler>> + 'static>() -> Self {
        HandlerSpec::Reference(Reference::invokable::<I>())
    }
}

impl From<HandlerDefinition> for HandlerSpec {
    fn from(definition: HandlerDefinition) -> Self {
        HandlerSpec::Structured(definition)
    }
}

impl std::fmt::Debug for HandlerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerSpec::Instance(_) => write!(f, "Instance"),
            HandlerSpec::Reference(r) => write!(f, "Reference({:?})", r),
            HandlerSpec::Structured(d) => write!(f, "Structured({:?})", d),
        }
    }
}

/// How a processor is specified
#[derive(Clone)]
pub enum ProcessorSpec {
    Instance(Arc<dyn Processor>),
    Reference(Reference<Arc<dyn Processor>>),
}

impl ProcessorSpec {
    pub fn instance(processor: Arc<dyn Processor>) -> Self {
        ProcessorSpec::Instance(processor)
    }

    pub fn key(key: impl Into<String>) -> Self {
        ProcessorSpec::Reference(Reference::key(key))
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&dyn ServiceLocator) -> Arc<dyn Processor> + Send + Sync + 'static,
    {
        ProcessorSpec::Reference(Reference::callable(f))
    }

    pub fn invokable<I: Invokable<Arc<dyn Processor>> + 'static>() -> Self {
        ProcessorSpec::Reference(Reference::invokable::<I>())
    }
}

impl std::fmt::Debug for ProcessorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessorSpec::Instance(_) => write!(f, "Instance"),
            ProcessorSpec::Reference(r) => write!(f, "Reference({:?})", r),
        }
    }
}

/// Configuration of one channel
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    /// Handlers in write order
    pub handlers: Vec<HandlerSpec>,
    /// Processors in application order
    pub processors: Vec<ProcessorSpec>,
    /// Registering the channel also makes it the default
    pub default: bool,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(mut self, handler: impl Into<HandlerSpec>) -> Self {
        self.handlers.push(handler.into());
        self
    }

    pub fn processor(mut self, processor: ProcessorSpec) -> Self {
        self.processors.push(processor);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

impl From<Arc<dyn Handler>> for HandlerSpec {
    fn from(handler: Arc<dyn Handler>) -> Self {
        HandlerSpec::Instance(handler)
    }
}
