// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Named logging channels built lazily from declarative configuration.
//!
//! A [`Manager`] stores one [`ChannelConfig`] per channel name and hands out
//! [`Logger`]s built from them by a [`Factory`]. Handler, processor and
//! formatter entries may be literal instances or references resolved
//! through an optional [`ServiceLocator`]. When a channel cannot be
//! provided the manager falls back to a reserved stderr channel and reports
//! why on it.

#[macro_use]
pub mod logging;

pub mod channel;
pub mod config;
pub mod error;
pub mod factory;
pub mod locator;
pub mod manager;

pub use channel::{
    Callable, ChannelConfig, FormatterSpec, HandlerDefinition, HandlerSpec, Invokable, Params,
    ProcessorSpec, Reference,
};
pub use config::{ConfigError, ManagerConfig};
pub use error::{ChannelError, ResolutionError};
pub use factory::Factory;
pub use locator::{FromService, NoLocator, Service, ServiceLocator, ServiceMap};
pub use logging::{
    Formatter, Handler, HandlerCatalog, LogEntry, Logger, Processor, Severity, TestHandler,
};
pub use manager::{Manager, EMERGENCY_CHANNEL};
