// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Manager: named channels, default selection, lazy build and emergency
//! fallback.
//!
//! Channels are registered as configuration and only built the first time
//! they are requested; the built logger is then cached for the lifetime of
//! the manager. Replacing a channel's configuration with [`Manager::add`]
//! does not touch an already-built logger; [`Manager::forget`] is the only
//! way to drop one.
//!
//! When a lookup or build fails and the emergency channel is enabled (the
//! default), the failure is reported at emergency level on a reserved
//! stderr channel and that channel's logger is returned instead.

use crate::channel::{ChannelConfig, HandlerDefinition};
use crate::config::ManagerConfig;
use crate::error::ChannelError;
use crate::factory::Factory;
use crate::logging::{Logger, Severity};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Reserved name of the fallback channel
pub const EMERGENCY_CHANNEL: &str = "log-channels-emergency";

const EMERGENCY_REASON: &str = "Error encountered, using fallback emergency logger";

#[derive(Default)]
struct State {
    channels: HashMap<String, Arc<Logger>>,
    channel_configs: HashMap<String, ChannelConfig>,
    default_channel: Option<String>,
    use_emergency_channel: bool,
}

impl State {
    fn has(&self, name: &str) -> bool {
        self.channels.contains_key(name) || self.channel_configs.contains_key(name)
    }
}

/// Owns channel configurations and their lazily built loggers
///
/// All state sits behind one lock, held across lookup, build and cache
/// insertion so that a channel is never built twice. Log calls run after
/// the lock is released.
///
/// Factory callables, invokables, catalog builders and the service locator
/// run while that lock is held, so they must not call back into the same
/// manager.
pub struct Manager {
    factory: Factory,
    emergency_config: ChannelConfig,
    state: Mutex<State>,
}

impl Manager {
    pub fn new() -> Self {
        Self::with_factory(Factory::new())
    }

    pub fn with_factory(factory: Factory) -> Self {
        Self {
            factory,
            emergency_config: default_emergency_config(),
            state: Mutex::new(State {
                use_emergency_channel: true,
                ..State::default()
            }),
        }
    }

    /// Register every channel of a loaded configuration file
    ///
    /// Channels are added in name order; `default_channel`, when present,
    /// wins over any `default: true` flag.
    pub fn from_config(config: &ManagerConfig, factory: Factory) -> Self {
        let manager = Self::with_factory(factory);
        for (name, channel) in config.channel_configs() {
            manager.add(&name, channel);
        }
        if let Some(name) = &config.default_channel {
            manager.set_default_channel(name);
        }
        manager.use_emergency_channel(config.use_emergency_channel);
        manager
    }

    /// Replace the configuration the emergency channel is built from
    pub fn with_emergency_config(mut self, config: ChannelConfig) -> Self {
        self.emergency_config = config;
        self
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store (or overwrite) the configuration of channel `name`
    pub fn add(&self, name: &str, config: ChannelConfig) -> &Self {
        let mut state = self.lock();
        if config.default {
            state.default_channel = Some(name.to_string());
        }
        state.channel_configs.insert(name.to_string(), config);
        self
    }

    pub fn set_default_channel(&self, name: &str) -> &Self {
        self.lock().default_channel = Some(name.to_string());
        self
    }

    pub fn get_default_channel(&self) -> Option<String> {
        self.lock().default_channel.clone()
    }

    /// True if `name` has a stored configuration or a built logger
    pub fn has(&self, name: &str) -> bool {
        self.lock().has(name)
    }

    /// Sorted names of every known channel
    pub fn channel_names(&self) -> Vec<String> {
        let state = self.lock();
        let names: BTreeSet<&String> = state
            .channel_configs
            .keys()
            .chain(state.channels.keys())
            .collect();
        names.into_iter().cloned().collect()
    }

    /// Enable or disable the emergency fallback
    pub fn use_emergency_channel(&self, enabled: bool) -> &Self {
        self.lock().use_emergency_channel = enabled;
        self
    }

    pub fn is_using_emergency_channel(&self) -> bool {
        self.lock().use_emergency_channel
    }

    /// Drop the cached logger of `name`, if built
    ///
    /// The stored configuration is kept, so the next request rebuilds it.
    pub fn forget(&self, name: &str) -> Option<Arc<Logger>> {
        self.lock().channels.remove(name)
    }

    /// Logger of channel `name`, or of the default channel when `None`
    ///
    /// With the emergency channel enabled this only fails if the emergency
    /// channel itself cannot be built; the original failure is kept as the
    /// error's source.
    pub fn channel(&self, name: Option<&str>) -> Result<Arc<Logger>, ChannelError> {
        let mut state = self.lock();
        let result = match name
            .map(str::to_string)
            .or_else(|| state.default_channel.clone())
        {
            Some(name) => self.get(&mut state, &name),
            None => Err(ChannelError::NoDefault),
        };

        match result {
            Ok(logger) => Ok(logger),
            Err(err) if state.use_emergency_channel => {
                let logger = match self.ensure_emergency_channel(&mut state) {
                    Ok(logger) => logger,
                    Err(emergency) => {
                        return Err(ChannelError::EmergencyUnavailable {
                            cause: Box::new(err),
                            emergency: Box::new(emergency),
                        })
                    }
                };
                drop(state);

                let exception = err.to_string();
                logger.log(
                    Severity::Emergency,
                    EMERGENCY_REASON,
                    &[("exception", exception.as_str())],
                );
                Ok(logger)
            }
            Err(err) => Err(err),
        }
    }

    fn get(&self, state: &mut State, name: &str) -> Result<Arc<Logger>, ChannelError> {
        if let Some(logger) = state.channels.get(name) {
            return Ok(Arc::clone(logger));
        }

        let config = state
            .channel_configs
            .get(name)
            .ok_or_else(|| ChannelError::Undefined(name.to_string()))?;
        let logger = Arc::new(self.factory.create(name, config)?);
        state
            .channels
            .insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    /// Register the emergency channel on first use and make it the default
    fn ensure_emergency_channel(&self, state: &mut State) -> Result<Arc<Logger>, ChannelError> {
        if !state.has(EMERGENCY_CHANNEL) {
            state
                .channel_configs
                .insert(EMERGENCY_CHANNEL.to_string(), self.emergency_config.clone());
            state.default_channel = Some(EMERGENCY_CHANNEL.to_string());
        }
        self.get(state, EMERGENCY_CHANNEL)
    }

    /// Run any other logger operation against the effective channel
    pub fn with_channel<R>(&self, f: impl FnOnce(&Logger) -> R) -> Result<R, ChannelError> {
        let logger = self.channel(None)?;
        Ok(f(&logger))
    }

    /// Log on the default channel
    pub fn log(
        &self,
        severity: Severity,
        message: &str,
        context: &[(&str, &str)],
    ) -> Result<(), ChannelError> {
        self.channel(None)?.log(severity, message, context);
        Ok(())
    }

    pub fn emergency(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.emergency(message, context);
        Ok(())
    }

    pub fn alert(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.alert(message, context);
        Ok(())
    }

    pub fn critical(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.critical(message, context);
        Ok(())
    }

    pub fn error(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.error(message, context);
        Ok(())
    }

    pub fn warning(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.warning(message, context);
        Ok(())
    }

    pub fn notice(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.notice(message, context);
        Ok(())
    }

    pub fn info(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.info(message, context);
        Ok(())
    }

    pub fn debug(&self, message: &str, context: &[(&str, &str)]) -> Result<(), ChannelError> {
        self.channel(None)?.debug(message, context);
        Ok(())
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        let mut built: Vec<&String> = state.channels.keys().collect();
        built.sort();
        f.debug_struct("Manager")
            .field("configured", &state.channel_configs.len())
            .field("built", &built)
            .field("default_channel", &state.default_channel)
            .field("use_emergency_channel", &state.use_emergency_channel)
            .finish()
    }
}

/// Single stderr handler at the most verbose level
fn default_emergency_config() -> ChannelConfig {
    ChannelConfig::new().handler(
        HandlerDefinition::new("stream")
            .param("stream", "stderr")
            .param("level", Severity::Debug.as_str().to_ascii_lowercase()),
    )
}
