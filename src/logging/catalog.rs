// SPDX-License-Identifier: Apache-2.0 OR MIT
// Handler catalog: builds structured handler entries from name + params

use super::formatter::Formatter;
use super::handler::{Handler, NullHandler, Stream, StreamHandler};
use super::Severity;
use crate::channel::Params;
use crate::error::ResolutionError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Builds one handler type from its params and (resolved) formatter
pub type HandlerBuilder = Arc<
    dyn Fn(&Params, Option<Arc<dyn Formatter>>) -> Result<Arc<dyn Handler>, ResolutionError>
        + Send
        + Sync,
>;

/// Registry of handler types addressable by name in structured entries
///
/// Built-in names:
/// - `stream`: `stream` is `"stderr"` (default), `"stdout"` or a file path
///   opened for appending; `level` is the least severe level written
///   (default `"debug"`)
/// - `null`: discards everything at or above `level` (default `"debug"`)
#[derive(Clone)]
pub struct HandlerCatalog {
    builders: HashMap<String, HandlerBuilder>,
}

impl HandlerCatalog {
    /// Catalog holding the built-in handler types
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        catalog.register("stream", build_stream);
        catalog.register("null", build_null);
        catalog
    }

    /// Catalog with no handler types at all
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Add or replace a handler type
    pub fn register<F>(&mut self, name: &str, builder: F) -> &mut Self
    where
        F: Fn(&Params, Option<Arc<dyn Formatter>>) -> Result<Arc<dyn Handler>, ResolutionError>
            + Send
            + Sync
            + 'static,
    {
        self.builders.insert(name.to_string(), Arc::new(builder));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Build the handler type `name`
    pub fn build(
        &self,
        name: &str,
        params: &Params,
        formatter: Option<Arc<dyn Formatter>>,
    ) -> Result<Arc<dyn Handler>, ResolutionError> {
        let builder = self
            .builders
            .get(name)
            .ok_or_else(|| ResolutionError::UnknownHandler(name.to_string()))?;
        builder(params, formatter)
    }
}

impl Default for HandlerCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandlerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.builders.keys().collect();
        names.sort();
        f.debug_struct("HandlerCatalog").field("names", &names).finish()
    }
}

fn invalid(handler: &str, param: &str, reason: impl Into<String>) -> ResolutionError {
    ResolutionError::InvalidParam {
        handler: handler.to_string(),
        param: param.to_string(),
        reason: reason.into(),
    }
}

fn str_param<'a>(
    handler: &str,
    params: &'a Params,
    key: &str,
) -> Result<Option<&'a str>, ResolutionError> {
    match params.get(key) {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid(handler, key, format!("expected a string, got {}", other))),
    }
}

fn level_param(handler: &str, params: &Params) -> Result<Severity, ResolutionError> {
    match str_param(handler, params, "level")? {
        None => Ok(Severity::Debug),
        Some(level) => level
            .parse::<Severity>()
            .map_err(|e| invalid(handler, "level", e.to_string())),
    }
}

fn build_stream(
    params: &Params,
    formatter: Option<Arc<dyn Formatter>>,
) -> Result<Arc<dyn Handler>, ResolutionError> {
    let level = level_param("stream", params)?;
    let stream = match str_param("stream", params, "stream")?.unwrap_or("stderr") {
        "stderr" => Stream::Stderr,
        "stdout" => Stream::Stdout,
        "" => return Err(invalid("stream", "stream", "must not be empty")),
        path => Stream::append_to(Path::new(path))
            .map_err(|e| invalid("stream", "stream", format!("cannot open '{}': {}", path, e)))?,
    };

    let mut handler = StreamHandler::new(stream, level);
    if let Some(formatter) = formatter {
        handler = handler.with_formatter(formatter);
    }
    Ok(Arc::new(handler))
}

fn build_null(
    params: &Params,
    _formatter: Option<Arc<dyn Formatter>>,
) -> Result<Arc<dyn Handler>, ResolutionError> {
    Ok(Arc::new(NullHandler::new(level_param("null", params)?)))
}
