// Logger backend: severities, records, handlers, processors, formatters
//
// This is the minimal concrete backend channels are wired against. The
// channel factory only needs `Logger::new(name, handlers, processors)` and
// the per-level log calls; everything else here is a ready-made handler,
// processor or formatter an application can reference from configuration.

mod catalog;
mod entry;
mod formatter;
mod handler;
mod logger;
#[macro_use]
mod macros;
mod processor;
mod severity;

// Public exports
pub use catalog::{HandlerBuilder, HandlerCatalog};
pub use entry::{KeyValue, LogEntry};
pub use formatter::{Formatter, JsonFormatter, LineFormatter};
pub use handler::{Handler, NullHandler, Stream, StreamHandler, TestHandler};
pub use logger::Logger;
pub use processor::{PidProcessor, Processor, StaticContextProcessor};
pub use severity::{ParseSeverityError, Severity};
