//! Logging abstractions for runtime-agnostic logging
//!
//! The resolver never talks to a logging backend directly. It is handed a
//! [`Logger`] so the host (a web server, a CLI, a test) decides where the
//! startup notes end up.

mod traits;
mod level;
mod noop;
mod console;
#[cfg(test)]
mod recording;

pub use traits::{Logger, SharedLogger};
pub use level::LogLevel;
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
#[cfg(test)]
pub(crate) use recording::RecordingLogger;
