//! Logger that keeps every line, for assertions in tests

use std::sync::Mutex;

use super::{LogLevel, Logger};

#[derive(Default)]
pub(crate) struct RecordingLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    fn record(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }

    /// Messages logged at exactly `level`, oldest first
    pub(crate) fn at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }
    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }
    fn warn(&self, message: &str) {
        self.record(LogLevel::Warn, message);
    }
    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }
}
