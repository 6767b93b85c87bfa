// ABOUTME: Log destination capability and the sinks shipped with the crate

pub mod sink;

pub use sink::{FileSink, LogSink, MemorySink, NoopSink, TracingSink};

#[cfg(test)]
pub use sink::MockLogSink;
