//! `GRANITE_TIMELINE_TRACE` span recorder.
//!
//! When the environment variable (or [`crate::foundation::config::GraniteConfig::timeline_trace_path`])
//! names a writable path, every [`Span`] is appended as one line of JSON.
//! With no path configured, recording is a no-op — callers never need to
//! branch on whether tracing is enabled.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

/// A single named interval, ready to be serialized as one NDJSON line.
#[derive(Debug, Clone, Serialize)]
pub struct Span {
    /// Span name (task description, frame label, …).
    pub name: String,
    /// Wall-clock offset from when the recorder was opened, in
    /// microseconds.
    pub start_usec: u64,
    /// Span length in microseconds.
    pub duration_usec: u64,
}

/// Appends [`Span`] records to `GRANITE_TIMELINE_TRACE`'s file, or discards
/// them if tracing was never enabled.
pub struct TraceRecorder {
    sink: Option<Mutex<std::fs::File>>,
    epoch: Instant,
}

impl TraceRecorder {
    /// Open `path` for appending, if given; `None` makes every subsequent
    /// `record` call a no-op.
    pub fn new(path: Option<&str>) -> Self {
        let sink = path.and_then(|p| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .map(Mutex::new)
                .map_err(|err| log::warn!("failed to open timeline trace file {p}: {err}"))
                .ok()
        });
        Self {
            sink,
            epoch: Instant::now(),
        }
    }

    /// Build a recorder from `GRANITE_TIMELINE_TRACE`.
    pub fn from_env() -> Self {
        let path = std::env::var("GRANITE_TIMELINE_TRACE").ok();
        Self::new(path.as_deref())
    }

    /// `true` if spans are actually written anywhere.
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Record that a span named `name` ran for `duration`, ending now.
    pub fn record(&self, name: &str, duration: Duration) {
        let Some(sink) = &self.sink else { return };
        let start_usec = self.epoch.elapsed().saturating_sub(duration).as_micros() as u64;
        let span = Span {
            name: name.to_string(),
            start_usec,
            duration_usec: duration.as_micros() as u64,
        };
        let Ok(mut line) = serde_json::to_string(&span) else {
            return;
        };
        line.push('\n');
        if let Ok(mut file) = sink.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }

    /// Time `body`, recording it as a span named `name`.
    pub fn scoped<T>(&self, name: &str, body: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = body();
        self.record(name, start.elapsed());
        result
    }
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self { sink: None, epoch: Instant::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_recorder_is_a_no_op() {
        let recorder = TraceRecorder::new(None);
        assert!(!recorder.is_enabled());
        recorder.record("noop", Duration::from_millis(1));
    }

    #[test]
    fn scoped_runs_the_closure_and_returns_its_value() {
        let recorder = TraceRecorder::default();
        let value = recorder.scoped("work", || 2 + 2);
        assert_eq!(value, 4);
    }

    #[test]
    fn enabled_recorder_appends_a_json_line() {
        let path = std::env::temp_dir().join(format!("granite_trace_test_{:?}.ndjson", std::thread::current().id()));
        let path_str = path.to_str().unwrap();
        {
            let recorder = TraceRecorder::new(Some(path_str));
            recorder.record("frame", Duration::from_micros(500));
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"name\":\"frame\""));
        let _ = std::fs::remove_file(&path);
    }
}
