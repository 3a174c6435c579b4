//! Rolling Logger
//!
//! Every record is written to the browser console and kept in a circular
//! buffer of recent lines, so diagnostics can be shown in-app.
//!
//! `log` macros are bridged into `tracing` by the subscriber's `try_init`.

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, OnceLock};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Lines kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 500;

static BUFFER: OnceLock<Mutex<RingBuffer>> = OnceLock::new();

/// Fixed-size line buffer, oldest evicted first
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

fn buffer() -> &'static Mutex<RingBuffer> {
    BUFFER.get_or_init(|| Mutex::new(RingBuffer::new(DEFAULT_CAPACITY)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logger(app_name: &str, level: log::LevelFilter) -> Result<(), TryInitError> {
    let layer = tracing_subscriber::fmt::layer()
        // SystemTime is unavailable on wasm32; lines are stamped by the writer
        .without_time()
        .with_ansi(false)
        .with_writer(BrowserWriter);

    tracing_subscriber::registry()
        .with(layer)
        .with(to_tracing_filter(level))
        .try_init()?;

    tracing::info!("{} logger started at level {}", app_name, level);
    Ok(())
}

/// Recent log lines, oldest first
pub fn recent_lines() -> Vec<String> {
    match buffer().lock() {
        Ok(buf) => buf.lines(),
        Err(_) => Vec::new(),
    }
}

/// Drop everything buffered so far
pub fn clear() {
    if let Ok(mut buf) = buffer().lock() {
        buf.clear();
    }
}

fn to_tracing_filter(level: log::LevelFilter) -> tracing_subscriber::filter::LevelFilter {
    use tracing_subscriber::filter::LevelFilter;
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

// ========================
// Writer
// ========================

struct BrowserWriter;

impl<'a> MakeWriter<'a> for BrowserWriter {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LineWriter::new(*meta.level())
    }
}

/// Collects one formatted event; emitted on drop
struct LineWriter {
    level: Level,
    bytes: Vec<u8>,
}

impl LineWriter {
    fn new(level: Level) -> Self {
        Self { level, bytes: Vec::new() }
    }
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.bytes);
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }
        let line = format!("{} {}", chrono::Local::now().format("%H:%M:%S%.3f"), text);
        to_console(self.level, &line);
        if let Ok(mut buf) = buffer().lock() {
            buf.push(line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn to_console(level: Level, line: &str) {
    use web_sys::console;
    let value = line.into();
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        Level::DEBUG | Level::TRACE => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn to_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut buf = RingBuffer::new(3);
        for i in 0..5 {
            buf.push(format!("line {}", i));
        }
        assert_eq!(buf.lines(), vec!["line 2", "line 3", "line 4"]);
        buf.clear();
        assert!(buf.lines().is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut buf = RingBuffer::new(0);
        buf.push("a".to_string());
        buf.push("b".to_string());
        assert_eq!(buf.lines(), vec!["b"]);
    }

    #[test]
    fn test_line_writer_appends_on_drop_then_clears() {
        {
            let mut writer = LineWriter::new(Level::WARN);
            write!(writer, " WARN app: sync failed\n").unwrap();
        }
        {
            // blank events are dropped
            let _ = LineWriter::new(Level::INFO);
        }
        let lines = recent_lines();
        assert!(lines.last().unwrap().ends_with("WARN app: sync failed"));
        assert!(!lines.iter().any(|l| l.trim().is_empty()));

        clear();
        assert!(recent_lines().is_empty());
    }

    #[test]
    fn test_level_mapping() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(to_tracing_filter(log::LevelFilter::Warn), LevelFilter::WARN);
        assert_eq!(to_tracing_filter(log::LevelFilter::Off), LevelFilter::OFF);
    }
}
