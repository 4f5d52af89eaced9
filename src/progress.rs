//! Single-line terminal progress display.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use shepard_recolor::ProgressSink;

/// Renders progress as a carriage-return updated status line.
pub struct TerminalProgress {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalProgress {
    /// Progress on standard error, leaving stdout for results.
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_line(&self, line: &str) {
        // A poisoned or failing terminal must not abort the run.
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(line.as_bytes());
            let _ = out.flush();
        }
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&self, completed: u64, total: u64, elapsed: Duration) {
        self.write_line(&format_update(completed, total, elapsed));
    }

    fn finish(&self, completed: u64, total: u64, elapsed: Duration) {
        self.write_line(&format_finish(completed, total, elapsed));
    }
}

/// `\rProgress: 42.0% (420/1000) Elapsed: 2s ETA: 3s`
pub fn format_update(completed: u64, total: u64, elapsed: Duration) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };
    let eta = if completed == 0 {
        Duration::ZERO
    } else {
        let estimated = elapsed.as_secs_f64() / completed as f64 * total as f64;
        Duration::from_secs_f64(estimated).saturating_sub(elapsed)
    };
    format!(
        "\rProgress: {percent:.1}% ({completed}/{total}) Elapsed: {} ETA: {}",
        format_seconds(elapsed),
        format_seconds(eta)
    )
}

/// `\rComplete: 100.0% (1000/1000) in 1.234s\n`
pub fn format_finish(completed: u64, total: u64, elapsed: Duration) -> String {
    format!(
        "\rComplete: 100.0% ({completed}/{total}) in {}\n",
        format_millis(elapsed)
    )
}

/// Whole seconds as `45s`, `2m5s` or `1h0m3s`.
fn format_seconds(d: Duration) -> String {
    let secs = d.as_secs_f64().round() as u64;
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}

/// Millisecond precision: `850ms`, `1.234s`, or `2m5.5s` past a minute.
fn format_millis(d: Duration) -> String {
    let millis = d.as_millis() as u64;
    if millis < 1000 {
        return format!("{millis}ms");
    }
    let secs = millis / 1000;
    let frac = millis % 1000;
    let (m, s) = (secs / 60, secs % 60);
    let seconds = if frac == 0 {
        format!("{s}s")
    } else {
        let frac = format!("{frac:03}");
        format!("{s}.{}s", frac.trim_end_matches('0'))
    };
    if m > 0 {
        format!("{m}m{seconds}")
    } else {
        seconds
    }
}
