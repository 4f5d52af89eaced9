//! Progress reporting side channel.
//!
//! Workers bump a shared atomic counter; at most one thread at a time
//! forwards the count to the [`ProgressSink`], and only after the throttle
//! interval has passed. A worker that finds the emitter busy moves on
//! without waiting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default minimum time between two progress updates.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Receiver of progress updates from a recoloring run.
///
/// `update` sees strictly increasing `completed` counts and is never called
/// concurrently with itself. `finish` is called once, after all workers
/// have joined. Implementations must not assume a particular thread.
pub trait ProgressSink: Sync {
    /// `completed` of `total` pixels are done.
    fn update(&self, completed: u64, total: u64, elapsed: Duration);

    /// The run is complete.
    fn finish(&self, completed: u64, total: u64, elapsed: Duration) {
        let _ = (completed, total, elapsed);
    }
}

/// A sink that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _completed: u64, _total: u64, _elapsed: Duration) {}
}

struct Emitter {
    last_emit: Instant,
    last_count: u64,
}

/// Shared completion counter with a throttled single-writer emitter.
pub struct ProgressCounter<'a> {
    sink: &'a dyn ProgressSink,
    total: u64,
    completed: AtomicU64,
    started: Instant,
    interval: Duration,
    emitter: Mutex<Emitter>,
}

impl<'a> ProgressCounter<'a> {
    /// Create a counter for `total` pixels reporting to `sink`.
    pub fn new(sink: &'a dyn ProgressSink, total: u64, interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            sink,
            total,
            completed: AtomicU64::new(0),
            started: now,
            interval,
            emitter: Mutex::new(Emitter {
                last_emit: now,
                last_count: 0,
            }),
        }
    }

    /// Record `pixels` more completed pixels and maybe notify the sink.
    pub fn add(&self, pixels: u64) {
        if pixels == 0 {
            return;
        }
        self.completed.fetch_add(pixels, Ordering::Relaxed);

        // A busy emitter means someone else is reporting right now.
        let Ok(mut emitter) = self.emitter.try_lock() else {
            return;
        };

        let now = Instant::now();
        if now.duration_since(emitter.last_emit) < self.interval {
            return;
        }

        let completed = self.completed.load(Ordering::Relaxed);
        if completed <= emitter.last_count || completed >= self.total {
            return;
        }

        emitter.last_emit = now;
        emitter.last_count = completed;
        self.sink
            .update(completed, self.total, now.duration_since(self.started));
    }

    /// Pixels completed so far.
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Send the final notification. Call once, after all workers joined.
    pub fn finish(&self) {
        self.sink
            .finish(self.completed(), self.total, self.started.elapsed());
    }
}
