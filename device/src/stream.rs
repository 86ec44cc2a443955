//! Execution streams.
//!
//! A [`Stream`] is the caller-owned ordering context kernels are enqueued on.
//! The selection engine never creates, synchronizes or destroys streams; it
//! only forwards the one it was handed.
//!
//! # Thread Safety
//!
//! Streams are `Sync`: several dispatchers may enqueue on the same stream.
//! Ordering between launches from different threads is whatever order the
//! launches are recorded in.

use parking_lot::Mutex;

/// One kernel launch observed by a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub kernel: String,
    pub elements: usize,
}

#[derive(Debug, Default)]
pub struct Stream {
    name: String,
    launches: Mutex<Vec<LaunchRecord>>,
}

impl Stream {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), launches: Mutex::new(Vec::new()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self, launch: LaunchRecord) {
        self.launches.lock().push(launch);
    }

    /// Snapshot of every launch enqueued so far, oldest first.
    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.launches.lock().clone()
    }

    pub fn launch_count(&self) -> usize {
        self.launches.lock().len()
    }
}

/// Launch options.
///
/// With `time_kernel` set, a run performs `cold_niters` untimed launches and
/// reports the mean of `nrepeat` timed ones.
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig<'a> {
    pub stream: Option<&'a Stream>,
    pub time_kernel: bool,
    pub cold_niters: usize,
    pub nrepeat: usize,
}

impl Default for StreamConfig<'_> {
    fn default() -> Self {
        Self { stream: None, time_kernel: false, cold_niters: 5, nrepeat: 50 }
    }
}

impl<'a> StreamConfig<'a> {
    pub fn on(stream: &'a Stream) -> Self {
        Self { stream: Some(stream), ..Self::default() }
    }

    pub fn timed(self, cold_niters: usize, nrepeat: usize) -> Self {
        Self { time_kernel: true, cold_niters, nrepeat, ..self }
    }
}
