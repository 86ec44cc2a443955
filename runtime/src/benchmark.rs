//! Kernel benchmarking for tuning sweeps.
//!
//! Times an instance over repeated launches so candidates for the same
//! problem can be ranked by bandwidth.

use std::time::{Duration, Instant};

use snafu::ResultExt;
use tessera_device::{ElementwiseArgs, KernelInstance, StreamConfig};

use crate::error::{DeviceSnafu, Result};

/// Configuration for kernel benchmarking.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of warmup runs (not timed).
    pub warmup_runs: usize,
    /// Number of timing runs.
    pub timing_runs: usize,
    /// Whether to return minimum time (true) or mean (false).
    pub take_minimum: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self { warmup_runs: 5, timing_runs: 10, take_minimum: false }
    }
}

/// Result of kernel benchmarking.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Minimum execution time.
    pub min: Duration,
    /// Mean execution time.
    pub mean: Duration,
    /// All timing measurements.
    pub runs: Vec<Duration>,
}

impl BenchmarkResult {
    /// Get the timing value based on config preference.
    pub fn timing(&self, take_minimum: bool) -> Duration {
        if take_minimum { self.min } else { self.mean }
    }

    /// Effective bandwidth in GB/s for a kernel moving `bytes` per run.
    pub fn bandwidth_gbps(&self, bytes: usize, take_minimum: bool) -> f64 {
        let ms = self.timing(take_minimum).as_secs_f64() * 1e3;
        if ms == 0.0 { f64::INFINITY } else { bytes as f64 / 1e6 / ms }
    }
}

/// Benchmark one kernel instance.
///
/// Runs warmup iterations (discarded), then timing iterations.
/// Returns min/mean/all timings.
///
/// # Safety
///
/// The pointers in `args` must be valid for the duration of benchmarking.
/// The kernel will be executed multiple times.
pub unsafe fn benchmark_instance(
    instance: &dyn KernelInstance,
    args: &ElementwiseArgs,
    config: &BenchmarkConfig,
) -> Result<BenchmarkResult> {
    let launch = StreamConfig::default();

    for _ in 0..config.warmup_runs {
        unsafe { instance.run(args, &launch) }.context(DeviceSnafu)?;
    }

    let mut runs = Vec::with_capacity(config.timing_runs);
    for _ in 0..config.timing_runs {
        let start = Instant::now();
        unsafe { instance.run(args, &launch) }.context(DeviceSnafu)?;
        runs.push(start.elapsed());
    }

    let min = runs.iter().copied().min().unwrap_or(Duration::ZERO);
    let total: Duration = runs.iter().sum();
    let mean = total / runs.len().max(1) as u32;

    Ok(BenchmarkResult { min, mean, runs })
}
