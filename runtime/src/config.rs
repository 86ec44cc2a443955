//! Dispatch configuration.
//!
//! Built explicitly with the bon builder or read from the environment.

use bon::bon;
use tessera_device::{Stream, StreamConfig};

use crate::problem::InstanceType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Device kernels or host reference.
    pub instance_type: InstanceType,
    /// Time kernel runs and report the mean in [`crate::Launch`].
    pub time_kernel: bool,
    /// Untimed launches before timing starts.
    pub cold_niters: usize,
    /// Timed launches averaged per run.
    pub nrepeat: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { instance_type: InstanceType::Device, time_kernel: false, cold_niters: 5, nrepeat: 50 }
    }
}

#[bon]
impl DispatchConfig {
    #[builder]
    pub fn new(
        #[builder(default)] instance_type: InstanceType,
        #[builder(default = false)] time_kernel: bool,
        #[builder(default = 5)] cold_niters: usize,
        #[builder(default = 50)] nrepeat: usize,
    ) -> Self {
        Self { instance_type, time_kernel, cold_niters, nrepeat }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TESSERA_INSTANCE` - `device` or `host` (default: device)
    /// * `TESSERA_TIME_KERNEL` - Time kernel runs when `1` or `true`
    /// * `TESSERA_COLD_ITERS` - Untimed warmup launches (default: 5)
    /// * `TESSERA_REPEAT` - Timed launches per run (default: 50)
    pub fn from_env() -> Self {
        let instance_type = std::env::var("TESSERA_INSTANCE").ok().and_then(|s| s.parse().ok()).unwrap_or_default();
        let time_kernel = std::env::var("TESSERA_TIME_KERNEL").is_ok_and(|s| parse_flag(&s));
        let cold_niters = std::env::var("TESSERA_COLD_ITERS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);
        let nrepeat = std::env::var("TESSERA_REPEAT").ok().and_then(|s| s.parse().ok()).unwrap_or(50);

        Self { instance_type, time_kernel, cold_niters, nrepeat }
    }

    pub fn stream_config<'a>(&self, stream: &'a Stream) -> StreamConfig<'a> {
        StreamConfig {
            stream: Some(stream),
            time_kernel: self.time_kernel,
            cold_niters: self.cold_niters,
            nrepeat: self.nrepeat,
        }
    }
}

/// `1` and `true` (any case) enable a flag; everything else leaves it off.
pub(crate) fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
