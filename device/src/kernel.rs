use crate::args::ElementwiseArgs;
use crate::error::Result;
use crate::params::InstanceSignature;
use crate::stream::StreamConfig;

/// Capability interface every kernel instance implements.
///
/// Instances are immutable after construction and shared between threads, so
/// all methods take `&self`.
pub trait KernelInstance: Send + Sync + std::fmt::Debug {
    /// Structural signature the instance was generated for.
    fn signature(&self) -> &InstanceSignature;

    /// Whether the instance can handle these concrete arguments.
    ///
    /// Cheap, synchronous and free of side effects. An instance with vector
    /// width 1 (or the width-0 reference) accepts every layout of its rank and
    /// operators.
    fn is_supported(&self, args: &ElementwiseArgs) -> bool;

    /// Scratch memory needed to run with `args`, in bytes.
    fn workspace_size(&self, _args: &ElementwiseArgs) -> usize {
        0
    }

    /// Enqueue the kernel on the configured stream.
    ///
    /// Returns the mean kernel time in milliseconds when timing is enabled and
    /// `0.0` otherwise.
    ///
    /// # Safety
    ///
    /// `args.a` and `args.b` must point to allocations large enough for every
    /// offset reachable through the lengths and strides, and must stay valid
    /// until the stream has executed the launch.
    unsafe fn run(&self, args: &ElementwiseArgs, config: &StreamConfig<'_>) -> Result<f32>;

    /// Human-readable label, e.g. `2_256_64_64_4_4_0_1_4_4`.
    fn type_string(&self) -> String;
}
