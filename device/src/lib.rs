//! Kernel backend surface for tessera.
//!
//! Everything the selection engine knows about a kernel goes through the
//! [`KernelInstance`] capability interface: a structural signature, an
//! acceptance check for concrete arguments, and a run entry point that
//! enqueues work on a [`Stream`].
//!
//! The in-tree backend emulates element-wise permutation kernels on the host.
//! Each instance enforces the same layout constraints a vectorized accelerator
//! kernel would (unit-stride dimension divisible by the vector width, aligned
//! pointers), so the fallback policy of the registry can be exercised without
//! an accelerator.

pub mod args;
pub mod error;
pub mod kernel;
pub mod kernels;
pub mod params;
pub mod stream;


pub use args::{ElementwiseArgs, MAX_RANK};
pub use error::*;
pub use kernel::KernelInstance;
pub use kernels::{ElementwisePermute, ReferencePermute};
pub use params::{InstanceSignature, TuningParams};
pub use stream::{LaunchRecord, Stream, StreamConfig};
