//! Host-emulated permutation kernels.

mod elementwise;
mod host;
mod reference;

pub use elementwise::ElementwisePermute;
pub use reference::ReferencePermute;
