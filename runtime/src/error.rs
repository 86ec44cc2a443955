//! Error types for instance selection and dispatch.

use snafu::Snafu;

use crate::Uid;

/// Result type for runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Kernel backend error.
    #[snafu(display("device error: {source}"))]
    Device { source: tessera_device::Error },

    /// Scalar or type decode error.
    #[snafu(display("dtype error: {source}"))]
    DType { source: tessera_dtype::Error },

    /// Two structurally distinct instances hash to the same identity.
    #[snafu(display("identity {uid} is shared by [{existing}] and [{incoming}]"))]
    IdentityCollision { uid: Uid, existing: String, incoming: String },

    /// No candidate instance accepts the concrete arguments.
    #[snafu(display("no instance accepts {problem} ({candidates} candidates tried)"))]
    NoAcceptingInstance { problem: String, candidates: usize },

    #[snafu(display("operands have different ranks: A has {a}, B has {b}"))]
    RankMismatch { a: usize, b: usize },

    #[snafu(display("{modes} modes given for a rank-{rank} tensor"))]
    ModeCount { modes: usize, rank: usize },

    /// Mode label used for more than one dimension of the same operand.
    #[snafu(display("mode {mode} labels more than one dimension"))]
    DuplicateMode { mode: i32 },

    /// Output mode that does not appear in the input.
    #[snafu(display("mode {mode} of B does not appear in A"))]
    ModeNotFound { mode: i32 },

    #[snafu(display("descriptor has {lengths} lengths but {strides} strides"))]
    StrideCount { lengths: usize, strides: usize },

    /// Extent of a mode differs between A and B.
    #[snafu(display("mode {mode} has extent {a} in A but {b} in B"))]
    ExtentMismatch { mode: i32, a: usize, b: usize },

    /// Malformed line in a tuning lookup table.
    #[snafu(display("invalid lookup entry '{line}': {reason}"))]
    InvalidLookupEntry { line: String, reason: String },
}
