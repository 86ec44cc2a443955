use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("unsupported data type '{tag}', expected F32 or F16"))]
    UnknownType { tag: String },

    /// Lengths and output dimensions must come in equal numbers.
    #[snafu(display("expected 2 x rank values for rank 1..={max}, got {count}"))]
    ArgumentCount { count: usize, max: usize },

    #[snafu(display("output dimensions {dims:?} are not a permutation of 0..{rank}"))]
    InvalidPermutation { dims: Vec<usize>, rank: usize },

    #[snafu(display("device error: {source}"))]
    Device { source: tessera_device::Error },

    #[snafu(display("runtime error: {source}"))]
    Runtime { source: tessera_runtime::Error },

    #[snafu(display("failed to write report: {source}"))]
    Report { source: std::io::Error },
}
