use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Extents and stride arrays describe different ranks.
    #[snafu(display("rank mismatch: {lengths} lengths, {a_strides} input strides, {b_strides} output strides"))]
    RankMismatch { lengths: usize, a_strides: usize, b_strides: usize },

    #[snafu(display("rank {rank} exceeds the supported maximum of {max}"))]
    RankTooLarge { rank: usize, max: usize },

    #[snafu(display("null {operand} pointer"))]
    NullPointer { operand: &'static str },

    /// Kernel was launched with arguments its acceptance check rejects.
    #[snafu(display("kernel {kernel} does not support these arguments"))]
    UnsupportedArgument { kernel: String },
}
