use snafu::Snafu;

use crate::DType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Host scalar has the wrong number of bytes for its declared type.
    #[snafu(display("scalar of type {dtype} needs {expected} bytes, got {actual}"))]
    ScalarSize { dtype: DType, expected: usize, actual: usize },

    #[snafu(display("unknown data type tag: {tag}"))]
    UnknownTag { tag: String },
}
