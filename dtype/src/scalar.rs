//! Type-directed decode of host-resident scalars.
//!
//! Scalars such as the permutation multiplier arrive as raw little-endian
//! bytes together with the enumerant describing how to read them.

use half::{bf16, f16};
use snafu::ensure;

use crate::{DType, Result, ScalarSizeSnafu};

/// Decode `bytes` as a value of type `dtype` and widen/narrow it to `f32`.
pub fn read_scalar(bytes: &[u8], dtype: DType) -> Result<f32> {
    let expected = dtype.bytes();
    ensure!(bytes.len() == expected, ScalarSizeSnafu { dtype, expected, actual: bytes.len() });

    let value = match dtype {
        DType::Float16 => f16::from_le_bytes([bytes[0], bytes[1]]).to_f32(),
        DType::BFloat16 => bf16::from_le_bytes([bytes[0], bytes[1]]).to_f32(),
        DType::Float32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        DType::Float64 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            f64::from_le_bytes(raw) as f32
        }
    };
    Ok(value)
}
