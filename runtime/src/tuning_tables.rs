//! Tuning tuples each generated kernel family is instantiated with.
//!
//! Tables are ordered by how often each tuple won tuning runs for its
//! (type, rank) pair; the trailing entries are the safety net the candidate
//! generator falls back to. Every table ends with a width-1 tuple, which
//! accepts any layout.
//!
//! Ranks 5 and 6 share one reduced table.

use tessera_device::TuningParams;
use tessera_dtype::DType;

#[rustfmt::skip]
const fn t(block: u32, m0_block: u32, m1_block: u32, m0_thread: u32, m1_thread: u32, c0: u32, c1: u32, width: u32) -> TuningParams {
    TuningParams::new(block, m0_block, m1_block, m0_thread, m1_thread, [c0, c1], width)
}

#[rustfmt::skip]
pub static F32_RANK2: &[TuningParams] = &[
    t(256, 64, 64, 4, 4, 0, 1, 4),
    t(64, 16, 64, 4, 4, 0, 1, 4),
    t(128, 32, 64, 4, 4, 0, 1, 4),
    t(128, 16, 128, 4, 4, 0, 1, 4),
    t(32, 32, 64, 8, 8, 0, 1, 8),
    t(256, 32, 128, 4, 4, 0, 1, 4),
    t(64, 64, 64, 8, 8, 0, 1, 8),
    t(32, 16, 32, 4, 4, 0, 1, 4),
    t(64, 32, 128, 8, 8, 0, 1, 8),
    t(64, 32, 32, 4, 4, 0, 1, 4),
    t(128, 32, 256, 8, 8, 0, 1, 8),
    t(128, 128, 64, 8, 8, 0, 1, 8),
    t(256, 64, 256, 8, 8, 0, 1, 8),
    t(32, 32, 16, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 16),
    t(128, 64, 32, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 8),
    t(256, 128, 128, 16, 16, 1, 0, 16),
    t(256, 128, 128, 16, 16, 0, 1, 4),
    t(256, 256, 64, 8, 8, 0, 1, 8),
    // safety net
    t(256, 64, 64, 4, 4, 0, 1, 2),
    t(256, 64, 64, 4, 4, 0, 1, 1),
];

#[rustfmt::skip]
pub static F32_RANK3: &[TuningParams] = &[
    t(256, 64, 64, 4, 4, 0, 1, 4),
    t(128, 64, 32, 4, 4, 0, 1, 4),
    t(64, 64, 64, 8, 8, 0, 1, 8),
    t(128, 32, 64, 4, 4, 0, 1, 4),
    t(256, 128, 32, 4, 4, 0, 1, 4),
    t(32, 32, 64, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 0, 1, 8),
    t(64, 16, 64, 4, 4, 0, 1, 4),
    t(64, 32, 32, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 16),
    t(256, 128, 128, 16, 16, 0, 1, 4),
    t(64, 32, 128, 8, 8, 0, 1, 8),
    t(128, 32, 256, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 1, 0, 8),
    t(128, 128, 64, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 1, 0, 4),
    t(128, 128, 16, 4, 4, 0, 1, 4),
    t(64, 64, 16, 4, 4, 0, 1, 4),
    t(128, 16, 128, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 1, 0, 16),
    // safety net
    t(256, 64, 64, 4, 4, 0, 1, 2),
    t(256, 64, 64, 4, 4, 0, 1, 1),
];

#[rustfmt::skip]
pub static F32_RANK4: &[TuningParams] = &[
    t(256, 64, 64, 4, 4, 0, 1, 4),
    t(64, 32, 32, 4, 4, 0, 1, 4),
    t(128, 64, 32, 4, 4, 0, 1, 4),
    t(256, 128, 32, 4, 4, 0, 1, 4),
    t(64, 128, 32, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 0, 1, 16),
    t(256, 128, 128, 16, 16, 0, 1, 8),
    t(256, 128, 128, 16, 16, 0, 1, 4),
    t(32, 64, 32, 8, 8, 0, 1, 8),
    t(128, 256, 32, 8, 8, 0, 1, 8),
    t(64, 64, 16, 4, 4, 0, 1, 4),
    t(32, 16, 32, 4, 4, 0, 1, 4),
    t(128, 128, 16, 4, 4, 0, 1, 4),
    t(128, 32, 64, 4, 4, 0, 1, 4),
    t(32, 32, 64, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 1, 0, 4),
    t(256, 128, 128, 16, 16, 1, 0, 8),
    t(32, 32, 16, 4, 4, 0, 1, 4),
    // safety net
    t(256, 64, 64, 4, 4, 0, 1, 2),
    t(256, 64, 64, 4, 4, 0, 1, 1),
];

#[rustfmt::skip]
pub static F16_RANK2: &[TuningParams] = &[
    t(64, 32, 128, 8, 8, 0, 1, 8),
    t(128, 16, 128, 4, 4, 0, 1, 4),
    t(128, 32, 256, 8, 8, 0, 1, 8),
    t(256, 32, 128, 4, 4, 0, 1, 4),
    t(128, 64, 128, 8, 8, 0, 1, 8),
    t(256, 64, 256, 8, 8, 0, 1, 8),
    t(256, 128, 128, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 0, 1, 16),
    t(64, 64, 64, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 1, 0, 4),
    t(256, 128, 128, 16, 16, 0, 1, 4),
    t(256, 128, 128, 16, 16, 1, 0, 16),
    t(64, 16, 64, 4, 4, 0, 1, 4),
    t(32, 32, 64, 8, 8, 0, 1, 8),
    t(32, 16, 32, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 8),
    t(64, 128, 32, 8, 8, 0, 1, 8),
    t(64, 32, 32, 4, 4, 0, 1, 4),
    t(128, 128, 64, 8, 8, 0, 1, 8),
    t(256, 64, 64, 4, 4, 0, 1, 4),
    // safety net
    t(64, 32, 128, 8, 8, 0, 1, 2),
    t(64, 32, 128, 8, 8, 0, 1, 1),
];

#[rustfmt::skip]
pub static F16_RANK3: &[TuningParams] = &[
    t(256, 128, 128, 8, 8, 0, 1, 8),
    t(64, 32, 128, 8, 8, 0, 1, 8),
    t(128, 64, 128, 8, 8, 0, 1, 8),
    t(64, 128, 32, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 1, 0, 4),
    t(256, 128, 128, 16, 16, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 16),
    t(256, 128, 128, 16, 16, 1, 0, 16),
    t(128, 256, 32, 8, 8, 0, 1, 8),
    t(128, 32, 256, 8, 8, 0, 1, 8),
    t(256, 64, 256, 8, 8, 0, 1, 8),
    t(128, 16, 128, 4, 4, 0, 1, 4),
    t(64, 64, 64, 8, 8, 0, 1, 8),
    t(32, 64, 32, 8, 8, 0, 1, 8),
    t(128, 128, 64, 8, 8, 0, 1, 8),
    t(256, 256, 64, 8, 8, 0, 1, 8),
    t(256, 32, 128, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 8),
    t(64, 32, 32, 4, 4, 0, 1, 4),
    t(256, 128, 32, 4, 4, 0, 1, 4),
    // safety net
    t(256, 128, 128, 8, 8, 0, 1, 2),
    t(256, 128, 128, 8, 8, 0, 1, 1),
];

#[rustfmt::skip]
pub static F16_RANK4: &[TuningParams] = &[
    t(64, 128, 32, 8, 8, 0, 1, 8),
    t(256, 128, 128, 8, 8, 0, 1, 8),
    t(128, 256, 32, 8, 8, 0, 1, 8),
    t(32, 64, 32, 8, 8, 0, 1, 8),
    t(256, 128, 32, 4, 4, 0, 1, 4),
    t(256, 64, 256, 8, 8, 0, 1, 8),
    t(128, 64, 32, 4, 4, 0, 1, 4),
    t(256, 128, 128, 16, 16, 0, 1, 4),
    t(256, 128, 128, 16, 16, 1, 0, 4),
    t(64, 32, 128, 8, 8, 0, 1, 8),
    t(256, 256, 64, 8, 8, 0, 1, 8),
    t(64, 32, 32, 4, 4, 0, 1, 4),
    t(128, 128, 64, 8, 8, 0, 1, 8),
    t(64, 64, 64, 8, 8, 0, 1, 8),
    t(128, 64, 128, 8, 8, 0, 1, 8),
    t(256, 128, 128, 16, 16, 0, 1, 16),
    t(256, 128, 128, 16, 16, 0, 1, 8),
    t(128, 32, 256, 8, 8, 0, 1, 8),
    t(256, 32, 128, 4, 4, 0, 1, 4),
    t(256, 128, 128, 8, 8, 0, 1, 1),
    // safety net
    t(64, 128, 32, 8, 8, 0, 1, 2),
    t(64, 128, 32, 8, 8, 0, 1, 1),
];

/// Shared by ranks 5 and 6 regardless of type.
#[rustfmt::skip]
pub static HIGH_RANK: &[TuningParams] = &[
    t(256, 64, 64, 4, 4, 0, 1, 4),
    t(256, 64, 64, 4, 4, 0, 1, 2),
    t(256, 64, 64, 4, 4, 0, 1, 1),
];

/// Tuning table for a generated (type, rank) pair, or `None` if no kernels
/// are generated for it.
pub fn table(dtype: DType, rank: u32) -> Option<&'static [TuningParams]> {
    match (dtype, rank) {
        (DType::Float32, 2) => Some(F32_RANK2),
        (DType::Float32, 3) => Some(F32_RANK3),
        (DType::Float32, 4) => Some(F32_RANK4),
        (DType::Float16, 2) => Some(F16_RANK2),
        (DType::Float16, 3) => Some(F16_RANK3),
        (DType::Float16, 4) => Some(F16_RANK4),
        (DType::Float32 | DType::Float16, 5 | 6) => Some(HIGH_RANK),
        _ => None,
    }
}
