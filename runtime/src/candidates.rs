//! Candidate identity lists.
//!
//! Both generators are pure functions of problem metadata. They may emit
//! identities nothing was registered under; the registry drops those.

use tessera_device::TuningParams;
use tessera_dtype::{DType, PermutationOp, UnaryOp};

use crate::uid::Uid;

/// Vector widths tried by the full sweep, widest first. 16 performs best on
/// average; 1 accepts every layout.
pub const VECTOR_WIDTHS: [u32; 5] = [16, 8, 4, 2, 1];

/// Hand-picked fallback shape and widths for a (type, rank) pair.
fn safety_net(type_in: DType, rank: u32) -> Option<(TuningParams, &'static [u32])> {
    const WIDE: TuningParams = TuningParams::new(256, 64, 64, 4, 4, [0, 1], 0);
    const WIDTHS_2_1: &[u32] = &[2, 1];
    const WIDTHS_4_2_1: &[u32] = &[4, 2, 1];

    match (rank, type_in) {
        (2, DType::Float16) => Some((TuningParams::new(64, 32, 128, 8, 8, [0, 1], 0), WIDTHS_2_1)),
        (3, DType::Float16) => Some((TuningParams::new(256, 128, 128, 8, 8, [0, 1], 0), WIDTHS_2_1)),
        (4, DType::Float16) => Some((TuningParams::new(64, 128, 32, 8, 8, [0, 1], 0), WIDTHS_2_1)),
        (2..=4, DType::Float32) => Some((WIDE, WIDTHS_2_1)),
        (5 | 6, _) => Some((WIDE, WIDTHS_4_2_1)),
        _ => None,
    }
}

/// Identity of the selected tuple followed by the safety net for
/// `(type_in, rank)`.
///
/// The selected tuple is probed with its input width on both sides. Callers
/// must try the instances in order and stop at the first that accepts.
#[allow(clippy::too_many_arguments)]
pub fn best_perf_candidates(
    type_in: DType,
    type_out: DType,
    op_a: UnaryOp,
    op_b: UnaryOp,
    permutation: PermutationOp,
    rank: u32,
    params: &TuningParams,
) -> Vec<Uid> {
    let uid = |p: &TuningParams| Uid::from_parts(type_in, type_out, op_a, op_b, permutation, rank, p);

    let mut uids = vec![uid(&params.with_vector_width(params.in_vector_width))];
    if let Some((shape, widths)) = safety_net(type_in, rank) {
        uids.extend(widths.iter().map(|&width| uid(&shape.with_vector_width(width))));
    }
    uids
}

/// One identity per vector width in [`VECTOR_WIDTHS`] not wider than the
/// tuple's input width, widest first, followed by the host reference.
///
/// The reference entry is the all-zero tuple under `Scale`, the only kind
/// reference instances are registered with.
#[allow(clippy::too_many_arguments)]
pub fn all_vector_width_candidates(
    type_in: DType,
    type_out: DType,
    op_a: UnaryOp,
    op_b: UnaryOp,
    permutation: PermutationOp,
    rank: u32,
    params: &TuningParams,
) -> Vec<Uid> {
    let nominal = params.in_vector_width;

    let mut uids: Vec<Uid> = VECTOR_WIDTHS
        .iter()
        .filter(|&&width| width <= nominal)
        .map(|&width| {
            Uid::from_parts(type_in, type_out, op_a, op_b, permutation, rank, &params.with_vector_width(width))
        })
        .collect();
    uids.push(Uid::from_parts(type_in, type_out, op_a, op_b, PermutationOp::Scale, rank, &TuningParams::REFERENCE));
    uids
}
