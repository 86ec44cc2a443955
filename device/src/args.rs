use smallvec::SmallVec;
use snafu::ensure;
use tessera_dtype::UnaryOp;

use crate::error::{NullPointerSnafu, RankMismatchSnafu, RankTooLargeSnafu, Result};

/// Highest tensor rank any kernel is generated for.
pub const MAX_RANK: usize = 6;

pub type Dims = SmallVec<[usize; MAX_RANK]>;

/// Concrete launch arguments for an element-wise permutation.
///
/// Both stride arrays are expressed in the input's dimension order:
/// `b_strides[d]` is the output stride of input dimension `d`. Strides are in
/// elements, not bytes.
#[derive(Debug, Clone)]
pub struct ElementwiseArgs {
    pub lengths: Dims,
    pub a_strides: Dims,
    pub b_strides: Dims,
    pub a: *const u8,
    pub b: *mut u8,
    pub op_a: UnaryOp,
    pub op_b: UnaryOp,
    pub alpha: f32,
}

impl ElementwiseArgs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lengths: &[usize],
        a_strides: &[usize],
        b_strides: &[usize],
        a: *const u8,
        b: *mut u8,
        op_a: UnaryOp,
        op_b: UnaryOp,
        alpha: f32,
    ) -> Result<Self> {
        ensure!(
            lengths.len() == a_strides.len() && lengths.len() == b_strides.len(),
            RankMismatchSnafu { lengths: lengths.len(), a_strides: a_strides.len(), b_strides: b_strides.len() }
        );
        ensure!(lengths.len() <= MAX_RANK, RankTooLargeSnafu { rank: lengths.len(), max: MAX_RANK });
        ensure!(!a.is_null(), NullPointerSnafu { operand: "input" });
        ensure!(!b.is_null(), NullPointerSnafu { operand: "output" });

        Ok(Self {
            lengths: Dims::from_slice(lengths),
            a_strides: Dims::from_slice(a_strides),
            b_strides: Dims::from_slice(b_strides),
            a,
            b,
            op_a,
            op_b,
            alpha,
        })
    }

    pub fn rank(&self) -> usize {
        self.lengths.len()
    }

    pub fn element_count(&self) -> usize {
        self.lengths.iter().product()
    }
}
