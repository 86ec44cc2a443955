use std::fmt;

use tessera_dtype::{DType, PermutationOp, UnaryOp};

/// Micro-architectural parameters distinguishing kernels that share types,
/// operators and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TuningParams {
    pub block_size: u32,
    pub m0_per_block: u32,
    pub m1_per_block: u32,
    pub m0_per_thread: u32,
    pub m1_per_thread: u32,
    pub cluster_order: [u32; 2],
    pub in_vector_width: u32,
    pub out_vector_width: u32,
}

impl TuningParams {
    /// All-zero sentinel: no accelerator instance, host reference only.
    pub const REFERENCE: Self = Self::new(0, 0, 0, 0, 0, [0, 0], 0);

    /// Tuple with equal input and output vector widths.
    #[rustfmt::skip]
    pub const fn new(
        block_size: u32, m0_per_block: u32, m1_per_block: u32, m0_per_thread: u32, m1_per_thread: u32,
        cluster_order: [u32; 2], vector_width: u32,
    ) -> Self {
        Self {
            block_size, m0_per_block, m1_per_block, m0_per_thread, m1_per_thread, cluster_order,
            in_vector_width: vector_width,
            out_vector_width: vector_width,
        }
    }

    pub const fn with_vector_width(self, width: u32) -> Self {
        Self { in_vector_width: width, out_vector_width: width, ..self }
    }

    pub const fn is_reference(&self) -> bool {
        self.in_vector_width == 0 && self.out_vector_width == 0
    }
}

/// Underscore-joined field list, e.g. `256_64_64_4_4_0_1_4_4`.
impl fmt::Display for TuningParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}_{}_{}_{}_{}",
            self.block_size,
            self.m0_per_block,
            self.m1_per_block,
            self.m0_per_thread,
            self.m1_per_thread,
            self.cluster_order[0],
            self.cluster_order[1],
            self.in_vector_width,
            self.out_vector_width
        )
    }
}

/// Full structural signature of a kernel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceSignature {
    pub type_in: DType,
    pub type_out: DType,
    pub op_a: UnaryOp,
    pub op_b: UnaryOp,
    pub permutation: PermutationOp,
    pub rank: u32,
    pub params: TuningParams,
}

impl fmt::Display for InstanceSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{} {}/{} {} rank {} [{}]",
            self.type_in, self.type_out, self.op_a, self.op_b, self.permutation, self.rank, self.params
        )
    }
}
