//! Permutation problem descriptors.
//!
//! A problem is two tensor descriptors plus their mode labels: B's dimension
//! `i` carries the mode `modes_b[i]`, which must also appear somewhere in A.

use std::fmt;

use itertools::Itertools;
use smallvec::SmallVec;
use snafu::{OptionExt, ResultExt, ensure};
use tessera_device::{ElementwiseArgs, MAX_RANK};
use tessera_dtype::{DType, UnaryOp, read_scalar};

use crate::error::{
    DTypeSnafu, DeviceSnafu, DuplicateModeSnafu, ExtentMismatchSnafu, ModeCountSnafu, ModeNotFoundSnafu,
    RankMismatchSnafu, Result, StrideCountSnafu,
};

pub type Dims = SmallVec<[usize; MAX_RANK]>;
pub type Modes = SmallVec<[i32; MAX_RANK]>;

/// Where the selected instances run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InstanceType {
    /// Accelerator kernels chosen by the selector.
    #[default]
    Device,
    /// Host reference only.
    Host,
}

/// Shape, layout, element type and unary operator of one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorDescriptor {
    pub dtype: DType,
    pub lengths: Dims,
    pub strides: Dims,
    pub op: UnaryOp,
}

impl TensorDescriptor {
    /// Descriptor with explicit element strides, or packed column-major ones
    /// when `strides` is `None`.
    pub fn new(dtype: DType, lengths: &[usize], strides: Option<&[usize]>, op: UnaryOp) -> Result<Self> {
        let strides = match strides {
            Some(strides) => {
                ensure!(
                    strides.len() == lengths.len(),
                    StrideCountSnafu { lengths: lengths.len(), strides: strides.len() }
                );
                Dims::from_slice(strides)
            }
            None => packed_strides(lengths),
        };
        Ok(Self { dtype, lengths: Dims::from_slice(lengths), strides, op })
    }

    pub fn rank(&self) -> usize {
        self.lengths.len()
    }
}

fn packed_strides(lengths: &[usize]) -> Dims {
    let mut stride = 1;
    lengths
        .iter()
        .map(|&len| {
            let current = stride;
            stride *= len;
            current
        })
        .collect()
}

/// For every mode of `modes_b`, its position in `modes_a`.
pub fn find_indices(modes_a: &[i32], modes_b: &[i32]) -> Result<Dims> {
    modes_b
        .iter()
        .map(|&mode| modes_a.iter().position(|&m| m == mode).context(ModeNotFoundSnafu { mode }))
        .collect()
}

/// `B = op_b(alpha * op_a(A))` with B's dimensions a permutation of A's.
#[derive(Debug, Clone)]
pub struct PermutationProblem {
    pub a: TensorDescriptor,
    pub modes_a: Modes,
    pub b: TensorDescriptor,
    pub modes_b: Modes,
    /// Raw host bytes of the multiplier; `None` means 1.
    pub alpha: Option<SmallVec<[u8; 8]>>,
    /// Type of the multiplier's tensor; its compute type decides how `alpha`
    /// is decoded.
    pub scalar_type: DType,
    output_dims: Dims,
}

impl PermutationProblem {
    pub fn new(a: TensorDescriptor, modes_a: &[i32], b: TensorDescriptor, modes_b: &[i32]) -> Result<Self> {
        ensure!(a.rank() == b.rank(), RankMismatchSnafu { a: a.rank(), b: b.rank() });
        ensure!(modes_a.len() == a.rank(), ModeCountSnafu { modes: modes_a.len(), rank: a.rank() });
        ensure!(modes_b.len() == b.rank(), ModeCountSnafu { modes: modes_b.len(), rank: b.rank() });

        for modes in [modes_a, modes_b] {
            if let Some(&mode) = modes.iter().duplicates().next() {
                return DuplicateModeSnafu { mode }.fail();
            }
        }

        let output_dims = find_indices(modes_a, modes_b)?;
        for (i, &d) in output_dims.iter().enumerate() {
            ensure!(
                b.lengths[i] == a.lengths[d],
                ExtentMismatchSnafu { mode: modes_b[i], a: a.lengths[d], b: b.lengths[i] }
            );
        }

        let scalar_type = a.dtype;
        Ok(Self {
            a,
            modes_a: Modes::from_slice(modes_a),
            b,
            modes_b: Modes::from_slice(modes_b),
            alpha: None,
            scalar_type,
            output_dims,
        })
    }

    pub fn with_alpha(mut self, bytes: &[u8], scalar_type: DType) -> Self {
        self.alpha = Some(SmallVec::from_slice(bytes));
        self.scalar_type = scalar_type;
        self
    }

    /// Convenience for an `f32` multiplier.
    pub fn with_alpha_f32(self, alpha: f32) -> Self {
        self.with_alpha(&alpha.to_le_bytes(), DType::Float32)
    }

    pub fn rank(&self) -> usize {
        self.a.rank()
    }

    /// Position in A of each dimension of B.
    pub fn output_dims(&self) -> &[usize] {
        &self.output_dims
    }

    /// Decoded multiplier, 1.0 when none was given.
    pub fn alpha(&self) -> Result<f32> {
        match &self.alpha {
            Some(bytes) => read_scalar(bytes, self.scalar_type.compute_type()).context(DTypeSnafu),
            None => Ok(1.0),
        }
    }

    /// B's strides reordered into A's dimension order.
    pub fn b_strides_in_a_order(&self) -> Dims {
        let mut strides: Dims = SmallVec::from_elem(0, self.rank());
        for (i, &d) in self.output_dims.iter().enumerate() {
            strides[d] = self.b.strides[i];
        }
        strides
    }

    /// Launch arguments for concrete device pointers.
    pub fn args(&self, a: *const u8, b: *mut u8) -> Result<ElementwiseArgs> {
        ElementwiseArgs::new(
            &self.a.lengths,
            &self.a.strides,
            &self.b_strides_in_a_order(),
            a,
            b,
            self.a.op,
            self.b.op,
            self.alpha()?,
        )
        .context(DeviceSnafu)
    }
}

impl fmt::Display for PermutationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} permutation {:?} -> {:?} of extents {:?}",
            self.a.dtype,
            self.modes_a.as_slice(),
            self.modes_b.as_slice(),
            self.a.lengths.as_slice()
        )
    }
}
