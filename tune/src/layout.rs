//! Problem layout from command-line extents.

use itertools::Itertools;
use smallvec::SmallVec;
use snafu::ensure;
use tessera_device::MAX_RANK;

use crate::error::{ArgumentCountSnafu, InvalidPermutationSnafu, Result};

pub type Dims = SmallVec<[usize; MAX_RANK]>;

/// Packed column-major input and permuted output of one tuning problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub input_lengths: Dims,
    pub output_dims: Dims,
    pub output_lengths: Dims,
    pub a_strides: Dims,
    /// Output strides in input dimension order.
    pub b_strides: Dims,
}

impl Layout {
    /// Split `values` into `rank` input lengths followed by `rank` output
    /// dimensions.
    pub fn from_values(values: &[usize]) -> Result<Self> {
        let count = values.len();
        ensure!(count % 2 == 0 && (2..=2 * MAX_RANK).contains(&count), ArgumentCountSnafu { count, max: MAX_RANK });

        let (lengths, output_dims) = values.split_at(count / 2);
        Self::new(lengths, output_dims)
    }

    pub fn new(input_lengths: &[usize], output_dims: &[usize]) -> Result<Self> {
        let rank = input_lengths.len();
        ensure!(
            output_dims.len() == rank && output_dims.iter().copied().sorted().eq(0..rank),
            InvalidPermutationSnafu { dims: output_dims.to_vec(), rank }
        );

        let output_lengths: Dims = output_dims.iter().map(|&d| input_lengths[d]).collect();
        let unordered = column_major(&output_lengths);
        let mut b_strides: Dims = SmallVec::from_elem(0, rank);
        for (i, &d) in output_dims.iter().enumerate() {
            b_strides[d] = unordered[i];
        }

        Ok(Self {
            input_lengths: Dims::from_slice(input_lengths),
            output_dims: Dims::from_slice(output_dims),
            a_strides: column_major(input_lengths),
            output_lengths,
            b_strides,
        })
    }

    pub fn rank(&self) -> usize {
        self.input_lengths.len()
    }

    pub fn element_count(&self) -> usize {
        self.input_lengths.iter().product()
    }
}

fn column_major(lengths: &[usize]) -> Dims {
    lengths
        .iter()
        .scan(1, |stride, &len| {
            let current = *stride;
            *stride *= len;
            Some(current)
        })
        .collect()
}
