use std::marker::PhantomData;

use snafu::ensure;
use tessera_dtype::{Element, PermutationOp, UnaryOp};
use tracing::trace;

use super::host;
use crate::args::ElementwiseArgs;
use crate::error::{Result, UnsupportedArgumentSnafu};
use crate::kernel::KernelInstance;
use crate::params::{InstanceSignature, TuningParams};
use crate::stream::StreamConfig;

/// Element-wise permutation kernel with a fixed tuning tuple.
///
/// The vector widths constrain which layouts the kernel accepts: for width
/// `w > 1` the operand needs a unit-stride dimension whose extent is a
/// multiple of `w`, and its base pointer must be aligned to `w` elements.
#[derive(Debug)]
pub struct ElementwisePermute<T: Element> {
    signature: InstanceSignature,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> ElementwisePermute<T> {
    pub fn new(op_a: UnaryOp, op_b: UnaryOp, permutation: PermutationOp, rank: u32, params: TuningParams) -> Self {
        let signature =
            InstanceSignature { type_in: T::DTYPE, type_out: T::DTYPE, op_a, op_b, permutation, rank, params };
        Self { signature, _element: PhantomData }
    }
}

fn vectorizable(args: &ElementwiseArgs, strides: &[usize], ptr: usize, width: usize, element: usize) -> bool {
    if width <= 1 {
        return true;
    }
    let has_vector_dim = args.lengths.iter().zip(strides).any(|(&len, &stride)| stride == 1 && len % width == 0);
    has_vector_dim && ptr % (width * element) == 0
}

impl<T: Element> KernelInstance for ElementwisePermute<T> {
    fn signature(&self) -> &InstanceSignature {
        &self.signature
    }

    fn is_supported(&self, args: &ElementwiseArgs) -> bool {
        let sig = &self.signature;
        if args.rank() != sig.rank as usize || args.op_a != sig.op_a || args.op_b != sig.op_b {
            return false;
        }
        if sig.permutation == PermutationOp::PassThrough && args.alpha != 1.0 {
            return false;
        }

        let element = std::mem::size_of::<T>();
        let in_ok = vectorizable(args, &args.a_strides, args.a as usize, sig.params.in_vector_width as usize, element);
        let out_ok = vectorizable(args, &args.b_strides, args.b as usize, sig.params.out_vector_width as usize, element);
        if !(in_ok && out_ok) {
            trace!(kernel = %self.type_string(), lengths = ?args.lengths, "vector width does not fit layout");
        }
        in_ok && out_ok
    }

    unsafe fn run(&self, args: &ElementwiseArgs, config: &StreamConfig<'_>) -> Result<f32> {
        ensure!(self.is_supported(args), UnsupportedArgumentSnafu { kernel: self.type_string() });

        let permutation = self.signature.permutation;
        let elapsed = host::launch(config, self.type_string(), args.element_count(), || unsafe {
            host::permute::<T>(args, permutation)
        });
        Ok(elapsed)
    }

    fn type_string(&self) -> String {
        format!("{}_{}", self.signature.rank, self.signature.params)
    }
}
