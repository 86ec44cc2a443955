use std::marker::PhantomData;

use snafu::ensure;
use tessera_dtype::{Element, PermutationOp, UnaryOp};

use super::host;
use crate::args::ElementwiseArgs;
use crate::error::{Result, UnsupportedArgumentSnafu};
use crate::kernel::KernelInstance;
use crate::params::{InstanceSignature, TuningParams};
use crate::stream::StreamConfig;

/// Host reference permutation. Registered under the all-zero tuning tuple.
#[derive(Debug)]
pub struct ReferencePermute<T: Element> {
    signature: InstanceSignature,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> ReferencePermute<T> {
    pub fn new(op_a: UnaryOp, op_b: UnaryOp, rank: u32) -> Self {
        let signature = InstanceSignature {
            type_in: T::DTYPE,
            type_out: T::DTYPE,
            op_a,
            op_b,
            permutation: PermutationOp::Scale,
            rank,
            params: TuningParams::REFERENCE,
        };
        Self { signature, _element: PhantomData }
    }
}

impl<T: Element> KernelInstance for ReferencePermute<T> {
    fn signature(&self) -> &InstanceSignature {
        &self.signature
    }

    fn is_supported(&self, args: &ElementwiseArgs) -> bool {
        args.rank() == self.signature.rank as usize && args.op_a == self.signature.op_a && args.op_b == self.signature.op_b
    }

    unsafe fn run(&self, args: &ElementwiseArgs, config: &StreamConfig<'_>) -> Result<f32> {
        ensure!(self.is_supported(args), UnsupportedArgumentSnafu { kernel: self.type_string() });

        let elapsed = host::launch(config, self.type_string(), args.element_count(), || unsafe {
            host::permute::<T>(args, PermutationOp::Scale)
        });
        Ok(elapsed)
    }

    fn type_string(&self) -> String {
        format!("reference_{}_{}", self.signature.rank, self.signature.type_in)
    }
}
