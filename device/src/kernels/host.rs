use std::time::Instant;

use smallvec::smallvec;
use tessera_dtype::{Element, PermutationOp};

use crate::args::{Dims, ElementwiseArgs};
use crate::stream::{LaunchRecord, StreamConfig};

/// `b[perm(i)] = op_b(alpha * op_a(a[i]))` over every index of `args.lengths`.
///
/// `PassThrough` copies elements unchanged.
///
/// # Safety
///
/// Same requirements as [`crate::KernelInstance::run`].
pub(crate) unsafe fn permute<T: Element>(args: &ElementwiseArgs, permutation: PermutationOp) {
    let rank = args.rank();
    if args.element_count() == 0 {
        return;
    }

    let a = args.a as *const T;
    let b = args.b as *mut T;
    let mut index: Dims = smallvec![0; rank];

    loop {
        let a_offset: usize = index.iter().zip(&args.a_strides).map(|(i, s)| i * s).sum();
        let b_offset: usize = index.iter().zip(&args.b_strides).map(|(i, s)| i * s).sum();

        let x = unsafe { a.add(a_offset).read_unaligned() };
        let y = match permutation {
            PermutationOp::PassThrough => x,
            PermutationOp::Scale => T::from_f32(args.op_b.apply(args.alpha * args.op_a.apply(x.to_f32()))),
        };
        unsafe { b.add(b_offset).write_unaligned(y) };

        // Column-major walk: dimension 0 varies fastest.
        let mut dim = 0;
        loop {
            if dim == rank {
                return;
            }
            index[dim] += 1;
            if index[dim] < args.lengths[dim] {
                break;
            }
            index[dim] = 0;
            dim += 1;
        }
    }
}

/// Record the launch on the configured stream and execute `body`, timing it
/// when requested.
pub(crate) fn launch(config: &StreamConfig<'_>, kernel: String, elements: usize, mut body: impl FnMut()) -> f32 {
    if let Some(stream) = config.stream {
        stream.record(LaunchRecord { kernel, elements });
    }

    if !config.time_kernel {
        body();
        return 0.0;
    }

    for _ in 0..config.cold_niters {
        body();
    }
    let repeats = config.nrepeat.max(1);
    let start = Instant::now();
    for _ in 0..repeats {
        body();
    }
    start.elapsed().as_secs_f32() * 1e3 / repeats as f32
}
