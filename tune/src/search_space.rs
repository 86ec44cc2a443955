//! Exhaustive instance families swept by the tuner.
//!
//! Each family fixes the thread-block shape and enumerates cluster orders and
//! vector widths. The registry catalog is a curated subset of this space.

use itertools::iproduct;
use tessera_device::{ElementwisePermute, KernelInstance, TuningParams};
use tessera_dtype::{Element, PermutationOp, UnaryOp};

/// Block size and the four per-block/per-thread extents.
type Shape = (u32, u32, u32, u32, u32);

const ORDERS: [[u32; 2]; 2] = [[0, 1], [1, 0]];

/// Shape swept over both cluster orders and the listed widths.
struct Family {
    name: &'static str,
    shape: Shape,
    widths: &'static [u32],
}

const FAMILIES: [Family; 4] = [
    Family { name: "256_64_64_4_4", shape: (256, 64, 64, 4, 4), widths: &[1, 2, 4] },
    Family { name: "256_64_64_16_16", shape: (256, 64, 64, 16, 16), widths: &[1, 2, 4, 8, 16] },
    Family { name: "256_128_128_8_8", shape: (256, 128, 128, 8, 8), widths: &[1, 2, 4, 8] },
    Family { name: "256_128_128_16_16", shape: (256, 128, 128, 16, 16), widths: &[1, 2, 4, 8, 16] },
];

#[rustfmt::skip]
const MISC_THREAD_4: [Shape; 12] = [
    (256, 64, 64, 4, 4), (256, 128, 32, 4, 4), (256, 32, 128, 4, 4),
    (128, 64, 32, 4, 4), (128, 32, 64, 4, 4), (128, 16, 128, 4, 4),
    (128, 128, 16, 4, 4), (64, 32, 32, 4, 4), (64, 16, 64, 4, 4),
    (64, 64, 16, 4, 4), (32, 32, 16, 4, 4), (32, 16, 32, 4, 4),
];

#[rustfmt::skip]
const MISC_THREAD_8: [Shape; 12] = [
    (256, 128, 128, 8, 8), (256, 256, 64, 8, 8), (256, 64, 256, 8, 8),
    (128, 128, 64, 8, 8), (128, 64, 128, 8, 8), (128, 32, 256, 8, 8),
    (128, 256, 32, 8, 8), (64, 64, 64, 8, 8), (64, 32, 128, 8, 8),
    (64, 128, 32, 8, 8), (32, 64, 32, 8, 8), (32, 32, 64, 8, 8),
];

fn params((block, m0b, m1b, m0t, m1t): Shape, order: [u32; 2], width: u32) -> TuningParams {
    TuningParams::new(block, m0b, m1b, m0t, m1t, order, width)
}

/// Every tuple of the search space, family by family.
pub fn tunings() -> Vec<(&'static str, TuningParams)> {
    let mut tunings: Vec<_> = FAMILIES
        .iter()
        .flat_map(|family| {
            iproduct!(ORDERS, family.widths).map(move |(order, &width)| (family.name, params(family.shape, order, width)))
        })
        .collect();

    let misc = MISC_THREAD_4
        .iter()
        .map(|&shape| params(shape, [0, 1], 4))
        .chain(MISC_THREAD_8.iter().map(|&shape| params(shape, [0, 1], 8)))
        .chain(MISC_THREAD_4.iter().map(|&shape| params(shape, [0, 1], 1)));
    tunings.extend(misc.map(|tuning| ("miscellaneous", tuning)));
    tunings
}

/// Pass-through instances of the whole search space for element type `T`.
pub fn instances<T: Element>(rank: u32) -> Vec<Box<dyn KernelInstance>> {
    tunings()
        .into_iter()
        .map(|(_, tuning)| {
            Box::new(ElementwisePermute::<T>::new(
                UnaryOp::Identity,
                UnaryOp::Identity,
                PermutationOp::PassThrough,
                rank,
                tuning,
            )) as Box<dyn KernelInstance>
        })
        .collect()
}
