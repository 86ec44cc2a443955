//! Instance identities.
//!
//! A [`Uid`] is the xxh64 digest of an instance's structural signature. The
//! fields are always fed in the same order, each as its resolved `u32` value
//! in little-endian byte order, so the catalog (which hashes signatures of
//! constructed instances) and the query path (which hashes fields recomputed
//! from problem metadata) agree without ever touching the instances.
//!
//! The digest is 64 bits wide. Distinct signatures colliding is possible in
//! principle; the catalog rejects such a collision at build time.

use std::fmt;

use tessera_device::{InstanceSignature, TuningParams};
use tessera_dtype::{DType, PermutationOp, UnaryOp};
use xxhash_rust::xxh64::Xxh64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(pub u64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Uid {
    pub fn of(signature: &InstanceSignature) -> Self {
        Self::from_parts(
            signature.type_in,
            signature.type_out,
            signature.op_a,
            signature.op_b,
            signature.permutation,
            signature.rank,
            &signature.params,
        )
    }

    pub fn from_parts(
        type_in: DType,
        type_out: DType,
        op_a: UnaryOp,
        op_b: UnaryOp,
        permutation: PermutationOp,
        rank: u32,
        params: &TuningParams,
    ) -> Self {
        identity(
            type_in,
            type_out,
            op_a,
            op_b,
            permutation,
            rank,
            params.block_size,
            params.m0_per_block,
            params.m1_per_block,
            params.m0_per_thread,
            params.m1_per_thread,
            params.cluster_order[0],
            params.cluster_order[1],
            params.in_vector_width,
            params.out_vector_width,
        )
    }
}

/// Identity of the instance with the given structural fields.
#[allow(clippy::too_many_arguments)]
pub fn identity(
    type_in: DType,
    type_out: DType,
    op_a: UnaryOp,
    op_b: UnaryOp,
    permutation: PermutationOp,
    rank: u32,
    block_size: u32,
    m0_per_block: u32,
    m1_per_block: u32,
    m0_per_thread: u32,
    m1_per_thread: u32,
    cluster_order0: u32,
    cluster_order1: u32,
    in_vector_width: u32,
    out_vector_width: u32,
) -> Uid {
    let fields = [
        type_in.tag(),
        type_out.tag(),
        op_a.tag(),
        op_b.tag(),
        permutation.tag(),
        rank,
        block_size,
        m0_per_block,
        m1_per_block,
        m0_per_thread,
        m1_per_thread,
        cluster_order0,
        cluster_order1,
        in_vector_width,
        out_vector_width,
    ];

    let mut hasher = Xxh64::new(0);
    for field in fields {
        hasher.update(&field.to_le_bytes());
    }
    Uid(hasher.digest())
}
