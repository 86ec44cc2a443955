//! Solution registry.
//!
//! Owns every kernel instance and resolves candidate identity lists against
//! them. Immutable once built; all queries take `&self` and may run
//! concurrently.

use std::collections::HashMap;

use tessera_device::{KernelInstance, TuningParams};
use tessera_dtype::{DType, PermutationOp, UnaryOp};
use tracing::trace;

use crate::candidates::{all_vector_width_candidates, best_perf_candidates};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::problem::{InstanceType, PermutationProblem};
use crate::selection::{InstanceSelector, SelectionInput};
use crate::uid::Uid;

#[derive(Debug, Default)]
pub struct SolutionRegistry {
    solutions: HashMap<Uid, Box<dyn KernelInstance>>,
}

impl SolutionRegistry {
    /// Build the full catalog.
    pub fn build() -> Result<Self> {
        Ok(Self::from_catalog(Catalog::build()?))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { solutions: catalog.into_instances() }
    }

    /// Instances registered under `candidates`, in candidate order.
    /// Unregistered identities are skipped.
    pub fn query(&self, candidates: &[Uid]) -> Vec<&dyn KernelInstance> {
        candidates
            .iter()
            .filter_map(|uid| match self.solutions.get(uid) {
                Some(instance) => Some(instance.as_ref()),
                None => {
                    trace!(%uid, "candidate not registered");
                    None
                }
            })
            .collect()
    }

    /// Best-guess instance for `params` followed by the safety net.
    #[allow(clippy::too_many_arguments)]
    pub fn query_instances(
        &self,
        type_in: DType,
        type_out: DType,
        op_a: UnaryOp,
        op_b: UnaryOp,
        permutation: PermutationOp,
        rank: u32,
        params: &TuningParams,
    ) -> Vec<&dyn KernelInstance> {
        self.query(&best_perf_candidates(type_in, type_out, op_a, op_b, permutation, rank, params))
    }

    /// Every vector width of `params` from widest down to the host reference.
    #[allow(clippy::too_many_arguments)]
    pub fn query_all_widths(
        &self,
        type_in: DType,
        type_out: DType,
        op_a: UnaryOp,
        op_b: UnaryOp,
        permutation: PermutationOp,
        rank: u32,
        params: &TuningParams,
    ) -> Vec<&dyn KernelInstance> {
        self.query(&all_vector_width_candidates(type_in, type_out, op_a, op_b, permutation, rank, params))
    }

    /// Ordered instances for a concrete problem.
    ///
    /// On the device path the selector picks the tuple; the host path uses the
    /// all-zero reference tuple so only the reference instance and the safety
    /// net can match.
    pub fn query_problem(
        &self,
        problem: &PermutationProblem,
        instance_type: InstanceType,
        selector: &dyn InstanceSelector,
    ) -> Result<Vec<&dyn KernelInstance>> {
        let (params, permutation) = self.resolve(problem, instance_type, selector)?;
        Ok(self.query_instances(
            problem.a.dtype,
            problem.b.dtype,
            problem.a.op,
            problem.b.op,
            permutation,
            problem.rank() as u32,
            &params,
        ))
    }

    /// Every instance that could serve `problem`, for capability queries that
    /// do not yet know the alignment of the eventual pointers.
    pub fn query_problem_all_widths(
        &self,
        problem: &PermutationProblem,
        selector: &dyn InstanceSelector,
    ) -> Result<Vec<&dyn KernelInstance>> {
        let (params, permutation) = self.resolve(problem, InstanceType::Device, selector)?;
        Ok(self.query_all_widths(
            problem.a.dtype,
            problem.b.dtype,
            problem.a.op,
            problem.b.op,
            permutation,
            problem.rank() as u32,
            &params,
        ))
    }

    fn resolve(
        &self,
        problem: &PermutationProblem,
        instance_type: InstanceType,
        selector: &dyn InstanceSelector,
    ) -> Result<(TuningParams, PermutationOp)> {
        let params = match instance_type {
            InstanceType::Device => selector.select(&SelectionInput {
                lengths: &problem.a.lengths,
                output_dims: problem.output_dims(),
                type_in: problem.a.dtype,
                type_out: problem.b.dtype,
                rank: problem.rank() as u32,
            }),
            InstanceType::Host => TuningParams::REFERENCE,
        };
        let permutation = permutation_kind(problem.a.op, problem.b.op, problem.alpha()?, instance_type);
        Ok((params, permutation))
    }

    /// Total registered instances.
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    pub fn contains(&self, uid: Uid) -> bool {
        self.solutions.contains_key(&uid)
    }

    pub fn get(&self, uid: Uid) -> Option<&dyn KernelInstance> {
        self.solutions.get(&uid).map(|instance| instance.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uid, &dyn KernelInstance)> {
        self.solutions.iter().map(|(uid, instance)| (*uid, instance.as_ref()))
    }
}

/// Kind to query under.
///
/// Identity operators with a multiplier of exactly one only move data, which
/// dedicated pass-through instances do faster. Those only exist as device
/// kernels, so the host path always asks for `Scale`.
pub fn permutation_kind(op_a: UnaryOp, op_b: UnaryOp, alpha: f32, instance_type: InstanceType) -> PermutationOp {
    let pass_through =
        op_a == UnaryOp::Identity && op_b == UnaryOp::Identity && alpha == 1.0 && instance_type == InstanceType::Device;
    if pass_through { PermutationOp::PassThrough } else { PermutationOp::Scale }
}
