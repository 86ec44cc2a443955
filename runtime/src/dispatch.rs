//! Dispatch loop.
//!
//! Probes the ordered instance list for a problem and runs the first
//! instance that accepts the concrete arguments. Nothing accepting is the only
//! failure surfaced from selection.

use snafu::{ResultExt, ensure};
use tessera_device::{KernelInstance, Stream};
use tracing::{debug, trace};

use crate::context::Context;
use crate::error::{DeviceSnafu, NoAcceptingInstanceSnafu, Result};
use crate::problem::PermutationProblem;
use crate::uid::Uid;

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub uid: Uid,
    pub kernel: String,
    /// Scratch bytes the kernel asked for.
    pub workspace: usize,
    /// Mean kernel time in milliseconds, `0.0` unless timing is enabled.
    pub elapsed_ms: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'c> {
    context: &'c Context,
}

impl<'c> Dispatcher<'c> {
    pub fn new(context: &'c Context) -> Self {
        Self { context }
    }

    /// Run `problem` on `stream` with the first accepting instance.
    ///
    /// # Safety
    ///
    /// `a` and `b` must point to buffers covering every element reachable
    /// through the problem's lengths and strides, and stay valid until the
    /// stream has executed the launch.
    pub unsafe fn permute(
        &self,
        problem: &PermutationProblem,
        a: *const u8,
        b: *mut u8,
        stream: &Stream,
    ) -> Result<Launch> {
        let config = self.context.config();
        let registry = self.context.registry()?;
        let instances = registry.query_problem(problem, config.instance_type, self.context.selector())?;
        ensure!(!instances.is_empty(), NoAcceptingInstanceSnafu { problem: problem.to_string(), candidates: 0usize });
        let args = problem.args(a, b)?;

        for instance in &instances {
            if !instance.is_supported(&args) {
                trace!(kernel = %instance.type_string(), "instance rejected arguments");
                continue;
            }

            let workspace = instance.workspace_size(&args);
            let elapsed_ms = unsafe { instance.run(&args, &config.stream_config(stream)) }.context(DeviceSnafu)?;
            let uid = Uid::of(instance.signature());
            debug!(%uid, kernel = %instance.type_string(), elapsed_ms, "dispatched");
            return Ok(Launch { uid, kernel: instance.type_string(), workspace, elapsed_ms });
        }

        NoAcceptingInstanceSnafu { problem: problem.to_string(), candidates: instances.len() }.fail()
    }

    /// Instances able to run `problem` with these pointers, best first.
    pub fn supported_instances(
        &self,
        problem: &PermutationProblem,
        a: *const u8,
        b: *mut u8,
    ) -> Result<Vec<&'c dyn KernelInstance>> {
        let registry = self.context.registry()?;
        let instances = registry.query_problem_all_widths(problem, self.context.selector())?;
        if instances.is_empty() {
            return Ok(instances);
        }
        let args = problem.args(a, b)?;
        Ok(instances.into_iter().filter(|instance| instance.is_supported(&args)).collect())
    }
}
