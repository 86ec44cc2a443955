//! Instance registry, candidate selection and dispatch for permutation kernels.
//!
//! A [`Context`] owns the [`SolutionRegistry`], built once on first use from
//! the data-driven [`catalog`]. Queries run in three steps:
//!
//! 1. a [`InstanceSelector`] proposes one tuning tuple for the problem;
//! 2. the [`candidates`] module expands it into a priority-ordered list of
//!    [`Uid`]s (best guess first, then narrower safety-net widths);
//! 3. the registry filters that list down to the instances actually present.
//!
//! The [`Dispatcher`] walks the resulting list and runs the first instance
//! that accepts the concrete arguments.
//!
//! # Benchmarking
//!
//! The `benchmark` module times a kernel over repeated runs; the tuning
//! executable uses it to rank instances.

pub mod benchmark;
pub mod candidates;
pub mod catalog;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod problem;
pub mod registry;
pub mod selection;
pub mod tuning_tables;
pub mod uid;


pub use benchmark::{BenchmarkConfig, BenchmarkResult, benchmark_instance};
pub use candidates::{VECTOR_WIDTHS, all_vector_width_candidates, best_perf_candidates};
pub use config::DispatchConfig;
pub use context::Context;
pub use dispatch::{Dispatcher, Launch};
pub use error::*;
pub use problem::{InstanceType, PermutationProblem, TensorDescriptor, find_indices};
pub use registry::SolutionRegistry;
pub use selection::{DefaultSelector, InstanceSelector, SelectionInput, TableSelector};
pub use uid::{Uid, identity};
