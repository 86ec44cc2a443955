//! Data-driven instance catalog.
//!
//! Kernel families are described by [`Generator`] entries: a (type, rank,
//! operator shape) triple, the tuning tuples to instantiate, and a factory
//! that builds one instance per tuple. [`generators`] enumerates every family
//! shipped with the library; [`Catalog::build`] instantiates them all and keys
//! each instance by its [`Uid`].
//!
//! # Deduplication
//!
//! Inserting an instance whose signature is already present is a no-op: the
//! same tuple may legitimately appear in several tuning tiers. Inserting an
//! instance whose identity is taken by a *different* signature fails the build
//! with [`Error::IdentityCollision`](crate::Error::IdentityCollision).

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ops::RangeInclusive;

use enumset::{EnumSet, enum_set};
use half::{bf16, f16};
use itertools::iproduct;
use snafu::ensure;
use tessera_device::{ElementwisePermute, KernelInstance, ReferencePermute, TuningParams};
use tessera_dtype::{DType, Element, PermutationOp, UnaryOp};
use tracing::{debug, instrument, trace};

use crate::error::{IdentityCollisionSnafu, Result};
use crate::tuning_tables;
use crate::uid::Uid;

/// Element types kernels are generated for.
pub const GENERATED_TYPES: EnumSet<DType> = enum_set!(DType::Float16 | DType::Float32);

/// Ranks kernels are generated for.
pub const GENERATED_RANKS: RangeInclusive<u32> = 2..=6;

/// Element-wise operators and arithmetic class of a kernel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpShape {
    pub op_a: UnaryOp,
    pub op_b: UnaryOp,
    pub permutation: PermutationOp,
}

impl OpShape {
    pub const fn scale(op_a: UnaryOp, op_b: UnaryOp) -> Self {
        Self { op_a, op_b, permutation: PermutationOp::Scale }
    }

    /// Pure data movement.
    pub const NOOP: Self = Self { op_a: UnaryOp::Identity, op_b: UnaryOp::Identity, permutation: PermutationOp::PassThrough };
}

#[rustfmt::skip]
pub const OP_SHAPES: [OpShape; 5] = [
    OpShape::NOOP,
    OpShape::scale(UnaryOp::Square, UnaryOp::Square),
    OpShape::scale(UnaryOp::Square, UnaryOp::Identity),
    OpShape::scale(UnaryOp::Identity, UnaryOp::Square),
    OpShape::scale(UnaryOp::Identity, UnaryOp::Identity),
];

pub type Factory = fn(OpShape, u32, TuningParams) -> Box<dyn KernelInstance>;

/// One kernel family.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    pub dtype: DType,
    pub rank: u32,
    pub shape: OpShape,
    pub tunings: &'static [TuningParams],
    pub factory: Factory,
}

impl Generator {
    pub fn instances(&self) -> impl Iterator<Item = Box<dyn KernelInstance>> + '_ {
        self.tunings.iter().map(|&params| (self.factory)(self.shape, self.rank, params))
    }
}

fn elementwise<T: Element>(shape: OpShape, rank: u32, params: TuningParams) -> Box<dyn KernelInstance> {
    Box::new(ElementwisePermute::<T>::new(shape.op_a, shape.op_b, shape.permutation, rank, params))
}

fn reference<T: Element>(shape: OpShape, rank: u32, _params: TuningParams) -> Box<dyn KernelInstance> {
    Box::new(ReferencePermute::<T>::new(shape.op_a, shape.op_b, rank))
}

fn device_factory(dtype: DType) -> Factory {
    match dtype {
        DType::Float16 => elementwise::<f16>,
        DType::BFloat16 => elementwise::<bf16>,
        DType::Float32 => elementwise::<f32>,
        DType::Float64 => elementwise::<f64>,
    }
}

fn reference_factory(dtype: DType) -> Factory {
    match dtype {
        DType::Float16 => reference::<f16>,
        DType::BFloat16 => reference::<bf16>,
        DType::Float32 => reference::<f32>,
        DType::Float64 => reference::<f64>,
    }
}

static REFERENCE_TUNING: &[TuningParams] = &[TuningParams::REFERENCE];

/// Every kernel family shipped with the library.
///
/// Device families cover each operator shape; host reference families only
/// exist for `Scale` shapes since pass-through problems are routed to the
/// general kernels on the host path.
pub fn generators() -> Vec<Generator> {
    let device = iproduct!(GENERATED_TYPES.iter(), GENERATED_RANKS, OP_SHAPES).filter_map(|(dtype, rank, shape)| {
        let tunings = tuning_tables::table(dtype, rank)?;
        Some(Generator { dtype, rank, shape, tunings, factory: device_factory(dtype) })
    });

    let reference = iproduct!(GENERATED_TYPES.iter(), GENERATED_RANKS, OP_SHAPES)
        .filter(|(_, _, shape)| shape.permutation == PermutationOp::Scale)
        .map(|(dtype, rank, shape)| Generator {
            dtype,
            rank,
            shape,
            tunings: REFERENCE_TUNING,
            factory: reference_factory(dtype),
        });

    device.chain(reference).collect()
}

/// Instances keyed by identity.
#[derive(Debug, Default)]
pub struct Catalog {
    instances: HashMap<Uid, Box<dyn KernelInstance>>,
    duplicates: usize,
}

impl Catalog {
    /// Instantiate every family returned by [`generators`].
    #[instrument(skip_all)]
    pub fn build() -> Result<Self> {
        let mut catalog = Self::default();
        for generator in generators() {
            catalog.register(&generator)?;
        }
        debug!(instances = catalog.len(), duplicates = catalog.duplicates, "instance catalog built");
        Ok(catalog)
    }

    /// Insert every instance of one family. Returns how many were new.
    pub fn register(&mut self, generator: &Generator) -> Result<usize> {
        let mut inserted = 0;
        for instance in generator.instances() {
            if self.insert(instance)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Insert one instance; `false` if an identical signature was present.
    pub fn insert(&mut self, instance: Box<dyn KernelInstance>) -> Result<bool> {
        self.insert_keyed(Uid::of(instance.signature()), instance)
    }

    pub(crate) fn insert_keyed(&mut self, uid: Uid, instance: Box<dyn KernelInstance>) -> Result<bool> {
        match self.instances.entry(uid) {
            Entry::Occupied(existing) => {
                let existing = existing.get().signature();
                ensure!(
                    existing == instance.signature(),
                    IdentityCollisionSnafu {
                        uid,
                        existing: existing.to_string(),
                        incoming: instance.signature().to_string()
                    }
                );
                trace!(%uid, kernel = %instance.type_string(), "duplicate instance ignored");
                self.duplicates += 1;
                Ok(false)
            }
            Entry::Vacant(slot) => {
                slot.insert(instance);
                Ok(true)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_instances(self) -> HashMap<Uid, Box<dyn KernelInstance>> {
        self.instances
    }
}
