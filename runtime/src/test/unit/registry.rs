use tessera_device::{KernelInstance, TuningParams};
use tessera_dtype::{DType, PermutationOp, UnaryOp};

use crate::catalog::{GENERATED_RANKS, GENERATED_TYPES, OP_SHAPES};
use crate::test::REGISTRY;
use crate::registry::permutation_kind;
use crate::{DefaultSelector, InstanceType, PermutationProblem, TensorDescriptor, Uid, best_perf_candidates};

const ID: UnaryOp = UnaryOp::Identity;

fn transpose(dtype: DType, ops: (UnaryOp, UnaryOp)) -> PermutationProblem {
    let a = TensorDescriptor::new(dtype, &[8, 4], None, ops.0).unwrap();
    let b = TensorDescriptor::new(dtype, &[4, 8], None, ops.1).unwrap();
    PermutationProblem::new(a, &[0, 1], b, &[1, 0]).unwrap()
}

fn uids(instances: &[&dyn KernelInstance]) -> Vec<Uid> {
    instances.iter().map(|i| Uid::of(i.signature())).collect()
}

#[test]
fn test_query_preserves_order_and_skips_missing() {
    let params = TuningParams::new(256, 64, 64, 4, 4, [0, 1], 4);
    let a = Uid::from_parts(DType::Float32, DType::Float32, ID, ID, PermutationOp::Scale, 2, &params);
    let c = Uid::from_parts(
        DType::Float16,
        DType::Float16,
        ID,
        ID,
        PermutationOp::Scale,
        3,
        &TuningParams::new(256, 128, 128, 8, 8, [0, 1], 8),
    );
    let missing = Uid::from_parts(DType::Float64, DType::Float64, ID, ID, PermutationOp::Scale, 2, &params);
    assert!(REGISTRY.contains(a));
    assert!(REGISTRY.contains(c));
    assert!(!REGISTRY.contains(missing));
    assert!(REGISTRY.get(missing).is_none());

    let found = REGISTRY.query(&[a, missing, c]);
    assert_eq!(uids(&found), vec![a, c]);

    let found = REGISTRY.query(&[c, Uid(0xdead_beef), a, a]);
    assert_eq!(uids(&found), vec![c, a, a], "duplicates are kept");
}

#[test]
fn test_empty_query() {
    assert!(REGISTRY.query(&[]).is_empty());
}

#[test]
fn test_solution_count() {
    assert_eq!(REGISTRY.solution_count(), REGISTRY.iter().count());
    assert_eq!(REGISTRY.solution_count(), 750);
}

#[test]
fn test_rank2_f32_fallback_chain() {
    let found = REGISTRY.query_instances(
        DType::Float32,
        DType::Float32,
        ID,
        ID,
        PermutationOp::Scale,
        2,
        &DefaultSelector::PARAMS,
    );

    let kernels: Vec<String> = found.iter().map(|i| i.type_string()).collect();
    assert_eq!(kernels, ["2_256_64_64_4_4_0_1_4_4", "2_256_64_64_4_4_0_1_2_2", "2_256_64_64_4_4_0_1_1_1"]);
    assert_eq!(
        uids(&found),
        best_perf_candidates(DType::Float32, DType::Float32, ID, ID, PermutationOp::Scale, 2, &DefaultSelector::PARAMS)
    );
}

#[test]
fn test_pass_through_substitution() {
    let unit = transpose(DType::Float32, (ID, ID)).with_alpha_f32(1.0);
    let scaled = transpose(DType::Float32, (ID, ID)).with_alpha_f32(0.999999);

    let device_unit = REGISTRY.query_problem(&unit, InstanceType::Device, &DefaultSelector).unwrap();
    let device_scaled = REGISTRY.query_problem(&scaled, InstanceType::Device, &DefaultSelector).unwrap();
    let host_unit = REGISTRY.query_problem(&unit, InstanceType::Host, &DefaultSelector).unwrap();

    assert!(device_unit.iter().all(|i| i.signature().permutation == PermutationOp::PassThrough));
    assert!(device_scaled.iter().all(|i| i.signature().permutation == PermutationOp::Scale));
    assert!(host_unit.iter().all(|i| i.signature().permutation == PermutationOp::Scale));
    assert_eq!(device_unit.len(), device_scaled.len());

    // Same tuples, different kind.
    let tuples = |list: &[&dyn KernelInstance]| list.iter().map(|i| i.signature().params).collect::<Vec<_>>();
    assert_eq!(tuples(&device_unit), tuples(&device_scaled));
}

#[test]
fn test_missing_alpha_means_one() {
    let problem = transpose(DType::Float16, (ID, ID));
    let found = REGISTRY.query_problem(&problem, InstanceType::Device, &DefaultSelector).unwrap();
    assert_eq!(found[0].signature().permutation, PermutationOp::PassThrough);
}

#[test]
fn test_operators_disable_pass_through() {
    let problem = transpose(DType::Float32, (UnaryOp::Square, ID));
    let found = REGISTRY.query_problem(&problem, InstanceType::Device, &DefaultSelector).unwrap();
    assert!(!found.is_empty());
    assert!(found.iter().all(|i| i.signature().permutation == PermutationOp::Scale));
    assert!(found.iter().all(|i| i.signature().op_a == UnaryOp::Square));
}

#[test]
fn test_host_path_starts_with_reference() {
    let problem = transpose(DType::Float32, (ID, ID));
    let found = REGISTRY.query_problem(&problem, InstanceType::Host, &DefaultSelector).unwrap();

    assert!(found[0].signature().params.is_reference());
    assert_eq!(found[0].type_string(), "reference_2_F32");
}

#[test]
fn test_permutation_kind() {
    assert_eq!(permutation_kind(ID, ID, 1.0, InstanceType::Device), PermutationOp::PassThrough);
    assert_eq!(permutation_kind(ID, ID, 0.999999, InstanceType::Device), PermutationOp::Scale);
    assert_eq!(permutation_kind(ID, ID, 1.0, InstanceType::Host), PermutationOp::Scale);
    assert_eq!(permutation_kind(UnaryOp::Square, ID, 1.0, InstanceType::Device), PermutationOp::Scale);
    assert_eq!(permutation_kind(ID, UnaryOp::Square, 1.0, InstanceType::Device), PermutationOp::Scale);
}

#[test]
fn test_full_sweep_ends_in_width_one_or_reference() {
    for dtype in GENERATED_TYPES {
        for rank in GENERATED_RANKS {
            for shape in OP_SHAPES {
                let found = REGISTRY.query_all_widths(
                    dtype,
                    dtype,
                    shape.op_a,
                    shape.op_b,
                    shape.permutation,
                    rank,
                    &DefaultSelector::PARAMS,
                );
                let last = found.last().unwrap_or_else(|| panic!("empty sweep for {dtype} rank {rank} {shape:?}"));
                let width = last.signature().params.in_vector_width;
                assert!(width <= 1, "{dtype} rank {rank} {shape:?} ends with width {width}");

                let widths: Vec<u32> = found.iter().map(|i| i.signature().params.in_vector_width).collect();
                assert!(widths.windows(2).all(|w| w[0] > w[1]), "widths not descending: {widths:?}");
            }
        }
    }
}
