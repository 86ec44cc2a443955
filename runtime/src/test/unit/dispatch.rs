use tessera_device::Stream;
use tessera_dtype::{DType, UnaryOp};

use crate::test::Aligned;
use crate::{Context, DispatchConfig, Error, InstanceType, PermutationProblem, TensorDescriptor};

fn transpose(dtype: DType, lengths: [usize; 2], op_a: UnaryOp) -> PermutationProblem {
    let a = TensorDescriptor::new(dtype, &lengths, None, op_a).unwrap();
    let b = TensorDescriptor::new(dtype, &[lengths[1], lengths[0]], None, UnaryOp::Identity).unwrap();
    PermutationProblem::new(a, &[0, 1], b, &[1, 0]).unwrap()
}

fn iota<const N: usize>() -> Aligned<N> {
    let mut buffer = Aligned([0.0; N]);
    for (i, x) in buffer.0.iter_mut().enumerate() {
        *x = i as f32;
    }
    buffer
}

#[test]
fn test_aligned_transpose_picks_selected_tuple() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let problem = transpose(DType::Float32, [8, 4], UnaryOp::Identity);
    let input = iota::<32>();
    let mut output = Aligned([0.0f32; 32]);

    let launch =
        unsafe { context.dispatcher().permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) }
            .unwrap();

    assert_eq!(launch.kernel, "2_256_64_64_4_4_0_1_4_4");
    assert_eq!(launch.workspace, 0);
    assert_eq!(launch.elapsed_ms, 0.0);
    for i in 0..8 {
        for j in 0..4 {
            assert_eq!(output.0[j + 4 * i], input.0[i + 8 * j]);
        }
    }

    let launches = stream.launches();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].kernel, launch.kernel);
    assert_eq!(launches[0].elements, 32);
}

#[test]
fn test_odd_extents_fall_back_to_scalar_width() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let problem = transpose(DType::Float32, [6, 3], UnaryOp::Identity);
    let input = iota::<18>();
    let mut output = Aligned([0.0f32; 18]);

    let launch =
        unsafe { context.dispatcher().permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) }
            .unwrap();

    assert_eq!(launch.kernel, "2_256_64_64_4_4_0_1_1_1");
    assert_eq!(output.0[1], input.0[6]);
}

#[test]
fn test_misaligned_pointer_narrows_width() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let problem = transpose(DType::Float32, [8, 4], UnaryOp::Identity);
    let input = iota::<40>();
    let mut output = Aligned([0.0f32; 32]);

    // One element past a 64-byte boundary: only width 1 fits.
    let a = input.0[1..].as_ptr().cast();
    let launch = unsafe { context.dispatcher().permute(&problem, a, output.0.as_mut_ptr().cast(), &stream) }.unwrap();
    assert_eq!(launch.kernel, "2_256_64_64_4_4_0_1_1_1");
    assert_eq!(output.0[4], 1.0 + 1.0);
}

#[test]
fn test_scaled_square() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let problem = transpose(DType::Float32, [8, 4], UnaryOp::Square).with_alpha_f32(2.0);
    let input = iota::<32>();
    let mut output = Aligned([0.0f32; 32]);

    let launch =
        unsafe { context.dispatcher().permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) }
            .unwrap();

    assert_eq!(launch.kernel, "2_256_64_64_4_4_0_1_4_4");
    // b[j + 4i] = 2 * a[i + 8j]^2
    assert_eq!(output.0[4 * 3 + 1], 2.0 * 11.0 * 11.0);
}

#[test]
fn test_host_path_runs_reference() {
    let context = Context::new(DispatchConfig::builder().instance_type(InstanceType::Host).build());
    let stream = Stream::new("host");
    let problem = transpose(DType::Float32, [8, 4], UnaryOp::Identity);
    let input = iota::<32>();
    let mut output = Aligned([0.0f32; 32]);

    let launch =
        unsafe { context.dispatcher().permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) }
            .unwrap();

    assert_eq!(launch.kernel, "reference_2_F32");
    assert_eq!(output.0[4], 1.0);
}

#[test]
fn test_timed_launch() {
    let config = DispatchConfig::builder().time_kernel(true).cold_niters(1).nrepeat(2).build();
    let context = Context::new(config);
    let stream = Stream::new("timed");
    let problem = transpose(DType::Float32, [8, 4], UnaryOp::Identity);
    let input = iota::<32>();
    let mut output = Aligned([0.0f32; 32]);

    let launch =
        unsafe { context.dispatcher().permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) }
            .unwrap();
    assert!(launch.elapsed_ms >= 0.0);
    assert_eq!(stream.launch_count(), 1);
}

#[test]
fn test_rank_one_has_no_instance() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let a = TensorDescriptor::new(DType::Float32, &[16], None, UnaryOp::Identity).unwrap();
    let b = a.clone();
    let problem = PermutationProblem::new(a, &[0], b, &[0]).unwrap();
    let input = iota::<16>();
    let mut output = Aligned([0.0f32; 16]);

    let result =
        unsafe { context.dispatcher().permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) };
    assert!(matches!(result, Err(Error::NoAcceptingInstance { candidates: 0, .. })));
    assert_eq!(stream.launch_count(), 0);
}

#[test]
fn test_double_has_no_instance() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let problem = transpose(DType::Float64, [4, 2], UnaryOp::Identity);
    let input = [0f64; 8];
    let mut output = [0f64; 8];

    let result =
        unsafe { context.dispatcher().permute(&problem, input.as_ptr().cast(), output.as_mut_ptr().cast(), &stream) };
    assert!(matches!(result, Err(Error::NoAcceptingInstance { .. })));
}

#[test]
fn test_supported_instances() {
    let context = Context::default();
    let problem = transpose(DType::Float32, [8, 4], UnaryOp::Identity);
    let input = iota::<32>();
    let mut output = Aligned([0.0f32; 32]);

    let supported = context
        .dispatcher()
        .supported_instances(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast())
        .unwrap();

    let kernels: Vec<String> = supported.iter().map(|i| i.type_string()).collect();
    assert_eq!(
        kernels,
        ["2_256_64_64_4_4_0_1_4_4", "2_256_64_64_4_4_0_1_2_2", "2_256_64_64_4_4_0_1_1_1", "reference_2_F32"]
    );
}

#[test]
fn test_supported_instances_odd_extents() {
    let context = Context::default();
    let problem = transpose(DType::Float32, [6, 3], UnaryOp::Identity);
    let input = iota::<18>();
    let mut output = Aligned([0.0f32; 18]);

    let supported = context
        .dispatcher()
        .supported_instances(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast())
        .unwrap();
    assert_eq!(supported.len(), 2);
    assert!(supported.iter().all(|i| i.signature().params.in_vector_width <= 1));
}

#[test]
fn test_rank_seven_has_no_instance() {
    let context = Context::default();
    let stream = Stream::new("compute");
    let a = TensorDescriptor::new(DType::Float32, &[1; 7], None, UnaryOp::Identity).unwrap();
    let b = a.clone();
    let modes = [0, 1, 2, 3, 4, 5, 6];
    let problem = PermutationProblem::new(a, &modes, b, &modes).unwrap();
    let input = iota::<1>();
    let mut output = Aligned([0.0f32; 1]);
    let dispatcher = context.dispatcher();

    let result = unsafe { dispatcher.permute(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast(), &stream) };
    assert!(matches!(result, Err(Error::NoAcceptingInstance { candidates: 0, .. })));
    assert_eq!(stream.launch_count(), 0);

    let supported =
        dispatcher.supported_instances(&problem, input.0.as_ptr().cast(), output.0.as_mut_ptr().cast()).unwrap();
    assert!(supported.is_empty());
}
