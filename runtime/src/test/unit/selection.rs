use test_case::test_case;
use tessera_device::TuningParams;
use tessera_dtype::DType;

use crate::{DefaultSelector, Error, InstanceSelector, SelectionInput, TableSelector};

fn input<'a>(dtype: DType, lengths: &'a [usize], output_dims: &'a [usize]) -> SelectionInput<'a> {
    SelectionInput { lengths, output_dims, type_in: dtype, type_out: dtype, rank: lengths.len() as u32 }
}

#[test]
fn test_default_tuple() {
    let params = DefaultSelector.select(&input(DType::Float16, &[1024, 8, 3], &[2, 0, 1]));
    assert_eq!(params, TuningParams::new(256, 64, 64, 4, 4, [0, 1], 4));
    assert_eq!(params.to_string(), "256_64_64_4_4_0_1_4_4");
}

#[test]
fn test_key_format() {
    assert_eq!(TableSelector::key(DType::Float32, &[16, 16], &[0, 1]), "F32_16_16_0_1");
    assert_eq!(TableSelector::key(DType::Float16, &[64, 2, 8], &[2, 1, 0]), "F16_64_2_8_2_1_0");
}

#[test]
fn test_parse_line() {
    let (key, params) = TableSelector::parse_line("F32_16_16_0_1.txt:2_256_64_64_4_4_0_1_4_4").unwrap();
    assert_eq!(key, "F32_16_16_0_1");
    assert_eq!(params, DefaultSelector::PARAMS);

    let (key, params) = TableSelector::parse_line("F16_32_64_1_0:2_64_32_128_8_8_1_0_8_2").unwrap();
    assert_eq!(key, "F16_32_64_1_0");
    assert_eq!(params.cluster_order, [1, 0]);
    assert_eq!((params.in_vector_width, params.out_vector_width), (8, 2));
}

#[test]
fn test_table_hit_and_fallback() {
    let table = TableSelector::parse(
        "# tuned on the reference box\n\
         F32_16_16_1_0.txt:2_256_128_128_16_16_0_1_16_16\n\
         \n\
         F16_8_8_8_2_1_0:3_64_32_128_8_8_1_0_8_8\n",
    )
    .unwrap();
    assert_eq!(table.len(), 2);

    let tuned = table.select(&input(DType::Float32, &[16, 16], &[1, 0]));
    assert_eq!(tuned, TuningParams::new(256, 128, 128, 16, 16, [0, 1], 16));

    let tuned = table.select(&input(DType::Float16, &[8, 8, 8], &[2, 1, 0]));
    assert_eq!(tuned, TuningParams::new(64, 32, 128, 8, 8, [1, 0], 8));

    // Same extents, different permutation.
    assert_eq!(table.select(&input(DType::Float32, &[16, 16], &[0, 1])), DefaultSelector::PARAMS);
    // Same problem, different type.
    assert_eq!(table.select(&input(DType::Float16, &[16, 16], &[1, 0])), DefaultSelector::PARAMS);
}

#[test]
fn test_insert() {
    let mut table = TableSelector::new();
    assert!(table.is_empty());

    let params = TuningParams::new(256, 64, 64, 16, 16, [1, 0], 16);
    table.insert(DType::Float32, &[32, 4], &[1, 0], params);
    assert_eq!(table.select(&input(DType::Float32, &[32, 4], &[1, 0])), params);
}

#[test_case("F32_16_16_0_1" ; "missing separator")]
#[test_case("F32_16_16_0_1:2_256_64_64_4_4_0_1_4" ; "too few fields")]
#[test_case("F32_16_16_0_1:2_256_64_64_4_4_0_1_4_4_4" ; "too many fields")]
#[test_case("F32_16_16_0_1:2_256_64_x_4_4_0_1_4_4" ; "non numeric")]
#[test_case("F32_16_16_0_1:3_256_64_64_4_4_0_1_4_4" ; "rank disagrees with key")]
#[test_case("I8_16_16_0_1:2_256_64_64_4_4_0_1_4_4" ; "unknown type")]
fn test_invalid_line(line: &str) {
    assert!(matches!(TableSelector::parse_line(line), Err(Error::InvalidLookupEntry { .. })));
}

#[test]
fn test_parse_reports_line() {
    let err = TableSelector::parse("F32_4_4_0_1:2_256_64_64_4_4_0_1_4_4\nbroken\n").unwrap_err();
    match err {
        Error::InvalidLookupEntry { line, .. } => assert_eq!(line, "broken"),
        other => panic!("unexpected error: {other}"),
    }
}
