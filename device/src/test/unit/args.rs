use tessera_dtype::UnaryOp;

use crate::{ElementwiseArgs, Error};

#[test]
fn test_rank_mismatch() {
    let mut a = [0f32; 4];
    let mut b = [0f32; 4];
    let result = ElementwiseArgs::new(
        &[2, 2],
        &[1, 2],
        &[1],
        a.as_mut_ptr() as *const u8,
        b.as_mut_ptr() as *mut u8,
        UnaryOp::Identity,
        UnaryOp::Identity,
        1.0,
    );
    assert!(matches!(result, Err(Error::RankMismatch { lengths: 2, a_strides: 2, b_strides: 1 })));
}

#[test]
fn test_rank_too_large() {
    let a = [0f32; 1];
    let mut b = [0f32; 1];
    let dims = [1usize; 7];
    let result = ElementwiseArgs::new(
        &dims,
        &dims,
        &dims,
        a.as_ptr() as *const u8,
        b.as_mut_ptr() as *mut u8,
        UnaryOp::Identity,
        UnaryOp::Identity,
        1.0,
    );
    assert!(matches!(result, Err(Error::RankTooLarge { rank: 7, max: 6 })));
}

#[test]
fn test_null_pointer() {
    let a = [0f32; 1];
    let result = ElementwiseArgs::new(
        &[1],
        &[1],
        &[1],
        a.as_ptr() as *const u8,
        std::ptr::null_mut(),
        UnaryOp::Identity,
        UnaryOp::Identity,
        1.0,
    );
    assert!(matches!(result, Err(Error::NullPointer { operand: "output" })));
}

#[test]
fn test_element_count() {
    let a = [0f32; 1];
    let mut b = [0f32; 1];
    let args = ElementwiseArgs::new(
        &[2, 3, 4],
        &[1, 2, 6],
        &[1, 2, 6],
        a.as_ptr() as *const u8,
        b.as_mut_ptr() as *mut u8,
        UnaryOp::Identity,
        UnaryOp::Identity,
        1.0,
    )
    .unwrap();
    assert_eq!(args.rank(), 3);
    assert_eq!(args.element_count(), 24);
}
