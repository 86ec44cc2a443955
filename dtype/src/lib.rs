pub mod element;
pub mod error;
pub mod scalar;


pub use element::Element;
pub use error::*;
pub use scalar::read_scalar;

/// Element data types understood by the permutation kernels.
///
/// Discriminants are stable: they are the resolved scalar representation fed
/// into instance identities, so reordering variants would silently change
/// every registered identity.
#[derive(Debug, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray)]
#[derive(strum::Display, strum::EnumString)]
#[derive(enumset::EnumSetType)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[enumset(repr = "u32")]
pub enum DType {
    #[strum(serialize = "F32")]
    Float32 = 0,
    #[strum(serialize = "F64")]
    Float64 = 1,
    #[strum(serialize = "F16")]
    Float16 = 2,
    #[strum(serialize = "BF16")]
    BFloat16 = 14,
}

impl DType {
    /// Parse a short tag such as `F32` or `F16`.
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.parse().map_err(|_| UnknownTagSnafu { tag }.build())
    }

    /// Value used when hashing instance signatures.
    pub const fn tag(self) -> u32 {
        self as u32
    }

    pub const fn bytes(self) -> usize {
        match self {
            Self::Float16 | Self::BFloat16 => 2,
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Type the scalar multiplier is decoded as for tensors of this type.
    ///
    /// Half-precision tensors compute in single precision, so their alpha is
    /// stored as `f32` on the host.
    pub const fn compute_type(self) -> DType {
        match self {
            Self::Float16 | Self::BFloat16 | Self::Float32 => Self::Float32,
            Self::Float64 => Self::Float64,
        }
    }
}

/// Element-wise unary operator applied to an operand before or after scaling.
#[derive(Debug, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::FromRepr, strum::Display)]
#[derive(enumset::EnumSetType)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[enumset(repr = "u32")]
pub enum UnaryOp {
    Identity = 1,
    Square = 2,
}

impl UnaryOp {
    pub const fn tag(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Self::Identity => x,
            Self::Square => x * x,
        }
    }
}

/// Arithmetic class of a permutation kernel.
///
/// `PassThrough` kernels only move data: both operators are identities and the
/// multiplier is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::FromRepr, strum::Display)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[repr(u32)]
pub enum PermutationOp {
    Scale = 0,
    PassThrough = 1,
}

impl PermutationOp {
    pub const fn tag(self) -> u32 {
        self as u32
    }
}
