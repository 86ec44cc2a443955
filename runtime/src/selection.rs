//! Hyper-parameter selection.
//!
//! A selector maps problem metadata to the one tuning tuple the candidate
//! generator starts from. Everything downstream consumes only the tuple's
//! fields, so selectors are interchangeable.

use std::collections::HashMap;

use snafu::{OptionExt, ensure};
use tessera_device::TuningParams;
use tessera_dtype::DType;
use tracing::trace;

use crate::error::{InvalidLookupEntrySnafu, Result};

/// Problem metadata visible to a selector.
#[derive(Debug, Clone, Copy)]
pub struct SelectionInput<'a> {
    pub lengths: &'a [usize],
    pub output_dims: &'a [usize],
    pub type_in: DType,
    pub type_out: DType,
    pub rank: u32,
}

/// Proposes a tuning tuple for a problem.
///
/// Implementations must be deterministic and free of I/O.
pub trait InstanceSelector: Send + Sync + std::fmt::Debug {
    fn select(&self, input: &SelectionInput<'_>) -> TuningParams;
}

/// Returns the same balanced tuple for every problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSelector;

impl DefaultSelector {
    pub const PARAMS: TuningParams = TuningParams::new(256, 64, 64, 4, 4, [0, 1], 4);
}

impl InstanceSelector for DefaultSelector {
    fn select(&self, _input: &SelectionInput<'_>) -> TuningParams {
        Self::PARAMS
    }
}

/// Lookup table of the best tuple per exact problem, as recorded by tuning
/// sweeps. Problems missing from the table fall back to [`DefaultSelector`].
///
/// Entries are written one per line as `<key>:<rank>_<tuple>`, where the key is
/// the data-type tag, the input lengths and the output dimensions joined by
/// underscores, optionally with a `.txt` suffix:
///
/// ```text
/// F32_16_16_0_1.txt:2_256_64_64_4_4_0_1_4_4
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableSelector {
    entries: HashMap<String, TuningParams>,
    fallback: DefaultSelector,
}

impl TableSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(dtype: DType, lengths: &[usize], output_dims: &[usize]) -> String {
        let mut key = dtype.to_string();
        for value in lengths.iter().chain(output_dims) {
            key.push('_');
            key.push_str(&value.to_string());
        }
        key
    }

    pub fn insert(&mut self, dtype: DType, lengths: &[usize], output_dims: &[usize], params: TuningParams) {
        self.entries.insert(Self::key(dtype, lengths, output_dims), params);
    }

    /// Parse a whole table. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')) {
            let (key, params) = Self::parse_line(line)?;
            table.entries.insert(key, params);
        }
        Ok(table)
    }

    pub fn parse_line(line: &str) -> Result<(String, TuningParams)> {
        let invalid = |reason: &'static str| InvalidLookupEntrySnafu { line, reason };

        let (key, fields) = line.split_once(':').context(invalid("missing ':'"))?;
        let key = key.strip_suffix(".txt").unwrap_or(key);

        let fields = fields
            .split('_')
            .map(|f| f.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .ok()
            .context(invalid("non-numeric field"))?;
        ensure!(fields.len() == 10, invalid("expected rank and 9 tuning fields"));

        let rank = fields[0] as usize;
        let key_parts = key.split('_').count();
        ensure!(key_parts == 1 + 2 * rank, invalid("key does not match rank"));
        DType::from_tag(key.split('_').next().unwrap_or_default())
            .ok()
            .context(invalid("unknown data type"))?;

        let params = TuningParams {
            block_size: fields[1],
            m0_per_block: fields[2],
            m1_per_block: fields[3],
            m0_per_thread: fields[4],
            m1_per_thread: fields[5],
            cluster_order: [fields[6], fields[7]],
            in_vector_width: fields[8],
            out_vector_width: fields[9],
        };
        Ok((key.to_string(), params))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InstanceSelector for TableSelector {
    fn select(&self, input: &SelectionInput<'_>) -> TuningParams {
        let key = Self::key(input.type_in, input.lengths, input.output_dims);
        match self.entries.get(&key) {
            Some(params) => *params,
            None => {
                trace!(%key, "no tuned entry, using default tuple");
                self.fallback.select(input)
            }
        }
    }
}
