//! Exhaustive tuning sweep for one permutation problem.
//!
//! Runs every instance of the search space that accepts the problem and
//! prints its bandwidth, one `type_string, GB/s` line per instance. The best
//! line per problem is what `TableSelector` tables are built from.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use half::f16;
use snafu::{OptionExt, ResultExt};
use tessera_device::ElementwiseArgs;
use tessera_dtype::{DType, Element, UnaryOp};
use tessera_runtime::catalog::GENERATED_TYPES;
use tessera_runtime::{BenchmarkConfig, benchmark_instance};

mod error;
mod layout;
mod search_space;

use error::{DeviceSnafu, ReportSnafu, Result, RuntimeSnafu, UnknownTypeSnafu};
use layout::Layout;

#[derive(Parser, Debug)]
#[command(name = "permutation-tuning", about = "Benchmark every permutation instance on one problem")]
struct Cli {
    /// Element type: F32 or F16
    data_type: String,

    /// `rank` input lengths followed by `rank` output dimensions
    #[arg(required = true, num_args = 1..)]
    values: Vec<usize>,

    /// Untimed runs per instance
    #[arg(long, default_value_t = 5)]
    warmup: usize,

    /// Timed runs per instance
    #[arg(long, default_value_t = 10)]
    repeat: usize,
}

fn parse_type(tag: &str) -> Result<DType> {
    let dtype = DType::from_tag(tag).ok().filter(|dtype| GENERATED_TYPES.contains(*dtype));
    dtype.context(UnknownTypeSnafu { tag })
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let dtype = parse_type(&cli.data_type)?;
    let layout = Layout::from_values(&cli.values)?;
    let config = BenchmarkConfig { warmup_runs: cli.warmup, timing_runs: cli.repeat, take_minimum: false };

    match dtype {
        DType::Float16 => sweep::<f16>(&layout, &config, out),
        _ => sweep::<f32>(&layout, &config, out),
    }
}

fn sweep<T: Element>(layout: &Layout, config: &BenchmarkConfig, out: &mut impl Write) -> Result<()> {
    let count = layout.element_count();
    let a: Vec<T> = (0..count).map(|i| T::from_f32(i as f32 + 1.0)).collect();
    let mut b = vec![T::default(); count];

    let args = ElementwiseArgs::new(
        &layout.input_lengths,
        &layout.a_strides,
        &layout.b_strides,
        a.as_ptr().cast(),
        b.as_mut_ptr().cast(),
        UnaryOp::Identity,
        UnaryOp::Identity,
        1.0,
    )
    .context(DeviceSnafu)?;

    let instances = search_space::instances::<T>(layout.rank() as u32);
    writeln!(out, "There are {} instances.", instances.len()).context(ReportSnafu)?;

    let bytes = 2 * count * std::mem::size_of::<T>();
    for instance in &instances {
        if !instance.is_supported(&args) {
            writeln!(out, "{} does not support this input tensor", instance.type_string()).context(ReportSnafu)?;
            continue;
        }

        let result = unsafe { benchmark_instance(instance.as_ref(), &args, config) }.context(RuntimeSnafu)?;
        writeln!(out, "{}, {:.3}", instance.type_string(), result.bandwidth_gbps(bytes, config.take_minimum))
            .context(ReportSnafu)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("error: {e}");
        eprintln!("usage: permutation-tuning <F32|F16> <length0> ... <lengthN> <outputDim0> ... <outputDimN>");
        process::exit(1);
    }
}
