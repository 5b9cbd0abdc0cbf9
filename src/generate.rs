//! `generate` command: print synthesized records without a broker.

use clap::Args;
use order_generator::{Branch, OrderGenerator, DEFAULT_PRIVILEGED_RATIO};
use std::io::Write;

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Number of records to print
    #[arg(long, default_value = "10")]
    pub count: u64,

    /// Random seed; omit for a different stream on every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of records carrying the privileged filter constants (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_PRIVILEGED_RATIO)]
    pub privileged_ratio: f64,
}

/// Write `args.count` records as JSON lines to `out`.
pub fn write_records<W: Write>(args: &GenerateArgs, out: &mut W) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.privileged_ratio) {
        anyhow::bail!(
            "Invalid value for --privileged-ratio: {} is outside 0.0..=1.0",
            args.privileged_ratio
        );
    }

    let generator = match args.seed {
        Some(seed) => OrderGenerator::new(seed),
        None => OrderGenerator::from_entropy(),
    };
    let mut generator = generator.with_privileged_ratio(args.privileged_ratio);

    let mut privileged = 0u64;
    for _ in 0..args.count {
        let (branch, record) = generator.next_tagged_record();
        if branch == Branch::Privileged {
            privileged += 1;
        }
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }

    tracing::info!(
        "Generated {} records ({} privileged)",
        args.count,
        privileged
    );
    Ok(())
}

/// Run the generate command against stdout.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_records(&args, &mut out)?;
    out.flush()?;
    Ok(())
}
