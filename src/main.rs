//! Command-line interface for orders-loadgen
//!
//! # Usage Examples
//!
//! ## Produce
//! ```bash
//! # Credentials and endpoints come from the environment (or matching flags)
//! export BOOTSTRAP_SERVERS=pkc-xxxx.confluent.cloud:9092
//! export SCHEMA_REGISTRY_URL=https://psrc-xxxx.confluent.cloud
//! export KAFKA_API_KEY=... KAFKA_API_SECRET=...
//! export SR_API_KEY=... SR_API_SECRET=...
//!
//! orders-loadgen --topic orders_topic --target-messages-per-minute 20000
//! ```
//!
//! ## Generate
//! ```bash
//! # Print records as JSON lines, no broker needed
//! orders-loadgen generate --count 100 --seed 42
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use order_producer::OrderProducer;
use orders_loadgen::generate::{run_generate, GenerateArgs};
use orders_loadgen::shutdown::setup_shutdown_handler;
use orders_loadgen::{run_load, LoadgenArgs, LoopSettings};

#[derive(Parser)]
#[command(name = "orders-loadgen")]
#[command(about = "Publish synthetic order records to Kafka at a target rate")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: LoadgenArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print synthesized records as JSON lines without publishing
    Generate(GenerateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout stays free for `generate` output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate(args)) => run_generate(args),
        None => run_producer(cli.run).await,
    }
}

async fn run_producer(args: LoadgenArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    tracing::debug!("Configuration: {:?}", config);

    let schema_text = std::fs::read_to_string(&config.value_schema_path).with_context(|| {
        format!(
            "Failed to read value schema from {:?}",
            config.value_schema_path
        )
    })?;

    let mut producer = OrderProducer::connect(&config.kafka, &config.registry, &schema_text)
        .await
        .context("Failed to set up the Kafka producer")?;

    tracing::info!(
        "Publishing to '{}' at {} messages/minute (privileged ratio {})",
        config.kafka.topic,
        config.target_messages_per_minute,
        config.privileged_ratio
    );

    let mut generator = config.generator();
    let shutdown = setup_shutdown_handler();

    run_load(
        &mut producer,
        &mut generator,
        LoopSettings::from_config(&config),
        shutdown,
    )
    .await?;

    Ok(())
}
