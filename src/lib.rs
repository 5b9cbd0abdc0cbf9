//! Orders load generator
//!
//! Fabricates pseudo-random order records and publishes them to a Kafka topic
//! at a configurable rate, Avro-encoded through a schema registry.
//!
//! # Components
//!
//! - [`pacer`] - fixed-delay pacing towards a target messages-per-minute rate
//! - [`reporter`] - windowed throughput measurement
//! - [`runner`] - the production loop and its shutdown/flush path
//! - [`config`] - environment/CLI configuration and validation
//!
//! Record synthesis lives in the `order_generator` crate and the Kafka
//! transport in `order_producer`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Produce at the default 20000 messages/minute to orders_topic
//! BOOTSTRAP_SERVERS=... SCHEMA_REGISTRY_URL=... \
//! KAFKA_API_KEY=... KAFKA_API_SECRET=... SR_API_KEY=... SR_API_SECRET=... \
//!   orders-loadgen
//!
//! # Inspect generated records offline
//! orders-loadgen generate --count 5 --seed 42
//! ```

pub mod config;
pub mod generate;
pub mod pacer;
pub mod reporter;
pub mod runner;
pub mod shutdown;
pub mod sink;

pub use config::{ConfigError, LoadgenArgs, LoadgenConfig};
pub use runner::{run_load, LoopSettings, RunSummary};
pub use sink::RecordSink;
