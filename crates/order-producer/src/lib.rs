//! Kafka producer for order records.
//!
//! This library publishes `OrderRecord`s to a Kafka topic with schema-registry
//! backed Avro encoding for both key and value.
//!
//! ## Features
//!
//! - **Schema registration**: key (`"string"`) and value schemas are registered
//!   under `{topic}-key` / `{topic}-value` at startup
//! - **Avro wire format**: magic byte, 4-byte schema id, Avro binary datum
//! - **Authenticated transport**: SASL/PLAIN over TLS
//! - **Delivery reports**: non-blocking collection of per-message outcomes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use order_generator::OrderGenerator;
//! use order_producer::{KafkaSettings, OrderProducer, RegistrySettings};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kafka = KafkaSettings {
//!         bootstrap_servers: "broker:9092".to_string(),
//!         api_key: "key".to_string(),
//!         api_secret: "secret".to_string(),
//!         topic: "orders_topic".to_string(),
//!     };
//!     let registry = RegistrySettings {
//!         url: "https://registry".to_string(),
//!         api_key: "sr-key".to_string(),
//!         api_secret: "sr-secret".to_string(),
//!     };
//!     let schema = std::fs::read_to_string("source_topic_value.avsc")?;
//!
//!     let mut producer = OrderProducer::connect(&kafka, &registry, &schema).await?;
//!     let record = OrderGenerator::new(42).next_record();
//!     producer.publish(&record)?;
//!     producer.flush(Duration::from_secs(10)).await?;
//!     Ok(())
//! }
//! ```

pub mod delivery;
pub mod error;
pub mod producer;
pub mod registry;
pub mod serializer;
pub mod settings;

// Re-exports for convenience
pub use delivery::DeliveryReport;
pub use error::ProducerError;
pub use producer::{FlushOutcome, OrderProducer};
pub use registry::SchemaRegistryClient;
pub use serializer::{parse_value_schema, AvroSerializer};
pub use settings::{KafkaSettings, RegistrySettings, DEFAULT_TOPIC};
