//! Error types for the order producer.

use thiserror::Error;

/// Errors that can occur while connecting to or publishing through Kafka.
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Schema registry rejected subject '{subject}' (status {status}): {body}")]
    SchemaRegistry {
        subject: String,
        status: u16,
        body: String,
    },

    #[error("Value schema does not fit the order record: {0}")]
    SchemaMismatch(String),

    #[error("Flush task failed: {0}")]
    Flush(String),
}
