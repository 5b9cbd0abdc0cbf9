//! Kafka producer for order records.

use crate::delivery::DeliveryReport;
use crate::error::ProducerError;
use crate::registry::{key_subject, value_subject, SchemaRegistryClient};
use crate::serializer::{parse_value_schema, AvroSerializer, KEY_SCHEMA};
use crate::settings::{KafkaSettings, RegistrySettings};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use order_generator::OrderRecord;
use rdkafka::producer::{DeliveryFuture, FutureProducer, FutureRecord, Producer};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a flush left behind.
#[derive(Debug, Default)]
pub struct FlushOutcome {
    /// Reports that resolved during the flush.
    pub reports: Vec<DeliveryReport>,
    /// Messages whose delivery was still unresolved when the flush returned.
    pub undelivered: usize,
}

/// Publishes Avro-encoded order records to one topic.
///
/// `publish` only enqueues; librdkafka delivers in the background. Delivery
/// outcomes are collected by [`OrderProducer::poll_deliveries`], which never
/// blocks.
pub struct OrderProducer {
    producer: FutureProducer,
    topic: String,
    key_serializer: AvroSerializer,
    value_serializer: AvroSerializer,
    pending: FuturesUnordered<DeliveryFuture>,
}

impl OrderProducer {
    /// Parse the value schema, register both schemas and create the producer.
    pub async fn connect(
        kafka: &KafkaSettings,
        registry: &RegistrySettings,
        value_schema_text: &str,
    ) -> Result<Self, ProducerError> {
        let value_schema = parse_value_schema(value_schema_text)?;

        let mut registry_client = SchemaRegistryClient::new(registry.clone());
        let key_id = registry_client
            .register(&key_subject(&kafka.topic), KEY_SCHEMA)
            .await?;
        let value_id = registry_client
            .register(&value_subject(&kafka.topic), value_schema_text.trim())
            .await?;

        let producer: FutureProducer = kafka.client_config().create()?;

        info!(
            "Producer ready for topic '{}' (key schema id {}, value schema id {})",
            kafka.topic, key_id, value_id
        );

        Ok(Self {
            producer,
            topic: kafka.topic.clone(),
            key_serializer: AvroSerializer::for_string_keys(key_id),
            value_serializer: AvroSerializer::new(value_schema, value_id),
            pending: FuturesUnordered::new(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Number of publishes without a delivery report yet.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Serialize and enqueue one record keyed by its order key.
    ///
    /// Fails only when the record cannot be encoded or the local queue rejects it.
    pub fn publish(&mut self, record: &OrderRecord) -> Result<(), ProducerError> {
        let key = self.key_serializer.serialize_key(record.key())?;
        let payload = self.value_serializer.serialize_record(record)?;

        let future_record = FutureRecord::to(&self.topic).key(&key).payload(&payload);
        let delivery = self
            .producer
            .send_result(future_record)
            .map_err(|(err, _)| ProducerError::Kafka(err))?;

        self.pending.push(delivery);
        Ok(())
    }

    /// Collect every delivery report that has already resolved.
    pub fn poll_deliveries(&mut self) -> Vec<DeliveryReport> {
        let mut reports = Vec::new();
        while let Some(Some(outcome)) = self.pending.next().now_or_never() {
            reports.push(DeliveryReport::from_outcome(&self.topic, outcome));
        }
        reports
    }

    /// Wait for queued messages to be delivered, up to `timeout`.
    pub async fn flush(&mut self, timeout: Duration) -> Result<FlushOutcome, ProducerError> {
        info!(
            "Flushing {} in-flight messages (timeout {:?})",
            self.pending.len(),
            timeout
        );

        let producer = self.producer.clone();
        let flushed = tokio::task::spawn_blocking(move || producer.flush(timeout))
            .await
            .map_err(|e| ProducerError::Flush(e.to_string()))?;
        if let Err(e) = flushed {
            warn!("Flush did not complete: {}", e);
        }

        let reports = self.poll_deliveries();
        let undelivered = self.pending.len();
        debug!(
            "Flush collected {} reports, {} undelivered",
            reports.len(),
            undelivered
        );

        Ok(FlushOutcome {
            reports,
            undelivered,
        })
    }
}
