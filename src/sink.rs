//! The transport seam between the production loop and Kafka.

use anyhow::Context;
use async_trait::async_trait;
use order_generator::OrderRecord;
use order_producer::{DeliveryReport, FlushOutcome, OrderProducer};
use std::time::Duration;

/// Destination for generated records.
#[async_trait]
pub trait RecordSink: Send {
    /// Enqueue one record. Must not wait for delivery.
    fn publish(&mut self, record: &OrderRecord) -> anyhow::Result<()>;

    /// Non-blocking drive call: return the delivery reports available now.
    fn poll_deliveries(&mut self) -> Vec<DeliveryReport>;

    /// Block until buffered records are delivered or `timeout` elapses.
    async fn flush(&mut self, timeout: Duration) -> anyhow::Result<FlushOutcome>;
}

#[async_trait]
impl RecordSink for OrderProducer {
    fn publish(&mut self, record: &OrderRecord) -> anyhow::Result<()> {
        OrderProducer::publish(self, record)
            .with_context(|| format!("Failed to publish order {}", record.order_key))
    }

    fn poll_deliveries(&mut self) -> Vec<DeliveryReport> {
        OrderProducer::poll_deliveries(self)
    }

    async fn flush(&mut self, timeout: Duration) -> anyhow::Result<FlushOutcome> {
        OrderProducer::flush(self, timeout)
            .await
            .context("Failed to flush producer")
    }
}
