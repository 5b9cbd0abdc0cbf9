//! Delivery reports.
//!
//! Reports are purely observational: a failed delivery is logged and counted,
//! never retried.

use futures::channel::oneshot::Canceled;
use rdkafka::producer::future_producer::OwnedDeliveryResult;
use tracing::{error, info};

/// Outcome of a single publish as reported by the broker client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    Delivered {
        topic: String,
        partition: i32,
        offset: i64,
    },
    Failed {
        topic: String,
        error: String,
    },
}

impl DeliveryReport {
    /// Build a report from the delivery future's output.
    pub(crate) fn from_outcome(
        topic: &str,
        outcome: Result<OwnedDeliveryResult, Canceled>,
    ) -> Self {
        match outcome {
            Ok(Ok((partition, offset))) => DeliveryReport::Delivered {
                topic: topic.to_string(),
                partition,
                offset,
            },
            Ok(Err((err, _))) => DeliveryReport::Failed {
                topic: topic.to_string(),
                error: err.to_string(),
            },
            Err(_) => DeliveryReport::Failed {
                topic: topic.to_string(),
                error: "delivery report channel closed".to_string(),
            },
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryReport::Delivered { .. })
    }

    /// Emit the per-message status line.
    pub fn log(&self) {
        match self {
            DeliveryReport::Delivered {
                topic,
                partition,
                offset,
            } => info!("Message delivered to {} [{}] at offset {}", topic, partition, offset),
            DeliveryReport::Failed { error, .. } => error!("Message delivery failed: {}", error),
        }
    }
}
