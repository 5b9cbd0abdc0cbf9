//! Production loop tests against an in-memory sink.
//!
//! All tests run on tokio's paused clock, so pacing sleeps and the reporting
//! window advance virtual time only.

use async_trait::async_trait;
use order_generator::{OrderGenerator, OrderRecord};
use order_producer::{DeliveryReport, FlushOutcome};
use orders_loadgen::pacer::RatePacer;
use orders_loadgen::{run_load, LoopSettings, RecordSink};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::broadcast;

const TOPIC: &str = "orders_topic";

/// Records every publish and reports each delivery on the next poll.
#[derive(Default)]
struct MemorySink {
    records: Vec<OrderRecord>,
    queued: Vec<DeliveryReport>,
    /// Every n-th delivery is reported as failed.
    fail_every: Option<u64>,
    /// Publishing fails once this many records were accepted.
    reject_after: Option<usize>,
    /// Reports withheld from polling until flush.
    hold_until_flush: bool,
    /// Reports still outstanding when the flush times out.
    undelivered_at_flush: usize,
    flushes: Vec<Duration>,
}

#[async_trait]
impl RecordSink for MemorySink {
    fn publish(&mut self, record: &OrderRecord) -> anyhow::Result<()> {
        if self.reject_after == Some(self.records.len()) {
            anyhow::bail!("Local: Queue full");
        }
        self.records.push(record.clone());

        let n = self.records.len() as u64;
        let report = match self.fail_every {
            Some(every) if n % every == 0 => DeliveryReport::Failed {
                topic: TOPIC.to_string(),
                error: "Broker: Message timed out".to_string(),
            },
            _ => DeliveryReport::Delivered {
                topic: TOPIC.to_string(),
                partition: (n % 3) as i32,
                offset: n as i64,
            },
        };
        self.queued.push(report);
        Ok(())
    }

    fn poll_deliveries(&mut self) -> Vec<DeliveryReport> {
        if self.hold_until_flush {
            return Vec::new();
        }
        std::mem::take(&mut self.queued)
    }

    async fn flush(&mut self, timeout: Duration) -> anyhow::Result<FlushOutcome> {
        self.flushes.push(timeout);
        let mut reports = std::mem::take(&mut self.queued);
        let undelivered = self.undelivered_at_flush.min(reports.len());
        reports.truncate(reports.len() - undelivered);
        Ok(FlushOutcome {
            reports,
            undelivered,
        })
    }
}

fn settings(per_minute: u32, report_window: Duration) -> LoopSettings {
    LoopSettings {
        pacer: RatePacer::per_minute(NonZeroU32::new(per_minute).unwrap()),
        report_window,
        flush_timeout: Duration::from_secs(10),
    }
}

/// Shutdown receiver that fires after `delay` of (virtual) time.
fn shutdown_after(delay: Duration) -> broadcast::Receiver<()> {
    let (tx, rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(());
    });
    rx
}

#[tokio::test(start_paused = true)]
async fn test_loop_runs_until_shutdown_then_flushes() {
    let mut sink = MemorySink::default();
    let mut generator = OrderGenerator::new(42);

    let summary = run_load(
        &mut sink,
        &mut generator,
        settings(60_000, Duration::from_secs(60)),
        shutdown_after(Duration::from_millis(100)),
    )
    .await
    .unwrap();

    // 1 ms pacing for 100 ms
    assert!(
        (99..=102).contains(&summary.published),
        "published {}",
        summary.published
    );
    assert_eq!(summary.published as usize, sink.records.len());
    assert_eq!(summary.delivered, summary.published);
    assert_eq!(summary.failed, 0);
    assert_eq!(sink.flushes, vec![Duration::from_secs(10)]);
    assert!(summary.samples.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_prefired_shutdown_publishes_once() {
    let (tx, rx) = broadcast::channel(1);
    tx.send(()).unwrap();

    let mut sink = MemorySink::default();
    let mut generator = OrderGenerator::new(1);

    let summary = run_load(
        &mut sink,
        &mut generator,
        settings(20_000, Duration::from_secs(60)),
        rx,
    )
    .await
    .unwrap();

    assert_eq!(summary.published, 1);
    assert_eq!(sink.flushes.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reporter_emits_one_sample_per_window() {
    let mut sink = MemorySink::default();
    let mut generator = OrderGenerator::new(42);

    // 10 ms pacing, 1 s windows, stop mid-way through the fourth window
    let summary = run_load(
        &mut sink,
        &mut generator,
        settings(6_000, Duration::from_secs(1)),
        shutdown_after(Duration::from_millis(3_500)),
    )
    .await
    .unwrap();

    assert_eq!(summary.samples.len(), 3);
    for sample in &summary.samples {
        assert!(sample.elapsed >= Duration::from_secs(1));
        let rate = sample.rate();
        assert!((95.0..=105.0).contains(&rate), "rate {rate}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_delivery_failures_do_not_stop_the_loop() {
    let mut sink = MemorySink {
        fail_every: Some(3),
        ..Default::default()
    };
    let mut generator = OrderGenerator::new(42);

    let summary = run_load(
        &mut sink,
        &mut generator,
        settings(60_000, Duration::from_secs(60)),
        shutdown_after(Duration::from_millis(60)),
    )
    .await
    .unwrap();

    assert!(summary.published > 3);
    assert_eq!(summary.failed, summary.published / 3);
    assert_eq!(summary.delivered + summary.failed, summary.published);
}

#[tokio::test(start_paused = true)]
async fn test_flush_collects_outstanding_reports() {
    let mut sink = MemorySink {
        hold_until_flush: true,
        ..Default::default()
    };
    let mut generator = OrderGenerator::new(42);

    let summary = run_load(
        &mut sink,
        &mut generator,
        settings(60_000, Duration::from_secs(60)),
        shutdown_after(Duration::from_millis(20)),
    )
    .await
    .unwrap();

    assert!(summary.published > 0);
    assert_eq!(summary.delivered, summary.published);
    assert_eq!(summary.undelivered, 0);
}

#[tokio::test(start_paused = true)]
async fn test_flush_timeout_reports_undelivered() {
    let mut sink = MemorySink {
        hold_until_flush: true,
        undelivered_at_flush: 5,
        ..Default::default()
    };
    let mut generator = OrderGenerator::new(42);

    let summary = run_load(
        &mut sink,
        &mut generator,
        settings(60_000, Duration::from_secs(60)),
        shutdown_after(Duration::from_millis(20)),
    )
    .await
    .unwrap();

    assert!(summary.published > 5);
    assert_eq!(summary.undelivered, 5);
    assert_eq!(summary.delivered, summary.published - 5);
    assert_eq!(summary.failed, 0);
}

#[tokio::test(start_paused = true)]
async fn test_publish_error_flushes_then_fails() {
    let mut sink = MemorySink {
        reject_after: Some(4),
        ..Default::default()
    };
    let mut generator = OrderGenerator::new(42);

    let result = run_load(
        &mut sink,
        &mut generator,
        settings(60_000, Duration::from_secs(60)),
        shutdown_after(Duration::from_secs(60)),
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.root_cause().to_string().contains("Queue full"), "{err:#}");
    assert!(format!("{err:#}").contains("Publishing stopped after 4 messages"));
    assert_eq!(sink.records.len(), 4);
    assert_eq!(sink.flushes, vec![Duration::from_secs(10)]);
}

#[tokio::test(start_paused = true)]
async fn test_published_records_keyed_by_order_key() {
    let mut sink = MemorySink::default();
    let mut generator = OrderGenerator::new(42);
    let mut expected = OrderGenerator::new(42);

    run_load(
        &mut sink,
        &mut generator,
        settings(60_000, Duration::from_secs(60)),
        shutdown_after(Duration::from_millis(10)),
    )
    .await
    .unwrap();

    for record in &sink.records {
        assert_eq!(record, &expected.next_record());
        assert_eq!(record.key(), record.order_key);
    }
}
