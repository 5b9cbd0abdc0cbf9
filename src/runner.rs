//! The production loop.
//!
//! One iteration: synthesize a record, hand it to the sink, collect any
//! delivery reports that are ready, update the throughput window, then sleep
//! the pacing interval. The loop runs until the shutdown receiver fires or a
//! publish fails; the sink is flushed on both paths.

use crate::config::LoadgenConfig;
use crate::pacer::RatePacer;
use crate::reporter::{ThroughputReporter, ThroughputSample};
use crate::sink::RecordSink;
use order_generator::OrderGenerator;
use order_producer::DeliveryReport;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{info, warn};

/// Loop timing parameters.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub pacer: RatePacer,
    pub report_window: Duration,
    pub flush_timeout: Duration,
}

impl LoopSettings {
    pub fn from_config(config: &LoadgenConfig) -> Self {
        Self {
            pacer: RatePacer::per_minute(config.target_messages_per_minute),
            report_window: config.report_window,
            flush_timeout: config.flush_timeout,
        }
    }
}

/// Totals for one run of the loop.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub published: u64,
    pub delivered: u64,
    pub failed: u64,
    /// Deliveries still unresolved after the final flush.
    pub undelivered: usize,
    pub elapsed: Duration,
    /// One sample per closed reporting window.
    pub samples: Vec<ThroughputSample>,
}

impl RunSummary {
    /// Mean publish rate over the whole run.
    pub fn messages_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.published as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    fn observe(&mut self, reports: Vec<DeliveryReport>) {
        for report in reports {
            report.log();
            if report.is_delivered() {
                self.delivered += 1;
            } else {
                self.failed += 1;
            }
        }
    }
}

/// Run the production loop until `shutdown` fires, then flush.
///
/// Delivery failures are counted and logged but never stop the loop. A publish
/// error (the local queue rejecting a record) ends it: the sink is still
/// flushed, and the publish error is returned with the flush result attached.
pub async fn run_load<S: RecordSink>(
    sink: &mut S,
    generator: &mut OrderGenerator,
    settings: LoopSettings,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<RunSummary> {
    let started = Instant::now();
    let mut reporter = ThroughputReporter::new(settings.report_window, started);
    let mut summary = RunSummary::default();

    info!(
        "Producing with a {:?} pacing interval (report window {:?})",
        settings.pacer.interval(),
        settings.report_window
    );

    let mut publish_error = None;
    loop {
        let record = generator.next_record();
        if let Err(e) = sink.publish(&record) {
            warn!("Publish failed after {} messages: {:#}", summary.published, e);
            publish_error = Some(e);
            break;
        }
        summary.published += 1;

        summary.observe(sink.poll_deliveries());

        if let Some(sample) = reporter.record_publish(Instant::now()) {
            info!("Current production rate: {:.2} messages/second", sample.rate());
            summary.samples.push(sample);
        }

        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                info!("Shutting down producer...");
                break;
            }
            _ = settings.pacer.pace() => {}
        }
    }

    let flushed = flush_sink(sink, &mut summary, settings.flush_timeout).await;
    if let Some(err) = publish_error {
        let note = match flushed {
            Ok(()) => format!(
                "Publishing stopped after {} messages ({} delivered, {} undelivered after flush)",
                summary.published, summary.delivered, summary.undelivered
            ),
            Err(flush_err) => format!(
                "Publishing stopped after {} messages and the flush failed: {:#}",
                summary.published, flush_err
            ),
        };
        return Err(err.context(note));
    }
    flushed?;

    summary.elapsed = started.elapsed();
    info!(
        "Produced {} messages in {:?} ({:.2} msg/sec): {} delivered, {} failed",
        summary.published,
        summary.elapsed,
        summary.messages_per_second(),
        summary.delivered,
        summary.failed
    );

    Ok(summary)
}

async fn flush_sink<S: RecordSink>(
    sink: &mut S,
    summary: &mut RunSummary,
    timeout: Duration,
) -> anyhow::Result<()> {
    let outcome = sink.flush(timeout).await?;
    summary.observe(outcome.reports);
    summary.undelivered = outcome.undelivered;
    if summary.undelivered > 0 {
        warn!(
            "{} messages were still undelivered after {:?}",
            summary.undelivered, timeout
        );
    }
    Ok(())
}
