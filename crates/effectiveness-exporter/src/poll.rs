//! Fixed-interval poll loop: chunk, fetch, publish, wait

use crate::chunk::chunk;
use crate::client::EffectivenessFetcher;
use crate::metrics::{ExporterMetrics, MetricsPublisher};
use crate::validators::ValidatorSet;
use async_trait::async_trait;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Waits between two poll cycles
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self);
}

/// Sleeps one full period after each cycle completes
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        // Measure the period from the end of the cycle, not its start
        self.interval.reset();
        self.interval.tick().await;
    }
}

/// Outcome of one pass over the validator set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub chunks: usize,
    pub chunks_without_records: usize,
    pub records_published: usize,
    /// Validators that have not produced a value in any cycle so far
    pub never_observed: usize,
    pub duration: Duration,
}

/// Drives fetch and publish over the whole validator set, forever
pub struct PollLoop {
    validators: ValidatorSet,
    chunk_size: NonZeroUsize,
    fetcher: EffectivenessFetcher,
    publisher: MetricsPublisher,
}

impl PollLoop {
    pub fn new(
        validators: ValidatorSet,
        chunk_size: NonZeroUsize,
        fetcher: EffectivenessFetcher,
        publisher: MetricsPublisher,
    ) -> Self {
        ExporterMetrics::set_validator_count(validators.len());
        Self {
            validators,
            chunk_size,
            fetcher,
            publisher,
        }
    }

    pub fn publisher(&self) -> &MetricsPublisher {
        &self.publisher
    }

    /// One pass over every chunk
    ///
    /// A chunk that yields nothing leaves its validators' gauges untouched.
    pub async fn run_cycle(&self) -> CycleReport {
        let started = Instant::now();
        let mut report = CycleReport::default();

        for validators in chunk(self.validators.as_slice(), self.chunk_size) {
            report.chunks += 1;

            let records = self.fetcher.fetch(validators).await;
            if records.is_empty() {
                report.chunks_without_records += 1;
                continue;
            }

            for record in &records {
                self.publisher.publish(record);
            }
            report.records_published += records.len();
        }

        let state = self.publisher.state();
        report.never_observed = self
            .validators
            .iter()
            .filter(|id| !state.has_validator(id.as_str()))
            .count();

        report.duration = started.elapsed();
        ExporterMetrics::record_cycle(report.duration);
        report
    }

    /// Never returns; fetch errors only cost the affected chunk one cycle
    pub async fn run<T: Ticker>(&self, mut ticker: T) {
        info!(
            "Run metrics loop - {} validators in chunks of {}",
            self.validators.len(),
            self.chunk_size
        );

        loop {
            let report = self.run_cycle().await;

            if report.chunks_without_records > 0 {
                warn!(
                    "Poll cycle finished with {}/{} empty chunks",
                    report.chunks_without_records, report.chunks
                );
            }
            if report.never_observed > 0 {
                warn!(
                    "{} validators have not returned effectiveness data yet",
                    report.never_observed
                );
            }
            debug!(
                "Published {} records in {:?}",
                report.records_published, report.duration
            );

            ticker.tick().await;
        }
    }
}
