//! Rando populator.

use crate::error::PopulateError;
use crate::insert::{estimated_count, insert_batch};
use bson::Document;
use chrono::Utc;
use mongodb::{Collection, Database};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rando_core::Variant;
use rando_generator::generate_rando_with;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default batch size for insert operations.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Progress is reported every this many insertions.
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Progress of a running population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateProgress {
    pub variant: Variant,
    pub inserted: u64,
    pub total: u64,
}

impl PopulateProgress {
    /// Completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.inserted as f64 / self.total as f64 * 100.0
        }
    }
}

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of documents inserted.
    pub rows_inserted: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting data.
    pub insert_duration: Duration,
    /// Number of batches executed.
    pub batch_count: u64,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Decides when a progress report is due.
#[derive(Debug)]
struct ProgressTracker {
    interval: u64,
    next_report: u64,
}

impl ProgressTracker {
    fn new(interval: u64) -> Self {
        let interval = interval.max(1);
        Self {
            interval,
            next_report: interval,
        }
    }

    /// Whether `inserted` crossed one or more report thresholds.
    fn due(&mut self, inserted: u64) -> bool {
        if inserted < self.next_report {
            return false;
        }
        while self.next_report <= inserted {
            self.next_report += self.interval;
        }
        true
    }
}

/// Populator that generates and inserts Rando documents.
pub struct RandoPopulator {
    database: Database,
    batch_size: usize,
    progress_interval: u64,
    progress: Option<mpsc::UnboundedSender<PopulateProgress>>,
}

impl RandoPopulator {
    /// Create a new populator writing into the given database.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            batch_size: DEFAULT_BATCH_SIZE,
            progress_interval: PROGRESS_INTERVAL,
            progress: None,
        }
    }

    /// Set the batch size for insert operations.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set how many insertions separate two progress reports.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Send progress reports to the given channel.
    pub fn with_progress(mut self, sender: mpsc::UnboundedSender<PopulateProgress>) -> Self {
        self.progress = Some(sender);
        self
    }

    fn collection(&self, variant: Variant) -> Collection<Document> {
        self.database.collection(variant.collection_name())
    }

    fn report(&self, progress: PopulateProgress) {
        debug!(
            collection = %progress.variant,
            inserted = progress.inserted,
            status = %format_args!("{:.2}", progress.percent()),
            "Inserted documents"
        );
        if let Some(sender) = &self.progress {
            // A dropped receiver only means nobody is listening any more
            let _ = sender.send(progress);
        }
    }

    /// Populate a variant's collection with `count` generated documents.
    ///
    /// Cancellation is checked between batches. The run stops at the first
    /// failed insertion; nothing is rolled back.
    pub async fn populate(
        &self,
        variant: Variant,
        count: u64,
        cancel: &CancellationToken,
    ) -> Result<PopulateMetrics, PopulateError> {
        if self.batch_size == 0 {
            return Err(PopulateError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }

        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();
        let collection = self.collection(variant);
        let mut tracker = ProgressTracker::new(self.progress_interval);
        let mut rng = StdRng::from_entropy();

        info!(
            collection = %variant,
            total = count,
            batch_size = self.batch_size,
            "Populating collection..."
        );

        let mut remaining = count;
        while remaining > 0 {
            if cancel.is_cancelled() {
                return Err(PopulateError::Cancelled {
                    collection: variant.collection_name().to_string(),
                    inserted: metrics.rows_inserted,
                });
            }

            let batch_len = remaining.min(self.batch_size as u64);

            let gen_start = Instant::now();
            let documents: Vec<Document> = (0..batch_len)
                .map(|_| variant.encode(&generate_rando_with(&mut rng, Utc::now())))
                .collect();
            metrics.generation_duration += gen_start.elapsed();

            let insert_start = Instant::now();
            let inserted = insert_batch(&collection, documents, metrics.rows_inserted).await?;
            metrics.insert_duration += insert_start.elapsed();

            metrics.rows_inserted += inserted;
            metrics.batch_count += 1;
            remaining -= batch_len;

            if tracker.due(metrics.rows_inserted) {
                self.report(PopulateProgress {
                    variant,
                    inserted: metrics.rows_inserted,
                    total: count,
                });
            }
        }

        self.report(PopulateProgress {
            variant,
            inserted: metrics.rows_inserted,
            total: count,
        });

        metrics.total_duration = start_time.elapsed();

        info!(
            collection = %variant,
            duration = ?metrics.total_duration,
            "Collection populated: {} documents ({:.2} docs/sec)",
            metrics.rows_inserted,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Get the estimated document count of a variant's collection.
    pub async fn document_count(&self, variant: Variant) -> Result<u64, PopulateError> {
        estimated_count(&self.collection(variant)).await
    }
}
