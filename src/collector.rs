//! Scrape-driven collection of Apache metrics.
//!
//! Each call to [`Collector::collect`] runs one full cycle: fetch the status
//! page, parse it, and publish the result. The metric set sits behind an
//! async mutex that is held for the whole cycle, so concurrent scrapes run
//! one after another and never observe a half-written snapshot.

use prometheus::proto::MetricFamily;
use std::fmt;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

use crate::error::ScrapeError;
use crate::fetcher::StatusFetcher;
use crate::metrics::ApacheMetrics;
use crate::status::parse_status;

/// Stage of the collection cycle currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Parsing,
    Publishing,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Parsing => "parsing",
            Phase::Publishing => "publishing",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// State guarded by the collector's lock.
struct CollectorState {
    metrics: ApacheMetrics,
    phase: Phase,
    cycles: u64,
}

impl CollectorState {
    fn enter(&mut self, phase: Phase) {
        debug!("Collection cycle {}: {} -> {}", self.cycles, self.phase, phase);
        self.phase = phase;
    }
}

pub struct Collector {
    fetcher: StatusFetcher,
    state: Mutex<CollectorState>,
}

impl Collector {
    pub fn new(fetcher: StatusFetcher, metrics: ApacheMetrics) -> Self {
        Self {
            fetcher,
            state: Mutex::new(CollectorState {
                metrics,
                phase: Phase::Idle,
                cycles: 0,
            }),
        }
    }

    pub fn fetcher(&self) -> &StatusFetcher {
        &self.fetcher
    }

    /// Runs one collection cycle and returns the snapshot to expose.
    ///
    /// A failed cycle yields only the scrape-failure counter; it never
    /// returns an error to the caller.
    #[instrument(skip(self))]
    pub async fn collect(&self) -> Vec<MetricFamily> {
        let mut state = self.state.lock().await;
        state.cycles += 1;
        let start = Instant::now();

        match self.run_cycle(&mut state).await {
            Ok(families) => {
                state.enter(Phase::Idle);
                debug!(
                    "Collection cycle {} published {} families in {:.2}ms",
                    state.cycles,
                    families.len(),
                    start.elapsed().as_secs_f64() * 1000.0
                );
                families
            }
            Err(e) => {
                state.enter(Phase::Failed);
                error!("Error scraping apache ({}): {}", e.kind(), e);
                let families = state.metrics.fail();
                state.enter(Phase::Idle);
                families
            }
        }
    }

    async fn run_cycle(
        &self,
        state: &mut CollectorState,
    ) -> Result<Vec<MetricFamily>, ScrapeError> {
        state.enter(Phase::Fetching);
        let body = self.fetcher.fetch().await?;

        state.enter(Phase::Parsing);
        let fields = parse_status(&body)?;

        state.enter(Phase::Publishing);
        Ok(state.metrics.publish(&fields))
    }

    /// Total number of failed cycles so far. Waits for a running cycle.
    pub async fn scrape_failures(&self) -> f64 {
        self.state.lock().await.metrics.scrape_failures.get()
    }

    /// Number of cycles started so far. Waits for a running cycle.
    pub async fn cycles(&self) -> u64 {
        self.state.lock().await.cycles
    }
}
