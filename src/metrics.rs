//! Prometheus metric definitions for the Apache exporter.
//!
//! The metric set is built once at startup and then owned by the collector,
//! which is the only place that writes to it.

use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Counter, GaugeVec, Opts, TextEncoder};

use crate::status::StatusFields;

/// Namespace prefixed to every exported metric name.
pub const NAMESPACE: &str = "apache";

/// Metrics derived from the Apache status page.
#[derive(Clone)]
pub struct ApacheMetrics {
    pub scrape_failures: Counter,
    pub accesses_total: Counter,
    pub kbytes_total: Counter,
    pub uptime: Counter,
    pub threads: GaugeVec, // labels: state
    pub workers: GaugeVec, // labels: state
}

impl ApacheMetrics {
    /// Creates all metric descriptors.
    pub fn new() -> Result<Self, prometheus::Error> {
        let scrape_failures = Counter::with_opts(
            Opts::new(
                "exporter_scrape_failures_total",
                "Number of errors while scraping apache.",
            )
            .namespace(NAMESPACE),
        )?;
        let accesses_total = Counter::with_opts(
            Opts::new("accesses_total", "Current total apache accesses").namespace(NAMESPACE),
        )?;
        let kbytes_total = Counter::with_opts(
            Opts::new("sent_kilobytes_total", "Current total kbytes sent").namespace(NAMESPACE),
        )?;
        let uptime = Counter::with_opts(
            Opts::new("uptime_seconds_total", "Current uptime in seconds").namespace(NAMESPACE),
        )?;
        let threads = GaugeVec::new(
            Opts::new("threads", "Apache thread statuses").namespace(NAMESPACE),
            &["state"],
        )?;
        let workers = GaugeVec::new(
            Opts::new("workers", "Apache worker statuses").namespace(NAMESPACE),
            &["state"],
        )?;

        Ok(Self {
            scrape_failures,
            accesses_total,
            kbytes_total,
            uptime,
            threads,
            workers,
        })
    }

    /// Writes a successfully parsed page into the metrics and returns the
    /// families that carry data for this cycle.
    ///
    /// Labelled series from earlier cycles are dropped first, so the result
    /// only reflects `fields`.
    pub fn publish(&self, fields: &StatusFields) -> Vec<MetricFamily> {
        self.threads.reset();
        self.workers.reset();

        let mut families = Vec::new();

        // Counters mirror the upstream totals: reset, then add the absolute value.
        for (counter, value) in [
            (&self.accesses_total, fields.accesses_total),
            (&self.kbytes_total, fields.kbytes_total),
            (&self.uptime, fields.uptime_seconds),
        ] {
            if let Some(value) = value {
                counter.reset();
                counter.inc_by(value);
                families.extend(counter.collect());
            }
        }

        // An empty vec would encode as a family without samples.
        if set_states(&self.threads, fields.busy_threads, fields.idle_threads) {
            families.extend(self.threads.collect());
        }
        if set_states(&self.workers, fields.busy_workers, fields.idle_workers) {
            families.extend(self.workers.collect());
        }

        families
    }

    /// Records a failed cycle and returns the failure counter on its own.
    pub fn fail(&self) -> Vec<MetricFamily> {
        self.scrape_failures.inc();
        self.scrape_failures.collect()
    }
}

/// Sets the busy/idle series that are present. Returns false if neither is.
fn set_states(vec: &GaugeVec, busy: Option<f64>, idle: Option<f64>) -> bool {
    if let Some(busy) = busy {
        vec.with_label_values(&["busy"]).set(busy);
    }
    if let Some(idle) = idle {
        vec.with_label_values(&["idle"]).set(idle);
    }
    busy.is_some() || idle.is_some()
}

/// Renders metric families in the Prometheus text exposition format.
pub fn render(families: &[MetricFamily]) -> Result<String, prometheus::Error> {
    TextEncoder::new().encode_to_string(families)
}
