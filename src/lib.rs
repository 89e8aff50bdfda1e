//! Apache Exporter Library
//!
//! Bridges the Apache HTTP server `mod_status` page into Prometheus metrics.
//! Collection is driven by scrapes: every call to [`Collector::collect`]
//! fetches the status page once, parses it and returns a fresh snapshot.
//!
//! # Usage
//!
//! ```no_run
//! use apache_exporter::{render, ApacheMetrics, Collector, StatusFetcher, TlsVerification};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = StatusFetcher::new(
//!     "http://localhost/server-status/?auto",
//!     TlsVerification::Verify,
//!     None,
//! )?;
//! let collector = Collector::new(fetcher, ApacheMetrics::new()?);
//!
//! let families = collector.collect().await;
//! println!("{}", render(&families)?);
//! # Ok(())
//! # }
//! ```
//!
//! The parser is usable on its own:
//!
//! ```rust
//! use apache_exporter::parse_status;
//!
//! let fields = parse_status("BusyWorkers: 2\nIdleWorkers: 8").unwrap();
//! assert_eq!(fields.busy_workers, Some(2.0));
//! ```

pub mod collector;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod status;

// Re-export main types for convenience
pub use collector::{Collector, Phase};
pub use error::ScrapeError;
pub use fetcher::{StatusFetcher, TlsVerification};
pub use metrics::{render, ApacheMetrics};
pub use status::{parse_status, split_kv, split_row, ParseError, StatusFields};
