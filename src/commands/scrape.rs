//! Scrape command implementation.
//!
//! Runs collection cycles against the configured status page and prints the
//! exposition text, without starting the HTTP server.

use apache_exporter::{render, ApacheMetrics, Collector, StatusFetcher, TlsVerification};
use std::time::Instant;

use crate::config::Config;

/// Builds the collector described by the effective config.
pub fn build_collector(config: &Config) -> Result<Collector, Box<dyn std::error::Error>> {
    let fetcher = StatusFetcher::new(
        config.scrape_uri(),
        TlsVerification::from_insecure(config.insecure()),
        config.scrape_timeout(),
    )?;
    let metrics = ApacheMetrics::new()?;
    Ok(Collector::new(fetcher, metrics))
}

/// Scrapes the upstream `iterations` times and prints each snapshot.
pub async fn command_scrape(
    iterations: usize,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🧪 Apache Exporter - Scrape Mode");
    println!("================================");
    println!("Upstream: {}", config.scrape_uri());

    let collector = build_collector(config)?;

    for iteration in 1..=iterations {
        println!("\n🔄 Iteration {}/{}:", iteration, iterations);

        let start = Instant::now();
        let families = collector.collect().await;
        let duration = start.elapsed();

        print!("{}", render(&families)?);
        println!(
            "   ⏱️  Scrape duration: {:.2}ms",
            duration.as_secs_f64() * 1000.0
        );
    }

    let failures = collector.scrape_failures().await;
    if failures > 0.0 {
        println!("\n❌ {} of {} scrapes failed", failures, iterations);
        std::process::exit(1);
    }

    println!("\n✅ Scrape completed successfully");
    Ok(())
}
