//! Errors that abort a collection cycle.

use thiserror::Error;

use crate::status::ParseError;

/// Reasons a scrape of the upstream status page fails.
///
/// All variants are handled the same way by the collector: the cycle is
/// dropped and the scrape-failure counter is incremented.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The request never produced a usable response (DNS, connect, TLS, read).
    #[error("error scraping apache: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The upstream answered with something other than 200 OK.
    #[error("status {status} ({code}): {body}")]
    Status {
        code: u16,
        status: String,
        body: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ScrapeError {
    /// Short, stable label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Fetch(_) => "fetch",
            ScrapeError::Status { .. } => "status",
            ScrapeError::Parse(_) => "parse",
        }
    }
}
