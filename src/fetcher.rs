//! HTTP client for the upstream status page.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::ScrapeError;

/// Whether the upstream TLS certificate is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVerification {
    #[default]
    Verify,
    SkipVerify,
}

impl TlsVerification {
    pub fn from_insecure(insecure: bool) -> Self {
        if insecure {
            TlsVerification::SkipVerify
        } else {
            TlsVerification::Verify
        }
    }
}

/// Fetches the raw status document from a single configured URI.
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    uri: String,
    client: Client,
}

impl StatusFetcher {
    /// Builds a fetcher. Without a timeout the request may wait indefinitely.
    pub fn new(
        uri: impl Into<String>,
        tls: TlsVerification,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(tls == TlsVerification::SkipVerify);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            uri: uri.into(),
            client: builder.build()?,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Performs one GET and returns the body of a 200 response.
    #[instrument(skip(self), fields(uri = %self.uri))]
    pub async fn fetch(&self) -> Result<String, ScrapeError> {
        let response = self.client.get(&self.uri).send().await?;
        let status = response.status();
        debug!("Upstream answered {}", status);

        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => e.to_string(),
            };
            return Err(ScrapeError::Status {
                code: status.as_u16(),
                status: status.to_string(),
                body,
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes of status page", body.len());
        Ok(body)
    }
}
