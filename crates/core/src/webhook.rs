use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::SubmissionError;
use crate::types::WebhookPayload;

/// Thin wrapper over a shared `reqwest::Client` that performs the single
/// outbound POST of a submission.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn deliver(&self, url: &str, payload: &WebhookPayload) -> Result<(), SubmissionError> {
        let body = serde_json::to_string(payload)?;

        let start = Instant::now();
        let resp = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let status = resp.status();
        if status.is_success() {
            info!(status = status.as_u16(), latency_ms, "webhook delivered");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), latency_ms, "webhook returned non-success status");
        Err(SubmissionError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}
