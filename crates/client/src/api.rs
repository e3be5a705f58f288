use settle_core::types::{SubmissionRequest, TriggerResponse};
use thiserror::Error;

pub const DEFAULT_FAILURE: &str = "could not send the webhook";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

pub struct TriggerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TriggerClient {
    pub fn new(api_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/trigger", api_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, request: SubmissionRequest) -> Result<TriggerResponse, ClientError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let parsed = serde_json::from_str::<TriggerResponse>(&body).ok();

        match parsed {
            Some(data) if status.is_success() && data.ok => Ok(data),
            Some(data) => Err(ClientError::Rejected(
                data.error.unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            )),
            None => Err(ClientError::Rejected(DEFAULT_FAILURE.to_string())),
        }
    }
}
