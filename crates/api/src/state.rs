use std::sync::Arc;

use settle_core::{Settings, WebhookClient};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub webhook: WebhookClient,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let webhook = WebhookClient::new(settings.webhook_timeout)?;
        Ok(Self {
            settings: Arc::new(settings),
            webhook,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RequestId(pub String);
