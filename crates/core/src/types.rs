use serde::{Deserialize, Serialize};

use crate::device::DeviceInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub month: u32,
    pub year: i64,
}

/// Body POSTed to the configured webhook. The enrichment blocks are omitted
/// entirely when enrichment is off.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub month: u32,
    pub year: i64,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,
}

impl WebhookPayload {
    pub fn session_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.session_id.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub region: String,
    pub timezone: String,
    pub session_id: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBlock {
    pub user_agent: String,
    #[serde(flatten)]
    pub info: DeviceInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub referrer: String,
    pub source: String,
    pub timestamp: String,
    pub request_id: String,
}

/// Successful outcome returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub ok: bool,
    pub month: u32,
    pub year: i64,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Wire shape of every `/api/trigger` response, as seen by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub ok: bool,
    pub month: Option<u32>,
    pub year: Option<i64>,
    pub timestamp: Option<String>,
    pub session_id: Option<String>,
    pub error: Option<String>,
}
