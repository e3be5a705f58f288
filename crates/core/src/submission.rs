use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::info;

use crate::config::{Settings, WEBHOOK_URL_VAR};
use crate::context::RequestContext;
use crate::device::parse_user_agent;
use crate::error::SubmissionError;
use crate::ids::{generate_request_id, generate_session_id};
use crate::types::{
    DeviceBlock, SessionInfo, SubmissionReceipt, SubmissionRequest, UserInfo, WebhookPayload,
};
use crate::webhook::WebhookClient;

pub const MIN_YEAR: i64 = 2000;

/// Runs one submission end to end: parse, validate, build the payload,
/// deliver it, and map the outcome.
pub async fn submit(
    settings: &Settings,
    webhook: &WebhookClient,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<SubmissionReceipt, SubmissionError> {
    let request = parse_request(body)?;

    let now = Utc::now();
    let enrichment = settings.enrich.then_some(Enrichment {
        headers,
        source_tag: &settings.source_tag,
    });
    let payload = build_payload(request, now, enrichment);

    let url = settings.webhook_url.as_deref().ok_or_else(|| {
        SubmissionError::Configuration(format!("{} is not configured", WEBHOOK_URL_VAR))
    })?;

    info!(
        month = request.month,
        year = request.year,
        session_id = payload.session_id().unwrap_or_default(),
        "forwarding submission"
    );

    webhook.deliver(url, &payload).await?;

    Ok(SubmissionReceipt {
        ok: true,
        month: request.month,
        year: request.year,
        session_id: payload.session_id().map(str::to_string),
        timestamp: payload.timestamp,
    })
}

pub fn parse_request(body: &[u8]) -> Result<SubmissionRequest, SubmissionError> {
    let value: Value = serde_json::from_slice(body)?;
    validate(&value)
}

/// Month must be an integer in 1..=12 and year an integer >= 2000. Strings,
/// fractions, and nulls are rejected, and a non-object body has no fields.
pub fn validate(value: &Value) -> Result<SubmissionRequest, SubmissionError> {
    let month = integral(value.get("month"))
        .and_then(|m| u32::try_from(m).ok())
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(SubmissionError::invalid_month)?;

    let year = integral(value.get("year"))
        .filter(|y| *y >= MIN_YEAR)
        .ok_or_else(SubmissionError::invalid_year)?;

    Ok(SubmissionRequest { month, year })
}

fn integral(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub struct Enrichment<'a> {
    pub headers: &'a HeaderMap,
    pub source_tag: &'a str,
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn build_payload(
    request: SubmissionRequest,
    now: DateTime<Utc>,
    enrichment: Option<Enrichment<'_>>,
) -> WebhookPayload {
    let timestamp = format_timestamp(now);

    let mut payload = WebhookPayload {
        month: request.month,
        year: request.year,
        timestamp: timestamp.clone(),
        user: None,
        device: None,
        session: None,
    };

    let Some(enrichment) = enrichment else {
        return payload;
    };

    let ctx = RequestContext::from_headers(enrichment.headers);
    let info = parse_user_agent(&ctx.user_agent);

    payload.user = Some(UserInfo {
        ip: ctx.ip,
        country: ctx.country,
        city: ctx.city,
        region: ctx.region,
        timezone: ctx.timezone,
        session_id: generate_session_id(now),
        language: ctx.language,
    });
    payload.device = Some(DeviceBlock {
        user_agent: ctx.user_agent,
        info,
    });
    payload.session = Some(SessionInfo {
        referrer: ctx.referrer,
        source: enrichment.source_tag.to_string(),
        timestamp,
        request_id: generate_request_id(now),
    });

    payload
}
