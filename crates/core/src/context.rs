use reqwest::header::{HeaderMap, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

use crate::device::UNKNOWN;

pub const DIRECT: &str = "Direct";

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";
const CF_CONNECTING_IP: &str = "cf-connecting-ip";
const GEO_COUNTRY: &str = "x-vercel-ip-country";
const GEO_CITY: &str = "x-vercel-ip-city";
const GEO_REGION: &str = "x-vercel-ip-country-region";
const GEO_TIMEZONE: &str = "x-vercel-ip-timezone";

/// Header-level snapshot of the inbound request. Every field falls back to a
/// sentinel when its header is missing, empty, or not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub region: String,
    pub timezone: String,
    pub user_agent: String,
    pub language: String,
    pub referrer: String,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip = header(headers, FORWARDED_FOR)
            .and_then(first_entry)
            .or_else(|| header(headers, REAL_IP))
            .or_else(|| header(headers, CF_CONNECTING_IP))
            .unwrap_or(UNKNOWN);

        let language = header(headers, ACCEPT_LANGUAGE.as_str())
            .and_then(first_entry)
            .unwrap_or(UNKNOWN);

        Self {
            ip: ip.to_string(),
            country: header_or(headers, GEO_COUNTRY, UNKNOWN),
            city: header_or(headers, GEO_CITY, UNKNOWN),
            region: header_or(headers, GEO_REGION, UNKNOWN),
            timezone: header_or(headers, GEO_TIMEZONE, UNKNOWN),
            user_agent: header_or(headers, USER_AGENT.as_str(), UNKNOWN),
            language: language.to_string(),
            referrer: header_or(headers, REFERER.as_str(), DIRECT),
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn header_or(headers: &HeaderMap, name: &str, fallback: &str) -> String {
    header(headers, name).unwrap_or(fallback).to_string()
}

fn first_entry(list: &str) -> Option<&str> {
    list.split(',')
        .next()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}
