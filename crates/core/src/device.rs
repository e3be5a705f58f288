//! User-agent classification.
//!
//! A deliberately small, substring-driven parser: it answers "what kind of
//! device sent this" for analytics, not for feature detection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const UNKNOWN: &str = "Unknown";

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Mobile|Android|iPhone|iPad|iPod|BlackBerry|Windows Phone").expect("mobile regex")
});
static TABLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"iPad|Tablet|PlayBook").expect("tablet regex"));

static CHROME_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Chrome/([0-9.]+)").expect("chrome regex"));
static FIREFOX_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Firefox/([0-9.]+)").expect("firefox regex"));
static SAFARI_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Version/([0-9.]+)").expect("safari regex"));
static EDGE_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Edge/([0-9.]+)").expect("edge regex"));

static WINDOWS_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Windows NT ([0-9.]+)").expect("windows regex"));
static MACOS_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Mac OS X ([0-9_]+)").expect("macos regex"));
static ANDROID_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Android ([0-9.]+)").expect("android regex"));
static IOS_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"OS ([0-9_]+)").expect("ios regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub os_version: String,
    pub device: String,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
}

pub fn parse_user_agent(user_agent: &str) -> DeviceInfo {
    let is_mobile = MOBILE_RE.is_match(user_agent);
    let is_tablet = TABLET_RE.is_match(user_agent);
    let (browser, browser_version) = detect_browser(user_agent);
    let (os, os_version) = detect_os(user_agent);

    DeviceInfo {
        browser: browser.to_string(),
        browser_version,
        os: os.to_string(),
        os_version,
        device: device_class(user_agent, is_mobile, is_tablet).to_string(),
        is_mobile,
        is_tablet,
        is_desktop: !is_mobile && !is_tablet,
    }
}

fn detect_browser(ua: &str) -> (&'static str, String) {
    if ua.contains("Chrome/") {
        ("Chrome", capture(&CHROME_VERSION_RE, ua))
    } else if ua.contains("Firefox/") {
        ("Firefox", capture(&FIREFOX_VERSION_RE, ua))
    } else if ua.contains("Safari/") && !ua.contains("Chrome") {
        ("Safari", capture(&SAFARI_VERSION_RE, ua))
    } else if ua.contains("Edge/") {
        ("Edge", capture(&EDGE_VERSION_RE, ua))
    } else {
        (UNKNOWN, String::new())
    }
}

fn detect_os(ua: &str) -> (&'static str, String) {
    if ua.contains("Windows NT") {
        ("Windows", windows_version(&capture(&WINDOWS_VERSION_RE, ua)))
    } else if ua.contains("Mac OS X") {
        ("macOS", capture(&MACOS_VERSION_RE, ua).replace('_', "."))
    } else if ua.contains("Linux") {
        ("Linux", String::new())
    } else if ua.contains("Android") {
        ("Android", capture(&ANDROID_VERSION_RE, ua))
    } else if ua.contains("iPhone OS") || ua.contains("OS ") {
        ("iOS", capture(&IOS_VERSION_RE, ua).replace('_', "."))
    } else {
        (UNKNOWN, String::new())
    }
}

fn device_class(ua: &str, is_mobile: bool, is_tablet: bool) -> &'static str {
    let android = ua.contains("Android");
    if ua.contains("iPhone") {
        "iPhone"
    } else if ua.contains("iPad") {
        "iPad"
    } else if android && is_mobile {
        "Android Phone"
    } else if android && is_tablet {
        "Android Tablet"
    } else if is_mobile {
        "Mobile Device"
    } else if is_tablet {
        "Tablet"
    } else {
        "Desktop"
    }
}

/// Maps an NT kernel version to its marketing name.
pub fn windows_version(nt_version: &str) -> String {
    match nt_version {
        "10.0" => "Windows 10/11".to_string(),
        "6.3" => "Windows 8.1".to_string(),
        "6.2" => "Windows 8".to_string(),
        "6.1" => "Windows 7".to_string(),
        "6.0" => "Windows Vista".to_string(),
        other => format!("Windows {}", other),
    }
}

fn capture(re: &Regex, ua: &str) -> String {
    re.captures(ua)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
