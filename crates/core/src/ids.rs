use chrono::{DateTime, Utc};
use nanoid::nanoid;

pub const SESSION_PREFIX: &str = "sess_";
pub const REQUEST_PREFIX: &str = "req_";

const BASE36: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const SUFFIX_LEN: usize = 6;

pub fn generate_session_id(now: DateTime<Utc>) -> String {
    generate_id(SESSION_PREFIX, now)
}

pub fn generate_request_id(now: DateTime<Utc>) -> String {
    generate_id(REQUEST_PREFIX, now)
}

/// `{prefix}{base36 unix millis}_{random base36}`. Not guaranteed unique.
fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!(
        "{}{}_{}",
        prefix,
        to_base36(millis),
        nanoid!(SUFFIX_LEN, &BASE36)
    )
}

pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_session_id_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = generate_session_id(now);
        assert!(id.starts_with("sess_loyw3v28_"), "{}", id);

        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_request_id_shape() {
        let id = generate_request_id(Utc::now());
        assert!(id.starts_with("req_"));
        assert_eq!(id.split('_').count(), 3);
    }

    #[test]
    fn test_ids_differ_within_same_millisecond() {
        let now = Utc::now();
        let a = generate_session_id(now);
        let b = generate_session_id(now);
        assert_ne!(a, b, "random suffix should differ");
    }
}
