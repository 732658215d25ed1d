//! Stateless input validators.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern compiles"));

static CONTACT_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-\s()]{10,20}$").expect("contact phone pattern compiles"));

/// Characters accepted as the "special" class of a strong password.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*?";

pub const PASSWORD_MIN_LEN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// At least 8 characters with one lowercase, one uppercase, one digit and one
/// character from [`PASSWORD_SPECIALS`].
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// 10-15 digits, optionally prefixed with `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Looser format used on contact forms: digits, spaces, `+`, `-` and parentheses.
pub fn is_valid_contact_phone(phone: &str) -> bool {
    CONTACT_PHONE_RE.is_match(phone)
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn has_min_len(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn has_max_len(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Parse the date formats the UI produces (`datetime-local`, `date`) and the
/// ISO forms the backend returns.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn is_valid_date(value: &str) -> bool {
    parse_datetime(value).is_some()
}

pub fn is_future_date(value: &str, now: NaiveDateTime) -> bool {
    parse_datetime(value).is_some_and(|date| date > now)
}

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_number(value: &str) -> bool {
    parse_number(value).is_some()
}

pub fn has_min_value(value: &str, min: f64) -> bool {
    parse_number(value).is_some_and(|n| n >= min)
}

pub fn has_max_value(value: &str, max: f64) -> bool {
    parse_number(value).is_some_and(|n| n <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("student@campus.edu"));
        assert!(is_valid_email("Upper@Example.ORG"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("user@localhost"));
    }

    #[test]
    fn password_strength_requires_every_class() {
        assert!(is_strong_password("Passw0rd!"));
        assert!(!is_strong_password("Pa0!"));
        assert!(!is_strong_password("password0!"));
        assert!(!is_strong_password("PASSWORD0!"));
        assert!(!is_strong_password("Password!!"));
        assert!(!is_strong_password("Password00"));
    }

    #[test]
    fn phone_formats() {
        assert!(is_valid_phone("+6281234567890"));
        assert!(!is_valid_phone("12345"));
        assert!(is_valid_contact_phone("(021) 555-0199"));
        assert!(!is_valid_contact_phone("call me maybe"));
    }

    #[test]
    fn dates_from_inputs_and_backend() {
        let local = parse_datetime("2025-06-01T09:30").unwrap();
        assert_eq!(local.to_string(), "2025-06-01 09:30:00");
        assert!(parse_datetime("2025-06-01T09:30:00.123").is_some());
        assert!(parse_datetime("2025-06-01T09:30:00Z").is_some());
        assert_eq!(
            parse_datetime("2025-06-01").unwrap().to_string(),
            "2025-06-01 00:00:00"
        );
        assert!(!is_valid_date("yesterday"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn future_dates_compare_against_now() {
        let now = parse_datetime("2025-06-01T00:00").unwrap();
        assert!(is_future_date("2025-06-02", now));
        assert!(!is_future_date("2025-05-31", now));
        assert!(!is_future_date("garbage", now));
    }

    #[test]
    fn numbers_and_bounds() {
        assert!(is_number(" 42 "));
        assert!(!is_number("4x2"));
        assert!(!is_number("NaN"));
        assert!(has_min_value("1", 1.0));
        assert!(!has_min_value("0", 1.0));
        assert!(has_max_value("5", 5.0));
        assert!(!has_max_value("six", 5.0));
    }
}
