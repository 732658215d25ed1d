//! Application configuration.
//!
//! The API base URL is injected at build time through `EVENTNOW_API_URL`
//! (e.g. `EVENTNOW_API_URL=https://api.example.edu/api dx build --release`).

/// Fallback used for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

pub const APP_NAME: &str = "EventNow";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// How long a toast stays on screen unless dismissed.
pub const NOTIFICATION_DURATION_MS: u32 = 5_000;

/// Well-known storage keys. Nothing outside [`crate::storage`] touches them.
pub mod keys {
    pub const TOKEN: &str = "eventnow_token";
    pub const USER: &str = "eventnow_user";
    pub const REFRESH_TOKEN: &str = "eventnow_refresh_token";

    pub const ALL: [&str; 3] = [TOKEN, USER, REFRESH_TOKEN];
}

/// REST paths relative to the API base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
    pub const REFRESH: &str = "/auth/refresh";
    pub const ME: &str = "/auth/me";
    pub const CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    pub const VERIFY_EMAIL_SEND: &str = "/auth/verify-email/send";
    pub const EVENTS: &str = "/events";
    pub const COMMENTS: &str = "/comments";
    pub const REGISTRATIONS: &str = "/registrations";
    pub const MY_REGISTRATIONS: &str = "/registrations/my-registrations";
    pub const RECOMMENDED_EVENTS: &str = "/recommendations/events";
    pub const ADMIN_STATS: &str = "/admin/stats";

    pub fn event(id: i64) -> String {
        format!("{EVENTS}/{id}")
    }

    pub fn event_registrations(id: i64) -> String {
        format!("{EVENTS}/{id}/registrations")
    }

    pub fn event_comments(event_id: i64) -> String {
        format!("{COMMENTS}/event/{event_id}")
    }

    pub fn comment(id: i64) -> String {
        format!("{COMMENTS}/{id}")
    }

    pub fn registration(id: i64) -> String {
        format!("{REGISTRATIONS}/{id}")
    }

    pub fn similar_events(event_id: i64) -> String {
        format!("/recommendations/similar-events/{event_id}")
    }

    pub fn validate_reset_token(token: &str) -> String {
        format!("/auth/reset-password/validate/{}", urlencoding::encode(token))
    }

    pub fn reset_password(token: &str) -> String {
        format!("/auth/reset-password/{}", urlencoding::encode(token))
    }

    pub fn verify_email(token: &str) -> String {
        format!("/auth/verify-email/{}", urlencoding::encode(token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub app_name: String,
    pub page_size: u32,
    pub notification_ms: u32,
}

impl AppConfig {
    /// Build the configuration from values baked in at compile time.
    pub fn from_env() -> Self {
        Self::with_api_url(option_env!("EVENTNOW_API_URL"))
    }

    pub fn with_api_url(api_url: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            app_name: APP_NAME.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            notification_ms: NOTIFICATION_DURATION_MS,
        }
    }

    /// Origin of the API host, used to resolve uploaded file paths.
    pub fn api_origin(&self) -> String {
        match url::Url::parse(&self.api_base_url) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(_) => self.api_base_url.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_local_api() {
        let config = AppConfig::with_api_url(None);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(AppConfig::with_api_url(Some("  ")).api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn trims_trailing_slash_and_exposes_origin() {
        let config = AppConfig::with_api_url(Some("https://events.example.edu/api/"));
        assert_eq!(config.api_base_url, "https://events.example.edu/api");
        assert_eq!(config.api_origin(), "https://events.example.edu");
    }

    #[test]
    fn token_paths_are_escaped() {
        assert_eq!(endpoints::reset_password("a/b"), "/auth/reset-password/a%2Fb");
        assert_eq!(endpoints::event_comments(4), "/comments/event/4");
    }
}
