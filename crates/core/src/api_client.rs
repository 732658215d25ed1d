//! REST client for the EventNow backend.
//!
//! Every request carries the stored bearer token when there is one. An
//! authenticated request answered with 401 gets one chance at a token refresh;
//! after that (or straight away on 403) the session is cleared and the
//! session-expired hook runs.

use std::cell::RefCell;
use std::rc::Rc;

use eventnow_shared::{ApiError, RefreshRequest, RefreshResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{endpoints, AppConfig};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::storage::AuthStorage;
use crate::{log_debug, log_warn};

/// Called after an expired session has been cleared, typically to navigate to
/// the login page.
pub type SessionExpiredHook = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    base_url: String,
    storage: AuthStorage,
    on_session_expired: Rc<RefCell<Option<SessionExpiredHook>>>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn HttpTransport>, storage: AuthStorage) -> Self {
        Self {
            transport,
            base_url: String::new(),
            storage,
            on_session_expired: Rc::new(RefCell::new(None)),
        }
    }

    /// Client talking to the configured backend over the network.
    pub fn from_config(config: &AppConfig, storage: AuthStorage) -> Self {
        Self::new(Rc::new(ReqwestTransport::new()), storage).with_base_url(&config.api_base_url)
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Install the hook run after a forced logout. Shared by every clone.
    pub fn set_on_session_expired(&self, hook: SessionExpiredHook) {
        *self.on_session_expired.borrow_mut() = Some(hook);
    }

    pub fn storage(&self) -> &AuthStorage {
        &self.storage
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
        token: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let mut req = HttpRequest::new(&self.url(path), method)
            .with_header("Accept", "application/json");
        if let Some(token) = token {
            req = req.with_header("Authorization", &format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body.to_string());
        }
        log_debug!("{} {}", method.as_str(), req.url);
        self.transport.send(req).await
    }

    /// Send a request, applying the refresh and forced-logout rules.
    ///
    /// Returns the final response for any status other than an auth failure
    /// on an authenticated request.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let token = self.storage.token();
        let resp = self.dispatch(method, path, body, token.as_deref()).await?;

        if token.is_none() || !is_auth_failure(resp.status) {
            return Ok(resp);
        }

        if resp.status == 401 && path != endpoints::REFRESH {
            if let Some(fresh) = self.refresh_access_token().await {
                let retry = self.dispatch(method, path, body, Some(&fresh)).await?;
                if !is_auth_failure(retry.status) {
                    return Ok(retry);
                }
                return Err(self.expire_session(retry));
            }
        }

        Err(self.expire_session(resp))
    }

    /// Exchange the stored refresh token for a new access token, keeping the
    /// session in the tier it already lives in.
    async fn refresh_access_token(&self) -> Option<String> {
        let refresh_token = self.storage.refresh_token()?;
        let tier = self.storage.token_tier()?;
        let body = serde_json::to_string(&RefreshRequest {
            refresh_token: refresh_token.clone(),
        })
        .ok()?;

        let resp = match self
            .dispatch(HttpMethod::Post, endpoints::REFRESH, Some(&body), None)
            .await
        {
            Ok(resp) if resp.is_success() => resp,
            Ok(resp) => {
                log_warn!("Token refresh rejected with HTTP {}", resp.status);
                return None;
            }
            Err(e) => {
                log_warn!("Token refresh failed: {}", e);
                return None;
            }
        };

        let refreshed: RefreshResponse = match serde_json::from_str(&resp.body) {
            Ok(refreshed) => refreshed,
            Err(e) => {
                log_warn!("Unreadable token refresh response: {}", e);
                return None;
            }
        };
        if refreshed.access_token.is_empty() {
            return None;
        }

        let user = self.storage.user();
        self.storage.set_token(&refreshed.access_token, tier);
        self.storage
            .set_refresh_token(Some(refreshed.refresh_token.as_deref().unwrap_or(&refresh_token)));
        if let Some(user) = user {
            self.storage.set_user(&user);
        }
        Some(refreshed.access_token)
    }

    fn expire_session(&self, resp: HttpResponse) -> ApiError {
        log_warn!("Session rejected by server (HTTP {}); signing out", resp.status);
        self.storage.clear_auth_data();
        let hook = self.on_session_expired.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
        ApiError::Unauthorized {
            status: resp.status,
            body: resp.body,
        }
    }

    /// Send a request and decode a successful JSON response.
    pub async fn request_json<TRes: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<TRes, ApiError> {
        let resp = self.send(method, path, body.as_deref()).await?;

        if !resp.is_success() {
            return Err(ApiError::Http {
                status: resp.status,
                body: resp.body,
            });
        }

        decode(&resp.body)
    }

    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.request_json(HttpMethod::Get, path, None).await
    }

    /// GET with a query string. Pairs with an empty value are skipped.
    pub async fn get_json_with_query<TRes: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<TRes, ApiError> {
        self.get_json(&with_query(path, query)).await
    }

    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let body = encode(body)?;
        self.request_json(HttpMethod::Post, path, Some(body)).await
    }

    pub async fn put_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let body = encode(body)?;
        self.request_json(HttpMethod::Put, path, Some(body)).await
    }

    pub async fn delete_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.request_json(HttpMethod::Delete, path, None).await
    }

    /// DELETE whose response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request_json::<serde_json::Value>(HttpMethod::Delete, path, None)
            .await
            .map(|_| ())
    }
}

fn is_auth_failure(status: u16) -> bool {
    status == 401 || status == 403
}

fn encode<T: Serialize>(body: &T) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Deserialize(e.to_string()))
}

/// An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::Deserialize(e.to_string()))
}

pub(crate) fn with_query(path: &str, query: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in query {
        if !value.is_empty() {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if !any {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{}", serializer.finish())
}
