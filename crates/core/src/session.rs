//! Who is signed in.
//!
//! [`SessionManager`] owns the in-memory [`SessionState`] and keeps it in step
//! with [`AuthStorage`]. Every operation reports failure as an [`AuthFailure`]
//! carrying the message to show; nothing here panics.

use std::cell::RefCell;
use std::rc::Rc;

use eventnow_shared::{
    ApiError, ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
    UpdateProfileRequest, UserProfile,
};
use thiserror::Error;

use crate::api_client::ApiClient;
use crate::cell::StateCell;
use crate::config::endpoints;
use crate::storage::Persistence;
use crate::{log_info, log_warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
    pub status: Option<u16>,
}

impl AuthFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl From<ApiError> for AuthFailure {
    fn from(err: ApiError) -> Self {
        Self {
            message: err.user_message(),
            status: err.status(),
        }
    }
}

/// Runs after a deliberate logout, typically to navigate to the login page.
pub type SignedOutHook = Rc<dyn Fn()>;

pub struct SessionManager<C> {
    api: ApiClient,
    state: C,
    on_signed_out: Rc<RefCell<Option<SignedOutHook>>>,
}

impl<C: Clone> Clone for SessionManager<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            on_signed_out: self.on_signed_out.clone(),
        }
    }
}

impl<C: StateCell<SessionState>> SessionManager<C> {
    pub fn new(api: ApiClient, state: C) -> Self {
        Self {
            api,
            state,
            on_signed_out: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_on_signed_out(&self, hook: SignedOutHook) {
        *self.on_signed_out.borrow_mut() = Some(hook);
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    fn begin(&self) {
        self.state.with_mut(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, failure: AuthFailure) -> AuthFailure {
        self.state.with_mut(|s| {
            s.loading = false;
            s.error = Some(failure.message.clone());
        });
        failure
    }

    fn signed_in(&self, user: UserProfile) {
        let token = self.api.storage().token();
        self.state.set(SessionState {
            user: Some(user),
            token,
            loading: false,
            error: None,
        });
    }

    /// Rehydrate from storage, then confirm the session with the backend.
    /// A rejected or unreachable session is logged out.
    pub async fn restore(&self) {
        let storage = self.api.storage();
        let Some(token) = storage.token() else {
            self.state.set(SessionState::default());
            return;
        };
        self.state.set(SessionState {
            user: storage.user(),
            token: Some(token),
            loading: true,
            error: None,
        });

        match self.api.get_json::<UserProfile>(endpoints::ME).await {
            Ok(user) => {
                storage.set_user(&user);
                self.signed_in(user);
            }
            Err(e @ ApiError::Unauthorized { .. }) => {
                // Storage is already cleared and the expiry hook has navigated.
                log_warn!("Stored session rejected: {}", e);
                self.session_expired();
            }
            Err(e) => {
                log_warn!("Could not restore session: {}", e);
                self.logout();
            }
        }
    }

    /// Sign in and persist the token (durable iff `remember_me`), then load
    /// the full profile. The profile embedded in the login response is the
    /// fallback when `/auth/me` fails.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<UserProfile, AuthFailure> {
        self.begin();
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            remember_me,
        };
        let response: LoginResponse = match self.api.post_json(endpoints::LOGIN, &request).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e.into())),
        };
        if response.access_token.is_empty() {
            return Err(self.fail(AuthFailure::new("Login failed: no access token received")));
        }

        let storage = self.api.storage();
        storage.set_token(&response.access_token, Persistence::remember(remember_me));
        storage.set_refresh_token(response.refresh_token.as_deref());

        let user = match self.api.get_json::<UserProfile>(endpoints::ME).await {
            Ok(user) => user,
            Err(e) => {
                let token_kept =
                    !matches!(e, ApiError::Unauthorized { .. }) && storage.token().is_some();
                match response.user {
                    Some(user) if token_kept => {
                        log_warn!("Profile fetch failed after login, using login response: {}", e);
                        user
                    }
                    _ => {
                        storage.clear_auth_data();
                        return Err(self.fail(e.into()));
                    }
                }
            }
        };

        storage.set_user(&user);
        log_info!("Signed in as {}", user.email);
        self.signed_in(user.clone());
        Ok(user)
    }

    /// Create an account. Does not sign in; the caller sends the user to the
    /// login page.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthFailure> {
        self.begin();
        match self
            .api
            .post_json::<_, serde_json::Value>(endpoints::REGISTER, request)
            .await
        {
            Ok(_) => {
                self.state.with_mut(|s| s.loading = false);
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Forget the session everywhere. Safe to call when already signed out.
    pub fn logout(&self) {
        self.api.storage().clear_auth_data();
        self.state.set(SessionState::default());
        let hook = self.on_signed_out.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// The API client already cleared storage; drop the in-memory copy.
    pub fn session_expired(&self) {
        self.state.set(SessionState {
            error: Some("Your session has expired. Please log in again.".to_string()),
            ..SessionState::default()
        });
    }

    /// Re-read the profile from the backend.
    pub async fn refresh_user(&self) -> Result<UserProfile, AuthFailure> {
        let user: UserProfile = self.api.get_json(endpoints::ME).await?;
        self.api.storage().set_user(&user);
        self.state.with_mut(|s| s.user = Some(user.clone()));
        Ok(user)
    }

    /// Save profile edits; the stored snapshot becomes whatever the backend
    /// echoes back.
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, AuthFailure> {
        self.begin();
        let user: UserProfile = match self.api.put_json(endpoints::ME, request).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(e.into())),
        };
        self.api.storage().set_user(&user);
        self.state.with_mut(|s| {
            s.user = Some(user.clone());
            s.loading = false;
        });
        Ok(user)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), AuthFailure> {
        self.begin();
        if let Err(e) = self
            .api
            .post_json::<_, serde_json::Value>(endpoints::CHANGE_PASSWORD, request)
            .await
        {
            return Err(self.fail(e.into()));
        }
        if let Err(e) = self.refresh_user().await {
            log_warn!("Password changed but profile refresh failed: {}", e);
        }
        self.state.with_mut(|s| s.loading = false);
        Ok(())
    }

    pub fn clear_error(&self) {
        self.state.with_mut(|s| s.error = None);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use eventnow_shared::Role;
    use serde_json::json;

    use super::*;
    use crate::cell::local;
    use crate::config::keys;
    use crate::storage::{AuthStorage, KeyValueStore, MemoryStore};
    use crate::testing::MockTransport;

    struct Harness {
        mock: Rc<MockTransport>,
        durable: Rc<MemoryStore>,
        session: Rc<MemoryStore>,
        manager: SessionManager<Rc<RefCell<SessionState>>>,
    }

    fn harness() -> Harness {
        let mock = MockTransport::new();
        let durable = Rc::new(MemoryStore::new());
        let session = Rc::new(MemoryStore::new());
        let storage = AuthStorage::new(durable.clone(), session.clone());
        let api = ApiClient::new(mock.clone(), storage);
        let manager = SessionManager::new(api, local(SessionState::default()));
        Harness {
            mock,
            durable,
            session,
            manager,
        }
    }

    #[tokio::test]
    async fn remember_me_login_persists_durably() {
        let h = harness();
        h.mock.push_json(
            200,
            json!({"access_token": "abc", "user": {"id": 1, "role": "student"}}),
        );
        h.mock.push_json(200, json!({"id": 1, "role": "student", "email": "s@campus.edu"}));

        let user = h.manager.login("s@campus.edu", "Passw0rd!", true).await.unwrap();

        assert_eq!(user.role, Role::Student);
        assert_eq!(h.durable.get(keys::TOKEN).as_deref(), Some("abc"));
        assert_eq!(h.session.get(keys::TOKEN), None);
        let state = h.manager.state().get();
        assert_eq!(state.user.map(|u| u.role), Some(Role::Student));
        assert_eq!(state.token.as_deref(), Some("abc"));
        assert!(!state.loading);

        let requests = h.mock.requests();
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"email":"s@campus.edu","password":"Passw0rd!","remember_me":true}"#)
        );
        assert_eq!(requests[1].header("Authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn login_without_remember_me_uses_session_tier() {
        let h = harness();
        h.mock.push_json(200, json!({"access_token": "abc"}));
        h.mock.push_json(200, json!({"id": 1}));

        h.manager.login("a@b.co", "x", false).await.unwrap();

        assert_eq!(h.durable.get(keys::TOKEN), None);
        assert_eq!(h.session.get(keys::TOKEN).as_deref(), Some("abc"));
        assert!(h.session.get(keys::USER).is_some());
    }

    #[tokio::test]
    async fn rejected_credentials_report_detail_and_store_nothing() {
        let h = harness();
        let expired = Rc::new(Cell::new(false));
        let flag = expired.clone();
        h.manager
            .api()
            .set_on_session_expired(Rc::new(move || flag.set(true)));
        h.mock.push(401, r#"{"detail":"Invalid credentials"}"#);

        let failure = h.manager.login("a@b.co", "wrong", true).await.unwrap_err();

        assert_eq!(failure.message, "Invalid credentials");
        assert_eq!(failure.status, Some(401));
        assert_eq!(h.durable.get(keys::TOKEN), None);
        assert_eq!(h.session.get(keys::TOKEN), None);
        assert!(!expired.get());
        let state = h.manager.state().get();
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn profile_fetch_failure_falls_back_to_login_user() {
        let h = harness();
        h.mock.push_json(
            200,
            json!({"access_token": "abc", "user": {"id": 2, "role": "admin"}}),
        );
        h.mock.push(500, "");

        let user = h.manager.login("a@b.co", "x", true).await.unwrap();
        assert!(user.is_admin());
        assert!(h.manager.state().get().is_admin());
    }

    #[tokio::test]
    async fn rejected_profile_fetch_ignores_login_user() {
        let h = harness();
        h.mock.push_json(
            200,
            json!({"access_token": "abc", "user": {"id": 1, "role": "student"}}),
        );
        h.mock.push(401, r#"{"detail":"Token expired"}"#);

        let failure = h.manager.login("a@b.co", "x", true).await.unwrap_err();

        assert_eq!(failure.status, Some(401));
        assert_eq!(h.manager.api().storage().token(), None);
        let state = h.manager.state().get();
        assert_eq!(state.user, None);
        assert_eq!(state.token, None);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn profile_fetch_failure_without_fallback_clears_token() {
        let h = harness();
        h.mock.push_json(200, json!({"access_token": "abc"}));
        h.mock.push(500, "");

        assert!(h.manager.login("a@b.co", "x", true).await.is_err());
        assert_eq!(h.manager.api().storage().token(), None);
    }

    #[tokio::test]
    async fn register_does_not_sign_in() {
        let h = harness();
        h.mock.push_json(200, json!({"access_token": "new"}));
        let request = RegisterRequest {
            email: "n@b.co".to_string(),
            full_name: "New".to_string(),
            password: "Passw0rd!".to_string(),
        };

        h.manager.register(&request).await.unwrap();
        assert!(!h.manager.api().storage().is_authenticated());
        assert!(!h.manager.state().get().is_authenticated());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let h = harness();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        h.manager
            .set_on_signed_out(Rc::new(move || seen.set(seen.get() + 1)));
        h.manager.api().storage().set_token("t", Persistence::Durable);

        h.manager.logout();
        h.manager.logout();

        assert_eq!(calls.get(), 2);
        assert_eq!(h.manager.api().storage().token(), None);
        assert_eq!(h.manager.state().get(), SessionState::default());
    }

    #[tokio::test]
    async fn restore_confirms_cached_session() {
        let h = harness();
        let storage = h.manager.api().storage();
        storage.set_token("t", Persistence::Durable);
        h.mock.push_json(200, json!({"id": 5, "full_name": "Fresh"}));

        h.manager.restore().await;

        let state = h.manager.state().get();
        assert_eq!(state.user.map(|u| u.full_name), Some("Fresh".to_string()));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn restore_with_rejected_token_signs_out() {
        let h = harness();
        h.manager.api().storage().set_token("stale", Persistence::Session);
        h.mock.push(401, "");

        h.manager.restore().await;

        assert!(!h.manager.state().get().is_authenticated());
        assert!(!h.manager.api().storage().is_authenticated());
    }

    #[tokio::test]
    async fn restore_with_expired_token_keeps_expiry_message() {
        let h = harness();
        let redirects = Rc::new(Cell::new(0));
        let expired = redirects.clone();
        h.manager
            .api()
            .set_on_session_expired(Rc::new(move || expired.set(expired.get() + 1)));
        let signed_out = redirects.clone();
        h.manager
            .set_on_signed_out(Rc::new(move || signed_out.set(signed_out.get() + 1)));
        h.manager.api().storage().set_token("stale", Persistence::Durable);
        h.mock.push(401, "");

        h.manager.restore().await;

        assert_eq!(redirects.get(), 1);
        let state = h.manager.state().get();
        assert_eq!(state.token, None);
        assert!(!state.loading);
        assert!(state.error.is_some_and(|e| e.contains("expired")));
    }

    #[tokio::test]
    async fn restore_without_token_skips_network() {
        let h = harness();
        h.manager.restore().await;
        assert!(h.mock.requests().is_empty());
    }

    #[tokio::test]
    async fn update_profile_echoes_backend_user() {
        let h = harness();
        h.manager.api().storage().set_token("t", Persistence::Durable);
        h.mock.push_json(200, json!({"id": 1, "full_name": "Server Name"}));

        let request = UpdateProfileRequest {
            email: "a@b.co".to_string(),
            full_name: "Typed Name".to_string(),
            bio: None,
            profile_picture: None,
        };
        let user = h.manager.update_profile(&request).await.unwrap();

        assert_eq!(user.full_name, "Server Name");
        assert_eq!(
            h.manager.api().storage().user().map(|u| u.full_name),
            Some("Server Name".to_string())
        );
    }

    #[tokio::test]
    async fn change_password_refetches_profile() {
        let h = harness();
        h.manager.api().storage().set_token("t", Persistence::Durable);
        h.mock.push(204, "");
        h.mock.push_json(200, json!({"id": 1, "full_name": "After"}));

        let request = ChangePasswordRequest {
            current_password: "Old0ld!!".to_string(),
            new_password: "Passw0rd!".to_string(),
        };
        h.manager.change_password(&request).await.unwrap();

        assert_eq!(h.mock.requests()[1].url, "/auth/me");
        assert_eq!(
            h.manager.state().get().user.map(|u| u.full_name),
            Some("After".to_string())
        );
    }
}
