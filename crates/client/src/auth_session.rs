//! Authentication context: the signed-in user, shared with the whole tree.

use std::rc::Rc;

use dioxus::prelude::*;
use eventnow_core::{
    ApiClient, AppConfig, AuthFailure, AuthStorage, SessionManager, SessionState,
};
use eventnow_shared::{ChangePasswordRequest, RegisterRequest, Role, UpdateProfileRequest, UserProfile};

use crate::hooks::SignalCell;
use crate::routes::Route;

/// Authentication context provided to the app
#[derive(Clone)]
pub struct AuthContext {
    pub state: Signal<SessionState>,
    manager: SessionManager<SignalCell<SessionState>>,
}

/// Provider component that sets up the API client and auth context.
///
/// The session is rehydrated from storage synchronously so the first render
/// already knows about a remembered user; the backend confirms it afterwards.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let config = use_context_provider(AppConfig::from_env);
    let api = use_context_provider(|| ApiClient::from_config(&config, AuthStorage::platform()));

    let state = use_signal(|| {
        let storage = api.storage();
        let token = storage.token();
        SessionState {
            user: storage.user(),
            loading: token.is_some(),
            token,
            error: None,
        }
    });

    let manager = use_hook(|| SessionManager::new(api.clone(), SignalCell(state)));

    let restore = manager.clone();
    use_future(move || {
        let restore = restore.clone();
        async move { restore.restore().await }
    });

    use_context_provider(|| AuthContext { state, manager });

    children
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

impl AuthContext {
    /// Route forced and deliberate logouts to the login page. Called once from
    /// inside the router, where a navigator exists.
    pub fn install_navigation(&self, nav: Navigator) {
        let expired = self.manager.clone();
        self.manager.api().set_on_session_expired(Rc::new(move || {
            expired.session_expired();
            nav.replace(Route::Login {});
        }));
        self.manager.set_on_signed_out(Rc::new(move || {
            nav.replace(Route::Login {});
        }));
    }

    pub fn api(&self) -> ApiClient {
        self.manager.api().clone()
    }

    /// Subscribes the calling component.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin()
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.state
            .read()
            .user
            .as_ref()
            .is_some_and(|u| roles.contains(&u.role))
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<UserProfile, AuthFailure> {
        self.manager.login(email, password, remember_me).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthFailure> {
        self.manager.register(request).await
    }

    /// Logout and clear session
    pub fn logout(&self) {
        self.manager.logout();
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, AuthFailure> {
        self.manager.update_profile(request).await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), AuthFailure> {
        self.manager.change_password(request).await
    }

    pub async fn refresh_user(&self) -> Result<UserProfile, AuthFailure> {
        self.manager.refresh_user().await
    }

    pub fn clear_error(&self) {
        self.manager.clear_error();
    }
}
