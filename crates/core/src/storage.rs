//! Persistent storage for the session.
//!
//! Two tiers back the session:
//! - Durable: `localStorage` on the web; JSON files under the platform config
//!   directory (`~/.config/eventnow/` on Linux) on desktop.
//! - Session: `sessionStorage` on the web; an in-process map on desktop.
//!
//! [`AuthStorage`] is the only type that reads or writes the auth keys. It is
//! injected wherever it is needed rather than reached through globals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use eventnow_shared::{Role, UserProfile};

use crate::config::keys;

/// Raw string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Returns `true` if the write succeeded.
    fn set(&self, key: &str, value: &str) -> bool;

    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Survives browser restarts ("remember me").
    Durable,
    /// Cleared when the browsing session ends.
    Session,
}

impl Persistence {
    pub fn remember(remember_me: bool) -> Self {
        if remember_me {
            Persistence::Durable
        } else {
            Persistence::Session
        }
    }
}

// =========================================
// In-memory implementation
// =========================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =========================================
// Web (WASM) implementation
// =========================================

#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    tier: Persistence,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn new(tier: Persistence) -> Self {
        Self { tier }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self.tier {
            Persistence::Durable => window.local_storage().ok()?,
            Persistence::Session => window.session_storage().ok()?,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// =========================================
// Desktop (native) implementation
// =========================================

#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform config directory, if there is one.
    pub fn config_dir() -> Option<Self> {
        Some(Self::new(dirs::config_dir()?.join("eventnow")))
    }

    fn path(&self, key: &str) -> Option<std::path::PathBuf> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).ok()?;
        }
        let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
        Some(self.dir.join(format!("{safe_key}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)?).ok()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let Some(path) = self.path(key) else {
            return false;
        };
        std::fs::write(path, value).is_ok()
    }

    fn remove(&self, key: &str) {
        if let Some(path) = self.path(key) {
            let _ = std::fs::remove_file(path);
        }
    }
}

// =========================================
// Session accessor
// =========================================

/// Typed access to the token, refresh token and cached user.
///
/// Invariants:
/// - a token lives in at most one tier;
/// - the cached user lives in the same tier as the token and is never
///   returned (or written) without one.
#[derive(Clone)]
pub struct AuthStorage {
    durable: Rc<dyn KeyValueStore>,
    session: Rc<dyn KeyValueStore>,
}

impl AuthStorage {
    pub fn new(durable: Rc<dyn KeyValueStore>, session: Rc<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    /// Storage backed by the platform's native mechanisms.
    #[cfg(target_arch = "wasm32")]
    pub fn platform() -> Self {
        Self::new(
            Rc::new(BrowserStore::new(Persistence::Durable)),
            Rc::new(BrowserStore::new(Persistence::Session)),
        )
    }

    /// Storage backed by the platform's native mechanisms.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn platform() -> Self {
        let durable: Rc<dyn KeyValueStore> = match FileStore::config_dir() {
            Some(store) => Rc::new(store),
            None => {
                crate::log_warn!("No config directory available; sessions will not persist");
                Rc::new(MemoryStore::new())
            }
        };
        Self::new(durable, Rc::new(MemoryStore::new()))
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(MemoryStore::new()))
    }

    fn tier(&self, tier: Persistence) -> &dyn KeyValueStore {
        match tier {
            Persistence::Durable => self.durable.as_ref(),
            Persistence::Session => self.session.as_ref(),
        }
    }

    fn other(tier: Persistence) -> Persistence {
        match tier {
            Persistence::Durable => Persistence::Session,
            Persistence::Session => Persistence::Durable,
        }
    }

    fn read(&self, tier: Persistence, key: &str) -> Option<String> {
        self.tier(tier).get(key).filter(|v| !v.is_empty())
    }

    /// Which tier currently holds the access token. Durable wins.
    pub fn token_tier(&self) -> Option<Persistence> {
        [Persistence::Durable, Persistence::Session]
            .into_iter()
            .find(|tier| self.read(*tier, keys::TOKEN).is_some())
    }

    pub fn token(&self) -> Option<String> {
        let tier = self.token_tier()?;
        self.read(tier, keys::TOKEN)
    }

    /// Persist the access token in `tier`, removing any copy in the other tier
    /// together with the data that belonged to it.
    pub fn set_token(&self, token: &str, tier: Persistence) -> bool {
        if token.is_empty() {
            self.clear_auth_data();
            return true;
        }
        let other = self.tier(Self::other(tier));
        for key in keys::ALL {
            other.remove(key);
        }
        self.tier(tier).set(keys::TOKEN, token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        let tier = self.token_tier()?;
        self.read(tier, keys::REFRESH_TOKEN)
    }

    /// Stored next to the access token. Refused when there is no access token.
    pub fn set_refresh_token(&self, refresh_token: Option<&str>) -> bool {
        let Some(tier) = self.token_tier() else {
            return false;
        };
        match refresh_token {
            Some(token) if !token.is_empty() => self.tier(tier).set(keys::REFRESH_TOKEN, token),
            _ => {
                self.tier(tier).remove(keys::REFRESH_TOKEN);
                true
            }
        }
    }

    pub fn user(&self) -> Option<UserProfile> {
        let tier = self.token_tier()?;
        let raw = self.read(tier, keys::USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                crate::log_warn!("Discarding unreadable cached user: {}", e);
                self.tier(tier).remove(keys::USER);
                None
            }
        }
    }

    /// Cache the user next to the token. Refused when there is no token.
    pub fn set_user(&self, user: &UserProfile) -> bool {
        let Some(tier) = self.token_tier() else {
            crate::log_warn!("Refusing to cache a user without a session token");
            return false;
        };
        match serde_json::to_string(user) {
            Ok(json) => self.tier(tier).set(keys::USER, &json),
            Err(_) => false,
        }
    }

    /// Remove every auth key from both tiers.
    pub fn clear_auth_data(&self) {
        for tier in [Persistence::Durable, Persistence::Session] {
            for key in keys::ALL {
                self.tier(tier).remove(key);
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|role| roles.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "sam@example.com",
            "full_name": "Sam",
            "role": role.as_str()
        }))
        .unwrap()
    }

    #[test]
    fn token_round_trip_and_clear() {
        let storage = AuthStorage::in_memory();
        assert!(storage.set_token("t-1", Persistence::Durable));
        assert_eq!(storage.token().as_deref(), Some("t-1"));
        storage.clear_auth_data();
        assert_eq!(storage.token(), None);
        assert!(!storage.is_authenticated());
    }

    #[test]
    fn token_lives_in_one_tier() {
        let durable = Rc::new(MemoryStore::new());
        let session = Rc::new(MemoryStore::new());
        let storage = AuthStorage::new(durable.clone(), session.clone());

        storage.set_token("durable", Persistence::Durable);
        storage.set_user(&user(Role::Student));
        storage.set_token("scoped", Persistence::Session);

        assert_eq!(durable.get(keys::TOKEN), None);
        assert_eq!(durable.get(keys::USER), None);
        assert_eq!(session.get(keys::TOKEN).as_deref(), Some("scoped"));
        assert_eq!(storage.token_tier(), Some(Persistence::Session));
    }

    #[test]
    fn user_requires_token() {
        let storage = AuthStorage::in_memory();
        assert!(!storage.set_user(&user(Role::Admin)));
        assert_eq!(storage.user(), None);

        storage.set_token("t", Persistence::Session);
        assert!(storage.set_user(&user(Role::Admin)));
        assert!(storage.is_admin());
        assert!(storage.has_any_role(&[Role::Organizer, Role::Admin]));
        assert!(!storage.has_role(Role::Student));
    }

    #[test]
    fn unreadable_user_is_dropped() {
        let durable = Rc::new(MemoryStore::new());
        let storage = AuthStorage::new(durable.clone(), Rc::new(MemoryStore::new()));
        storage.set_token("t", Persistence::Durable);
        durable.set(keys::USER, "{not json");
        assert_eq!(storage.user(), None);
        assert_eq!(durable.get(keys::USER), None);
    }

    #[test]
    fn refresh_token_follows_access_token() {
        let storage = AuthStorage::in_memory();
        assert!(!storage.set_refresh_token(Some("r")));
        storage.set_token("t", Persistence::Durable);
        assert!(storage.set_refresh_token(Some("r")));
        assert_eq!(storage.refresh_token().as_deref(), Some("r"));
        storage.clear_auth_data();
        assert_eq!(storage.refresh_token(), None);
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStore::new(dir.path());
        assert!(first.set("eventnow_token", "abc"));
        let second = FileStore::new(dir.path());
        assert_eq!(second.get("eventnow_token").as_deref(), Some("abc"));
        second.remove("eventnow_token");
        assert_eq!(first.get("eventnow_token"), None);
    }
}
