//! Session store
//!
//! Holds the bearer token and the cached user record. Mutated only through
//! `login`/`logout`; everything else reads.

use crate::types::User;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};

const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";
const USER: &str = "user";

/// Source of the current authentication state
///
/// Tokens are opaque bearer strings.
pub trait SessionStore: Send + Sync {
    /// Current access token, if logged in
    fn access_token(&self) -> Option<String>;

    /// Current refresh token, if logged in
    fn refresh_token(&self) -> Option<String>;

    /// Cached user record
    ///
    /// Returns `None` when absent or when the stored record is malformed.
    fn user(&self) -> Option<User>;

    /// Store a fresh session
    fn login(&self, access_token: &str, refresh_token: &str, user: &User);

    /// Forget the session
    fn logout(&self);
}

/// Cookie-jar backed session store
///
/// Values are kept as raw strings, the user as a JSON document, so a jar
/// restored from the host's cookies behaves exactly like a fresh one.
#[derive(Debug, Default)]
pub struct CookieSessionStore {
    cookies: RwLock<HashMap<String, String>>,
}

impl CookieSessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from raw cookie values
    pub fn from_cookies<I, K, V>(cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let cookies = cookies
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            cookies: RwLock::new(cookies),
        }
    }

    /// Raw cookie value
    pub fn get(&self, name: &str) -> Option<String> {
        self.read().get(name).cloned()
    }

    /// Logged in with a token and a well-formed user record
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some() && self.user().is_some()
    }

    /// Remove a cookie only if it still holds `expected`
    ///
    /// A login landing between the read and the purge keeps its record.
    fn remove_if_unchanged(&self, name: &str, expected: &str) -> bool {
        let mut cookies = self.write();
        if cookies.get(name).map(String::as_str) == Some(expected) {
            cookies.remove(name);
            true
        } else {
            false
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.cookies.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.cookies.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for CookieSessionStore {
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN).filter(|t| !t.is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN).filter(|t| !t.is_empty())
    }

    fn user(&self) -> Option<User> {
        let raw = self.get(USER)?;

        match User::from_json(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Discarding malformed user cookie");
                self.remove_if_unchanged(USER, &raw);
                None
            }
        }
    }

    fn login(&self, access_token: &str, refresh_token: &str, user: &User) {
        let user_json = match user.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode user record");
                return;
            }
        };

        let mut cookies = self.write();
        cookies.insert(ACCESS_TOKEN.to_string(), access_token.to_string());
        cookies.insert(REFRESH_TOKEN.to_string(), refresh_token.to_string());
        cookies.insert(USER.to_string(), user_json);
        debug!(user_id = user.id, username = %user.username, "Session stored");
    }

    fn logout(&self) {
        let mut cookies = self.write();
        cookies.remove(ACCESS_TOKEN);
        cookies.remove(REFRESH_TOKEN);
        cookies.remove(USER);
        debug!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_logout() {
        let store = CookieSessionStore::new();
        assert!(!store.is_authenticated());

        store.login("acc", "ref", &User::new(123, "bob"));
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("acc"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref"));
        assert_eq!(store.user(), Some(User::new(123, "bob")));

        store.logout();
        assert!(store.access_token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn malformed_user_is_purged() {
        let store =
            CookieSessionStore::from_cookies([("access_token", "tok"), ("user", "not-json")]);

        assert!(store.user().is_none());
        assert!(store.get("user").is_none());
        assert_eq!(store.access_token().as_deref(), Some("tok"));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn purge_keeps_record_replaced_by_login() {
        let store = CookieSessionStore::from_cookies([("user", "not-json")]);
        let stale = store.get("user").unwrap();

        store.login("acc", "ref", &User::new(7, "eve"));

        assert!(!store.remove_if_unchanged("user", &stale));
        assert_eq!(store.user(), Some(User::new(7, "eve")));
    }

    #[test]
    fn purge_removes_unchanged_record() {
        let store = CookieSessionStore::from_cookies([("user", "not-json")]);

        assert!(store.remove_if_unchanged("user", "not-json"));
        assert!(store.get("user").is_none());
    }

    #[test]
    fn user_without_id_is_malformed() {
        let store = CookieSessionStore::from_cookies([("user", r#"{"username":"x"}"#)]);
        assert!(store.user().is_none());
    }

    #[test]
    fn restored_cookies_are_read_back() {
        let store = CookieSessionStore::from_cookies([
            ("access_token", "tok"),
            ("user", r#"{"id":1,"username":"amy"}"#),
        ]);

        assert!(store.is_authenticated());
        assert_eq!(store.user().map(|u| u.id), Some(1));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let store = CookieSessionStore::from_cookies([("access_token", "")]);
        assert!(store.access_token().is_none());
    }
}
