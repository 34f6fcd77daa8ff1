//! Mock authentication and the session context.
//!
//! There is no backend: "API calls" are a fixed artificial delay plus
//! in-memory branching, with the demo credential pair always accepted. The
//! session is an explicit object wrapping the key-value store -- loaded on
//! startup, cleared on logout -- never ambient global state.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::storage::KvStore;

const USER_KEY: &str = "user";
const REGISTERED_USERS_KEY: &str = "registered_users";

/// Built-in demo account. Its identity is fixed, so repeated demo logins
/// always restore the same user.
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";
const DEMO_USER_ID: &str = "1";

/// Artificial latency applied to every simulated call.
const SIMULATED_LATENCY: Duration = Duration::from_millis(300);

/// The current user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// Signup form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile edit; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// A registered account in the mock user list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegisteredUser {
    #[serde(flatten)]
    profile: UserProfile,
    password: String,
}

/// Explicit session context: the logged-in user plus its persistence.
pub struct AuthSession {
    store: KvStore,
    user: Option<UserProfile>,
}

impl AuthSession {
    /// Restore the session from the `user` key (load-on-start).
    pub fn load(store: KvStore) -> Result<Self> {
        let user = store.get(USER_KEY)?;
        Ok(Self { store, user })
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Simulated login. The demo pair is always accepted; otherwise the
    /// credentials are checked against the registered user list.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserProfile> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        let profile = if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            UserProfile {
                id: DEMO_USER_ID.to_string(),
                name: "Alex Chen".to_string(),
                email: email.to_string(),
                avatar: None,
            }
        } else {
            self.registered_users()?
                .into_iter()
                .find(|u| u.profile.email == email && u.password == password)
                .map(|u| u.profile)
                .ok_or(AuthError::InvalidCredentials)?
        };

        self.store.set(USER_KEY, &profile)?;
        Ok(self.user.insert(profile))
    }

    /// Simulated signup. Fails on an email collision; does not log in.
    pub async fn signup(&mut self, data: SignupData) -> Result<UserProfile> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        let mut users = self.registered_users()?;
        if users.iter().any(|u| u.profile.email == data.email) {
            return Err(AuthError::EmailExists(data.email).into());
        }

        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            email: data.email,
            avatar: None,
        };
        users.push(RegisteredUser {
            profile: profile.clone(),
            password: data.password,
        });
        self.store.set(REGISTERED_USERS_KEY, &users)?;
        Ok(profile)
    }

    /// Clear the session (clear-on-logout).
    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    /// Merge a partial edit into the current profile and persist it.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<&UserProfile> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        let user = self.user.as_mut().ok_or(AuthError::NotLoggedIn)?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }
        self.store.set(USER_KEY, &*user)?;
        Ok(&*user)
    }

    fn registered_users(&self) -> Result<Vec<RegisteredUser>> {
        Ok(self
            .store
            .get(REGISTERED_USERS_KEY)?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn session() -> (tempfile::TempDir, AuthSession) {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::with_path(dir.path().join("store.json"));
        let session = AuthSession::load(store).unwrap();
        (dir, session)
    }

    #[tokio::test(start_paused = true)]
    async fn demo_login_succeeds_and_persists() {
        let (dir, mut session) = session();
        let profile = session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert_eq!(profile.name, "Alex Chen");
        assert!(session.is_logged_in());

        // A fresh session restores the same user from disk.
        let store = KvStore::with_path(dir.path().join("store.json"));
        let restored = AuthSession::load(store).unwrap();
        assert_eq!(
            restored.current_user().map(|u| u.email.as_str()),
            Some(DEMO_EMAIL)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn demo_identity_is_stable_across_logins() {
        let (_dir, mut session) = session();
        let first = session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap().id.clone();
        session.logout().unwrap();
        let second = session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap().id.clone();
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_credentials_are_rejected() {
        let (_dir, mut session) = session();
        let err = session.login(DEMO_EMAIL, "wrong").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Auth(AuthError::InvalidCredentials)
        ));
        assert!(!session.is_logged_in());
    }

    #[tokio::test(start_paused = true)]
    async fn signup_then_login() {
        let (_dir, mut session) = session();
        let created = session
            .signup(SignupData {
                name: "Sam Park".to_string(),
                email: "sam@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Sam Park");
        // Signup alone does not log in.
        assert!(!session.is_logged_in());

        let profile = session.login("sam@example.com", "hunter2").await.unwrap();
        assert_eq!(profile.id, created.id);
    }

    #[tokio::test(start_paused = true)]
    async fn signup_rejects_duplicate_email() {
        let (_dir, mut session) = session();
        let data = SignupData {
            name: "Sam Park".to_string(),
            email: "sam@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        session.signup(data.clone()).await.unwrap();

        let err = session.signup(data).await.unwrap_err();
        assert!(matches!(err, CoreError::Auth(AuthError::EmailExists(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn logout_clears_the_persisted_user() {
        let (dir, mut session) = session();
        session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        session.logout().unwrap();
        assert!(!session.is_logged_in());

        let store = KvStore::with_path(dir.path().join("store.json"));
        let restored = AuthSession::load(store).unwrap();
        assert!(restored.current_user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn update_profile_merges_partial_fields() {
        let (_dir, mut session) = session();
        session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        let updated = session
            .update_profile(ProfileUpdate {
                name: Some("Alexandra Chen".to_string()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Alexandra Chen");
        assert_eq!(updated.email, DEMO_EMAIL);
    }

    #[tokio::test(start_paused = true)]
    async fn update_profile_requires_login() {
        let (_dir, mut session) = session();
        let err = session
            .update_profile(ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Auth(AuthError::NotLoggedIn)));
    }
}
