//! # Auth State
//!
//! Backs the login and registration screens.
//!
//! ```text
//! set_email / set_password / set_name      (form edits)
//!          │
//!          ▼
//!   register() ──► UserRepository::register_user ──► message
//!   login()    ──► UserRepository::login_user    ──► current user + message
//!   logout()   ──► clears current user and password
//! ```
//!
//! The password field is cleared after every attempt and never appears in
//! a snapshot.

use std::sync::Mutex;

use booknest_core::{NewUser, User};
use booknest_db::UserRepository;
use serde::Serialize;
use tracing::info;

use super::lock;
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct AuthForm {
    email: String,
    password: String,
    name: String,
    current_user: Option<User>,
    message: Option<String>,
}

/// Serializable view of the auth screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub email: String,
    pub name: String,
    pub current_user: Option<User>,
    pub message: Option<String>,
}

/// State holder for the auth screens.
#[derive(Debug)]
pub struct AuthState {
    users: UserRepository,
    form: Mutex<AuthForm>,
}

impl AuthState {
    pub fn new(users: UserRepository) -> Self {
        AuthState {
            users,
            form: Mutex::new(AuthForm::default()),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        lock(&self.form).email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        lock(&self.form).password = password.into();
    }

    pub fn set_name(&self, name: impl Into<String>) {
        lock(&self.form).name = name.into();
    }

    /// Registers an account from the form fields.
    ///
    /// Registration does not log the user in.
    pub async fn register(&self) -> AppResult<User> {
        let new_user = {
            let mut form = lock(&self.form);
            let password = std::mem::take(&mut form.password);
            let user = NewUser::new(form.email.trim(), password);
            match form.name.trim() {
                "" => user,
                name => user.with_name(name),
            }
        };

        let result = self.users.register_user(&new_user).await.map_err(AppError::from);

        let mut form = lock(&self.form);
        match &result {
            Ok(user) => {
                form.message = Some(format!(
                    "Registration successful. Welcome, {}!",
                    user.display_name()
                ));
            }
            Err(err) => form.message = Some(err.message.clone()),
        }
        result
    }

    /// Logs in with the form fields.
    ///
    /// Any mismatch yields [`AppError::invalid_credentials`], whether or not
    /// the email exists.
    pub async fn login(&self) -> AppResult<User> {
        let (email, password) = {
            let mut form = lock(&self.form);
            (form.email.trim().to_string(), std::mem::take(&mut form.password))
        };

        let result = match self.users.login_user(&email, &password).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::invalid_credentials()),
            Err(err) => Err(AppError::from(err)),
        };

        let mut form = lock(&self.form);
        match &result {
            Ok(user) => {
                info!(user_id = user.id, "User logged in");
                form.message = Some(format!("Welcome back, {}!", user.display_name()));
                form.current_user = Some(user.clone());
            }
            Err(err) => form.message = Some(err.message.clone()),
        }
        result
    }

    /// Forgets the logged-in user and clears the form.
    pub fn logout(&self) {
        let mut form = lock(&self.form);
        if let Some(user) = form.current_user.take() {
            info!(user_id = user.id, "User logged out");
        }
        *form = AuthForm::default();
    }

    pub fn current_user(&self) -> Option<User> {
        lock(&self.form).current_user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        lock(&self.form).current_user.is_some()
    }

    /// Last message shown to the user.
    pub fn message(&self) -> Option<String> {
        lock(&self.form).message.clone()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        let form = lock(&self.form);
        AuthSnapshot {
            email: form.email.clone(),
            name: form.name.clone(),
            current_user: form.current_user.clone(),
            message: form.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, LOGIN_FAILED_MESSAGE};

    fn auth() -> AuthState {
        AuthState::new(UserRepository::in_memory())
    }

    async fn register(state: &AuthState, email: &str, password: &str) -> AppResult<User> {
        state.set_email(email);
        state.set_password(password);
        state.register().await
    }

    async fn login(state: &AuthState, email: &str, password: &str) -> AppResult<User> {
        state.set_email(email);
        state.set_password(password);
        state.login().await
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = auth();
        state.set_name("Ann");
        let user = register(&state, "ann@x.com", "pw1").await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Ann"));
        assert!(!state.is_logged_in());

        let logged_in = login(&state, "ann@x.com", "pw1").await.unwrap();
        assert_eq!(logged_in.email, "ann@x.com");
        assert_eq!(state.current_user(), Some(logged_in));
        assert_eq!(state.message().as_deref(), Some("Welcome back, Ann!"));
    }

    #[tokio::test]
    async fn test_failed_logins_share_one_message() {
        let state = auth();
        register(&state, "ann@x.com", "pw1").await.unwrap();

        let wrong_password = login(&state, "ann@x.com", "nope").await.unwrap_err();
        let unknown_email = login(&state, "bob@x.com", "pw1").await.unwrap_err();

        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password.code, ErrorCode::InvalidCredentials);
        assert_eq!(state.message().as_deref(), Some(LOGIN_FAILED_MESSAGE));
        assert!(!state.is_logged_in());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let state = auth();
        register(&state, "ann@x.com", "pw1").await.unwrap();

        let err = register(&state, "ann@x.com", "pw2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailTaken);
        assert!(state.message().unwrap().contains("another email"));

        assert!(login(&state, "ann@x.com", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_registration() {
        let state = auth();
        let err = register(&state, "not-an-email", "pw1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_password_is_cleared_and_never_exposed() {
        let state = auth();
        register(&state, "ann@x.com", "pw1").await.unwrap();
        login(&state, "ann@x.com", "pw1").await.unwrap();

        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(!json.contains("pw1"));
        assert!(!json.contains("passwordHash"));

        // The form password was consumed by the last attempt.
        assert!(state.login().await.is_err());
    }

    #[tokio::test]
    async fn test_logout() {
        let state = auth();
        register(&state, "ann@x.com", "pw1").await.unwrap();
        login(&state, "ann@x.com", "pw1").await.unwrap();

        state.logout();
        assert!(state.current_user().is_none());
        assert_eq!(state.snapshot().email, "");
    }
}
