//! Staff authentication
//!
//! There is a single staff account, which is defined in the [`config`](crate::config) module.
//! Sessions are not persisted: a new [`Session`] is always logged out.

use crate::config::{STAFF_EMAIL, STAFF_PASSWORD};

/// The message to display after a failed login attempt
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password. Please try again.";

/// An e-mail/password pair
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self { email: email.to_string(), password: password.to_string() }
    }

    /// The credentials currently set in the config
    pub fn staff() -> Self {
        let email = match STAFF_EMAIL.lock() {
            Ok(e) => e.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let password = match STAFF_PASSWORD.lock() {
            Ok(p) => p.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Self { email, password }
    }

    pub fn email(&self) -> &str { &self.email }

    /// Whether `email` and `password` match these credentials
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The logged-in staff member
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub email: String,
}

/// The authentication state of the app
#[derive(Debug)]
pub struct Session {
    accepted: Credentials,
    user: Option<User>,
}

impl Session {
    /// A logged-out session, that accepts the staff credentials from the config
    pub fn new() -> Self {
        Self::with_credentials(Credentials::staff())
    }

    /// A logged-out session, that accepts custom credentials
    pub fn with_credentials(accepted: Credentials) -> Self {
        Self { accepted, user: None }
    }

    /// Try to log in. This takes [`LOGIN_DELAY`](crate::config::LOGIN_DELAY).
    ///
    /// Returns whether the login succeeded. On failure, the caller should display [`LOGIN_FAILED_MESSAGE`].
    /// A failed attempt does not log out a user that was already logged in.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        tokio::time::sleep(crate::config::login_delay()).await;

        if self.accepted.matches(email, password) {
            log::info!("{} logged in", email);
            self.user = Some(User { email: email.to_string() });
            true
        } else {
            log::warn!("Failed login attempt for {:?}", email);
            false
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("{} logged out", user.email);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
