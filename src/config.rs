//! Support for library configuration options

use std::sync::{Arc, Mutex};
use std::time::Duration;
use once_cell::sync::Lazy;

/// The key under which the whole appointment list is stored in a [`KeyValueStorage`](crate::traits::KeyValueStorage).
/// Feel free to override it when initing this library.
pub static STORAGE_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("clinic-appointments".to_string())));

/// The only e-mail address that is allowed to log in.
/// Feel free to override it when initing this library.
pub static STAFF_EMAIL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("staff@clinic.com".to_string())));

/// The password that goes along with [`STAFF_EMAIL`]
pub static STAFF_PASSWORD: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("123456".to_string())));

/// How long a login attempt takes. This mimics the round-trip to an authentication server.
pub static LOGIN_DELAY: Lazy<Arc<Mutex<Duration>>> = Lazy::new(|| Arc::new(Mutex::new(Duration::from_millis(500))));


/// Returns the current storage key
pub fn storage_key() -> String {
    match STORAGE_KEY.lock() {
        Ok(key) => key.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Returns the current login delay
pub fn login_delay() -> Duration {
    match LOGIN_DELAY.lock() {
        Ok(delay) => *delay,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
