use std::time::Duration;

use clinic_scheduler::auth::{Session, LOGIN_FAILED_MESSAGE};

#[tokio::test]
async fn test_staff_login() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Keep this test fast
    *clinic_scheduler::config::LOGIN_DELAY.lock().unwrap() = Duration::from_millis(1);

    let mut session = Session::new();
    assert!(session.is_authenticated() == false);

    assert!(session.login("staff@clinic.com", "654321").await == false);
    assert!(LOGIN_FAILED_MESSAGE.is_empty() == false);
    assert!(session.user().is_none());

    assert!(session.login("staff@clinic.com", "123456").await);
    assert_eq!(session.user().unwrap().email, "staff@clinic.com");

    // A new session is always logged out
    assert!(Session::new().is_authenticated() == false);

    session.logout();
    assert!(session.is_authenticated() == false);
}
