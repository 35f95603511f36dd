use std::path::PathBuf;

use chrono::Datelike;

use clinic_scheduler::auth::{Credentials, Session, LOGIN_FAILED_MESSAGE};
use clinic_scheduler::calendar;
use clinic_scheduler::roster::Roster;
use clinic_scheduler::stats::Summary;
use clinic_scheduler::storage::{FileStorage, MemoryStorage};
use clinic_scheduler::traits::KeyValueStorage;
use clinic_scheduler::AppointmentStore;


#[tokio::main]
async fn main() {
    env_logger::init();

    let staff = Credentials::staff();
    let mut session = Session::new();
    if session.login(staff.email(), &password_from_env()).await == false {
        eprintln!("{}", LOGIN_FAILED_MESSAGE);
        std::process::exit(1);
    }

    let data_dir = std::env::var("CLINIC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| FileStorage::default_folder());

    let today = calendar::today();
    let (year, month0) = match std::env::args().nth(1) {
        None => (today.year(), today.month0()),
        Some(arg) => match parse_month(&arg) {
            Some(ym) => ym,
            None => {
                eprintln!("Invalid month {:?}. Expected YYYY-MM", arg);
                std::process::exit(2);
            },
        },
    };

    let storage = FileStorage::new(&data_dir);
    match AppointmentStore::load(storage).await {
        Ok(store) => show(&store, year, month0).await,
        Err(err) => {
            log::warn!("Invalid appointment data: {}. Using a temporary store", err);
            match AppointmentStore::load(MemoryStorage::new()).await {
                Ok(store) => show(&store, year, month0).await,
                Err(err) => log::error!("Unable to create a store: {}", err),
            }
        },
    }

    session.logout();
}

async fn show<S: KeyValueStorage>(store: &AppointmentStore<S>, year: i32, month0: u32) {
    let roster = Roster::default();
    let today = calendar::today();
    let today_str = calendar::date_string(today);

    match calendar::month_grid(store, year, month0, today, Some(&today_str)) {
        Ok(grid) => println!("{}", clinic_scheduler::utils::render_month_grid(&grid)),
        Err(err) => log::error!("Unable to build the month grid: {}", err),
    }

    match calendar::format_long_date(&today_str) {
        Ok(long_date) => println!("---- {} -----", long_date),
        Err(_) => println!("---- {} -----", today_str),
    }
    let schedule = calendar::day_schedule(store, &today_str);
    clinic_scheduler::utils::print_appointments(&schedule, &roster);

    let summary = Summary::compute(store.appointments(), today);
    println!();
    println!("Today: {} ({} scheduled)", summary.today, summary.today_scheduled);
    println!("Upcoming: {}", summary.upcoming);
    println!("Patients: {}", summary.distinct_patients);
    println!("Scheduled/completed/cancelled: {}/{}/{}", summary.scheduled, summary.completed, summary.cancelled);
}

/// The password to log in with. Defaults to the configured staff password
fn password_from_env() -> String {
    match std::env::var("CLINIC_PASSWORD") {
        Ok(p) => p,
        Err(_) => {
            match clinic_scheduler::config::STAFF_PASSWORD.lock() {
                Ok(p) => p.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            }
        },
    }
}

/// Parse a `YYYY-MM` string into a (year, zero-based month) pair
fn parse_month(s: &str) -> Option<(i32, u32)> {
    let mut parts = s.splitn(2, '-');
    let year = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    if month < 1 || month > 12 {
        return None;
    }
    Some((year, month - 1))
}
