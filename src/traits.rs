use std::error::Error;

use async_trait::async_trait;

use crate::Appointment;

/// A durable key-value storage, that keeps string values across restarts
///
/// This is where an [`AppointmentStore`](crate::store::AppointmentStore) mirrors its contents.
#[async_trait]
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if nothing has been stored yet
    async fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Store `value` under `key`, overwriting any previous value
    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}

/// Something that can list the appointments of a given day
pub trait AppointmentSource {
    /// Returns the appointments whose date is exactly `date` (a `YYYY-MM-DD` string), in no particular order
    fn by_date(&self, date: &str) -> Vec<&Appointment>;
}
