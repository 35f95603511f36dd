//! This module provides the appointment store, the single owner of every appointment
//!
//! The store keeps the appointments in memory, and mirrors the whole collection into a [`KeyValueStorage`] after every change.

use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::appointment::{Appointment, AppointmentId, AppointmentPatch, NewAppointment, AppointmentStatus};
use crate::appointment::{is_valid_date, is_valid_time};
use crate::calendar::date_string;
use crate::traits::{AppointmentSource, KeyValueStorage};

pub mod notification;
use notification::{NotificationSender, StoreEvent};


/// A store that can be shared between several tasks.
///
/// The mutex serializes every mutation, since the store itself is not designed for concurrent writers.
pub type SharedStore<S> = Arc<tokio::sync::Mutex<AppointmentStore<S>>>;


/// The collection of every appointment, backed by a durable storage
#[derive(Debug)]
pub struct AppointmentStore<S: KeyValueStorage> {
    storage: S,
    /// The storage key that holds the serialized collection
    key: String,
    appointments: Vec<Appointment>,

    feedback_channel: Option<NotificationSender>,
}

impl<S: KeyValueStorage> AppointmentStore<S> {
    /// Initialize a store from the content of `storage`.
    ///
    /// In case `storage` has no appointment data yet, the store is seeded with [`sample_appointments`], which are saved right away. \
    /// Returns an error in case the stored data cannot be read or is corrupted.
    pub async fn load(storage: S) -> Result<Self, Box<dyn Error>> {
        Self::load_with_today(storage, crate::calendar::today()).await
    }

    /// Same as [`Self::load`], but uses a custom "today" to date the sample appointments
    pub async fn load_with_today(storage: S, today: NaiveDate) -> Result<Self, Box<dyn Error>> {
        let key = crate::config::storage_key();
        let saved = storage.get_item(&key).await?;

        let mut store = Self {
            storage,
            key,
            appointments: Vec::new(),
            feedback_channel: None,
        };

        match saved {
            Some(payload) => {
                let appointments: Vec<Appointment> = serde_json::from_str(&payload)
                    .map_err(|err| format!("Corrupted appointment data under key {:?}: {}", &store.key, err))?;
                store.appointments = appointments;
                log::info!("Loaded {} appointments", store.appointments.len());
                store.check_loaded_data();
            },
            None => {
                log::info!("No saved appointments. Using sample data");
                store.appointments = sample_appointments(today);
                store.save().await;
            },
        }

        Ok(store)
    }

    /// Use `sender` to notify an observer about every change
    pub fn set_feedback_channel(&mut self, sender: NotificationSender) {
        self.feedback_channel = Some(sender);
    }

    /// Create a new appointment, with a freshly picked id
    pub async fn add(&mut self, data: NewAppointment) -> Appointment {
        if is_valid_date(&data.date) == false || is_valid_time(&data.time) == false {
            log::warn!("Adding an appointment with a malformed date or time ({:?} {:?})", data.date, data.time);
        }

        let appointment = Appointment::from_new(self.fresh_id(), data);
        log::debug!("Adding appointment {} on {} at {}", appointment.id(), appointment.date(), appointment.time());
        self.appointments.push(appointment.clone());

        self.save().await;
        self.feedback(StoreEvent::Scheduled{ id: appointment.id().clone() });
        appointment
    }

    /// Merge `patch` into the appointment that has this `id`.
    ///
    /// Returns `false` (and does nothing) in case there is no such appointment.
    pub async fn update(&mut self, id: &AppointmentId, patch: AppointmentPatch) -> bool {
        if patch.has_malformed_fields() {
            log::warn!("Updating appointment {} with a malformed date or time ({:?} {:?})", id, patch.date, patch.time);
        }

        match self.appointments.iter_mut().find(|a| a.id() == id) {
            None => {
                log::warn!("No appointment {} to update. Ignoring", id);
                return false;
            },
            Some(appointment) => {
                log::debug!("Updating appointment {}", id);
                appointment.apply(patch);
            },
        }

        self.save().await;
        self.feedback(StoreEvent::Updated{ id: id.clone() });
        true
    }

    /// Remove the appointment that has this `id`.
    ///
    /// Returns `false` (and does nothing) in case there is no such appointment.
    pub async fn delete(&mut self, id: &AppointmentId) -> bool {
        let count_before = self.appointments.len();
        self.appointments.retain(|a| a.id() != id);
        if self.appointments.len() == count_before {
            log::warn!("No appointment {} to delete. Ignoring", id);
            return false;
        }
        log::debug!("Deleted appointment {}", id);

        self.save().await;
        self.feedback(StoreEvent::Cancelled{ id: id.clone() });
        true
    }

    /// Returns every appointment of a given day (a `YYYY-MM-DD` string), in insertion order
    pub fn by_date(&self, date: &str) -> Vec<&Appointment> {
        self.appointments.iter()
            .filter(|a| a.date() == date)
            .collect()
    }

    /// Returns every appointment from `start` to `end` (both included), in insertion order
    ///
    /// Dates are compared as strings, which is correct as long as they are `YYYY-MM-DD`.
    pub fn by_date_range(&self, start: &str, end: &str) -> Vec<&Appointment> {
        self.appointments.iter()
            .filter(|a| a.date() >= start && a.date() <= end)
            .collect()
    }

    /// Returns every appointment, in insertion order
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Pick an id no other appointment uses
    fn fresh_id(&self) -> AppointmentId {
        loop {
            let id = AppointmentId::random();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Returns the appointments whose date or time would not be shown correctly (see [`Appointment::is_well_formed`])
    pub fn malformed_appointments(&self) -> Vec<&Appointment> {
        self.appointments.iter()
            .filter(|a| a.is_well_formed() == false)
            .collect()
    }

    fn check_loaded_data(&self) {
        let mut seen = HashSet::new();
        for appointment in &self.appointments {
            if seen.insert(appointment.id()) == false {
                log::warn!("Stored data contains several appointments with id {}", appointment.id());
            }
        }
        for appointment in self.malformed_appointments() {
            log::warn!("Stored appointment {} has a malformed date or time ({:?} {:?})", appointment.id(), appointment.date(), appointment.time());
        }
    }

    /// Store the whole collection to the backing storage
    async fn save(&mut self) {
        let payload = match serde_json::to_string(&self.appointments) {
            Err(err) => {
                log::warn!("Unable to serialize: {}", err);
                return;
            },
            Ok(p) => p,
        };

        if let Err(err) = self.storage.set_item(&self.key, &payload).await {
            log::warn!("Unable to save appointments under key {:?}: {}", self.key, err);
        }
    }

    /// Send an event to the observer (if any).
    fn feedback(&self, event: StoreEvent) {
        if let Some(sender) = &self.feedback_channel {
            if let Err(err) = sender.send(event) {
                log::debug!("Nobody is listening to store notifications anymore ({})", err.0);
            }
        }
    }
}

impl<S: KeyValueStorage> AppointmentSource for AppointmentStore<S> {
    fn by_date(&self, date: &str) -> Vec<&Appointment> {
        AppointmentStore::by_date(self, date)
    }
}


/// The appointments a brand new store starts with: two today, one tomorrow
pub fn sample_appointments(today: NaiveDate) -> Vec<Appointment> {
    let tomorrow = today.succ_opt().unwrap_or(today);
    vec![
        Appointment::from_new(
            AppointmentId::from("1"),
            NewAppointment::new("1", "1", date_string(today), "09:00")
                .with_status(AppointmentStatus::Scheduled)
                .with_notes("Annual checkup"),
        ),
        Appointment::from_new(
            AppointmentId::from("2"),
            NewAppointment::new("2", "2", date_string(today), "10:30")
                .with_status(AppointmentStatus::Scheduled)
                .with_notes("Follow-up appointment"),
        ),
        Appointment::from_new(
            AppointmentId::from("3"),
            NewAppointment::new("3", "1", date_string(tomorrow), "14:00")
                .with_status(AppointmentStatus::Scheduled)
                .with_notes("Consultation"),
        ),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::notification::notification_channel;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn empty_store() -> AppointmentStore<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage.set_item(&crate::config::storage_key(), "[]").await.unwrap();
        AppointmentStore::load(storage).await.unwrap()
    }

    #[tokio::test]
    async fn seeds_and_persists_samples() {
        let store = AppointmentStore::load_with_today(MemoryStorage::new(), day("2024-12-31")).await.unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.by_date("2024-12-31").len(), 2);
        assert_eq!(store.by_date("2025-01-01").len(), 1);

        let saved = store.storage().get_item(&crate::config::storage_key()).await.unwrap().unwrap();
        let parsed: Vec<Appointment> = serde_json::from_str(&saved).unwrap();
        assert_eq!(parsed, store.appointments());
    }

    #[tokio::test]
    async fn corrupted_data_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(&crate::config::storage_key(), "[{\"id\": ").await.unwrap();
        assert!(AppointmentStore::load(storage).await.is_err());
    }

    #[tokio::test]
    async fn missing_ids_are_ignored() {
        let mut store = empty_store().await;
        let added = store.add(NewAppointment::new("1", "1", "2025-01-10", "09:00")).await;

        let ghost = AppointmentId::from("does-not-exist");
        assert!(store.update(&ghost, AppointmentPatch::new().time("10:00")).await == false);
        assert!(store.delete(&ghost).await == false);
        assert_eq!(store.appointments(), &[added]);
    }

    #[tokio::test]
    async fn observers_are_notified() {
        let (sender, mut receiver) = notification_channel();
        let mut store = empty_store().await;
        store.set_feedback_channel(sender);

        let added = store.add(NewAppointment::new("4", "5", "2025-03-03", "08:30")).await;
        assert_eq!(receiver.try_recv().unwrap(), StoreEvent::Scheduled{ id: added.id().clone() });

        store.update(added.id(), AppointmentPatch::new().status(AppointmentStatus::Completed)).await;
        assert_eq!(receiver.try_recv().unwrap(), StoreEvent::Updated{ id: added.id().clone() });

        store.delete(added.id()).await;
        assert_eq!(receiver.try_recv().unwrap(), StoreEvent::Cancelled{ id: added.id().clone() });

        // No-ops do not notify
        store.delete(added.id()).await;
        store.update(added.id(), AppointmentPatch::new().time("10:00")).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn malformed_stored_appointments_are_reported() {
        let mut storage = MemoryStorage::new();
        let payload = r#"[
            {"id":"1","patientId":"1","doctorId":"1","date":"2025-01-10","time":"09:00","status":"scheduled"},
            {"id":"2","patientId":"2","doctorId":"1","date":"2025-1-10","time":"09:00","status":"scheduled"},
            {"id":"3","patientId":"3","doctorId":"1","date":"2025-01-10","time":"9am","status":"completed"}
        ]"#;
        storage.set_item(&crate::config::storage_key(), payload).await.unwrap();

        let store = AppointmentStore::load(storage).await.unwrap();
        assert_eq!(store.len(), 3);
        let malformed: Vec<&str> = store.malformed_appointments().iter().map(|a| a.id().as_str()).collect();
        assert_eq!(malformed, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn range_query_is_inclusive() {
        let mut store = empty_store().await;
        store.add(NewAppointment::new("1", "1", "2025-01-31", "09:00")).await;
        store.add(NewAppointment::new("1", "1", "2025-02-01", "09:00")).await;
        store.add(NewAppointment::new("1", "1", "2025-02-28", "09:00")).await;
        store.add(NewAppointment::new("1", "1", "2025-03-01", "09:00")).await;

        let february: Vec<&str> = store.by_date_range("2025-02-01", "2025-02-28").iter().map(|a| a.date()).collect();
        assert_eq!(february, vec!["2025-02-01", "2025-02-28"]);
    }
}
