//! This crate provides the core of a clinic appointment scheduler.
//!
//! The appointments are owned by an [`AppointmentStore`](store::AppointmentStore), which mirrors them into a durable [`KeyValueStorage`](traits::KeyValueStorage)
//! (see the [`storage`] module for available backends) and notifies observers about every change.
//!
//! The [`calendar`] module computes what a calendar view should display (month grids, single days), by querying the store. \
//! Doctors and patients are read-only reference data, provided by a [`Roster`](roster::Roster).
//! Staff members log in through a [`Session`](auth::Session).

pub mod traits;

mod appointment;
pub use appointment::{Appointment, AppointmentId, AppointmentPatch, AppointmentStatus, NewAppointment};
pub use appointment::{is_valid_date, is_valid_time};
pub mod store;
pub use store::AppointmentStore;

pub mod calendar;
pub mod storage;
pub mod roster;
pub mod auth;
pub mod stats;

pub mod config;
pub mod utils;
