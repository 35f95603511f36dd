//! Dashboard figures about a set of appointments

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::calendar::date_string;

/// What the dashboard shows next to the calendar
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// Appointments today, whatever their status
    pub today: usize,
    /// Appointments today that are still scheduled
    pub today_scheduled: usize,
    /// Appointments strictly after today
    pub upcoming: usize,
    /// Patients that have at least one appointment
    pub distinct_patients: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl Summary {
    pub fn compute(appointments: &[Appointment], today: NaiveDate) -> Self {
        let today = date_string(today);
        let mut summary = Summary::default();
        let mut patients = HashSet::new();

        for appointment in appointments {
            patients.insert(appointment.patient_id());

            if appointment.date() == today {
                summary.today += 1;
                if appointment.status() == AppointmentStatus::Scheduled {
                    summary.today_scheduled += 1;
                }
            } else if appointment.date() > today.as_str() {
                summary.upcoming += 1;
            }

            match appointment.status() {
                AppointmentStatus::Scheduled => summary.scheduled += 1,
                AppointmentStatus::Completed => summary.completed += 1,
                AppointmentStatus::Cancelled => summary.cancelled += 1,
            }
        }

        summary.distinct_patients = patients.len();
        summary
    }
}
