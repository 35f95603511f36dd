//! Some utility functions

use std::collections::{HashMap, HashSet};

use crate::appointment::{Appointment, AppointmentId};
use crate::calendar::{format_time, GridCell, MonthGrid, DAY_NAMES};
use crate::roster::Roster;


/// Compare two lists of appointments, regardless of their order
///
/// A list that contains the same id twice is never considered equal to anything.
pub fn same_appointments(left: &[Appointment], right: &[Appointment]) -> bool {
    if left.len() != right.len() {
        log::debug!("Count of appointments mismatch: {} and {}", left.len(), right.len());
        return false;
    }

    let left_count = left.len();
    let left: HashMap<&AppointmentId, &Appointment> = left.iter().map(|a| (a.id(), a)).collect();
    let right: HashMap<&AppointmentId, &Appointment> = right.iter().map(|a| (a.id(), a)).collect();
    if left.len() != left_count || right.len() != left_count {
        log::debug!("Some appointments share the same id");
        return false;
    }

    if keys_are_the_same(&left, &right) == false {
        return false;
    }

    for (id, appointment_l) in &left {
        match right.get(id) {
            Some(appointment_r) if appointment_l == appointment_r => continue,
            _ => {
                log::debug!("Appointment {} differs", id);
                return false;
            },
        }
    }
    true
}

/// Compare keys of two hashmaps for equality
pub fn keys_are_the_same<T, U, V>(left: &HashMap<T, U>, right: &HashMap<T, V>) -> bool
where
    T: std::hash::Hash + Eq + Clone + std::fmt::Display,
{
    if left.len() != right.len() {
        log::debug!("Count of keys mismatch: {} and {}", left.len(), right.len());
        return false;
    }

    let keys_l: HashSet<T> = left.keys().cloned().collect();
    let keys_r: HashSet<T> = right.keys().cloned().collect();
    let result = keys_l == keys_r;
    if result == false {
        log::debug!("Keys of a map mismatch");
        for key in keys_l {
            log::debug!("   left: {}", key);
        }
        for key in keys_r {
            log::debug!("  right: {}", key);
        }
    }
    result
}


/// A one-line description of an appointment, e.g. `9:00 AM  John Smith with Dr. Sarah Johnson [scheduled]`
pub fn describe_appointment(appointment: &Appointment, roster: &Roster) -> String {
    let patient = roster.patient_of(appointment)
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown patient");
    let doctor = roster.doctor_of(appointment)
        .map(|d| d.name.as_str())
        .unwrap_or("unknown doctor");

    let mut line = format!("{:>8}  {} with {} [{}]", format_time(appointment.time()), patient, doctor, appointment.status());
    if let Some(notes) = appointment.notes() {
        line.push_str(" - ");
        line.push_str(notes);
    }
    line
}

/// A debug utility that pretty-prints a list of appointments
pub fn print_appointments(appointments: &[Appointment], roster: &Roster) {
    if appointments.is_empty() {
        println!("    (no appointments)");
    }
    for appointment in appointments {
        println!("    {}", describe_appointment(appointment, roster));
    }
}

/// Render a month grid as text. Today is marked with `*`, the selected day with `>`, and days with appointments show their count
pub fn render_month_grid(grid: &MonthGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:^56}\n", grid.title()));
    for name in DAY_NAMES.iter() {
        out.push_str(&format!("{:^8}", name));
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            let text = match cell {
                GridCell::Blank => String::new(),
                GridCell::Day(day) => {
                    let marker = if day.is_selected { ">" } else if day.is_today { "*" } else { " " };
                    match day.appointments.len() {
                        0 => format!("{}{}", marker, day.day),
                        n => format!("{}{}({})", marker, day.day, n),
                    }
                },
            };
            out.push_str(&format!("{:^8}", text));
        }
        out.push('\n');
    }
    out
}
