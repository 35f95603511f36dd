//! Reference data: the doctors and patients of the clinic
//!
//! These are read-only as far as this crate is concerned. Appointments refer to them by id.

use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Serialize};
use csscolorparser::Color;

use crate::Appointment;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// The color used to display this doctor's appointments. Serialized as a CSS hex string
    pub color: Color,
}

impl Doctor {
    /// Create a doctor. `color` can be any CSS color (e.g. `#1e40af`, `rebeccapurple`)
    pub fn new(id: &str, name: &str, specialty: &str, color: &str) -> Result<Self, Box<dyn Error>> {
        let color = csscolorparser::parse(color)
            .map_err(|err| format!("Invalid color {:?} for doctor {}: {}", color, id, err))?;
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            color,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Patient {
    pub fn new(id: &str, name: &str, phone: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }
}


/// The lists of doctors and patients
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
}

impl Roster {
    pub fn new(doctors: Vec<Doctor>, patients: Vec<Patient>) -> Self {
        Self { doctors, patients }
    }

    /// Load a roster from a JSON file (`{"doctors": [...], "patients": [...]}`)
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let roster = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };
        Ok(roster)
    }

    pub fn doctors(&self) -> &[Doctor]   { &self.doctors  }
    pub fn patients(&self) -> &[Patient] { &self.patients }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// The doctor an appointment is with, if it is known
    pub fn doctor_of(&self, appointment: &Appointment) -> Option<&Doctor> {
        self.doctor(appointment.doctor_id())
    }

    /// The patient an appointment is for, if it is known
    pub fn patient_of(&self, appointment: &Appointment) -> Option<&Patient> {
        self.patient(appointment.patient_id())
    }
}

/// The built-in roster of the clinic
impl Default for Roster {
    fn default() -> Self {
        let doctors = vec![
            builtin_doctor("1", "Dr. Sarah Johnson", "Cardiology", "#1e40af"),
            builtin_doctor("2", "Dr. Michael Chen", "Pediatrics", "#059669"),
            builtin_doctor("3", "Dr. Emily Rodriguez", "Dermatology", "#7c3aed"),
            builtin_doctor("4", "Dr. David Thompson", "Orthopedics", "#dc2626"),
            builtin_doctor("5", "Dr. Lisa Wang", "Neurology", "#ea580c"),
        ];
        let patients = vec![
            Patient::new("1", "John Smith", "(555) 123-4567", "john.smith@email.com"),
            Patient::new("2", "Maria Garcia", "(555) 234-5678", "maria.garcia@email.com"),
            Patient::new("3", "Robert Johnson", "(555) 345-6789", "robert.johnson@email.com"),
            Patient::new("4", "Jennifer Wilson", "(555) 456-7890", "jennifer.wilson@email.com"),
            Patient::new("5", "Michael Brown", "(555) 567-8901", "michael.brown@email.com"),
            Patient::new("6", "Sarah Davis", "(555) 678-9012", "sarah.davis@email.com"),
            Patient::new("7", "Christopher Miller", "(555) 789-0123", "christopher.miller@email.com"),
            Patient::new("8", "Amanda Taylor", "(555) 890-1234", "amanda.taylor@email.com"),
        ];
        Self { doctors, patients }
    }
}

fn builtin_doctor(id: &str, name: &str, specialty: &str, color: &str) -> Doctor {
    match Doctor::new(id, name, specialty, color) {
        Ok(doctor) => doctor,
        Err(err) => {
            log::warn!("{}. Using black instead", err);
            Doctor {
                id: id.to_string(),
                name: name.to_string(),
                specialty: specialty.to_string(),
                color: Color::new(0.0, 0.0, 0.0, 1.0),
            }
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{AppointmentId, NewAppointment};

    #[test]
    fn builtin_roster() {
        let roster = Roster::default();
        assert_eq!(roster.doctors().len(), 5);
        assert_eq!(roster.patients().len(), 8);
        assert_eq!(roster.doctor("3").unwrap().specialty, "Dermatology");
        assert_eq!(roster.patient("8").unwrap().name, "Amanda Taylor");
        assert!(roster.doctor("6").is_none());
        assert_eq!(roster.doctor("1").unwrap().color.to_hex_string(), "#1e40af");
    }

    #[test]
    fn lookups_from_appointments() {
        let roster = Roster::default();
        let appointment = Appointment::from_new(AppointmentId::from("1"), NewAppointment::new("2", "5", "2025-01-10", "09:00"));
        assert_eq!(roster.patient_of(&appointment).unwrap().name, "Maria Garcia");
        assert_eq!(roster.doctor_of(&appointment).unwrap().name, "Dr. Lisa Wang");
    }

    #[test]
    fn invalid_color() {
        assert!(Doctor::new("9", "Dr. Nobody", "None", "not-a-color").is_err());
    }

    #[test]
    fn roster_from_file() {
        let folder = std::env::temp_dir().join("clinic-scheduler-tests").join("roster_from_file");
        std::fs::create_dir_all(&folder).unwrap();
        let path = folder.join("roster.json");
        std::fs::write(&path, r##"{
            "doctors": [{"id": "10", "name": "Dr. Ada Park", "specialty": "Radiology", "color": "#0ea5e9"}],
            "patients": [
                {"id": "20", "name": "Leo Martin", "phone": "(555) 000-1111", "email": "leo.martin@email.com"},
                {"id": "21", "name": "Nora Kim", "phone": "(555) 000-2222", "email": "nora.kim@email.com"}
            ]
        }"##).unwrap();

        let roster = Roster::from_file(&path).unwrap();
        assert_eq!(roster.doctors().len(), 1);
        assert_eq!(roster.patients().len(), 2);
        let doctor = roster.doctor("10").unwrap();
        assert_eq!(doctor.specialty, "Radiology");
        assert_eq!(doctor.color.to_hex_string(), "#0ea5e9");
        assert_eq!(roster.patient("21").unwrap().name, "Nora Kim");

        assert!(Roster::from_file(&folder.join("missing.json")).is_err());
        std::fs::write(&path, "{\"doctors\": [").unwrap();
        assert!(Roster::from_file(&path).is_err());
    }

    #[test]
    fn serde_roster() {
        let roster = Roster::default();
        let json = serde_json::to_string(&roster).unwrap();
        assert!(json.contains("\"color\":\"#dc2626\""));

        let retrieved: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(roster, retrieved);
    }
}
