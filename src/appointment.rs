//! Clinic appointments

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::convert::Infallible;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{NaiveDate, NaiveTime};


/// The lifecycle status of an appointment.
///
/// There are no transition rules: any status can be replaced by any other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("Unknown appointment status {:?}", other)),
        }
    }
}



/// The unique identifier of an [`Appointment`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppointmentId {
    content: String,
}

impl AppointmentId {
    /// Generate a random AppointmentId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for AppointmentId {
    fn from(s: String) -> Self {
        Self { content: s }
    }
}
impl From<&str> for AppointmentId {
    fn from(s: &str) -> Self {
        Self { content: s.to_string() }
    }
}
impl FromStr for AppointmentId {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
impl Display for AppointmentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for AppointmentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for AppointmentId {
    fn deserialize<D>(deserializer: D) -> Result<AppointmentId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AppointmentId{ content: s })
    }
}



/// A meeting between one patient and one doctor
///
/// `date` (`YYYY-MM-DD`) and `time` (`HH:MM`) are kept as strings, because they are compared lexicographically.
/// Their format is not enforced, see [`Appointment::is_well_formed`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    id: AppointmentId,
    patient_id: String,
    doctor_id: String,
    date: String,
    time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    status: AppointmentStatus,
}

impl Appointment {
    /// Build an appointment from its data and an already chosen id
    pub fn from_new(id: AppointmentId, data: NewAppointment) -> Self {
        Self {
            id,
            patient_id: data.patient_id,
            doctor_id: data.doctor_id,
            date: data.date,
            time: data.time,
            notes: data.notes,
            status: data.status,
        }
    }

    pub fn id(&self) -> &AppointmentId     { &self.id          }
    pub fn patient_id(&self) -> &str       { &self.patient_id  }
    pub fn doctor_id(&self) -> &str        { &self.doctor_id   }
    pub fn date(&self) -> &str             { &self.date        }
    pub fn time(&self) -> &str             { &self.time        }
    pub fn notes(&self) -> Option<&str>    { self.notes.as_deref() }
    pub fn status(&self) -> AppointmentStatus { self.status    }

    /// Merge every field set in `patch` over this appointment. Other fields are left untouched.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = patch.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Whether `date` is a valid `YYYY-MM-DD` and `time` a valid `HH:MM`
    pub fn is_well_formed(&self) -> bool {
        is_valid_date(&self.date) && is_valid_time(&self.time)
    }
}


/// The data needed to create an [`Appointment`]. The id is picked by the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// A scheduled appointment without notes
    pub fn new<P, D, T, U>(patient_id: P, doctor_id: D, date: T, time: U) -> Self
    where
        P: Into<String>,
        D: Into<String>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            date: date.into(),
            time: time.into(),
            notes: None,
            status: AppointmentStatus::Scheduled,
        }
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }
}


/// A partial update of an [`Appointment`]. `None` fields are left unchanged.
///
/// `notes` is doubly optional: `Some(None)` clears the notes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppointmentPatch {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<Option<String>>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patient_id<S: Into<String>>(mut self, patient_id: S) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn doctor_id<S: Into<String>>(mut self, doctor_id: S) -> Self {
        self.doctor_id = Some(doctor_id.into());
        self
    }

    pub fn date<S: Into<String>>(mut self, date: S) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn time<S: Into<String>>(mut self, time: S) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether this patch would write a malformed date or time
    pub(crate) fn has_malformed_fields(&self) -> bool {
        self.date.as_deref().map(|d| is_valid_date(d) == false).unwrap_or(false)
        || self.time.as_deref().map(|t| is_valid_time(t) == false).unwrap_or(false)
    }
}

/// A full replacement of every editable field, as an "edit" form would submit it
impl From<NewAppointment> for AppointmentPatch {
    fn from(data: NewAppointment) -> Self {
        Self {
            patient_id: Some(data.patient_id),
            doctor_id: Some(data.doctor_id),
            date: Some(data.date),
            time: Some(data.time),
            notes: Some(data.notes),
            status: Some(data.status),
        }
    }
}


/// Checks a string is a zero-padded `YYYY-MM-DD` calendar date
///
/// Signed years (`+999-01-01`) are rejected, since they would not sort correctly as strings.
pub fn is_valid_date(date: &str) -> bool {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        // Formatting back must give the exact same string
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string() == date,
        Err(_) => false,
    }
}

/// Checks a string is a zero-padded `HH:MM` 24-hour time
pub fn is_valid_time(time: &str) -> bool {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(parsed) => parsed.format("%H:%M").to_string() == time,
        Err(_) => false,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Appointment {
        Appointment::from_new(
            AppointmentId::from("42"),
            NewAppointment::new("1", "2", "2025-01-10", "09:00").with_notes("Annual checkup"),
        )
    }

    #[test]
    fn serialized_field_names() {
        let json = serde_json::to_value(&sample()).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["patientId"], "1");
        assert_eq!(json["doctorId"], "2");
        assert_eq!(json["date"], "2025-01-10");
        assert_eq!(json["time"], "09:00");
        assert_eq!(json["notes"], "Annual checkup");
        assert_eq!(json["status"], "scheduled");
    }

    #[test]
    fn notes_are_optional() {
        let raw = r#"{"id":"7","patientId":"3","doctorId":"1","date":"2024-05-02","time":"14:00","status":"cancelled"}"#;
        let appointment: Appointment = serde_json::from_str(raw).unwrap();
        assert_eq!(appointment.notes(), None);
        assert_eq!(appointment.status(), AppointmentStatus::Cancelled);

        let json = serde_json::to_string(&appointment).unwrap();
        assert!(json.contains("notes") == false);
    }

    #[test]
    fn patch_only_touches_set_fields() {
        let mut appointment = sample();
        appointment.apply(AppointmentPatch::new().time("11:30").status(AppointmentStatus::Completed));

        assert_eq!(appointment.time(), "11:30");
        assert_eq!(appointment.status(), AppointmentStatus::Completed);
        assert_eq!(appointment.patient_id(), "1");
        assert_eq!(appointment.doctor_id(), "2");
        assert_eq!(appointment.date(), "2025-01-10");
        assert_eq!(appointment.notes(), Some("Annual checkup"));
    }

    #[test]
    fn patch_can_clear_notes() {
        let mut appointment = sample();
        appointment.apply(AppointmentPatch::new().notes(None));
        assert_eq!(appointment.notes(), None);
    }

    #[test]
    fn edit_form_replaces_every_field() {
        let mut appointment = sample();
        let edited = NewAppointment::new("5", "4", "2025-01-11", "15:30").with_status(AppointmentStatus::Cancelled);
        appointment.apply(AppointmentPatch::from(edited.clone()));
        assert_eq!(appointment, Appointment::from_new(AppointmentId::from("42"), edited));
    }

    #[test]
    fn well_formedness() {
        assert!(sample().is_well_formed());
        assert!(is_valid_date("2024-02-29"));
        assert!(is_valid_date("2023-02-29") == false);
        assert!(is_valid_date("2024-2-9") == false);
        assert!(is_valid_date("-999-01-01") == false);
        assert!(is_valid_date("+999-01-01") == false);
        assert!(is_valid_date("0999-01-01"));
        assert!(is_valid_date("2024-02-29 ") == false);
        assert!(is_valid_time("23:59"));
        assert!(is_valid_time("9:00") == false);
        assert!(is_valid_time("24:00") == false);
    }

    #[test]
    fn status_strings() {
        for status in &[AppointmentStatus::Scheduled, AppointmentStatus::Completed, AppointmentStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), *status);
        }
        assert!("done".parse::<AppointmentStatus>().is_err());
    }
}
