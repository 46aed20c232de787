//! Appointment models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked, not yet attended
    Scheduled,
    /// Attended
    Completed,
    /// Called off
    Cancelled,
}

impl AppointmentStatus {
    /// Every status, in display order.
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Wire name (`scheduled`, `completed`, `cancelled`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Singular label shown next to an appointment.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendada",
            AppointmentStatus::Completed => "Concluída",
            AppointmentStatus::Cancelled => "Cancelada",
        }
    }

    /// Plural label used by counters and charts.
    pub fn plural_label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendadas",
            AppointmentStatus::Completed => "Concluídas",
            AppointmentStatus::Cancelled => "Canceladas",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown appointment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Status filter used by the appointments list: everything, or one exact status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    /// Whether a status passes this filter.
    pub fn accepts(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// A booked appointment.
///
/// `patient_name`, `doctor_name` and `specialty` are copied from the referenced
/// records when the appointment is created and are never re-synchronized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    /// Store-assigned identifier, never reused
    pub id: String,
    /// Calendar date of the visit
    pub date: NaiveDate,
    /// Wall-clock time, no timezone
    pub time: NaiveTime,
    /// Referenced patient (may dangle after the patient is deleted)
    pub patient_id: String,
    /// Patient name at booking time
    pub patient_name: String,
    /// Referenced doctor (may dangle after the doctor is deleted)
    pub doctor_id: String,
    /// Doctor name at booking time
    pub doctor_name: String,
    /// Doctor specialty at booking time
    pub specialty: String,
    pub status: AppointmentStatus,
}

/// Appointment fields supplied on creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAppointment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Attach an identifier, producing the stored record.
    pub fn with_id(self, id: String) -> Appointment {
        Appointment {
            id,
            date: self.date,
            time: self.time,
            patient_id: self.patient_id,
            patient_name: self.patient_name,
            doctor_id: self.doctor_id,
            doctor_name: self.doctor_name,
            specialty: self.specialty,
            status: self.status,
        }
    }
}

/// Partial update for an appointment. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_id: Option<String>,
    pub doctor_name: Option<String>,
    pub specialty: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    /// Patch that only changes the status.
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True if the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `appointment`, returning the result.
    pub fn apply(&self, appointment: &Appointment) -> Appointment {
        let mut merged = appointment.clone();
        if let Some(date) = self.date {
            merged.date = date;
        }
        if let Some(time) = self.time {
            merged.time = time;
        }
        if let Some(patient_id) = &self.patient_id {
            merged.patient_id = patient_id.clone();
        }
        if let Some(patient_name) = &self.patient_name {
            merged.patient_name = patient_name.clone();
        }
        if let Some(doctor_id) = &self.doctor_id {
            merged.doctor_id = doctor_id.clone();
        }
        if let Some(doctor_name) = &self.doctor_name {
            merged.doctor_name = doctor_name.clone();
        }
        if let Some(specialty) = &self.specialty {
            merged.specialty = specialty.clone();
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        merged
    }
}
