//! Search screen: narrow appointments by doctor, specialty and date.

use chrono::NaiveDate;

use crate::models::{Appointment, Doctor};
use crate::store::ClinicStore;

use super::{contains_ci, parse_date, StatusCounts, ViewResult};

/// Distinct doctor specialties, in first-seen order.
pub fn distinct_specialties(doctors: &[Doctor]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for doctor in doctors {
        if !seen.contains(&doctor.specialty) {
            seen.push(doctor.specialty.clone());
        }
    }
    seen
}

/// Conjunctive filters; an unset filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    /// Substring of the doctor name, case-insensitive
    pub doctor_term: String,
    /// Exact specialty
    pub specialty: Option<String>,
    /// Exact date
    pub date: Option<NaiveDate>,
}

impl SearchView {
    /// Specialties offered by the specialty picker.
    pub fn specialties(&self, store: &ClinicStore) -> Vec<String> {
        distinct_specialties(&store.doctors())
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        contains_ci(&appointment.doctor_name, &self.doctor_term)
            && self
                .specialty
                .as_ref()
                .map_or(true, |s| appointment.specialty == *s)
            && self.date.map_or(true, |d| appointment.date == d)
    }

    pub fn results(&self, store: &ClinicStore) -> Vec<Appointment> {
        store
            .appointments()
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect()
    }

    /// Counters over the filtered results.
    pub fn status_counts(&self, store: &ClinicStore) -> StatusCounts {
        let appointments = store.appointments();
        StatusCounts::tally(appointments.iter().filter(|a| self.matches(a)))
    }

    /// Set the specialty filter; an empty value clears it.
    pub fn set_specialty(&mut self, value: &str) {
        self.specialty = (!value.is_empty()).then(|| value.to_string());
    }

    /// Set the date filter from form input; an empty value clears it.
    pub fn set_date(&mut self, value: &str) -> ViewResult<()> {
        self.date = if value.trim().is_empty() {
            None
        } else {
            Some(parse_date(value)?)
        };
        Ok(())
    }

    /// Shortcut for today's appointments.
    pub fn show_today(&mut self, today: NaiveDate) {
        self.date = Some(today);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any filter is set (selects the empty-result hint).
    pub fn has_filters(&self) -> bool {
        !self.doctor_term.is_empty() || self.specialty.is_some() || self.date.is_some()
    }
}
