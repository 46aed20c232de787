//! Dashboard: headline counters and recent activity.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AdminConfig;
use crate::models::{Appointment, AppointmentStatus};
use crate::store::Snapshot;

use super::percent;

/// Appointments on `today`.
pub fn todays_appointments<'a>(
    appointments: &'a [Appointment],
    today: NaiveDate,
) -> impl Iterator<Item = &'a Appointment> + 'a {
    appointments.iter().filter(move |a| a.date == today)
}

/// Scheduled appointments dated today or later.
pub fn upcoming_appointments<'a>(
    appointments: &'a [Appointment],
    today: NaiveDate,
) -> impl Iterator<Item = &'a Appointment> + 'a {
    appointments
        .iter()
        .filter(move |a| a.status == AppointmentStatus::Scheduled && a.date >= today)
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub total_doctors: usize,
    pub total_patients: usize,
    pub total_appointments: usize,
    pub today_count: usize,
    pub upcoming_count: usize,
    pub completed_count: usize,
    /// First appointments in store order (not sorted by date)
    pub recent: Vec<Appointment>,
    /// completed / total, as a percentage
    pub completion_percent: u32,
    /// today's appointments / daily capacity, as a percentage; may exceed 100
    pub occupancy_percent: u32,
    pub daily_capacity: u32,
}

impl Dashboard {
    pub fn build(snapshot: &Snapshot, today: NaiveDate, config: &AdminConfig) -> Self {
        let appointments = snapshot.appointments.as_slice();
        let today_count = todays_appointments(appointments, today).count();
        let completed_count = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count();

        Self {
            today,
            total_doctors: snapshot.doctors.len(),
            total_patients: snapshot.patients.len(),
            total_appointments: appointments.len(),
            today_count,
            upcoming_count: upcoming_appointments(appointments, today).count(),
            completed_count,
            recent: appointments.iter().take(config.recent_limit).cloned().collect(),
            completion_percent: percent(completed_count, appointments.len()),
            occupancy_percent: percent(today_count, config.daily_capacity as usize),
            daily_capacity: config.daily_capacity,
        }
    }
}
