//! Reports screen: per-doctor and per-specialty aggregation, charts data.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::export::ReportExport;
use crate::models::{Appointment, AppointmentStatus, Doctor};
use crate::store::Snapshot;

use super::{distinct_specialties, percent};

/// Short month labels as rendered for the pt-BR locale.
const MONTH_LABELS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// Short pt-BR label for the month of `date`.
pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}

/// Appointment counts by status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub completed: usize,
    pub scheduled: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn tally<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        let mut counts = Self::default();
        for appointment in appointments {
            counts.add(appointment.status);
        }
        counts
    }

    pub fn add(&mut self, status: AppointmentStatus) {
        self.total += 1;
        match status {
            AppointmentStatus::Completed => self.completed += 1,
            AppointmentStatus::Scheduled => self.scheduled += 1,
            AppointmentStatus::Cancelled => self.cancelled += 1,
        }
    }

    pub fn get(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Completed => self.completed,
            AppointmentStatus::Scheduled => self.scheduled,
            AppointmentStatus::Cancelled => self.cancelled,
        }
    }

    /// Completed share of the total, rounded; 0 when there is nothing to count.
    pub fn success_rate(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

/// Report grouping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Doctor,
    Specialty,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Doctor => "doctor",
            ReportKind::Specialty => "specialty",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Doctor => "por Médico",
            ReportKind::Specialty => "por Especialidade",
        }
    }

    /// Download file name for this report exported on `today`.
    pub fn file_name(&self, today: NaiveDate) -> String {
        format!("relatorio_{}_{}.csv", self.as_str(), today.format("%Y-%m-%d"))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(ReportKind::Doctor),
            "specialty" => Ok(ReportKind::Specialty),
            other => Err(format!("Unknown report kind: {}", other)),
        }
    }
}

/// One row per registered doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoctorReportRow {
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub counts: StatusCounts,
}

/// One row per distinct doctor specialty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecialtyReportRow {
    pub specialty: String,
    pub counts: StatusCounts,
}

/// Rows for the doctor report, matching appointments by doctor id.
///
/// Doctors without appointments get a zero row; appointments whose doctor was
/// deleted are not counted.
pub fn doctor_rows(doctors: &[Doctor], appointments: &[Appointment]) -> Vec<DoctorReportRow> {
    doctors
        .iter()
        .map(|doctor| DoctorReportRow {
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            counts: StatusCounts::tally(appointments.iter().filter(|a| a.doctor_id == doctor.id)),
        })
        .collect()
}

/// Rows for the specialty report, matching the specialty copied onto each
/// appointment.
pub fn specialty_rows(doctors: &[Doctor], appointments: &[Appointment]) -> Vec<SpecialtyReportRow> {
    distinct_specialties(doctors)
        .into_iter()
        .map(|specialty| {
            let counts = StatusCounts::tally(appointments.iter().filter(|a| a.specialty == specialty));
            SpecialtyReportRow { specialty, counts }
        })
        .collect()
}

/// Specialty with the most appointments; the first one wins a tie.
pub fn top_specialty(rows: &[SpecialtyReportRow]) -> Option<&SpecialtyReportRow> {
    let mut best: Option<&SpecialtyReportRow> = None;
    for row in rows {
        if best.map_or(true, |current| row.counts.total > current.counts.total) {
            best = Some(row);
        }
    }
    best
}

/// Pie chart slice.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusSlice {
    pub status: AppointmentStatus,
    pub label: &'static str,
    pub value: usize,
}

/// Counts per status for the pie chart, in scheduled/completed/cancelled order.
pub fn status_distribution(appointments: &[Appointment]) -> Vec<StatusSlice> {
    let counts = StatusCounts::tally(appointments);
    AppointmentStatus::ALL
        .iter()
        .map(|&status| StatusSlice {
            status,
            label: status.plural_label(),
            value: counts.get(status),
        })
        .collect()
}

/// Bar chart point.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyPoint {
    pub month: &'static str,
    pub total: usize,
    pub completed: usize,
}

/// Totals per month label, in the order months first appear in `appointments`.
///
/// Grouping is by label only, so the same month of different years shares a bar.
pub fn monthly_trend(appointments: &[Appointment]) -> Vec<MonthlyPoint> {
    let mut points: Vec<MonthlyPoint> = Vec::new();
    for appointment in appointments {
        let month = month_label(appointment.date);
        let completed = usize::from(appointment.status == AppointmentStatus::Completed);
        match points.iter_mut().find(|p| p.month == month) {
            Some(point) => {
                point.total += 1;
                point.completed += completed;
            }
            None => points.push(MonthlyPoint {
                month,
                total: 1,
                completed,
            }),
        }
    }
    points
}

/// Headline cards above the charts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_appointments: usize,
    pub completion_rate: u32,
    pub active_doctors: usize,
    pub specialty_count: usize,
    /// `None` when no doctor is registered
    pub top_specialty: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportsView {
    pub kind: ReportKind,
}

impl ReportsView {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }

    pub fn doctor_rows(&self, snapshot: &Snapshot) -> Vec<DoctorReportRow> {
        doctor_rows(&snapshot.doctors, &snapshot.appointments)
    }

    pub fn specialty_rows(&self, snapshot: &Snapshot) -> Vec<SpecialtyReportRow> {
        specialty_rows(&snapshot.doctors, &snapshot.appointments)
    }

    pub fn summary(&self, snapshot: &Snapshot) -> ReportSummary {
        let specialties = self.specialty_rows(snapshot);
        ReportSummary {
            total_appointments: snapshot.appointments.len(),
            completion_rate: StatusCounts::tally(snapshot.appointments.iter()).success_rate(),
            active_doctors: snapshot.doctors.len(),
            specialty_count: specialties.len(),
            top_specialty: top_specialty(&specialties).map(|row| row.specialty.clone()),
        }
    }

    pub fn status_distribution(&self, snapshot: &Snapshot) -> Vec<StatusSlice> {
        status_distribution(&snapshot.appointments)
    }

    pub fn monthly_trend(&self, snapshot: &Snapshot) -> Vec<MonthlyPoint> {
        monthly_trend(&snapshot.appointments)
    }

    /// Export of the currently selected report.
    pub fn export(&self, snapshot: &Snapshot, today: NaiveDate) -> ReportExport {
        let export = match self.kind {
            ReportKind::Doctor => ReportExport::doctor(&self.doctor_rows(snapshot), today),
            ReportKind::Specialty => {
                ReportExport::specialty(&self.specialty_rows(snapshot), today)
            }
        };
        tracing::info!(
            kind = %self.kind,
            rows = export.rows.len(),
            file = %export.metadata.file_name,
            "report exported"
        );
        export
    }
}
