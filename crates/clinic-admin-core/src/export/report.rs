//! CSV/JSON export of the doctor and specialty reports.
//!
//! Fields are joined with plain commas and never quoted, so a name that
//! contains a comma shifts the columns of its row. Clinic names and
//! specialties are entered by staff and are not expected to contain commas.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::views::{DoctorReportRow, ReportKind, SpecialtyReportRow, StatusCounts};

/// Header of the doctor report.
pub const DOCTOR_HEADER: [&str; 6] = [
    "Médico",
    "Especialidade",
    "Total",
    "Concluídas",
    "Agendadas",
    "Canceladas",
];

/// Header of the specialty report.
pub const SPECIALTY_HEADER: [&str; 5] = ["Especialidade", "Total", "Concluídas", "Agendadas", "Canceladas"];

/// A report ready to be downloaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportExport {
    pub metadata: ReportMetadata,
    pub rows: Vec<ReportLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportMetadata {
    pub kind: ReportKind,
    /// Day of export (drives the file name)
    pub exported_on: NaiveDate,
    /// `relatorio_{kind}_{YYYY-MM-DD}.csv`
    pub file_name: String,
}

/// One exported row. `doctor_name` is only present in the doctor report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportLine {
    pub doctor_name: Option<String>,
    pub specialty: String,
    pub total: usize,
    pub completed: usize,
    pub scheduled: usize,
    pub cancelled: usize,
}

impl ReportLine {
    fn new(doctor_name: Option<String>, specialty: String, counts: &StatusCounts) -> Self {
        Self {
            doctor_name,
            specialty,
            total: counts.total,
            completed: counts.completed,
            scheduled: counts.scheduled,
            cancelled: counts.cancelled,
        }
    }
}

impl ReportExport {
    fn new(kind: ReportKind, day: NaiveDate, rows: Vec<ReportLine>) -> Self {
        Self {
            metadata: ReportMetadata {
                kind,
                exported_on: day,
                file_name: kind.file_name(day),
            },
            rows,
        }
    }

    pub fn doctor(rows: &[DoctorReportRow], day: NaiveDate) -> Self {
        let lines = rows
            .iter()
            .map(|row| ReportLine::new(Some(row.doctor_name.clone()), row.specialty.clone(), &row.counts))
            .collect();
        Self::new(ReportKind::Doctor, day, lines)
    }

    pub fn specialty(rows: &[SpecialtyReportRow], day: NaiveDate) -> Self {
        let lines = rows
            .iter()
            .map(|row| ReportLine::new(None, row.specialty.clone(), &row.counts))
            .collect();
        Self::new(ReportKind::Specialty, day, lines)
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV: header line, then one line per row, newline-separated
    /// with no trailing newline.
    pub fn to_csv(&self) -> String {
        let header = match self.metadata.kind {
            ReportKind::Doctor => DOCTOR_HEADER.join(","),
            ReportKind::Specialty => SPECIALTY_HEADER.join(","),
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(header);
        for row in &self.rows {
            let counts = format!("{},{},{},{}", row.total, row.completed, row.scheduled, row.cancelled);
            lines.push(match self.metadata.kind {
                ReportKind::Doctor => format!(
                    "{},{},{}",
                    row.doctor_name.as_deref().unwrap_or(""),
                    row.specialty,
                    counts
                ),
                ReportKind::Specialty => format!("{},{}", row.specialty, counts),
            });
        }

        lines.join("\n")
    }
}
