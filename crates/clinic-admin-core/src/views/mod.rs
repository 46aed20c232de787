//! View models for each screen of the admin app.
//!
//! A view model holds the screen's local filter and form state, derives what
//! the screen renders from the store, and calls store mutators on user
//! actions. Validation happens here; the store never rejects a call.

mod appointments;
mod dashboard;
mod doctors;
mod patients;
mod reports;
mod search;

pub use appointments::*;
pub use dashboard::*;
pub use doctors::*;
pub use patients::*;
pub use reports::*;
pub use search::*;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

/// Rejections surfaced to the user as an error notification.
///
/// Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todos os campos são obrigatórios")]
    MissingFields,

    #[error("Paciente ou médico não encontrado")]
    PatientOrDoctorNotFound,

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Horário inválido: {0}")]
    InvalidTime(String),

    #[error("Apenas consultas agendadas podem mudar de status")]
    NotScheduled,

    #[error("Registro não encontrado: {0}")]
    NotFound(String),
}

pub type ViewResult<T> = Result<T, ValidationError>;

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient notification (toast) shown after an action.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Sucesso".into(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Erro".into(),
            description: description.into(),
        }
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        Notice::error(err.to_string())
    }
}

/// A completed action: the affected record and the notice to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub record: T,
    pub notice: Notice,
}

/// Case-insensitive substring test. An empty needle always matches.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `part / total` as a whole percentage, rounded half up; 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (total * 2)) as u32
}

/// Parse a form date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> ViewResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parse a form time (24-hour `HH:MM`).
pub fn parse_time(value: &str) -> ViewResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

/// Required fields only have to be non-empty; whitespace counts as a value.
fn all_filled(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.is_empty())
}
