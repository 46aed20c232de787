//! Clinic Admin Core Library
//!
//! Administration back-office for an aesthetic clinic: doctors, patients,
//! appointments, search and reports, held entirely in memory.
//!
//! # Architecture
//!
//! ```text
//!                 UI shell (web / desktop / mobile)
//!                              │
//!                     ClinicAdmin (FFI object)
//!                              │
//!       ┌──────────┬───────────┼───────────┬──────────┐
//!       ▼          ▼           ▼           ▼          ▼
//!   Dashboard   Doctors   Appointments   Search    Reports ──► CSV export
//!       │          │           │           │          │
//!       └──────────┴───────────┼───────────┴──────────┘
//!                              ▼
//!                         ClinicStore
//!               doctors · patients · appointments
//! ```
//!
//! # Core Principle
//!
//! **The store is the single source of truth.** Views validate and derive;
//! only the store mutates, and every mutation publishes a new collection.
//!
//! # Modules
//!
//! - [`store`]: collections, id generation, change subscriptions
//! - [`models`]: Domain types (Doctor, Patient, Appointment, etc.)
//! - [`views`]: per-screen filtering, forms and report aggregation
//! - [`export`]: report CSV/JSON export
//! - [`navigation`]: sidebar routes
//! - [`config`], [`logging`]: runtime setup

pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use config::{AdminConfig, ConfigError};
pub use export::ReportExport;
pub use models::{
    Appointment, AppointmentPatch, AppointmentStatus, Doctor, NewAppointment, NewDoctor,
    NewPatient, Patient, StatusFilter,
};
pub use navigation::Route;
pub use store::{ClinicStore, IdStrategy, Snapshot, StoreChange};
pub use views::{ReportKind, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use views::{
    AppointmentForm, AppointmentsView, Dashboard, DoctorForm, DoctorsView, PatientForm,
    PatientsView, ReportsView, SearchView,
};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicAdminError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ClinicAdminError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::NotFound(id) => ClinicAdminError::NotFound(id),
            other => ClinicAdminError::Validation(other.to_string()),
        }
    }
}

impl From<ConfigError> for ClinicAdminError {
    fn from(e: ConfigError) -> Self {
        ClinicAdminError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for ClinicAdminError {
    fn from(e: serde_json::Error) -> Self {
        ClinicAdminError::Serialization(e.to_string())
    }
}

impl From<models::UnknownStatus> for ClinicAdminError {
    fn from(e: models::UnknownStatus) -> Self {
        ClinicAdminError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicAdminError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicAdminError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the clinic with an optional JSON configuration.
#[uniffi::export]
pub fn open_clinic(config_json: Option<String>) -> Result<Arc<ClinicAdmin>, ClinicAdminError> {
    let config = match config_json {
        Some(json) => AdminConfig::from_json(&json)?,
        None => AdminConfig::default(),
    };
    Ok(Arc::new(ClinicAdmin::new(config)))
}

/// Install the log subscriber. Returns `false` if one was already installed.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) -> bool {
    logging::init_logging(filter.as_deref())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicAdmin {
    store: Arc<Mutex<ClinicStore>>,
    config: AdminConfig,
}

impl ClinicAdmin {
    pub fn new(config: AdminConfig) -> Self {
        tracing::info!(
            seed = config.seed_demo_data,
            ids = ?config.id_strategy,
            "opening clinic"
        );
        Self {
            store: Arc::new(Mutex::new(ClinicStore::from_config(&config))),
            config,
        }
    }

    /// Shared handle to the underlying store (for Rust hosts).
    pub fn store(&self) -> Arc<Mutex<ClinicStore>> {
        Arc::clone(&self.store)
    }

    fn today() -> NaiveDate {
        chrono::Utc::now().date_naive()
    }

    fn report_kind(kind: &str) -> Result<ReportKind, ClinicAdminError> {
        kind.parse().map_err(ClinicAdminError::InvalidInput)
    }
}

#[uniffi::export]
impl ClinicAdmin {
    /// Store version; changes after every effective mutation.
    pub fn version(&self) -> Result<u64, ClinicAdminError> {
        Ok(self.store.lock()?.version())
    }

    /// Sidebar entries for the page at `current_path`.
    pub fn menu(&self, current_path: String) -> Vec<FfiMenuItem> {
        navigation::menu(&current_path)
            .into_iter()
            .map(|item| FfiMenuItem {
                path: item.path.to_string(),
                label: item.label.to_string(),
                active: item.active,
            })
            .collect()
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn dashboard(&self) -> Result<FfiDashboard, ClinicAdminError> {
        let snapshot = self.store.lock()?.snapshot();
        Ok(Dashboard::build(&snapshot, Self::today(), &self.config).into())
    }

    // =========================================================================
    // Doctor Operations
    // =========================================================================

    /// Doctors whose name, specialty or email contains `search`.
    pub fn list_doctors(&self, search: String) -> Result<Vec<FfiDoctor>, ClinicAdminError> {
        let store = self.store.lock()?;
        let mut view = DoctorsView::new(self.config.specialties.clone());
        view.search_term = search;
        Ok(view.filtered(&store).into_iter().map(Into::into).collect())
    }

    /// Specialty suggestions for the registration form.
    pub fn specialty_suggestions(&self) -> Vec<String> {
        DoctorsView::new(self.config.specialties.clone())
            .specialties()
            .to_vec()
    }

    pub fn register_doctor(&self, input: FfiDoctorInput) -> Result<FfiDoctor, ClinicAdminError> {
        let mut store = self.store.lock()?;
        let mut view = DoctorsView::new(self.config.specialties.clone());
        view.form = input.into();
        Ok(view.register(&mut store)?.record.into())
    }

    /// Remove a doctor. The host shows the confirmation prompt first.
    pub fn delete_doctor(&self, id: String, confirmed: bool) -> Result<bool, ClinicAdminError> {
        let mut store = self.store.lock()?;
        let view = DoctorsView::new(self.config.specialties.clone());
        let outcome = view.delete(&mut store, &id, &mut |_: &str| confirmed)?;
        Ok(outcome.is_some())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    pub fn list_patients(&self, search: String) -> Result<Vec<FfiPatient>, ClinicAdminError> {
        let store = self.store.lock()?;
        let view = PatientsView {
            search_term: search,
            ..PatientsView::default()
        };
        let today = Self::today();
        Ok(view
            .filtered(&store)
            .into_iter()
            .map(|patient| FfiPatient::new(patient, today))
            .collect())
    }

    pub fn register_patient(&self, input: FfiPatientInput) -> Result<FfiPatient, ClinicAdminError> {
        let mut store = self.store.lock()?;
        let mut view = PatientsView::default();
        view.form = input.into();
        let patient = view.register(&mut store)?.record;
        Ok(FfiPatient::new(patient, Self::today()))
    }

    pub fn delete_patient(&self, id: String, confirmed: bool) -> Result<bool, ClinicAdminError> {
        let mut store = self.store.lock()?;
        let outcome = PatientsView::default().delete(&mut store, &id, &mut |_: &str| confirmed)?;
        Ok(outcome.is_some())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Appointments matching `search` (patient, doctor or specialty) and
    /// `status_filter` (`all` or a status name).
    pub fn list_appointments(
        &self,
        search: String,
        status_filter: String,
    ) -> Result<Vec<FfiAppointment>, ClinicAdminError> {
        let store = self.store.lock()?;
        let view = AppointmentsView {
            search_term: search,
            status_filter: status_filter.parse()?,
            ..AppointmentsView::default()
        };
        Ok(view.filtered(&store).into_iter().map(Into::into).collect())
    }

    pub fn appointment_counts(&self) -> Result<FfiStatusCounts, ClinicAdminError> {
        let store = self.store.lock()?;
        Ok(AppointmentsView::default().status_counts(&store).into())
    }

    pub fn schedule_appointment(
        &self,
        input: FfiAppointmentInput,
    ) -> Result<FfiAppointment, ClinicAdminError> {
        let mut store = self.store.lock()?;
        let mut view = AppointmentsView::default();
        view.form = AppointmentForm {
            date: input.date,
            time: input.time,
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            status: match input.status {
                Some(status) => status.parse()?,
                None => AppointmentStatus::Scheduled,
            },
        };
        Ok(view.schedule(&mut store)?.record.into())
    }

    pub fn complete_appointment(&self, id: String) -> Result<FfiAppointment, ClinicAdminError> {
        let mut store = self.store.lock()?;
        Ok(AppointmentsView::default().complete(&mut store, &id)?.record.into())
    }

    pub fn cancel_appointment(&self, id: String) -> Result<FfiAppointment, ClinicAdminError> {
        let mut store = self.store.lock()?;
        Ok(AppointmentsView::default().cancel(&mut store, &id)?.record.into())
    }

    pub fn delete_appointment(&self, id: String, confirmed: bool) -> Result<bool, ClinicAdminError> {
        let mut store = self.store.lock()?;
        let outcome = AppointmentsView::default().delete(&mut store, &id, &mut |_: &str| confirmed)?;
        Ok(outcome.is_some())
    }

    // =========================================================================
    // Search Operations
    // =========================================================================

    /// Conjunctive search; empty arguments match everything.
    pub fn search_appointments(
        &self,
        doctor: String,
        specialty: String,
        date: String,
    ) -> Result<FfiSearchResult, ClinicAdminError> {
        let store = self.store.lock()?;
        let mut view = SearchView {
            doctor_term: doctor,
            ..SearchView::default()
        };
        view.set_specialty(&specialty);
        view.set_date(&date)?;

        Ok(FfiSearchResult {
            appointments: view.results(&store).into_iter().map(Into::into).collect(),
            counts: view.status_counts(&store).into(),
            has_filters: view.has_filters(),
        })
    }

    /// Distinct specialties of the registered doctors.
    pub fn search_specialties(&self) -> Result<Vec<String>, ClinicAdminError> {
        let store = self.store.lock()?;
        Ok(SearchView::default().specialties(&store))
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Report rows for `kind` (`doctor` or `specialty`).
    pub fn report_rows(&self, kind: String) -> Result<Vec<FfiReportRow>, ClinicAdminError> {
        let snapshot = self.store.lock()?.snapshot();
        let view = ReportsView::new(Self::report_kind(&kind)?);
        let rows: Vec<FfiReportRow> = match view.kind {
            ReportKind::Doctor => view
                .doctor_rows(&snapshot)
                .into_iter()
                .map(|row| FfiReportRow::new(Some(row.doctor_name), row.specialty, &row.counts))
                .collect(),
            ReportKind::Specialty => view
                .specialty_rows(&snapshot)
                .into_iter()
                .map(|row| FfiReportRow::new(None, row.specialty, &row.counts))
                .collect(),
        };
        Ok(rows)
    }

    pub fn report_summary(&self) -> Result<FfiReportSummary, ClinicAdminError> {
        let snapshot = self.store.lock()?.snapshot();
        let view = ReportsView::default();
        let summary = view.summary(&snapshot);

        Ok(FfiReportSummary {
            total_appointments: summary.total_appointments as u32,
            completion_rate: summary.completion_rate,
            active_doctors: summary.active_doctors as u32,
            specialty_count: summary.specialty_count as u32,
            top_specialty: summary.top_specialty,
            status_distribution: view
                .status_distribution(&snapshot)
                .into_iter()
                .map(|slice| FfiChartPoint {
                    label: slice.label.to_string(),
                    total: slice.value as u32,
                    completed: None,
                })
                .collect(),
            monthly_trend: view
                .monthly_trend(&snapshot)
                .into_iter()
                .map(|point| FfiChartPoint {
                    label: point.month.to_string(),
                    total: point.total as u32,
                    completed: Some(point.completed as u32),
                })
                .collect(),
        })
    }

    /// Export the report as a CSV download.
    pub fn export_report_csv(&self, kind: String) -> Result<FfiReportFile, ClinicAdminError> {
        let snapshot = self.store.lock()?.snapshot();
        let export = ReportsView::new(Self::report_kind(&kind)?).export(&snapshot, Self::today());
        Ok(FfiReportFile {
            content: export.to_csv(),
            file_name: export.metadata.file_name,
        })
    }

    /// Export the report as JSON.
    pub fn export_report_json(&self, kind: String) -> Result<String, ClinicAdminError> {
        let snapshot = self.store.lock()?.snapshot();
        let export = ReportsView::new(Self::report_kind(&kind)?).export(&snapshot, Self::today());
        Ok(export.to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: String,
    pub code: String,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            code: doctor.code,
            name: doctor.name,
            specialty: doctor.specialty,
            email: doctor.email,
            phone: doctor.phone,
        }
    }
}

/// Doctor registration form as typed by the user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctorInput {
    pub code: String,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
}

impl From<FfiDoctorInput> for DoctorForm {
    fn from(input: FfiDoctorInput) -> Self {
        DoctorForm {
            code: input.code,
            name: input.name,
            specialty: input.specialty,
            email: input.email,
            phone: input.phone,
        }
    }
}

/// FFI-safe patient. `birth_date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    /// Age in whole years on the day the record was read
    pub age: u32,
}

impl FfiPatient {
    fn new(patient: Patient, today: NaiveDate) -> Self {
        Self {
            age: patient.age_on(today),
            birth_date: patient.birth_date.format("%Y-%m-%d").to_string(),
            id: patient.id,
            name: patient.name,
            email: patient.email,
            phone: patient.phone,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
}

impl From<FfiPatientInput> for PatientForm {
    fn from(input: FfiPatientInput) -> Self {
        PatientForm {
            name: input.name,
            email: input.email,
            phone: input.phone,
            birth_date: input.birth_date,
        }
    }
}

/// FFI-safe appointment. Date is `YYYY-MM-DD`, time `HH:MM`, status the wire name.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub date: String,
    pub time: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub status: String,
    pub status_label: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            date: appointment.date.format("%Y-%m-%d").to_string(),
            time: appointment.time.format("%H:%M").to_string(),
            patient_id: appointment.patient_id,
            patient_name: appointment.patient_name,
            doctor_id: appointment.doctor_id,
            doctor_name: appointment.doctor_name,
            specialty: appointment.specialty,
            status: appointment.status.as_str().to_string(),
            status_label: appointment.status.label().to_string(),
        }
    }
}

/// Booking form. `status` defaults to `scheduled`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentInput {
    pub date: String,
    pub time: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStatusCounts {
    pub total: u32,
    pub completed: u32,
    pub scheduled: u32,
    pub cancelled: u32,
}

impl From<views::StatusCounts> for FfiStatusCounts {
    fn from(counts: views::StatusCounts) -> Self {
        Self {
            total: counts.total as u32,
            completed: counts.completed as u32,
            scheduled: counts.scheduled as u32,
            cancelled: counts.cancelled as u32,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchResult {
    pub appointments: Vec<FfiAppointment>,
    pub counts: FfiStatusCounts,
    pub has_filters: bool,
}

/// FFI-safe dashboard.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboard {
    pub today: String,
    pub total_doctors: u32,
    pub total_patients: u32,
    pub total_appointments: u32,
    pub today_count: u32,
    pub upcoming_count: u32,
    pub completed_count: u32,
    pub recent: Vec<FfiAppointment>,
    pub completion_percent: u32,
    pub occupancy_percent: u32,
    pub daily_capacity: u32,
}

impl From<Dashboard> for FfiDashboard {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            today: dashboard.today.format("%Y-%m-%d").to_string(),
            total_doctors: dashboard.total_doctors as u32,
            total_patients: dashboard.total_patients as u32,
            total_appointments: dashboard.total_appointments as u32,
            today_count: dashboard.today_count as u32,
            upcoming_count: dashboard.upcoming_count as u32,
            completed_count: dashboard.completed_count as u32,
            recent: dashboard.recent.into_iter().map(Into::into).collect(),
            completion_percent: dashboard.completion_percent,
            occupancy_percent: dashboard.occupancy_percent,
            daily_capacity: dashboard.daily_capacity,
        }
    }
}

/// One report table row; `doctor_name` only for the doctor report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportRow {
    pub doctor_name: Option<String>,
    pub specialty: String,
    pub total: u32,
    pub completed: u32,
    pub scheduled: u32,
    pub cancelled: u32,
    pub success_rate: u32,
}

impl FfiReportRow {
    fn new(doctor_name: Option<String>, specialty: String, counts: &views::StatusCounts) -> Self {
        Self {
            doctor_name,
            specialty,
            total: counts.total as u32,
            completed: counts.completed as u32,
            scheduled: counts.scheduled as u32,
            cancelled: counts.cancelled as u32,
            success_rate: counts.success_rate(),
        }
    }
}

/// Chart data point: pie slices carry only `total`, monthly bars also `completed`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChartPoint {
    pub label: String,
    pub total: u32,
    pub completed: Option<u32>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportSummary {
    pub total_appointments: u32,
    pub completion_rate: u32,
    pub active_doctors: u32,
    pub specialty_count: u32,
    pub top_specialty: Option<String>,
    pub status_distribution: Vec<FfiChartPoint>,
    pub monthly_trend: Vec<FfiChartPoint>,
}

/// CSV download: suggested file name and content.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportFile {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMenuItem {
    pub path: String,
    pub label: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_clinic_with_demo_data() {
        let clinic = open_clinic(None).unwrap();
        assert_eq!(clinic.list_doctors(String::new()).unwrap().len(), 2);
        assert_eq!(clinic.version().unwrap(), 0);
    }

    #[test]
    fn test_open_clinic_rejects_bad_config() {
        let err = open_clinic(Some("{\"daily_capacity\": 0}".into())).err().unwrap();
        assert!(matches!(err, ClinicAdminError::Config(_)));
    }

    #[test]
    fn test_schedule_and_complete_via_ffi() {
        let clinic = open_clinic(None).unwrap();
        let appointment = clinic
            .schedule_appointment(FfiAppointmentInput {
                date: "2024-06-12".into(),
                time: "15:45".into(),
                patient_id: "2".into(),
                doctor_id: "1".into(),
                status: None,
            })
            .unwrap();
        assert_eq!(appointment.time, "15:45");
        assert_eq!(appointment.status, "scheduled");

        let done = clinic.complete_appointment(appointment.id.clone()).unwrap();
        assert_eq!(done.status_label, "Concluída");
        assert_eq!(clinic.version().unwrap(), 2);

        let completed = clinic
            .list_appointments(String::new(), "completed".into())
            .unwrap();
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn test_unknown_reference_is_validation_error() {
        let clinic = open_clinic(None).unwrap();
        let err = clinic
            .schedule_appointment(FfiAppointmentInput {
                date: "2024-06-12".into(),
                time: "15:45".into(),
                patient_id: "9".into(),
                doctor_id: "1".into(),
                status: None,
            })
            .unwrap_err();
        assert!(matches!(err, ClinicAdminError::Validation(msg) if msg == "Paciente ou médico não encontrado"));
    }

    #[test]
    fn test_bad_filters_are_invalid_input() {
        let clinic = open_clinic(None).unwrap();
        assert!(matches!(
            clinic.list_appointments(String::new(), "pending".into()),
            Err(ClinicAdminError::InvalidInput(_))
        ));
        assert!(matches!(
            clinic.report_rows("monthly".into()),
            Err(ClinicAdminError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_declined_delete_keeps_record() {
        let clinic = open_clinic(None).unwrap();
        assert!(!clinic.delete_patient("1".into(), false).unwrap());
        assert!(clinic.delete_patient("1".into(), true).unwrap());
        assert_eq!(clinic.list_patients(String::new()).unwrap().len(), 1);
    }

    #[test]
    fn test_export_csv_file() {
        let clinic = open_clinic(None).unwrap();
        let file = clinic.export_report_csv("specialty".into()).unwrap();
        assert!(file.file_name.starts_with("relatorio_specialty_"));
        assert!(file.file_name.ends_with(".csv"));
        assert_eq!(
            file.content.lines().next(),
            Some("Especialidade,Total,Concluídas,Agendadas,Canceladas")
        );
    }

    #[test]
    fn test_patient_record_carries_age() {
        let patient = FfiPatient::new(
            Patient {
                id: "1".into(),
                name: "Maria Santos".into(),
                email: "maria.santos@email.com".into(),
                phone: "(11) 98888-0001".into(),
                birth_date: NaiveDate::from_ymd_opt(1985, 5, 15).unwrap(),
            },
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        );
        assert_eq!(patient.birth_date, "1985-05-15");
        assert_eq!(patient.age, 39);
    }

    #[test]
    fn test_specialty_suggestions_follow_config() {
        let clinic = open_clinic(Some(r#"{"specialties": ["Tricologia"]}"#.into())).unwrap();
        assert_eq!(clinic.specialty_suggestions(), vec!["Tricologia".to_string()]);
    }

    #[test]
    fn test_subscriber_renders_from_published_snapshot() {
        let clinic = open_clinic(None).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        clinic.store().lock().unwrap().subscribe(move |_, snapshot| {
            log.lock().unwrap().push(snapshot.doctors.len());
        });

        clinic
            .register_doctor(FfiDoctorInput {
                code: "DR003".into(),
                name: "Dr. Helena Prado".into(),
                specialty: "Tricologia".into(),
                email: "helena@clinica.com".into(),
                phone: "(11) 95555-0003".into(),
            })
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_menu_marks_active() {
        let clinic = open_clinic(None).unwrap();
        let menu = clinic.menu("/".into());
        assert!(menu[0].active);
        assert_eq!(menu.iter().filter(|m| m.active).count(), 1);
    }
}
