//! Appointments screen: booking, status changes, list filtering.

use crate::models::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, StatusFilter};
use crate::store::ClinicStore;

use super::{
    all_filled, contains_ci, parse_date, parse_time, Confirm, Notice, Outcome, StatusCounts,
    ValidationError, ViewResult,
};

/// Booking form. Dates are `YYYY-MM-DD`, times `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentForm {
    pub date: String,
    pub time: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub status: AppointmentStatus,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            patient_id: String::new(),
            doctor_id: String::new(),
            status: AppointmentStatus::Scheduled,
        }
    }
}

impl AppointmentForm {
    /// Check required fields, resolve the references and copy their
    /// display fields into the new appointment.
    fn resolve(&self, store: &ClinicStore) -> ViewResult<NewAppointment> {
        if !all_filled(&[&self.date, &self.time, &self.patient_id, &self.doctor_id]) {
            return Err(ValidationError::MissingFields);
        }

        let (patient, doctor) = match (store.patient(&self.patient_id), store.doctor(&self.doctor_id)) {
            (Some(patient), Some(doctor)) => (patient, doctor),
            _ => return Err(ValidationError::PatientOrDoctorNotFound),
        };

        Ok(NewAppointment {
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            status: self.status,
        })
    }
}

/// Appointment matches when `term` occurs in the patient name, doctor name
/// or specialty.
pub fn appointment_matches(appointment: &Appointment, term: &str) -> bool {
    contains_ci(&appointment.patient_name, term)
        || contains_ci(&appointment.doctor_name, term)
        || contains_ci(&appointment.specialty, term)
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentsView {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub form: AppointmentForm,
}

impl AppointmentsView {
    /// Appointments passing both the text search and the status filter.
    pub fn filtered(&self, store: &ClinicStore) -> Vec<Appointment> {
        store
            .appointments()
            .iter()
            .filter(|a| appointment_matches(a, &self.search_term))
            .filter(|a| self.status_filter.accepts(a.status))
            .cloned()
            .collect()
    }

    /// Counters over every appointment, ignoring the filters.
    pub fn status_counts(&self, store: &ClinicStore) -> StatusCounts {
        StatusCounts::tally(store.appointments().iter())
    }

    /// Book the appointment described by the form. On success the form resets.
    pub fn schedule(&mut self, store: &mut ClinicStore) -> ViewResult<Outcome<Appointment>> {
        let new = self.form.resolve(store).inspect_err(|err| {
            tracing::warn!(%err, "appointment rejected");
        })?;
        let appointment = store.add_appointment(new);
        self.form = AppointmentForm::default();
        Ok(Outcome {
            record: appointment,
            notice: Notice::success("Consulta agendada com sucesso!"),
        })
    }

    pub fn complete(&self, store: &mut ClinicStore, id: &str) -> ViewResult<Outcome<Appointment>> {
        self.change_status(store, id, AppointmentStatus::Completed)
    }

    pub fn cancel(&self, store: &mut ClinicStore, id: &str) -> ViewResult<Outcome<Appointment>> {
        self.change_status(store, id, AppointmentStatus::Cancelled)
    }

    /// Move a scheduled appointment to `status`. Only the status changes.
    fn change_status(
        &self,
        store: &mut ClinicStore,
        id: &str,
        status: AppointmentStatus,
    ) -> ViewResult<Outcome<Appointment>> {
        let current = store
            .appointment(id)
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))?;
        if current.status != AppointmentStatus::Scheduled {
            return Err(ValidationError::NotScheduled);
        }

        store.update_appointment(id, &AppointmentPatch::status(status));
        let record = store
            .appointment(id)
            .cloned()
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))?;
        Ok(Outcome {
            record,
            notice: Notice::success(format!(
                "Status da consulta atualizado para {}!",
                status.label()
            )),
        })
    }

    pub fn delete(
        &self,
        store: &mut ClinicStore,
        id: &str,
        confirm: &mut dyn Confirm,
    ) -> ViewResult<Option<Outcome<Appointment>>> {
        let appointment = store
            .appointment(id)
            .cloned()
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))?;

        if !confirm.confirm("Tem certeza que deseja excluir esta consulta?") {
            return Ok(None);
        }

        store.delete_appointment(id);
        tracing::info!(id, "appointment removed");
        Ok(Some(Outcome {
            record: appointment,
            notice: Notice::success("Consulta excluída com sucesso!"),
        }))
    }
}
