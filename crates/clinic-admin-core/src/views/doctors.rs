//! Doctors screen: list, search, registration and removal.

use crate::config::DEFAULT_SPECIALTIES;
use crate::models::{Doctor, NewDoctor};
use crate::store::ClinicStore;

use super::{all_filled, contains_ci, Confirm, Notice, Outcome, ValidationError, ViewResult};

/// Registration form fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub code: String,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
}

impl DoctorForm {
    fn validate(&self) -> ViewResult<NewDoctor> {
        if !all_filled(&[&self.code, &self.name, &self.specialty, &self.email, &self.phone]) {
            return Err(ValidationError::MissingFields);
        }
        Ok(NewDoctor {
            code: self.code.clone(),
            name: self.name.clone(),
            specialty: self.specialty.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        })
    }
}

/// Doctor matches when `term` occurs in its name, specialty or email.
pub fn doctor_matches(doctor: &Doctor, term: &str) -> bool {
    contains_ci(&doctor.name, term)
        || contains_ci(&doctor.specialty, term)
        || contains_ci(&doctor.email, term)
}

#[derive(Debug, Clone)]
pub struct DoctorsView {
    pub search_term: String,
    pub form: DoctorForm,
    specialties: Vec<String>,
}

impl Default for DoctorsView {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIALTIES.iter().map(|s| s.to_string()).collect())
    }
}

impl DoctorsView {
    /// Create the view with the specialty suggestions offered by the form.
    pub fn new(specialties: Vec<String>) -> Self {
        Self {
            search_term: String::new(),
            form: DoctorForm::default(),
            specialties,
        }
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Doctors matching the search term, in store order.
    pub fn filtered(&self, store: &ClinicStore) -> Vec<Doctor> {
        store
            .doctors()
            .iter()
            .filter(|d| doctor_matches(d, &self.search_term))
            .cloned()
            .collect()
    }

    /// Submit the form. On success the form is cleared.
    pub fn register(&mut self, store: &mut ClinicStore) -> ViewResult<Outcome<Doctor>> {
        let new = self.form.validate().inspect_err(|err| {
            tracing::warn!(%err, "doctor registration rejected");
        })?;
        let doctor = store.add_doctor(new);
        self.form = DoctorForm::default();
        Ok(Outcome {
            record: doctor,
            notice: Notice::success("Médico cadastrado com sucesso!"),
        })
    }

    /// Ask for confirmation, then remove the doctor.
    ///
    /// Returns `Ok(None)` when the user declines. Appointments booked with the
    /// doctor are kept.
    pub fn delete(
        &self,
        store: &mut ClinicStore,
        id: &str,
        confirm: &mut dyn Confirm,
    ) -> ViewResult<Option<Outcome<Doctor>>> {
        let doctor = store
            .doctor(id)
            .cloned()
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))?;

        let prompt = format!("Tem certeza que deseja excluir o médico {}?", doctor.name);
        if !confirm.confirm(&prompt) {
            return Ok(None);
        }

        store.delete_doctor(id);
        tracing::info!(id, name = %doctor.name, "doctor removed");
        Ok(Some(Outcome {
            record: doctor,
            notice: Notice::success("Médico excluído com sucesso!"),
        }))
    }
}
