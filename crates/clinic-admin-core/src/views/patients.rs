//! Patients screen.

use crate::models::{NewPatient, Patient};
use crate::store::ClinicStore;

use super::{all_filled, contains_ci, parse_date, Confirm, Notice, Outcome, ValidationError, ViewResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
}

impl PatientForm {
    fn validate(&self) -> ViewResult<NewPatient> {
        if !all_filled(&[&self.name, &self.email, &self.phone, &self.birth_date]) {
            return Err(ValidationError::MissingFields);
        }
        Ok(NewPatient {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            birth_date: parse_date(&self.birth_date)?,
        })
    }
}

/// Patient matches when `term` occurs in its name, email or phone.
pub fn patient_matches(patient: &Patient, term: &str) -> bool {
    contains_ci(&patient.name, term)
        || contains_ci(&patient.email, term)
        || contains_ci(&patient.phone, term)
}

#[derive(Debug, Clone, Default)]
pub struct PatientsView {
    pub search_term: String,
    pub form: PatientForm,
}

impl PatientsView {
    pub fn filtered(&self, store: &ClinicStore) -> Vec<Patient> {
        store
            .patients()
            .iter()
            .filter(|p| patient_matches(p, &self.search_term))
            .cloned()
            .collect()
    }

    pub fn register(&mut self, store: &mut ClinicStore) -> ViewResult<Outcome<Patient>> {
        let new = self.form.validate().inspect_err(|err| {
            tracing::warn!(%err, "patient registration rejected");
        })?;
        let patient = store.add_patient(new);
        self.form = PatientForm::default();
        Ok(Outcome {
            record: patient,
            notice: Notice::success("Paciente cadastrado com sucesso!"),
        })
    }

    /// Ask for confirmation, then remove the patient. Their appointments stay.
    pub fn delete(
        &self,
        store: &mut ClinicStore,
        id: &str,
        confirm: &mut dyn Confirm,
    ) -> ViewResult<Option<Outcome<Patient>>> {
        let patient = store
            .patient(id)
            .cloned()
            .ok_or_else(|| ValidationError::NotFound(id.to_string()))?;

        let prompt = format!("Tem certeza que deseja excluir o paciente {}?", patient.name);
        if !confirm.confirm(&prompt) {
            return Ok(None);
        }

        store.delete_patient(id);
        tracing::info!(id, "patient removed");
        Ok(Some(Outcome {
            record: patient,
            notice: Notice::success("Paciente excluído com sucesso!"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{demo_data, IdStrategy};

    fn store() -> ClinicStore {
        ClinicStore::with_data(IdStrategy::Sequential, demo_data())
    }

    #[test]
    fn test_filter_by_phone() {
        let store = store();
        let view = PatientsView {
            search_term: "98888-0002".into(),
            ..Default::default()
        };
        let found = view.filtered(&store);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "João Oliveira");
    }

    #[test]
    fn test_register_parses_birth_date() {
        let mut store = store();
        let mut view = PatientsView::default();
        view.form = PatientForm {
            name: "Lia Costa".into(),
            email: "lia.costa@email.com".into(),
            phone: "(11) 97777-0003".into(),
            birth_date: "1992-02-29".into(),
        };

        let outcome = view.register(&mut store).unwrap();
        assert_eq!(outcome.record.id, "3");
        assert_eq!(outcome.record.birth_date.to_string(), "1992-02-29");
        assert_eq!(store.patients().len(), 3);
    }

    #[test]
    fn test_register_rejects_bad_date() {
        let mut store = store();
        let mut view = PatientsView::default();
        view.form = PatientForm {
            name: "Lia Costa".into(),
            email: "lia.costa@email.com".into(),
            phone: "(11) 97777-0003".into(),
            birth_date: "1991-02-29".into(),
        };

        assert!(matches!(view.register(&mut store), Err(ValidationError::InvalidDate(_))));
        assert_eq!(store.patients().len(), 2);
    }

    #[test]
    fn test_delete_keeps_appointments() {
        let mut store = store();
        let view = PatientsView::default();

        let removed = view.delete(&mut store, "1", &mut |_: &str| true).unwrap();
        assert_eq!(removed.map(|o| o.record.name), Some("Maria Santos".to_string()));
        assert_eq!(store.appointments()[0].patient_name, "Maria Santos");
    }
}
