//! In-memory application state for the clinic.
//!
//! [`ClinicStore`] is the only owner of the doctor, patient and appointment
//! collections. Each mutation builds a new vector and swaps it in, so a
//! [`Snapshot`] taken by a view is never modified underneath it. Subscribers
//! are notified synchronously, after the new collection has been published.
//!
//! The store does not validate: forms in [`crate::views`] check required
//! fields and references before calling it. Deleting a doctor or patient never
//! touches appointments that refer to them.

mod events;
mod ids;
mod seed;

pub use events::*;
pub use ids::*;
pub use seed::*;

use std::sync::Arc;

use serde::Serialize;

use crate::config::AdminConfig;
use crate::models::{
    Appointment, AppointmentPatch, Doctor, NewAppointment, NewDoctor, NewPatient, Patient,
};

/// The three collections owned by the store.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Doctors,
    Patients,
    Appointments,
}

impl Collection {
    pub(crate) fn index(self) -> usize {
        match self {
            Collection::Doctors => 0,
            Collection::Patients => 1,
            Collection::Appointments => 2,
        }
    }
}

/// Read-only view of every collection at one store version.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub doctors: Arc<Vec<Doctor>>,
    pub patients: Arc<Vec<Patient>>,
    pub appointments: Arc<Vec<Appointment>>,
    pub version: u64,
}

/// Owner of the clinic's collections and their mutation operations.
#[derive(Debug)]
pub struct ClinicStore {
    doctors: Arc<Vec<Doctor>>,
    patients: Arc<Vec<Patient>>,
    appointments: Arc<Vec<Appointment>>,
    ids: IdGenerator,
    version: u64,
    subscribers: Subscribers,
}

impl Default for ClinicStore {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl ClinicStore {
    /// Create an empty store.
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            doctors: Arc::new(Vec::new()),
            patients: Arc::new(Vec::new()),
            appointments: Arc::new(Vec::new()),
            ids: IdGenerator::new(strategy),
            version: 0,
            subscribers: Subscribers::default(),
        }
    }

    /// Create a store pre-loaded with `seed`.
    pub fn with_data(strategy: IdStrategy, seed: SeedData) -> Self {
        let mut ids = IdGenerator::new(strategy);
        for doctor in &seed.doctors {
            ids.observe(Collection::Doctors, &doctor.id);
        }
        for patient in &seed.patients {
            ids.observe(Collection::Patients, &patient.id);
        }
        for appointment in &seed.appointments {
            ids.observe(Collection::Appointments, &appointment.id);
        }

        Self {
            doctors: Arc::new(seed.doctors),
            patients: Arc::new(seed.patients),
            appointments: Arc::new(seed.appointments),
            ids,
            version: 0,
            subscribers: Subscribers::default(),
        }
    }

    /// Create a store as described by `config`.
    pub fn from_config(config: &AdminConfig) -> Self {
        if config.seed_demo_data {
            Self::with_data(config.id_strategy, demo_data())
        } else {
            Self::new(config.id_strategy)
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn doctors(&self) -> Arc<Vec<Doctor>> {
        Arc::clone(&self.doctors)
    }

    pub fn patients(&self) -> Arc<Vec<Patient>> {
        Arc::clone(&self.patients)
    }

    pub fn appointments(&self) -> Arc<Vec<Appointment>> {
        Arc::clone(&self.appointments)
    }

    /// All collections at the current version.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            doctors: self.doctors(),
            patients: self.patients(),
            appointments: self.appointments(),
            version: self.version,
        }
    }

    /// Number of effective mutations since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Register a doctor under a fresh id.
    pub fn add_doctor(&mut self, doctor: NewDoctor) -> Doctor {
        let doctor = doctor.with_id(self.ids.next_id(Collection::Doctors));
        self.doctors = Arc::new(appended(&self.doctors, doctor.clone()));
        tracing::debug!(id = %doctor.id, total = self.doctors.len(), "doctor added");
        self.publish(Collection::Doctors, ChangeKind::Added, &doctor.id);
        doctor
    }

    /// Register a patient under a fresh id.
    pub fn add_patient(&mut self, patient: NewPatient) -> Patient {
        let patient = patient.with_id(self.ids.next_id(Collection::Patients));
        self.patients = Arc::new(appended(&self.patients, patient.clone()));
        tracing::debug!(id = %patient.id, total = self.patients.len(), "patient added");
        self.publish(Collection::Patients, ChangeKind::Added, &patient.id);
        patient
    }

    /// Store an appointment under a fresh id.
    ///
    /// The caller has already copied the patient and doctor fields; no
    /// reference check happens here.
    pub fn add_appointment(&mut self, appointment: NewAppointment) -> Appointment {
        let appointment = appointment.with_id(self.ids.next_id(Collection::Appointments));
        self.appointments = Arc::new(appended(&self.appointments, appointment.clone()));
        tracing::debug!(
            id = %appointment.id,
            total = self.appointments.len(),
            "appointment added"
        );
        self.publish(Collection::Appointments, ChangeKind::Added, &appointment.id);
        appointment
    }

    /// Merge `patch` into the appointment with `id`.
    ///
    /// Returns `false`, leaving the collection untouched, when no appointment
    /// has that id.
    pub fn update_appointment(&mut self, id: &str, patch: &AppointmentPatch) -> bool {
        if self.appointment(id).is_none() {
            tracing::debug!(id, "update skipped, appointment not found");
            return false;
        }

        let updated: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|a| if a.id == id { patch.apply(a) } else { a.clone() })
            .collect();
        self.appointments = Arc::new(updated);
        tracing::debug!(id, "appointment updated");
        self.publish(Collection::Appointments, ChangeKind::Updated, id);
        true
    }

    /// Remove the doctor with `id`. Appointments keep their copied names.
    pub fn delete_doctor(&mut self, id: &str) -> bool {
        match without(&self.doctors, |d| d.id == id) {
            Some(remaining) => {
                self.doctors = Arc::new(remaining);
                tracing::debug!(id, total = self.doctors.len(), "doctor deleted");
                self.publish(Collection::Doctors, ChangeKind::Deleted, id);
                true
            }
            None => false,
        }
    }

    /// Remove the patient with `id`. Appointments keep their copied names.
    pub fn delete_patient(&mut self, id: &str) -> bool {
        match without(&self.patients, |p| p.id == id) {
            Some(remaining) => {
                self.patients = Arc::new(remaining);
                tracing::debug!(id, total = self.patients.len(), "patient deleted");
                self.publish(Collection::Patients, ChangeKind::Deleted, id);
                true
            }
            None => false,
        }
    }

    pub fn delete_appointment(&mut self, id: &str) -> bool {
        match without(&self.appointments, |a| a.id == id) {
            Some(remaining) => {
                self.appointments = Arc::new(remaining);
                tracing::debug!(id, total = self.appointments.len(), "appointment deleted");
                self.publish(Collection::Appointments, ChangeKind::Deleted, id);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register `callback` to run after every effective mutation.
    ///
    /// The callback receives the new collections directly. It runs while the
    /// store is mutably borrowed, so it must not reach back into the store
    /// (or lock a mutex guarding it).
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreChange, &Snapshot) + Send + 'static,
    {
        self.subscribers.add(Box::new(callback))
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self, collection: Collection, kind: ChangeKind, id: &str) {
        self.version += 1;
        let change = StoreChange {
            collection,
            kind,
            id: id.to_string(),
            version: self.version,
        };
        self.subscribers.notify(&change, &self.snapshot());
    }
}

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// Copy of `items` without the matches, or `None` when nothing matched.
fn without<T: Clone>(items: &[T], matches: impl Fn(&T) -> bool) -> Option<Vec<T>> {
    if !items.iter().any(&matches) {
        return None;
    }
    Some(items.iter().filter(|item| !matches(*item)).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, NewPatient};
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Mutex;

    fn new_doctor(name: &str) -> NewDoctor {
        NewDoctor {
            code: "DR099".into(),
            name: name.into(),
            specialty: "Tricologia".into(),
            email: "x@clinica.com".into(),
            phone: "(11) 90000-0000".into(),
        }
    }

    #[test]
    fn test_add_doctor_appends_with_fresh_id() {
        let mut store = ClinicStore::with_data(IdStrategy::Sequential, demo_data());
        let doctor = store.add_doctor(new_doctor("Dr. Paula Reis"));

        assert_eq!(doctor.id, "3");
        assert_eq!(store.doctors().len(), 3);
        assert_eq!(store.doctors().last(), Some(&doctor));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = ClinicStore::default();
        let first = store.add_doctor(new_doctor("A"));
        assert!(store.delete_doctor(&first.id));
        let second = store.add_doctor(new_doctor("B"));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_snapshot_is_stable_across_mutations() {
        let mut store = ClinicStore::with_data(IdStrategy::Sequential, demo_data());
        let before = store.snapshot();

        store.add_patient(NewPatient {
            name: "Lia Costa".into(),
            email: "lia@email.com".into(),
            phone: "(11) 97777-0000".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        });

        assert_eq!(before.patients.len(), 2);
        assert_eq!(store.patients().len(), 3);
        assert!(!Arc::ptr_eq(&before.patients, &store.patients()));
        assert!(Arc::ptr_eq(&before.doctors, &store.doctors()));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = ClinicStore::with_data(IdStrategy::Sequential, demo_data());
        let before = store.appointments();

        let patch = AppointmentPatch::status(AppointmentStatus::Completed);
        assert!(!store.update_appointment("404", &patch));
        assert!(Arc::ptr_eq(&before, &store.appointments()));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_delete_doctor_does_not_cascade() {
        let mut store = ClinicStore::with_data(IdStrategy::Sequential, demo_data());
        assert!(store.delete_doctor("1"));

        let appointments = store.appointments();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].doctor_id, "1");
        assert_eq!(appointments[0].doctor_name, "Dr. Ana Silva");
        assert!(store.doctor("1").is_none());
    }

    #[test]
    fn test_subscribers_see_published_changes_in_order() {
        let mut store = ClinicStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        store.subscribe(move |change, _| log.lock().unwrap().push(("first", change.clone())));
        let log = Arc::clone(&seen);
        let second =
            store.subscribe(move |change, _| log.lock().unwrap().push(("second", change.clone())));

        let doctor = store.add_doctor(new_doctor("A"));
        assert!(store.unsubscribe(second));
        store.delete_doctor(&doctor.id);
        store.delete_doctor("missing");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].0, "second");
        assert_eq!(seen[0].1.kind, ChangeKind::Added);
        assert_eq!(seen[2].1.kind, ChangeKind::Deleted);
        assert_eq!(seen[2].1.version, 2);
    }

    #[test]
    fn test_subscriber_reads_published_collections() {
        let mut store = ClinicStore::with_data(IdStrategy::Sequential, demo_data());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        store.subscribe(move |change, snapshot| {
            log.lock()
                .unwrap()
                .push((change.version, snapshot.version, snapshot.doctors.len()));
        });

        store.add_doctor(new_doctor("Dr. Paula Reis"));
        store.delete_doctor("1");

        assert_eq!(*seen.lock().unwrap(), vec![(1, 1, 3), (2, 2, 2)]);
    }

    #[test]
    fn test_add_appointment_keeps_given_names() {
        let mut store = ClinicStore::default();
        let appointment = store.add_appointment(NewAppointment {
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            patient_id: "ghost".into(),
            patient_name: "Sem Cadastro".into(),
            doctor_id: "ghost".into(),
            doctor_name: "Dr. Ninguém".into(),
            specialty: "Tricologia".into(),
            status: AppointmentStatus::Scheduled,
        });

        assert_eq!(appointment.id, "1");
        assert_eq!(store.appointment("1"), Some(&appointment));
    }
}
