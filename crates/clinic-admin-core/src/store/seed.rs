//! Demo data the clinic starts with.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{Appointment, AppointmentStatus, Doctor, Patient};

/// Collections loaded into a fresh store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedData {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
}

/// Two doctors, two patients and one scheduled appointment.
pub fn demo_data() -> SeedData {
    let doctors = vec![
        Doctor {
            id: "1".into(),
            code: "DR001".into(),
            name: "Dr. Ana Silva".into(),
            specialty: "Dermatologia Estética".into(),
            email: "ana.silva@clinica.com".into(),
            phone: "(11) 99999-0001".into(),
        },
        Doctor {
            id: "2".into(),
            code: "DR002".into(),
            name: "Dr. Carlos Mendes".into(),
            specialty: "Cirurgia Plástica".into(),
            email: "carlos.mendes@clinica.com".into(),
            phone: "(11) 99999-0002".into(),
        },
    ];

    let patients = vec![
        Patient {
            id: "1".into(),
            name: "Maria Santos".into(),
            email: "maria.santos@email.com".into(),
            phone: "(11) 98888-0001".into(),
            birth_date: ymd(1985, 5, 15),
        },
        Patient {
            id: "2".into(),
            name: "João Oliveira".into(),
            email: "joao.oliveira@email.com".into(),
            phone: "(11) 98888-0002".into(),
            birth_date: ymd(1978, 12, 3),
        },
    ];

    let appointments = vec![Appointment {
        id: "1".into(),
        date: ymd(2024, 6, 5),
        time: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or(NaiveTime::MIN),
        patient_id: "1".into(),
        patient_name: "Maria Santos".into(),
        doctor_id: "1".into(),
        doctor_name: "Dr. Ana Silva".into(),
        specialty: "Dermatologia Estética".into(),
        status: AppointmentStatus::Scheduled,
    }];

    SeedData {
        doctors,
        patients,
        appointments,
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
