//! End-to-end workflows across the store, views and report export.

use chrono::{NaiveDate, NaiveTime};
use clinic_admin_core::models::{
    AppointmentPatch, AppointmentStatus, NewAppointment, NewDoctor, StatusFilter,
};
use clinic_admin_core::store::{demo_data, ClinicStore, IdStrategy};
use clinic_admin_core::views::{
    AppointmentForm, AppointmentsView, DoctorForm, DoctorsView, ReportKind, ReportsView,
    ValidationError,
};

fn clinic() -> ClinicStore {
    ClinicStore::with_data(IdStrategy::Sequential, demo_data())
}

fn book(store: &mut ClinicStore, doctor_id: &str, patient_id: &str, status: AppointmentStatus) -> String {
    let doctor = store.doctor(doctor_id).cloned().expect("doctor");
    let patient = store.patient(patient_id).cloned().expect("patient");
    store
        .add_appointment(NewAppointment {
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            patient_id: patient.id,
            patient_name: patient.name,
            doctor_id: doctor.id,
            doctor_name: doctor.name,
            specialty: doctor.specialty,
            status,
        })
        .id
}

#[test]
fn test_add_doctor_increases_length_by_one() {
    let mut store = clinic();
    let input = NewDoctor {
        code: "DR003".into(),
        name: "Dr. Helena Prado".into(),
        specialty: "Medicina Estética".into(),
        email: "helena.prado@clinica.com".into(),
        phone: "(11) 99999-0003".into(),
    };

    let before = store.doctors().len();
    store.add_doctor(input.clone());
    let doctors = store.doctors();

    assert_eq!(doctors.len(), before + 1);
    let added = doctors.last().unwrap();
    assert_eq!(added.code, input.code);
    assert_eq!(added.name, input.name);
    assert_eq!(added.specialty, input.specialty);
    assert_eq!(added.email, input.email);
    assert_eq!(added.phone, input.phone);
}

#[test]
fn test_status_update_changes_only_status() {
    let mut store = clinic();
    let before = store.appointment("1").cloned().unwrap();

    assert!(store.update_appointment("1", &AppointmentPatch::status(AppointmentStatus::Completed)));
    let after = store.appointment("1").cloned().unwrap();

    assert_eq!(after.status, AppointmentStatus::Completed);
    assert_eq!(after.date, before.date);
    assert_eq!(after.time, before.time);
    assert_eq!(after.patient_name, before.patient_name);
    assert_eq!(after.doctor_id, before.doctor_id);
    assert_eq!(after.specialty, before.specialty);

    let snapshot = store.appointments();
    assert!(!store.update_appointment("nope", &AppointmentPatch::status(AppointmentStatus::Cancelled)));
    assert_eq!(*snapshot, *store.appointments());
}

#[test]
fn test_appointments_search_is_disjunctive() {
    let mut store = clinic();
    book(&mut store, "2", "2", AppointmentStatus::Scheduled);
    let mut view = AppointmentsView::default();

    view.search_term = "ana".into();
    let ids: Vec<_> = view.filtered(&store).into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["1"]);

    view.search_term = "ESTÉTICA".into();
    let ids: Vec<_> = view.filtered(&store).into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["1"]);

    view.search_term = "joão".into();
    let ids: Vec<_> = view.filtered(&store).into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["2"]);

    view.search_term = String::new();
    view.status_filter = StatusFilter::Only(AppointmentStatus::Completed);
    assert!(view.filtered(&store).is_empty());
}

#[test]
fn test_doctor_report_counts_and_success_rate() {
    let mut store = ClinicStore::with_data(IdStrategy::Sequential, demo_data());
    // Doctor A ("1") already has the scheduled demo appointment
    book(&mut store, "1", "1", AppointmentStatus::Completed);
    book(&mut store, "1", "2", AppointmentStatus::Completed);
    book(&mut store, "2", "2", AppointmentStatus::Cancelled);

    let rows = ReportsView::new(ReportKind::Doctor).doctor_rows(&store.snapshot());
    assert_eq!(rows.len(), 2);

    let a = &rows[0].counts;
    assert_eq!((a.total, a.completed, a.scheduled, a.cancelled), (3, 2, 1, 0));
    assert_eq!(a.success_rate(), 67);

    let b = &rows[1].counts;
    assert_eq!((b.total, b.cancelled), (1, 1));
    assert_eq!(b.success_rate(), 0);
}

#[test]
fn test_doctor_without_appointments_has_zero_row() {
    let mut store = clinic();
    store.add_doctor(NewDoctor {
        code: "DR003".into(),
        name: "Dr. Helena Prado".into(),
        specialty: "Medicina Estética".into(),
        email: "helena.prado@clinica.com".into(),
        phone: "(11) 99999-0003".into(),
    });

    let rows = ReportsView::default().doctor_rows(&store.snapshot());
    let helena = rows.iter().find(|r| r.doctor_name == "Dr. Helena Prado").unwrap();
    assert_eq!(helena.counts.total, 0);
    assert_eq!(helena.counts.success_rate(), 0);
}

#[test]
fn test_doctor_csv_export() -> anyhow::Result<()> {
    let mut store = clinic();
    book(&mut store, "1", "1", AppointmentStatus::Completed);
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

    let export = ReportsView::new(ReportKind::Doctor).export(&store.snapshot(), today);
    assert_eq!(export.metadata.file_name, "relatorio_doctor_2024-06-30.csv");

    let csv = export.to_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Médico,Especialidade,Total,Concluídas,Agendadas,Canceladas");
    assert_eq!(lines[1], "Dr. Ana Silva,Dermatologia Estética,2,1,1,0");
    assert_eq!(lines[2], "Dr. Carlos Mendes,Cirurgia Plástica,0,0,0,0");
    assert_eq!(lines.len(), 3);

    let json: serde_json::Value = serde_json::from_str(&export.to_json()?)?;
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_specialty_report_follows_copied_specialty() {
    let mut store = clinic();
    book(&mut store, "2", "1", AppointmentStatus::Completed);
    // Deleting the doctor leaves a dangling appointment that still counts by specialty
    store.delete_doctor("2");
    store.add_doctor(NewDoctor {
        code: "DR004".into(),
        name: "Dr. Otávio Reis".into(),
        specialty: "Cirurgia Plástica".into(),
        email: "otavio@clinica.com".into(),
        phone: "(11) 99999-0004".into(),
    });

    let view = ReportsView::new(ReportKind::Specialty);
    let snapshot = store.snapshot();
    let rows = view.specialty_rows(&snapshot);
    let surgery = rows.iter().find(|r| r.specialty == "Cirurgia Plástica").unwrap();
    assert_eq!(surgery.counts.completed, 1);

    let doctors = view.doctor_rows(&snapshot);
    let otavio = doctors.iter().find(|r| r.doctor_name == "Dr. Otávio Reis").unwrap();
    assert_eq!(otavio.counts.total, 0);
}

#[test]
fn test_rejected_booking_adds_nothing() {
    let mut store = clinic();
    let mut view = AppointmentsView::default();
    view.form = AppointmentForm {
        date: "2024-06-10".into(),
        time: "10:00".into(),
        patient_id: "1".into(),
        doctor_id: "404".into(),
        status: AppointmentStatus::Scheduled,
    };

    let result = view.schedule(&mut store);
    assert_eq!(result, Err(ValidationError::PatientOrDoctorNotFound));
    assert_eq!(store.appointments().len(), 1);
    // Form is kept so the user can fix it
    assert_eq!(view.form.doctor_id, "404");
}

#[test]
fn test_names_are_not_resynced_after_doctor_replaced() {
    let mut store = clinic();
    let mut doctors = DoctorsView::default();
    doctors.form = DoctorForm {
        code: "DR001".into(),
        name: "Dra. Ana Silva Costa".into(),
        specialty: "Dermatologia Estética".into(),
        email: "ana.costa@clinica.com".into(),
        phone: "(11) 99999-0001".into(),
    };
    doctors.register(&mut store).unwrap();
    doctors.delete(&mut store, "1", &mut |_: &str| true).unwrap();

    let appointment = store.appointment("1").unwrap();
    assert_eq!(appointment.doctor_name, "Dr. Ana Silva");
    assert!(store.doctor(&appointment.doctor_id).is_none());
}
