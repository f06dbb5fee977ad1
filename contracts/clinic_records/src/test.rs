#![cfg(test)]

extern crate std;

use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{vec, Address, Env, String, Vec};

use crate::*;
use common::roles::Role;

fn setup(env: &Env) -> (ClinicRecordsContractClient<'_>, Address, Address, Address) {
    env.mock_all_auths();
    let contract_id = env.register(ClinicRecordsContract, ());
    let client = ClinicRecordsContractClient::new(env, &contract_id);

    let admin = Address::generate(env);
    client.initialize(&admin);

    let doctor = Address::generate(env);
    let pharmacist = Address::generate(env);
    client.set_role(&admin, &doctor, &Role::Doctor);
    client.set_role(&admin, &pharmacist, &Role::Pharmacist);

    (client, admin, doctor, pharmacist)
}

fn patient_input(env: &Env, nik: &str, name: &str) -> PatientInput {
    PatientInput {
        nik: String::from_str(env, nik),
        name: String::from_str(env, name),
        gender: Gender::Female,
        birth_date: 631_152_000,
        address: String::from_str(env, "Jl. Melati 12, Bandung"),
        phone: String::from_str(env, "+6281234567"),
        status: PatientStatus::Active,
    }
}

fn medicine_input(env: &Env, name: &str, stock: i64) -> MedicineInput {
    MedicineInput {
        name: String::from_str(env, name),
        category: String::from_str(env, "Analgesic"),
        unit: String::from_str(env, "tablet"),
        stock,
        expiry_date: 1_893_456_000,
        supplier: String::from_str(env, "PT Kimia Sehat"),
    }
}

fn exam_input(env: &Env, patient_id: u64, diagnosis: &str, date: u64) -> ExaminationInput {
    ExaminationInput {
        patient_id,
        complaint: String::from_str(env, "Headache for three days"),
        diagnosis: String::from_str(env, diagnosis),
        treatment: String::from_str(env, "Rest and medication"),
        doctor: String::from_str(env, "Dr. Sari"),
        examination_date: date,
    }
}

fn rx(env: &Env, id: Option<u64>, medicine_id: u64, quantity: u32) -> PrescriptionInput {
    PrescriptionInput {
        id,
        medicine_id,
        dosage: String::from_str(env, "3x1 after meals"),
        quantity,
        instructions: String::from_str(env, "Finish the course"),
    }
}

fn referral_input(env: &Env, patient_id: u64, date: u64) -> ReferralInput {
    ReferralInput {
        patient_id,
        diagnosis: String::from_str(env, "Suspected appendicitis"),
        referred_to: String::from_str(env, "RSUD Kota"),
        reason: String::from_str(env, "Needs surgical assessment"),
        status: ReferralStatus::Pending,
        doctor: String::from_str(env, "Dr. Sari"),
        referral_date: date,
    }
}

#[test]
fn test_initialize() {
    let env = Env::default();
    let (client, admin, _, _) = setup(&env);

    assert!(client.is_initialized());
    assert_eq!(client.get_admin(), admin);
    assert_eq!(client.get_role(&admin), Some(Role::Admin));
    assert_eq!(client.version(), 1);
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let (client, _, _, _) = setup(&env);

    let other = Address::generate(&env);
    assert_eq!(
        client.try_initialize(&other),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_sequential_codes_per_entity_class() {
    let env = Env::default();
    let (client, admin, doctor, pharmacist) = setup(&env);

    let p1 = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let p2 = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));
    let p3 = client.add_patient(&doctor, &patient_input(&env, "32010112029003", "Citra"));
    assert_eq!(p1.code, String::from_str(&env, "P001"));
    assert_eq!(p2.code, String::from_str(&env, "P002"));
    assert_eq!(p3.code, String::from_str(&env, "P003"));

    // Each class draws from its own counter.
    let m1 = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 100));
    assert_eq!(m1.code, String::from_str(&env, "M001"));

    let e1 = client.add_examination(
        &doctor,
        &exam_input(&env, p1.id, "Migraine", 1_700_000_000),
        &Vec::new(&env),
    );
    assert_eq!(e1.code, String::from_str(&env, "E001"));

    let r1 = client.add_referral(&admin, &referral_input(&env, p2.id, 1_700_000_000));
    assert_eq!(r1.code, String::from_str(&env, "R001"));
}

#[test]
fn test_deleted_codes_are_never_reissued() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let p2 = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));
    client.remove_patient(&doctor, &p2.id);

    let p3 = client.add_patient(&doctor, &patient_input(&env, "32010112029003", "Citra"));
    assert_eq!(p3.code, String::from_str(&env, "P003"));
}

#[test]
fn test_duplicate_nik_rejected_until_released() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    let p1 = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    assert_eq!(
        client.try_add_patient(&doctor, &patient_input(&env, "32010112029001", "Budi")),
        Err(Ok(ContractError::DuplicateNik))
    );

    let p2 = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));
    assert_eq!(
        client.try_update_patient(
            &doctor,
            &p2.id,
            &patient_input(&env, "32010112029001", "Budi")
        ),
        Err(Ok(ContractError::DuplicateNik))
    );

    // Deleting the holder frees the number.
    client.remove_patient(&doctor, &p1.id);
    client.update_patient(&doctor, &p2.id, &patient_input(&env, "32010112029001", "Budi"));
    assert_eq!(
        client.get_patient_by_nik(&doctor, &String::from_str(&env, "32010112029001")).id,
        p2.id
    );
}

#[test]
fn test_update_patient_keeps_code_and_created_at() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    env.ledger().with_mut(|l| l.timestamp = 1_000);
    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));

    env.ledger().with_mut(|l| l.timestamp = 2_000);
    let updated =
        client.update_patient(&doctor, &p.id, &patient_input(&env, "32010112029009", "Ani W."));

    assert_eq!(updated.code, p.code);
    assert_eq!(updated.created_at, 1_000);
    assert_eq!(updated.name, String::from_str(&env, "Ani W."));
    assert_eq!(updated.nik, String::from_str(&env, "32010112029009"));
}

#[test]
fn test_examination_deducts_and_lists_prescriptions() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 100));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 10), rx(&env, None, m.id, 5)],
    );

    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 85);
    // Two rows for the same medicine stay independent entries.
    let rows = client.examination_prescriptions(&doctor, &exam.id);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.get_unchecked(0).quantity, 10);
    assert_eq!(rows.get_unchecked(1).quantity, 5);
    assert_eq!(client.medicine_prescription_count(&doctor, &m.id), 2);
}

#[test]
fn test_requantify_restores_then_deducts() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 10));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 5)],
    );
    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 5);

    let rx_id = client
        .examination_prescriptions(&doctor, &exam.id)
        .get_unchecked(0)
        .id;
    client.update_examination(
        &doctor,
        &exam.id,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, Some(rx_id), m.id, 3)],
    );

    // 5 back, 3 out: net +2.
    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 7);
    let rows = client.examination_prescriptions(&doctor, &exam.id);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.get_unchecked(0).id, rx_id);
    assert_eq!(rows.get_unchecked(0).quantity, 3);
}

#[test]
fn test_medicine_swap_restores_old_and_deducts_new() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m1 = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 20));
    let m2 = client.add_medicine(&pharmacist, &medicine_input(&env, "Ibuprofen", 20));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m1.id, 8)],
    );
    assert_eq!(client.get_medicine(&doctor, &m1.id).stock, 12);

    let rx_id = client
        .examination_prescriptions(&doctor, &exam.id)
        .get_unchecked(0)
        .id;
    client.update_examination(
        &doctor,
        &exam.id,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, Some(rx_id), m2.id, 6)],
    );

    // The old quantity goes back to the medicine the row used to name.
    assert_eq!(client.get_medicine(&doctor, &m1.id).stock, 20);
    assert_eq!(client.get_medicine(&doctor, &m2.id).stock, 14);
    assert_eq!(client.medicine_prescription_count(&doctor, &m1.id), 0);
    assert_eq!(client.medicine_prescription_count(&doctor, &m2.id), 1);
}

#[test]
fn test_reconcile_adds_and_drops_rows() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m1 = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 50));
    let m2 = client.add_medicine(&pharmacist, &medicine_input(&env, "Amoxicillin", 50));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Infection", 1_700_000_000),
        &vec![&env, rx(&env, None, m1.id, 10), rx(&env, None, m2.id, 15)],
    );
    let rows = client.examination_prescriptions(&doctor, &exam.id);
    let keep_id = rows.get_unchecked(0).id;

    // Keep the first row as-is, drop the second, add a fresh one.
    client.update_examination(
        &doctor,
        &exam.id,
        &exam_input(&env, p.id, "Infection", 1_700_000_000),
        &vec![
            &env,
            rx(&env, Some(keep_id), m1.id, 10),
            rx(&env, None, m2.id, 4),
        ],
    );

    assert_eq!(client.get_medicine(&doctor, &m1.id).stock, 40);
    // 15 restored, 4 deducted for the new row.
    assert_eq!(client.get_medicine(&doctor, &m2.id).stock, 46);

    let rows = client.examination_prescriptions(&doctor, &exam.id);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.get_unchecked(0).id, keep_id);
    assert_ne!(rows.get_unchecked(1).id, keep_id);
}

#[test]
fn test_unknown_prescription_id_is_treated_as_new() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 30));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &Vec::new(&env),
    );

    // An id that matches none of this examination's rows creates a row.
    client.update_examination(
        &doctor,
        &exam.id,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, Some(9999), m.id, 6)],
    );

    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 24);
    let rows = client.examination_prescriptions(&doctor, &exam.id);
    assert_eq!(rows.len(), 1);
    assert_ne!(rows.get_unchecked(0).id, 9999);
}

#[test]
fn test_remove_examination_restores_stock() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 40));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 12), rx(&env, None, m.id, 3)],
    );
    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 25);

    client.remove_examination(&doctor, &exam.id);
    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 40);
    assert_eq!(client.medicine_prescription_count(&doctor, &m.id), 0);
    assert_eq!(
        client.try_get_examination(&doctor, &exam.id),
        Err(Ok(ContractError::ExaminationNotFound))
    );
}

#[test]
fn test_over_prescription_drives_stock_negative() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 5));

    client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 8)],
    );

    assert_eq!(client.get_medicine(&doctor, &m.id).stock, -3);
}

#[test]
fn test_medicine_delete_refused_while_prescribed() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 50));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 5)],
    );

    assert_eq!(
        client.try_remove_medicine(&pharmacist, &m.id),
        Err(Ok(ContractError::MedicineInUse))
    );

    client.remove_examination(&doctor, &exam.id);
    client.remove_medicine(&pharmacist, &m.id);
    assert_eq!(
        client.try_get_medicine(&pharmacist, &m.id),
        Err(Ok(ContractError::MedicineNotFound))
    );
}

#[test]
fn test_update_medicine_preserves_stock_and_code() {
    let env = Env::default();
    let (client, _, _, pharmacist) = setup(&env);

    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 77));
    let updated = client.update_medicine(
        &pharmacist,
        &m.id,
        &MedicineUpdate {
            name: String::from_str(&env, "Paracetamol 500mg"),
            category: String::from_str(&env, "Analgesic"),
            unit: String::from_str(&env, "strip"),
            expiry_date: 1_900_000_000,
            supplier: String::from_str(&env, "PT Kimia Sehat"),
        },
    );

    assert_eq!(updated.stock, 77);
    assert_eq!(updated.code, m.code);
    assert_eq!(updated.name, String::from_str(&env, "Paracetamol 500mg"));
}

#[test]
fn test_remove_patient_cascades() {
    let env = Env::default();
    let (client, admin, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 60));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 20)],
    );
    let referral = client.add_referral(&admin, &referral_input(&env, p.id, 1_700_000_000));
    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 40);

    client.remove_patient(&doctor, &p.id);

    assert_eq!(
        client.try_get_patient(&doctor, &p.id),
        Err(Ok(ContractError::PatientNotFound))
    );
    assert_eq!(
        client.try_get_examination(&doctor, &exam.id),
        Err(Ok(ContractError::ExaminationNotFound))
    );
    assert_eq!(
        client.try_get_referral(&doctor, &referral.id),
        Err(Ok(ContractError::ReferralNotFound))
    );
    // Prescribed stock came back with the cascade.
    assert_eq!(client.get_medicine(&doctor, &m.id).stock, 60);
    assert_eq!(client.medicine_prescription_count(&doctor, &m.id), 0);
}

#[test]
fn test_referral_update_and_remove() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    let p1 = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let p2 = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));

    let r = client.add_referral(&doctor, &referral_input(&env, p1.id, 1_700_000_000));

    let mut moved = referral_input(&env, p2.id, 1_700_000_000);
    moved.status = ReferralStatus::Completed;
    let updated = client.update_referral(&doctor, &r.id, &moved);
    assert_eq!(updated.code, r.code);
    assert_eq!(updated.status, ReferralStatus::Completed);

    assert_eq!(client.patient_referrals(&doctor, &p1.id).len(), 0);
    assert_eq!(client.patient_referrals(&doctor, &p2.id).len(), 1);

    client.remove_referral(&doctor, &r.id);
    assert_eq!(client.patient_referrals(&doctor, &p2.id).len(), 0);
}

#[test]
fn test_role_gating() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));

    // Pharmacists manage inventory, not encounters.
    assert_eq!(
        client.try_add_examination(
            &pharmacist,
            &exam_input(&env, p.id, "Migraine", 1_700_000_000),
            &Vec::new(&env)
        ),
        Err(Ok(ContractError::Unauthorized))
    );

    // Doctors do not manage inventory.
    assert_eq!(
        client.try_add_medicine(&doctor, &medicine_input(&env, "Paracetamol", 10)),
        Err(Ok(ContractError::Unauthorized))
    );

    // Unassigned addresses get nothing.
    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_add_medicine(&stranger, &medicine_input(&env, "Paracetamol", 10)),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        client.try_list_patients(&stranger, &0, &10),
        Err(Ok(ContractError::Unauthorized))
    );

    // Reports are admin-only.
    assert_eq!(
        client.try_report_overview(&doctor, &0, &u64::MAX, &10),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_self_registration() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    let account = Address::generate(&env);
    let p = client.register_patient(&account, &patient_input(&env, "32010112029001", "Ani"));

    assert_eq!(client.get_role(&account), Some(Role::Patient));
    assert_eq!(p.account, Some(account.clone()));

    // The patient can read their own record but nobody else's.
    assert_eq!(client.get_patient(&account, &p.id).id, p.id);
    let other = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));
    assert_eq!(
        client.try_get_patient(&account, &other.id),
        Err(Ok(ContractError::Unauthorized))
    );

    // One linked record per account.
    assert_eq!(
        client.try_register_patient(&account, &patient_input(&env, "32010112029003", "Ani")),
        Err(Ok(ContractError::AlreadyRegistered))
    );
}

#[test]
fn test_self_registration_keeps_existing_staff_role() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    client.register_patient(&doctor, &patient_input(&env, "32010112029001", "Dr. Sari"));
    assert_eq!(client.get_role(&doctor), Some(Role::Doctor));
}

#[test]
fn test_patient_reads_own_examinations() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    let account = Address::generate(&env);
    let p = client.register_patient(&account, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 30));

    let exam = client.add_examination(
        &doctor,
        &exam_input(&env, p.id, "Migraine", 1_700_000_000),
        &vec![&env, rx(&env, None, m.id, 5)],
    );

    assert_eq!(client.patient_examinations(&account, &p.id).len(), 1);
    assert_eq!(client.examination_prescriptions(&account, &exam.id).len(), 1);

    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_get_examination(&stranger, &exam.id),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_list_patients_pagination() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    for i in 0..5u32 {
        let nik = std::format!("3201011202900{i}");
        client.add_patient(&doctor, &patient_input(&env, &nik, "Ani"));
    }

    let page = client.list_patients(&doctor, &1, &2);
    assert_eq!(page.len(), 2);
    assert_eq!(page.get_unchecked(0).id, 2);
    assert_eq!(page.get_unchecked(1).id, 3);

    // Offset past the end yields an empty page, not a panic.
    assert_eq!(client.list_patients(&doctor, &10, &2).len(), 0);
}

#[test]
fn test_reports() {
    let env = Env::default();
    let (client, admin, doctor, pharmacist) = setup(&env);

    let p1 = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let p2 = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));

    let m1 = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 100));
    let m2 = client.add_medicine(&pharmacist, &medicine_input(&env, "Amoxicillin", 3));

    // Two flu cases and one migraine, dated inside the window.
    client.add_examination(
        &doctor,
        &exam_input(&env, p1.id, "Influenza", 1_000),
        &vec![&env, rx(&env, None, m1.id, 10)],
    );
    client.add_examination(
        &doctor,
        &exam_input(&env, p2.id, "Influenza", 1_500),
        &vec![&env, rx(&env, None, m1.id, 5), rx(&env, None, m2.id, 2)],
    );
    client.add_examination(
        &doctor,
        &exam_input(&env, p1.id, "Migraine", 5_000),
        &Vec::new(&env),
    );

    client.add_referral(&doctor, &referral_input(&env, p2.id, 1_200));

    assert_eq!(client.examinations_between(&admin, &1_000, &2_000), 2);
    assert_eq!(client.referrals_between(&admin, &1_000, &2_000), 1);
    assert_eq!(client.prescriptions_between(&admin, &1_000, &2_000), 3);

    let stats = client.report_overview(&admin, &1_000, &2_000, &10);
    assert_eq!(stats.total_patients, 2);
    assert_eq!(stats.total_examinations, 3);
    assert_eq!(stats.examinations_in_period, 2);
    assert_eq!(stats.referrals_in_period, 1);
    assert_eq!(stats.total_medicines, 2);
    assert_eq!(stats.low_stock_medicines, 1);

    let top = client.top_medicines(&admin, &10);
    assert_eq!(top.len(), 2);
    assert_eq!(top.get_unchecked(0).medicine_id, m1.id);
    assert_eq!(top.get_unchecked(0).count, 2);
    assert_eq!(top.get_unchecked(1).medicine_id, m2.id);

    let diagnoses = client.diagnosis_distribution(&admin, &10);
    assert_eq!(diagnoses.len(), 2);
    assert_eq!(
        diagnoses.get_unchecked(0).diagnosis,
        String::from_str(&env, "Influenza")
    );
    assert_eq!(diagnoses.get_unchecked(0).count, 2);
}

#[test]
fn test_patients_registered_between_uses_ledger_time() {
    let env = Env::default();
    let (client, admin, doctor, _) = setup(&env);

    env.ledger().with_mut(|l| l.timestamp = 1_000);
    client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    env.ledger().with_mut(|l| l.timestamp = 3_000);
    client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));

    assert_eq!(client.patients_registered_between(&admin, &0, &2_000), 1);
    assert_eq!(client.patients_registered_between(&admin, &0, &4_000), 2);
    // Half-open window: the boundary timestamp falls outside.
    assert_eq!(client.patients_registered_between(&admin, &0, &3_000), 1);
}

#[test]
fn test_invalid_input_rejected_before_any_write() {
    let env = Env::default();
    let (client, _, doctor, pharmacist) = setup(&env);

    // Non-digit nik.
    assert_eq!(
        client.try_add_patient(&doctor, &patient_input(&env, "32x10112029001", "Ani")),
        Err(Ok(ContractError::InvalidInput))
    );

    // Negative opening stock.
    assert_eq!(
        client.try_add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", -1)),
        Err(Ok(ContractError::InvalidInput))
    );

    // Zero-quantity prescription.
    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    let m = client.add_medicine(&pharmacist, &medicine_input(&env, "Paracetamol", 10));
    assert_eq!(
        client.try_add_examination(
            &doctor,
            &exam_input(&env, p.id, "Migraine", 1_700_000_000),
            &vec![&env, rx(&env, None, m.id, 0)]
        ),
        Err(Ok(ContractError::InvalidInput))
    );

    // The failed calls above allocated nothing.
    let p2 = client.add_patient(&doctor, &patient_input(&env, "32010112029002", "Budi"));
    assert_eq!(p2.code, String::from_str(&env, "P002"));
}

#[test]
fn test_prescription_for_unknown_medicine_fails() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    let p = client.add_patient(&doctor, &patient_input(&env, "32010112029001", "Ani"));
    assert_eq!(
        client.try_add_examination(
            &doctor,
            &exam_input(&env, p.id, "Migraine", 1_700_000_000),
            &vec![&env, rx(&env, None, 42, 5)]
        ),
        Err(Ok(ContractError::MedicineNotFound))
    );
}

#[test]
fn test_examination_for_unknown_patient_fails() {
    let env = Env::default();
    let (client, _, doctor, _) = setup(&env);

    assert_eq!(
        client.try_add_examination(
            &doctor,
            &exam_input(&env, 42, "Migraine", 1_700_000_000),
            &Vec::new(&env)
        ),
        Err(Ok(ContractError::PatientNotFound))
    );
}
