#![no_std]

pub mod events;
mod examination;
mod medicine;
mod patient;
mod prescription;
mod referral;
mod reports;
mod types;
mod validation;

#[cfg(test)]
mod test;

use common::codes;
use common::roles::{self, Role};
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use reports::{DiagnosisCount, MedicineUsage, OverviewStats};
pub use types::{
    Examination, ExaminationInput, Gender, Medicine, MedicineInput, MedicineUpdate, Patient,
    PatientInput, PatientStatus, Prescription, PrescriptionInput, Referral, ReferralInput,
    ReferralStatus,
};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Display-code prefixes, one sequence per entity class.
const SEQ_PATIENT: u8 = b'P';
const SEQ_EXAMINATION: u8 = b'E';
const SEQ_REFERRAL: u8 = b'R';
const SEQ_MEDICINE: u8 = b'M';
/// Prescriptions carry no display code but draw ids from their own sequence.
pub(crate) const SEQ_PRESCRIPTION: u8 = b'X';

const STAFF: [Role; 3] = [Role::Admin, Role::Doctor, Role::Pharmacist];
const CLINICIANS: [Role; 2] = [Role::Admin, Role::Doctor];
const INVENTORY: [Role; 2] = [Role::Admin, Role::Pharmacist];

/// Contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    PatientNotFound = 5,
    MedicineNotFound = 6,
    ExaminationNotFound = 7,
    ReferralNotFound = 8,
    PrescriptionNotFound = 9,
    DuplicateNik = 10,
    MedicineInUse = 11,
    AlreadyRegistered = 12,
}

#[contract]
pub struct ClinicRecordsContract;

fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

/// Authenticates the caller and checks role membership in one step.
fn require_role(env: &Env, caller: &Address, allowed: &[Role]) -> Result<(), ContractError> {
    require_initialized(env)?;
    caller.require_auth();
    if roles::has_any_role(env, caller, allowed) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}

/// Read guard: staff may read anything; a patient may read records owned by
/// the patient row linked to their account.
fn require_read_access(
    env: &Env,
    caller: &Address,
    owner_patient_id: u64,
) -> Result<(), ContractError> {
    require_initialized(env)?;
    caller.require_auth();
    if roles::has_any_role(env, caller, &STAFF) {
        return Ok(());
    }
    match patient::id_by_account(env, caller) {
        Some(own_id) if own_id == owner_patient_id => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}

fn page(ids: &Vec<u64>, offset: u32, limit: u32) -> (u32, u32) {
    let end = core::cmp::min(offset.saturating_add(limit), ids.len());
    (core::cmp::min(offset, end), end)
}

#[contractimpl]
impl ClinicRecordsContract {
    /// Initialize the contract with an admin address.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        roles::set_role(&env, &admin, Role::Admin);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address.
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Assign a role to an address. Admin only.
    pub fn set_role(
        env: Env,
        caller: Address,
        user: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        roles::set_role(&env, &user, role);
        events::publish_role_assigned(&env, user, role);
        Ok(())
    }

    pub fn get_role(env: Env, user: Address) -> Option<Role> {
        roles::role_of(&env, &user)
    }

    // ── Patients ──────────────────────────────────────────────────────

    /// Register a patient record on someone's behalf. Admin or doctor.
    pub fn add_patient(
        env: Env,
        caller: Address,
        input: PatientInput,
    ) -> Result<Patient, ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        validation::validate_patient(&input)?;
        if patient::id_by_nik(&env, &input.nik).is_some() {
            return Err(ContractError::DuplicateNik);
        }

        let record = store_patient(&env, input, None);
        Ok(record)
    }

    /// Self-service registration: creates a patient record linked to the
    /// caller's address and assigns the `Patient` role.
    pub fn register_patient(
        env: Env,
        caller: Address,
        input: PatientInput,
    ) -> Result<Patient, ContractError> {
        require_initialized(&env)?;
        caller.require_auth();
        validation::validate_patient(&input)?;
        if patient::id_by_nik(&env, &input.nik).is_some() {
            return Err(ContractError::DuplicateNik);
        }
        if patient::id_by_account(&env, &caller).is_some() {
            return Err(ContractError::AlreadyRegistered);
        }

        let record = store_patient(&env, input, Some(caller.clone()));
        patient::link_account(&env, &caller, record.id);
        if roles::role_of(&env, &caller).is_none() {
            roles::set_role(&env, &caller, Role::Patient);
        }
        Ok(record)
    }

    /// Fetch a patient. Staff, or the patient's own linked account.
    pub fn get_patient(env: Env, caller: Address, id: u64) -> Result<Patient, ContractError> {
        require_read_access(&env, &caller, id)?;
        patient::get(&env, id).ok_or(ContractError::PatientNotFound)
    }

    /// Point lookup by national id number. Staff only.
    pub fn get_patient_by_nik(
        env: Env,
        caller: Address,
        nik: String,
    ) -> Result<Patient, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        let id = patient::id_by_nik(&env, &nik).ok_or(ContractError::PatientNotFound)?;
        patient::get(&env, id).ok_or(ContractError::PatientNotFound)
    }

    /// Page through patients in creation order. Staff only.
    pub fn list_patients(
        env: Env,
        caller: Address,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Patient>, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        let ids = patient::ids(&env);
        let (start, end) = page(&ids, offset, limit);
        let mut out = Vec::new(&env);
        for pos in start..end {
            if let Some(p) = patient::get(&env, ids.get_unchecked(pos)) {
                out.push_back(p);
            }
        }
        Ok(out)
    }

    /// Update a patient's fields. The display code, linked account and
    /// creation time never change.
    pub fn update_patient(
        env: Env,
        caller: Address,
        id: u64,
        input: PatientInput,
    ) -> Result<Patient, ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        validation::validate_patient(&input)?;
        let existing = patient::get(&env, id).ok_or(ContractError::PatientNotFound)?;

        if input.nik != existing.nik {
            if patient::id_by_nik(&env, &input.nik).is_some() {
                return Err(ContractError::DuplicateNik);
            }
            patient::release_nik(&env, &existing.nik);
            patient::claim_nik(&env, &input.nik, id);
        }

        let updated = Patient {
            id,
            code: existing.code,
            nik: input.nik,
            name: input.name,
            gender: input.gender,
            birth_date: input.birth_date,
            address: input.address,
            phone: input.phone,
            status: input.status,
            account: existing.account,
            created_at: existing.created_at,
        };
        patient::set(&env, &updated);
        events::publish_patient_updated(&env, id);
        Ok(updated)
    }

    /// Delete a patient and cascade to their examinations (restoring any
    /// prescribed stock) and referrals.
    pub fn remove_patient(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        let existing = patient::get(&env, id).ok_or(ContractError::PatientNotFound)?;

        for exam_id in examination::for_patient(&env, id).iter() {
            prescription::release(&env, exam_id)?;
            examination::remove(&env, exam_id);
            examination::untrack(&env, exam_id);
        }
        examination::clear_for_patient(&env, id);

        for referral_id in referral::for_patient(&env, id).iter() {
            referral::remove(&env, referral_id);
            referral::untrack(&env, referral_id);
        }
        referral::clear_for_patient(&env, id);

        patient::release_nik(&env, &existing.nik);
        if let Some(account) = existing.account {
            patient::unlink_account(&env, &account);
        }
        patient::untrack(&env, id);
        patient::remove(&env, id);
        events::publish_patient_removed(&env, id);
        Ok(())
    }

    // ── Medicines ─────────────────────────────────────────────────────

    /// Add an inventory item with its opening stock. Admin or pharmacist.
    pub fn add_medicine(
        env: Env,
        caller: Address,
        input: MedicineInput,
    ) -> Result<Medicine, ContractError> {
        require_role(&env, &caller, &INVENTORY)?;
        validation::validate_medicine(&input)?;

        let id = codes::next_id(&env, SEQ_MEDICINE);
        let record = Medicine {
            id,
            code: codes::render_code(&env, SEQ_MEDICINE, id),
            name: input.name,
            category: input.category,
            unit: input.unit,
            stock: input.stock,
            expiry_date: input.expiry_date,
            supplier: input.supplier,
            created_at: env.ledger().timestamp(),
        };
        medicine::set(&env, &record);
        medicine::track(&env, id);
        events::publish_medicine_added(&env, id, record.code.clone());
        Ok(record)
    }

    pub fn get_medicine(env: Env, caller: Address, id: u64) -> Result<Medicine, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        medicine::get(&env, id).ok_or(ContractError::MedicineNotFound)
    }

    pub fn list_medicines(
        env: Env,
        caller: Address,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Medicine>, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        let ids = medicine::ids(&env);
        let (start, end) = page(&ids, offset, limit);
        let mut out = Vec::new(&env);
        for pos in start..end {
            if let Some(m) = medicine::get(&env, ids.get_unchecked(pos)) {
                out.push_back(m);
            }
        }
        Ok(out)
    }

    /// Update a medicine's descriptive fields. Stock is deliberately not
    /// part of the payload: it belongs to the reconciliation engine.
    pub fn update_medicine(
        env: Env,
        caller: Address,
        id: u64,
        input: MedicineUpdate,
    ) -> Result<Medicine, ContractError> {
        require_role(&env, &caller, &INVENTORY)?;
        validation::validate_medicine_update(&input)?;
        let existing = medicine::get(&env, id).ok_or(ContractError::MedicineNotFound)?;

        let updated = Medicine {
            id,
            code: existing.code,
            name: input.name,
            category: input.category,
            unit: input.unit,
            stock: existing.stock,
            expiry_date: input.expiry_date,
            supplier: input.supplier,
            created_at: existing.created_at,
        };
        medicine::set(&env, &updated);
        events::publish_medicine_updated(&env, id);
        Ok(updated)
    }

    /// Delete a medicine. Refused while any live prescription references it.
    pub fn remove_medicine(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        require_role(&env, &caller, &INVENTORY)?;
        if medicine::get(&env, id).is_none() {
            return Err(ContractError::MedicineNotFound);
        }
        if medicine::prescription_refs(&env, id) > 0 {
            return Err(ContractError::MedicineInUse);
        }
        medicine::untrack(&env, id);
        medicine::remove(&env, id);
        events::publish_medicine_removed(&env, id);
        Ok(())
    }

    /// Number of live prescriptions referencing a medicine. Staff only.
    pub fn medicine_prescription_count(
        env: Env,
        caller: Address,
        id: u64,
    ) -> Result<u32, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        if medicine::get(&env, id).is_none() {
            return Err(ContractError::MedicineNotFound);
        }
        Ok(medicine::prescription_refs(&env, id))
    }

    // ── Examinations ──────────────────────────────────────────────────

    /// Record a clinical encounter together with its prescriptions. Each
    /// prescribed quantity is deducted from the medicine's stock in the
    /// same invocation.
    pub fn add_examination(
        env: Env,
        caller: Address,
        input: ExaminationInput,
        prescriptions: Vec<PrescriptionInput>,
    ) -> Result<Examination, ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        validation::validate_examination(&input)?;
        validation::validate_prescriptions(&prescriptions)?;
        if patient::get(&env, input.patient_id).is_none() {
            return Err(ContractError::PatientNotFound);
        }

        let id = codes::next_id(&env, SEQ_EXAMINATION);
        let record = Examination {
            id,
            code: codes::render_code(&env, SEQ_EXAMINATION, id),
            patient_id: input.patient_id,
            complaint: input.complaint,
            diagnosis: input.diagnosis,
            treatment: input.treatment,
            doctor: input.doctor,
            examination_date: input.examination_date,
            created_at: env.ledger().timestamp(),
        };
        examination::set(&env, &record);
        examination::track(&env, id);
        examination::track_for_patient(&env, record.patient_id, id);
        prescription::issue(&env, id, &prescriptions)?;
        events::publish_examination_added(&env, id, record.code.clone());
        Ok(record)
    }

    /// Fetch an examination. Staff, or the owning patient's account.
    pub fn get_examination(
        env: Env,
        caller: Address,
        id: u64,
    ) -> Result<Examination, ContractError> {
        let record = examination::get(&env, id).ok_or(ContractError::ExaminationNotFound)?;
        require_read_access(&env, &caller, record.patient_id)?;
        Ok(record)
    }

    /// The prescription rows attached to an examination.
    pub fn examination_prescriptions(
        env: Env,
        caller: Address,
        id: u64,
    ) -> Result<Vec<Prescription>, ContractError> {
        let record = examination::get(&env, id).ok_or(ContractError::ExaminationNotFound)?;
        require_read_access(&env, &caller, record.patient_id)?;
        let mut out = Vec::new(&env);
        for rx_id in prescription::for_examination(&env, id).iter() {
            if let Some(rx) = prescription::get(&env, rx_id) {
                out.push_back(rx);
            }
        }
        Ok(out)
    }

    pub fn list_examinations(
        env: Env,
        caller: Address,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Examination>, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        let ids = examination::ids(&env);
        let (start, end) = page(&ids, offset, limit);
        let mut out = Vec::new(&env);
        for pos in start..end {
            if let Some(e) = examination::get(&env, ids.get_unchecked(pos)) {
                out.push_back(e);
            }
        }
        Ok(out)
    }

    /// A patient's examinations, oldest first. Staff or the patient.
    pub fn patient_examinations(
        env: Env,
        caller: Address,
        patient_id: u64,
    ) -> Result<Vec<Examination>, ContractError> {
        require_read_access(&env, &caller, patient_id)?;
        if patient::get(&env, patient_id).is_none() {
            return Err(ContractError::PatientNotFound);
        }
        let mut out = Vec::new(&env);
        for id in examination::for_patient(&env, patient_id).iter() {
            if let Some(e) = examination::get(&env, id) {
                out.push_back(e);
            }
        }
        Ok(out)
    }

    /// Update an examination and reconcile its prescription set against the
    /// desired list, adjusting medicine stock accordingly.
    pub fn update_examination(
        env: Env,
        caller: Address,
        id: u64,
        input: ExaminationInput,
        prescriptions: Vec<PrescriptionInput>,
    ) -> Result<Examination, ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        validation::validate_examination(&input)?;
        validation::validate_prescriptions(&prescriptions)?;
        let existing = examination::get(&env, id).ok_or(ContractError::ExaminationNotFound)?;
        if patient::get(&env, input.patient_id).is_none() {
            return Err(ContractError::PatientNotFound);
        }

        if input.patient_id != existing.patient_id {
            examination::untrack_for_patient(&env, existing.patient_id, id);
            examination::track_for_patient(&env, input.patient_id, id);
        }

        let updated = Examination {
            id,
            code: existing.code,
            patient_id: input.patient_id,
            complaint: input.complaint,
            diagnosis: input.diagnosis,
            treatment: input.treatment,
            doctor: input.doctor,
            examination_date: input.examination_date,
            created_at: existing.created_at,
        };
        examination::set(&env, &updated);
        prescription::reconcile(&env, id, &prescriptions)?;
        events::publish_examination_updated(&env, id);
        Ok(updated)
    }

    /// Delete an examination, restoring every prescribed quantity to its
    /// medicine before the rows go.
    pub fn remove_examination(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        let existing = examination::get(&env, id).ok_or(ContractError::ExaminationNotFound)?;

        prescription::release(&env, id)?;
        examination::untrack_for_patient(&env, existing.patient_id, id);
        examination::untrack(&env, id);
        examination::remove(&env, id);
        events::publish_examination_removed(&env, id);
        Ok(())
    }

    // ── Referrals ─────────────────────────────────────────────────────

    /// Record a referral to another facility. Admin or doctor.
    pub fn add_referral(
        env: Env,
        caller: Address,
        input: ReferralInput,
    ) -> Result<Referral, ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        validation::validate_referral(&input)?;
        if patient::get(&env, input.patient_id).is_none() {
            return Err(ContractError::PatientNotFound);
        }

        let id = codes::next_id(&env, SEQ_REFERRAL);
        let record = Referral {
            id,
            code: codes::render_code(&env, SEQ_REFERRAL, id),
            patient_id: input.patient_id,
            diagnosis: input.diagnosis,
            referred_to: input.referred_to,
            reason: input.reason,
            status: input.status,
            doctor: input.doctor,
            referral_date: input.referral_date,
            created_at: env.ledger().timestamp(),
        };
        referral::set(&env, &record);
        referral::track(&env, id);
        referral::track_for_patient(&env, record.patient_id, id);
        events::publish_referral_added(&env, id, record.code.clone());
        Ok(record)
    }

    pub fn get_referral(env: Env, caller: Address, id: u64) -> Result<Referral, ContractError> {
        let record = referral::get(&env, id).ok_or(ContractError::ReferralNotFound)?;
        require_read_access(&env, &caller, record.patient_id)?;
        Ok(record)
    }

    pub fn list_referrals(
        env: Env,
        caller: Address,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Referral>, ContractError> {
        require_role(&env, &caller, &STAFF)?;
        let ids = referral::ids(&env);
        let (start, end) = page(&ids, offset, limit);
        let mut out = Vec::new(&env);
        for pos in start..end {
            if let Some(r) = referral::get(&env, ids.get_unchecked(pos)) {
                out.push_back(r);
            }
        }
        Ok(out)
    }

    pub fn patient_referrals(
        env: Env,
        caller: Address,
        patient_id: u64,
    ) -> Result<Vec<Referral>, ContractError> {
        require_read_access(&env, &caller, patient_id)?;
        if patient::get(&env, patient_id).is_none() {
            return Err(ContractError::PatientNotFound);
        }
        let mut out = Vec::new(&env);
        for id in referral::for_patient(&env, patient_id).iter() {
            if let Some(r) = referral::get(&env, id) {
                out.push_back(r);
            }
        }
        Ok(out)
    }

    pub fn update_referral(
        env: Env,
        caller: Address,
        id: u64,
        input: ReferralInput,
    ) -> Result<Referral, ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        validation::validate_referral(&input)?;
        let existing = referral::get(&env, id).ok_or(ContractError::ReferralNotFound)?;
        if patient::get(&env, input.patient_id).is_none() {
            return Err(ContractError::PatientNotFound);
        }

        if input.patient_id != existing.patient_id {
            referral::untrack_for_patient(&env, existing.patient_id, id);
            referral::track_for_patient(&env, input.patient_id, id);
        }

        let updated = Referral {
            id,
            code: existing.code,
            patient_id: input.patient_id,
            diagnosis: input.diagnosis,
            referred_to: input.referred_to,
            reason: input.reason,
            status: input.status,
            doctor: input.doctor,
            referral_date: input.referral_date,
            created_at: existing.created_at,
        };
        referral::set(&env, &updated);
        events::publish_referral_updated(&env, id);
        Ok(updated)
    }

    pub fn remove_referral(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        require_role(&env, &caller, &CLINICIANS)?;
        let existing = referral::get(&env, id).ok_or(ContractError::ReferralNotFound)?;

        referral::untrack_for_patient(&env, existing.patient_id, id);
        referral::untrack(&env, id);
        referral::remove(&env, id);
        events::publish_referral_removed(&env, id);
        Ok(())
    }

    // ── Reports ───────────────────────────────────────────────────────

    /// Headline statistics for a reporting period. Admin only.
    pub fn report_overview(
        env: Env,
        caller: Address,
        period_start: u64,
        period_end: u64,
        low_stock_below: i64,
    ) -> Result<OverviewStats, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::overview(&env, period_start, period_end, low_stock_below))
    }

    pub fn patients_registered_between(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<u32, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::patients_between(&env, start, end))
    }

    pub fn examinations_between(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<u32, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::examinations_between(&env, start, end))
    }

    pub fn referrals_between(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<u32, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::referrals_between(&env, start, end))
    }

    pub fn prescriptions_between(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<u32, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::prescriptions_between(&env, start, end))
    }

    /// Most-prescribed medicines, descending. Admin only.
    pub fn top_medicines(
        env: Env,
        caller: Address,
        limit: u32,
    ) -> Result<Vec<MedicineUsage>, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::top_medicines(&env, limit))
    }

    /// Examinations grouped by diagnosis, descending. Admin only.
    pub fn diagnosis_distribution(
        env: Env,
        caller: Address,
        limit: u32,
    ) -> Result<Vec<DiagnosisCount>, ContractError> {
        require_role(&env, &caller, &[Role::Admin])?;
        Ok(reports::diagnosis_distribution(&env, limit))
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}

/// Allocates the id and display code, writes the row and index entries, and
/// publishes the creation event. Shared by both registration paths.
fn store_patient(env: &Env, input: PatientInput, account: Option<Address>) -> Patient {
    let id = codes::next_id(env, SEQ_PATIENT);
    let record = Patient {
        id,
        code: codes::render_code(env, SEQ_PATIENT, id),
        nik: input.nik,
        name: input.name,
        gender: input.gender,
        birth_date: input.birth_date,
        address: input.address,
        phone: input.phone,
        status: input.status,
        account,
        created_at: env.ledger().timestamp(),
    };
    patient::set(env, &record);
    patient::claim_nik(env, &record.nik, id);
    patient::track(env, id);
    events::publish_patient_added(env, id, record.code.clone());
    record
}
