use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Gender {
    Male,
    Female,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatientStatus {
    Active,
    Inactive,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReferralStatus {
    Pending,
    Completed,
}

/// Patient identity record.
///
/// `code` is assigned once at creation by the sequence generator and is
/// immutable thereafter. `account` is set when the patient registered
/// themselves and links the record to their on-chain address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Patient {
    pub id: u64,
    pub code: String,
    pub nik: String,
    pub name: String,
    pub gender: Gender,
    pub birth_date: u64,
    pub address: String,
    pub phone: String,
    pub status: PatientStatus,
    pub account: Option<Address>,
    pub created_at: u64,
}

/// Field payload for patient creation and update.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientInput {
    pub nik: String,
    pub name: String,
    pub gender: Gender,
    pub birth_date: u64,
    pub address: String,
    pub phone: String,
    pub status: PatientStatus,
}

/// Inventory item. Stock is only ever written by the prescription
/// reconciliation engine after creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Medicine {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: i64,
    pub expiry_date: u64,
    pub supplier: String,
    pub created_at: u64,
}

/// Field payload for medicine creation. `stock` is the opening balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicineInput {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: i64,
    pub expiry_date: u64,
    pub supplier: String,
}

/// Field payload for medicine update. Deliberately carries no stock field:
/// stock belongs to the reconciliation engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicineUpdate {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub expiry_date: u64,
    pub supplier: String,
}

/// A clinical encounter. Owns zero or more prescriptions, which are
/// cascade-deleted (with stock restoration) when the examination goes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Examination {
    pub id: u64,
    pub code: String,
    pub patient_id: u64,
    pub complaint: String,
    pub diagnosis: String,
    pub treatment: String,
    pub doctor: String,
    pub examination_date: u64,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExaminationInput {
    pub patient_id: u64,
    pub complaint: String,
    pub diagnosis: String,
    pub treatment: String,
    pub doctor: String,
    pub examination_date: u64,
}

/// Join row binding one examination to one medicine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prescription {
    pub id: u64,
    pub examination_id: u64,
    pub medicine_id: u64,
    pub dosage: String,
    pub quantity: u32,
    pub instructions: String,
}

/// Desired prescription state submitted with an examination write.
///
/// `id` is `None` for a new row. On update, an id matching one of the
/// examination's persisted rows overwrites that row; anything else is
/// treated as new.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionInput {
    pub id: Option<u64>,
    pub medicine_id: u64,
    pub dosage: String,
    pub quantity: u32,
    pub instructions: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Referral {
    pub id: u64,
    pub code: String,
    pub patient_id: u64,
    pub diagnosis: String,
    pub referred_to: String,
    pub reason: String,
    pub status: ReferralStatus,
    pub doctor: String,
    pub referral_date: u64,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralInput {
    pub patient_id: u64,
    pub diagnosis: String,
    pub referred_to: String,
    pub reason: String,
    pub status: ReferralStatus,
    pub doctor: String,
    pub referral_date: u64,
}
