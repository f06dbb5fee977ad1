//! Field-level validation for the typed payloads crossing the contract
//! boundary. All checks run before any storage write, so a refusal has no
//! side effects.

use soroban_sdk::{String, Vec};

use crate::types::{
    ExaminationInput, MedicineInput, MedicineUpdate, PatientInput, PrescriptionInput,
    ReferralInput,
};
use crate::ContractError;

const MIN_NAME_LEN: u32 = 2;
const MAX_NAME_LEN: u32 = 255;

const MIN_TEXT_LEN: u32 = 1;
const MAX_TEXT_LEN: u32 = 255;

const MAX_UNIT_LEN: u32 = 50;

const MIN_NIK_LEN: u32 = 8;
const MAX_NIK_LEN: u32 = 20;

const MIN_PHONE_LEN: u32 = 6;
const MAX_PHONE_LEN: u32 = 15;

const BUF_LEN: usize = MAX_TEXT_LEN as usize;

/// Length- and charset-checks a string field: printable ASCII only.
fn validate_text(value: &String, min: u32, max: u32) -> Result<(), ContractError> {
    let len = value.len();
    if !(min..=max).contains(&len) {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; BUF_LEN];
    value.copy_into_slice(&mut buf[..len as usize]);
    for &b in &buf[..len as usize] {
        // printable ASCII: space ' ' through tilde '~'
        if !(32..=126).contains(&b) {
            return Err(ContractError::InvalidInput);
        }
    }
    Ok(())
}

fn validate_name(name: &String) -> Result<(), ContractError> {
    validate_text(name, MIN_NAME_LEN, MAX_NAME_LEN)
}

/// National id numbers are digit strings.
fn validate_nik(nik: &String) -> Result<(), ContractError> {
    let len = nik.len();
    if !(MIN_NIK_LEN..=MAX_NIK_LEN).contains(&len) {
        return Err(ContractError::InvalidInput);
    }
    let mut buf = [0u8; MAX_NIK_LEN as usize];
    nik.copy_into_slice(&mut buf[..len as usize]);
    for &b in &buf[..len as usize] {
        if !b.is_ascii_digit() {
            return Err(ContractError::InvalidInput);
        }
    }
    Ok(())
}

/// Phone numbers: digits with an optional leading '+'.
fn validate_phone(phone: &String) -> Result<(), ContractError> {
    let len = phone.len();
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len) {
        return Err(ContractError::InvalidInput);
    }
    let mut buf = [0u8; MAX_PHONE_LEN as usize];
    phone.copy_into_slice(&mut buf[..len as usize]);
    for (i, &b) in buf[..len as usize].iter().enumerate() {
        let ok = b.is_ascii_digit() || (i == 0 && b == b'+');
        if !ok {
            return Err(ContractError::InvalidInput);
        }
    }
    Ok(())
}

fn validate_date(ts: u64) -> Result<(), ContractError> {
    if ts == 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_patient(input: &PatientInput) -> Result<(), ContractError> {
    validate_nik(&input.nik)?;
    validate_name(&input.name)?;
    validate_date(input.birth_date)?;
    validate_text(&input.address, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_phone(&input.phone)
}

pub fn validate_medicine(input: &MedicineInput) -> Result<(), ContractError> {
    validate_name(&input.name)?;
    validate_text(&input.category, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_text(&input.unit, MIN_TEXT_LEN, MAX_UNIT_LEN)?;
    if input.stock < 0 {
        return Err(ContractError::InvalidInput);
    }
    validate_date(input.expiry_date)?;
    validate_text(&input.supplier, MIN_TEXT_LEN, MAX_TEXT_LEN)
}

pub fn validate_medicine_update(input: &MedicineUpdate) -> Result<(), ContractError> {
    validate_name(&input.name)?;
    validate_text(&input.category, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_text(&input.unit, MIN_TEXT_LEN, MAX_UNIT_LEN)?;
    validate_date(input.expiry_date)?;
    validate_text(&input.supplier, MIN_TEXT_LEN, MAX_TEXT_LEN)
}

pub fn validate_examination(input: &ExaminationInput) -> Result<(), ContractError> {
    validate_text(&input.complaint, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_text(&input.diagnosis, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_text(&input.treatment, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_name(&input.doctor)?;
    validate_date(input.examination_date)
}

pub fn validate_referral(input: &ReferralInput) -> Result<(), ContractError> {
    validate_text(&input.diagnosis, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_text(&input.referred_to, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_text(&input.reason, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    validate_name(&input.doctor)?;
    validate_date(input.referral_date)
}

/// Per-item checks for a desired prescription set. Quantity must be a
/// positive integer before it reaches the reconciliation engine; the engine
/// itself never clamps.
pub fn validate_prescriptions(items: &Vec<PrescriptionInput>) -> Result<(), ContractError> {
    for item in items.iter() {
        if item.quantity < 1 {
            return Err(ContractError::InvalidInput);
        }
        validate_text(&item.dosage, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
        validate_text(&item.instructions, MIN_TEXT_LEN, MAX_TEXT_LEN)?;
    }
    Ok(())
}
