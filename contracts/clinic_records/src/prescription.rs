//! Prescription rows and the stock reconciliation engine.
//!
//! Every mutation of an examination's prescription set runs through here so
//! that medicine stock always reflects the net of deductions from live
//! prescriptions. All of it executes inside one contract invocation: any
//! error unwinds the stock writes and row writes together.

#![allow(clippy::arithmetic_side_effects)]

use soroban_sdk::{symbol_short, Env, Symbol, Vec};

use crate::types::{Prescription, PrescriptionInput};
use crate::{medicine, ContractError, SEQ_PRESCRIPTION};
use common::codes;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

pub fn rx_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("RX"), id)
}

fn exam_rx_key(examination_id: u64) -> (Symbol, u64) {
    (symbol_short!("EXAM_RX"), examination_id)
}

pub fn get(env: &Env, id: u64) -> Option<Prescription> {
    env.storage().persistent().get(&rx_key(id))
}

fn set(env: &Env, rx: &Prescription) {
    let key = rx_key(rx.id);
    env.storage().persistent().set(&key, rx);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Ids of the prescriptions attached to an examination.
pub fn for_examination(env: &Env, examination_id: u64) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&exam_rx_key(examination_id))
        .unwrap_or(Vec::new(env))
}

fn set_for_examination(env: &Env, examination_id: u64, index: &Vec<u64>) {
    let key = exam_rx_key(examination_id);
    env.storage().persistent().set(&key, index);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Writes one new row and deducts its quantity from the medicine's stock.
/// Ignores `input.id`: by the time we get here the item is known to be new.
fn add_one(
    env: &Env,
    examination_id: u64,
    input: &PrescriptionInput,
) -> Result<u64, ContractError> {
    let id = codes::next_id(env, SEQ_PRESCRIPTION);
    set(
        env,
        &Prescription {
            id,
            examination_id,
            medicine_id: input.medicine_id,
            dosage: input.dosage.clone(),
            quantity: input.quantity,
            instructions: input.instructions.clone(),
        },
    );
    medicine::adjust_stock(env, input.medicine_id, -i64::from(input.quantity))?;
    medicine::retain(env, input.medicine_id);
    Ok(id)
}

/// Restores one row's quantity to its medicine and deletes the row.
fn drop_one(env: &Env, id: u64) -> Result<(), ContractError> {
    let rx = get(env, id).ok_or(ContractError::PrescriptionNotFound)?;
    medicine::adjust_stock(env, rx.medicine_id, i64::from(rx.quantity))?;
    medicine::release_ref(env, rx.medicine_id);
    env.storage().persistent().remove(&rx_key(id));
    Ok(())
}

/// Creates the prescription set for a freshly stored examination.
pub fn issue(
    env: &Env,
    examination_id: u64,
    inputs: &Vec<PrescriptionInput>,
) -> Result<(), ContractError> {
    let mut index = Vec::new(env);
    for input in inputs.iter() {
        index.push_back(add_one(env, examination_id, &input)?);
    }
    if !index.is_empty() {
        set_for_examination(env, examination_id, &index);
    }
    Ok(())
}

/// Reconciles an examination's persisted prescriptions against a desired
/// set.
///
/// Matching is by persisted prescription id, never by medicine: two desired
/// items naming the same medicine stay independent ledger entries. For a
/// matched item the old quantity goes back to the medicine the row used to
/// reference, then the new quantity comes off whichever medicine the item
/// names now; a desired item without a matching row is created; a persisted
/// row missing from the desired set is restored and deleted.
pub fn reconcile(
    env: &Env,
    examination_id: u64,
    desired: &Vec<PrescriptionInput>,
) -> Result<(), ContractError> {
    let mut leftover = for_examination(env, examination_id);
    let mut index = Vec::new(env);

    for item in desired.iter() {
        let matched = match item.id {
            Some(rx_id) => leftover.first_index_of(rx_id).map(|pos| (rx_id, pos)),
            None => None,
        };
        match matched {
            Some((rx_id, pos)) => {
                let old = get(env, rx_id).ok_or(ContractError::PrescriptionNotFound)?;
                medicine::adjust_stock(env, old.medicine_id, i64::from(old.quantity))?;
                medicine::adjust_stock(env, item.medicine_id, -i64::from(item.quantity))?;
                if old.medicine_id != item.medicine_id {
                    medicine::release_ref(env, old.medicine_id);
                    medicine::retain(env, item.medicine_id);
                }
                set(
                    env,
                    &Prescription {
                        id: rx_id,
                        examination_id,
                        medicine_id: item.medicine_id,
                        dosage: item.dosage.clone(),
                        quantity: item.quantity,
                        instructions: item.instructions.clone(),
                    },
                );
                leftover.remove(pos);
                index.push_back(rx_id);
            }
            None => {
                index.push_back(add_one(env, examination_id, &item)?);
            }
        }
    }

    // Rows the caller dropped: put their quantities back and delete.
    for rx_id in leftover.iter() {
        drop_one(env, rx_id)?;
    }

    if index.is_empty() {
        env.storage()
            .persistent()
            .remove(&exam_rx_key(examination_id));
    } else {
        set_for_examination(env, examination_id, &index);
    }
    Ok(())
}

/// Restores stock for every prescription attached to an examination and
/// deletes the rows. Runs before the examination itself is removed.
pub fn release(env: &Env, examination_id: u64) -> Result<(), ContractError> {
    for rx_id in for_examination(env, examination_id).iter() {
        drop_one(env, rx_id)?;
    }
    env.storage()
        .persistent()
        .remove(&exam_rx_key(examination_id));
    Ok(())
}
