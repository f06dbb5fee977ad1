//! Medicine inventory store.
//!
//! Rows, the global id index, and the per-medicine live-prescription
//! reference count that backs the "cannot delete while prescribed" rule.
//! Stock moves only through [`adjust_stock`], which the reconciliation
//! engine calls; every adjustment is published as an event.

use soroban_sdk::{symbol_short, Env, Symbol, Vec};

use crate::events;
use crate::types::Medicine;
use crate::ContractError;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

const MEDICINE_IDS: Symbol = symbol_short!("MED_IDS");

pub fn medicine_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("MED"), id)
}

fn refs_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("MED_REFS"), id)
}

pub fn get(env: &Env, id: u64) -> Option<Medicine> {
    env.storage().persistent().get(&medicine_key(id))
}

pub fn set(env: &Env, medicine: &Medicine) {
    let key = medicine_key(medicine.id);
    env.storage().persistent().set(&key, medicine);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove(env: &Env, id: u64) {
    env.storage().persistent().remove(&medicine_key(id));
}

pub fn ids(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&MEDICINE_IDS)
        .unwrap_or(Vec::new(env))
}

pub fn track(env: &Env, id: u64) {
    let mut all = ids(env);
    all.push_back(id);
    env.storage().persistent().set(&MEDICINE_IDS, &all);
}

pub fn untrack(env: &Env, id: u64) {
    let mut all = ids(env);
    if let Some(pos) = all.first_index_of(id) {
        all.remove(pos);
        env.storage().persistent().set(&MEDICINE_IDS, &all);
    }
}

/// Applies a signed stock delta to a medicine.
///
/// No clamping: quantities are validated upstream, and over-prescription
/// driving stock negative is accepted input behavior, not a guarded
/// invariant. A missing medicine is a data-integrity failure that aborts
/// (and therefore rolls back) the whole invocation.
pub fn adjust_stock(env: &Env, id: u64, delta: i64) -> Result<(), ContractError> {
    let mut medicine = get(env, id).ok_or(ContractError::MedicineNotFound)?;
    medicine.stock += delta;
    set(env, &medicine);
    events::publish_stock_adjusted(env, id, delta, medicine.stock);
    Ok(())
}

/// Number of live prescriptions referencing this medicine.
pub fn prescription_refs(env: &Env, id: u64) -> u32 {
    env.storage().persistent().get(&refs_key(id)).unwrap_or(0)
}

pub fn retain(env: &Env, id: u64) {
    let key = refs_key(id);
    let refs = prescription_refs(env, id) + 1;
    env.storage().persistent().set(&key, &refs);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn release_ref(env: &Env, id: u64) {
    let refs = prescription_refs(env, id).saturating_sub(1);
    if refs == 0 {
        env.storage().persistent().remove(&refs_key(id));
    } else {
        env.storage().persistent().set(&refs_key(id), &refs);
    }
}
