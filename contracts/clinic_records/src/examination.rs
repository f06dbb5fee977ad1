//! Examination record store: rows, the global id index, and the per-patient
//! relation index.

use soroban_sdk::{symbol_short, Env, Symbol, Vec};

use crate::types::Examination;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

const EXAM_IDS: Symbol = symbol_short!("EXAM_IDS");

pub fn exam_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("EXAM"), id)
}

fn patient_exams_key(patient_id: u64) -> (Symbol, u64) {
    (symbol_short!("PAT_EXAM"), patient_id)
}

pub fn get(env: &Env, id: u64) -> Option<Examination> {
    env.storage().persistent().get(&exam_key(id))
}

pub fn set(env: &Env, exam: &Examination) {
    let key = exam_key(exam.id);
    env.storage().persistent().set(&key, exam);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove(env: &Env, id: u64) {
    env.storage().persistent().remove(&exam_key(id));
}

pub fn ids(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&EXAM_IDS)
        .unwrap_or(Vec::new(env))
}

pub fn track(env: &Env, id: u64) {
    let mut all = ids(env);
    all.push_back(id);
    env.storage().persistent().set(&EXAM_IDS, &all);
}

pub fn untrack(env: &Env, id: u64) {
    let mut all = ids(env);
    if let Some(pos) = all.first_index_of(id) {
        all.remove(pos);
        env.storage().persistent().set(&EXAM_IDS, &all);
    }
}

/// Ids of the examinations owned by a patient, oldest first.
pub fn for_patient(env: &Env, patient_id: u64) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&patient_exams_key(patient_id))
        .unwrap_or(Vec::new(env))
}

pub fn track_for_patient(env: &Env, patient_id: u64, id: u64) {
    let key = patient_exams_key(patient_id);
    let mut owned = for_patient(env, patient_id);
    owned.push_back(id);
    env.storage().persistent().set(&key, &owned);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn untrack_for_patient(env: &Env, patient_id: u64, id: u64) {
    let mut owned = for_patient(env, patient_id);
    if let Some(pos) = owned.first_index_of(id) {
        owned.remove(pos);
        env.storage()
            .persistent()
            .set(&patient_exams_key(patient_id), &owned);
    }
}

pub fn clear_for_patient(env: &Env, patient_id: u64) {
    env.storage()
        .persistent()
        .remove(&patient_exams_key(patient_id));
}
