//! Patient record store: rows, the global id index, and the unique-nik and
//! account lookup keys.

use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::types::Patient;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

const PATIENT_IDS: Symbol = symbol_short!("PAT_IDS");

pub fn patient_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("PATIENT"), id)
}

fn nik_key(nik: &String) -> (Symbol, String) {
    (symbol_short!("PAT_NIK"), nik.clone())
}

fn account_key(account: &Address) -> (Symbol, Address) {
    (symbol_short!("PAT_ACCT"), account.clone())
}

pub fn get(env: &Env, id: u64) -> Option<Patient> {
    env.storage().persistent().get(&patient_key(id))
}

pub fn set(env: &Env, patient: &Patient) {
    let key = patient_key(patient.id);
    env.storage().persistent().set(&key, patient);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove(env: &Env, id: u64) {
    env.storage().persistent().remove(&patient_key(id));
}

pub fn ids(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&PATIENT_IDS)
        .unwrap_or(Vec::new(env))
}

pub fn track(env: &Env, id: u64) {
    let mut all = ids(env);
    all.push_back(id);
    env.storage().persistent().set(&PATIENT_IDS, &all);
}

pub fn untrack(env: &Env, id: u64) {
    let mut all = ids(env);
    if let Some(pos) = all.first_index_of(id) {
        all.remove(pos);
        env.storage().persistent().set(&PATIENT_IDS, &all);
    }
}

/// Looks up a patient id by national id number.
pub fn id_by_nik(env: &Env, nik: &String) -> Option<u64> {
    env.storage().persistent().get(&nik_key(nik))
}

/// Records the nik → id mapping that backs the uniqueness check.
pub fn claim_nik(env: &Env, nik: &String, id: u64) {
    let key = nik_key(nik);
    env.storage().persistent().set(&key, &id);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn release_nik(env: &Env, nik: &String) {
    env.storage().persistent().remove(&nik_key(nik));
}

/// Looks up the patient record linked to a self-registered account.
pub fn id_by_account(env: &Env, account: &Address) -> Option<u64> {
    env.storage().persistent().get(&account_key(account))
}

pub fn link_account(env: &Env, account: &Address, id: u64) {
    let key = account_key(account);
    env.storage().persistent().set(&key, &id);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn unlink_account(env: &Env, account: &Address) {
    env.storage().persistent().remove(&account_key(account));
}
