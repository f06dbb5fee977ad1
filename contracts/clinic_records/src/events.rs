//! Contract events. Every lifecycle transition and stock movement is
//! published so off-chain indexers can follow the record state without
//! polling storage.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use common::roles::Role;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    env.events().publish(topics, InitializedEvent { admin });
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAssignedEvent {
    pub user: Address,
    pub role: Role,
}

pub fn publish_role_assigned(env: &Env, user: Address, role: Role) {
    let topics = (symbol_short!("ROLE_SET"), user.clone());
    env.events().publish(topics, RoleAssignedEvent { user, role });
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub id: u64,
    pub code: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordUpdatedEvent {
    pub id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordRemovedEvent {
    pub id: u64,
}

pub fn publish_patient_added(env: &Env, id: u64, code: String) {
    let topics = (symbol_short!("PAT_ADD"),);
    env.events().publish(topics, RecordAddedEvent { id, code });
}

pub fn publish_patient_updated(env: &Env, id: u64) {
    let topics = (symbol_short!("PAT_UPD"),);
    env.events().publish(topics, RecordUpdatedEvent { id });
}

pub fn publish_patient_removed(env: &Env, id: u64) {
    let topics = (symbol_short!("PAT_DEL"),);
    env.events().publish(topics, RecordRemovedEvent { id });
}

pub fn publish_medicine_added(env: &Env, id: u64, code: String) {
    let topics = (symbol_short!("MED_ADD"),);
    env.events().publish(topics, RecordAddedEvent { id, code });
}

pub fn publish_medicine_updated(env: &Env, id: u64) {
    let topics = (symbol_short!("MED_UPD"),);
    env.events().publish(topics, RecordUpdatedEvent { id });
}

pub fn publish_medicine_removed(env: &Env, id: u64) {
    let topics = (symbol_short!("MED_DEL"),);
    env.events().publish(topics, RecordRemovedEvent { id });
}

pub fn publish_examination_added(env: &Env, id: u64, code: String) {
    let topics = (symbol_short!("EXM_ADD"),);
    env.events().publish(topics, RecordAddedEvent { id, code });
}

pub fn publish_examination_updated(env: &Env, id: u64) {
    let topics = (symbol_short!("EXM_UPD"),);
    env.events().publish(topics, RecordUpdatedEvent { id });
}

pub fn publish_examination_removed(env: &Env, id: u64) {
    let topics = (symbol_short!("EXM_DEL"),);
    env.events().publish(topics, RecordRemovedEvent { id });
}

pub fn publish_referral_added(env: &Env, id: u64, code: String) {
    let topics = (symbol_short!("REF_ADD"),);
    env.events().publish(topics, RecordAddedEvent { id, code });
}

pub fn publish_referral_updated(env: &Env, id: u64) {
    let topics = (symbol_short!("REF_UPD"),);
    env.events().publish(topics, RecordUpdatedEvent { id });
}

pub fn publish_referral_removed(env: &Env, id: u64) {
    let topics = (symbol_short!("REF_DEL"),);
    env.events().publish(topics, RecordRemovedEvent { id });
}

/// Emitted for every stock movement the reconciliation engine makes,
/// with the post-adjustment balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StockAdjustedEvent {
    pub medicine_id: u64,
    pub delta: i64,
    pub stock: i64,
}

pub fn publish_stock_adjusted(env: &Env, medicine_id: u64, delta: i64, stock: i64) {
    let topics = (symbol_short!("STK_ADJ"), medicine_id);
    env.events().publish(
        topics,
        StockAdjustedEvent {
            medicine_id,
            delta,
            stock,
        },
    );
}
