use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const ROLE_ADDR: Symbol = symbol_short!("ROLE_ADR");
const ROLE_TTL_THRESHOLD: u32 = 5_184_000; // ~60 days
const ROLE_TTL_EXTEND_TO: u32 = 10_368_000; // ~120 days

/// Roles recognised across the clinic contracts.
///
/// `Admin` manages staff and reporting, `Doctor` owns examinations and
/// referrals, `Pharmacist` owns the medicine inventory, and `Patient` is
/// assigned on self-registration.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Admin,
    Doctor,
    Pharmacist,
    Patient,
}

fn extend_role_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, ROLE_TTL_THRESHOLD, ROLE_TTL_EXTEND_TO);
}

/// Assigns a role to an address, replacing any previous assignment.
pub fn set_role(env: &Env, address: &Address, role: Role) {
    let key = (ROLE_ADDR, address.clone());
    env.storage().persistent().set(&key, &role);
    extend_role_ttl(env, &key);
}

/// Removes an address's role assignment.
pub fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&(ROLE_ADDR, address.clone()));
}

/// Returns the role assigned to an address, if any.
pub fn role_of(env: &Env, address: &Address) -> Option<Role> {
    let key = (ROLE_ADDR, address.clone());
    let role: Option<Role> = env.storage().persistent().get(&key);
    if role.is_some() {
        extend_role_ttl(env, &key);
    }
    role
}

/// Returns whether the address currently holds one of the listed roles.
pub fn has_any_role(env: &Env, address: &Address, allowed: &[Role]) -> bool {
    match role_of(env, address) {
        Some(role) => allowed.contains(&role),
        None => false,
    }
}
