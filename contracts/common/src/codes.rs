//! Sequential display-code generation.
//!
//! Every record class carries a human-facing code such as `P001` or `M042`:
//! a single uppercase prefix letter followed by a decimal sequence number
//! zero-padded to at least three digits. Codes are allocated from a per-class
//! counter stored in instance storage, so two creations inside one ledger can
//! never observe the same value and deleting a record never frees its code.

use soroban_sdk::{symbol_short, Env, String, Symbol};

const SEQ: Symbol = symbol_short!("SEQ");

/// Minimum rendered width of the numeric suffix.
const MIN_DIGITS: usize = 3;

/// One prefix byte plus up to 20 decimal digits (u64::MAX).
const MAX_CODE_LEN: usize = 21;

/// Allocates the next sequence number for an entity class.
///
/// The first call for a class returns 1. The counter only ever moves
/// forward; there is no gap-filling after deletions.
pub fn next_id(env: &Env, prefix: u8) -> u64 {
    let key = (SEQ, prefix as u32);
    let next: u64 = env.storage().instance().get(&key).unwrap_or(0) + 1;
    env.storage().instance().set(&key, &next);
    next
}

/// Returns the highest sequence number allocated so far without advancing.
pub fn current_id(env: &Env, prefix: u8) -> u64 {
    env.storage()
        .instance()
        .get(&(SEQ, prefix as u32))
        .unwrap_or(0)
}

/// Renders `prefix` followed by `n` zero-padded to at least three digits.
///
/// Padding is a minimum width, not a cap: `1` renders as `P001`, `100` as
/// `P100` and `1000` as `P1000`.
pub fn render_code(env: &Env, prefix: u8, n: u64) -> String {
    let mut digits = [0u8; MAX_CODE_LEN - 1];
    let mut len = 0usize;
    let mut rest = n;
    loop {
        digits[len] = b'0' + (rest % 10) as u8;
        len += 1;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    while len < MIN_DIGITS {
        digits[len] = b'0';
        len += 1;
    }

    let mut buf = [0u8; MAX_CODE_LEN];
    buf[0] = prefix;
    for i in 0..len {
        buf[1 + i] = digits[len - 1 - i];
    }

    // The buffer is ASCII by construction.
    String::from_str(env, core::str::from_utf8(&buf[..len + 1]).unwrap_or(""))
}

/// Parses a display code of the shape `{prefix}{digits}` from raw bytes.
///
/// Returns the prefix byte and the numeric suffix. A code that does not
/// parse — wrong prefix class, non-digit suffix, or a value outside `u64` —
/// yields `None`; callers treat that as a data-integrity failure rather than
/// defaulting.
pub fn parse_code(bytes: &[u8]) -> Option<(u8, u64)> {
    if bytes.len() < 2 {
        return None;
    }
    let prefix = bytes[0];
    if !prefix.is_ascii_uppercase() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in &bytes[1..] {
        if !b.is_ascii_digit() {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Some((prefix, n))
}
