//! Per-subject cooldown tracking for rate-limited actions.
//!
//! Submissions and decryption requests are throttled per *subject user* (not
//! per calling provider): two providers cannot take turns hammering the same
//! user's record inside one window.
//!
//! ## Storage keys
//!
//! | Key                          | Storage    | Value |
//! |------------------------------|------------|-------|
//! | `"COOL_WIN"`                 | instance   | `u64` (seconds) |
//! | `("COOLDOWN", subject, kind)`| persistent | `u64` (last action, ledger time) |

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::AttestationError;

const WINDOW: Symbol = symbol_short!("COOL_WIN");
const COOLDOWN: Symbol = symbol_short!("COOLDOWN");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// The two rate-limited action kinds, tracked independently per subject.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionKind {
    Submission,
    Decryption,
}

fn cooldown_key(subject: &Address, kind: &ActionKind) -> (Symbol, Address, ActionKind) {
    (COOLDOWN, subject.clone(), kind.clone())
}

// ── Window configuration ─────────────────────────────────────────────────────

/// Persist the cooldown window. Fails on a zero-second window.
pub fn set_window(env: &Env, seconds: u64) -> Result<(), AttestationError> {
    if seconds == 0 {
        return Err(AttestationError::InvalidCooldown);
    }
    env.storage().instance().set(&WINDOW, &seconds);
    Ok(())
}

pub fn window(env: &Env) -> Result<u64, AttestationError> {
    env.storage()
        .instance()
        .get(&WINDOW)
        .ok_or(AttestationError::NotInitialized)
}

// ── Check-and-record ─────────────────────────────────────────────────────────

/// Enforce the cooldown for `(subject, kind)` and record the current ledger
/// time as the new last-action time.
///
/// The check and the write happen inside the caller's entry point, so no
/// second invocation can observe the gap between them: a failing invocation
/// commits nothing, a passing one commits the new timestamp together with
/// the caller's own writes.
pub fn check_and_record(
    env: &Env,
    subject: &Address,
    kind: ActionKind,
) -> Result<(), AttestationError> {
    let now = env.ledger().timestamp();
    let key = cooldown_key(subject, &kind);
    if let Some(last) = env.storage().persistent().get::<_, u64>(&key) {
        if now < last.saturating_add(window(env)?) {
            return Err(AttestationError::CooldownActive);
        }
    }
    env.storage().persistent().set(&key, &now);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}

/// Last recorded action time for `(subject, kind)`, if any.
pub fn last_action_time(env: &Env, subject: &Address, kind: ActionKind) -> Option<u64> {
    env.storage().persistent().get(&cooldown_key(subject, &kind))
}
