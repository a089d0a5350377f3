//! Owner / provider role registry and the contract pause flag.
//!
//! The owner is unique and set once at initialisation; providers are a
//! mutable set only the owner may change. Auth (`require_auth`) is enforced
//! by the entry points in `lib.rs` — this module only answers "does the
//! caller hold the role".
//!
//! ## Storage keys
//!
//! | Key                  | Storage    | Value     |
//! |----------------------|------------|-----------|
//! | `"OWNER"`            | instance   | `Address` |
//! | `"PAUSED"`           | instance   | `bool`    |
//! | `("PROVIDER", addr)` | persistent | `bool`    |

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::AttestationError;

const OWNER: Symbol = symbol_short!("OWNER");
const PAUSED: Symbol = symbol_short!("PAUSED");
const PROVIDER: Symbol = symbol_short!("PROVIDER");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn provider_key(addr: &Address) -> (Symbol, Address) {
    (PROVIDER, addr.clone())
}

// ── Owner ────────────────────────────────────────────────────────────────────

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Result<Address, AttestationError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(AttestationError::NotInitialized)
}

/// Guard — the caller must be the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), AttestationError> {
    if get_owner(env)? != *caller {
        return Err(AttestationError::NotAuthorized);
    }
    Ok(())
}

// ── Providers ────────────────────────────────────────────────────────────────

pub fn is_provider(env: &Env, addr: &Address) -> bool {
    let key = provider_key(addr);
    let registered: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if registered {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    registered
}

/// Flip provider membership. Returns `false` (and writes nothing) when the
/// address is already in the target state, so callers can skip the event.
pub fn set_provider(env: &Env, addr: &Address, registered: bool) -> bool {
    if is_provider(env, addr) == registered {
        return false;
    }
    let key = provider_key(addr);
    if registered {
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    } else {
        env.storage().persistent().remove(&key);
    }
    true
}

/// Guard — the caller must hold the provider role.
pub fn require_provider(env: &Env, caller: &Address) -> Result<(), AttestationError> {
    if !is_provider(env, caller) {
        return Err(AttestationError::NotAuthorized);
    }
    Ok(())
}

// ── Pause flag ───────────────────────────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Guard — place at the top of every state-mutating entry point that must
/// honour the pause. View-only functions should **not** call this.
pub fn require_not_paused(env: &Env) -> Result<(), AttestationError> {
    if is_paused(env) {
        return Err(AttestationError::Paused);
    }
    Ok(())
}
