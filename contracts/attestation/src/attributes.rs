//! Per-(batch, user) storage of encrypted identity attribute handles.
//!
//! Handles are opaque 32-byte references into the external cryptographic
//! provider; no plaintext ever touches this contract. Within an open batch
//! a new submission for the same user overwrites the previous entry
//! (last-write-wins per field).
//!
//! ## Storage keys
//!
//! | Key                         | Storage    | Value          |
//! |-----------------------------|------------|----------------|
//! | `("ATTRS", batch_id, user)` | persistent | [`AttributeSet`] |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::errors::AttestationError;

const ATTRS: Symbol = symbol_short!("ATTRS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Ciphertext handles for one user in one batch.
///
/// `age` stays confidential for the record's whole lifetime — it is stored
/// and re-encryptable but never part of a disclosure list. `is_adult` and
/// `is_verified` are the booleans a decryption request may disclose.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeSet {
    pub age: BytesN<32>,
    pub is_adult: BytesN<32>,
    pub is_verified: BytesN<32>,
    /// Ledger time of the submission that produced this entry.
    pub submitted_at: u64,
}

fn attrs_key(batch_id: u64, user: &Address) -> (Symbol, u64, Address) {
    (ATTRS, batch_id, user.clone())
}

/// Store (or overwrite) the attribute set for `(batch_id, user)`.
pub fn store(env: &Env, batch_id: u64, user: &Address, set: &AttributeSet) {
    let key = attrs_key(batch_id, user);
    env.storage().persistent().set(&key, set);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load(env: &Env, batch_id: u64, user: &Address) -> Option<AttributeSet> {
    let key = attrs_key(batch_id, user);
    let set: Option<AttributeSet> = env.storage().persistent().get(&key);
    if set.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    set
}

/// Load the attribute set or fail — reading a never-submitted entry is an
/// error, not an empty result.
pub fn require(env: &Env, batch_id: u64, user: &Address) -> Result<AttributeSet, AttestationError> {
    load(env, batch_id, user).ok_or(AttestationError::NotInitialized)
}
