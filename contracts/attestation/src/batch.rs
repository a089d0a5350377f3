//! Batch lifecycle — submissions are partitioned into settlement windows.
//!
//! Exactly one batch is current at any time. Ids start at 1 (genesis) and
//! are never reused or skipped. Closing a batch is a one-way gate for new
//! submissions into it; decryption requests against data already in a
//! closed batch remain valid.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::errors::AttestationError;

const BATCH: Symbol = symbol_short!("BATCH");

/// The current settlement window.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batch {
    pub id: u64,
    pub closed: bool,
}

fn put(env: &Env, batch: &Batch) {
    env.storage().instance().set(&BATCH, batch);
}

/// Install the genesis batch `{id: 1, open}` at initialisation time.
pub fn init_genesis(env: &Env) {
    put(env, &Batch { id: 1, closed: false });
}

pub fn current(env: &Env) -> Result<Batch, AttestationError> {
    env.storage()
        .instance()
        .get(&BATCH)
        .ok_or(AttestationError::NotInitialized)
}

/// Open the next batch. The current one must already be closed.
pub fn open_new(env: &Env) -> Result<Batch, AttestationError> {
    let batch = current(env)?;
    if !batch.closed {
        return Err(AttestationError::BatchNotClosed);
    }
    let next = Batch {
        // overflow is unreachable at one batch per ledger close, but ids
        // must never wrap back into the valid range
        id: batch
            .id
            .checked_add(1)
            .ok_or(AttestationError::InvalidBatchId)?,
        closed: false,
    };
    put(env, &next);
    Ok(next)
}

/// Close the current batch to further submissions.
pub fn close_current(env: &Env) -> Result<Batch, AttestationError> {
    let mut batch = current(env)?;
    if batch.closed {
        return Err(AttestationError::BatchClosed);
    }
    batch.closed = true;
    put(env, &batch);
    Ok(batch)
}

/// Guard — `batch_id` must reference the genesis batch or any batch opened
/// since (`[1, current]`).
pub fn require_in_range(env: &Env, batch_id: u64) -> Result<(), AttestationError> {
    if batch_id == 0 || batch_id > current(env)?.id {
        return Err(AttestationError::InvalidBatchId);
    }
    Ok(())
}
