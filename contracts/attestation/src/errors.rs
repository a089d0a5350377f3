//! Error codes for the attestation contract.
//!
//! Discriminants are part of the contract's external ABI and must stay
//! stable across upgrades.
//!
//! # Code ranges
//! | Range   | Purpose                        |
//! |---------|--------------------------------|
//! | 1 – 2   | Lifecycle / initialisation     |
//! | 3 – 5   | Authorisation & pause state    |
//! | 6 – 7   | Rate limiting                  |
//! | 8 – 10  | Batch lifecycle                |
//! | 11 – 15 | Decryption oracle protocol     |

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AttestationError {
    /// `initialize` was called a second time.
    AlreadyInitialized = 1,
    /// The contract has not been initialised, or an attribute set (or one of
    /// its ciphertext handles) was read before ever being submitted.
    NotInitialized = 2,
    /// Caller lacks the owner or provider role required by the operation.
    NotAuthorized = 3,
    /// The contract is paused and the operation mutates state.
    Paused = 4,
    /// `unpause` was called while the contract was not paused.
    NotPaused = 5,
    /// The per-subject cooldown window has not elapsed yet.
    CooldownActive = 6,
    /// A cooldown window of zero seconds was supplied.
    InvalidCooldown = 7,
    /// The current batch is closed to new submissions.
    BatchClosed = 8,
    /// `open_new_batch` requires the current batch to be closed first.
    BatchNotClosed = 9,
    /// Referenced batch id is outside `[1, current_batch_id]`.
    InvalidBatchId = 10,
    /// Oracle callback named a request id with no recorded context.
    UnknownRequest = 11,
    /// Oracle callback against an already-finalized context.
    ReplayAttempt = 12,
    /// Binding hash recomputed at callback time differs from the one
    /// committed at request time — the underlying ciphertexts changed.
    StateMismatch = 13,
    /// Cleartext payload length does not match the requested value count.
    InvalidCleartextLength = 14,
    /// The oracle's authenticity proof did not verify.
    ProofVerificationFailed = 15,
}
