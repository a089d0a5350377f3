//! # Confidential Attestation Registry
//!
//! Trusted attribute providers submit encrypted identity attributes (age,
//! is-adult, is-KYC-verified) on behalf of users, grouped into settlement
//! batches, and later request out-of-band decryption of a user's boolean
//! attributes through an asynchronous oracle gateway.
//!
//! ## Protocol flow
//! ```text
//!  Provider                     Contract                      Gateway
//!  ─────────────────────        ─────────────────────         ──────────────
//!  submit_attributes ────────▶  store handles (open batch)
//!  request_verification ─────▶  commit binding hash
//!                               register pending context
//!                               request_decryption ─────────▶ queue work
//!                                        ... time passes ...
//!                               oracle_callback ◀──────────── cleartexts+proof
//!                               replay / length / state /
//!                               proof checks, finalize once
//!                               emit DecryptionCompleted
//! ```
//!
//! Ciphertexts are opaque handles into the external cryptographic provider;
//! the contract never sees plaintext other than the decoded booleans a
//! finalized callback discloses. The age handle is stored but never
//! disclosed.

#![no_std]

pub mod access;
pub mod attributes;
pub mod batch;
pub mod cooldown;
pub mod errors;
pub mod events;
pub mod oracle;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol};

use attributes::AttributeSet;
use batch::Batch;
use cooldown::ActionKind;
use errors::AttestationError;
use oracle::{DecodedAttributes, DecryptionContext};

// ── Storage keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct AttestationContract;

#[contractimpl]
impl AttestationContract {
    /// Initialize the registry with an owner, the decryption gateway
    /// address, and the cooldown window in seconds (must be non-zero).
    ///
    /// Opens the genesis batch (id 1) and registers the owner as the first
    /// provider.
    pub fn initialize(
        env: Env,
        owner: Address,
        gateway: Address,
        cooldown_secs: u64,
    ) -> Result<(), AttestationError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(AttestationError::AlreadyInitialized);
        }
        cooldown::set_window(&env, cooldown_secs)?;
        access::set_owner(&env, &owner);
        access::set_provider(&env, &owner, true);
        oracle::set_gateway(&env, &gateway);
        batch::init_genesis(&env);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Reassign ownership. Owner only.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        access::set_owner(&env, &new_owner);
        events::emit_ownership_transferred(&env, caller, new_owner);
        Ok(())
    }

    /// Register a provider. Owner only; no-op (and no event) when already
    /// registered.
    pub fn add_provider(
        env: Env,
        caller: Address,
        provider: Address,
    ) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        if access::set_provider(&env, &provider, true) {
            events::emit_provider_changed(&env, provider, true);
        }
        Ok(())
    }

    /// Deregister a provider. Owner only; no-op (and no event) when not
    /// registered.
    pub fn remove_provider(
        env: Env,
        caller: Address,
        provider: Address,
    ) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        if access::set_provider(&env, &provider, false) {
            events::emit_provider_changed(&env, provider, false);
        }
        Ok(())
    }

    /// Pause all mutating operations. Owner only; strict toggle — fails when
    /// already paused.
    pub fn pause(env: Env, caller: Address) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        if access::is_paused(&env) {
            return Err(AttestationError::Paused);
        }
        access::set_paused(&env, true);
        events::emit_pause_toggled(&env, caller, true);
        Ok(())
    }

    /// Lift the pause. Owner only; strict toggle — fails when not paused.
    pub fn unpause(env: Env, caller: Address) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        if !access::is_paused(&env) {
            return Err(AttestationError::NotPaused);
        }
        access::set_paused(&env, false);
        events::emit_pause_toggled(&env, caller, false);
        Ok(())
    }

    // ── Configuration ────────────────────────────────────────────────────────

    /// Reconfigure the cooldown window. Owner only; zero seconds is invalid.
    pub fn set_cooldown_window(
        env: Env,
        caller: Address,
        seconds: u64,
    ) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        cooldown::set_window(&env, seconds)?;
        events::emit_cooldown_window_updated(&env, seconds);
        Ok(())
    }

    /// Rotate the decryption gateway address. Owner only.
    pub fn set_gateway(
        env: Env,
        caller: Address,
        gateway: Address,
    ) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        oracle::set_gateway(&env, &gateway);
        events::emit_gateway_updated(&env, gateway);
        Ok(())
    }

    // ── Batch lifecycle ──────────────────────────────────────────────────────

    /// Open the next batch (current must be closed). Owner only. Returns the
    /// new batch id, always exactly `previous + 1`.
    pub fn open_new_batch(env: Env, caller: Address) -> Result<u64, AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        let opened = batch::open_new(&env)?;
        events::emit_batch_opened(&env, opened.id);
        Ok(opened.id)
    }

    /// Close the current batch to further submissions. Owner only.
    pub fn close_current_batch(env: Env, caller: Address) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        let closed = batch::close_current(&env)?;
        events::emit_batch_closed(&env, closed.id);
        Ok(())
    }

    // ── Attribute submission ─────────────────────────────────────────────────

    /// Submit (or overwrite) a user's encrypted attribute handles into the
    /// current batch. Provider only, batch must be open, subject to the
    /// per-user submission cooldown.
    pub fn submit_attributes(
        env: Env,
        caller: Address,
        user: Address,
        age: BytesN<32>,
        is_adult: BytesN<32>,
        is_verified: BytesN<32>,
    ) -> Result<(), AttestationError> {
        caller.require_auth();
        access::require_provider(&env, &caller)?;
        access::require_not_paused(&env)?;

        let current = batch::current(&env)?;
        if current.closed {
            return Err(AttestationError::BatchClosed);
        }

        cooldown::check_and_record(&env, &user, ActionKind::Submission)?;

        attributes::store(
            &env,
            current.id,
            &user,
            &AttributeSet {
                age,
                is_adult,
                is_verified,
                submitted_at: env.ledger().timestamp(),
            },
        );
        events::emit_attributes_submitted(&env, user, current.id);
        Ok(())
    }

    /// Read back the stored handles for `(batch_id, user)`. Provider only;
    /// advisory bookkeeping, so no pause gate and no cooldown. Fails with
    /// `NotInitialized` when nothing was ever submitted for the key.
    pub fn get_attributes(
        env: Env,
        caller: Address,
        batch_id: u64,
        user: Address,
    ) -> Result<AttributeSet, AttestationError> {
        caller.require_auth();
        access::require_provider(&env, &caller)?;
        attributes::require(&env, batch_id, &user)
    }

    // ── Decryption oracle protocol ───────────────────────────────────────────

    /// Request asynchronous decryption of a user's boolean attributes in
    /// `batch_id`. Provider only, subject to the per-user decryption
    /// cooldown. Commits a binding hash over the disclosed handles,
    /// registers a pending context, and returns the oracle-assigned request
    /// id immediately — there is no blocking wait and no cancellation path.
    pub fn request_verification(
        env: Env,
        caller: Address,
        user: Address,
        batch_id: u64,
    ) -> Result<u64, AttestationError> {
        caller.require_auth();
        access::require_provider(&env, &caller)?;
        access::require_not_paused(&env)?;
        cooldown::check_and_record(&env, &user, ActionKind::Decryption)?;

        let request_id = oracle::request_verification(&env, &user, batch_id)?;
        events::emit_decryption_requested(&env, request_id, batch_id);
        Ok(request_id)
    }

    /// Oracle callback delivering cleartexts and an authenticity proof for a
    /// pending request. Validated against replay, payload length, the
    /// binding-hash commitment, and the proof — in that order — then
    /// finalized exactly once. A rejected callback leaves the context
    /// pending so the oracle may retry.
    pub fn oracle_callback(
        env: Env,
        request_id: u64,
        cleartexts: Bytes,
        proof: Bytes,
        subject: Address,
    ) -> Result<DecodedAttributes, AttestationError> {
        access::require_not_paused(&env)?;

        let (batch_id, decoded) =
            oracle::handle_callback(&env, request_id, &cleartexts, &proof, &subject)?;
        events::emit_decryption_completed(
            &env,
            request_id,
            batch_id,
            subject,
            decoded.is_adult,
            decoded.is_verified,
        );
        Ok(decoded)
    }

    // ── Read accessors ───────────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Result<Address, AttestationError> {
        access::get_owner(&env)
    }

    pub fn is_provider(env: Env, addr: Address) -> bool {
        access::is_provider(&env, &addr)
    }

    pub fn is_paused(env: Env) -> bool {
        access::is_paused(&env)
    }

    pub fn get_cooldown_window(env: Env) -> Result<u64, AttestationError> {
        cooldown::window(&env)
    }

    /// Last recorded action time for `(subject, kind)`, if any.
    pub fn get_last_action_time(env: Env, subject: Address, kind: ActionKind) -> Option<u64> {
        cooldown::last_action_time(&env, &subject, kind)
    }

    pub fn current_batch(env: Env) -> Result<Batch, AttestationError> {
        batch::current(&env)
    }

    pub fn get_gateway(env: Env) -> Result<Address, AttestationError> {
        oracle::gateway(&env)
    }

    /// Audit accessor for a decryption context (pending or finalized).
    pub fn get_request(env: Env, request_id: u64) -> Option<DecryptionContext> {
        oracle::get_context(&env, request_id)
    }
}
