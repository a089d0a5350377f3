//! Structured event emission for the attestation contract.
//!
//! Events are the contract's only observable audit log. Each publishes a
//! typed payload carrying the ledger timestamp under a two-symbol topic so
//! external subscribers can filter per event family.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env};

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired when ownership of the registry moves to a new address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a provider is added or removed (never on an idempotent no-op).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderChangedEvent {
    pub provider: Address,
    pub added: bool,
    pub timestamp: u64,
}

/// Fired on every successful pause / unpause transition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEvent {
    pub by: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Fired when the owner reconfigures the cooldown window.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownWindowUpdatedEvent {
    pub seconds: u64,
    pub timestamp: u64,
}

/// Fired when the owner rotates the decryption gateway address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GatewayUpdatedEvent {
    pub gateway: Address,
    pub timestamp: u64,
}

/// Fired when a new settlement batch opens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchOpenedEvent {
    pub batch_id: u64,
    pub timestamp: u64,
}

/// Fired when the current batch closes to further submissions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchClosedEvent {
    pub batch_id: u64,
    pub timestamp: u64,
}

/// Fired on every accepted attribute submission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributesSubmittedEvent {
    pub user: Address,
    pub batch_id: u64,
    pub timestamp: u64,
}

/// Fired when a decryption request is dispatched to the gateway.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionRequestedEvent {
    pub request_id: u64,
    pub batch_id: u64,
    pub timestamp: u64,
}

/// Fired exactly once per request, when its callback finalizes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionCompletedEvent {
    pub request_id: u64,
    pub batch_id: u64,
    pub subject: Address,
    pub is_adult: bool,
    pub is_verified: bool,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn emit_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("OWN_XFER")),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_provider_changed(env: &Env, provider: Address, added: bool) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("PROVIDER")),
        ProviderChangedEvent {
            provider,
            added,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_pause_toggled(env: &Env, by: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("PAUSE")),
        PauseToggledEvent {
            by,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_cooldown_window_updated(env: &Env, seconds: u64) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("COOLDOWN")),
        CooldownWindowUpdatedEvent {
            seconds,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_gateway_updated(env: &Env, gateway: Address) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("GATEWAY")),
        GatewayUpdatedEvent {
            gateway,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_batch_opened(env: &Env, batch_id: u64) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("BAT_OPEN")),
        BatchOpenedEvent {
            batch_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_batch_closed(env: &Env, batch_id: u64) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("BAT_CLOS")),
        BatchClosedEvent {
            batch_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_attributes_submitted(env: &Env, user: Address, batch_id: u64) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("SUBMIT")),
        AttributesSubmittedEvent {
            user,
            batch_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_decryption_requested(env: &Env, request_id: u64, batch_id: u64) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("DEC_REQ")),
        DecryptionRequestedEvent {
            request_id,
            batch_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_decryption_completed(
    env: &Env,
    request_id: u64,
    batch_id: u64,
    subject: Address,
    is_adult: bool,
    is_verified: bool,
) {
    env.events().publish(
        (symbol_short!("ATTEST"), symbol_short!("DEC_DONE")),
        DecryptionCompletedEvent {
            request_id,
            batch_id,
            subject,
            is_adult,
            is_verified,
            timestamp: env.ledger().timestamp(),
        },
    );
}
