//! Decryption oracle protocol — request/callback handshake with replay and
//! tamper detection.
//!
//! A verification request commits to the exact ciphertext handles being
//! disclosed via a binding hash, registers a pending context under the
//! oracle-assigned request id, and returns immediately. The oracle answers
//! asynchronously, at any later point in the ledger history. The callback is
//! accepted only when
//!
//! 1. the context exists and has not been finalized (replay protection),
//! 2. the cleartext payload has the exact encoded length,
//! 3. the binding hash recomputed over *current* storage matches the one
//!    committed at request time (staleness/tamper detection), and
//! 4. the oracle's authenticity proof verifies through the gateway.
//!
//! A rejected callback leaves the context pending and unchanged, so a
//! legitimate retry by the oracle is still possible. There is no expiry:
//! a context that never receives a valid callback stays pending forever.
//!
//! ## Storage keys
//!
//! | Key                       | Storage    | Value                 |
//! |---------------------------|------------|-----------------------|
//! | `"GATEWAY"`               | instance   | `Address`             |
//! | `("DECREQ", request_id)`  | persistent | [`DecryptionContext`] |

use soroban_sdk::{
    contractclient, contracttype, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol,
    Vec,
};

use crate::attributes::{self, AttributeSet};
use crate::batch;
use crate::errors::AttestationError;

const GATEWAY: Symbol = symbol_short!("GATEWAY");
const DECREQ: Symbol = symbol_short!("DECREQ");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Number of ciphertext handles disclosed per request (`is_adult`,
/// `is_verified` — the age handle never leaves the contract).
pub const DISCLOSED_VALUE_COUNT: u32 = 2;

/// Width of one decoded value in the callback payload. The gateway encodes
/// each boolean as a 32-byte big-endian word; any non-zero word is `true`.
pub const CLEARTEXT_WORD_LEN: u32 = 32;

// ── Gateway capability ───────────────────────────────────────────────────────

/// External cryptographic provider. The contract never inspects ciphertexts
/// itself; it only sequences handles through this interface. Tests register
/// a mock gateway contract in the same environment.
#[contractclient(name = "DecryptionGatewayClient")]
pub trait DecryptionGateway {
    /// Whether `handle` references a live ciphertext in the provider.
    fn is_initialized(env: Env, handle: BytesN<32>) -> bool;

    /// Queue an asynchronous decryption of `handles`. Returns the
    /// collision-free request id the eventual callback will carry.
    fn request_decryption(env: Env, handles: Vec<BytesN<32>>) -> u64;

    /// Whether `proof` authenticates `cleartexts` as the provider's genuine
    /// decryption output for `request_id`.
    fn verify_proof(env: Env, request_id: u64, cleartexts: Bytes, proof: Bytes) -> bool;
}

pub fn set_gateway(env: &Env, gateway: &Address) {
    env.storage().instance().set(&GATEWAY, gateway);
}

pub fn gateway(env: &Env) -> Result<Address, AttestationError> {
    env.storage()
        .instance()
        .get(&GATEWAY)
        .ok_or(AttestationError::NotInitialized)
}

// ── Pending contexts ─────────────────────────────────────────────────────────

/// Audit record of one decryption request. Never physically deleted;
/// `finalized` flips to `true` at most once and never back.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionContext {
    pub batch_id: u64,
    pub subject: Address,
    pub binding_hash: BytesN<32>,
    pub finalized: bool,
}

/// Cleartext attribute values decoded from a finalized callback.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedAttributes {
    pub is_adult: bool,
    pub is_verified: bool,
}

fn request_key(request_id: u64) -> (Symbol, u64) {
    (DECREQ, request_id)
}

fn put_context(env: &Env, request_id: u64, ctx: &DecryptionContext) {
    let key = request_key(request_id);
    env.storage().persistent().set(&key, ctx);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_context(env: &Env, request_id: u64) -> Option<DecryptionContext> {
    let key = request_key(request_id);
    let ctx: Option<DecryptionContext> = env.storage().persistent().get(&key);
    if ctx.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    ctx
}

// ── Binding hash ─────────────────────────────────────────────────────────────

/// The ordered handle list a request disclosed to the oracle.
fn disclosure_list(env: &Env, set: &AttributeSet) -> Vec<BytesN<32>> {
    let mut handles = Vec::new(env);
    handles.push_back(set.is_adult.clone());
    handles.push_back(set.is_verified.clone());
    handles
}

/// Content commitment over the disclosed handles, in disclosure order,
/// salted with this contract's own address so a hash computed under one
/// deployment cannot be replayed as valid under another.
///
/// `H(is_adult ‖ is_verified ‖ xdr(contract_address))`
pub fn binding_hash(env: &Env, set: &AttributeSet) -> BytesN<32> {
    let mut buf = Bytes::new(env);
    buf.append(&Bytes::from_slice(env, &set.is_adult.to_array()));
    buf.append(&Bytes::from_slice(env, &set.is_verified.to_array()));
    buf.append(&env.current_contract_address().to_xdr(env));
    env.crypto().sha256(&buf).into()
}

// ── Request path ─────────────────────────────────────────────────────────────

/// Steps 2–8 of the request flow: validate the batch reference and handle
/// initialisation, commit the binding hash, dispatch to the gateway, and
/// register the pending context. Role, pause, and cooldown gates are the
/// entry point's responsibility.
pub fn request_verification(
    env: &Env,
    user: &Address,
    batch_id: u64,
) -> Result<u64, AttestationError> {
    batch::require_in_range(env, batch_id)?;
    let set = attributes::require(env, batch_id, user)?;

    let client = DecryptionGatewayClient::new(env, &gateway(env)?);
    for handle in [&set.age, &set.is_adult, &set.is_verified] {
        if !client.is_initialized(handle) {
            return Err(AttestationError::NotInitialized);
        }
    }

    let handles = disclosure_list(env, &set);
    let hash = binding_hash(env, &set);

    // fire-and-forget: the gateway queues the work and hands back its id
    let request_id = client.request_decryption(&handles);

    put_context(
        env,
        request_id,
        &DecryptionContext {
            batch_id,
            subject: user.clone(),
            binding_hash: hash,
            finalized: false,
        },
    );

    Ok(request_id)
}

// ── Callback path ────────────────────────────────────────────────────────────

/// Validate an oracle callback and finalize its context exactly once.
///
/// Check order is significant: replay is rejected before any payload
/// inspection, the length check runs before any hash or proof work, and the
/// state re-verification runs before the (expensive) proof verification.
/// Returns the decoded values together with the batch the context belongs
/// to.
pub fn handle_callback(
    env: &Env,
    request_id: u64,
    cleartexts: &Bytes,
    proof: &Bytes,
    subject: &Address,
) -> Result<(u64, DecodedAttributes), AttestationError> {
    let mut ctx = get_context(env, request_id).ok_or(AttestationError::UnknownRequest)?;

    if ctx.finalized {
        return Err(AttestationError::ReplayAttempt);
    }

    if cleartexts.len() != DISCLOSED_VALUE_COUNT * CLEARTEXT_WORD_LEN {
        return Err(AttestationError::InvalidCleartextLength);
    }

    // State re-verification: the handles currently in storage for the
    // subject must still be the exact ones the oracle decrypted. An
    // overwrite between request and callback makes the answer stale.
    let current = attributes::load(env, ctx.batch_id, subject)
        .ok_or(AttestationError::StateMismatch)?;
    if binding_hash(env, &current) != ctx.binding_hash {
        return Err(AttestationError::StateMismatch);
    }

    let client = DecryptionGatewayClient::new(env, &gateway(env)?);
    if !client.verify_proof(&request_id, cleartexts, proof) {
        return Err(AttestationError::ProofVerificationFailed);
    }

    let decoded = DecodedAttributes {
        is_adult: word_is_nonzero(cleartexts, 0),
        is_verified: word_is_nonzero(cleartexts, 1),
    };

    ctx.finalized = true;
    put_context(env, request_id, &ctx);

    Ok((ctx.batch_id, decoded))
}

/// Whether the `word`-th 32-byte word of `cleartexts` contains any non-zero
/// byte. Length has already been validated.
fn word_is_nonzero(cleartexts: &Bytes, word: u32) -> bool {
    let start = word * CLEARTEXT_WORD_LEN;
    for i in start..start + CLEARTEXT_WORD_LEN {
        if cleartexts.get_unchecked(i) != 0 {
            return true;
        }
    }
    false
}
