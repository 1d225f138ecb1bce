#![no_std]

mod storage;
pub mod types;

use soroban_sdk::{contract, contractimpl, xdr::ToXdr, Address, BytesN, Env, Symbol, Vec};

use insurance_policy::PolicyContractClient;

use crate::storage::*;
use crate::types::*;

//
// ──────────────────────────────────────────────────────────
// CONSTANTS
// ──────────────────────────────────────────────────────────
//

/// Claims scoring below this are flagged for manual review.
const REVIEW_THRESHOLD: u32 = 60;

const BASIS_POINTS: i128 = 10_000;
/// Insured fraction of the property value (80%), matching the policy contract.
const COVERAGE_BPS: i128 = 8_000;

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

#[contract]
pub struct ClaimsContract;

#[contractimpl]
impl ClaimsContract {
    // ───────────── INITIALIZATION ─────────────

    /// Link the claims register to the policy registry.
    pub fn initialize(env: Env, policy_contract: Address) {
        if has_config(&env) {
            panic!("Already initialized");
        }

        set_policy_contract(&env, &policy_contract);
        env.storage().instance().set(&DataKey::ClaimCount, &0u64);
    }

    // ───────────── CLAIM MANAGEMENT ─────────────

    /// Record a damage claim against a policy. Admin or employee only.
    ///
    /// The claimant is always the policy holder; `ml_score` is the
    /// externally computed damage validation score (0..=100). Low-scoring
    /// claims are flagged for manual review. Returns the derived claim
    /// identifier.
    pub fn log_claim(
        env: Env,
        caller: Address,
        policy_id: BytesN<32>,
        amount: i128,
        ml_score: u32,
    ) -> BytesN<32> {
        caller.require_auth();

        let policy_client = PolicyContractClient::new(&env, &get_policy_contract(&env));
        if !policy_client.is_authorised(&caller) {
            panic!("Not authorised");
        }

        if amount <= 0 {
            panic!("Amount must be positive");
        }
        if ml_score > 100 {
            panic!("Invalid ML score");
        }

        let policy = policy_client
            .get_policy(&policy_id)
            .expect("Policy not found");

        let sequence = increment_claim_count(&env);
        let claim_id = Self::derive_claim_id(&env, &policy_id, sequence);

        let claim = Claim {
            claim_id: claim_id.clone(),
            policy_id: policy_id.clone(),
            claimant: policy.holder.clone(),
            amount,
            ml_score,
            manual_review: ml_score < REVIEW_THRESHOLD,
            date_filed: env.ledger().timestamp(),
            status: ClaimStatus::Logged,
        };
        set_claim(&env, &claim);
        add_policy_claim(&env, &policy_id, &claim_id);

        env.events().publish(
            (Symbol::new(&env, "claims"), Symbol::new(&env, "logged")),
            (claim_id.clone(), policy_id, policy.holder, amount, ml_score),
        );

        claim_id
    }

    /// Move a claim to a new status. Admin or employee only. A paid
    /// claim is final.
    pub fn update_claim_status(env: Env, caller: Address, claim_id: BytesN<32>, status: ClaimStatus) {
        caller.require_auth();

        let policy_client = PolicyContractClient::new(&env, &get_policy_contract(&env));
        if !policy_client.is_authorised(&caller) {
            panic!("Access restricted to admin and employees");
        }

        let mut claim = get_claim(&env, &claim_id).expect("Claim not found");
        if claim.status == ClaimStatus::Paid {
            panic!("Claim already paid");
        }

        claim.status = status;
        set_claim(&env, &claim);

        env.events().publish(
            (Symbol::new(&env, "claims"), Symbol::new(&env, "status")),
            (claim_id, status),
        );
    }

    // ───────────── VIEW FUNCTIONS ─────────────

    /// Get a claim record.
    pub fn get_claim(env: Env, claim_id: BytesN<32>) -> Option<Claim> {
        get_claim(&env, &claim_id)
    }

    /// List the claim ids filed against a policy. Only the policy holder
    /// may list them.
    pub fn get_claims_by_policy(env: Env, holder: Address, policy_id: BytesN<32>) -> Vec<BytesN<32>> {
        holder.require_auth();

        let policy_client = PolicyContractClient::new(&env, &get_policy_contract(&env));
        let policy = policy_client
            .get_policy(&policy_id)
            .expect("Policy not found");
        if policy.holder != holder {
            panic!("Only the policy holder can view claims");
        }

        get_policy_claims(&env, &policy_id)
    }

    /// Number of claims ever logged.
    pub fn get_claim_count(env: Env) -> u64 {
        get_claim_count(&env)
    }

    /// Estimate the payout for a damage share before review.
    ///
    /// `house_value` is the property value in token base units and
    /// `damage_bps` the assessed damage share in basis points
    /// (10_000 = total loss). The estimate is the insured 80% of the
    /// property value scaled by the damage share.
    pub fn estimate_payout(_env: Env, house_value: i128, damage_bps: u32) -> i128 {
        if house_value <= 0 {
            panic!("Amount must be positive");
        }
        if damage_bps as i128 > BASIS_POINTS {
            panic!("Invalid damage share");
        }

        let insured_value = house_value * COVERAGE_BPS / BASIS_POINTS;
        insured_value * damage_bps as i128 / BASIS_POINTS
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn derive_claim_id(env: &Env, policy_id: &BytesN<32>, sequence: u64) -> BytesN<32> {
        let preimage = (policy_id.clone(), env.ledger().timestamp(), sequence).to_xdr(env);
        env.crypto().sha256(&preimage).into()
    }
}
