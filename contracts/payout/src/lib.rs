#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Symbol};

use insurance_claims::{types::ClaimStatus, ClaimsContractClient};
use insurance_escrow::EscrowContractClient;
use insurance_policy::PolicyContractClient;

//
// ──────────────────────────────────────────────────────────
// DATA KEYS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
pub enum DataKey {
    Config, // PayoutConfig
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PayoutConfig {
    pub policy_contract: Address,
    pub escrow_contract: Address,
    pub claims_contract: Address,
}

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

/// Settlement of approved claims. The caller funds a one-shot escrow
/// ledger keyed by the claim id, the escrow releases it to the claimant
/// and the claim is marked paid.
#[contract]
pub struct PayoutContract;

#[contractimpl]
impl PayoutContract {
    // ───────────── INITIALIZATION ─────────────

    pub fn initialize(
        env: Env,
        policy_contract: Address,
        escrow_contract: Address,
        claims_contract: Address,
    ) {
        if env.storage().instance().has(&DataKey::Config) {
            panic!("Already initialized");
        }

        let config = PayoutConfig {
            policy_contract,
            escrow_contract,
            claims_contract,
        };
        env.storage().instance().set(&DataKey::Config, &config);
    }

    // ───────────── PAYOUT ─────────────

    /// Pay out an approved claim to its claimant. Admin or employee
    /// only; `amount` must match the claimed amount and is drawn from
    /// the caller.
    pub fn process_payout(env: Env, caller: Address, claim_id: BytesN<32>, amount: i128) {
        caller.require_auth();

        let config = Self::config(&env);
        let policy_client = PolicyContractClient::new(&env, &config.policy_contract);
        if !policy_client.is_authorised(&caller) {
            panic!("Not authorised");
        }

        let claims_client = ClaimsContractClient::new(&env, &config.claims_contract);
        let claim = claims_client.get_claim(&claim_id).expect("Claim not found");

        if claim.status != ClaimStatus::Approved {
            panic!("Claim is not approved");
        }
        if amount != claim.amount {
            panic!("Incorrect payout amount");
        }

        let escrow = EscrowContractClient::new(&env, &config.escrow_contract);
        escrow.deposit_funds(&claim_id, &caller, &amount);

        env.events().publish(
            (Symbol::new(&env, "payout"), Symbol::new(&env, "deposited")),
            (claim_id.clone(), amount),
        );

        escrow.release_funds(&caller, &claim_id, &claim.claimant);
        claims_client.update_claim_status(&caller, &claim_id, &ClaimStatus::Paid);

        env.events().publish(
            (Symbol::new(&env, "payout"), Symbol::new(&env, "paid")),
            (claim_id, claim.claimant, amount),
        );
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn config(env: &Env) -> PayoutConfig {
        env.storage().instance().get(&DataKey::Config).unwrap()
    }
}
