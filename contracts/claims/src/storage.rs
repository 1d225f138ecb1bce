use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::types::{Claim, DataKey};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_policy_contract(env: &Env, policy_contract: &Address) {
    env.storage().instance().set(&DataKey::Config, policy_contract);
}

pub fn get_policy_contract(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_claim(env: &Env, claim: &Claim) {
    env.storage()
        .persistent()
        .set(&DataKey::Claim(claim.claim_id.clone()), claim);
}

pub fn get_claim(env: &Env, claim_id: &BytesN<32>) -> Option<Claim> {
    env.storage()
        .persistent()
        .get(&DataKey::Claim(claim_id.clone()))
}

pub fn get_policy_claims(env: &Env, policy_id: &BytesN<32>) -> Vec<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::PolicyClaims(policy_id.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn add_policy_claim(env: &Env, policy_id: &BytesN<32>, claim_id: &BytesN<32>) {
    let mut claims = get_policy_claims(env, policy_id);
    claims.push_back(claim_id.clone());
    env.storage()
        .persistent()
        .set(&DataKey::PolicyClaims(policy_id.clone()), &claims);
}

pub fn get_claim_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ClaimCount)
        .unwrap_or(0)
}

pub fn increment_claim_count(env: &Env) -> u64 {
    let count = get_claim_count(env) + 1;
    env.storage().instance().set(&DataKey::ClaimCount, &count);
    count
}
