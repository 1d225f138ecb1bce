#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Symbol};

use insurance_escrow::EscrowContractClient;
use insurance_policy::{types::PolicyStatus, PolicyContractClient};

//
// ──────────────────────────────────────────────────────────
// DATA KEYS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
pub enum DataKey {
    Config, // PaymentConfig
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PaymentConfig {
    pub policy_contract: Address,
    pub escrow_contract: Address,
}

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

/// Premium collection against the policy registry. Premiums land in the
/// escrow under the paying holder's balance; the first payment activates
/// a pending policy, a renewal payment reinstates an expired one.
#[contract]
pub struct PaymentContract;

#[contractimpl]
impl PaymentContract {
    // ───────────── INITIALIZATION ─────────────

    pub fn initialize(env: Env, policy_contract: Address, escrow_contract: Address) {
        if env.storage().instance().has(&DataKey::Config) {
            panic!("Already initialized");
        }

        let config = PaymentConfig {
            policy_contract,
            escrow_contract,
        };
        env.storage().instance().set(&DataKey::Config, &config);
    }

    // ───────────── PAYMENTS ─────────────

    /// Pay the premium on a pending or active policy. Only the policy
    /// holder may pay, and the amount must match the stored premium.
    pub fn pay_premium(env: Env, policy_id: BytesN<32>, holder: Address, amount: i128) {
        holder.require_auth();

        let config = Self::config(&env);
        let policy_client = PolicyContractClient::new(&env, &config.policy_contract);

        let policy = policy_client
            .get_policy(&policy_id)
            .expect("Policy not found");

        if policy.holder != holder {
            panic!("Not Policy Holder");
        }
        if policy.status == PolicyStatus::Expired {
            panic!("Policy expired, renew your policy");
        }
        if amount != policy.premium {
            panic!("Incorrect premium amount");
        }

        let escrow = EscrowContractClient::new(&env, &config.escrow_contract);
        escrow.deposit_funds(&policy_id, &holder, &amount);

        if policy.status == PolicyStatus::Pending {
            policy_client.activate_policy(&policy_id, &holder);
        }

        env.events().publish(
            (Symbol::new(&env, "payment"), Symbol::new(&env, "received")),
            (policy_id, holder, amount),
        );
    }

    /// Pay the renewal premium on an expired policy. Only the policy
    /// holder may renew, and the amount must match the stored premium.
    pub fn renew_policy(env: Env, policy_id: BytesN<32>, holder: Address, amount: i128) {
        holder.require_auth();

        let config = Self::config(&env);
        let policy_client = PolicyContractClient::new(&env, &config.policy_contract);

        let policy = policy_client
            .get_policy(&policy_id)
            .expect("Policy not found");

        if policy.holder != holder {
            panic!("Not Policy Holder");
        }
        if policy.status != PolicyStatus::Expired {
            panic!("Policy is not expired");
        }
        if amount != policy.premium {
            panic!("Incorrect renewal amount");
        }

        let escrow = EscrowContractClient::new(&env, &config.escrow_contract);
        escrow.deposit_funds(&policy_id, &holder, &amount);

        policy_client.renew_policy(&policy_id, &amount, &holder);

        env.events().publish(
            (Symbol::new(&env, "payment"), Symbol::new(&env, "renewed")),
            (policy_id, holder, amount),
        );
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn config(env: &Env) -> PaymentConfig {
        env.storage().instance().get(&DataKey::Config).unwrap()
    }
}

#[cfg(test)]
mod test;
