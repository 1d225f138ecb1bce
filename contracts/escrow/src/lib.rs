#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, token, Address, BytesN, Env, Symbol, Vec,
};

use insurance_policy::PolicyContractClient;

//
// ──────────────────────────────────────────────────────────
// DATA KEYS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
pub enum DataKey {
    Config,                          // EscrowConfig
    Balance(BytesN<32>, Address),    // Deposited amount per ledger id and depositor
    Depositors(BytesN<32>),          // Vec<Address> with a balance under a ledger id
    Total(BytesN<32>),               // i128 total held under a ledger id
}

//
// ──────────────────────────────────────────────────────────
// STRUCTS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug)]
pub struct EscrowConfig {
    pub policy_contract: Address,
    pub payment_token: Address,
}

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

/// Balance ledger holding premium and payout funds until release.
///
/// Ledger ids are policy ids for premium deposits; the payout contract
/// keys its one-shot payout ledgers by claim id.
#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    // ───────────── INITIALIZATION ─────────────

    /// Link the escrow to the policy registry and the payment token.
    pub fn initialize(env: Env, policy_contract: Address, payment_token: Address) {
        if env.storage().instance().has(&DataKey::Config) {
            panic!("Already initialized");
        }

        let config = EscrowConfig {
            policy_contract,
            payment_token,
        };
        env.storage().instance().set(&DataKey::Config, &config);
    }

    // ───────────── FUND MANAGEMENT ─────────────

    /// Deposit funds under a ledger id, credited to `depositor`.
    ///
    /// The depositor must be the admin, an employee, or the holder of
    /// the policy the ledger id names.
    pub fn deposit_funds(env: Env, ledger_id: BytesN<32>, depositor: Address, amount: i128) {
        depositor.require_auth();

        if amount <= 0 {
            panic!("Amount must be positive");
        }

        let config = Self::config(&env);
        let policy = PolicyContractClient::new(&env, &config.policy_contract);

        let allowed = policy.is_authorised(&depositor)
            || policy
                .get_policy(&ledger_id)
                .map_or(false, |p| p.holder == depositor);
        if !allowed {
            panic!("Access restricted");
        }

        let token_client = token::Client::new(&env, &config.payment_token);
        token_client.transfer(&depositor, &env.current_contract_address(), &amount);

        let balance = Self::get_balance(env.clone(), ledger_id.clone(), depositor.clone());
        env.storage().persistent().set(
            &DataKey::Balance(ledger_id.clone(), depositor.clone()),
            &(balance + amount),
        );

        let mut depositors: Vec<Address> = env
            .storage()
            .persistent()
            .get(&DataKey::Depositors(ledger_id.clone()))
            .unwrap_or(Vec::new(&env));
        if !depositors.contains(&depositor) {
            depositors.push_back(depositor.clone());
            env.storage()
                .persistent()
                .set(&DataKey::Depositors(ledger_id.clone()), &depositors);
        }

        let total = Self::get_total(env.clone(), ledger_id.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Total(ledger_id.clone()), &(total + amount));

        env.events().publish(
            (Symbol::new(&env, "escrow"), Symbol::new(&env, "deposit")),
            (ledger_id, depositor, amount),
        );
    }

    /// Release everything held under a ledger id to `recipient` and
    /// reset all depositor balances. Admin or employee only.
    pub fn release_funds(env: Env, caller: Address, ledger_id: BytesN<32>, recipient: Address) {
        caller.require_auth();

        let config = Self::config(&env);
        let policy = PolicyContractClient::new(&env, &config.policy_contract);
        if !policy.is_authorised(&caller) {
            panic!("Not authorised");
        }

        let total = Self::get_total(env.clone(), ledger_id.clone());
        if total <= 0 {
            panic!("No funds in escrow");
        }

        let token_client = token::Client::new(&env, &config.payment_token);
        token_client.transfer(&env.current_contract_address(), &recipient, &total);

        let depositors: Vec<Address> = env
            .storage()
            .persistent()
            .get(&DataKey::Depositors(ledger_id.clone()))
            .unwrap_or(Vec::new(&env));
        for depositor in depositors.iter() {
            env.storage()
                .persistent()
                .remove(&DataKey::Balance(ledger_id.clone(), depositor));
        }
        env.storage()
            .persistent()
            .remove(&DataKey::Depositors(ledger_id.clone()));
        env.storage()
            .persistent()
            .remove(&DataKey::Total(ledger_id.clone()));

        env.events().publish(
            (Symbol::new(&env, "escrow"), Symbol::new(&env, "release")),
            (ledger_id, recipient, total),
        );
    }

    // ───────────── VIEW FUNCTIONS ─────────────

    /// Amount deposited under a ledger id by a single depositor.
    pub fn get_balance(env: Env, ledger_id: BytesN<32>, depositor: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(ledger_id, depositor))
            .unwrap_or(0)
    }

    /// Total amount held under a ledger id.
    pub fn get_total(env: Env, ledger_id: BytesN<32>) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Total(ledger_id))
            .unwrap_or(0)
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn config(env: &Env) -> EscrowConfig {
        env.storage().instance().get(&DataKey::Config).unwrap()
    }
}
