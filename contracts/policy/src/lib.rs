#![no_std]

mod storage;
pub mod types;

use soroban_sdk::{contract, contractimpl, xdr::ToXdr, Address, BytesN, Env, Symbol};

use crate::storage::*;
use crate::types::*;

//
// ──────────────────────────────────────────────────────────
// CONSTANTS
// ──────────────────────────────────────────────────────────
//

const SECONDS_PER_DAY: u64 = 86_400;
/// Coverage term granted by creation and by each renewal.
const POLICY_TERM: u64 = 365 * SECONDS_PER_DAY;

const BASIS_POINTS: i128 = 10_000;
/// Insured fraction of the property value (80%).
const COVERAGE_BPS: i128 = 8_000;
/// Monthly premium rate on the insured value (0.2%).
const PREMIUM_RATE_BPS: i128 = 20;
/// Flat base premium in token base units, charged regardless of value.
const BASE_PREMIUM: i128 = 6_500;

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

#[contract]
pub struct PolicyContract;

#[contractimpl]
impl PolicyContract {
    // ───────────── INITIALIZATION ─────────────

    /// Initialize the policy registry with its administrator.
    pub fn initialize(env: Env, admin: Address) {
        admin.require_auth();

        if has_admin(&env) {
            panic!("Already initialized");
        }

        set_admin(&env, &admin);
        env.storage().instance().set(&DataKey::PolicyCount, &0u64);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "init")),
            admin,
        );
    }

    // ───────────── ROLE MANAGEMENT ─────────────

    /// Grant the employee role. Admin only.
    pub fn add_employee(env: Env, caller: Address, employee: Address) {
        caller.require_auth();
        if get_admin(&env) != caller {
            panic!("Not admin");
        }

        set_employee(&env, &employee, true);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "employee_added")),
            employee,
        );
    }

    /// Revoke the employee role. Admin only.
    pub fn remove_employee(env: Env, caller: Address, employee: Address) {
        caller.require_auth();
        if get_admin(&env) != caller {
            panic!("Not admin");
        }

        set_employee(&env, &employee, false);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "employee_removed")),
            employee,
        );
    }

    // ───────────── POLICY MANAGEMENT ─────────────

    /// Register a new policy for `holder`. Admin or employee only.
    ///
    /// The policy starts in `Pending` with no cover built up; the holder
    /// activates it by paying the first premium. Returns the derived
    /// policy identifier.
    pub fn create_policy(
        env: Env,
        caller: Address,
        holder: Address,
        premium: i128,
    ) -> BytesN<32> {
        caller.require_auth();
        if !is_authorised(&env, &caller) {
            panic!("Not authorised");
        }
        if premium <= 0 {
            panic!("Amount must be positive");
        }

        let sequence = increment_policy_count(&env);
        let policy_id = Self::derive_policy_id(&env, &holder, sequence);

        let start_date = env.ledger().timestamp();
        let policy = Policy {
            holder: holder.clone(),
            premium,
            sum_insured: 0,
            status: PolicyStatus::Pending,
            start_date,
            end_date: start_date + POLICY_TERM,
        };
        set_policy(&env, &policy_id, &policy);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "created")),
            (policy_id.clone(), holder, premium),
        );

        policy_id
    }

    /// Activate a pending policy. Only the policy holder may do this;
    /// the first premium is added to the built-up cover.
    pub fn activate_policy(env: Env, policy_id: BytesN<32>, holder: Address) {
        holder.require_auth();

        let mut policy = get_policy(&env, &policy_id).expect("Policy not found");

        if policy.holder != holder {
            panic!("Only the policy holder can activate the policy");
        }
        if policy.status != PolicyStatus::Pending {
            panic!("Policy not in pending state");
        }

        policy.status = PolicyStatus::Active;
        policy.sum_insured += policy.premium;
        set_policy(&env, &policy_id, &policy);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "activated")),
            policy_id,
        );
    }

    /// Mark a policy as expired. Admin or employee only.
    pub fn deactivate_policy(env: Env, caller: Address, policy_id: BytesN<32>) {
        caller.require_auth();
        if !is_authorised(&env, &caller) {
            panic!("Not authorised");
        }

        let mut policy = get_policy(&env, &policy_id).expect("Policy not found");
        policy.status = PolicyStatus::Expired;
        set_policy(&env, &policy_id, &policy);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "deactivated")),
            policy_id,
        );
    }

    /// Renew an expired policy for another term. Only the policy holder
    /// may renew; the renewal premium is added to the built-up cover and
    /// the end date is pushed out by one term.
    pub fn renew_policy(env: Env, policy_id: BytesN<32>, premium: i128, holder: Address) {
        holder.require_auth();

        let mut policy = get_policy(&env, &policy_id).expect("Policy not found");

        if policy.holder != holder {
            panic!("Only the policy holder can renew the policy");
        }
        if policy.status != PolicyStatus::Expired {
            panic!("Policy not expired");
        }
        if premium <= 0 {
            panic!("Amount must be positive");
        }

        let now = env.ledger().timestamp();
        let base = if policy.end_date > now {
            policy.end_date
        } else {
            now
        };

        policy.status = PolicyStatus::Active;
        policy.premium = premium;
        policy.sum_insured += premium;
        policy.end_date = base + POLICY_TERM;
        set_policy(&env, &policy_id, &policy);

        env.events().publish(
            (Symbol::new(&env, "policy"), Symbol::new(&env, "renewed")),
            (policy_id, premium),
        );
    }

    // ───────────── VIEW FUNCTIONS ─────────────

    /// Get a policy record.
    pub fn get_policy(env: Env, policy_id: BytesN<32>) -> Option<Policy> {
        get_policy(&env, &policy_id)
    }

    pub fn is_admin(env: Env, addr: Address) -> bool {
        get_admin(&env) == addr
    }

    pub fn is_employee(env: Env, addr: Address) -> bool {
        is_employee(&env, &addr)
    }

    /// True when `addr` is the admin or an employee.
    pub fn is_authorised(env: Env, addr: Address) -> bool {
        is_authorised(&env, &addr)
    }

    /// Number of policies ever created.
    pub fn get_policy_count(env: Env) -> u64 {
        get_policy_count(&env)
    }

    /// Quote a monthly premium for a property.
    ///
    /// `house_value` is the property value in token base units and
    /// `risk_bps` the location risk multiplier in basis points
    /// (10_000 = baseline risk). The quote is a flat base premium plus
    /// 0.2% of the insured value (80% of the property value), scaled by
    /// the risk multiplier.
    pub fn quote_premium(_env: Env, house_value: i128, risk_bps: u32) -> i128 {
        if house_value <= 0 {
            panic!("Amount must be positive");
        }
        if risk_bps == 0 {
            panic!("Invalid risk multiplier");
        }

        let insured_value = house_value * COVERAGE_BPS / BASIS_POINTS;
        let risk_based = insured_value * PREMIUM_RATE_BPS / BASIS_POINTS;

        BASE_PREMIUM + risk_based * risk_bps as i128 / BASIS_POINTS
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn derive_policy_id(env: &Env, holder: &Address, sequence: u64) -> BytesN<32> {
        let preimage = (holder.clone(), env.ledger().timestamp(), sequence).to_xdr(env);
        env.crypto().sha256(&preimage).into()
    }
}
