use soroban_sdk::{Address, BytesN, Env};

use crate::types::{DataKey, Policy};

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Admin).unwrap()
}

pub fn set_employee(env: &Env, employee: &Address, active: bool) {
    if active {
        env.storage()
            .persistent()
            .set(&DataKey::Employee(employee.clone()), &true);
    } else {
        env.storage()
            .persistent()
            .remove(&DataKey::Employee(employee.clone()));
    }
}

pub fn is_employee(env: &Env, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Employee(addr.clone()))
        .unwrap_or(false)
}

pub fn is_authorised(env: &Env, addr: &Address) -> bool {
    get_admin(env) == *addr || is_employee(env, addr)
}

pub fn set_policy(env: &Env, policy_id: &BytesN<32>, policy: &Policy) {
    env.storage()
        .persistent()
        .set(&DataKey::Policy(policy_id.clone()), policy);
}

pub fn get_policy(env: &Env, policy_id: &BytesN<32>) -> Option<Policy> {
    env.storage()
        .persistent()
        .get(&DataKey::Policy(policy_id.clone()))
}

pub fn get_policy_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PolicyCount)
        .unwrap_or(0)
}

pub fn increment_policy_count(env: &Env) -> u64 {
    let count = get_policy_count(env) + 1;
    env.storage().instance().set(&DataKey::PolicyCount, &count);
    count
}
