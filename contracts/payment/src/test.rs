#![cfg(test)]

use super::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use insurance_escrow::EscrowContract;
use insurance_policy::PolicyContract;

struct PaymentTest<'a> {
    env: Env,
    payment: PaymentContractClient<'a>,
    policy: PolicyContractClient<'a>,
    escrow: EscrowContractClient<'a>,
    token: TokenClient<'a>,
    token_admin: StellarAssetClient<'a>,
    admin: Address,
    holder: Address,
    policy_id: BytesN<32>,
}

const PREMIUM: i128 = 10_000;

fn setup<'a>() -> PaymentTest<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1000);

    let admin = Address::generate(&env);
    let holder = Address::generate(&env);
    let token_issuer = Address::generate(&env);

    let sac = env.register_stellar_asset_contract_v2(token_issuer);
    let token_address = sac.address();
    let token = TokenClient::new(&env, &token_address);
    let token_admin = StellarAssetClient::new(&env, &token_address);

    let policy_addr = env.register_contract(None, PolicyContract);
    let policy = PolicyContractClient::new(&env, &policy_addr);
    policy.initialize(&admin);

    let escrow_addr = env.register_contract(None, EscrowContract);
    let escrow = EscrowContractClient::new(&env, &escrow_addr);
    escrow.initialize(&policy_addr, &token_address);

    let payment_addr = env.register_contract(None, PaymentContract);
    let payment = PaymentContractClient::new(&env, &payment_addr);
    payment.initialize(&policy_addr, &escrow_addr);

    let policy_id = policy.create_policy(&admin, &holder, &PREMIUM);

    token_admin.mint(&holder, &(PREMIUM * 10));

    PaymentTest {
        env,
        payment,
        policy,
        escrow,
        token,
        token_admin,
        admin,
        holder,
        policy_id,
    }
}

// ───────────── PREMIUM PAYMENT TESTS ─────────────

#[test]
fn test_pay_premium_activates_pending_policy() {
    let t = setup();

    t.payment.pay_premium(&t.policy_id, &t.holder, &PREMIUM);

    let policy = t.policy.get_policy(&t.policy_id).unwrap();
    assert_eq!(policy.status, insurance_policy::types::PolicyStatus::Active);
    assert_eq!(policy.sum_insured, PREMIUM);

    // The premium is held in escrow under the holder's balance.
    assert_eq!(t.escrow.get_balance(&t.policy_id, &t.holder), PREMIUM);
    assert_eq!(t.token.balance(&t.escrow.address), PREMIUM);
}

#[test]
fn test_pay_premium_on_active_policy_builds_cover() {
    let t = setup();

    t.payment.pay_premium(&t.policy_id, &t.holder, &PREMIUM);
    t.payment.pay_premium(&t.policy_id, &t.holder, &PREMIUM);

    let policy = t.policy.get_policy(&t.policy_id).unwrap();
    assert_eq!(policy.status, insurance_policy::types::PolicyStatus::Active);
    assert_eq!(t.escrow.get_balance(&t.policy_id, &t.holder), PREMIUM * 2);
}

#[test]
#[should_panic(expected = "Not Policy Holder")]
fn test_pay_premium_rejects_non_holder() {
    let t = setup();
    t.token_admin.mint(&t.admin, &PREMIUM);

    t.payment.pay_premium(&t.policy_id, &t.admin, &PREMIUM);
}

#[test]
#[should_panic(expected = "Policy expired, renew your policy")]
fn test_pay_premium_rejects_expired_policy() {
    let t = setup();

    t.policy.deactivate_policy(&t.admin, &t.policy_id);
    t.payment.pay_premium(&t.policy_id, &t.holder, &PREMIUM);
}

#[test]
#[should_panic(expected = "Incorrect premium amount")]
fn test_pay_premium_rejects_wrong_amount() {
    let t = setup();

    t.payment.pay_premium(&t.policy_id, &t.holder, &(PREMIUM / 2));
}

#[test]
#[should_panic(expected = "Policy not found")]
fn test_pay_premium_rejects_unknown_policy() {
    let t = setup();

    let bogus = BytesN::from_array(&t.env, &[3u8; 32]);
    t.payment.pay_premium(&bogus, &t.holder, &PREMIUM);
}

// ───────────── RENEWAL TESTS ─────────────

#[test]
fn test_renew_expired_policy() {
    let t = setup();

    t.payment.pay_premium(&t.policy_id, &t.holder, &PREMIUM);
    t.policy.deactivate_policy(&t.admin, &t.policy_id);

    t.payment.renew_policy(&t.policy_id, &t.holder, &PREMIUM);

    let policy = t.policy.get_policy(&t.policy_id).unwrap();
    assert_eq!(policy.status, insurance_policy::types::PolicyStatus::Active);
    assert_eq!(policy.sum_insured, PREMIUM * 2);
    assert_eq!(t.escrow.get_balance(&t.policy_id, &t.holder), PREMIUM * 2);
}

#[test]
#[should_panic(expected = "Not Policy Holder")]
fn test_renew_rejects_non_holder() {
    let t = setup();
    t.token_admin.mint(&t.admin, &PREMIUM);

    t.policy.deactivate_policy(&t.admin, &t.policy_id);
    t.payment.renew_policy(&t.policy_id, &t.admin, &PREMIUM);
}

#[test]
#[should_panic(expected = "Policy is not expired")]
fn test_renew_rejects_live_policy() {
    let t = setup();

    t.payment.renew_policy(&t.policy_id, &t.holder, &PREMIUM);
}

#[test]
#[should_panic(expected = "Incorrect renewal amount")]
fn test_renew_rejects_wrong_amount() {
    let t = setup();

    t.policy.deactivate_policy(&t.admin, &t.policy_id);
    t.payment.renew_policy(&t.policy_id, &t.holder, &(PREMIUM / 2));
}
