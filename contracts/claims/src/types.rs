use soroban_sdk::{contracttype, Address, BytesN};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClaimStatus {
    Logged = 0,
    Approved = 1,
    Rejected = 2,
    Paid = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    pub claim_id: BytesN<32>,
    pub policy_id: BytesN<32>,
    pub claimant: Address,
    pub amount: i128,
    pub ml_score: u32,          // Externally computed damage score, 0..=100
    pub manual_review: bool,    // Flagged for reviewer attention
    pub date_filed: u64,
    pub status: ClaimStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Claim(BytesN<32>),
    PolicyClaims(BytesN<32>),
    ClaimCount,
}
