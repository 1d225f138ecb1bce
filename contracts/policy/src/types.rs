use soroban_sdk::{contracttype, Address, BytesN};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PolicyStatus {
    Pending = 0,
    Active = 1,
    Expired = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    pub holder: Address,
    pub premium: i128,
    pub sum_insured: i128,
    pub status: PolicyStatus,
    pub start_date: u64,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Employee(Address),
    Policy(BytesN<32>),
    PolicyCount,
}
