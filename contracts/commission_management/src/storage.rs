use booking_core::{bump_instance, bump_persistent};
use soroban_sdk::{contracttype, Address, Env, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Rate(Address, Address),            // (hotel, agency)
    Payment(Address, Address, String), // (hotel, agency, booking_id)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionRate {
    pub rate_percentage: u32,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionPayment {
    pub amount: i128,
    pub booking_value: i128,
    pub paid: bool,
    /// Ledger sequence at payment, 0 while unpaid.
    pub payment_date: u32,
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn get_rate(env: &Env, hotel: &Address, agency: &Address) -> Option<CommissionRate> {
    env.storage()
        .persistent()
        .get(&DataKey::Rate(hotel.clone(), agency.clone()))
}

pub fn set_rate(env: &Env, hotel: &Address, agency: &Address, rate: &CommissionRate) {
    let key = DataKey::Rate(hotel.clone(), agency.clone());
    env.storage().persistent().set(&key, rate);
    bump_persistent(env, &key);
}

pub fn get_payment(
    env: &Env,
    hotel: &Address,
    agency: &Address,
    booking_id: &String,
) -> Option<CommissionPayment> {
    env.storage().persistent().get(&DataKey::Payment(
        hotel.clone(),
        agency.clone(),
        booking_id.clone(),
    ))
}

pub fn set_payment(
    env: &Env,
    hotel: &Address,
    agency: &Address,
    booking_id: &String,
    payment: &CommissionPayment,
) {
    let key = DataKey::Payment(hotel.clone(), agency.clone(), booking_id.clone());
    env.storage().persistent().set(&key, payment);
    bump_persistent(env, &key);
}
