//! Storage keys and records for room allocations.
use booking_core::{bump_instance, bump_persistent};
use soroban_sdk::{contracttype, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract admin
    Admin,
    /// Allocation by (hotel, client)
    Allocation(Address, Address),
    /// Booking by (hotel, client, booking_id)
    Booking(Address, Address, String),
}

/// Block of rooms a hotel reserves for a client over a ledger window.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationContract {
    pub total_rooms: u32,
    pub used_rooms: u32,
    pub minimum_commitment: u32,
    pub start_date: u32,
    pub end_date: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Booking {
    pub rooms: u32,
    pub check_in: u32,
    pub check_out: u32,
    pub fulfilled: bool,
}

pub(crate) fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub(crate) fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub(crate) fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub(crate) fn get_allocation(env: &Env, hotel: &Address, client: &Address) -> Option<AllocationContract> {
    env.storage()
        .persistent()
        .get(&DataKey::Allocation(hotel.clone(), client.clone()))
}

pub(crate) fn set_allocation(
    env: &Env,
    hotel: &Address,
    client: &Address,
    allocation: &AllocationContract,
) {
    let key = DataKey::Allocation(hotel.clone(), client.clone());
    env.storage().persistent().set(&key, allocation);
    bump_persistent(env, &key);
}

pub(crate) fn get_booking(
    env: &Env,
    hotel: &Address,
    client: &Address,
    booking_id: &String,
) -> Option<Booking> {
    env.storage().persistent().get(&DataKey::Booking(
        hotel.clone(),
        client.clone(),
        booking_id.clone(),
    ))
}

pub(crate) fn set_booking(
    env: &Env,
    hotel: &Address,
    client: &Address,
    booking_id: &String,
    booking: &Booking,
) {
    let key = DataKey::Booking(hotel.clone(), client.clone(), booking_id.clone());
    env.storage().persistent().set(&key, booking);
    bump_persistent(env, &key);
}
