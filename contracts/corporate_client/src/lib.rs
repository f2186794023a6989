#![no_std]

use booking_core::{
    bump_instance, bump_persistent, current_height, is_hotel_or_admin, is_valid_window,
    window_contains,
};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, Symbol};


#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Agreement(Address, Address), // (hotel, client)
}

/// Negotiated corporate rate. Dates are ledger sequences.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateAgreement {
    pub rate: u32,
    pub start_date: u32,
    pub end_date: u32,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AgreementChangedEvent {
    pub hotel: Address,
    pub client: Address,
    pub rate: u32,
    pub end_date: u32,
    pub active: bool,
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AgreementError {
    Unauthorized = 1,
    InvalidDates = 2,
    AgreementNotFound = 3,
    AlreadyInitialized = 4,
    NotInitialized = 5,
}

#[contract]
pub struct CorporateClientContract;

#[contractimpl]
impl CorporateClientContract {
    /// Initialize the contract with an admin address.
    pub fn init(env: Env, admin: Address) -> Result<(), AgreementError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(AgreementError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        bump_instance(&env);
        Ok(())
    }

    /// Create (or replace) the rate agreement between a hotel and a
    /// corporate client. Hotel or admin only.
    pub fn create_rate_agreement(
        env: Env,
        caller: Address,
        hotel: Address,
        client: Address,
        rate: u32,
        start_date: u32,
        end_date: u32,
    ) -> Result<(), AgreementError> {
        require_hotel_or_admin(&env, &caller, &hotel)?;

        if !is_valid_window(start_date, end_date) {
            return Err(AgreementError::InvalidDates);
        }

        let agreement = RateAgreement {
            rate,
            start_date,
            end_date,
            active: true,
        };
        write_agreement(&env, &hotel, &client, &agreement);
        publish_change(&env, "agreement_created", hotel, client, &agreement);

        Ok(())
    }

    /// Change the rate and end date of an existing agreement. The start date
    /// and active flag are kept.
    pub fn update_rate_agreement(
        env: Env,
        caller: Address,
        hotel: Address,
        client: Address,
        rate: u32,
        end_date: u32,
    ) -> Result<(), AgreementError> {
        require_hotel_or_admin(&env, &caller, &hotel)?;

        let mut agreement = read_agreement(&env, &hotel, &client)?;
        if !is_valid_window(agreement.start_date, end_date) {
            return Err(AgreementError::InvalidDates);
        }

        agreement.rate = rate;
        agreement.end_date = end_date;
        write_agreement(&env, &hotel, &client, &agreement);
        publish_change(&env, "agreement_updated", hotel, client, &agreement);

        Ok(())
    }

    pub fn deactivate_rate_agreement(
        env: Env,
        caller: Address,
        hotel: Address,
        client: Address,
    ) -> Result<(), AgreementError> {
        require_hotel_or_admin(&env, &caller, &hotel)?;

        let mut agreement = read_agreement(&env, &hotel, &client)?;
        agreement.active = false;
        write_agreement(&env, &hotel, &client, &agreement);
        publish_change(&env, "agreement_deactivated", hotel, client, &agreement);

        Ok(())
    }

    pub fn get_rate_agreement(env: Env, hotel: Address, client: Address) -> Option<RateAgreement> {
        read_agreement(&env, &hotel, &client).ok()
    }

    /// True when the agreement exists, is active, and the current ledger
    /// falls inside its window.
    pub fn is_agreement_active(env: Env, hotel: Address, client: Address) -> bool {
        match read_agreement(&env, &hotel, &client) {
            Ok(agreement) => {
                agreement.active
                    && window_contains(agreement.start_date, agreement.end_date, current_height(&env))
            }
            Err(_) => false,
        }
    }

    pub fn admin(env: Env) -> Result<Address, AgreementError> {
        read_admin(&env)
    }
}

fn read_admin(env: &Env) -> Result<Address, AgreementError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(AgreementError::NotInitialized)
}

fn require_hotel_or_admin(env: &Env, caller: &Address, hotel: &Address) -> Result<(), AgreementError> {
    caller.require_auth();
    let admin = read_admin(env)?;
    if !is_hotel_or_admin(caller, hotel, &admin) {
        return Err(AgreementError::Unauthorized);
    }
    Ok(())
}

fn read_agreement(env: &Env, hotel: &Address, client: &Address) -> Result<RateAgreement, AgreementError> {
    env.storage()
        .persistent()
        .get(&DataKey::Agreement(hotel.clone(), client.clone()))
        .ok_or(AgreementError::AgreementNotFound)
}

fn write_agreement(env: &Env, hotel: &Address, client: &Address, agreement: &RateAgreement) {
    let key = DataKey::Agreement(hotel.clone(), client.clone());
    env.storage().persistent().set(&key, agreement);
    bump_persistent(env, &key);
}

fn publish_change(env: &Env, topic: &str, hotel: Address, client: Address, agreement: &RateAgreement) {
    env.events().publish(
        (Symbol::new(env, topic),),
        AgreementChangedEvent {
            hotel,
            client,
            rate: agreement.rate,
            end_date: agreement.end_date,
            active: agreement.active,
        },
    );
}
