#![no_std]

//! Commission rates negotiated between hotels and booking agencies, and the
//! commissions owed on individual bookings.

use booking_core::{commission_amount, current_height, is_hotel_or_admin, is_valid_percentage};
use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String};

mod events;
mod storage;

pub use events::{CommissionPaid, CommissionRecorded, RateDeactivated, RateSet};
pub use storage::{CommissionPayment, CommissionRate, DataKey};

use events::*;
use storage::*;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CommissionError {
    Unauthorized = 1,
    InvalidPercentage = 2,
    RateNotFound = 3,
    RateInactive = 4,
    PaymentNotFound = 5,
    AlreadyInitialized = 6,
    NotInitialized = 7,
    InvalidAmount = 8,
    PaymentAlreadyRecorded = 9,
    AlreadyPaid = 10,
}

#[contract]
pub struct CommissionManagementContract;

impl CommissionManagementContract {
    fn read_admin(env: &Env) -> Result<Address, CommissionError> {
        get_admin(env).ok_or(CommissionError::NotInitialized)
    }

    /// The caller must sign and be either the hotel or the admin.
    fn require_hotel_or_admin(
        env: &Env,
        caller: &Address,
        hotel: &Address,
    ) -> Result<(), CommissionError> {
        caller.require_auth();
        let admin = Self::read_admin(env)?;
        if !is_hotel_or_admin(caller, hotel, &admin) {
            return Err(CommissionError::Unauthorized);
        }
        Ok(())
    }

    /// Commission owed under the active rate for this hotel/agency pair.
    fn quote(
        env: &Env,
        hotel: &Address,
        agency: &Address,
        booking_value: i128,
    ) -> Result<i128, CommissionError> {
        let rate = get_rate(env, hotel, agency).ok_or(CommissionError::RateNotFound)?;
        if !rate.active {
            return Err(CommissionError::RateInactive);
        }
        commission_amount(booking_value, rate.rate_percentage).ok_or(CommissionError::InvalidAmount)
    }
}

#[contractimpl]
impl CommissionManagementContract {
    /// Store the admin. Can only be called once.
    pub fn init(env: Env, admin: Address) -> Result<(), CommissionError> {
        if has_admin(&env) {
            return Err(CommissionError::AlreadyInitialized);
        }
        set_admin(&env, &admin);
        Ok(())
    }

    /// Set (or replace) the rate a hotel pays an agency. A replaced rate is
    /// active again.
    pub fn set_commission_rate(
        env: Env,
        caller: Address,
        hotel: Address,
        agency: Address,
        rate_percentage: u32,
    ) -> Result<(), CommissionError> {
        Self::require_hotel_or_admin(&env, &caller, &hotel)?;

        if !is_valid_percentage(rate_percentage) {
            return Err(CommissionError::InvalidPercentage);
        }

        let rate = CommissionRate {
            rate_percentage,
            active: true,
        };
        set_rate(&env, &hotel, &agency, &rate);

        emit_rate_set(&env, hotel, agency, rate_percentage);
        Ok(())
    }

    pub fn deactivate_commission_rate(
        env: Env,
        caller: Address,
        hotel: Address,
        agency: Address,
    ) -> Result<(), CommissionError> {
        Self::require_hotel_or_admin(&env, &caller, &hotel)?;

        let mut rate = get_rate(&env, &hotel, &agency).ok_or(CommissionError::RateNotFound)?;
        rate.active = false;
        set_rate(&env, &hotel, &agency, &rate);

        emit_rate_deactivated(&env, hotel, agency);
        Ok(())
    }

    /// Record the commission owed on a booking under the current active rate.
    pub fn record_commission(
        env: Env,
        caller: Address,
        hotel: Address,
        agency: Address,
        booking_id: String,
        booking_value: i128,
    ) -> Result<(), CommissionError> {
        Self::require_hotel_or_admin(&env, &caller, &hotel)?;

        let amount = Self::quote(&env, &hotel, &agency, booking_value)?;

        if get_payment(&env, &hotel, &agency, &booking_id).is_some() {
            return Err(CommissionError::PaymentAlreadyRecorded);
        }

        let payment = CommissionPayment {
            amount,
            booking_value,
            paid: false,
            payment_date: 0,
        };
        set_payment(&env, &hotel, &agency, &booking_id, &payment);

        emit_commission_recorded(
            &env,
            CommissionRecorded {
                hotel,
                agency,
                booking_id,
                booking_value,
                amount,
            },
        );
        Ok(())
    }

    /// Mark a recorded commission as paid at the current ledger sequence.
    pub fn pay_commission(
        env: Env,
        caller: Address,
        hotel: Address,
        agency: Address,
        booking_id: String,
    ) -> Result<(), CommissionError> {
        Self::require_hotel_or_admin(&env, &caller, &hotel)?;

        let mut payment = get_payment(&env, &hotel, &agency, &booking_id)
            .ok_or(CommissionError::PaymentNotFound)?;
        if payment.paid {
            return Err(CommissionError::AlreadyPaid);
        }

        payment.paid = true;
        payment.payment_date = current_height(&env);
        set_payment(&env, &hotel, &agency, &booking_id, &payment);

        emit_commission_paid(
            &env,
            CommissionPaid {
                hotel,
                agency,
                booking_id,
                amount: payment.amount,
                payment_date: payment.payment_date,
            },
        );
        Ok(())
    }

    /// Preview the commission a booking would generate. Nothing is stored.
    pub fn calculate_commission(
        env: Env,
        hotel: Address,
        agency: Address,
        booking_value: i128,
    ) -> Result<i128, CommissionError> {
        Self::quote(&env, &hotel, &agency, booking_value)
    }

    pub fn get_commission_rate(env: Env, hotel: Address, agency: Address) -> Option<CommissionRate> {
        get_rate(&env, &hotel, &agency)
    }

    pub fn get_commission_payment(
        env: Env,
        hotel: Address,
        agency: Address,
        booking_id: String,
    ) -> Option<CommissionPayment> {
        get_payment(&env, &hotel, &agency, &booking_id)
    }

    pub fn admin(env: Env) -> Result<Address, CommissionError> {
        Self::read_admin(&env)
    }
}

#[cfg(test)]
extern crate std;
