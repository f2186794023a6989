#![no_std]
#![allow(clippy::too_many_arguments)]

//! Room Allocation Contract
//!
//! Hotels reserve blocks of rooms for corporate clients over a ledger
//! window. Bookings draw down the block, and the hotel marks each booking
//! fulfilled once the stay happens.

use booking_core::{is_hotel_or_admin, is_party_or_admin, is_valid_window};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol};

mod errors;
mod storage;

#[cfg(test)]
mod tests;

pub use errors::AllocationError;
pub use storage::{AllocationContract, Booking, DataKey};

use storage::*;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationCreatedEvent {
    pub hotel: Address,
    pub client: Address,
    pub total_rooms: u32,
    pub minimum_commitment: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookingRecordedEvent {
    pub hotel: Address,
    pub client: Address,
    pub booking_id: String,
    pub rooms: u32,
    pub used_rooms: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookingFulfilledEvent {
    pub hotel: Address,
    pub client: Address,
    pub booking_id: String,
}

#[contract]
pub struct RoomAllocationContract;

fn read_admin(env: &Env) -> Result<Address, AllocationError> {
    get_admin(env).ok_or(AllocationError::NotInitialized)
}

#[contractimpl]
impl RoomAllocationContract {
    /// Initializes the contract with its admin. Can only be called once.
    pub fn init(env: Env, admin: Address) -> Result<(), AllocationError> {
        if has_admin(&env) {
            return Err(AllocationError::AlreadyInitialized);
        }
        set_admin(&env, &admin);
        Ok(())
    }

    /// Creates (or replaces) the allocation between a hotel and a client.
    /// Replacing keeps the rooms already booked under the pair.
    ///
    /// Authorization: hotel or admin.
    ///
    /// # Errors
    /// * `CommitmentExceedsTotal` - `minimum_commitment > total_rooms`
    /// * `InvalidDates` - `end_date <= start_date`
    /// * `CapacityExceeded` - `total_rooms` is below the rooms already booked
    pub fn create_allocation_contract(
        env: Env,
        caller: Address,
        hotel: Address,
        client: Address,
        total_rooms: u32,
        minimum_commitment: u32,
        start_date: u32,
        end_date: u32,
    ) -> Result<(), AllocationError> {
        caller.require_auth();
        let admin = read_admin(&env)?;
        if !is_hotel_or_admin(&caller, &hotel, &admin) {
            return Err(AllocationError::Unauthorized);
        }

        if total_rooms < minimum_commitment {
            return Err(AllocationError::CommitmentExceedsTotal);
        }
        if !is_valid_window(start_date, end_date) {
            return Err(AllocationError::InvalidDates);
        }

        // Existing bookings stay counted against the new block.
        let used_rooms = get_allocation(&env, &hotel, &client)
            .map(|existing| existing.used_rooms)
            .unwrap_or(0);
        if total_rooms < used_rooms {
            return Err(AllocationError::CapacityExceeded);
        }

        let allocation = AllocationContract {
            total_rooms,
            used_rooms,
            minimum_commitment,
            start_date,
            end_date,
        };
        set_allocation(&env, &hotel, &client, &allocation);

        env.events().publish(
            (Symbol::new(&env, "allocation_created"),),
            AllocationCreatedEvent {
                hotel,
                client,
                total_rooms,
                minimum_commitment,
            },
        );
        Ok(())
    }

    /// Books rooms against an allocation.
    ///
    /// Authorization: client, hotel or admin.
    ///
    /// # Errors
    /// * `AllocationNotFound` - no allocation for this pair
    /// * `CapacityExceeded` - booking would push `used_rooms` past `total_rooms`
    /// * `OutsideContractPeriod` - stay starts before or ends after the window
    /// * `BookingAlreadyExists` - booking ID already recorded
    pub fn record_booking(
        env: Env,
        caller: Address,
        hotel: Address,
        client: Address,
        booking_id: String,
        rooms: u32,
        check_in: u32,
        check_out: u32,
    ) -> Result<(), AllocationError> {
        caller.require_auth();
        let admin = read_admin(&env)?;
        if !is_party_or_admin(&caller, &[&client, &hotel], &admin) {
            return Err(AllocationError::Unauthorized);
        }

        let mut allocation =
            get_allocation(&env, &hotel, &client).ok_or(AllocationError::AllocationNotFound)?;

        let used_rooms = allocation
            .used_rooms
            .checked_add(rooms)
            .filter(|used| *used <= allocation.total_rooms)
            .ok_or(AllocationError::CapacityExceeded)?;

        if check_in < allocation.start_date || check_out > allocation.end_date {
            return Err(AllocationError::OutsideContractPeriod);
        }

        if get_booking(&env, &hotel, &client, &booking_id).is_some() {
            return Err(AllocationError::BookingAlreadyExists);
        }

        allocation.used_rooms = used_rooms;
        set_allocation(&env, &hotel, &client, &allocation);

        let booking = Booking {
            rooms,
            check_in,
            check_out,
            fulfilled: false,
        };
        set_booking(&env, &hotel, &client, &booking_id, &booking);

        env.events().publish(
            (Symbol::new(&env, "booking_recorded"),),
            BookingRecordedEvent {
                hotel,
                client,
                booking_id,
                rooms,
                used_rooms,
            },
        );
        Ok(())
    }

    /// Marks a booking as fulfilled. Only the hotel itself may do this; the
    /// admin is not accepted.
    pub fn fulfill_booking(
        env: Env,
        caller: Address,
        hotel: Address,
        client: Address,
        booking_id: String,
    ) -> Result<(), AllocationError> {
        caller.require_auth();
        if caller != hotel {
            return Err(AllocationError::Unauthorized);
        }

        let mut booking = get_booking(&env, &hotel, &client, &booking_id)
            .ok_or(AllocationError::BookingNotFound)?;
        if booking.fulfilled {
            return Err(AllocationError::AlreadyFulfilled);
        }

        booking.fulfilled = true;
        set_booking(&env, &hotel, &client, &booking_id, &booking);

        env.events().publish(
            (Symbol::new(&env, "booking_fulfilled"),),
            BookingFulfilledEvent {
                hotel,
                client,
                booking_id,
            },
        );
        Ok(())
    }

    pub fn get_allocation_contract(
        env: Env,
        hotel: Address,
        client: Address,
    ) -> Option<AllocationContract> {
        get_allocation(&env, &hotel, &client)
    }

    pub fn get_booking(
        env: Env,
        hotel: Address,
        client: Address,
        booking_id: String,
    ) -> Option<Booking> {
        storage::get_booking(&env, &hotel, &client, &booking_id)
    }

    /// False when no allocation exists.
    pub fn is_minimum_commitment_met(env: Env, hotel: Address, client: Address) -> bool {
        get_allocation(&env, &hotel, &client)
            .map(|allocation| allocation.used_rooms >= allocation.minimum_commitment)
            .unwrap_or(false)
    }

    /// Rooms still available under the allocation.
    pub fn remaining_rooms(env: Env, hotel: Address, client: Address) -> Result<u32, AllocationError> {
        let allocation =
            get_allocation(&env, &hotel, &client).ok_or(AllocationError::AllocationNotFound)?;
        Ok(allocation.total_rooms - allocation.used_rooms)
    }

    pub fn admin(env: Env) -> Result<Address, AllocationError> {
        read_admin(&env)
    }
}
