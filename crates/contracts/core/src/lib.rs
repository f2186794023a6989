#![no_std]

//! Shared helpers for the hotel booking contracts.
//!
//! Everything here is pure arithmetic or a thin read of the host
//! environment, so the tools crate can reuse the same commission math
//! off-chain.

use soroban_sdk::{Address, Env, IntoVal, Val};

/// Rates are whole percentages.
pub const PERCENT_SCALE: u32 = 100;

/// About one day of ledgers at five seconds each.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Remaining TTL below which a persistent entry gets extended.
pub const PERSISTENT_TTL_THRESHOLD: u32 = DAY_IN_LEDGERS;
/// TTL a persistent entry is extended to.
pub const PERSISTENT_TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

pub const INSTANCE_TTL_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub const INSTANCE_TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

/// True when `rate_percentage` is within `0..=100`.
pub fn is_valid_percentage(rate_percentage: u32) -> bool {
    rate_percentage <= PERCENT_SCALE
}

/// Commission owed on a booking: floor(booking_value * rate / 100).
///
/// Returns `None` for a negative booking value or on overflow.
pub fn commission_amount(booking_value: i128, rate_percentage: u32) -> Option<i128> {
    if booking_value < 0 {
        return None;
    }
    booking_value
        .checked_mul(i128::from(rate_percentage))
        .map(|scaled| scaled / i128::from(PERCENT_SCALE))
}

/// A window is valid only when it ends strictly after it starts.
pub fn is_valid_window(start: u32, end: u32) -> bool {
    end > start
}

/// Inclusive on both ends.
pub fn window_contains(start: u32, end: u32, height: u32) -> bool {
    start <= height && height <= end
}

pub fn is_hotel_or_admin(caller: &Address, hotel: &Address, admin: &Address) -> bool {
    caller == hotel || caller == admin
}

/// True when `caller` is one of `parties` or the admin.
pub fn is_party_or_admin(caller: &Address, parties: &[&Address], admin: &Address) -> bool {
    caller == admin || parties.iter().any(|party| *party == caller)
}

/// The ledger sequence stands in for block height.
pub fn current_height(env: &Env) -> u32 {
    env.ledger().sequence()
}

/// Extend the TTL of a persistent entry after a write.
pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

/// Extend the contract instance (and its admin entry).
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

#[cfg(test)]
extern crate std;
