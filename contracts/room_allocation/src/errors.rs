//! Room allocation error types.
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AllocationError {
    /// Caller is not allowed to act on this allocation or booking
    Unauthorized = 1,
    /// Minimum commitment is larger than the rooms on offer
    CommitmentExceedsTotal = 2,
    /// End date is not after start date
    InvalidDates = 3,
    /// No allocation exists for this hotel and client
    AllocationNotFound = 4,
    /// Booking would use more rooms than the allocation holds
    CapacityExceeded = 5,
    /// Stay falls outside the allocation period
    OutsideContractPeriod = 6,
    /// No booking with this ID
    BookingNotFound = 7,
    /// Contract already initialized
    AlreadyInitialized = 8,
    /// Contract has no admin yet
    NotInitialized = 9,
    /// Booking ID already used under this allocation
    BookingAlreadyExists = 10,
    /// Booking was already fulfilled
    AlreadyFulfilled = 11,
}
