use soroban_sdk::testutils::{Address as _, EnvTestConfig, Events as _, Ledger as _};
use soroban_sdk::{Address, Env, IntoVal, String, Symbol};

use crate::{AllocationError, BookingRecordedEvent, RoomAllocationContract, RoomAllocationContractClient};

fn test_env() -> Env {
    let env = Env::new_with_config(EnvTestConfig {
        capture_snapshot_at_drop: false,
    });
    env.mock_all_auths();
    env.ledger().set_sequence_number(100);
    env
}

struct Parties {
    admin: Address,
    hotel: Address,
    client: Address,
}

fn setup(env: &Env) -> (RoomAllocationContractClient<'_>, Parties) {
    let contract_id = env.register(RoomAllocationContract, ());
    let contract = RoomAllocationContractClient::new(env, &contract_id);
    let parties = Parties {
        admin: Address::generate(env),
        hotel: Address::generate(env),
        client: Address::generate(env),
    };
    contract.init(&parties.admin);
    (contract, parties)
}

/// 100 rooms, minimum 50, ledgers 50..=200.
fn standard_allocation(contract: &RoomAllocationContractClient<'_>, p: &Parties) {
    contract.create_allocation_contract(&p.hotel, &p.hotel, &p.client, &100, &50, &50, &200);
}

fn id(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

#[test]
fn creates_allocation_contract() {
    let env = test_env();
    let (contract, p) = setup(&env);

    standard_allocation(&contract, &p);

    let allocation = contract.get_allocation_contract(&p.hotel, &p.client).unwrap();
    assert_eq!(allocation.total_rooms, 100);
    assert_eq!(allocation.used_rooms, 0);
    assert_eq!(allocation.minimum_commitment, 50);
    assert_eq!(allocation.start_date, 50);
    assert_eq!(allocation.end_date, 200);
}

#[test]
fn create_validates_commitment_and_dates() {
    let env = test_env();
    let (contract, p) = setup(&env);

    assert_eq!(
        contract.try_create_allocation_contract(&p.hotel, &p.hotel, &p.client, &40, &50, &50, &200),
        Err(Ok(AllocationError::CommitmentExceedsTotal))
    );
    assert_eq!(
        contract.try_create_allocation_contract(&p.hotel, &p.hotel, &p.client, &100, &50, &200, &50),
        Err(Ok(AllocationError::InvalidDates))
    );
    assert_eq!(
        contract.try_create_allocation_contract(&p.hotel, &p.hotel, &p.client, &100, &50, &70, &70),
        Err(Ok(AllocationError::InvalidDates))
    );
    assert!(contract.get_allocation_contract(&p.hotel, &p.client).is_none());

    // A commitment equal to the block is fine.
    contract.create_allocation_contract(&p.admin, &p.hotel, &p.client, &50, &50, &50, &200);
    assert!(contract.get_allocation_contract(&p.hotel, &p.client).is_some());
}

#[test]
fn create_requires_hotel_or_admin() {
    let env = test_env();
    let (contract, p) = setup(&env);

    assert_eq!(
        contract.try_create_allocation_contract(&p.client, &p.hotel, &p.client, &100, &50, &50, &200),
        Err(Ok(AllocationError::Unauthorized))
    );
}

#[test]
fn recreating_allocation_keeps_booked_rooms() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b1"), &100, &75, &85);

    standard_allocation(&contract, &p);
    let allocation = contract.get_allocation_contract(&p.hotel, &p.client).unwrap();
    assert_eq!(allocation.used_rooms, 100);
    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b2"), &100, &75, &85),
        Err(Ok(AllocationError::CapacityExceeded))
    );

    // Shrinking below what is already booked is refused.
    assert_eq!(
        contract.try_create_allocation_contract(&p.hotel, &p.hotel, &p.client, &80, &50, &50, &200),
        Err(Ok(AllocationError::CapacityExceeded))
    );

    contract.create_allocation_contract(&p.hotel, &p.hotel, &p.client, &150, &50, &50, &300);
    let allocation = contract.get_allocation_contract(&p.hotel, &p.client).unwrap();
    assert_eq!(allocation.total_rooms, 150);
    assert_eq!(allocation.used_rooms, 100);
    assert_eq!(contract.remaining_rooms(&p.hotel, &p.client), 50);
}

#[test]
fn records_booking_against_allocation() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");

    contract.record_booking(&p.hotel, &p.hotel, &p.client, &booking_id, &20, &75, &85);

    let booking = contract.get_booking(&p.hotel, &p.client, &booking_id).unwrap();
    assert_eq!(booking.rooms, 20);
    assert_eq!(booking.check_in, 75);
    assert_eq!(booking.check_out, 85);
    assert!(!booking.fulfilled);

    let allocation = contract.get_allocation_contract(&p.hotel, &p.client).unwrap();
    assert_eq!(allocation.used_rooms, 20);
    assert_eq!(contract.remaining_rooms(&p.hotel, &p.client), 80);
}

#[test]
fn client_hotel_and_admin_may_book() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let stranger = Address::generate(&env);

    contract.record_booking(&p.client, &p.hotel, &p.client, &id(&env, "b1"), &10, &60, &70);
    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b2"), &10, &60, &70);
    contract.record_booking(&p.admin, &p.hotel, &p.client, &id(&env, "b3"), &10, &60, &70);

    assert_eq!(
        contract.try_record_booking(&stranger, &p.hotel, &p.client, &id(&env, "b4"), &10, &60, &70),
        Err(Ok(AllocationError::Unauthorized))
    );

    let allocation = contract.get_allocation_contract(&p.hotel, &p.client).unwrap();
    assert_eq!(allocation.used_rooms, 30);
}

#[test]
fn booking_beyond_total_rooms_fails() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");

    let result = contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &booking_id, &120, &75, &85);
    assert_eq!(result, Err(Ok(AllocationError::CapacityExceeded)));
    assert!(contract.get_booking(&p.hotel, &p.client, &booking_id).is_none());
    assert_eq!(
        contract.get_allocation_contract(&p.hotel, &p.client).unwrap().used_rooms,
        0
    );
}

#[test]
fn cumulative_bookings_respect_capacity() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);

    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b1"), &60, &75, &85);
    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b2"), &40, &90, &100);
    assert_eq!(contract.remaining_rooms(&p.hotel, &p.client), 0);

    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b3"), &1, &90, &100),
        Err(Ok(AllocationError::CapacityExceeded))
    );
    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b4"), &u32::MAX, &90, &100),
        Err(Ok(AllocationError::CapacityExceeded))
    );
    assert_eq!(
        contract.get_allocation_contract(&p.hotel, &p.client).unwrap().used_rooms,
        100
    );
}

#[test]
fn booking_outside_period_fails() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);

    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "early"), &5, &49, &60),
        Err(Ok(AllocationError::OutsideContractPeriod))
    );
    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "late"), &5, &190, &201),
        Err(Ok(AllocationError::OutsideContractPeriod))
    );

    // Window edges are inclusive.
    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "edges"), &5, &50, &200);
}

#[test]
fn booking_requires_allocation() {
    let env = test_env();
    let (contract, p) = setup(&env);

    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "b1"), &5, &60, &70),
        Err(Ok(AllocationError::AllocationNotFound))
    );
    assert_eq!(
        contract.try_remaining_rooms(&p.hotel, &p.client),
        Err(Ok(AllocationError::AllocationNotFound))
    );
}

#[test]
fn duplicate_booking_id_is_rejected() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");

    contract.record_booking(&p.hotel, &p.hotel, &p.client, &booking_id, &20, &75, &85);
    assert_eq!(
        contract.try_record_booking(&p.hotel, &p.hotel, &p.client, &booking_id, &10, &75, &85),
        Err(Ok(AllocationError::BookingAlreadyExists))
    );
    assert_eq!(
        contract.get_allocation_contract(&p.hotel, &p.client).unwrap().used_rooms,
        20
    );
}

#[test]
fn hotel_fulfills_booking() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");
    contract.record_booking(&p.hotel, &p.hotel, &p.client, &booking_id, &20, &75, &85);

    contract.fulfill_booking(&p.hotel, &p.hotel, &p.client, &booking_id);

    let booking = contract.get_booking(&p.hotel, &p.client, &booking_id).unwrap();
    assert!(booking.fulfilled);
}

#[test]
fn only_hotel_may_fulfill() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");
    contract.record_booking(&p.client, &p.hotel, &p.client, &booking_id, &20, &75, &85);

    assert_eq!(
        contract.try_fulfill_booking(&p.admin, &p.hotel, &p.client, &booking_id),
        Err(Ok(AllocationError::Unauthorized))
    );
    assert_eq!(
        contract.try_fulfill_booking(&p.client, &p.hotel, &p.client, &booking_id),
        Err(Ok(AllocationError::Unauthorized))
    );
    assert!(!contract.get_booking(&p.hotel, &p.client, &booking_id).unwrap().fulfilled);
}

#[test]
fn fulfill_missing_or_twice_fails() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");

    assert_eq!(
        contract.try_fulfill_booking(&p.hotel, &p.hotel, &p.client, &booking_id),
        Err(Ok(AllocationError::BookingNotFound))
    );

    contract.record_booking(&p.hotel, &p.hotel, &p.client, &booking_id, &20, &75, &85);
    contract.fulfill_booking(&p.hotel, &p.hotel, &p.client, &booking_id);
    assert_eq!(
        contract.try_fulfill_booking(&p.hotel, &p.hotel, &p.client, &booking_id),
        Err(Ok(AllocationError::AlreadyFulfilled))
    );
}

#[test]
fn minimum_commitment_met_after_enough_bookings() {
    let env = test_env();
    let (contract, p) = setup(&env);

    assert!(!contract.is_minimum_commitment_met(&p.hotel, &p.client));

    standard_allocation(&contract, &p);
    assert!(!contract.is_minimum_commitment_met(&p.hotel, &p.client));

    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "booking1"), &30, &75, &85);
    assert!(!contract.is_minimum_commitment_met(&p.hotel, &p.client));

    contract.record_booking(&p.hotel, &p.hotel, &p.client, &id(&env, "booking2"), &20, &90, &100);
    assert!(contract.is_minimum_commitment_met(&p.hotel, &p.client));
}

#[test]
fn init_once_and_required() {
    let env = test_env();
    let contract_id = env.register(RoomAllocationContract, ());
    let contract = RoomAllocationContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let hotel = Address::generate(&env);
    let client = Address::generate(&env);

    assert_eq!(
        contract.try_create_allocation_contract(&hotel, &hotel, &client, &100, &50, &50, &200),
        Err(Ok(AllocationError::NotInitialized))
    );

    contract.init(&admin);
    assert_eq!(contract.admin(), admin);
    assert_eq!(contract.try_init(&hotel), Err(Ok(AllocationError::AlreadyInitialized)));
}

#[test]
fn emits_booking_recorded_event() {
    let env = test_env();
    let (contract, p) = setup(&env);
    standard_allocation(&contract, &p);
    let booking_id = id(&env, "booking123");

    contract.record_booking(&p.client, &p.hotel, &p.client, &booking_id, &20, &75, &85);

    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(emitter, contract.address);
    let topic: Symbol = topics.get(0).unwrap().into_val(&env);
    assert_eq!(topic, Symbol::new(&env, "booking_recorded"));
    let event: BookingRecordedEvent = data.into_val(&env);
    assert_eq!(event.booking_id, booking_id);
    assert_eq!(event.rooms, 20);
    assert_eq!(event.used_rooms, 20);

    let auths = env.auths();
    assert_eq!(auths.len(), 1);
    assert_eq!(auths[0].0, p.client);
}
