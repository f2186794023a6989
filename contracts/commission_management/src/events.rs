use soroban_sdk::{contracttype, Address, Env, String, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateSet {
    pub hotel: Address,
    pub agency: Address,
    pub rate_percentage: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateDeactivated {
    pub hotel: Address,
    pub agency: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionRecorded {
    pub hotel: Address,
    pub agency: Address,
    pub booking_id: String,
    pub booking_value: i128,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionPaid {
    pub hotel: Address,
    pub agency: Address,
    pub booking_id: String,
    pub amount: i128,
    pub payment_date: u32,
}

pub fn emit_rate_set(env: &Env, hotel: Address, agency: Address, rate_percentage: u32) {
    env.events().publish(
        (Symbol::new(env, "rate_set"),),
        RateSet {
            hotel,
            agency,
            rate_percentage,
        },
    );
}

pub fn emit_rate_deactivated(env: &Env, hotel: Address, agency: Address) {
    env.events().publish(
        (Symbol::new(env, "rate_deactivated"),),
        RateDeactivated { hotel, agency },
    );
}

pub fn emit_commission_recorded(env: &Env, event: CommissionRecorded) {
    env.events()
        .publish((Symbol::new(env, "commission_recorded"),), event);
}

pub fn emit_commission_paid(env: &Env, event: CommissionPaid) {
    env.events()
        .publish((Symbol::new(env, "commission_paid"),), event);
}
