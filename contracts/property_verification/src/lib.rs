#![no_std]

use booking_core::{bump_instance, bump_persistent, current_height};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, String, Symbol};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Property(Address), // owner -> property
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub name: String,
    pub location: String,
    pub verified: bool,
    /// Ledger sequence of the last verification, 0 until verified.
    pub verification_date: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyRegistered {
    pub owner: Address,
    pub name: String,
    pub location: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyVerified {
    pub owner: Address,
    pub verification_date: u32,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerificationError {
    Unauthorized = 1,
    /// No property to verify for this owner.
    PropertyNotFound = 2,
    /// Status lookup for an owner that never registered.
    NotRegistered = 3,
    AlreadyInitialized = 4,
    NotInitialized = 5,
}

#[contract]
pub struct PropertyVerificationContract;

impl PropertyVerificationContract {
    fn read_admin(env: &Env) -> Result<Address, VerificationError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(VerificationError::NotInitialized)
    }

    /// Only the stored admin may register or verify properties.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), VerificationError> {
        caller.require_auth();
        if *caller != Self::read_admin(env)? {
            return Err(VerificationError::Unauthorized);
        }
        Ok(())
    }

    fn read_property(env: &Env, owner: &Address) -> Option<Property> {
        env.storage()
            .persistent()
            .get(&DataKey::Property(owner.clone()))
    }

    fn write_property(env: &Env, owner: &Address, property: &Property) {
        let key = DataKey::Property(owner.clone());
        env.storage().persistent().set(&key, property);
        bump_persistent(env, &key);
    }
}

#[contractimpl]
impl PropertyVerificationContract {
    pub fn init(env: Env, admin: Address) -> Result<(), VerificationError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(VerificationError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        bump_instance(&env);
        Ok(())
    }

    /// Register a property for `owner` as unverified. Registering again
    /// replaces the details and clears any earlier verification.
    pub fn register_property(
        env: Env,
        caller: Address,
        owner: Address,
        name: String,
        location: String,
    ) -> Result<(), VerificationError> {
        Self::require_admin(&env, &caller)?;

        let property = Property {
            name: name.clone(),
            location: location.clone(),
            verified: false,
            verification_date: 0,
        };
        Self::write_property(&env, &owner, &property);

        env.events().publish(
            (Symbol::new(&env, "property_registered"),),
            PropertyRegistered {
                owner,
                name,
                location,
            },
        );
        Ok(())
    }

    /// Mark the owner's property verified at the current ledger sequence.
    pub fn verify_property(env: Env, caller: Address, owner: Address) -> Result<(), VerificationError> {
        Self::require_admin(&env, &caller)?;

        let mut property =
            Self::read_property(&env, &owner).ok_or(VerificationError::PropertyNotFound)?;
        property.verified = true;
        property.verification_date = current_height(&env);
        Self::write_property(&env, &owner, &property);

        env.events().publish(
            (Symbol::new(&env, "property_verified"),),
            PropertyVerified {
                owner,
                verification_date: property.verification_date,
            },
        );
        Ok(())
    }

    pub fn is_property_verified(env: Env, owner: Address) -> Result<bool, VerificationError> {
        Self::read_property(&env, &owner)
            .map(|property| property.verified)
            .ok_or(VerificationError::NotRegistered)
    }

    pub fn get_property_details(env: Env, owner: Address) -> Option<Property> {
        Self::read_property(&env, &owner)
    }

    pub fn admin(env: Env) -> Result<Address, VerificationError> {
        Self::read_admin(&env)
    }
}

#[cfg(test)]
extern crate std;
