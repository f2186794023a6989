//! Off-chain commission preview, using the same arithmetic as the contract.

use booking_core::{commission_amount, is_valid_percentage};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuoteError {
    #[error("rate {0}% exceeds 100%")]
    InvalidPercentage(u32),

    #[error("booking value {0} is negative or too large")]
    InvalidAmount(i128),
}

pub fn quote_commission(booking_value: i128, rate_percentage: u32) -> Result<i128, QuoteError> {
    if !is_valid_percentage(rate_percentage) {
        return Err(QuoteError::InvalidPercentage(rate_percentage));
    }
    commission_amount(booking_value, rate_percentage).ok_or(QuoteError::InvalidAmount(booking_value))
}
