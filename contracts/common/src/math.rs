//! Mathematical Utilities for the DAPP Farm
//!
//! Checked reward arithmetic. All intermediate products are computed in
//! `u128` with multiplication before the single floor division.

use crate::errors::{FarmError, FarmResult};

/// Calculate the reward accrued by one staker over an elapsed block span.
///
/// reward = floor(staked_balance * reward_rate * elapsed_blocks / total_staked)
///
/// The truncation from the floor division is accepted dust; it is never
/// tracked or redistributed.
///
/// # Arguments
/// * `staked_balance` - The staker's LP balance over the span
/// * `reward_rate` - DAPP base units accrued per block across the pool
/// * `elapsed_blocks` - Number of whole blocks since the last checkpoint
/// * `total_staked` - Pool-wide staked LP over the span
///
/// # Returns
/// Accrued DAPP in base units; 0 when the staker has no balance or no
/// blocks have elapsed.
pub fn accrued_reward(
    staked_balance: u64,
    reward_rate: u64,
    elapsed_blocks: u64,
    total_staked: u64,
) -> FarmResult<u64> {
    if staked_balance == 0 || elapsed_blocks == 0 {
        return Ok(0);
    }

    // A staked balance with an empty pool violates conservation
    if total_staked == 0 {
        return Err(FarmError::DivisionByZero);
    }

    // Multiply before divide: one floor division at the end
    let numerator = (staked_balance as u128)
        .checked_mul(reward_rate as u128)
        .ok_or(FarmError::Overflow)?
        .checked_mul(elapsed_blocks as u128)
        .ok_or(FarmError::Overflow)?;

    let reward = numerator / total_staked as u128;

    u64::try_from(reward).map_err(|_| FarmError::Overflow)
}

/// Safe addition with overflow check
pub fn safe_add(a: u64, b: u64) -> FarmResult<u64> {
    a.checked_add(b).ok_or(FarmError::Overflow)
}

/// Safe subtraction with underflow check
pub fn safe_sub(a: u64, b: u64) -> FarmResult<u64> {
    a.checked_sub(b).ok_or(FarmError::Underflow)
}
