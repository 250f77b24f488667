//! Staking Pool Module
//!
//! The reward-accrual engine of the DAPP farm. Participants stake LP and
//! earn DAPP proportionally to stake share and elapsed blocks.
//!
//! ## Key Features
//!
//! - **Deposit/Withdraw**: stake LP, exit fully at any time
//! - **Checkpointing**: per-staker accrual folded into `pending_reward`
//! - **Bulk Distribution**: one pass advancing every active staker
//! - **Claims**: pending DAPP survives a full exit and stays claimable
//!
//! Every state transition here validates fully before the first mutation,
//! so a returned error leaves the pool state untouched. Token custody and
//! event emission live in the `dappfarm-staking-pool` contract crate.

use crate::constants::rewards;
use crate::errors::AmountErrorReason;
use crate::math::{accrued_reward, safe_add, safe_sub};
use crate::types::{Address, StakerRecord, StakingPoolState};
use crate::{FarmError, FarmResult, Vec};

// ============================================================================
// Types
// ============================================================================

/// Request to stake LP into the pool
#[derive(Debug, Clone)]
pub struct DepositRequest {
    /// Depositor address
    pub depositor: Address,
    /// Amount of LP to stake
    pub amount: u64,
    /// Current block height
    pub block_height: u64,
}

/// Request for a full exit
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    /// Exiting staker
    pub staker: Address,
    /// Current block height
    pub block_height: u64,
}

/// Request to claim accrued DAPP
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    /// Claiming account
    pub staker: Address,
    /// Current block height
    pub block_height: u64,
}

/// Request to advance every active staker's checkpoint
#[derive(Debug, Clone)]
pub struct DistributeRequest {
    /// Current block height
    pub block_height: u64,
}

/// Result of a deposit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositResult {
    /// Staker's balance after the deposit
    pub new_stake: u64,
    /// Reward frozen at the old stake ratio before the balance changed
    pub reward_accrued: u64,
    /// Pool total after the deposit
    pub new_pool_total: u64,
    /// True when this was the account's first-ever deposit
    pub first_deposit: bool,
}

/// Result of a full exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawResult {
    /// LP returned to the staker
    pub amount_withdrawn: u64,
    /// DAPP still owed after the exit
    pub pending_reward: u64,
    /// Pool total after the exit
    pub new_pool_total: u64,
}

/// Result of a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimResult {
    /// DAPP paid out
    pub amount: u64,
}

/// Result of a bulk distribution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributeResult {
    /// Active stakers whose checkpoint was advanced
    pub stakers_updated: u32,
    /// Sum of rewards folded into pending balances by this pass
    pub total_accrued: u64,
    /// Height the pass ran at
    pub block_height: u64,
}

// ============================================================================
// Accrual
// ============================================================================

/// Reward a staker has earned since its last checkpoint, without mutating
/// anything.
///
/// reward = floor(staked_balance * RATE_PER_BLOCK * elapsed / total_staked)
///
/// Returns 0 when the staker has no balance, the pool is empty, or no
/// block has elapsed since the checkpoint.
pub fn pending_accrual(
    record: &StakerRecord,
    total_staked: u64,
    current_block: u64,
) -> FarmResult<u64> {
    if record.staked_balance == 0
        || total_staked == 0
        || current_block <= record.last_checkpoint_block
    {
        return Ok(0);
    }

    let elapsed = current_block - record.last_checkpoint_block;
    accrued_reward(
        record.staked_balance,
        rewards::RATE_PER_BLOCK,
        elapsed,
        total_staked,
    )
}

/// Everything an account could claim right now: its stored pending reward
/// plus the span since its last checkpoint.
pub fn claimable_rewards(
    state: &StakingPoolState,
    account: &Address,
    current_block: u64,
) -> FarmResult<u64> {
    let Some(record) = state.staker(account) else {
        return Ok(0);
    };

    let accrued = if record.is_active {
        pending_accrual(record, state.total_staked, current_block)?
    } else {
        0
    };
    safe_add(record.pending_reward, accrued)
}

// ============================================================================
// Core Pool Functions
// ============================================================================

/// Stake LP into the pool.
///
/// When the account is already active, its reward is first frozen at the
/// old stake ratio. A deposit that (re)activates a dormant account resets
/// the checkpoint to the current height so no span without stake is ever
/// counted.
pub fn execute_deposit(
    request: &DepositRequest,
    state: &mut StakingPoolState,
) -> FarmResult<DepositResult> {
    if request.amount == 0 {
        return Err(FarmError::InvalidAmount {
            amount: request.amount,
            reason: AmountErrorReason::Zero,
        });
    }

    let record = state.staker(&request.depositor).cloned().unwrap_or_default();

    // Freeze rewards earned under the old ratio before it changes
    let reward_accrued = if record.is_active {
        pending_accrual(&record, state.total_staked, request.block_height)?
    } else {
        0
    };
    let new_pending = safe_add(record.pending_reward, reward_accrued)?;
    let new_stake = safe_add(record.staked_balance, request.amount)?;
    let new_pool_total = safe_add(state.total_staked, request.amount)?;
    let first_deposit = !record.has_ever_staked;

    // Commit
    let record = state.staker_entry(request.depositor);
    record.pending_reward = new_pending;
    record.staked_balance = new_stake;
    record.last_checkpoint_block = request.block_height;
    record.is_active = true;
    if first_deposit {
        record.has_ever_staked = true;
        record.first_staked_block = request.block_height;
        state.participants.push(request.depositor);
    }
    state.total_staked = new_pool_total;

    Ok(DepositResult {
        new_stake,
        reward_accrued,
        new_pool_total,
        first_deposit,
    })
}

/// Full exit: finalize accrual, zero the stake, keep the pending reward.
pub fn execute_withdraw(
    request: &WithdrawRequest,
    state: &mut StakingPoolState,
) -> FarmResult<WithdrawResult> {
    let record = match state.staker(&request.staker) {
        Some(record) if record.is_active => record.clone(),
        _ => {
            return Err(FarmError::NotStaking {
                account: request.staker,
            })
        }
    };

    // `is_active` accounts always hold a balance
    let balance = record.staked_balance;
    if balance == 0 {
        return Err(FarmError::ZeroBalance {
            account: request.staker,
        });
    }

    let reward_accrued = pending_accrual(&record, state.total_staked, request.block_height)?;
    let new_pending = safe_add(record.pending_reward, reward_accrued)?;
    let new_pool_total = safe_sub(state.total_staked, balance)?;

    // Commit; pending_reward survives the exit
    let record = state.staker_entry(request.staker);
    record.pending_reward = new_pending;
    record.staked_balance = 0;
    record.is_active = false;
    record.last_checkpoint_block = request.block_height;
    state.total_staked = new_pool_total;

    Ok(WithdrawResult {
        amount_withdrawn: balance,
        pending_reward: new_pending,
        new_pool_total,
    })
}

/// Claim everything owed to an account.
///
/// The guard is "has a nonzero claimable reward", not "is currently
/// staking": a fully-withdrawn staker collects what it earned through the
/// same path.
pub fn execute_claim(
    request: &ClaimRequest,
    state: &mut StakingPoolState,
) -> FarmResult<ClaimResult> {
    let amount = claimable_rewards(state, &request.staker, request.block_height)?;
    if amount == 0 {
        return Err(FarmError::NoRewardsToClaim);
    }

    // Commit; the account exists, claimable_rewards was nonzero
    let record = state.staker_entry(request.staker);
    record.pending_reward = 0;
    record.last_checkpoint_block = request.block_height;

    Ok(ClaimResult { amount })
}

/// Advance every active staker's checkpoint to the current height.
///
/// Inactive participants are skipped; their pending rewards are already
/// final. The pass either updates every active staker or none.
pub fn execute_distribute_all(
    request: &DistributeRequest,
    state: &mut StakingPoolState,
) -> FarmResult<DistributeResult> {
    let mut updates: Vec<(Address, u64)> = Vec::new();
    let mut total_accrued: u64 = 0;

    for account in &state.participants {
        let Some(record) = state.stakers.get(account) else {
            continue;
        };
        if !record.is_active {
            continue;
        }

        let accrued = pending_accrual(record, state.total_staked, request.block_height)?;
        safe_add(record.pending_reward, accrued)?;
        total_accrued = safe_add(total_accrued, accrued)?;
        updates.push((*account, accrued));
    }

    // Commit
    let stakers_updated = updates.len() as u32;
    for (account, accrued) in updates {
        let record = state.staker_entry(account);
        record.pending_reward += accrued;
        record.last_checkpoint_block = request.block_height;
    }
    state.last_distribution_block = request.block_height;

    Ok(DistributeResult {
        stakers_updated,
        total_accrued,
        block_height: request.block_height,
    })
}

// ============================================================================
// Queries
// ============================================================================

/// Stored pending reward, verbatim.
///
/// Does not trigger accrual: the value lags true economic accrual until
/// the next mutating call or bulk distribution.
pub fn pending_rewards(state: &StakingPoolState, account: &Address) -> u64 {
    state.staker(account).map(|r| r.pending_reward).unwrap_or(0)
}

/// Stored staked balance, verbatim. No accrual side effects.
pub fn staking_balance(state: &StakingPoolState, account: &Address) -> u64 {
    state.staker(account).map(|r| r.staked_balance).unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
