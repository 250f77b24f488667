//! Staking Pool Contract
//!
//! The reward ledger of the DAPP farm. Participants stake LP into the
//! pool's custody and accrue DAPP per elapsed block, proportional to
//! their share of the staked total.
//!
//! ## Operations
//!
//! - **deposit**: move LP from the caller into custody and grow the stake
//! - **withdraw**: full exit; LP returns to the caller, earned DAPP stays
//!   claimable
//! - **claim_rewards**: mint the caller's accrued DAPP to them
//! - **distribute_rewards_all**: admin-only pass advancing every active
//!   staker's checkpoint
//!
//! Execution is single-writer and serialized: each operation validates
//! every precondition (including the feasibility of the one token
//! movement it performs), then commits. A returned error leaves pool
//! state, custody, and the event log exactly as they were.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use dappfarm_common::{
    claimable_rewards, execute_claim, execute_deposit, execute_distribute_all, execute_withdraw,
    pending_rewards, staking_balance, AmountErrorReason, ClaimRequest, ClaimResult,
    DepositRequest, DepositResult, DistributeRequest, DistributeResult, EventLog, FarmError,
    FarmEvent, FarmResult, StakingPoolState, TokenLedger, WithdrawRequest, WithdrawResult,
};
use dappfarm_common::types::{Address, AssetId};

// ============ Configuration ============

/// Immutable pool configuration, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct StakingPoolConfig {
    /// Sole caller of `distribute_rewards_all`
    pub admin: Address,
    /// Custody account for staked LP; also the DAPP mint caller
    pub pool_address: Address,
    /// Handle of the staked asset
    pub lp_asset: AssetId,
    /// Handle of the reward asset
    pub reward_asset: AssetId,
}

impl StakingPoolConfig {
    /// Reject configurations that could never operate
    pub fn validate(&self) -> FarmResult<()> {
        if self.admin == [0u8; 32] {
            return Err(FarmError::InvalidAddress {
                reason: "admin cannot be the zero address",
            });
        }
        if self.pool_address == [0u8; 32] {
            return Err(FarmError::InvalidAddress {
                reason: "pool custody cannot be the zero address",
            });
        }
        if self.lp_asset == self.reward_asset {
            return Err(FarmError::InvalidAddress {
                reason: "LP and reward assets must be distinct",
            });
        }
        Ok(())
    }
}

// ============ Pool ============

/// The staking pool: configuration, accrual state, and emitted events.
///
/// The two asset ledgers are passed into each operation and checked
/// against the configured handles, so a caller can never move the wrong
/// token through the pool.
#[derive(Debug, Clone)]
pub struct StakingPool {
    config: StakingPoolConfig,
    state: StakingPoolState,
    events: EventLog,
}

impl StakingPool {
    /// Create a pool from a validated configuration
    pub fn new(config: StakingPoolConfig) -> FarmResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: StakingPoolState::new(),
            events: EventLog::new(),
        })
    }

    /// Pool configuration
    pub fn config(&self) -> &StakingPoolConfig {
        &self.config
    }

    /// Accrual state (read-only)
    pub fn state(&self) -> &StakingPoolState {
        &self.state
    }

    /// Events emitted so far
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drain the event log, handing the events to an observer
    pub fn take_events(&mut self) -> Vec<FarmEvent> {
        core::mem::take(&mut self.events).into_events()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Stake `amount` LP for `caller`.
    ///
    /// The caller must have approved the pool custody address for at
    /// least `amount`; allowance and balance failures from the LP ledger
    /// propagate verbatim.
    pub fn deposit(
        &mut self,
        lp: &mut TokenLedger,
        caller: Address,
        amount: u64,
        block_height: u64,
    ) -> FarmResult<DepositResult> {
        // 1. Right asset ledger
        self.ensure_lp(lp)?;

        // 2. Amount must be positive
        if amount == 0 {
            return Err(FarmError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            });
        }

        // 3. The custody account itself cannot stake
        if caller == self.config.pool_address {
            return Err(FarmError::InvalidAddress {
                reason: "custody account cannot stake",
            });
        }

        // 4. The LP movement must be able to succeed before anything mutates
        lp.validate_transfer_from(&self.config.pool_address, &caller, amount)?;

        // 5. Update the accrual ledger (all-or-nothing)
        let result = execute_deposit(
            &DepositRequest {
                depositor: caller,
                amount,
                block_height,
            },
            &mut self.state,
        )?;

        // 6. Take custody of the LP
        lp.transfer_from(
            self.config.pool_address,
            caller,
            self.config.pool_address,
            amount,
            block_height,
        )?;

        // 7. Emit event
        self.events.emit(FarmEvent::Deposit {
            account: caller,
            amount,
            new_stake: result.new_stake,
            pool_total: result.new_pool_total,
            block_height,
        });

        Ok(result)
    }

    /// Full exit for `caller`: finalize accrual, return the entire staked
    /// balance, keep the pending reward claimable.
    pub fn withdraw(
        &mut self,
        lp: &mut TokenLedger,
        caller: Address,
        block_height: u64,
    ) -> FarmResult<WithdrawResult> {
        // 1. Right asset ledger
        self.ensure_lp(lp)?;

        // 2. Caller must hold an active stake
        let balance = match self.state.staker(&caller) {
            Some(record) if record.is_active => record.staked_balance,
            _ => return Err(FarmError::NotStaking { account: caller }),
        };
        if balance == 0 {
            return Err(FarmError::ZeroBalance { account: caller });
        }

        // 3. Custody must cover the exit; anything else is an internal
        //    inconsistency surfaced as a failed transfer
        lp.validate_transfer(&self.config.pool_address, balance)
            .map_err(|_| FarmError::TransferFailed {
                from: self.config.pool_address,
                to: caller,
                amount: balance,
            })?;

        // 4. Update the accrual ledger
        let result = execute_withdraw(
            &WithdrawRequest {
                staker: caller,
                block_height,
            },
            &mut self.state,
        )?;

        // 5. Return the LP
        lp.transfer(
            self.config.pool_address,
            caller,
            result.amount_withdrawn,
            block_height,
        )?;

        // 6. Emit event
        self.events.emit(FarmEvent::Withdraw {
            account: caller,
            amount: result.amount_withdrawn,
            pending_reward: result.pending_reward,
            block_height,
        });

        Ok(result)
    }

    /// Pay out everything `caller` has accrued, minting DAPP to them.
    ///
    /// Claimable means a nonzero pending reward: a staker that has fully
    /// withdrawn still collects here.
    pub fn claim_rewards(
        &mut self,
        reward: &mut TokenLedger,
        caller: Address,
        block_height: u64,
    ) -> FarmResult<ClaimResult> {
        // 1. Right asset ledger
        self.ensure_reward(reward)?;

        // 2. Must have something to claim
        let amount = claimable_rewards(&self.state, &caller, block_height)?;
        if amount == 0 {
            return Err(FarmError::NoRewardsToClaim);
        }

        // 3. The mint must be able to succeed before the pending reward
        //    is zeroed
        reward.validate_mint(&self.config.pool_address, amount)?;

        // 4. Update the accrual ledger
        let result = execute_claim(
            &ClaimRequest {
                staker: caller,
                block_height,
            },
            &mut self.state,
        )?;

        // 5. Mint the reward
        reward.mint(self.config.pool_address, caller, result.amount, block_height)?;

        // 6. Emit event
        self.events.emit(FarmEvent::RewardsClaimed {
            account: caller,
            amount: result.amount,
            block_height,
        });

        Ok(result)
    }

    /// Advance every active staker's checkpoint to `block_height`.
    /// Restricted to the configured admin; moves no tokens.
    pub fn distribute_rewards_all(
        &mut self,
        caller: Address,
        block_height: u64,
    ) -> FarmResult<DistributeResult> {
        // 1. Admin only
        if caller != self.config.admin {
            return Err(FarmError::Unauthorized {
                expected: self.config.admin,
                actual: caller,
            });
        }

        // 2. One pass over the participant list
        let result = execute_distribute_all(&DistributeRequest { block_height }, &mut self.state)?;

        // 3. Emit event
        self.events.emit(FarmEvent::RewardsDistributedAll {
            stakers_updated: result.stakers_updated,
            total_accrued: result.total_accrued,
            block_height,
        });

        Ok(result)
    }

    // ========================================================================
    // Queries (no accrual side effects; values lag until the next mutation)
    // ========================================================================

    /// Stored pending reward for `account`
    pub fn pending_rewards(&self, account: &Address) -> u64 {
        pending_rewards(&self.state, account)
    }

    /// Stored staked balance for `account`
    pub fn staking_balance(&self, account: &Address) -> u64 {
        staking_balance(&self.state, account)
    }

    /// Pool-wide staked total
    pub fn total_staked(&self) -> u64 {
        self.state.total_staked
    }

    /// Every address that has ever staked, in first-deposit order
    pub fn participants(&self) -> &[Address] {
        &self.state.participants
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn ensure_lp(&self, ledger: &TokenLedger) -> FarmResult<()> {
        if ledger.asset_id() != self.config.lp_asset {
            return Err(FarmError::AssetMismatch {
                expected: self.config.lp_asset,
                actual: ledger.asset_id(),
            });
        }
        Ok(())
    }

    fn ensure_reward(&self, ledger: &TokenLedger) -> FarmResult<()> {
        if ledger.asset_id() != self.config.reward_asset {
            return Err(FarmError::AssetMismatch {
                expected: self.config.reward_asset,
                actual: ledger.asset_id(),
            });
        }
        Ok(())
    }
}

// ============ Helper Functions ============

/// Derive a deterministic 32-byte account or asset identifier
pub fn derive_account_id(label: &[u8], nonce: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(label);
    hasher.update(nonce.to_le_bytes());
    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}

// ============ Tests ============
