//! Core Types for the DAPP Farm
//!
//! Fundamental data structures shared across the farm contracts.

use crate::{BTreeMap, Vec};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for addresses (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for fungible asset identifiers
pub type AssetId = [u8; 32];

// ============ Staker Types ============

/// Per-participant staking record.
///
/// Records spring into existence zero-valued the first time an address is
/// referenced and are never deleted, only zeroed on full exit.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct StakerRecord {
    /// LP currently staked by this account
    pub staked_balance: u64,
    /// Block at which accrued reward was last folded into `pending_reward`.
    /// Monotonically non-decreasing; 0 is the unset sentinel.
    pub last_checkpoint_block: u64,
    /// DAPP owed but not yet claimed
    pub pending_reward: u64,
    /// Block of the first deposit (informational, never read by accrual)
    pub first_staked_block: u64,
    /// True once the account has deposited at least once
    pub has_ever_staked: bool,
    /// True while the account has a live stake
    pub is_active: bool,
}

impl StakerRecord {
    /// Returns true if the record has never been touched by a deposit
    pub fn is_unregistered(&self) -> bool {
        !self.has_ever_staked
    }
}

// ============ Pool State ============

/// Global staking pool state.
///
/// `total_staked` is maintained incrementally by deposits and withdrawals;
/// [`StakingPoolState::audit_total_staked`] recomputes it by full scan for
/// verification only.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct StakingPoolState {
    /// Sum of all stakers' `staked_balance`
    pub total_staked: u64,
    /// Every address that has ever staked, in first-deposit order, each
    /// exactly once. Append-only.
    pub participants: Vec<Address>,
    /// Keyed table of staking records
    pub stakers: BTreeMap<Address, StakerRecord>,
    /// Block of the last bulk distribution
    pub last_distribution_block: u64,
}

impl StakingPoolState {
    /// Create a new, empty pool state
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to a staking record, if the address was ever seen
    pub fn staker(&self, account: &Address) -> Option<&StakerRecord> {
        self.stakers.get(account)
    }

    /// Mutable access to a staking record, creating a zero-valued record
    /// on first reference
    pub fn staker_entry(&mut self, account: Address) -> &mut StakerRecord {
        self.stakers.entry(account).or_default()
    }

    /// Number of addresses that have ever staked
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Recompute the staked total by scanning every record. Verification
    /// helper; the live total is maintained incrementally.
    pub fn audit_total_staked(&self) -> u64 {
        self.stakers
            .values()
            .fold(0u64, |acc, r| acc.saturating_add(r.staked_balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_springs_into_existence_zeroed() {
        let mut state = StakingPoolState::new();
        let record = state.staker_entry([7u8; 32]);

        assert_eq!(record.staked_balance, 0);
        assert_eq!(record.last_checkpoint_block, 0);
        assert_eq!(record.pending_reward, 0);
        assert!(record.is_unregistered());
        assert!(!record.is_active);
    }

    #[test]
    fn test_state_serialization_roundtrip() {
        let mut state = StakingPoolState::new();
        let account = [3u8; 32];
        state.participants.push(account);
        let record = state.staker_entry(account);
        record.staked_balance = 40;
        record.has_ever_staked = true;
        record.is_active = true;
        state.total_staked = 40;

        let bytes = borsh::to_vec(&state).unwrap();
        let restored: StakingPoolState = borsh::from_slice(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_audit_matches_incremental_total() {
        let mut state = StakingPoolState::new();
        for (i, amount) in [25u64, 40, 60].iter().enumerate() {
            let account = [i as u8 + 1; 32];
            state.staker_entry(account).staked_balance = *amount;
            state.total_staked += amount;
        }
        assert_eq!(state.audit_total_staked(), state.total_staked);
    }
}
