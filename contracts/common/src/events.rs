//! Protocol Events for the DAPP Farm
//!
//! Events are emitted during contract execution and can be indexed
//! off-chain for building UIs, analytics, and notifications. They are
//! fire-and-forget: the core logic appends to the log and never reads it
//! back.

use crate::types::Address;
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Staking Events (0x01 - 0x1F)
    Deposit = 0x01,
    Withdraw = 0x02,
    RewardsClaimed = 0x03,
    RewardsDistributedAll = 0x04,

    // Token Events (0x40 - 0x5F)
    TokenTransfer = 0x40,
    TokenMint = 0x41,
    TokenApproval = 0x42,
}

/// Main event enum containing all farm events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum FarmEvent {
    // ============ Staking Events ============

    /// Emitted when LP is staked into the pool
    Deposit {
        account: Address,
        amount: u64,
        new_stake: u64,
        pool_total: u64,
        block_height: u64,
    },

    /// Emitted when a staker exits the pool
    Withdraw {
        account: Address,
        amount: u64,
        pending_reward: u64,
        block_height: u64,
    },

    /// Emitted when accrued DAPP is claimed
    RewardsClaimed {
        account: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted after a bulk distribution pass over all stakers
    RewardsDistributedAll {
        stakers_updated: u32,
        total_accrued: u64,
        block_height: u64,
    },

    // ============ Token Events ============

    /// Emitted on token transfer
    TokenTransfer {
        from: Address,
        to: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when tokens are minted
    TokenMint {
        to: Address,
        amount: u64,
        new_total_supply: u64,
        block_height: u64,
    },

    /// Emitted when a spender allowance is set
    TokenApproval {
        owner: Address,
        spender: Address,
        amount: u64,
        block_height: u64,
    },
}

impl FarmEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Deposit { .. } => EventType::Deposit,
            Self::Withdraw { .. } => EventType::Withdraw,
            Self::RewardsClaimed { .. } => EventType::RewardsClaimed,
            Self::RewardsDistributedAll { .. } => EventType::RewardsDistributedAll,
            Self::TokenTransfer { .. } => EventType::TokenTransfer,
            Self::TokenMint { .. } => EventType::TokenMint,
            Self::TokenApproval { .. } => EventType::TokenApproval,
        }
    }

    /// Get the block height when the event occurred
    pub fn block_height(&self) -> u64 {
        match self {
            Self::Deposit { block_height, .. } => *block_height,
            Self::Withdraw { block_height, .. } => *block_height,
            Self::RewardsClaimed { block_height, .. } => *block_height,
            Self::RewardsDistributedAll { block_height, .. } => *block_height,
            Self::TokenTransfer { block_height, .. } => *block_height,
            Self::TokenMint { block_height, .. } => *block_height,
            Self::TokenApproval { block_height, .. } => *block_height,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting multiple events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<FarmEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: FarmEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[FarmEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<FarmEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&FarmEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_and_height() {
        let event = FarmEvent::Deposit {
            account: [1u8; 32],
            amount: 50_00000000,
            new_stake: 50_00000000,
            pool_total: 50_00000000,
            block_height: 120,
        };

        assert_eq!(event.event_type(), EventType::Deposit);
        assert_eq!(event.block_height(), 120);
    }

    #[test]
    fn test_event_serialization() {
        let event = FarmEvent::RewardsClaimed {
            account: [2u8; 32],
            amount: 15_00000000,
            block_height: 340,
        };

        let bytes = event.to_bytes();
        let restored = FarmEvent::from_bytes(&bytes).unwrap();

        assert_eq!(event, restored);
    }

    #[test]
    fn test_event_log() {
        let mut log = EventLog::new();

        log.emit(FarmEvent::Deposit {
            account: [1u8; 32],
            amount: 40_00000000,
            new_stake: 40_00000000,
            pool_total: 40_00000000,
            block_height: 100,
        });

        log.emit(FarmEvent::RewardsDistributedAll {
            stakers_updated: 1,
            total_accrued: 5_00000000,
            block_height: 105,
        });

        assert_eq!(log.len(), 2);
        assert!(log.has_events());

        let deposits = log.filter_by_type(EventType::Deposit);
        assert_eq!(deposits.len(), 1);

        log.clear();
        assert!(log.is_empty());
    }
}
