//! Error Types for the DAPP Farm
//!
//! Typed errors shared by the common accounting logic and the contract
//! crates. Every error is precondition-style: raised before the failing
//! operation mutates any state.

/// Result type alias for farm operations
pub type FarmResult<T> = Result<T, FarmError>;

/// Main error enum for all farm errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarmError {
    // ============ Amount Errors ============
    /// Invalid amount provided
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    /// Zero amount not allowed
    ZeroAmount,

    /// Insufficient balance for operation
    InsufficientBalance { available: u64, requested: u64 },

    /// Spender allowance does not cover the requested amount
    InsufficientAllowance {
        owner: [u8; 32],
        spender: [u8; 32],
        allowance: u64,
        requested: u64,
    },

    // ============ Staking Errors ============
    /// Operation requires an active stake, caller has none
    NotStaking { account: [u8; 32] },

    /// Withdraw attempted with nothing staked
    ZeroBalance { account: [u8; 32] },

    /// No rewards to claim
    NoRewardsToClaim,

    // ============ Authorization Errors ============
    /// Caller is not authorized for this operation
    Unauthorized { expected: [u8; 32], actual: [u8; 32] },

    /// Mint not authorized
    MintUnauthorized { caller: [u8; 32] },

    // ============ Token Errors ============
    /// Token transfer failed
    TransferFailed { from: [u8; 32], to: [u8; 32], amount: u64 },

    /// Mint would push total supply over the cap
    ExceedsMaxSupply { requested: u64, max_supply: u64 },

    /// Wrong asset ledger passed for this operation
    AssetMismatch { expected: [u8; 32], actual: [u8; 32] },

    /// Invalid address (e.g., zero address)
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
    /// Amount exceeds maximum
    TooLarge,
}

impl FarmError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "E010_INVALID_AMOUNT",
            Self::ZeroAmount => "E011_ZERO_AMOUNT",
            Self::InsufficientBalance { .. } => "E012_INSUFFICIENT_BALANCE",
            Self::InsufficientAllowance { .. } => "E013_INSUFFICIENT_ALLOWANCE",
            Self::NotStaking { .. } => "E020_NOT_STAKING",
            Self::ZeroBalance { .. } => "E021_ZERO_BALANCE",
            Self::NoRewardsToClaim => "E022_NO_REWARDS",
            Self::Unauthorized { .. } => "E030_UNAUTHORIZED",
            Self::MintUnauthorized { .. } => "E031_MINT_UNAUTH",
            Self::TransferFailed { .. } => "E040_TRANSFER_FAILED",
            Self::ExceedsMaxSupply { .. } => "E041_EXCEEDS_MAX_SUPPLY",
            Self::AssetMismatch { .. } => "E042_ASSET_MISMATCH",
            Self::InvalidAddress { .. } => "E043_INVALID_ADDRESS",
            Self::Overflow => "E050_OVERFLOW",
            Self::Underflow => "E051_UNDERFLOW",
            Self::DivisionByZero => "E052_DIV_ZERO",
        }
    }

    /// Returns true if this error is recoverable (user can fix it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InsufficientBalance { .. } => true,  // Get more funds
            Self::InsufficientAllowance { .. } => true, // Re-approve
            Self::NoRewardsToClaim => true,            // Wait for accrual
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_error_codes_unique() {
        // Ensure all error codes are unique
        let errors = [
            FarmError::InvalidAmount {
                amount: 0,
                reason: AmountErrorReason::Zero,
            },
            FarmError::ZeroAmount,
            FarmError::InsufficientBalance {
                available: 10,
                requested: 20,
            },
            FarmError::NotStaking { account: [1u8; 32] },
            FarmError::NoRewardsToClaim,
            FarmError::Unauthorized {
                expected: [1u8; 32],
                actual: [2u8; 32],
            },
            FarmError::TransferFailed {
                from: [1u8; 32],
                to: [2u8; 32],
                amount: 5,
            },
            FarmError::Overflow,
        ];

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        let unique: BTreeSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "Error codes must be unique");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(FarmError::InsufficientBalance {
            available: 0,
            requested: 1,
        }
        .is_recoverable());
        assert!(!FarmError::Unauthorized {
            expected: [1u8; 32],
            actual: [2u8; 32],
        }
        .is_recoverable());
        assert!(!FarmError::Overflow.is_recoverable());
    }
}
