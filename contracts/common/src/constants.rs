//! Protocol Constants
//!
//! All magic numbers and configuration values for the DAPP farm.

/// Token Metadata
pub mod token {
    /// Staked asset symbol (liquidity-provider token)
    pub const LP_SYMBOL: &str = "LP";
    /// Reward asset symbol
    pub const DAPP_SYMBOL: &str = "DAPP";
    /// Decimal places for both assets
    pub const DECIMALS: u8 = 8;
    /// One unit with decimals (1 token = 100_000_000 base units)
    pub const ONE: u64 = 100_000_000;
    /// Maximum DAPP supply (10 billion - fits in u64)
    pub const MAX_SUPPLY: u64 = 10_000_000_000 * ONE;
}

/// Reward Configuration
pub mod rewards {
    use super::token::ONE;

    /// DAPP units accrued per elapsed block, split across all stakers by
    /// stake share. Fixed at compile time; the pool has no runtime knob
    /// for it.
    pub const RATE_PER_BLOCK: u64 = 5 * ONE;
}

/// Time-related constants
pub mod time {
    /// Blocks per day (assuming 15 second blocks)
    pub const BLOCKS_PER_DAY: u64 = 5_760;

    /// Blocks per hour
    pub const BLOCKS_PER_HOUR: u64 = 240;
}
