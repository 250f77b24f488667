//! DAPP Farm Common Library
//!
//! Shared types, constants, and the reward-accrual engine for the DAPP
//! farm contracts.
//!
//! The farm lets participants stake an LP token and earn DAPP rewards
//! proportionally to their stake share and the number of elapsed blocks.
//! Everything in this crate is pure accounting: token custody and event
//! emission are wired up in the `dappfarm-staking-pool` contract crate.
//!
//! ## Modules
//!
//! - **Staking Pool**: per-staker checkpointing and reward accrual
//! - **Token Operations**: fungible asset ledgers (LP and DAPP stand-ins)
//! - **Events**: typed protocol events and the event log
//! - **Errors**: typed error enum shared by all contracts
//! - **Math**: checked reward arithmetic
//!
//! This crate is `no_std` compatible for WASM compilation when built
//! without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::collections::BTreeMap;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod staking_pool;
pub mod token_ops;
pub mod types;


// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use events::*;
pub use math::*;
pub use staking_pool::*;
pub use token_ops::*;
pub use types::*;
