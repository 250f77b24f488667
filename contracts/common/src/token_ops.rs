//! Token Operations Module
//!
//! Account-model ledgers for the two fungible assets the farm touches:
//! the staked LP token and the DAPP reward token.
//!
//! ## Key Features
//!
//! - **Transfers**: direct and allowance-based (`transfer_from`)
//! - **Mint Authorization**: a single authority fixed at construction
//! - **Supply Tracking**: total supply with a hard cap
//! - **Atomicity**: every operation validates fully, then commits
//!
//! The farm treats these as external collaborators; nothing here knows
//! about staking. Each ledger keeps its own event log so token movements
//! stay observable independently of pool notifications.

use crate::constants::token;
use crate::errors::AmountErrorReason;
use crate::events::{EventLog, FarmEvent};
use crate::types::{Address, AssetId};
use crate::{BTreeMap, FarmError, FarmResult};

/// Balances, allowances, and supply for one fungible asset
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    /// Asset identifier, fixed at construction
    asset_id: AssetId,
    /// Display symbol
    symbol: &'static str,
    /// Account balances
    balances: BTreeMap<Address, u64>,
    /// (owner, spender) -> approved amount
    allowances: BTreeMap<(Address, Address), u64>,
    /// Current total supply
    total_supply: u64,
    /// The only address allowed to mint; `None` disables minting
    mint_authority: Option<Address>,
    /// Token movement events
    events: EventLog,
}

impl TokenLedger {
    /// Create a ledger with minting disabled
    pub fn new(asset_id: AssetId, symbol: &'static str) -> Self {
        Self {
            asset_id,
            symbol,
            ..Self::default()
        }
    }

    /// Create a ledger whose supply can be minted by `authority`
    pub fn with_mint_authority(asset_id: AssetId, symbol: &'static str, authority: Address) -> Self {
        Self {
            asset_id,
            symbol,
            mint_authority: Some(authority),
            ..Self::default()
        }
    }

    /// Asset identifier
    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Current total supply
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Balance of an account (0 for unknown accounts)
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Token movement events emitted so far
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    // ========================================================================
    // Validation (read-only; callers use these for all-or-nothing sequencing)
    // ========================================================================

    /// Check that `from` can move `amount` right now
    pub fn validate_transfer(&self, from: &Address, amount: u64) -> FarmResult<()> {
        if amount == 0 {
            return Err(FarmError::ZeroAmount);
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(FarmError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        Ok(())
    }

    /// Check that `spender` can move `amount` out of `from` right now
    pub fn validate_transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        amount: u64,
    ) -> FarmResult<()> {
        self.validate_transfer(from, amount)?;

        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(FarmError::InsufficientAllowance {
                owner: *from,
                spender: *spender,
                allowance,
                requested: amount,
            });
        }

        Ok(())
    }

    /// Check that `caller` may mint `amount`
    pub fn validate_mint(&self, caller: &Address, amount: u64) -> FarmResult<()> {
        if amount == 0 {
            return Err(FarmError::ZeroAmount);
        }

        match self.mint_authority {
            Some(authority) if authority == *caller => {}
            _ => return Err(FarmError::MintUnauthorized { caller: *caller }),
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;
        if new_supply > token::MAX_SUPPLY {
            return Err(FarmError::ExceedsMaxSupply {
                requested: amount,
                max_supply: token::MAX_SUPPLY,
            });
        }

        Ok(())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Move `amount` from `from` to `to`
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: u64,
        block_height: u64,
    ) -> FarmResult<()> {
        if from == to {
            return Err(FarmError::InvalidAddress {
                reason: "cannot transfer to self",
            });
        }
        self.validate_transfer(&from, amount)?;
        let new_to = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;

        // Commit
        let from_balance = self.balances.entry(from).or_default();
        *from_balance -= amount;
        self.balances.insert(to, new_to);

        self.events.emit(FarmEvent::TokenTransfer {
            from,
            to,
            amount,
            block_height,
        });
        Ok(())
    }

    /// Set the allowance granted by `owner` to `spender`. An amount of 0
    /// clears a previous approval.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: u64,
        block_height: u64,
    ) -> FarmResult<()> {
        if amount > token::MAX_SUPPLY {
            return Err(FarmError::InvalidAmount {
                amount,
                reason: AmountErrorReason::TooLarge,
            });
        }

        self.allowances.insert((owner, spender), amount);

        self.events.emit(FarmEvent::TokenApproval {
            owner,
            spender,
            amount,
            block_height,
        });
        Ok(())
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`,
    /// consuming allowance
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u64,
        block_height: u64,
    ) -> FarmResult<()> {
        if from == to {
            return Err(FarmError::InvalidAddress {
                reason: "cannot transfer to self",
            });
        }
        self.validate_transfer_from(&spender, &from, amount)?;
        let new_to = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;

        // Commit
        let allowance = self.allowances.entry((from, spender)).or_default();
        *allowance -= amount;
        let from_balance = self.balances.entry(from).or_default();
        *from_balance -= amount;
        self.balances.insert(to, new_to);

        self.events.emit(FarmEvent::TokenTransfer {
            from,
            to,
            amount,
            block_height,
        });
        Ok(())
    }

    /// Mint `amount` to `to`; only the configured authority may call
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: u64,
        block_height: u64,
    ) -> FarmResult<()> {
        self.validate_mint(&caller, amount)?;
        let new_to = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(FarmError::Overflow)?;

        // Commit
        self.total_supply += amount;
        self.balances.insert(to, new_to);

        self.events.emit(FarmEvent::TokenMint {
            to,
            amount,
            new_total_supply: self.total_supply,
            block_height,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::token::ONE;
    use crate::events::EventType;

    const LP_ID: AssetId = [10u8; 32];

    fn minter() -> Address {
        [9u8; 32]
    }

    fn alice() -> Address {
        [1u8; 32]
    }

    fn bob() -> Address {
        [2u8; 32]
    }

    fn lp_with_balance(owner: Address, amount: u64) -> TokenLedger {
        let mut ledger = TokenLedger::with_mint_authority(LP_ID, token::LP_SYMBOL, minter());
        ledger.mint(minter(), owner, amount, 1).unwrap();
        ledger
    }

    #[test]
    fn test_mint_requires_authority() {
        let mut ledger = TokenLedger::with_mint_authority(LP_ID, token::LP_SYMBOL, minter());

        let denied = ledger.mint(alice(), alice(), ONE, 1);
        assert_eq!(denied, Err(FarmError::MintUnauthorized { caller: alice() }));

        ledger.mint(minter(), alice(), 100 * ONE, 1).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 100 * ONE);
        assert_eq!(ledger.total_supply(), 100 * ONE);
    }

    #[test]
    fn test_mint_disabled_without_authority() {
        let mut ledger = TokenLedger::new(LP_ID, token::LP_SYMBOL);
        let denied = ledger.mint(minter(), alice(), ONE, 1);
        assert_eq!(denied, Err(FarmError::MintUnauthorized { caller: minter() }));
    }

    #[test]
    fn test_mint_respects_supply_cap() {
        let mut ledger = TokenLedger::with_mint_authority(LP_ID, token::DAPP_SYMBOL, minter());
        ledger.mint(minter(), alice(), token::MAX_SUPPLY, 1).unwrap();

        let over = ledger.mint(minter(), alice(), 1, 2);
        assert_eq!(
            over,
            Err(FarmError::ExceedsMaxSupply {
                requested: 1,
                max_supply: token::MAX_SUPPLY,
            })
        );
        assert_eq!(ledger.total_supply(), token::MAX_SUPPLY);
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut ledger = lp_with_balance(alice(), 100 * ONE);

        ledger.transfer(alice(), bob(), 30 * ONE, 2).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 70 * ONE);
        assert_eq!(ledger.balance_of(&bob()), 30 * ONE);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = lp_with_balance(alice(), 10 * ONE);

        let result = ledger.transfer(alice(), bob(), 20 * ONE, 2);
        assert_eq!(
            result,
            Err(FarmError::InsufficientBalance {
                available: 10 * ONE,
                requested: 20 * ONE,
            })
        );
        // Nothing moved
        assert_eq!(ledger.balance_of(&alice()), 10 * ONE);
        assert_eq!(ledger.balance_of(&bob()), 0);
    }

    #[test]
    fn test_zero_transfer_rejected() {
        let mut ledger = lp_with_balance(alice(), ONE);
        assert_eq!(
            ledger.transfer(alice(), bob(), 0, 2),
            Err(FarmError::ZeroAmount)
        );
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let mut ledger = lp_with_balance(alice(), 100 * ONE);
        let pool = [7u8; 32];

        ledger.approve(alice(), pool, 50 * ONE, 2).unwrap();
        ledger
            .transfer_from(pool, alice(), pool, 30 * ONE, 3)
            .unwrap();

        assert_eq!(ledger.balance_of(&alice()), 70 * ONE);
        assert_eq!(ledger.balance_of(&pool), 30 * ONE);
        assert_eq!(ledger.allowance(&alice(), &pool), 20 * ONE);
    }

    #[test]
    fn test_transfer_from_without_allowance() {
        let mut ledger = lp_with_balance(alice(), 100 * ONE);
        let pool = [7u8; 32];

        let result = ledger.transfer_from(pool, alice(), pool, 30 * ONE, 2);
        assert_eq!(
            result,
            Err(FarmError::InsufficientAllowance {
                owner: alice(),
                spender: pool,
                allowance: 0,
                requested: 30 * ONE,
            })
        );
        assert_eq!(ledger.balance_of(&alice()), 100 * ONE);
    }

    #[test]
    fn test_approve_reset_to_zero() {
        let mut ledger = lp_with_balance(alice(), 100 * ONE);
        let pool = [7u8; 32];

        ledger.approve(alice(), pool, 50 * ONE, 2).unwrap();
        ledger.approve(alice(), pool, 0, 3).unwrap();
        assert_eq!(ledger.allowance(&alice(), &pool), 0);

        let result = ledger.transfer_from(pool, alice(), pool, ONE, 4);
        assert!(matches!(
            result,
            Err(FarmError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn test_token_events_logged() {
        let mut ledger = lp_with_balance(alice(), 100 * ONE);
        ledger.approve(alice(), bob(), 10 * ONE, 2).unwrap();
        ledger.transfer(alice(), bob(), 5 * ONE, 3).unwrap();

        assert_eq!(ledger.events().filter_by_type(EventType::TokenMint).len(), 1);
        assert_eq!(
            ledger
                .events()
                .filter_by_type(EventType::TokenApproval)
                .len(),
            1
        );
        assert_eq!(
            ledger
                .events()
                .filter_by_type(EventType::TokenTransfer)
                .len(),
            1
        );
    }
}
