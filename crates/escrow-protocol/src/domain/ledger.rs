//! Per-principal balance accounting.

use super::errors::EscrowError;
use escrow_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping principal → non-negative balance, plus lifetime totals of
/// value that entered and left the ledger.
///
/// Balances are `u128`, so "never negative" holds by construction; the
/// only way down is an explicit debit that first proves coverage.
///
/// The totals exist so conservation is auditable: at any point,
/// `sum(balances) + sum(open claimables) + total_withdrawn ==
/// total_deposited`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: HashMap<Address, Amount>,
    total_deposited: Amount,
    total_withdrawn: Amount,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record external value entering the ledger.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for zero deposits, `AmountOverflow` if the balance
    /// or lifetime total would overflow.
    pub fn deposit(&mut self, principal: Address, amount: Amount) -> Result<(), EscrowError> {
        if amount == 0 {
            return Err(EscrowError::InvalidAmount);
        }

        let total = self
            .total_deposited
            .checked_add(amount)
            .ok_or(EscrowError::AmountOverflow)?;
        self.credit(principal, amount)?;
        self.total_deposited = total;
        Ok(())
    }

    /// Record value leaving the ledger toward the host's native transfer
    /// mechanism.
    ///
    /// Funds committed as the cost limit of open sessions are NOT
    /// reserved: a principal can withdraw below the sum of its open
    /// commitments, and a later close will then fail on the balance
    /// check. See the protocol-level notes on reservation semantics.
    pub fn withdraw(&mut self, principal: Address, amount: Amount) -> Result<(), EscrowError> {
        self.debit(principal, amount)?;
        // Cannot overflow: total_withdrawn never exceeds total_deposited.
        self.total_withdrawn += amount;
        Ok(())
    }

    /// Move value into a principal's balance without touching the
    /// lifetime totals (internal transfers such as claim payouts).
    pub fn credit(&mut self, principal: Address, amount: Amount) -> Result<(), EscrowError> {
        let balance = self.balances.entry(principal).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(EscrowError::AmountOverflow)?;
        Ok(())
    }

    /// Remove value from a principal's balance.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` if the balance does not cover `amount`.
    pub fn debit(&mut self, principal: Address, amount: Amount) -> Result<(), EscrowError> {
        let available = self.balance_of(&principal);
        if amount > available {
            return Err(EscrowError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        if let Some(balance) = self.balances.get_mut(&principal) {
            *balance -= amount;
        }
        Ok(())
    }

    pub fn balance_of(&self, principal: &Address) -> Amount {
        self.balances.get(principal).copied().unwrap_or(0)
    }

    /// Sum of all live balances.
    pub fn circulating(&self) -> Amount {
        self.balances.values().sum()
    }

    /// Lifetime total that entered via deposits.
    pub fn total_deposited(&self) -> Amount {
        self.total_deposited
    }

    /// Lifetime total that left via withdrawals.
    pub fn total_withdrawn(&self) -> Amount {
        self.total_withdrawn
    }
}
