//! Paid/owed accumulation ledger
//!
//! This module provides the `Ledger` struct used by the balance aggregator
//! to accumulate each member's paid and owed totals while walking an
//! expense set.
//!
//! The Ledger is responsible for:
//! - Creating entries on a member's first contribution
//! - Accumulating paid and owed totals with checked arithmetic
//! - Providing sorted entry listings for deterministic output

use crate::types::{MemberId, SettleError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// One member's accumulated totals
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// The member these totals belong to
    pub member: MemberId,

    /// Sum of expense amounts this member paid
    pub total_paid: Decimal,

    /// Sum of owed amounts across split details
    pub total_owed: Decimal,
}

impl LedgerEntry {
    /// Create a zeroed entry for a member
    fn new(member: MemberId) -> Self {
        LedgerEntry {
            member,
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
        }
    }
}

/// Accumulates paid and owed totals per member
///
/// Maintains an in-memory map of member IDs to accumulation entries.
/// Entries are created lazily on first contribution; members that never
/// contribute are absent from the ledger.
pub struct Ledger {
    /// Map of member IDs to accumulation entries
    entries: HashMap<MemberId, LedgerEntry>,
}

impl Ledger {
    /// Create a new Ledger with no entries
    pub fn new() -> Self {
        Ledger {
            entries: HashMap::new(),
        }
    }

    /// Get or create the entry for the specified member
    fn entry_mut(&mut self, member: MemberId) -> &mut LedgerEntry {
        self.entries
            .entry(member)
            .or_insert_with(|| LedgerEntry::new(member))
    }

    /// Credit a member's paid total
    ///
    /// Uses checked arithmetic to prevent overflow and keep the ledger
    /// consistent.
    ///
    /// # Arguments
    ///
    /// * `member` - The member who paid
    /// * `amount` - The expense amount to credit
    ///
    /// # Errors
    ///
    /// Returns an error if adding the amount would overflow.
    pub fn credit_paid(&mut self, member: MemberId, amount: Decimal) -> Result<(), SettleError> {
        let entry = self.entry_mut(member);

        entry.total_paid = entry
            .total_paid
            .checked_add(amount)
            .ok_or_else(|| SettleError::arithmetic_overflow("credit_paid", member))?;

        Ok(())
    }

    /// Debit a member's owed total
    ///
    /// Uses checked arithmetic to prevent overflow and keep the ledger
    /// consistent.
    ///
    /// # Arguments
    ///
    /// * `member` - The member who owes
    /// * `amount` - The share amount to add to the owed total
    ///
    /// # Errors
    ///
    /// Returns an error if adding the amount would overflow.
    pub fn add_owed(&mut self, member: MemberId, amount: Decimal) -> Result<(), SettleError> {
        let entry = self.entry_mut(member);

        entry.total_owed = entry
            .total_owed
            .checked_add(amount)
            .ok_or_else(|| SettleError::arithmetic_overflow("add_owed", member))?;

        Ok(())
    }

    /// Get all entries sorted by member ID
    ///
    /// Sorted output keeps balance reports deterministic.
    pub fn entries_sorted(&self) -> Vec<&LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.member);
        entries
    }

    /// Number of members with at least one contribution
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
