//! Member-related types for the Expense Settlement Engine
//!
//! This module defines member identifiers, the immutable profile data
//! supplied by the household collaborator, and the derived balance types
//! produced by the balance aggregator.

use rust_decimal::Decimal;

/// Member identifier
///
/// Supports member IDs from 0 to 4,294,967,295
pub type MemberId = u32;

/// Expense identifier
///
/// Supports expense IDs from 0 to 18,446,744,073,709,551,615
pub type ExpenseId = u64;

/// Immutable member reference data
///
/// Supplied read-only by the household collaborator and resolved through
/// the member directory. The engine never mutates profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    /// Display name shown in reports
    pub name: String,

    /// Contact identifier (email)
    pub email: String,
}

/// Net balance position for a single member
///
/// Derived and ephemeral: recomputed on every balance query from the full
/// expense set, never persisted.
///
/// A positive balance means the member is a net creditor (paid more than
/// they owe); a negative balance means a net debtor.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBalance {
    /// The member this balance belongs to
    pub member: MemberId,

    /// Display name resolved from the member directory
    pub name: String,

    /// Email resolved from the member directory
    pub email: String,

    /// Sum of expense amounts where this member was the payer
    pub total_paid: Decimal,

    /// Sum of this member's owed amounts across all split details in scope
    pub total_owed: Decimal,

    /// Net position: total_paid - total_owed
    pub balance: Decimal,
}

/// Result of a balance aggregation query
///
/// Carries both the computed balances and the identifiers of any payer or
/// split participant that could not be resolved through the member
/// directory. Those contributions are skipped during aggregation, so a
/// non-empty `unresolved` list means the balances cover only part of the
/// expense set and callers can decide whether to treat that as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    /// Per-member net balances, sorted by member ID
    ///
    /// Members that never appear as a payer or split participant are
    /// absent (not zero-filled). Callers needing a complete roster must
    /// union with household membership themselves.
    pub balances: Vec<MemberBalance>,

    /// Member IDs referenced by expenses but missing from the directory
    ///
    /// Sorted and deduplicated. Empty when every contribution resolved.
    pub unresolved: Vec<MemberId>,
}
