//! Settlement-related types for the Expense Settlement Engine
//!
//! This module defines the debt-relationship type produced by the debt
//! simplifier and the unit-of-account handling.

use super::member::{MemberBalance, MemberId};
use rust_decimal::Decimal;

/// Unit-of-account code attached to settlement suggestions
///
/// The engine operates in a single currency; the code is a configuration
/// value passed into the settle stage (never a constant baked into the
/// calculation logic), so multi-currency support can be reintroduced
/// without touching the calculators.
pub type CurrencyCode = String;

/// Default unit of account when the caller does not configure one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Lightweight member reference carried on settlement suggestions
///
/// Identifies one side of a debt relationship with enough context for
/// presentation without another directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    /// The member ID
    pub member: MemberId,

    /// Display name
    pub name: String,

    /// Contact identifier (email)
    pub email: String,
}

impl From<&MemberBalance> for MemberRef {
    fn from(balance: &MemberBalance) -> Self {
        MemberRef {
            member: balance.member,
            name: balance.name.clone(),
            email: balance.email.clone(),
        }
    }
}

/// A suggested settlement payment between two members
///
/// Derived and ephemeral: recomputed on demand from net balances and
/// discarded after the response. Applying every relationship (debtor pays
/// creditor the stated amount) drives all balances to within tolerance of
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtRelationship {
    /// The debtor: the member who should pay
    pub from: MemberRef,

    /// The creditor: the member who should receive the payment
    pub to: MemberRef,

    /// Payment amount, positive, rounded to two decimals
    pub amount: Decimal,

    /// Unit of account the amount is denominated in
    pub currency: CurrencyCode,
}
