//! Expense-related types for the Expense Settlement Engine
//!
//! This module defines the split vocabulary (methods, shares, weights),
//! household reference data, and the expense records flowing through the
//! engine in both their ingest and persisted forms.

use super::member::{ExpenseId, MemberId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Split methods supported by the settlement engine
///
/// The policy governing how a shared expense's cost is divided among
/// household members. Equal and percentage splits are computed from
/// household data, custom splits are caller-supplied, and `none` assigns
/// the full amount to the payer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Divide the amount evenly across all household members
    Equal,

    /// Divide the amount according to the household weight table
    ///
    /// Falls back to an equal split when no weights are configured.
    Percentage,

    /// Use the caller-supplied per-member amounts verbatim
    ///
    /// Falls back to an equal split when no amounts were supplied.
    Custom,

    /// No sharing: the payer owes the full amount
    None,
}

impl SplitMethod {
    /// Lowercase wire name of this method
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMethod::Equal => "equal",
            SplitMethod::Percentage => "percentage",
            SplitMethod::Custom => "custom",
            SplitMethod::None => "none",
        }
    }
}

/// One entry of an expense's split breakdown
///
/// Records how much a single member owes for an expense, optionally with
/// the percentage the amount was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitShare {
    /// The member who owes this share
    pub member: MemberId,

    /// Owed amount, two-decimal precision
    pub amount: Decimal,

    /// Percentage of the expense this share represents, when derived
    ///
    /// `None` for caller-supplied custom amounts without a percentage.
    pub percentage: Option<Decimal>,
}

/// Weight table entry used by percentage-based splitting
///
/// Each entry carries either an explicit percentage or a relative weight
/// to be normalized against the sum of all weights.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberWeight {
    /// The member this weight applies to
    pub member: MemberId,

    /// Explicit percentage of the expense, if configured
    pub percentage: Option<Decimal>,

    /// Relative weight, normalized against the total of all weights
    pub weight: Option<Decimal>,
}

/// Read-only household data consumed by the split calculator
///
/// Supplied by the household collaborator; the engine never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdProfile {
    /// Member IDs belonging to the household
    pub members: Vec<MemberId>,

    /// Optional per-member weight/percentage table for percentage splits
    pub member_weights: Vec<MemberWeight>,

    /// Split method applied when an expense does not specify one
    pub default_split_method: SplitMethod,
}

/// Input expense record
///
/// Represents a single expense as read from the input CSV file. The
/// `splits` field carries caller-supplied per-member amounts and is only
/// consulted by the `custom` split method.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Unique expense identifier
    pub id: ExpenseId,

    /// Expense amount, non-negative, two-decimal precision
    pub amount: Decimal,

    /// How the amount is divided among household members
    pub method: SplitMethod,

    /// The member who created the expense
    pub owner: MemberId,

    /// The member who paid, when different from the owner
    ///
    /// Balance aggregation credits `paid_by` when present, else `owner`.
    pub paid_by: Option<MemberId>,

    /// Caller-supplied split amounts for the `custom` method
    pub splits: Vec<SplitShare>,
}

impl ExpenseRecord {
    /// The member credited as payer for this expense
    ///
    /// Explicit `paid_by` when present, otherwise the expense owner.
    pub fn payer(&self) -> MemberId {
        self.paid_by.unwrap_or(self.owner)
    }
}

/// Persisted expense with its computed split breakdown
///
/// Split details are computed once at ingest and stored with the expense;
/// balance queries read them back rather than recomputing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedExpense {
    /// The expense record as ingested
    pub record: ExpenseRecord,

    /// Per-member owed amounts computed by the split calculator
    pub split_details: Vec<SplitShare>,
}
