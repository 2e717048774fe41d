//! Split calculator
//!
//! Computes the per-member owed-amount breakdown for a single expense.
//! Split details are computed once when an expense is ingested and then
//! persisted with it; balance aggregation reads them back rather than
//! recomputing.
//!
//! # Methods
//!
//! - `equal` - divide the amount evenly across all household members
//! - `percentage` - divide according to the household weight table; with no
//!   weights configured the split falls back to equal (a deliberate policy,
//!   not an error)
//! - `custom` - use caller-supplied per-member amounts verbatim; with none
//!   supplied the split falls back to equal
//! - `none` - the payer owes the full amount
//!
//! # Rounding
//!
//! Shares are rounded to two decimal places. The residue of an inexact
//! division (e.g. 100.00 across three members) is not redistributed; the
//! split-sum invariant holds to within ±0.01.

use crate::types::{
    ExpenseId, HouseholdProfile, MemberId, SettleError, SplitMethod, SplitShare,
};
use rust_decimal::Decimal;

/// Compute the split breakdown for an expense
///
/// # Arguments
///
/// * `expense` - The expense ID, used for error context
/// * `amount` - The expense amount (must be non-negative)
/// * `method` - The split method to apply
/// * `provided_splits` - Caller-supplied shares, consulted by `custom` only
/// * `payer` - The resolved payer, consulted by `none` only
/// * `household` - Household membership and weight table
///
/// # Returns
///
/// * `Ok(Vec<SplitShare>)` - One share per participating member
/// * `Err(SettleError)` - If the amount is negative or a dividing method
///   was requested against an empty household
///
/// # Errors
///
/// Returns an error if:
/// - The amount is negative (`InvalidAmount`)
/// - The method is not `none` and the household has no members
///   (`EmptyMembership`)
pub fn compute_split(
    expense: ExpenseId,
    amount: Decimal,
    method: SplitMethod,
    provided_splits: &[SplitShare],
    payer: Option<MemberId>,
    household: &HouseholdProfile,
) -> Result<Vec<SplitShare>, SettleError> {
    if amount < Decimal::ZERO {
        return Err(SettleError::invalid_amount(amount, expense));
    }

    // Guard the division before any method runs: every method except `none`
    // divides by the member count on at least one path.
    if method != SplitMethod::None && household.members.is_empty() {
        return Err(SettleError::empty_membership(method.as_str(), expense));
    }

    match method {
        SplitMethod::Equal => Ok(equal_split(amount, &household.members, true)),

        SplitMethod::Percentage => {
            let total_weight: Decimal = household
                .member_weights
                .iter()
                .map(|w| w.percentage.or(w.weight).unwrap_or(Decimal::ZERO))
                .sum();

            // No weights configured: fall back to an equal split.
            if total_weight.is_zero() {
                return Ok(equal_split(amount, &household.members, true));
            }

            // Weight entries are not filtered against household membership;
            // an entry for a non-member produces a share for that member and
            // the balance aggregator surfaces it as unresolved downstream.
            Ok(household
                .member_weights
                .iter()
                .map(|w| {
                    let percentage = w.percentage.unwrap_or_else(|| {
                        w.weight.unwrap_or(Decimal::ZERO) / total_weight * Decimal::ONE_HUNDRED
                    });
                    SplitShare {
                        member: w.member,
                        amount: (amount * percentage / Decimal::ONE_HUNDRED).round_dp(2),
                        percentage: Some(percentage),
                    }
                })
                .collect())
        }

        SplitMethod::Custom => {
            if !provided_splits.is_empty() {
                return Ok(provided_splits.to_vec());
            }
            // No custom amounts supplied: fall back to an equal split.
            // Weights are ignored here and no percentage is attached.
            Ok(equal_split(amount, &household.members, false))
        }

        SplitMethod::None => Ok(payer
            .map(|member| {
                vec![SplitShare {
                    member,
                    amount,
                    percentage: Some(Decimal::ONE_HUNDRED),
                }]
            })
            .unwrap_or_default()),
    }
}

/// Divide an amount evenly across the given members
///
/// Shares are rounded to two decimals. Callers must ensure `members` is
/// non-empty.
fn equal_split(amount: Decimal, members: &[MemberId], with_percentage: bool) -> Vec<SplitShare> {
    let count = Decimal::from(members.len());
    let share = (amount / count).round_dp(2);
    let percentage = with_percentage.then(|| Decimal::ONE_HUNDRED / count);

    members
        .iter()
        .map(|&member| SplitShare {
            member,
            amount: share,
            percentage,
        })
        .collect()
}
