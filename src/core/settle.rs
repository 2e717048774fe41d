//! Debt simplifier
//!
//! Reduces a set of net balances to a short list of suggested payments
//! that settles everyone. Uses greedy two-pointer matching: the largest
//! creditor is repeatedly paired with the largest-magnitude debtor until
//! one side runs out. Each pairing settles `min(credit, |debt|)`, so every
//! payment fully settles at least one party.
//!
//! The greedy pass is O(n log n) and produces far fewer payments than the
//! naive all-pairs settlement, but it is a heuristic, not an exact
//! minimum-transaction solver.
//!
//! # Numeric semantics
//!
//! Comparisons use a fixed tolerance of 0.01 currency units: balances
//! within the band are treated as already settled, which absorbs
//! accumulated rounding residue from inexact splits.

use crate::types::{CurrencyCode, DebtRelationship, MemberBalance, MemberRef};
use rust_decimal::Decimal;

/// Compute suggested settlement payments from net balances
///
/// # Arguments
///
/// * `balances` - Net balances as produced by the balance aggregator
/// * `currency` - Unit of account to denominate the suggestions in
///
/// # Returns
///
/// Suggested payments, each from a debtor to a creditor, with amounts
/// rounded to two decimals. Applying every payment drives all balances to
/// within 0.01 of zero.
pub fn simplify_debts(balances: &[MemberBalance], currency: &str) -> Vec<DebtRelationship> {
    let tolerance = Decimal::new(1, 2); // 0.01

    // Partition into creditors and debtors, discarding near-zero balances
    let mut creditors: Vec<MemberBalance> = balances
        .iter()
        .filter(|b| b.balance > tolerance)
        .cloned()
        .collect();
    creditors.sort_by(|a, b| b.balance.cmp(&a.balance));

    let mut debtors: Vec<MemberBalance> = balances
        .iter()
        .filter(|b| b.balance < -tolerance)
        .cloned()
        .collect();
    debtors.sort_by(|a, b| a.balance.cmp(&b.balance));

    let mut debts = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < creditors.len() && j < debtors.len() {
        let amount = creditors[i].balance.min(debtors[j].balance.abs());

        debts.push(DebtRelationship {
            from: MemberRef::from(&debtors[j]),
            to: MemberRef::from(&creditors[i]),
            amount: amount.round_dp(2),
            currency: CurrencyCode::from(currency),
        });

        // Apply the unrounded amount to the working balances; only the
        // recorded payment is rounded.
        creditors[i].balance -= amount;
        debtors[j].balance += amount;

        if creditors[i].balance < tolerance {
            i += 1;
        }
        if debtors[j].balance.abs() < tolerance {
            j += 1;
        }
    }

    debts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberId;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn balance(member: MemberId, name: &str, net: &str) -> MemberBalance {
        let net = dec(net);
        MemberBalance {
            member,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            total_paid: if net > Decimal::ZERO { net } else { Decimal::ZERO },
            total_owed: if net < Decimal::ZERO { -net } else { Decimal::ZERO },
            balance: net,
        }
    }

    /// Apply every suggested payment and assert all balances reach zero
    /// within tolerance.
    fn assert_settles(balances: &[MemberBalance], debts: &[DebtRelationship]) {
        let mut net: Vec<(MemberId, Decimal)> =
            balances.iter().map(|b| (b.member, b.balance)).collect();

        for debt in debts {
            for (member, value) in net.iter_mut() {
                if *member == debt.from.member {
                    *value += debt.amount;
                } else if *member == debt.to.member {
                    *value -= debt.amount;
                }
            }
        }

        for (member, value) in &net {
            assert!(
                value.abs() <= dec("0.02"),
                "member {} left with residual balance {}",
                member,
                value
            );
        }
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let balances = vec![
            balance(1, "Alice", "60.00"),
            balance(2, "Bob", "-30.00"),
            balance(3, "Carol", "-30.00"),
        ];

        let debts = simplify_debts(&balances, "EUR");

        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0].from.member, 2);
        assert_eq!(debts[0].to.member, 1);
        assert_eq!(debts[0].amount, dec("30.00"));
        assert_eq!(debts[1].from.member, 3);
        assert_eq!(debts[1].to.member, 1);
        assert_eq!(debts[1].amount, dec("30.00"));
        assert!(debts.iter().all(|d| d.currency == "EUR"));

        assert_settles(&balances, &debts);
    }

    #[test]
    fn test_single_settlement() {
        let balances = vec![balance(1, "Alice", "-70.00"), balance(2, "Bob", "70.00")];

        let debts = simplify_debts(&balances, "EUR");

        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].from.member, 1);
        assert_eq!(debts[0].to.member, 2);
        assert_eq!(debts[0].amount, dec("70.00"));
    }

    #[test]
    fn test_largest_parties_are_matched_first() {
        let balances = vec![
            balance(1, "Alice", "50.00"),
            balance(2, "Bob", "100.00"),
            balance(3, "Carol", "-120.00"),
            balance(4, "Dave", "-30.00"),
        ];

        let debts = simplify_debts(&balances, "EUR");

        // Carol (largest debt) pays Bob (largest credit) first
        assert_eq!(debts[0].from.member, 3);
        assert_eq!(debts[0].to.member, 2);
        assert_eq!(debts[0].amount, dec("100.00"));

        assert_settles(&balances, &debts);
    }

    #[test]
    fn test_settled_balances_produce_no_debts() {
        let balances = vec![balance(1, "Alice", "0.00"), balance(2, "Bob", "0.00")];

        let debts = simplify_debts(&balances, "EUR");

        assert!(debts.is_empty());
    }

    #[test]
    fn test_rounding_noise_is_treated_as_settled() {
        let balances = vec![
            balance(1, "Alice", "0.01"),
            balance(2, "Bob", "-0.01"),
            balance(3, "Carol", "0.005"),
        ];

        let debts = simplify_debts(&balances, "EUR");

        assert!(debts.is_empty());
    }

    #[test]
    fn test_empty_balances() {
        assert!(simplify_debts(&[], "EUR").is_empty());
    }

    #[test]
    fn test_currency_is_threaded_through() {
        let balances = vec![balance(1, "Alice", "-10.00"), balance(2, "Bob", "10.00")];

        let debts = simplify_debts(&balances, "USD");

        assert_eq!(debts[0].currency, "USD");
    }

    #[rstest]
    #[case::pairwise(vec![("20.00", 2), ("-20.00", 2)])]
    #[case::fan_in(vec![("90.00", 1), ("-30.00", 3)])]
    #[case::fan_out(vec![("-90.00", 1), ("30.00", 3)])]
    #[case::mixed(vec![("75.50", 2), ("-50.25", 2), ("-50.50", 1)])]
    fn test_payment_count_never_exceeds_party_count(#[case] parties: Vec<(&str, usize)>) {
        // Build a balance set from (net, repeat) pairs
        let mut balances = Vec::new();
        let mut member = 1;
        for (net, repeat) in parties {
            for _ in 0..repeat {
                balances.push(balance(member, &format!("M{}", member), net));
                member += 1;
            }
        }

        let debts = simplify_debts(&balances, "EUR");

        let creditors = balances.iter().filter(|b| b.balance > dec("0.01")).count();
        let debtors = balances.iter().filter(|b| b.balance < dec("-0.01")).count();

        // Every payment fully settles at least one party, so the count is
        // bounded by the number of unsettled parties.
        assert!(debts.len() <= creditors + debtors);
        assert!(debts.len() < creditors + debtors || debts.is_empty());

        assert_settles(&balances, &debts);
    }
}
