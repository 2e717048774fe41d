//! CSV format handling for expense records, household rosters, and report
//! output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvExpenseRecord / CsvMemberRecord structures for deserialization
//! - Conversion from CSV records to domain types
//! - Household roster loading
//! - Balance and settlement report serialization
//!
//! Conversion functions are pure for easy testing; the roster loader and
//! report writers operate over generic readers/writers.

use crate::core::directory::MemberDirectory;
use crate::types::{
    BalanceReport, DebtRelationship, ExpenseId, ExpenseRecord, HouseholdProfile, MemberId,
    MemberProfile, MemberWeight, SplitMethod, SplitShare,
};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// CSV record structure for expense deserialization
///
/// Matches the input CSV format with columns:
/// `id,amount,method,owner,paid_by,splits`.
/// The `method` field is optional (blank rows use the household default);
/// `paid_by` and `splits` are optional because most expenses are paid by
/// their owner and only `custom` expenses carry explicit shares.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvExpenseRecord {
    pub id: ExpenseId,
    pub amount: String,
    pub method: Option<String>,
    pub owner: MemberId,
    pub paid_by: Option<String>,
    pub splits: Option<String>,
}

/// CSV record structure for household roster deserialization
///
/// Matches the members CSV format with columns:
/// `member,name,email,weight,percentage`.
/// `weight` and `percentage` are optional and feed the percentage-split
/// weight table.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvMemberRecord {
    pub member: MemberId,
    pub name: String,
    pub email: String,
    pub weight: Option<String>,
    pub percentage: Option<String>,
}

/// Convert a CsvExpenseRecord to an ExpenseRecord
///
/// This function:
/// - Parses the split method string (case-insensitive), substituting the
///   household default for blank values
/// - Parses the amount string into a Decimal
/// - Parses the optional payer ID
/// - Parses the optional `member:amount` split list
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
/// * `default_method` - Household default applied when the method is blank
///
/// # Returns
///
/// Result containing either:
/// - Ok(ExpenseRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_expense_record(
    csv_record: CsvExpenseRecord,
    default_method: SplitMethod,
) -> Result<ExpenseRecord, String> {
    let method = match csv_record.method.as_deref().map(str::trim) {
        None | Some("") => default_method,
        Some(value) => match value.to_lowercase().as_str() {
            "equal" => SplitMethod::Equal,
            "percentage" => SplitMethod::Percentage,
            "custom" => SplitMethod::Custom,
            "none" => SplitMethod::None,
            _ => {
                return Err(format!(
                    "Invalid split method '{}' for expense {}",
                    value, csv_record.id
                ))
            }
        },
    };

    let amount = Decimal::from_str(csv_record.amount.trim()).map_err(|_| {
        format!(
            "Invalid amount '{}' for expense {}",
            csv_record.amount, csv_record.id
        )
    })?;

    let paid_by = match csv_record.paid_by.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(value.parse::<MemberId>().map_err(|_| {
            format!("Invalid payer '{}' for expense {}", value, csv_record.id)
        })?),
    };

    // Split lists on non-custom expenses are carried along but ignored by
    // the split calculator, mirroring how unused optional fields are
    // tolerated elsewhere in the format.
    let splits = match csv_record.splits.as_deref().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(value) => parse_split_list(value, csv_record.id)?,
    };

    Ok(ExpenseRecord {
        id: csv_record.id,
        amount,
        method,
        owner: csv_record.owner,
        paid_by,
        splits,
    })
}

/// Parse a `member:amount` split list
///
/// Entries are separated by `;`, e.g. `1:20.00;2:70.00`.
fn parse_split_list(value: &str, expense: ExpenseId) -> Result<Vec<SplitShare>, String> {
    value
        .split(';')
        .map(|entry| {
            let entry = entry.trim();
            let (member, amount) = entry.split_once(':').ok_or_else(|| {
                format!("Invalid split entry '{}' for expense {}", entry, expense)
            })?;

            let member = member.trim().parse::<MemberId>().map_err(|_| {
                format!("Invalid split member '{}' for expense {}", member, expense)
            })?;
            let amount = Decimal::from_str(amount.trim()).map_err(|_| {
                format!("Invalid split amount '{}' for expense {}", amount, expense)
            })?;

            Ok(SplitShare {
                member,
                amount,
                percentage: None,
            })
        })
        .collect()
}

/// Convert a CsvMemberRecord to directory and weight-table entries
///
/// # Returns
///
/// The member's profile and, when the row carries a weight or percentage,
/// its weight-table entry.
pub fn convert_member_record(
    csv_record: CsvMemberRecord,
) -> Result<(MemberId, MemberProfile, Option<MemberWeight>), String> {
    let member = csv_record.member;
    let parse_optional = |field: &Option<String>, label: &str| -> Result<Option<Decimal>, String> {
        match field.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Decimal::from_str(value)
                .map(Some)
                .map_err(|_| format!("Invalid {} '{}' for member {}", label, value, member)),
        }
    };

    let weight = parse_optional(&csv_record.weight, "weight")?;
    let percentage = parse_optional(&csv_record.percentage, "percentage")?;

    let profile = MemberProfile {
        name: csv_record.name.trim().to_string(),
        email: csv_record.email.trim().to_string(),
    };

    let weight_entry = (weight.is_some() || percentage.is_some()).then(|| MemberWeight {
        member,
        percentage,
        weight,
    });

    Ok((member, profile, weight_entry))
}

/// Read a household roster from CSV
///
/// Builds the member directory and household profile from a members CSV
/// stream. Duplicate member IDs keep the first occurrence. The household
/// default split method is `equal`, matching the most common expense
/// shape.
///
/// # Arguments
///
/// * `input` - Reader providing the members CSV data
///
/// # Returns
///
/// * `Ok((MemberDirectory, HouseholdProfile))` if the roster parsed
/// * `Err(String)` on the first malformed row
pub fn read_household_csv<R: Read>(
    input: R,
) -> Result<(MemberDirectory, HouseholdProfile), String> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut directory = MemberDirectory::new();
    let mut members = Vec::new();
    let mut member_weights = Vec::new();

    for (row, result) in reader.deserialize::<CsvMemberRecord>().enumerate() {
        let csv_record =
            result.map_err(|e| format!("Line {}: CSV parse error: {}", row + 2, e))?;
        let (member, profile, weight_entry) = convert_member_record(csv_record)?;

        if !directory.contains(member) {
            members.push(member);
        }
        directory.insert(member, profile);
        if let Some(entry) = weight_entry {
            member_weights.push(entry);
        }
    }

    let household = HouseholdProfile {
        members,
        member_weights,
        default_split_method: SplitMethod::Equal,
    };

    Ok((directory, household))
}

/// Write a balance report to CSV format
///
/// Writes balances with columns:
/// `member,name,email,total_paid,total_owed,balance`.
/// Rows are sorted by member ID for deterministic output.
///
/// # Arguments
///
/// * `report` - The balance report to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(report: &BalanceReport, output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "member",
            "name",
            "email",
            "total_paid",
            "total_owed",
            "balance",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Sort by member ID for deterministic output
    let mut balances = report.balances.clone();
    balances.sort_by_key(|balance| balance.member);

    for balance in balances {
        writer
            .write_record(&[
                balance.member.to_string(),
                balance.name,
                balance.email,
                format!("{:.2}", balance.total_paid),
                format!("{:.2}", balance.total_owed),
                format!("{:.2}", balance.balance),
            ])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write settlement suggestions to CSV format
///
/// Writes debts with columns: `from,from_name,to,to_name,amount,currency`
/// in the order the debt simplifier produced them.
///
/// # Arguments
///
/// * `debts` - Settlement suggestions to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_settlements_csv(
    debts: &[DebtRelationship],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["from", "from_name", "to", "to_name", "amount", "currency"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for debt in debts {
        writer
            .write_record(&[
                debt.from.member.to_string(),
                debt.from.name.clone(),
                debt.to.member.to_string(),
                debt.to.name.clone(),
                format!("{:.2}", debt.amount),
                debt.currency.clone(),
            ])
            .map_err(|e| format!("Failed to write settlement record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
