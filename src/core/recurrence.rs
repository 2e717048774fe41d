//! Recurrence date calculator
//!
//! Computes the next occurrence date for recurring expenses and decides
//! whether a recurring expense is due. The date arithmetic is
//! calendar-aware: month-based frequencies clamp to the last valid day of
//! the target month (Jan 31 + monthly = Feb 28, or Feb 29 in a leap
//! year).

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Recurrence frequencies supported for recurring expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day
    Daily,

    /// Every 7 days
    Weekly,

    /// Every 14 days
    Biweekly,

    /// Every calendar month
    Monthly,

    /// Every 3 calendar months
    Quarterly,

    /// Every 12 calendar months
    Yearly,
}

/// Compute the next occurrence of a recurring expense
///
/// Adds 1/7/14 days or 1/3/12 months to the given date. Month arithmetic
/// clamps to the last valid day of the target month, so a schedule
/// anchored on the 31st drifts to shorter month ends and stays there.
///
/// Dates past the supported calendar range saturate at the maximum
/// representable date.
///
/// # Arguments
///
/// * `date` - The current occurrence date
/// * `frequency` - How often the expense recurs
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Biweekly => date.checked_add_days(Days::new(14)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Quarterly => date.checked_add_months(Months::new(3)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    }
    .unwrap_or(NaiveDate::MAX)
}

/// Schedule state of a recurring expense
///
/// Tracks when a recurring expense next materializes and whether the
/// schedule is still running. The surrounding system owns the actual
/// expense template; this type only answers "is it due" and rolls the
/// schedule forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSchedule {
    /// Whether the schedule is still running
    pub active: bool,

    /// Last date the schedule may fire, inclusive
    pub end_date: Option<NaiveDate>,

    /// Date the next expense is due to materialize
    pub next_occurrence: NaiveDate,

    /// How often the expense recurs
    pub frequency: Frequency,
}

impl RecurrenceSchedule {
    /// Whether an expense should materialize as of the given date
    ///
    /// Returns false when the schedule is inactive, ended before the
    /// given date, or not yet due.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        if self.end_date.is_some_and(|end| end < today) {
            return false;
        }
        if self.next_occurrence > today {
            return false;
        }
        true
    }

    /// Roll the schedule forward one period
    ///
    /// Advances `next_occurrence` by the schedule frequency. Called after
    /// the due expense has been materialized.
    pub fn advance(&mut self) {
        self.next_occurrence = next_occurrence(self.next_occurrence, self.frequency);
    }
}
