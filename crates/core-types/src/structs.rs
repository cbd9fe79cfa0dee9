use crate::enums::{CategoryKind, PaymentMethod, RecordStatus};
use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A calendar-month key, ordered chronologically.
///
/// Buckets are keyed by `Period`; derived report rows carry it so callers can
/// line results up across operations without re-parsing dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Creates a period, rejecting months outside the calendar range.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidInput(
                "period month".to_string(),
                month.to_string(),
            ));
        }
        Ok(Self { year, month })
    }

    /// The period a calendar date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The immediately following calendar month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The selector defining what a query aggregates over: one company, an
/// inclusive year range, and an optional single-month filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub company_id: i64,
    pub year_start: i32,
    pub year_end: i32,
    pub month: Option<u32>,
}

impl Scope {
    pub fn new(
        company_id: i64,
        year_start: i32,
        year_end: i32,
        month: Option<u32>,
    ) -> Result<Self, CoreError> {
        if year_start > year_end {
            return Err(CoreError::InvalidScope(format!(
                "year range {year_start}..={year_end} is reversed"
            )));
        }
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(CoreError::InvalidScope(format!("month {m} out of range")));
            }
        }
        Ok(Self {
            company_id,
            year_start,
            year_end,
            month,
        })
    }

    /// Convenience constructor for a single calendar year.
    pub fn year(company_id: i64, year: i32) -> Self {
        Self {
            company_id,
            year_start: year,
            year_end: year,
            month: None,
        }
    }

    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.matches_period(Period::from_date(date))
    }

    pub fn matches_period(&self, period: Period) -> bool {
        (self.year_start..=self.year_end).contains(&period.year)
            && self.month.is_none_or(|m| m == period.month)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "company {} years {}..={}",
            self.company_id, self.year_start, self.year_end
        )?;
        if let Some(m) = self.month {
            write!(f, " month {m:02}")?;
        }
        Ok(())
    }
}

fn default_installment_count() -> u32 {
    1
}

/// A single revenue transaction as supplied by the record store.
///
/// Immutable once settled; the engine never mutates records in any state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub id: Uuid,
    pub company_id: i64,
    pub category_id: i64,
    pub transaction_code: String,
    pub description: String,
    /// Transaction value before deductions (fees, taxes).
    pub gross_amount: Decimal,
    /// Transaction value after deductions. Never exceeds `gross_amount`.
    pub net_amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub settlement_date: Option<NaiveDate>,
    pub status: RecordStatus,
    /// The paying client, when known.
    #[serde(default)]
    pub client: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub installment: bool,
    #[serde(default = "default_installment_count")]
    pub installment_count: u32,
}

impl RevenueRecord {
    pub fn period(&self) -> Period {
        Period::from_date(self.transaction_date)
    }
}

/// A single expense transaction as supplied by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub company_id: i64,
    pub category_id: i64,
    pub transaction_code: String,
    pub description: String,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub settlement_date: Option<NaiveDate>,
    pub status: RecordStatus,
    /// The supplier paid, when known.
    #[serde(default)]
    pub supplier: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub installment: bool,
    #[serde(default = "default_installment_count")]
    pub installment_count: u32,
}

impl ExpenseRecord {
    pub fn period(&self) -> Period {
        Period::from_date(self.transaction_date)
    }
}

/// A monthly target for one company, optionally scoped to one category.
///
/// Unique per `(company_id, year, month, category_id)`; a `None` category
/// means the goal covers the company's whole revenue for that month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub company_id: i64,
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub revenue_goal: Decimal,
    pub expense_goal: Decimal,
    #[serde(default)]
    pub profit_goal: Option<Decimal>,
}

/// Static reference data classifying transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
}

/// An immutable snapshot of every record a query operates on.
///
/// The record store produces one `RecordSet` per call; the engine treats it
/// as frozen for the duration of that call, which is what makes every report
/// operation re-entrant without locking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub revenues: Vec<RevenueRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl RecordSet {
    /// True when the snapshot holds no transactional or goal data at all.
    ///
    /// Reference categories are deliberately ignored: a seeded category list
    /// with no transactions is still an empty scope.
    pub fn is_empty(&self) -> bool {
        self.revenues.is_empty() && self.expenses.is_empty() && self.goals.is_empty()
    }

    /// Restricts the snapshot to the records matching `scope`.
    ///
    /// Categories are reference data and pass through untouched.
    pub fn scoped(&self, scope: &Scope) -> RecordSet {
        RecordSet {
            revenues: self
                .revenues
                .iter()
                .filter(|r| r.company_id == scope.company_id && scope.matches_date(r.transaction_date))
                .cloned()
                .collect(),
            expenses: self
                .expenses
                .iter()
                .filter(|e| e.company_id == scope.company_id && scope.matches_date(e.transaction_date))
                .cloned()
                .collect(),
            goals: self
                .goals
                .iter()
                .filter(|g| {
                    g.company_id == scope.company_id
                        && (scope.year_start..=scope.year_end).contains(&g.year)
                        && scope.month.is_none_or(|m| m == g.month)
                })
                .cloned()
                .collect(),
            categories: self.categories.clone(),
        }
    }

    /// Looks a category's display name up in the snapshot's reference data.
    pub fn category_name(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_order_chronologically() {
        let dec_2023 = Period::new(2023, 12).unwrap();
        let jan_2024 = Period::new(2024, 1).unwrap();
        let feb_2024 = Period::new(2024, 2).unwrap();

        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < feb_2024);
        assert_eq!(dec_2023.next(), jan_2024);
        assert_eq!(jan_2024.next(), feb_2024);
        assert_eq!(jan_2024.to_string(), "2024-01");
    }

    #[test]
    fn period_rejects_out_of_range_month() {
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
    }

    #[test]
    fn scope_validation() {
        assert!(Scope::new(1, 2024, 2023, None).is_err());
        assert!(Scope::new(1, 2024, 2024, Some(0)).is_err());

        let scope = Scope::new(1, 2023, 2024, Some(2)).unwrap();
        assert!(scope.matches_period(Period { year: 2024, month: 2 }));
        assert!(!scope.matches_period(Period { year: 2024, month: 3 }));
        assert!(!scope.matches_period(Period { year: 2025, month: 2 }));
    }
}
