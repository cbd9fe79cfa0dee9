use crate::error::EngineError;
use core_types::{ExpenseRecord, GoalRecord, Period, RevenueRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Checks the amount invariants every transaction record must satisfy before
/// it may enter a bucket.
///
/// Validation failures abort the whole aggregation: a bad record must be
/// visible to the caller, not silently excluded from the totals.
fn check_amounts(
    code: &str,
    gross: Decimal,
    net: Decimal,
    installment_count: u32,
) -> Result<(), EngineError> {
    if gross <= Decimal::ZERO {
        return Err(EngineError::invalid_record(
            code,
            format!("gross_amount {gross} is not positive"),
        ));
    }
    if net <= Decimal::ZERO {
        return Err(EngineError::invalid_record(
            code,
            format!("net_amount {net} is not positive"),
        ));
    }
    if net > gross {
        return Err(EngineError::invalid_record(
            code,
            format!("net_amount {net} exceeds gross_amount {gross}"),
        ));
    }
    if installment_count == 0 {
        return Err(EngineError::invalid_record(code, "installment_count is zero"));
    }
    Ok(())
}

pub(crate) fn check_revenue(record: &RevenueRecord) -> Result<(), EngineError> {
    check_amounts(
        &record.transaction_code,
        record.gross_amount,
        record.net_amount,
        record.installment_count,
    )
}

pub(crate) fn check_expense(record: &ExpenseRecord) -> Result<(), EngineError> {
    check_amounts(
        &record.transaction_code,
        record.gross_amount,
        record.net_amount,
        record.installment_count,
    )
}

/// Goal rows carry their own month field rather than a date, so the calendar
/// check happens here. Zero-valued goals are allowed through: attainment
/// against a zero goal is defined (as zero), while negative goals are data
/// corruption.
pub(crate) fn check_goal(goal: &GoalRecord) -> Result<(), EngineError> {
    let code = format!(
        "goal {}/{:02}{}",
        goal.year,
        goal.month,
        goal.category_id
            .map(|c| format!(" category {c}"))
            .unwrap_or_default()
    );
    if !(1..=12).contains(&goal.month) {
        return Err(EngineError::invalid_record(
            &code,
            format!("month {} out of calendar range", goal.month),
        ));
    }
    if goal.revenue_goal < Decimal::ZERO || goal.expense_goal < Decimal::ZERO {
        return Err(EngineError::invalid_record(&code, "negative goal amount"));
    }
    Ok(())
}

/// Groups records into calendar-month buckets keyed chronologically.
///
/// Generic over the record type; the caller supplies the period extractor.
fn bucket_by_month<'a, R>(
    records: &'a [R],
    period_of: impl Fn(&R) -> Period,
    check: impl Fn(&R) -> Result<(), EngineError>,
) -> Result<BTreeMap<Period, Vec<&'a R>>, EngineError> {
    let mut buckets: BTreeMap<Period, Vec<&'a R>> = BTreeMap::new();
    for record in records {
        check(record)?;
        buckets.entry(period_of(record)).or_default().push(record);
    }
    Ok(buckets)
}

/// Buckets revenue records by transaction month.
///
/// Revenue and expense buckets are computed independently: a month with
/// revenue but no expense is a perfectly valid revenue bucket, and the
/// aggregator reconciles the two sides.
pub fn revenue_buckets(
    records: &[RevenueRecord],
) -> Result<BTreeMap<Period, Vec<&RevenueRecord>>, EngineError> {
    bucket_by_month(records, RevenueRecord::period, check_revenue)
}

/// Buckets expense records by transaction month.
pub fn expense_buckets(
    records: &[ExpenseRecord],
) -> Result<BTreeMap<Period, Vec<&ExpenseRecord>>, EngineError> {
    bucket_by_month(records, ExpenseRecord::period, check_expense)
}
