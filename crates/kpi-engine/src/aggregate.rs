use crate::error::EngineError;
use crate::period::{expense_buckets, revenue_buckets};
use crate::report::PeriodSummary;
use core_types::{Period, RecordSet};
use rust_decimal::Decimal;

/// Reduces a scoped snapshot into one `PeriodSummary` per calendar month,
/// chronologically ordered.
///
/// Every month between the earliest and latest observed period is present:
/// a month with no matching records yields an all-zero summary rather than
/// an absent entry, so downstream trend computation sees a continuous
/// series. Summation is plain `Decimal` addition, so the result is
/// deterministic regardless of input ordering.
pub fn period_summaries(
    set: &RecordSet,
    precision: u32,
) -> Result<Vec<PeriodSummary>, EngineError> {
    let revenues = revenue_buckets(&set.revenues)?;
    let expenses = expense_buckets(&set.expenses)?;

    let first = match (revenues.keys().next(), expenses.keys().next()) {
        (Some(&r), Some(&e)) => r.min(e),
        (Some(&r), None) => r,
        (None, Some(&e)) => e,
        (None, None) => return Ok(Vec::new()),
    };
    let last = match (revenues.keys().next_back(), expenses.keys().next_back()) {
        (Some(&r), Some(&e)) => r.max(e),
        (Some(&r), None) => r,
        (None, Some(&e)) => e,
        (None, None) => unreachable!("span start exists, so an end must too"),
    };

    let mut summaries = Vec::new();
    let mut period = first;
    loop {
        let (gross_revenue, net_revenue) = revenues
            .get(&period)
            .map(|bucket| {
                bucket.iter().fold(
                    (Decimal::ZERO, Decimal::ZERO),
                    |(gross, net), r| (gross + r.gross_amount, net + r.net_amount),
                )
            })
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        let (gross_expense, net_expense) = expenses
            .get(&period)
            .map(|bucket| {
                bucket.iter().fold(
                    (Decimal::ZERO, Decimal::ZERO),
                    |(gross, net), e| (gross + e.gross_amount, net + e.net_amount),
                )
            })
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        summaries.push(PeriodSummary::from_totals(
            period,
            gross_revenue,
            gross_expense,
            net_revenue,
            net_expense,
            precision,
        ));

        if period == last {
            break;
        }
        period = period.next();
    }

    tracing::debug!(
        months = summaries.len(),
        from = %first,
        to = %last,
        "aggregated period summaries"
    );

    Ok(summaries)
}

/// The summary for one specific `(year, month)` inside a scoped snapshot.
///
/// A month with zero matching records yields an all-zero summary, not an
/// absent value.
pub fn summary_for(
    set: &RecordSet,
    period: Period,
    precision: u32,
) -> Result<PeriodSummary, EngineError> {
    let summaries = period_summaries(set, precision)?;
    Ok(summaries
        .into_iter()
        .find(|s| s.period == period)
        .unwrap_or_else(|| PeriodSummary::empty(period)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FinancialStatus;
    use crate::testutil::{expense, record_set, revenue};
    use rust_decimal_macros::dec;

    #[test]
    fn revenue_only_january() {
        // 50000.00 gross / 47500.00 net of revenue, no expense that month.
        let set = record_set(
            vec![
                revenue("REC001", 2024, 1, 15, dec!(30000.00), dec!(28500.00)),
                revenue("REC002", 2024, 1, 20, dec!(20000.00), dec!(19000.00)),
            ],
            vec![],
            vec![],
        );

        let summaries = period_summaries(&set, 2).unwrap();
        assert_eq!(summaries.len(), 1);

        let jan = &summaries[0];
        assert_eq!(jan.gross_revenue, dec!(50000.00));
        assert_eq!(jan.gross_profit, dec!(50000.00));
        assert_eq!(jan.net_profit, dec!(47500.00));
        assert_eq!(jan.gross_margin_pct, dec!(100.00));
        assert_eq!(jan.net_margin_pct, dec!(100.00));
    }

    #[test]
    fn profit_is_revenue_minus_expense_exactly() {
        let set = record_set(
            vec![revenue("REC001", 2024, 3, 1, dec!(35000.00), dec!(33250.00))],
            vec![
                expense("DSP001", 2024, 3, 15, dec!(25000.00), dec!(25000.00)),
                expense("DSP002", 2024, 3, 31, dec!(5000.00), dec!(5000.00)),
            ],
            vec![],
        );

        let summaries = period_summaries(&set, 2).unwrap();
        let march = &summaries[0];
        assert_eq!(march.gross_profit, march.gross_revenue - march.gross_expense);
        assert_eq!(march.gross_profit, dec!(5000.00));
        assert_eq!(march.net_profit, dec!(3250.00));
        assert_eq!(march.status, FinancialStatus::Profit);
    }

    #[test]
    fn gap_months_are_filled_with_zero_summaries() {
        let set = record_set(
            vec![
                revenue("REC001", 2024, 1, 10, dec!(100), dec!(95)),
                revenue("REC002", 2024, 4, 10, dec!(100), dec!(95)),
            ],
            vec![],
            vec![],
        );

        let summaries = period_summaries(&set, 2).unwrap();
        let periods: Vec<String> = summaries.iter().map(|s| s.period.to_string()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);

        assert_eq!(summaries[1].gross_revenue, Decimal::ZERO);
        assert_eq!(summaries[1].gross_margin_pct, Decimal::ZERO);
        assert_eq!(summaries[2].gross_expense, Decimal::ZERO);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = record_set(
            vec![
                revenue("REC001", 2024, 1, 5, dec!(123.45), dec!(117.28)),
                revenue("REC002", 2024, 1, 9, dec!(678.90), dec!(645.00)),
                revenue("REC003", 2024, 2, 1, dec!(55.55), dec!(50.00)),
            ],
            vec![expense("DSP001", 2024, 1, 7, dec!(99.99), dec!(99.99))],
            vec![],
        );
        let mut reversed = forward.clone();
        reversed.revenues.reverse();
        reversed.expenses.reverse();

        assert_eq!(
            period_summaries(&forward, 2).unwrap(),
            period_summaries(&reversed, 2).unwrap()
        );
    }

    #[test]
    fn aggregation_is_idempotent() {
        let set = record_set(
            vec![revenue("REC001", 2024, 6, 1, dec!(1000), dec!(950))],
            vec![expense("DSP001", 2024, 6, 2, dec!(400), dec!(400))],
            vec![],
        );
        assert_eq!(
            period_summaries(&set, 2).unwrap(),
            period_summaries(&set, 2).unwrap()
        );
    }

    #[test]
    fn specific_month_with_no_records_is_zeroed() {
        let set = record_set(
            vec![revenue("REC001", 2024, 1, 10, dec!(100), dec!(95))],
            vec![],
            vec![],
        );
        let missing = summary_for(&set, Period { year: 2024, month: 7 }, 2).unwrap();
        assert_eq!(missing.gross_revenue, Decimal::ZERO);
        assert_eq!(missing.net_profit, Decimal::ZERO);
    }
}
