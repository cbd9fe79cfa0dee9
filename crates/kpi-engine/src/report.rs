use configuration::GoalPolicy;
use core_types::Period;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering contract for executive summary rows.
///
/// The caller picks the ordering explicitly instead of assuming one:
/// "latest" KPI cards want most-recent-first, series charts want
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryOrder {
    Chronological,
    MostRecentFirst,
}

/// Whether a period closed in the black or the red, on net profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    Profit,
    Loss,
    BreakEven,
}

impl FinancialStatus {
    pub fn classify(net_profit: Decimal) -> Self {
        if net_profit > Decimal::ZERO {
            FinancialStatus::Profit
        } else if net_profit < Decimal::ZERO {
            FinancialStatus::Loss
        } else {
            FinancialStatus::BreakEven
        }
    }
}

impl fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinancialStatus::Profit => "profit",
            FinancialStatus::Loss => "loss",
            FinancialStatus::BreakEven => "break-even",
        };
        f.write_str(s)
    }
}

/// Coarse quality band for a period's net margin.
///
/// Band edges (30 / 15 / 0) are fixed reporting conventions, unlike the goal
/// thresholds which are configurable policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginBand {
    High,
    Healthy,
    Low,
    Negative,
}

impl MarginBand {
    pub fn classify(net_margin_pct: Decimal) -> Self {
        if net_margin_pct >= dec!(30) {
            MarginBand::High
        } else if net_margin_pct >= dec!(15) {
            MarginBand::Healthy
        } else if net_margin_pct >= Decimal::ZERO {
            MarginBand::Low
        } else {
            MarginBand::Negative
        }
    }
}

impl fmt::Display for MarginBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarginBand::High => "high",
            MarginBand::Healthy => "healthy",
            MarginBand::Low => "low",
            MarginBand::Negative => "negative",
        };
        f.write_str(s)
    }
}

/// Aggregated financial totals for one calendar month.
///
/// `gross_profit` and `net_profit` may be negative. Margin percentages are
/// `profit / revenue * 100`, and exactly zero when revenue is zero; the
/// engine never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub gross_revenue: Decimal,
    pub gross_expense: Decimal,
    pub gross_profit: Decimal,
    pub net_revenue: Decimal,
    pub net_expense: Decimal,
    pub net_profit: Decimal,
    pub gross_margin_pct: Decimal,
    pub net_margin_pct: Decimal,
    pub status: FinancialStatus,
    pub margin_band: MarginBand,
}

impl PeriodSummary {
    /// Builds a summary from raw per-period sums.
    ///
    /// Totals stay exact; only the derived margin percentages are rounded,
    /// to `precision` decimal places.
    pub fn from_totals(
        period: Period,
        gross_revenue: Decimal,
        gross_expense: Decimal,
        net_revenue: Decimal,
        net_expense: Decimal,
        precision: u32,
    ) -> Self {
        let gross_profit = gross_revenue - gross_expense;
        let net_profit = net_revenue - net_expense;
        let gross_margin_pct = margin_pct(gross_profit, gross_revenue, precision);
        let net_margin_pct = margin_pct(net_profit, net_revenue, precision);

        Self {
            period,
            gross_revenue,
            gross_expense,
            gross_profit,
            net_revenue,
            net_expense,
            net_profit,
            gross_margin_pct,
            net_margin_pct,
            status: FinancialStatus::classify(net_profit),
            margin_band: MarginBand::classify(net_margin_pct),
        }
    }

    /// An all-zero summary for a month with no transactions. Keeps the
    /// series continuous so trend computation never sees gaps.
    pub fn empty(period: Period) -> Self {
        Self::from_totals(
            period,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            2,
        )
    }
}

/// `profit / revenue * 100`, defined as zero when revenue is zero.
fn margin_pct(profit: Decimal, revenue: Decimal, precision: u32) -> Decimal {
    if revenue == Decimal::ZERO {
        Decimal::ZERO
    } else {
        (profit / revenue * dec!(100)).round_dp(precision)
    }
}

/// Goal attainment classification, in tie-break order: the exceeded check
/// wins over met, which wins over missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Exceeded,
    Met,
    Missed,
}

impl GoalStatus {
    pub fn classify(attainment_pct: Decimal, policy: &GoalPolicy) -> Self {
        if attainment_pct >= policy.exceeded_threshold {
            GoalStatus::Exceeded
        } else if attainment_pct >= policy.met_threshold {
            GoalStatus::Met
        } else {
            GoalStatus::Missed
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalStatus::Exceeded => "exceeded",
            GoalStatus::Met => "met",
            GoalStatus::Missed => "missed",
        };
        f.write_str(s)
    }
}

/// One goal joined against the revenue it targeted.
///
/// A positive `difference` is a shortfall (`goal − realized`, following the
/// source system's sign convention).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalComparison {
    pub period: Period,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub goal_revenue: Decimal,
    pub realized_revenue: Decimal,
    pub difference: Decimal,
    pub attainment_pct: Decimal,
    pub status: GoalStatus,
}

/// Summed expense for one category across the scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category_id: i64,
    /// Resolved from the snapshot's reference categories; `None` when the
    /// reference row is missing (the row is still reported, never dropped).
    pub category_name: Option<String>,
    pub total_expense: Decimal,
    pub transaction_count: usize,
    /// This category's share of the scope's total expense, zero when the
    /// scope has no expense at all.
    pub share_pct: Decimal,
}

/// One counterparty (client or supplier) ranked by total gross volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartySummary {
    pub name: String,
    pub transaction_count: usize,
    pub total_gross: Decimal,
    pub average_ticket: Decimal,
}

/// Which metric stream a trend point was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    Revenue,
    Expense,
    Profit,
}

impl TrendMetric {
    /// Extracts this metric's value from a period summary.
    pub fn value_of(&self, summary: &PeriodSummary) -> Decimal {
        match self {
            TrendMetric::Revenue => summary.gross_revenue,
            TrendMetric::Expense => summary.gross_expense,
            TrendMetric::Profit => summary.gross_profit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendMetric::Revenue => "revenue",
            TrendMetric::Expense => "expense",
            TrendMetric::Profit => "profit",
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month-over-month direction label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Rising,
    Falling,
    Stable,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendLabel::Rising => "rising",
            TrendLabel::Falling => "falling",
            TrendLabel::Stable => "stable",
        };
        f.write_str(s)
    }
}

/// One point in a classified metric series.
///
/// The first period of a series has no prior to compare against:
/// `prior_value` and `variation_pct` are `None` and the label is `Stable`
/// by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: Period,
    pub metric: TrendMetric,
    pub value: Decimal,
    pub prior_value: Option<Decimal>,
    pub variation_pct: Option<Decimal>,
    pub label: TrendLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_zero_when_revenue_is_zero() {
        let summary = PeriodSummary::from_totals(
            Period { year: 2024, month: 1 },
            Decimal::ZERO,
            dec!(500),
            Decimal::ZERO,
            dec!(500),
            2,
        );
        assert_eq!(summary.gross_profit, dec!(-500));
        assert_eq!(summary.gross_margin_pct, Decimal::ZERO);
        assert_eq!(summary.net_margin_pct, Decimal::ZERO);
        assert_eq!(summary.status, FinancialStatus::Loss);
    }

    #[test]
    fn revenue_only_month_has_full_margin() {
        let summary = PeriodSummary::from_totals(
            Period { year: 2024, month: 1 },
            dec!(50000.00),
            Decimal::ZERO,
            dec!(47500.00),
            Decimal::ZERO,
            2,
        );
        assert_eq!(summary.gross_profit, dec!(50000.00));
        assert_eq!(summary.gross_margin_pct, dec!(100.00));
        assert_eq!(summary.net_margin_pct, dec!(100.00));
        assert_eq!(summary.margin_band, MarginBand::High);
    }

    #[test]
    fn goal_status_is_monotonic_in_attainment() {
        let policy = GoalPolicy::default();
        let mut last_rank = 0;
        for pct in [dec!(0), dec!(50), dec!(89.99), dec!(90), dec!(99.99), dec!(100), dec!(150)] {
            let rank = match GoalStatus::classify(pct, &policy) {
                GoalStatus::Missed => 0,
                GoalStatus::Met => 1,
                GoalStatus::Exceeded => 2,
            };
            assert!(rank >= last_rank, "status moved backward at {pct}%");
            last_rank = rank;
        }
    }

    #[test]
    fn margin_bands() {
        assert_eq!(MarginBand::classify(dec!(35)), MarginBand::High);
        assert_eq!(MarginBand::classify(dec!(30)), MarginBand::High);
        assert_eq!(MarginBand::classify(dec!(20)), MarginBand::Healthy);
        assert_eq!(MarginBand::classify(dec!(5)), MarginBand::Low);
        assert_eq!(MarginBand::classify(dec!(0)), MarginBand::Low);
        assert_eq!(MarginBand::classify(dec!(-10)), MarginBand::Negative);
    }
}
