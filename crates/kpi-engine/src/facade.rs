use crate::aggregate::period_summaries;
use crate::error::EngineError;
use crate::goals::goal_comparisons;
use crate::period::{check_expense, check_revenue};
use crate::report::{
    CategoryExpense, CounterpartySummary, GoalComparison, PeriodSummary, SummaryOrder,
    TrendMetric, TrendPoint,
};
use crate::trend;
use configuration::Config;
use core_types::{CategoryKind, RecordSet, Scope};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// A stateless calculator exposing the read-only report operations.
///
/// Each operation takes the scope selector plus an immutable snapshot and
/// derives everything on the spot; nothing is cached or persisted between
/// calls, which is why concurrent queries need no coordination. The engine
/// holds only the threshold policy it was given.
#[derive(Debug, Clone, Default)]
pub struct KpiEngine {
    config: Config,
}

impl KpiEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates the policy and narrows the snapshot to the scope.
    ///
    /// Bad thresholds fail the invocation they were used in, and a scope
    /// matching no records at all is an `EmptyScope`, so callers can
    /// distinguish "no data" from "data sums to zero".
    fn scoped(&self, scope: &Scope, set: &RecordSet) -> Result<RecordSet, EngineError> {
        self.config.validate()?;
        let scoped = set.scoped(scope);
        if scoped.is_empty() {
            tracing::debug!(%scope, "scope matched no records");
            return Err(EngineError::EmptyScope(scope.to_string()));
        }
        Ok(scoped)
    }

    fn precision(&self) -> u32 {
        self.config.display.currency_precision
    }

    /// Per-month financial totals for the scope.
    ///
    /// `SummaryOrder::Chronological` suits series displays,
    /// `SummaryOrder::MostRecentFirst` suits "latest month" KPI cards.
    pub fn executive_summary(
        &self,
        scope: &Scope,
        set: &RecordSet,
        order: SummaryOrder,
    ) -> Result<Vec<PeriodSummary>, EngineError> {
        let scoped = self.scoped(scope, set)?;
        let mut summaries = period_summaries(&scoped, self.precision())?;
        if order == SummaryOrder::MostRecentFirst {
            summaries.reverse();
        }
        Ok(summaries)
    }

    /// Months ranked by net margin, best first, excluding months with no
    /// revenue (a margin over zero revenue says nothing).
    pub fn margin_analysis(
        &self,
        scope: &Scope,
        set: &RecordSet,
    ) -> Result<Vec<PeriodSummary>, EngineError> {
        let scoped = self.scoped(scope, set)?;
        let mut summaries = period_summaries(&scoped, self.precision())?;
        summaries.retain(|s| s.gross_revenue > Decimal::ZERO);
        summaries.sort_by(|a, b| {
            b.net_margin_pct
                .cmp(&a.net_margin_pct)
                .then(a.period.cmp(&b.period))
        });
        Ok(summaries)
    }

    /// Every goal in scope joined against its realized revenue.
    pub fn revenue_vs_goal(
        &self,
        scope: &Scope,
        set: &RecordSet,
    ) -> Result<Vec<GoalComparison>, EngineError> {
        let scoped = self.scoped(scope, set)?;
        goal_comparisons(&scoped, &self.config.goal_policy, self.precision())
    }

    /// Total expense and transaction count per category, largest first,
    /// with each category's share of the scope total.
    pub fn expense_by_category(
        &self,
        scope: &Scope,
        set: &RecordSet,
    ) -> Result<Vec<CategoryExpense>, EngineError> {
        let scoped = self.scoped(scope, set)?;

        let mut by_category: BTreeMap<i64, (Decimal, usize)> = BTreeMap::new();
        for record in &scoped.expenses {
            check_expense(record)?;
            let entry = by_category.entry(record.category_id).or_default();
            entry.0 += record.gross_amount;
            entry.1 += 1;
        }

        let total: Decimal = by_category.values().map(|(sum, _)| *sum).sum();
        let precision = self.precision();

        let mut rows: Vec<CategoryExpense> = by_category
            .into_iter()
            .map(|(category_id, (total_expense, transaction_count))| CategoryExpense {
                category_id,
                category_name: scoped.category_name(category_id).map(str::to_string),
                total_expense,
                transaction_count,
                share_pct: if total == Decimal::ZERO {
                    Decimal::ZERO
                } else {
                    (total_expense / total * dec!(100)).round_dp(precision)
                },
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_expense
                .cmp(&a.total_expense)
                .then(a.category_id.cmp(&b.category_id))
        });
        Ok(rows)
    }

    /// Chronological trend points for one metric stream.
    pub fn trend_series(
        &self,
        scope: &Scope,
        set: &RecordSet,
        metric: TrendMetric,
    ) -> Result<Vec<TrendPoint>, EngineError> {
        let scoped = self.scoped(scope, set)?;
        let summaries = period_summaries(&scoped, self.precision())?;
        Ok(trend::trend_series(
            &summaries,
            metric,
            self.config.trend_policy.stable_band_pct,
            self.precision(),
        ))
    }

    /// Top counterparties by gross volume: clients for the revenue side,
    /// suppliers for the expense side.
    ///
    /// Records without a counterparty are excluded from this ranking only;
    /// they still count in every aggregate report.
    pub fn counterparty_analysis(
        &self,
        scope: &Scope,
        set: &RecordSet,
        kind: CategoryKind,
        limit: usize,
    ) -> Result<Vec<CounterpartySummary>, EngineError> {
        let scoped = self.scoped(scope, set)?;

        let mut by_name: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        match kind {
            CategoryKind::Revenue => {
                for record in &scoped.revenues {
                    check_revenue(record)?;
                    let Some(name) = record.client.as_deref().filter(|n| !n.is_empty()) else {
                        continue;
                    };
                    let entry = by_name.entry(name.to_string()).or_default();
                    entry.0 += record.gross_amount;
                    entry.1 += 1;
                }
            }
            CategoryKind::Expense => {
                for record in &scoped.expenses {
                    check_expense(record)?;
                    let Some(name) = record.supplier.as_deref().filter(|n| !n.is_empty()) else {
                        continue;
                    };
                    let entry = by_name.entry(name.to_string()).or_default();
                    entry.0 += record.gross_amount;
                    entry.1 += 1;
                }
            }
        }

        let precision = self.precision();
        let mut rows: Vec<CounterpartySummary> = by_name
            .into_iter()
            .map(|(name, (total_gross, transaction_count))| CounterpartySummary {
                name,
                transaction_count,
                total_gross,
                average_ticket: (total_gross / Decimal::from(transaction_count as u64))
                    .round_dp(precision),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_gross
                .cmp(&a.total_gross)
                .then_with(|| a.name.cmp(&b.name))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}
