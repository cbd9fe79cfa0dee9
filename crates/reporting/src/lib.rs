//! # Finsight Reporting Service
//!
//! The async Query Facade consumed by whatever presents the numbers. Each
//! operation resolves one fresh snapshot from its injected [`RecordSource`]
//! and delegates all computation to the pure engine. The service itself
//! holds no state beyond the source handle and the threshold policy, so
//! operations are independently re-entrant.

use configuration::Config;
use core_types::{CategoryKind, Scope};
use kpi_engine::{
    CategoryExpense, CounterpartySummary, GoalComparison, KpiEngine, PeriodSummary,
    SummaryOrder, TrendMetric, TrendPoint,
};
use record_store::RecordSource;
use std::sync::Arc;

pub mod error;

pub use error::ReportError;

/// The five report shapes of the dashboard plus the counterparty ranking,
/// served over any record source.
pub struct ReportService {
    source: Arc<dyn RecordSource>,
    engine: KpiEngine,
}

impl ReportService {
    pub fn new(source: Arc<dyn RecordSource>, config: Config) -> Self {
        Self {
            source,
            engine: KpiEngine::new(config),
        }
    }

    /// Per-month totals, in the ordering the caller names explicitly.
    pub async fn executive_summary(
        &self,
        scope: &Scope,
        order: SummaryOrder,
    ) -> Result<Vec<PeriodSummary>, ReportError> {
        let set = self.source.fetch_snapshot(scope).await?;
        Ok(self.engine.executive_summary(scope, &set, order)?)
    }

    /// Months ranked by net margin, revenue-bearing months only.
    pub async fn margin_analysis(&self, scope: &Scope) -> Result<Vec<PeriodSummary>, ReportError> {
        let set = self.source.fetch_snapshot(scope).await?;
        Ok(self.engine.margin_analysis(scope, &set)?)
    }

    /// Goal attainment rows for every goal in scope.
    pub async fn revenue_vs_goal(&self, scope: &Scope) -> Result<Vec<GoalComparison>, ReportError> {
        let set = self.source.fetch_snapshot(scope).await?;
        Ok(self.engine.revenue_vs_goal(scope, &set)?)
    }

    /// Summed expense per category, largest first.
    pub async fn expense_by_category(
        &self,
        scope: &Scope,
    ) -> Result<Vec<CategoryExpense>, ReportError> {
        let set = self.source.fetch_snapshot(scope).await?;
        Ok(self.engine.expense_by_category(scope, &set)?)
    }

    /// Chronological trend points for one metric stream.
    pub async fn trend_series(
        &self,
        scope: &Scope,
        metric: TrendMetric,
    ) -> Result<Vec<TrendPoint>, ReportError> {
        let set = self.source.fetch_snapshot(scope).await?;
        Ok(self.engine.trend_series(scope, &set, metric)?)
    }

    /// Top clients (revenue side) or suppliers (expense side) by volume.
    pub async fn counterparty_analysis(
        &self,
        scope: &Scope,
        kind: CategoryKind,
        limit: usize,
    ) -> Result<Vec<CounterpartySummary>, ReportError> {
        let set = self.source.fetch_snapshot(scope).await?;
        Ok(self
            .engine
            .counterparty_analysis(scope, &set, kind, limit)?)
    }
}
