//! # Finsight KPI Engine
//!
//! This crate turns raw revenue/expense/goal records into time-bucketed,
//! derived financial metrics: period summaries, margins, goal attainment and
//! month-over-month trends. It is the only part of the system with
//! non-trivial computation.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   storage or presentation. It depends only on `core-types` (Layer 0) and
//!   `configuration` (the policy it is given).
//! - **Stateless Calculation:** Every operation takes an immutable
//!   `RecordSet` snapshot plus a `Scope` and derives its result on the spot.
//!   Nothing is cached, persisted or shared, so calls are freely re-entrant.
//! - **Visible failure:** Invalid records and inconsistent thresholds fail
//!   the invocation they occur in. Financial totals are never silently
//!   skewed by dropped data. Division by zero, by contrast, is defined
//!   behavior in every margin/attainment/variation rule and never raises.
//!
//! ## Public API
//!
//! - `KpiEngine`: the report facade (six read-only operations).
//! - `period`, `aggregate`, `goals`, `trend`: the underlying pure steps,
//!   usable on their own.
//! - Report shapes: `PeriodSummary`, `GoalComparison`, `CategoryExpense`,
//!   `CounterpartySummary`, `TrendPoint`.
//! - `EngineError`: the specific error types that can be returned.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod error;
pub mod facade;
pub mod goals;
pub mod period;
pub mod report;
pub mod trend;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the key components to create a clean, public-facing API.
pub use error::EngineError;
pub use facade::KpiEngine;
pub use report::{
    CategoryExpense, CounterpartySummary, FinancialStatus, GoalComparison, GoalStatus,
    MarginBand, PeriodSummary, SummaryOrder, TrendLabel, TrendMetric, TrendPoint,
};
