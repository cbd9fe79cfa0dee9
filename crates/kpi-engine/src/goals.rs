use crate::error::EngineError;
use crate::period::{check_goal, check_revenue};
use crate::report::{GoalComparison, GoalStatus};
use configuration::GoalPolicy;
use core_types::{Period, RecordSet};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Joins every goal in the snapshot against the revenue it targeted and
/// classifies attainment.
///
/// Category-scoped goals join only matching-category revenue; company-wide
/// goals (no category) join all revenue for their month. A goal with no
/// matching revenue still produces a comparison row with zero realized
/// revenue, since missing a month entirely is exactly what goal tracking
/// has to surface.
pub fn goal_comparisons(
    set: &RecordSet,
    policy: &GoalPolicy,
    precision: u32,
) -> Result<Vec<GoalComparison>, EngineError> {
    for record in &set.revenues {
        check_revenue(record)?;
    }

    let mut rows = Vec::with_capacity(set.goals.len());
    for goal in &set.goals {
        check_goal(goal)?;
        let period = Period {
            year: goal.year,
            month: goal.month,
        };

        let realized_revenue: Decimal = set
            .revenues
            .iter()
            .filter(|r| r.period() == period)
            .filter(|r| goal.category_id.is_none_or(|c| c == r.category_id))
            .map(|r| r.gross_amount)
            .sum();

        let attainment_pct = attainment_pct(realized_revenue, goal.revenue_goal, precision);

        rows.push(GoalComparison {
            period,
            category_id: goal.category_id,
            category_name: goal
                .category_id
                .and_then(|id| set.category_name(id))
                .map(str::to_string),
            goal_revenue: goal.revenue_goal,
            realized_revenue,
            difference: goal.revenue_goal - realized_revenue,
            attainment_pct,
            status: GoalStatus::classify(attainment_pct, policy),
        });
    }

    // Deterministic output: chronological, company-wide rows before
    // category-scoped ones within a month.
    rows.sort_by(|a, b| {
        a.period
            .cmp(&b.period)
            .then(a.category_id.cmp(&b.category_id))
    });

    Ok(rows)
}

/// `realized / goal * 100`, defined as zero when the goal is zero.
fn attainment_pct(realized: Decimal, goal: Decimal, precision: u32) -> Decimal {
    if goal == Decimal::ZERO {
        Decimal::ZERO
    } else {
        (realized / goal * dec!(100)).round_dp(precision)
    }
}
