use crate::report::{PeriodSummary, TrendLabel, TrendMetric, TrendPoint};
use core_types::Period;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Classifies month-over-month direction for one metric stream.
///
/// The input must be chronologically ordered (the aggregator guarantees a
/// continuous, ordered series). The first period has no prior: its point
/// carries no variation and is labeled stable by convention.
///
/// `variation_pct` is `(current − prior) / |prior| * 100`. A zero prior is
/// defined behavior, not an error: flat-at-zero stays zero, while any move
/// off zero counts as a full ±100% swing.
pub fn classify_series(
    series: &[(Period, Decimal)],
    metric: TrendMetric,
    stable_band_pct: Decimal,
    precision: u32,
) -> Vec<TrendPoint> {
    let mut points = Vec::with_capacity(series.len());

    for (idx, &(period, value)) in series.iter().enumerate() {
        if idx == 0 {
            points.push(TrendPoint {
                period,
                metric,
                value,
                prior_value: None,
                variation_pct: None,
                label: TrendLabel::Stable,
            });
            continue;
        }

        let prior = series[idx - 1].1;
        let variation = variation_pct(value, prior, precision);
        points.push(TrendPoint {
            period,
            metric,
            value,
            prior_value: Some(prior),
            variation_pct: Some(variation),
            label: label_for(variation, stable_band_pct),
        });
    }

    points
}

/// Extracts one metric stream from a summary series and classifies it.
///
/// Each metric is classified independently: a month can show rising revenue
/// and rising expense at the same time.
pub fn trend_series(
    summaries: &[PeriodSummary],
    metric: TrendMetric,
    stable_band_pct: Decimal,
    precision: u32,
) -> Vec<TrendPoint> {
    let series: Vec<(Period, Decimal)> = summaries
        .iter()
        .map(|s| (s.period, metric.value_of(s)))
        .collect();
    classify_series(&series, metric, stable_band_pct, precision)
}

fn variation_pct(current: Decimal, prior: Decimal, precision: u32) -> Decimal {
    if prior == Decimal::ZERO {
        if current == Decimal::ZERO {
            Decimal::ZERO
        } else if current > Decimal::ZERO {
            dec!(100)
        } else {
            dec!(-100)
        }
    } else {
        ((current - prior) / prior.abs() * dec!(100)).round_dp(precision)
    }
}

fn label_for(variation_pct: Decimal, stable_band_pct: Decimal) -> TrendLabel {
    if variation_pct > stable_band_pct {
        TrendLabel::Rising
    } else if variation_pct < -stable_band_pct {
        TrendLabel::Falling
    } else {
        TrendLabel::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: u32) -> Period {
        Period { year: 2024, month: m }
    }

    #[test]
    fn twenty_percent_growth_is_rising() {
        // 50000 in Jan, 60000 in Feb.
        let series = vec![(month(1), dec!(50000)), (month(2), dec!(60000))];
        let points = classify_series(&series, TrendMetric::Revenue, Decimal::ZERO, 2);

        assert_eq!(points[0].label, TrendLabel::Stable);
        assert_eq!(points[0].variation_pct, None);
        assert_eq!(points[1].variation_pct, Some(dec!(20.00)));
        assert_eq!(points[1].label, TrendLabel::Rising);
    }

    #[test]
    fn flat_series_is_stable_throughout() {
        let series: Vec<_> = (1..=6).map(|m| (month(m), dec!(15000))).collect();
        let points = classify_series(&series, TrendMetric::Expense, Decimal::ZERO, 2);

        assert!(points.iter().all(|p| p.label == TrendLabel::Stable));
        assert!(
            points[1..]
                .iter()
                .all(|p| p.variation_pct == Some(Decimal::ZERO))
        );
    }

    #[test]
    fn zero_prior_rules() {
        let series = vec![
            (month(1), Decimal::ZERO),
            (month(2), Decimal::ZERO),   // 0 → 0: stable at zero
            (month(3), dec!(500)),       // 0 → positive: +100%, rising
            (month(4), Decimal::ZERO),   // collapse back to zero
            (month(5), dec!(-250)),      // 0 → negative: -100%, falling
        ];
        let points = classify_series(&series, TrendMetric::Profit, Decimal::ZERO, 2);

        assert_eq!(points[1].variation_pct, Some(Decimal::ZERO));
        assert_eq!(points[1].label, TrendLabel::Stable);
        assert_eq!(points[2].variation_pct, Some(dec!(100)));
        assert_eq!(points[2].label, TrendLabel::Rising);
        assert_eq!(points[4].variation_pct, Some(dec!(-100)));
        assert_eq!(points[4].label, TrendLabel::Falling);
    }

    #[test]
    fn negative_prior_uses_absolute_denominator() {
        // -1000 → -500 is an improvement: +50%.
        let series = vec![(month(1), dec!(-1000)), (month(2), dec!(-500))];
        let points = classify_series(&series, TrendMetric::Profit, Decimal::ZERO, 2);
        assert_eq!(points[1].variation_pct, Some(dec!(50.00)));
        assert_eq!(points[1].label, TrendLabel::Rising);
    }

    #[test]
    fn stable_band_absorbs_small_moves() {
        let series = vec![
            (month(1), dec!(10000)),
            (month(2), dec!(10300)), // +3%
            (month(3), dec!(11000)), // +6.8%
        ];
        let points = classify_series(&series, TrendMetric::Revenue, dec!(5), 2);

        assert_eq!(points[1].label, TrendLabel::Stable);
        assert_eq!(points[2].label, TrendLabel::Rising);
    }
}
