use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the reporting engine.
///
/// Every field has a default, so an absent `config.toml` yields a fully
/// usable configuration. Validation is separate from loading: a config is
/// checked by [`Config::validate`] at the start of each report invocation,
/// because bad thresholds must fail that invocation rather than the process.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub goal_policy: GoalPolicy,
    #[serde(default)]
    pub trend_policy: TrendPolicy,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Attainment thresholds for goal status classification.
///
/// These are a reporting policy, not business law: a company that calls 85%
/// "met" overrides them in `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalPolicy {
    /// Attainment percentage at or above which a goal counts as met.
    pub met_threshold: Decimal,
    /// Attainment percentage at or above which a goal counts as exceeded.
    pub exceeded_threshold: Decimal,
}

impl Default for GoalPolicy {
    fn default() -> Self {
        Self {
            met_threshold: dec!(90),
            exceeded_threshold: dec!(100),
        }
    }
}

/// Month-over-month variation band treated as flat.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendPolicy {
    /// A variation within `±stable_band_pct` percent is labeled stable.
    pub stable_band_pct: Decimal,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            stable_band_pct: Decimal::ZERO,
        }
    }
}

/// Presentation-boundary settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    /// Decimal places monetary values and percentages are rounded to when a
    /// report row is finalized. Intermediate math is never rounded.
    pub currency_precision: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_precision: 2,
        }
    }
}

impl Config {
    /// Checks the recognized options for consistency.
    ///
    /// Thresholds live in `[0, 100]` and may not be inverted; the stable
    /// band is a non-negative half-width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pct_range = Decimal::ZERO..=dec!(100);

        if !pct_range.contains(&self.goal_policy.met_threshold) {
            return Err(ConfigError::ValidationError(format!(
                "met_threshold {} outside [0, 100]",
                self.goal_policy.met_threshold
            )));
        }
        if !pct_range.contains(&self.goal_policy.exceeded_threshold) {
            return Err(ConfigError::ValidationError(format!(
                "exceeded_threshold {} outside [0, 100]",
                self.goal_policy.exceeded_threshold
            )));
        }
        if self.goal_policy.met_threshold > self.goal_policy.exceeded_threshold {
            return Err(ConfigError::ValidationError(format!(
                "met_threshold {} exceeds exceeded_threshold {}",
                self.goal_policy.met_threshold, self.goal_policy.exceeded_threshold
            )));
        }
        if self.trend_policy.stable_band_pct < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "trend stable_band_pct {} is negative",
                self.trend_policy.stable_band_pct
            )));
        }
        Ok(())
    }
}
