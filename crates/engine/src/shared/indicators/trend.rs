use contracts::shared::indicators::{IndicatorStatus, TrendIndicator};

/// Changes within this band (in percent) are shown as neutral.
const NEUTRAL_BAND: f64 = 5.0;

/// Percentage change of `current` against `previous`.
///
/// Returns `None` when there is no baseline or it is zero, so cards never show
/// a meaningless 100% or infinite delta.
///
/// # Examples
/// ```
/// use engine::shared::indicators::calculate_trend;
/// let trend = calculate_trend(120.0, Some(100.0)).unwrap();
/// assert_eq!(trend.value, 20.0);
/// assert!(trend.is_positive);
/// assert!(calculate_trend(100.0, Some(0.0)).is_none());
/// ```
pub fn calculate_trend(current: f64, previous: Option<f64>) -> Option<TrendIndicator> {
    let previous = previous?;
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some(TrendIndicator {
        value: (((current - previous) / previous).abs() * 100.0).round(),
        is_positive: current >= previous,
    })
}

/// Colour status of a card for a given trend.
pub fn status_by_trend(trend: Option<TrendIndicator>, higher_is_good: bool) -> IndicatorStatus {
    match trend {
        Some(t) if t.value > NEUTRAL_BAND => {
            if t.is_positive == higher_is_good {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            }
        }
        _ => IndicatorStatus::Neutral,
    }
}
