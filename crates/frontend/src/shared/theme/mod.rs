//! Chart color resolution for the selected [`ColorTheme`].
//!
//! A named theme paints every chart in one color; `multicolored` picks colors
//! by index from a fixed 11-entry palette.

use contracts::shared::dashboard_state::ColorTheme;

/// Palette used by the `multicolored` theme and for metric cards.
pub const PALETTE: [&str; 11] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#14b8a6", "#f97316", "#ec4899",
    "#6366f1", "#84cc16", "#06b6d4",
];

/// Single color of a named theme, `None` for `multicolored`.
pub fn theme_color(theme: ColorTheme) -> Option<&'static str> {
    match theme {
        ColorTheme::Primary => Some("#2563eb"),
        ColorTheme::Blue => Some("#3b82f6"),
        ColorTheme::Green => Some("#10b981"),
        ColorTheme::Purple => Some("#8b5cf6"),
        ColorTheme::Orange => Some("#f97316"),
        ColorTheme::Red => Some("#ef4444"),
        ColorTheme::Teal => Some("#14b8a6"),
        ColorTheme::Multicolored => None,
    }
}

/// Palette color for a card index; wraps around, never panics.
pub fn get_metric_card_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Color of the `index`-th bar/slice/card under `theme`.
pub fn resolve_color(theme: ColorTheme, index: usize) -> &'static str {
    theme_color(theme).unwrap_or_else(|| get_metric_card_color(index))
}

/// Colors for a chart with `count` series.
pub fn series_colors(theme: ColorTheme, count: usize) -> Vec<&'static str> {
    (0..count).map(|i| resolve_color(theme, i)).collect()
}
