//! Client-side dashboard state shared between the state manager and widgets.

use crate::shared::indicators::MetricKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys under which preferences are persisted in the key-value store.
pub mod storage_keys {
    /// Chart color theme token (JSON string)
    pub const BAR_CHART_COLORS: &str = "dashboardBarChartColors";
    /// Chart design token (JSON string)
    pub const CHART_DESIGN: &str = "dashboardChartDesign";
    /// Metric key -> card variant (JSON object)
    pub const CARD_VARIANTS: &str = "dashboardCardVariants";
    /// primary/secondary/tertiary graph colors (JSON object)
    pub const GRAPH_COLORS: &str = "dashboardGraphColors";

    pub const ALL: [&str; 4] = [BAR_CHART_COLORS, CHART_DESIGN, CARD_VARIANTS, GRAPH_COLORS];
}

pub const DEFAULT_VIEW: &str = "overview";
pub const DEFAULT_DATE_RANGE: &str = "30d";

/// How ranking/breakdown charts are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartDesign {
    #[default]
    Table,
    Bar,
    HorizontalBar,
    Pie,
}

impl ChartDesign {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartDesign::Table => "table",
            ChartDesign::Bar => "bar",
            ChartDesign::HorizontalBar => "horizontal-bar",
            ChartDesign::Pie => "pie",
        }
    }

    pub fn all() -> [ChartDesign; 4] {
        [
            ChartDesign::Table,
            ChartDesign::Bar,
            ChartDesign::HorizontalBar,
            ChartDesign::Pie,
        ]
    }
}

/// Chart color theme: one named color or the multicolored palette mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Primary,
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Teal,
    Multicolored,
}

impl ColorTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Primary => "primary",
            ColorTheme::Blue => "blue",
            ColorTheme::Green => "green",
            ColorTheme::Purple => "purple",
            ColorTheme::Orange => "orange",
            ColorTheme::Red => "red",
            ColorTheme::Teal => "teal",
            ColorTheme::Multicolored => "multicolored",
        }
    }

    pub fn all() -> [ColorTheme; 8] {
        [
            ColorTheme::Primary,
            ColorTheme::Blue,
            ColorTheme::Green,
            ColorTheme::Purple,
            ColorTheme::Orange,
            ColorTheme::Red,
            ColorTheme::Teal,
            ColorTheme::Multicolored,
        ]
    }
}

/// Layout of the metric cards grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricDisplayMode {
    #[default]
    Full,
    Compact,
    Square,
    All,
}

/// Visual variant of a single metric card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    Default,
    Sparkline,
    Area,
    Bar,
    Gauge,
}

impl CardVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardVariant::Default => "default",
            CardVariant::Sparkline => "sparkline",
            CardVariant::Area => "area",
            CardVariant::Bar => "bar",
            CardVariant::Gauge => "gauge",
        }
    }
}

pub type VariantMap = BTreeMap<MetricKey, CardVariant>;

/// Line colors of the trend graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphColors {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

impl Default for GraphColors {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".into(),
            secondary: "#10b981".into(),
            tertiary: "#f59e0b".into(),
        }
    }
}

/// Session state of the dashboard.
///
/// `chart_design`, `color_theme`, `card_variants` and `graph_colors` are
/// persisted; the rest lives for one session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// Opaque view token ("overview", "orders", ...), never validated
    pub active_view: String,
    /// Date range token ("7d", "30d", ...)
    pub date_range: String,
    pub card_variants: VariantMap,
    pub color_theme: ColorTheme,
    pub chart_design: ChartDesign,
    pub graph_colors: GraphColors,
    pub edit_mode: bool,
    pub metric_display_mode: MetricDisplayMode,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_view: DEFAULT_VIEW.to_string(),
            date_range: DEFAULT_DATE_RANGE.to_string(),
            card_variants: VariantMap::new(),
            color_theme: ColorTheme::default(),
            chart_design: ChartDesign::default(),
            graph_colors: GraphColors::default(),
            edit_mode: false,
            metric_display_mode: MetricDisplayMode::default(),
        }
    }
}

/// Partial update for [`DashboardState`], merged shallowly.
///
/// `card_variants` replaces the whole map; use the state manager's
/// `set_variant` to change a single card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatePatch {
    pub active_view: Option<String>,
    pub date_range: Option<String>,
    pub card_variants: Option<VariantMap>,
    pub color_theme: Option<ColorTheme>,
    pub chart_design: Option<ChartDesign>,
    pub graph_colors: Option<GraphColors>,
    pub edit_mode: Option<bool>,
    pub metric_display_mode: Option<MetricDisplayMode>,
}

impl DashboardStatePatch {
    pub fn chart_design(design: ChartDesign) -> Self {
        Self {
            chart_design: Some(design),
            ..Self::default()
        }
    }

    pub fn color_theme(theme: ColorTheme) -> Self {
        Self {
            color_theme: Some(theme),
            ..Self::default()
        }
    }

    pub fn active_view(view: &str) -> Self {
        Self {
            active_view: Some(view.to_string()),
            ..Self::default()
        }
    }
}
