//! Single owner of the dashboard's client state.
//!
//! Every mutation goes through [`DashboardStateManager::update_state`] (or the
//! narrower setters built on it). Persisted fields are written to the store as
//! soon as they change; session fields never touch it.

use contracts::dashboards::d400_sales_overview::DashboardSnapshot;
use contracts::shared::dashboard_state::{
    storage_keys, CardVariant, ChartDesign, ColorTheme, DashboardState, DashboardStatePatch,
    GraphColors, VariantMap,
};
use contracts::shared::indicators::{ChartPoint, FormatHint, MetricKey, WidgetData};
use engine::shared::date_range::parse_range_token;
use engine::shared::indicators::metadata::find_meta;
use engine::shared::indicators::IndicatorRegistry;
use engine::DashboardError;

use super::series_cache::SeriesCache;
use crate::shared::storage::{read_json, write_json, KeyValueStore};
use crate::shared::theme::resolve_color;

pub struct DashboardStateManager<S: KeyValueStore> {
    store: S,
    state: DashboardState,
    snapshot: Option<DashboardSnapshot>,
    cache: SeriesCache,
    registry: IndicatorRegistry,
}

impl<S: KeyValueStore> DashboardStateManager<S> {
    /// Rehydrate persisted preferences; each key falls back on its own.
    pub fn new(store: S) -> Self {
        let mut state = DashboardState::default();

        if let Some(theme) = read_json::<ColorTheme>(&store, storage_keys::BAR_CHART_COLORS) {
            state.color_theme = theme;
        }
        if let Some(design) = read_json::<ChartDesign>(&store, storage_keys::CHART_DESIGN) {
            state.chart_design = design;
        }
        if let Some(variants) = read_json::<VariantMap>(&store, storage_keys::CARD_VARIANTS) {
            state.card_variants = variants;
        }
        if let Some(colors) = read_json::<GraphColors>(&store, storage_keys::GRAPH_COLORS) {
            state.graph_colors = colors;
        }

        log::debug!(
            "dashboard state restored: theme={}, design={}, {} card variants",
            state.color_theme.as_str(),
            state.chart_design.as_str(),
            state.card_variants.len()
        );

        Self {
            store,
            state,
            snapshot: None,
            cache: SeriesCache::new(),
            registry: IndicatorRegistry::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shallow merge of `patch` into the state.
    ///
    /// `card_variants` replaces the whole map. A new date range drops the
    /// loaded snapshot and its series.
    pub fn update_state(&mut self, patch: DashboardStatePatch) {
        let DashboardStatePatch {
            active_view,
            date_range,
            card_variants,
            color_theme,
            chart_design,
            graph_colors,
            edit_mode,
            metric_display_mode,
        } = patch;

        if let Some(view) = active_view {
            self.state.active_view = view;
        }
        if let Some(edit) = edit_mode {
            self.state.edit_mode = edit;
        }
        if let Some(mode) = metric_display_mode {
            self.state.metric_display_mode = mode;
        }

        if let Some(range) = date_range {
            if range != self.state.date_range {
                self.state.date_range = range;
                self.snapshot = None;
                self.cache.invalidate();
            }
        }

        if let Some(theme) = color_theme {
            if theme != self.state.color_theme {
                self.state.color_theme = theme;
                write_json(&self.store, storage_keys::BAR_CHART_COLORS, &theme);
            }
        }
        if let Some(design) = chart_design {
            if design != self.state.chart_design {
                self.state.chart_design = design;
                write_json(&self.store, storage_keys::CHART_DESIGN, &design);
            }
        }
        if let Some(variants) = card_variants {
            if variants != self.state.card_variants {
                self.state.card_variants = variants;
                write_json(
                    &self.store,
                    storage_keys::CARD_VARIANTS,
                    &self.state.card_variants,
                );
            }
        }
        if let Some(colors) = graph_colors {
            if colors != self.state.graph_colors {
                self.state.graph_colors = colors;
                write_json(&self.store, storage_keys::GRAPH_COLORS, &self.state.graph_colors);
            }
        }
    }

    /// Change one card's variant, keeping the others.
    pub fn set_variant(&mut self, metric_key: &str, variant: CardVariant) {
        let mut variants = self.state.card_variants.clone();
        variants.insert(MetricKey::new(metric_key), variant);
        self.update_state(DashboardStatePatch {
            card_variants: Some(variants),
            ..DashboardStatePatch::default()
        });
    }

    pub fn variant(&self, metric_key: &str) -> Option<CardVariant> {
        self.state
            .card_variants
            .get(&MetricKey::new(metric_key))
            .copied()
    }

    /// Switch the date range; unknown tokens leave the state untouched.
    ///
    /// The token is stored in canonical `Nd` form, so `07d` and `7d` are the
    /// same range.
    pub fn set_date_range(&mut self, token: &str) -> Result<i64, DashboardError> {
        let days = parse_range_token(token)?;
        self.update_state(DashboardStatePatch {
            date_range: Some(format!("{days}d")),
            ..DashboardStatePatch::default()
        });
        Ok(days)
    }

    pub fn date_range_days(&self) -> Result<i64, DashboardError> {
        parse_range_token(&self.state.date_range)
    }

    /// Take a new aggregation run; the series are rebuilt only when it
    /// differs from the loaded one.
    pub fn refresh(&mut self, snapshot: DashboardSnapshot) -> bool {
        let rebuilt = self.cache.refresh(&snapshot);
        self.snapshot = Some(snapshot);
        rebuilt
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// True when no snapshot matches the selected range.
    pub fn needs_reload(&self) -> bool {
        match (&self.snapshot, self.date_range_days()) {
            (Some(snapshot), Ok(days)) => i64::from(snapshot.range().days()) != days,
            _ => true,
        }
    }

    pub fn series(&self, key: &str) -> Option<&[ChartPoint]> {
        self.cache.get(key)
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Everything a metric card needs, `None` before the first load or for
    /// keys without an indicator.
    pub fn widget_data(&self, metric_key: &str) -> Option<WidgetData> {
        let snapshot = self.snapshot.as_ref()?;
        let indicator = self
            .registry
            .compute_one(metric_key, &snapshot.aggregate.metrics)?;
        let format = find_meta(metric_key)
            .map(|m| m.format)
            .unwrap_or(FormatHint::Number);

        Some(WidgetData {
            key: indicator.key,
            value: indicator.value,
            trend: indicator.trend,
            status: indicator.status,
            series: self.cache.get(metric_key).map(<[ChartPoint]>::to_vec),
            format,
            variant: self.variant(metric_key).map(|v| v.as_str().to_string()),
        })
    }

    /// Chart color of the `index`-th element under the current theme.
    pub fn metric_color(&self, index: usize) -> &'static str {
        resolve_color(self.state.color_theme, index)
    }

    /// Logout: forget every persisted key and return to defaults.
    pub fn reset(&mut self) {
        for key in storage_keys::ALL {
            if let Err(e) = self.store.remove_item(key) {
                log::warn!("{}", e);
            }
        }
        self.state = DashboardState::default();
        self.snapshot = None;
        self.cache.invalidate();
        log::info!("dashboard state reset");
    }
}
