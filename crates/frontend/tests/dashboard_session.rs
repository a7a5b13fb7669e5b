use chrono::NaiveDate;
use contracts::shared::dashboard_state::{
    storage_keys, CardVariant, ChartDesign, ColorTheme, DashboardStatePatch, GraphColors,
};
use contracts::shared::indicators::{keys, FormatHint, IndicatorStatus};
use engine::dashboards::d400_sales_overview::{DashboardService, DatasetGenerator};
use engine::shared::config::Config;
use frontend::shared::number_format::format_value;
use frontend::{DashboardStateManager, KeyValueStore, MemoryStorage};

fn service() -> DashboardService {
    DashboardService::with_generator(
        DatasetGenerator::with_seed(Config::default().generator, 42)
            .ending_at(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
    )
}

#[test]
fn preference_changes_keep_series() {
    let mut service = service();
    let mut manager = DashboardStateManager::new(MemoryStorage::new());

    let days = manager.date_range_days().unwrap();
    assert!(manager.refresh(service.load_snapshot(days).unwrap()));
    assert!(!manager.needs_reload());
    assert_eq!(manager.cache().build_count(), 1);

    manager.update_state(DashboardStatePatch::chart_design(ChartDesign::Pie));
    manager.update_state(DashboardStatePatch::color_theme(ColorTheme::Multicolored));
    manager.set_variant(keys::REVENUE, CardVariant::Area);
    manager.update_state(DashboardStatePatch {
        edit_mode: Some(true),
        ..DashboardStatePatch::default()
    });

    assert_eq!(manager.cache().build_count(), 1);
    assert_eq!(manager.series(keys::REVENUE).unwrap().len(), 30);
}

#[test]
fn date_range_change_invalidates() {
    let mut service = service();
    let mut manager = DashboardStateManager::new(MemoryStorage::new());
    manager.refresh(service.load_snapshot_for("30d").unwrap());

    assert_eq!(manager.set_date_range("7d").unwrap(), 7);
    assert!(manager.needs_reload());
    assert!(manager.series(keys::REVENUE).is_none());
    assert!(manager.widget_data(keys::REVENUE).is_none());

    let token = manager.state().date_range.clone();
    manager.refresh(service.load_snapshot_for(&token).unwrap());
    assert!(!manager.needs_reload());
    assert_eq!(manager.series(keys::ORDERS).unwrap().len(), 7);
    assert_eq!(manager.cache().build_count(), 2);

    assert_eq!(manager.set_date_range("07d").unwrap(), 7);
    assert_eq!(manager.state().date_range, "7d");
    assert!(!manager.needs_reload());
    assert!(manager.series(keys::ORDERS).is_some());
}

#[test]
fn widget_data_assembles_card() {
    let mut service = service();
    let mut manager = DashboardStateManager::new(MemoryStorage::new());
    manager.set_variant(keys::REVENUE, CardVariant::Sparkline);
    manager.refresh(service.load_snapshot(30).unwrap());

    let revenue = manager.widget_data(keys::REVENUE).unwrap();
    let metrics = &manager.snapshot().unwrap().aggregate.metrics;
    assert_eq!(revenue.value, metrics.total_revenue);
    assert_eq!(revenue.format, FormatHint::Currency);
    assert_eq!(revenue.variant.as_deref(), Some("sparkline"));
    assert_eq!(revenue.trend.unwrap().value, 14.0);
    assert_eq!(revenue.status, IndicatorStatus::Good);
    assert_eq!(revenue.series.unwrap().len(), 30);
    assert!(format_value(revenue.value, revenue.format).starts_with('$'));

    let invoices = manager.widget_data(keys::INVOICES).unwrap();
    assert!(invoices.trend.is_none());
    assert_eq!(invoices.status, IndicatorStatus::Neutral);
    assert_eq!(invoices.variant, None);

    assert!(manager.widget_data("churn").is_none());
}

#[test]
fn preferences_survive_restart() {
    let store = MemoryStorage::new();
    {
        let mut manager = DashboardStateManager::new(store.clone());
        manager.update_state(DashboardStatePatch {
            chart_design: Some(ChartDesign::HorizontalBar),
            color_theme: Some(ColorTheme::Purple),
            graph_colors: Some(GraphColors {
                primary: "#000000".into(),
                ..GraphColors::default()
            }),
            ..DashboardStatePatch::default()
        });
        manager.set_variant(keys::ORDERS, CardVariant::Gauge);
    }

    assert_eq!(
        store.get_item(storage_keys::CARD_VARIANTS).unwrap().as_deref(),
        Some(r#"{"orders":"gauge"}"#)
    );

    let manager = DashboardStateManager::new(store);
    let state = manager.state();
    assert_eq!(state.chart_design, ChartDesign::HorizontalBar);
    assert_eq!(state.color_theme, ColorTheme::Purple);
    assert_eq!(state.graph_colors.primary, "#000000");
    assert_eq!(state.graph_colors.secondary, "#10b981");
    assert_eq!(manager.variant(keys::ORDERS), Some(CardVariant::Gauge));
}
