use contracts::shared::indicators::*;

/// Build the catalogue of metric cards shown on the overview.
pub fn build_catalog() -> Vec<IndicatorMeta> {
    vec![
        IndicatorMeta {
            key: MetricKey::new(keys::REVENUE),
            label: "Total Revenue".into(),
            short_label: Some("Revenue".into()),
            icon: "dollar-sign".into(),
            format: FormatHint::Currency,
            higher_is_good: true,
            description: Some("Sum of order totals for the period".into()),
        },
        IndicatorMeta {
            key: MetricKey::new(keys::ORDERS),
            label: "Total Orders".into(),
            short_label: Some("Orders".into()),
            icon: "orders".into(),
            format: FormatHint::Number,
            higher_is_good: true,
            description: Some("Number of orders placed in the period".into()),
        },
        IndicatorMeta {
            key: MetricKey::new(keys::CUSTOMERS),
            label: "Customers".into(),
            short_label: None,
            icon: "users".into(),
            format: FormatHint::Number,
            higher_is_good: true,
            description: Some("Distinct customers with at least one order".into()),
        },
        IndicatorMeta {
            key: MetricKey::new(keys::AVG_ORDER),
            label: "Average Order Value".into(),
            short_label: Some("Avg. order".into()),
            icon: "receipt".into(),
            format: FormatHint::Currency,
            higher_is_good: true,
            description: Some("Revenue / Orders".into()),
        },
        IndicatorMeta {
            key: MetricKey::new(keys::MARKETPLACE),
            label: "Marketplace Revenue".into(),
            short_label: Some("Marketplace".into()),
            icon: "store".into(),
            format: FormatHint::Currency,
            higher_is_good: true,
            description: Some("Estimated revenue of marketplace orders".into()),
        },
        IndicatorMeta {
            key: MetricKey::new(keys::INVOICES),
            label: "Outstanding Invoices".into(),
            short_label: Some("Invoices".into()),
            icon: "invoices".into(),
            format: FormatHint::Currency,
            higher_is_good: false,
            description: Some("Amount of unpaid invoices".into()),
        },
    ]
}

/// Metadata of a single metric, `None` for keys outside the catalogue.
pub fn find_meta(key: &str) -> Option<IndicatorMeta> {
    build_catalog().into_iter().find(|m| m.key.as_str() == key)
}
