use crate::shared::error::DashboardError;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub generator: GeneratorConfig,
}

/// Shape of the synthetic dataset
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    pub min_orders: u32,
    pub max_orders: u32,
    pub customer_count: u32,
    pub agent_count: u32,
    pub items_per_brand: u32,
    pub max_line_items: u32,
    pub min_order_total: f64,
    pub max_order_total: f64,
    /// Probability that an order is still unpaid
    pub unpaid_ratio: f64,
    /// Probability that an order is completed
    pub completed_ratio: f64,
    /// Invoices fall due 1..=invoice_due_days days after generation
    pub invoice_due_days: u32,
    pub brands: Vec<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[generator]
min_orders = 100
max_orders = 200
customer_count = 60
agent_count = 8
items_per_brand = 4
max_line_items = 5
min_order_total = 25.0
max_order_total = 2500.0
unpaid_ratio = 0.25
completed_ratio = 0.7
invoice_due_days = 30
brands = ["Nordic Home", "Urban Craft", "Solstice", "Evergreen", "Lumen", "Atlas Outdoor"]
"#;

static EMBEDDED: Lazy<Config> =
    Lazy::new(|| toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse"));

impl Default for Config {
    fn default() -> Self {
        EMBEDDED.clone()
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.min_orders == 0 || self.min_orders > self.max_orders {
            return Err(DashboardError::Config(format!(
                "order count range {}..={} is empty",
                self.min_orders, self.max_orders
            )));
        }
        if self.brands.is_empty() {
            return Err(DashboardError::Config("brand list is empty".into()));
        }
        if self.customer_count == 0 || self.agent_count == 0 || self.items_per_brand == 0 {
            return Err(DashboardError::Config(
                "customer, agent and item counts must be positive".into(),
            ));
        }
        if self.max_line_items == 0 {
            return Err(DashboardError::Config("max_line_items must be positive".into()));
        }
        if !(self.min_order_total > 0.0 && self.min_order_total <= self.max_order_total) {
            return Err(DashboardError::Config(format!(
                "order total range {}..={} is invalid",
                self.min_order_total, self.max_order_total
            )));
        }
        for (name, ratio) in [
            ("unpaid_ratio", self.unpaid_ratio),
            ("completed_ratio", self.completed_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(DashboardError::Config(format!("{name} must be within 0..=1")));
            }
        }
        if self.invoice_due_days == 0 {
            return Err(DashboardError::Config("invoice_due_days must be positive".into()));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to the embedded default when `path` is `None` or the file does
/// not exist.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(config_path) = path {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            config.generator.validate()?;
            return Ok(config);
        } else {
            tracing::warn!("config not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(Config::default())
}
