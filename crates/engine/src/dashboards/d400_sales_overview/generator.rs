use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use contracts::dashboards::d400_sales_overview::{DatasetBundle, DateRange};
use contracts::domain::a001_order::{FulfillmentStatus, InvoiceStatus, LineItem, Order, OrderId};
use contracts::domain::a002_customer::{Customer, CustomerId};
use contracts::domain::a003_agent::{Agent, AgentId};
use contracts::domain::a004_brand::{Brand, BrandId};
use contracts::domain::a005_item::{Item, ItemId};
use contracts::domain::a006_invoice::{Invoice, InvoiceId};
use contracts::domain::common::round_money;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use uuid::Uuid;

use crate::shared::config::GeneratorConfig;
use crate::shared::error::DashboardError;

const FIRST_NAMES: [&str; 16] = [
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Lucas", "Mia", "Ethan", "Sofia", "Mason", "Chloe",
    "Leo", "Grace", "Owen", "Nora", "Felix",
];

const LAST_NAMES: [&str; 12] = [
    "Anderson", "Brooks", "Carter", "Diaz", "Evans", "Foster", "Garcia", "Hughes", "Ingram",
    "Jensen", "Kowalski", "Lambert",
];

const PRODUCT_NOUNS: [&str; 10] = [
    "Lamp", "Chair", "Backpack", "Mug", "Blanket", "Jacket", "Kettle", "Planter", "Speaker", "Desk",
];

/// Business hours window for order timestamps, keeps clear of DST gaps.
const FIRST_HOUR: u32 = 8;
const LAST_HOUR: u32 = 20;

/// Catalogue entry with the list price used for line items
struct CatalogueEntry {
    item_index: usize,
    brand_index: usize,
    unit_price: f64,
}

/// Synthetic dataset generator.
///
/// Values differ run to run (unless seeded), the shape and invariants do not:
/// every reference resolves, customer and item totals are derived from the
/// orders, invoices mirror unpaid orders one to one.
pub struct DatasetGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    end_date: NaiveDate,
}

impl DatasetGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
            end_date: Local::now().date_naive(),
        }
    }

    /// Reproducible generator for tests and demos.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            end_date: Local::now().date_naive(),
        }
    }

    /// Pin the last day of generated ranges (defaults to today).
    pub fn ending_at(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a full bundle covering the last `date_range_days` days.
    pub fn generate(&mut self, date_range_days: i64) -> Result<DatasetBundle, DashboardError> {
        if date_range_days <= 0 {
            return Err(DashboardError::InvalidRange {
                days: date_range_days,
            });
        }
        let days = u32::try_from(date_range_days).map_err(|_| DashboardError::InvalidRange {
            days: date_range_days,
        })?;
        self.config.validate()?;

        let range =
            DateRange::ending_at(self.end_date, days).ok_or(DashboardError::InvalidRange {
                days: date_range_days,
            })?;
        let generated_at = Utc::now();

        let brands = self.generate_brands();
        let (mut items, catalogue) = self.generate_items(&brands);
        let mut customers = self.generate_customers();
        let agents = self.generate_agents();
        let orders = self.generate_orders(&range, &brands, &items, &catalogue, &customers, &agents);

        derive_customer_totals(&mut customers, &orders);
        derive_item_totals(&mut items, &orders);
        let invoices = self.generate_invoices(&orders, &customers, generated_at);

        tracing::debug!(
            "generated bundle: {} days, {} orders, {} customers, {} agents, {} brands, {} items, {} invoices",
            days,
            orders.len(),
            customers.len(),
            agents.len(),
            brands.len(),
            items.len(),
            invoices.len()
        );

        Ok(DatasetBundle {
            range,
            generated_at,
            orders,
            customers,
            agents,
            brands,
            items,
            invoices,
        })
    }

    fn next_uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    fn money(&mut self, min: f64, max: f64) -> f64 {
        round_money(self.rng.gen_range(min..=max))
    }

    fn person_name(&mut self) -> (String, String) {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Smith");
        (first.to_string(), last.to_string())
    }

    fn generate_brands(&mut self) -> Vec<Brand> {
        let names = self.config.brands.clone();
        names
            .into_iter()
            .map(|name| Brand {
                id: BrandId::new(self.next_uuid()),
                name,
                total_revenue: self.money(5_000.0, 60_000.0),
                total_orders: self.rng.gen_range(20..=400),
                growth: (self.rng.gen_range(-20.0..=20.0_f64) * 10.0).round() / 10.0,
            })
            .collect()
    }

    fn generate_items(&mut self, brands: &[Brand]) -> (Vec<Item>, Vec<CatalogueEntry>) {
        let per_brand = self.config.items_per_brand as usize;
        let mut items = Vec::with_capacity(brands.len() * per_brand);
        let mut catalogue = Vec::with_capacity(brands.len() * per_brand);

        for (brand_index, brand) in brands.iter().enumerate() {
            let prefix: String = brand
                .name
                .split_whitespace()
                .filter_map(|w| w.chars().next())
                .collect::<String>()
                .to_uppercase();

            for n in 0..per_brand {
                let noun = PRODUCT_NOUNS[(brand_index * per_brand + n) % PRODUCT_NOUNS.len()];
                catalogue.push(CatalogueEntry {
                    item_index: items.len(),
                    brand_index,
                    unit_price: self.money(5.0, 400.0),
                });
                items.push(Item {
                    id: ItemId::new(self.next_uuid()),
                    name: format!("{} {}", brand.name, noun),
                    sku: format!("{}-{:03}", prefix, n + 1),
                    total_revenue: 0.0,
                    total_quantity: 0,
                    brand_id: brand.id,
                });
            }
        }

        (items, catalogue)
    }

    fn generate_customers(&mut self) -> Vec<Customer> {
        (0..self.config.customer_count)
            .map(|n| {
                let (first, last) = self.person_name();
                let email = format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    n + 1
                );
                Customer::new(
                    CustomerId::new(self.next_uuid()),
                    format!("{} {}", first, last),
                    email,
                )
            })
            .collect()
    }

    fn generate_agents(&mut self) -> Vec<Agent> {
        (0..self.config.agent_count)
            .map(|_| {
                let (first, last) = self.person_name();
                let total_orders: u32 = self.rng.gen_range(10..=150);
                let average_order_value = self.money(50.0, 600.0);
                Agent {
                    id: AgentId::new(self.next_uuid()),
                    name: format!("{} {}", first, last),
                    total_revenue: round_money(average_order_value * f64::from(total_orders)),
                    total_orders,
                    average_order_value,
                    conversion_rate: (self.rng.gen_range(0.05..=0.6_f64) * 1000.0).round() / 1000.0,
                }
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_orders(
        &mut self,
        range: &DateRange,
        brands: &[Brand],
        items: &[Item],
        catalogue: &[CatalogueEntry],
        customers: &[Customer],
        agents: &[Agent],
    ) -> Vec<Order> {
        let count = self
            .rng
            .gen_range(self.config.min_orders..=self.config.max_orders);
        let days = range.days();
        let mut orders = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let day = range.date_from + chrono::Duration::days(i64::from(self.rng.gen_range(0..days)));
            let seconds = self
                .rng
                .gen_range(FIRST_HOUR * 3600..LAST_HOUR * 3600);
            let created_at = local_timestamp(day, seconds);

            let line_count = self.rng.gen_range(1..=self.config.max_line_items);
            let mut line_items = Vec::with_capacity(line_count as usize);
            for _ in 0..line_count {
                let entry = &catalogue[self.rng.gen_range(0..catalogue.len())];
                line_items.push(LineItem {
                    product_id: items[entry.item_index].id,
                    quantity: self.rng.gen_range(1..=5),
                    price: entry.unit_price,
                    brand: brands[entry.brand_index].name.clone(),
                });
            }
            // Order brand follows its first line
            let brand_id = brands
                .iter()
                .find(|b| b.name == line_items[0].brand)
                .map(|b| b.id)
                .unwrap_or(brands[0].id);

            let total = self.money(self.config.min_order_total, self.config.max_order_total);
            let status = if self.rng.gen_bool(self.config.completed_ratio) {
                FulfillmentStatus::Completed
            } else {
                FulfillmentStatus::Pending
            };
            let invoice_status = if self.rng.gen_bool(self.config.unpaid_ratio) {
                InvoiceStatus::Unpaid
            } else {
                InvoiceStatus::Paid
            };

            orders.push(Order {
                id: OrderId::new(self.next_uuid()),
                code: String::new(),
                created_at,
                total,
                customer_id: customers[self.rng.gen_range(0..customers.len())].id,
                agent_id: agents[self.rng.gen_range(0..agents.len())].id,
                brand_id,
                status,
                invoice_status,
                line_items,
            });
        }

        orders.sort_by_key(|o| o.created_at);
        for (n, order) in orders.iter_mut().enumerate() {
            order.code = format!("ORD-{:05}", n + 1);
        }
        orders
    }

    fn generate_invoices(
        &mut self,
        orders: &[Order],
        customers: &[Customer],
        generated_at: DateTime<Utc>,
    ) -> Vec<Invoice> {
        let names: HashMap<CustomerId, &str> =
            customers.iter().map(|c| (c.id, c.name.as_str())).collect();

        orders
            .iter()
            .filter(|o| o.is_unpaid())
            .map(|order| {
                let due_in = self.rng.gen_range(1..=self.config.invoice_due_days);
                Invoice {
                    id: InvoiceId::new(self.next_uuid()),
                    order_id: order.id,
                    customer_name: names
                        .get(&order.customer_id)
                        .map(|n| n.to_string())
                        .unwrap_or_default(),
                    amount: order.total,
                    due_date: generated_at + chrono::Duration::days(i64::from(due_in)),
                    status: InvoiceStatus::Unpaid,
                    days_overdue: self.rng.gen_range(0..=30),
                }
            })
            .collect()
    }
}

/// UTC instant of `seconds` after local midnight of `day`.
fn local_timestamp(day: NaiveDate, seconds: u32) -> DateTime<Utc> {
    let at = |secs: u32| {
        day.and_hms_opt(secs / 3600, secs % 3600 / 60, secs % 60)
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    };
    // Nonexistent local time falls back to noon of the same day
    at(seconds)
        .or_else(|| at(12 * 3600))
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

/// Recompute customer aggregates from the order set.
pub fn derive_customer_totals(customers: &mut [Customer], orders: &[Order]) {
    let mut index: HashMap<CustomerId, usize> = HashMap::with_capacity(customers.len());
    for (i, customer) in customers.iter_mut().enumerate() {
        customer.total_spent = 0.0;
        customer.order_count = 0;
        customer.last_order_date = None;
        index.insert(customer.id, i);
    }

    for order in orders {
        if let Some(&i) = index.get(&order.customer_id) {
            let customer = &mut customers[i];
            customer.total_spent += order.total;
            customer.order_count += 1;
            if customer.last_order_date.map_or(true, |d| order.created_at > d) {
                customer.last_order_date = Some(order.created_at);
            }
        }
    }

    for customer in customers.iter_mut() {
        customer.total_spent = round_money(customer.total_spent);
    }
}

/// Recompute item revenue and quantity from the line items of the order set.
pub fn derive_item_totals(items: &mut [Item], orders: &[Order]) {
    let mut index: HashMap<ItemId, usize> = HashMap::with_capacity(items.len());
    for (i, item) in items.iter_mut().enumerate() {
        item.total_revenue = 0.0;
        item.total_quantity = 0;
        index.insert(item.id, i);
    }

    for line in orders.iter().flat_map(|o| o.line_items.iter()) {
        if let Some(&i) = index.get(&line.product_id) {
            items[i].total_revenue += line.amount();
            items[i].total_quantity += line.quantity;
        }
    }

    for item in items.iter_mut() {
        item.total_revenue = round_money(item.total_revenue);
    }
}
