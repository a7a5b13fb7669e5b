pub mod shared;

pub use shared::insight::{InsightRequest, InsightSource, SimulatedInsightSource};
pub use shared::state::DashboardStateManager;
pub use shared::storage::{KeyValueStore, MemoryStorage};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
