pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod format;
pub mod forms;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod sample;
pub mod scheme;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use client::HabitClient;
pub use config::Config;
pub use state::AppState;
pub use storage::load_preferences;
