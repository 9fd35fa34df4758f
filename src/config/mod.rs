pub mod loader;
pub mod settings;

pub use loader::{load_risk_settings, resolve_risk_settings};
pub use settings::{AppConfig, FetchSettings, HistorySettings, RiskSettings};
