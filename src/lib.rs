pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::menu::Menu;
pub use config::{cli::LocalStorage, settings::ReportSettings, toml_config::ReportConfig};
pub use core::engine::{Action, Outcome, ReportEngine};
pub use utils::error::{ReportError, Result};
