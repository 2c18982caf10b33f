// Configuration module for Treat Chase
// Handles loading and managing game configuration from TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config, load_config_from};
pub use types::{BoardConfig, BotConfig, Config, DisplayConfig, KeyBindings, TimingConfig, TreatConfig};
