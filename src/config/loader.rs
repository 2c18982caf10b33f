// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("treat-chase");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from the default location, creating it if missing
pub fn load_config() -> Result<Config, io::Error> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`, or create a default file there
///
/// A file that fails to parse is reported and replaced by defaults in memory;
/// it is left untouched on disk.
pub fn load_config_from(path: &Path) -> Result<Config, io::Error> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("failed to parse {}: {}", path.display(), e);
                tracing::warn!("using default configuration");
                Ok(Config::default())
            }
        }
    } else {
        create_default_config(path)?;
        Ok(Config::default())
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let commented_toml = format!(
        "# Treat Chase Configuration File\n\
         # Edit this file to customize the board, bots and controls\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: Use \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"P\", \"R\", \"Q\", etc.\n\
         #\n\
         # Colors: RGB values from 0-255\n\
         #\n\
         # Set bots.seed = <number> for reproducible games\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    tracing::info!("created default config file at {}", path.display());
    Ok(())
}
