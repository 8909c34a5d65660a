/// Config file loading and creation for the speeddate CLI.
///
/// Config lives at ~/.config/speeddate/config.toml.
/// All fields are optional; CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct SpeeddateConfig {
    pub tables: Option<usize>,
    pub json: Option<bool>,
    pub full_listing: Option<bool>,
    pub order_rounds_by_size: Option<bool>,
    pub roster: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# speeddate configuration
# All values here can be overridden by CLI flags.

# Number of tables available. Defaults to half the roster, rounded down.
# Larger values are clamped to that maximum.
# tables = 8

# Print JSON instead of the text report
# json = false

# Show gender and dating preferences in the attendance list
# full_listing = false

# Move fuller rounds to the start of the event
# order_rounds_by_size = true

# Roster file used when --roster is not given
# roster = \"/path/to/roster.txt\"
";

/// Returns the default config path: ~/.config/speeddate/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("speeddate").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<SpeeddateConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> SpeeddateConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => SpeeddateConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
