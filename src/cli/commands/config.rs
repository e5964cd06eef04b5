//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: Option<&str>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Path => {
            let config_path = match config_path {
                Some(path) => Settings::expand_path(path),
                None => Settings::default_config_path(),
            };
            println!("{}", config_path.display());
            if !config_path.exists() {
                Output::info("File does not exist yet; built-in defaults are in use.");
            }
        }
    }

    Ok(())
}
