//! User configuration (`config.toml`).
//!
//! ```toml
//! data_dir = "/home/me/.local/share/modematrix"
//! export_dir = "/home/me/Downloads"
//! initial_rows = 5
//! initial_columns = 4
//! ```
//!
//! Problems reading the file never abort startup: they are reported as
//! warnings and defaults are used instead.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use modematrix_core::document::{DEFAULT_COLUMNS, DEFAULT_ROWS};

const MAX_CONFIG_FILE_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the history and theme slots.
    pub data_dir: Option<PathBuf>,
    /// Directory CSV exports are written to.
    pub export_dir: Option<PathBuf>,
    /// Size of the blank table the TUI starts with.
    pub initial_rows: usize,
    pub initial_columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: None,
            export_dir: None,
            initial_rows: DEFAULT_ROWS,
            initial_columns: DEFAULT_COLUMNS,
        }
    }
}

impl Config {
    /// Data directory: explicit override, then config, then the platform
    /// data dir, then `./.modematrix`.
    pub fn data_dir(&self, overridden: Option<&Path>) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(|| project_dirs().map(|p| p.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".modematrix"))
    }

    /// Export directory: explicit override, then config, then the current dir.
    pub fn export_dir(&self, overridden: Option<&Path>) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .or_else(|| self.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "modematrix")
}

fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|p| p.config_dir().join("config.toml"))
}

/// Load the configuration from `config_file`, or from the user config dir.
///
/// Returns the configuration and any warnings to show the user.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = config_file.map(Path::to_path_buf).or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    (config.unwrap_or_default(), warnings)
}
