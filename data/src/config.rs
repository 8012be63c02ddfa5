pub mod state;
pub mod theme;

pub use state::State;

use std::path::{Path, PathBuf};

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CHART_CONFIG";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_state(path: &Path) -> Result<State, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings from the file named by [`CONFIG_PATH_ENV`], or defaults when unset or unreadable.
pub fn load_state() -> State {
    let Some(path) = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) else {
        log::info!("{CONFIG_PATH_ENV} not set, using default settings");
        return State::default();
    };

    match read_state(&path) {
        Ok(state) => {
            log::info!("Loaded settings from {}", path.display());
            state
        }
        Err(e) => {
            log::warn!("{e}, falling back to default settings");
            State::default()
        }
    }
}
