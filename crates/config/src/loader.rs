//! Parse and load user configuration.

use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, info};

use crate::{Config, Error, error::excerpt_at};

/// Parse a configuration from JSON text. `path` is only used in errors.
pub fn parse_str(source: &str, path: Option<&Path>) -> Result<Config, Error> {
    let config: Config = serde_json::from_str(source).map_err(|e| {
        let (line, col) = (e.line(), e.column());
        let full = e.to_string();
        let suffix = format!(" at line {line} column {col}");
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
        Error::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message,
            excerpt: excerpt_at(source, line, col),
        }
    })?;
    validate(&config, path)?;
    Ok(config)
}

fn validate(config: &Config, path: Option<&Path>) -> Result<(), Error> {
    let invalid = |message: &str| Error::Validation {
        path: path.map(Path::to_path_buf),
        message: message.to_string(),
    };
    if config.shortcuts.is_empty() {
        return Err(invalid("No shortcuts defined in config"));
    }
    if config.lookup_timeout_secs == Some(0) {
        return Err(invalid("lookupTimeoutSecs must be at least 1"));
    }
    Ok(())
}

/// Load the configuration at `path`.
///
/// When the file does not exist, the sample configuration is written there
/// and [`Error::CreatedDefault`] is returned so the caller can ask the user
/// to edit it.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            write_default(path)?;
            info!(path = %path.display(), "config_default_created");
            return Err(Error::CreatedDefault {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(Error::Read {
                path: Some(path.to_path_buf()),
                message: e.to_string(),
            });
        }
    };
    let config = parse_str(&source, Some(path))?;
    debug!(path = %path.display(), shortcuts = config.shortcuts.len(), "config_loaded");
    Ok(config)
}

/// Write the sample configuration to `path`, creating parent directories.
pub fn write_default(path: &Path) -> Result<(), Error> {
    let write_err = |message: String| Error::Write {
        path: path.to_path_buf(),
        message,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    let text = serde_json::to_string_pretty(&Config::sample()).map_err(|e| write_err(e.to_string()))?;
    fs::write(path, text + "\n").map_err(|e| write_err(e.to_string()))
}
