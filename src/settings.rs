use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::error::{MkError, Result};
use crate::output::OutputFormat;

pub const DEFAULT_SETTINGS_FILE: &str = "mkorder.toml";
pub const DEFAULT_TASK_FILE: &str = "makefile";

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    settings: Option<SettingsSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    file: Option<String>,
    default: Option<String>,
    format: Option<OutputFormat>,
}

#[derive(Debug, Default, PartialEq)]
pub struct Settings {
    /// Task file; relative paths are resolved against the settings file's directory.
    pub file: Option<PathBuf>,
    pub default_target: Option<String>,
    pub format: Option<OutputFormat>,
}

/// Loads settings from `explicit` when given, otherwise from
/// [`DEFAULT_SETTINGS_FILE`] if it exists.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let path = explicit.unwrap_or(Path::new(DEFAULT_SETTINGS_FILE));

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => {
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(MkError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    debug!(path = %path.display(), "loaded settings");
    let mut settings = parse_settings(&contents)?;

    if let (Some(file), Some(dir)) = (settings.file.as_mut(), path.parent()) {
        if file.is_relative() {
            *file = dir.join(&*file);
        }
    }
    Ok(settings)
}

fn parse_settings(contents: &str) -> Result<Settings> {
    let parsed: SettingsFile = toml::from_str(contents)?;
    let section = parsed.settings.unwrap_or_default();

    if section.default.as_deref() == Some("") {
        return Err(MkError::Config("default target must not be empty".to_string()));
    }

    Ok(Settings {
        file: section.file.map(PathBuf::from),
        default_target: section.default,
        format: section.format,
    })
}
