// SPDX-License-Identifier: MIT

use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;
use todoist_fetcher_core::{Error, client::DEFAULT_FILTER};

/// Values that can be kept in a settings file instead of passing them on every run.
#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub output_path: Option<PathBuf>,
    pub filter: Option<String>,
}

impl Settings {
    pub fn new(file_name: &str) -> Result<Self, Error> {
        tracing::info!(target:"settings", file_name=file_name, "Load settings");

        Config::builder()
            .add_source(File::new(file_name, FileFormat::Toml))
            .build()
            .and_then(|s| s.try_deserialize::<Self>())
            .map_err(|e| {
                tracing::error!(target:"settings", file_name=file_name, error=?e, "Load settings");
                Error::Config {
                    path: file_name.to_string(),
                    message: e.to_string(),
                }
            })
    }
}

#[derive(Debug, PartialEq)]
pub struct Params {
    pub api_key: String,
    pub output_path: PathBuf,
    pub filter: String,
}

/// Command line values win over the settings file.
pub fn resolve(
    api_key: Option<String>,
    output_path: Option<PathBuf>,
    filter: Option<String>,
    settings: Settings,
) -> Result<Params, Error> {
    let api_key = api_key
        .or(settings.api_key)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::Usage("API_KEY is required".to_string()))?;
    let output_path = output_path
        .or(settings.output_path)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::Usage("OUTPUT_PATH is required".to_string()))?;
    let filter = filter
        .or(settings.filter)
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    Ok(Params {
        api_key,
        output_path,
        filter,
    })
}
