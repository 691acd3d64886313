// SPDX-License-Identifier: MIT

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("can't load settings from {path}: {message}")]
    Config { path: String, message: String },

    #[error("fetching tasks: HTTP {status}")]
    Fetch { status: u16 },

    #[error("fetching tasks: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("parsing tasks: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot open output file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
