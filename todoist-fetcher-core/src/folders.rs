// SPDX-License-Identifier: MIT

use std::{
    io::{Error, ErrorKind},
    path::PathBuf,
};

pub fn state_folder(app_name: &str) -> Result<PathBuf, Error> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|p| p.join("Library/Logs"))
    } else {
        dirs::state_dir()
    };

    let p = base
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "can't detect state folder"))?
        .join(app_name);
    std::fs::create_dir_all(&p)?;
    Ok(p)
}

pub fn log_folder(app_name: &str) -> Result<PathBuf, Error> {
    state_folder(app_name)
}
