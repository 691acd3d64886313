// SPDX-License-Identifier: MIT

use crate::{Error, task::Task};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub const HEADER: &str = "TASKS:";
pub const NO_TASKS: &str = "No tasks found.";

/// Writes the numbered report.
///
/// The content goes out verbatim, a task name with a line break in it
/// spans several lines of the report.
pub fn write<W: Write>(w: &mut W, tasks: &[Task]) -> std::io::Result<()> {
    if tasks.is_empty() {
        return writeln!(w, "{NO_TASKS}");
    }

    writeln!(w, "{HEADER}")?;
    for (i, t) in tasks.iter().enumerate() {
        writeln!(w, "{}) {}", i + 1, t.content)?;
    }

    Ok(())
}

/// Replaces whatever is at `path` with the report.
pub fn write_to_file(path: &Path, tasks: &[Task]) -> Result<(), Error> {
    let wrap = |source: std::io::Error| {
        tracing::error!(target:"report", path=?path, error=?source, "Write the report");
        Error::Write {
            path: path.to_path_buf(),
            source,
        }
    };

    let mut w = BufWriter::new(File::create(path).map_err(wrap)?);
    write(&mut w, tasks).map_err(wrap)?;
    w.flush().map_err(wrap)?;

    tracing::info!(target:"report", path=?path, count=tasks.len(), "The report has been written");

    Ok(())
}
