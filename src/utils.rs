//! Small helpers for logging and output-path validation.

use crate::errors::OutputError;
use std::fs as stdfs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest char boundary at or
/// below `max` and get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory that will hold `file` exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file
/// next to the target so that a long batch does not end in a write failure.
#[instrument(level = "info", skip_all, fields(path = %file.display()))]
pub async fn ensure_output_writable(file: &Path) -> Result<(), OutputError> {
    let dir = output_dir(file);
    let not_writable = |source: std::io::Error| OutputError::NotWritable {
        path: dir.clone(),
        source,
    };

    fs::create_dir_all(&dir).await.map_err(not_writable)?;

    let scratch_path = dir.join("..__write_check__");
    stdfs::File::create(&scratch_path).map_err(not_writable)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}

/// Directory that will hold `file`; `.` for a bare file name.
fn output_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
