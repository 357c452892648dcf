//! Output locations for exported sketches.

use super::types::ExportError;
use crate::config::ExportFormat;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Where and how an export is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory to write exports to.
    pub directory: PathBuf,
    /// File name template without extension (supports chrono format specifiers).
    pub filename_template: String,
    /// Which files to write.
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Sketchpad"),
            filename_template: "sketch_%Y-%m-%d_%H%M%S".to_string(),
            format: ExportFormat::default(),
        }
    }
}

/// Expand the template with the current local time.
///
/// PNG and PDF of one export share this stem.
pub fn generate_stem(template: &str) -> String {
    Local::now().format(template).to_string()
}

/// Ensure the export directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write exported bytes to `path`, readable by the owner only.
pub fn write_export_file(data: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        ensure_directory_exists(parent)?;
    }

    log::info!("Writing export to: {} ({} bytes)", path.display(), data.len());
    fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    Ok(path.to_path_buf())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
