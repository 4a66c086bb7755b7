mod settings;

pub use settings::{Config, ConvertSettings, OutputSettings, TemplateSettings};

use crate::error::{DocError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.orbitdoc/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "orbitdoc") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.orbitdoc/
    let home = dirs_home().ok_or_else(|| {
        DocError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".orbitdoc"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs_home() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured directory: `~` expands, absolute paths pass
/// through, relative paths land under the config directory.
pub fn resolve_dir(configured: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(configured);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(DocError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DocError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Relative paths resolve against the config directory.

[output]
dir = "output"

[templates]
dir = "templates"
quotation_summary = "Orbit_Agritech_Quotation_Summary_Template.docx"
partial_proforma_receipt = "Orbit_Agritech_Partial_Proforma_Receipt.docx"
full_proforma_receipt = "Orbit_Agritech_Full_Proforma_Receipt.docx"

[convert]
soffice = "soffice"   # LibreOffice binary used for the PDF rendition
"#;
