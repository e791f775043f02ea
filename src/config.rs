//! Flag-file configuration.
//!
//! Defaults live in a global config file and an optional `.docentrc` in the
//! working directory; both hold plain command-line flags, one or more per
//! line. Local flags are unioned over global ones, and the live command
//! line is unioned over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_images: bool,
    pub expanded: bool,
    pub tour: bool,
    pub filter: Option<String>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_images: self.no_images || other.no_images,
            expanded: self.expanded || other.expanded,
            tour: self.tour || other.tour,
            filter: other.filter.clone().or_else(|| self.filter.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("docent").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("docent")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("docent").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("docent").join("config");
        }
    }

    PathBuf::from(".docentrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".docentrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# docent defaults (saved with --save)".to_string());
    if flags.no_images {
        lines.push("--no-images".to_string());
    }
    if flags.expanded {
        lines.push("--expanded".to_string());
    }
    if flags.tour {
        lines.push("--tour".to_string());
    }
    if let Some(filter) = &flags.filter {
        lines.push(format!("--filter {filter}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-images" {
            flags.no_images = true;
        } else if token == "--expanded" {
            flags.expanded = true;
        } else if token == "--tour" {
            flags.tour = true;
        } else if token == "--filter" {
            if let Some(next) = tokens.get(i + 1) {
                flags.filter = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--filter=") {
            flags.filter = Some(value.to_string());
        }
        i += 1;
    }
    flags
}
