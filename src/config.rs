use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::diagnostics::print_warning;
use crate::core::variables::{is_valid_variable_name, Variables};

pub const DEFAULT_SAVE_FILE: &str = "vars.txt";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `save` / `load` / `savelist` read and write.
    pub save_file: Option<PathBuf>,
    pub color: Option<bool>,
    /// Preset variables, applied before the first prompt.
    pub variables: BTreeMap<String, f64>,
}

impl Config {
    pub fn save_file(&self) -> PathBuf {
        self.save_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE))
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    /// Environment with the constants plus every valid preset.
    pub fn initial_variables(&self) -> Variables {
        let mut vars = Variables::new();
        for (name, value) in &self.variables {
            if is_valid_variable_name(name) {
                vars.set(name.clone(), *value);
            } else {
                print_warning(&format!("config: skipping invalid variable name '{}'", name));
            }
        }
        vars
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.formulae\config.toml on Windows; ~/.formulae/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".formulae").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Missing file means defaults; anything unreadable or malformed is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Parse config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.save_file(), PathBuf::from("vars.txt"));
        assert!(cfg.color());
        assert!(cfg.variables.is_empty());
    }

    #[test]
    fn reads_every_key() {
        let cfg = parse_config(
            "save_file = \"state/my_vars.txt\"\ncolor = false\n\n[variables]\nradius = 2.5\ng = 9.81\n",
        )
        .unwrap();
        assert_eq!(cfg.save_file(), PathBuf::from("state/my_vars.txt"));
        assert!(!cfg.color());
        assert_eq!(cfg.variables.get("g"), Some(&9.81));
    }

    #[test]
    fn reserved_presets_are_dropped() {
        let cfg = parse_config("[variables]\npi = 3.0\nok = 1.0\nlist = 4.0\n").unwrap();
        let vars = cfg.initial_variables();
        assert_eq!(vars.get("pi"), Some(std::f64::consts::PI));
        assert_eq!(vars.get("ok"), Some(1.0));
        assert!(!vars.contains("list"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "color = \"maybe\"").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
