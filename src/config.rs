//! Optional JSON configuration; command-line flags win over it.
//!
//! ```json
//! { "detail": 16, "footer": false, "imports": ["include <BOSL2/std.scad>"] }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::cli::Cli;
use crate::writer::scad::EmitOptions;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub detail: u32,
    pub footer: bool,
    pub imports: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let options = EmitOptions::default();
        Self {
            detail: options.detail,
            footer: options.footer,
            imports: options.imports,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Parsing {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(detail) = args.detail {
            self.detail = detail;
        }
        if args.no_footer {
            self.footer = false;
        }
        if !args.imports.is_empty() {
            self.imports = args.imports.clone();
        }
        self
    }
}

impl From<Config> for EmitOptions {
    fn from(config: Config) -> Self {
        EmitOptions {
            detail: config.detail,
            footer: config.footer,
            imports: config.imports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "detail": 4 }"#).unwrap();
        assert_eq!(config.detail, 4);
        assert!(config.footer);
        assert_eq!(config.imports, vec!["include <BOSL2/std.scad>"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_json(r#"{ "detial": 4 }"#).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let base = Config::from_json(r#"{ "detail": 4, "imports": ["use <a.scad>"] }"#).unwrap();
        let args = Cli::parse_from(["svg2scad", "x.svg", "--detail", "64", "--no-footer"]);

        let options = EmitOptions::from(base.with_overrides(&args));
        assert_eq!(options.detail, 64);
        assert!(!options.footer);
        assert_eq!(options.imports, vec!["use <a.scad>"]);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svg2scad.json");
        std::fs::write(&path, r#"{ "footer": false }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.footer);
        assert!(Config::load(&dir.path().join("missing.json")).is_err());
    }
}
