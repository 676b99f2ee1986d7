//! Editor configuration: loads `thor.toml` and turns `[[syntax]]` tables into profiles.

use crate::row::DEFAULT_TAB_STOP;
use crate::syntax::{builtin_profiles, Keyword, SyntaxProfile};
use crate::utils::config_search_paths;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed representation of `thor.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tab_stop: usize,
    pub soft_tab_width: usize,
    pub status_timeout_secs: u64,
    pub auto_pair: bool,
    pub system_clipboard: bool,
    pub log_file: Option<PathBuf>,
    pub syntax: Vec<SyntaxConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            soft_tab_width: 4,
            status_timeout_secs: 5,
            auto_pair: true,
            system_clipboard: false,
            log_file: None,
            syntax: Vec::new(),
        }
    }
}

/// A `[[syntax]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntaxConfig {
    pub name: String,
    pub filematch: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub secondary_keywords: Vec<String>,

    #[serde(default)]
    pub line_comment: Option<String>,

    /// `[start, end]` markers.
    #[serde(default)]
    pub block_comment: Option<(String, String)>,

    #[serde(default = "default_true")]
    pub numbers: bool,

    #[serde(default = "default_true")]
    pub strings: bool,
}

fn default_true() -> bool {
    true
}

impl SyntaxConfig {
    pub fn to_profile(&self) -> SyntaxProfile {
        let (block_start, block_end) = self.block_comment.clone().unwrap_or_default();
        let primary = self.keywords.iter().map(|k| Keyword::primary(k));
        let secondary = self.secondary_keywords.iter();
        SyntaxProfile {
            name: self.name.clone(),
            filematch: self.filematch.clone(),
            keywords: primary
                .chain(secondary.map(|k| Keyword::secondary(k)))
                .collect(),
            line_comment: self.line_comment.clone().unwrap_or_default(),
            block_start,
            block_end,
            highlight_numbers: self.numbers,
            highlight_strings: self.strings,
        }
    }
}

impl Config {
    /// Parse config text. Out-of-range values are clamped.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut cfg: Self = toml::from_str(text)?;
        cfg.tab_stop = cfg.tab_stop.max(1);
        Ok(cfg)
    }

    /// Read and parse one config file.
    pub fn load(path: &Path) -> Result<Self> {
        let name = path.display();
        let text = fs::read_to_string(path).with_context(|| format!("Reading {name}"))?;
        Self::from_toml(&text).with_context(|| format!("Parsing {name}"))
    }

    /// Load the config named on the command line, or the first default location that exists.
    ///
    /// An explicit path must exist; default locations are skipped when absent.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        Self::discover_in(&config_search_paths())
    }

    fn discover_in(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>)> {
        for path in candidates {
            if path.is_file() {
                return Ok((Self::load(path)?, Some(path.clone())));
            }
        }
        Ok((Self::default(), None))
    }

    /// Syntax profiles in lookup order: configured ones first, then the built-ins.
    pub fn profiles(&self) -> Vec<SyntaxProfile> {
        self.syntax
            .iter()
            .map(SyntaxConfig::to_profile)
            .chain(builtin_profiles())
            .collect()
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}
