//! Which attributes expand, and how
//!
//! Configuration lives in a RON file, by default `lastexpr.ron`:
//!
//! ```ron
//! (
//!     macros: [
//!         (attribute: "ImplicitReturn", strategy: direct),
//!         (attribute: "BareLastExprs", strategy: closure_wrap),
//!     ],
//!     indent_width: 4,
//! )
//! ```

use crate::printer::DEFAULT_INDENT_WIDTH;
use crate::transform::Strategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "lastexpr.ron";

/// An attribute name registered as a body macro
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBinding {
    pub attribute: String,
    pub strategy: Strategy,
}

impl MacroBinding {
    pub fn new(attribute: impl Into<String>, strategy: Strategy) -> Self {
        MacroBinding {
            attribute: attribute.into(),
            strategy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub macros: Vec<MacroBinding>,
    pub indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            macros: vec![
                MacroBinding::new("ImplicitReturn", Strategy::Direct),
                MacroBinding::new("BareLastExprs", Strategy::ClosureWrap),
            ],
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Strategy registered for `attribute`, if it is a body macro at all
    pub fn strategy_for(&self, attribute: &str) -> Option<Strategy> {
        self.macros
            .iter()
            .find(|binding| binding.attribute == attribute)
            .map(|binding| binding.strategy)
    }

    pub fn is_registered(&self, attribute: &str) -> bool {
        self.strategy_for(attribute).is_some()
    }

    /// Force every registered attribute onto one strategy
    pub fn with_strategy_override(mut self, strategy: Strategy) -> Self {
        for binding in &mut self.macros {
            binding.strategy = strategy;
        }
        self
    }
}
