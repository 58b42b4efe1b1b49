use std::fs;
use std::path::Path;

use lilith_core::errors::{ErrorInfo, LilithError};
use serde::{Deserialize, Serialize};

/// Largest number of decimals accepted for SLHA rounding.
pub const MAX_SLHA_DECIMALS: u32 = 12;

fn config_error(code: &str, err: impl ToString) -> LilithError {
    LilithError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Formatting knobs shared by all writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Spaces per XML nesting level.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Decimals kept when rounding numbers in the SLHA-like block.
    #[serde(default = "default_slha_decimals")]
    pub slha_decimals: u32,
    /// Whether Lilith input documents start with `<?xml version="1.0"?>`.
    #[serde(default = "default_xml_declaration")]
    pub xml_declaration: bool,
}

fn default_indent() -> usize {
    2
}

fn default_slha_decimals() -> u32 {
    4
}

fn default_xml_declaration() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            slha_decimals: default_slha_decimals(),
            xml_declaration: default_xml_declaration(),
        }
    }
}

impl OutputConfig {
    /// Parses a YAML document; absent fields keep their defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, LilithError> {
        let config: OutputConfig =
            serde_yaml::from_str(raw).map_err(|err| config_error("yaml_deserialize", err))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LilithError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            LilithError::Serde(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Rejects settings that cannot produce a sensible document.
    pub fn validate(&self) -> Result<(), LilithError> {
        if self.slha_decimals > MAX_SLHA_DECIMALS {
            return Err(LilithError::Validation(
                ErrorInfo::new("lilith.config", "slha_decimals out of range")
                    .with_context("slha_decimals", self.slha_decimals.to_string())
                    .with_hint(format!("use at most {MAX_SLHA_DECIMALS} decimals")),
            ));
        }
        Ok(())
    }
}
