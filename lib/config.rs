//! Named defaults for interaction terms, optionally loaded from TOML.
//!
//! A config file may give the keys at the top level or under an
//! `[interaction]` table:
//! ```toml
//! [interaction]
//! interaction_coeff = 862690.0  # MHz µm^6
//! max_distance = 10.0           # µm
//! ```
//! Missing keys keep their defaults and unknown keys are ignored. When the
//! `[interaction]` table is present, top-level keys are not read.

use std::path::Path;
use serde::Deserialize;
use crate::error::{ Error, Result };

/// Default van der Waals C6 coefficient, in MHz µm^6.
pub const DEFAULT_INTERACTION_COEFF: f64 = 862690.0;

/// Parameters for building interaction terms.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// C6 coefficient, in units of frequency times length^6.
    pub interaction_coeff: f64,
    /// Atom pairs farther apart than this are not coupled. `None` couples
    /// every pair.
    pub max_distance: Option<f64>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { interaction_coeff: DEFAULT_INTERACTION_COEFF, max_distance: None }
    }
}

/// Layout of a config file: either an `[interaction]` table or the same keys
/// at the top level.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    interaction: Option<InteractionConfig>,

    #[serde(flatten)]
    top_level: InteractionConfig,
}

impl InteractionConfig {
    /// Parse a config from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        let config = file.interaction.unwrap_or(file.top_level);
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load<P>(path: P) -> Result<Self>
    where P: AsRef<Path>
    {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Check that the coefficient and cutoff are positive and finite.
    pub fn validate(&self) -> Result<()> {
        positive("interaction_coeff", self.interaction_coeff)?;
        if let Some(rmax) = self.max_distance {
            positive("max_distance", rmax)?;
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}
