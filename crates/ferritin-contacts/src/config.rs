//! Keyword and subsite configuration.
//!
//! ```json
//! {
//!   "interaction_keywords": ["HBDonor", "HBAcceptor", "Ionic", "Cationic"],
//!   "subsites": [
//!     { "name": "Catalytic", "residues": ["HIS51", "ASP75", "SER135"] }
//!   ]
//! }
//! ```
//!
//! Missing fields take their default value. Residues are canonicalized on load, so
//! `"his 51"` and `"HIS51"` are the same entry.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::ResidueExtractor;
use crate::residue::ResidueToken;
use crate::subsite::SubsiteClassifier;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid keyword pattern: {source}")]
    Pattern {
        #[from]
        source: regex::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsite {
    pub name: String,
    pub residues: Vec<String>,
}

impl Subsite {
    pub fn new(name: &str, residues: &[&str]) -> Self {
        Subsite {
            name: name.to_string(),
            residues: residues.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Keywords that mark a column as an interaction column and anchor residue extraction.
    pub interaction_keywords: Vec<String>,
    /// Keywords used when sniffing whether a single-row table is a wide fingerprint.
    pub format_keywords: Vec<String>,
    pub subsites: Vec<Subsite>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig {
            interaction_keywords: to_strings(&["HBDonor", "HBAcceptor", "Ionic", "Cationic"]),
            format_keywords: to_strings(&[
                "HBDonor",
                "HBAcceptor",
                "Ionic",
                "Cationic",
                "VdW",
                "Hydrophobic",
                "PiStacking",
            ]),
            subsites: vec![
                Subsite::new("Catalytic", &["HIS51", "ASP75", "SER135"]),
                Subsite::new(
                    "S1",
                    &[
                        "ASP129", "TYR130", "PRO131", "SER135", "TYR150", "GLY151", "ASN152",
                        "TYR161",
                    ],
                ),
                Subsite::new("S2", &["SER81", "ASP83"]),
                Subsite::new("S1'", &["HIS51", "VAL52", "ALA132", "GLY133"]),
            ],
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl InteractionConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: InteractionConfig = serde_json::from_str(s)?;
        config.validated()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the configuration and canonicalize every subsite residue.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.interaction_keywords.iter().all(|kw| kw.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "at least one interaction keyword is required".to_string(),
            ));
        }
        self.interaction_keywords.retain(|kw| !kw.trim().is_empty());
        self.format_keywords.retain(|kw| !kw.trim().is_empty());

        let mut names = HashSet::new();
        for subsite in &mut self.subsites {
            if subsite.name.trim().is_empty() {
                return Err(ConfigError::Invalid("subsite names must not be empty".into()));
            }
            if !names.insert(subsite.name.clone()) {
                return Err(ConfigError::Invalid(format!(
                    "subsite {:?} is defined more than once",
                    subsite.name
                )));
            }
            subsite.residues = subsite
                .residues
                .iter()
                .map(|residue| {
                    ResidueToken::normalize(residue)
                        .map(|token| token.to_string())
                        .ok_or_else(|| {
                            ConfigError::Invalid(format!(
                                "subsite {:?}: {residue:?} is not a residue",
                                subsite.name
                            ))
                        })
                })
                .collect::<Result<_, _>>()?;
        }
        Ok(self)
    }

    pub fn extractor(&self) -> Result<ResidueExtractor, ConfigError> {
        Ok(ResidueExtractor::new(&self.interaction_keywords)?)
    }

    pub fn classifier(&self) -> SubsiteClassifier {
        SubsiteClassifier::new(&self.subsites)
    }
}
