//! # ferritin-contacts
//!
//! Residue-level summaries of protein-ligand interaction fingerprints.
//!
//! Column names of a fingerprint table are mapped to canonical residues by a
//! [`ResidueExtractor`], the active residues of each molecule are grouped into binding
//! subsites by a [`SubsiteClassifier`], and the per-molecule [`MoleculeSummary`] rows are
//! collected into a [`ComparisonReport`] that puts the resolved inhibitor first.
//!
//! ```ignore
//! use ferritin_contacts::{compare_tables, InteractionConfig, MoleculeNames};
//! use ferritin_io::{load_table, normalize};
//!
//! let config = InteractionConfig::default();
//! let resolved = normalize(load_table("resolved.csv")?, &config.format_keywords);
//! let designed = normalize(load_table("designed.parquet")?, &config.format_keywords);
//! let names = MoleculeNames::from_sdf(Some("designed.sdf".as_ref()));
//! let report = compare_tables(&resolved, &designed, &names, &config)?;
//! report.write_csv("comparison.csv")?;
//! ```
mod compare;
mod config;
mod extract;
mod report;
mod residue;
mod subsite;
mod summary;

pub use self::compare::compare_tables;
pub use self::config::{ConfigError, InteractionConfig, Subsite};
pub use self::extract::{clean_separators, tokenize, Extraction, ResidueExtractor, Strategy, STRATEGIES};
pub use self::report::{output_path, ComparisonReport, COUNT_COLUMN, MOLECULE_COLUMN, RESIDUES_COLUMN};
pub use self::residue::ResidueToken;
pub use self::subsite::{SubsiteClassifier, SubsiteHit};
pub use self::summary::{MoleculeNames, MoleculeSummary, Summarizer, NO_RESIDUES, RESOLVED_LABEL};
