//! Per-molecule interaction summaries.
//!
//! The extraction result of every interaction column is computed once per table and
//! shared by all rows. Designed molecules are summarized in parallel; the output keeps
//! the input row order.

use std::collections::BTreeSet;
use std::path::Path;

use ferritin_io::{read_sdf_titles, InteractionTable};
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::extract::{Extraction, ResidueExtractor};
use crate::residue::ResidueToken;
use crate::subsite::{SubsiteClassifier, SubsiteHit};

/// Label of the baseline row.
pub const RESOLVED_LABEL: &str = "resolved_inhibitor";

/// Rendering of an empty residue list.
pub const NO_RESIDUES: &str = "None";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoleculeSummary {
    pub molecule: String,
    /// Number of active interaction columns, not of distinct residues.
    pub interaction_count: usize,
    /// Sorted, deduplicated residue labels. Unresolved columns appear under their raw name.
    pub residues: Vec<String>,
    pub subsites: Vec<SubsiteHit>,
}

impl MoleculeSummary {
    /// `", "`-joined residues, or `None` when there are none.
    pub fn residue_list(&self) -> String {
        if self.residues.is_empty() {
            NO_RESIDUES.to_string()
        } else {
            self.residues.iter().join(", ")
        }
    }

    pub fn subsite(&self, name: &str) -> Option<&SubsiteHit> {
        self.subsites.iter().find(|hit| hit.name == name)
    }
}

/// Where designed-molecule labels come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoleculeNames {
    Named(Vec<String>),
    /// No usable name source; every row is labelled `mol_<index>`.
    Synthetic { reason: String },
}

impl MoleculeNames {
    /// Titles from an optional SDF file. An absent, unreadable or empty file gives
    /// synthetic names, keeping the reason.
    pub fn from_sdf(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return MoleculeNames::Synthetic {
                reason: "no structure file given".to_string(),
            };
        };
        let names = match read_sdf_titles(path) {
            Ok(titles) if titles.is_empty() => MoleculeNames::Synthetic {
                reason: format!("{path:?} contains no molecules"),
            },
            Ok(titles) => MoleculeNames::Named(titles),
            Err(err) => MoleculeNames::Synthetic {
                reason: err.to_string(),
            },
        };
        if let MoleculeNames::Synthetic { reason } = &names {
            warn!("Using synthetic molecule names: {reason}");
        }
        names
    }

    /// Label for row `i`, falling back to `mol_<i>` past the end of the name list.
    pub fn label(&self, i: usize) -> String {
        match self {
            MoleculeNames::Named(names) => names
                .get(i)
                .cloned()
                .unwrap_or_else(|| synthetic_label(i)),
            MoleculeNames::Synthetic { .. } => synthetic_label(i),
        }
    }
}

fn synthetic_label(i: usize) -> String {
    format!("mol_{i}")
}

pub struct Summarizer<'a> {
    extractor: &'a ResidueExtractor,
    classifier: &'a SubsiteClassifier,
}

impl<'a> Summarizer<'a> {
    pub fn new(extractor: &'a ResidueExtractor, classifier: &'a SubsiteClassifier) -> Self {
        Summarizer {
            extractor,
            classifier,
        }
    }

    /// Summary of the first row only. Empty tables and tables without interaction
    /// columns give a zero summary.
    pub fn summarize_resolved(&self, table: &InteractionTable) -> MoleculeSummary {
        let columns = self.interaction_columns(table);
        match table.row(0) {
            Some(row) if !columns.is_empty() => {
                if table.height() > 1 {
                    debug!(
                        "Resolved table has {} rows; summarizing the first",
                        table.height()
                    );
                }
                self.summarize_row(RESOLVED_LABEL.to_string(), row, &columns)
            }
            _ => {
                warn!("Resolved table has no rows or no interaction columns");
                self.empty(RESOLVED_LABEL.to_string())
            }
        }
    }

    /// One summary per row, in row order.
    pub fn summarize_designed(
        &self,
        table: &InteractionTable,
        names: &MoleculeNames,
    ) -> Vec<MoleculeSummary> {
        let columns = self.interaction_columns(table);
        info!(
            "Summarizing {} designed molecules over {} interaction columns",
            table.height(),
            columns.len()
        );
        table
            .rows()
            .par_iter()
            .enumerate()
            .map(|(i, row)| self.summarize_row(names.label(i), row, &columns))
            .collect()
    }

    /// Interaction columns with their extracted residue.
    fn interaction_columns(&self, table: &InteractionTable) -> Vec<(usize, Extraction)> {
        table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| self.extractor.is_interaction_column(name))
            .map(|(j, name)| (j, self.extractor.extract(name)))
            .collect()
    }

    fn summarize_row(
        &self,
        molecule: String,
        row: &[bool],
        columns: &[(usize, Extraction)],
    ) -> MoleculeSummary {
        let active: Vec<&Extraction> = columns
            .iter()
            .filter(|(j, _)| row.get(*j).copied().unwrap_or(false))
            .map(|(_, extraction)| extraction)
            .collect();

        let residues: BTreeSet<&str> = active.iter().map(|e| e.label()).collect();
        let tokens: BTreeSet<ResidueToken> =
            active.iter().filter_map(|e| e.token()).cloned().collect();

        MoleculeSummary {
            molecule,
            interaction_count: active.len(),
            residues: residues.into_iter().map(str::to_string).collect(),
            subsites: self.classifier.classify(&tokens),
        }
    }

    fn empty(&self, molecule: String) -> MoleculeSummary {
        MoleculeSummary {
            molecule,
            interaction_count: 0,
            residues: Vec::new(),
            subsites: self.classifier.classify(&BTreeSet::new()),
        }
    }
}
