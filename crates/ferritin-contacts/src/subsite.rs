//! Subsite membership.

use std::collections::BTreeSet;

use log::warn;

use crate::config::Subsite;
use crate::residue::ResidueToken;

/// Count of a molecule's residues that fall in one subsite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsiteHit {
    pub name: String,
    pub count: usize,
    pub hit: bool,
}

/// Fixed subsite name -> residue set mapping. Subsites may share residues.
#[derive(Clone, Debug, Default)]
pub struct SubsiteClassifier {
    subsites: Vec<(String, BTreeSet<ResidueToken>)>,
}

impl SubsiteClassifier {
    pub fn new(subsites: &[Subsite]) -> Self {
        let subsites = subsites
            .iter()
            .map(|subsite| {
                let members = subsite
                    .residues
                    .iter()
                    .filter_map(|residue| {
                        let token = ResidueToken::normalize(residue);
                        if token.is_none() {
                            warn!("Ignoring {residue:?} in subsite {:?}", subsite.name);
                        }
                        token
                    })
                    .collect();
                (subsite.name.clone(), members)
            })
            .collect();
        SubsiteClassifier { subsites }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subsites.iter().map(|(name, _)| name.as_str())
    }

    pub fn members(&self, name: &str) -> Option<&BTreeSet<ResidueToken>> {
        self.subsites
            .iter()
            .find(|(subsite, _)| subsite == name)
            .map(|(_, members)| members)
    }

    /// Subsites containing `residue`, in configuration order.
    pub fn subsites_of(&self, residue: &ResidueToken) -> Vec<&str> {
        self.subsites
            .iter()
            .filter(|(_, members)| members.contains(residue))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Per-subsite intersection counts, in configuration order.
    pub fn classify(&self, residues: &BTreeSet<ResidueToken>) -> Vec<SubsiteHit> {
        self.subsites
            .iter()
            .map(|(name, members)| {
                let count = members.intersection(residues).count();
                SubsiteHit {
                    name: name.clone(),
                    count,
                    hit: count > 0,
                }
            })
            .collect()
    }
}
