//! Comparison report: one row for the resolved inhibitor followed by one row per
//! designed molecule.
//!
//! Columns are `molecule`, `h_bond_count`, `h_bond_residues`, then `count_<subsite>` for
//! every subsite, then `hit_<subsite>` for every subsite, both in configuration order.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::info;
use polars::prelude::*;

use crate::summary::{MoleculeSummary, RESOLVED_LABEL};

pub const MOLECULE_COLUMN: &str = "molecule";
pub const COUNT_COLUMN: &str = "h_bond_count";
pub const RESIDUES_COLUMN: &str = "h_bond_residues";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    subsites: Vec<String>,
    rows: Vec<MoleculeSummary>,
}

impl ComparisonReport {
    /// The resolved summary always becomes the first row, labelled `resolved_inhibitor`.
    pub fn assemble(mut resolved: MoleculeSummary, designed: Vec<MoleculeSummary>) -> Self {
        resolved.molecule = RESOLVED_LABEL.to_string();
        let subsites = resolved.subsites.iter().map(|hit| hit.name.clone()).collect();
        let mut rows = Vec::with_capacity(designed.len() + 1);
        rows.push(resolved);
        rows.extend(designed);
        ComparisonReport { subsites, rows }
    }

    pub fn rows(&self) -> &[MoleculeSummary] {
        &self.rows
    }

    pub fn resolved(&self) -> &MoleculeSummary {
        &self.rows[0]
    }

    pub fn designed(&self) -> &[MoleculeSummary] {
        &self.rows[1..]
    }

    pub fn subsite_names(&self) -> &[String] {
        &self.subsites
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec![
            MOLECULE_COLUMN.to_string(),
            COUNT_COLUMN.to_string(),
            RESIDUES_COLUMN.to_string(),
        ];
        names.extend(self.subsites.iter().map(|s| format!("count_{s}")));
        names.extend(self.subsites.iter().map(|s| format!("hit_{s}")));
        names
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let molecules: Vec<String> = self.rows.iter().map(|r| r.molecule.clone()).collect();
        let counts: Vec<u32> = self
            .rows
            .iter()
            .map(|r| r.interaction_count as u32)
            .collect();
        let residues: Vec<String> = self.rows.iter().map(|r| r.residue_list()).collect();

        let mut columns = vec![
            Column::new(MOLECULE_COLUMN.into(), molecules),
            Column::new(COUNT_COLUMN.into(), counts),
            Column::new(RESIDUES_COLUMN.into(), residues),
        ];
        for name in &self.subsites {
            let values: Vec<u32> = self
                .rows
                .iter()
                .map(|r| r.subsite(name).map_or(0, |hit| hit.count as u32))
                .collect();
            columns.push(Column::new(format!("count_{name}").into(), values));
        }
        for name in &self.subsites {
            let values: Vec<bool> = self
                .rows
                .iter()
                .map(|r| r.subsite(name).is_some_and(|hit| hit.hit))
                .collect();
            columns.push(Column::new(format!("hit_{name}").into(), values));
        }
        DataFrame::new(columns)
    }

    /// Write the report as CSV with a header row and no index column.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> ferritin_io::Result<()> {
        let path = path.as_ref();
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        info!("Wrote {} report rows to {}", df.height(), path.display());
        Ok(())
    }
}

/// `<prefix>.csv`
pub fn output_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsite::SubsiteHit;

    fn summary(molecule: &str, count: usize, residues: &[&str], hits: &[(&str, usize)]) -> MoleculeSummary {
        MoleculeSummary {
            molecule: molecule.to_string(),
            interaction_count: count,
            residues: residues.iter().map(|r| r.to_string()).collect(),
            subsites: hits
                .iter()
                .map(|&(name, count)| SubsiteHit {
                    name: name.to_string(),
                    count,
                    hit: count > 0,
                })
                .collect(),
        }
    }

    fn report() -> ComparisonReport {
        ComparisonReport::assemble(
            summary("anything", 2, &["HIS51", "SER81"], &[("Catalytic", 1), ("S2", 1)]),
            vec![
                summary("cand_A", 1, &["ASP75"], &[("Catalytic", 1), ("S2", 0)]),
                summary("cand_B", 0, &[], &[("Catalytic", 0), ("S2", 0)]),
            ],
        )
    }

    #[test]
    fn test_resolved_row_comes_first() {
        let report = report();
        assert_eq!(report.rows().len(), 3);
        assert_eq!(report.resolved().molecule, RESOLVED_LABEL);
        assert_eq!(report.designed()[0].molecule, "cand_A");
        assert_eq!(report.subsite_names(), ["Catalytic", "S2"]);
    }

    #[test]
    fn test_columns() {
        let report = report();
        let expected = vec![
            "molecule",
            "h_bond_count",
            "h_bond_residues",
            "count_Catalytic",
            "count_S2",
            "hit_Catalytic",
            "hit_S2",
        ];
        assert_eq!(report.column_names(), expected);

        let df = report.to_dataframe().unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, expected);
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("h_bond_count").unwrap().dtype(), &DataType::UInt32);
        assert_eq!(df.column("hit_S2").unwrap().dtype(), &DataType::Boolean);

        let residues = df.column("h_bond_residues").unwrap();
        let residues = residues.as_materialized_series().str().unwrap();
        assert_eq!(residues.get(0), Some("HIS51, SER81"));
        assert_eq!(residues.get(2), Some("None"));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.csv");
        report().write_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("molecule,h_bond_count,h_bond_residues,count_Catalytic,count_S2,hit_Catalytic,hit_S2")
        );
        assert_eq!(
            lines.next(),
            Some("resolved_inhibitor,2,\"HIS51, SER81\",1,1,true,true")
        );
        assert_eq!(lines.next(), Some("cand_A,1,ASP75,1,0,true,false"));
        assert_eq!(lines.next(), Some("cand_B,0,None,0,0,false,false"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("runs/cmp"), PathBuf::from("runs/cmp.csv"));
    }
}
