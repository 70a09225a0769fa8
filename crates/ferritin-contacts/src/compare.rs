use ferritin_io::InteractionTable;
use itertools::Itertools;
use log::{debug, info};

use crate::config::{ConfigError, InteractionConfig};
use crate::report::ComparisonReport;
use crate::summary::{MoleculeNames, Summarizer};

/// Summarize the resolved and designed fingerprints under `config` and assemble the report.
pub fn compare_tables(
    resolved: &InteractionTable,
    designed: &InteractionTable,
    names: &MoleculeNames,
    config: &InteractionConfig,
) -> Result<ComparisonReport, ConfigError> {
    let extractor = config.extractor()?;
    debug!("Interaction keywords: {}", extractor.keywords().join(", "));
    let classifier = config.classifier();
    let summarizer = Summarizer::new(&extractor, &classifier);

    let baseline = summarizer.summarize_resolved(resolved);
    info!(
        "Resolved inhibitor: {} interactions ({})",
        baseline.interaction_count,
        baseline.residue_list()
    );
    let designed = summarizer.summarize_designed(designed, names);
    Ok(ComparisonReport::assemble(baseline, designed))
}
