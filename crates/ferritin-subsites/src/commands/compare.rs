use std::path::{Path, PathBuf};

use anyhow::Context;
use ferritin_contacts::{compare_tables, output_path, InteractionConfig, MoleculeNames};
use ferritin_io::{load_table, normalize, InteractionTable};
use log::{info, warn};

pub struct CompareArgs {
    pub resolved: PathBuf,
    pub designed: PathBuf,
    pub designed_sdf: Option<PathBuf>,
    pub output_prefix: String,
    pub config: Option<PathBuf>,
}

pub fn execute(args: CompareArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => InteractionConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => InteractionConfig::default(),
    };

    let resolved = read_fingerprint(&args.resolved, &config)?;
    let designed = read_fingerprint(&args.designed, &config)?;
    let names = MoleculeNames::from_sdf(args.designed_sdf.as_deref());

    let report = compare_tables(&resolved, &designed, &names, &config)?;

    let path = output_path(&args.output_prefix);
    report
        .write_csv(&path)
        .with_context(|| format!("writing report to {}", path.display()))?;
    println!("Wrote: {}", path.display());

    println!("{}", report.to_dataframe()?);
    Ok(())
}

fn read_fingerprint(path: &Path, config: &InteractionConfig) -> anyhow::Result<InteractionTable> {
    let raw = load_table(path).with_context(|| format!("reading {}", path.display()))?;
    info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        raw.height(),
        raw.width()
    );
    let table = normalize(raw, &config.format_keywords);
    let fallbacks = table.coercion_fallbacks().count();
    if fallbacks > 0 {
        warn!(
            "{}: {fallbacks} of {} columns were not clean booleans",
            path.display(),
            table.width()
        );
    }
    Ok(table)
}
