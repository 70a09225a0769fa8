//! Molecule titles from SDF files.
//!
//! Only the header line of each record is read; atoms and bonds are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

const RECORD_SEPARATOR: &str = "$$$$";

/// Title used for a record whose header line is blank.
pub const UNNAMED_MOLECULE: &str = "unknown";

/// Title used for a record too short to hold a molfile header block.
pub const MALFORMED_MOLECULE: &str = "None";

/// Read the record titles of an SDF file in file order.
pub fn read_sdf_titles(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let titles = parse_sdf_titles(BufReader::new(File::open(path)?))?;
    debug!("Read {} molecule titles from {path:?}", titles.len());
    Ok(titles)
}

/// Titles from any buffered SDF source. Records keep their position even when malformed
/// so that titles stay aligned with per-molecule rows.
pub fn parse_sdf_titles<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut titles = Vec::new();
    let mut record: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim() == RECORD_SEPARATOR {
            titles.extend(record_title(&record));
            record.clear();
        } else {
            record.push(line);
        }
    }
    titles.extend(record_title(&record));
    Ok(titles)
}

fn record_title(record: &[String]) -> Option<String> {
    if record.iter().all(|line| line.trim().is_empty()) {
        return None;
    }
    // header block: title, program, comment, counts
    if record.len() < 4 {
        return Some(MALFORMED_MOLECULE.to_string());
    }
    let title = record[0].trim();
    if title.is_empty() {
        Some(UNNAMED_MOLECULE.to_string())
    } else {
        Some(title.to_string())
    }
}
