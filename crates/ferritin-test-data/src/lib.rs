//! ferritin-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! Example fingerprint tables are included in the crate distribution for reference files.
//!
//! The test files are represented as `TestFile` objects which package the raw data
//! and create temporary files for programs to operate on.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use ferritin_test_data::TestFile;
/// let (resolved, _temp) = TestFile::resolved_frames().create_temp().unwrap();
/// let (designed, _temp) = TestFile::designed_table().create_temp().unwrap();
///
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// Frame-wise fingerprint of the resolved inhibitor.
    ///
    /// Header identity lives in the `protein`/`interaction` rows:
    /// `HIS51.A.HBDonor`, `ASP75.A.HBAcceptor`, `TYR130.A.Hydrophobic`, `SER81.A.Ionic`.
    pub fn resolved_frames() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions/resolved_frames.csv"),
            suffix: "csv",
        }
    }
    /// Three designed molecules with mixed `True`/`true`/`1` cell encodings.
    pub fn designed_table() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions/designed.csv"),
            suffix: "csv",
        }
    }
    /// Names for the first two rows of `designed_table`: `cand_A`, `cand_B`.
    pub fn designed_sdf() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions/designed.sdf"),
            suffix: "sdf",
        }
    }
    /// Keyword and subsite configuration with a `Catalytic` and a `Pocket` subsite.
    pub fn subsite_config() -> Self {
        Self {
            filebinary: include_bytes!("../data/interactions/subsites.json"),
            suffix: "json",
        }
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
