//! # ferritin-io
//!
//! Reading interaction fingerprint tables.
//!
//! * [`load_table`] reads delimited text or parquet into a [`RawTable`], rebuilding
//!   headers stored in `protein`/`interaction` metadata rows.
//! * [`normalize`] turns a [`RawTable`] into a boolean [`InteractionTable`].
//! * [`read_sdf_titles`] reads molecule names from an SDF file.
//!
mod error;
mod loader;
mod normalize;
mod sdf;
mod table;

pub use self::error::{Error, Result};
pub use self::loader::{load_table, TableFormat, METADATA_ROWS};
pub use self::normalize::{coerce_column, looks_like_interaction_column, normalize, VALUE_COLUMN};
pub use self::sdf::{parse_sdf_titles, read_sdf_titles, MALFORMED_MOLECULE, UNNAMED_MOLECULE};
pub use self::table::{Cell, Coercion, ColumnHeader, InteractionTable, RawTable};
