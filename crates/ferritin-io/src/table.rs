//! # Tables
//!
//! Two table shapes flow through the crate:
//!
//! - [`RawTable`] is what the loader produces. Headers may still be hierarchical and cells
//!   keep whatever encoding the file used.
//! - [`InteractionTable`] is the normalized boolean matrix produced by
//!   [`normalize`](crate::normalize). Every cell is a `bool`.
//!

use std::fmt;

/// Markers that pandas-style writers use for an absent value.
const MISSING_MARKERS: [&str; 4] = ["nan", "NaN", "None", "NA"];

pub(crate) static MISSING: Cell = Cell::Missing;

/// A single table cell as it was read from disk.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// True for `Missing`, NaN floats, and empty or placeholder text.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Float(f) => f.is_nan(),
            Cell::Text(s) => {
                let s = s.trim();
                s.is_empty() || MISSING_MARKERS.contains(&s)
            }
            _ => false,
        }
    }

    /// Text rendering of a present value, `None` when the cell is missing.
    pub fn as_text(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        match self {
            Cell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Missing => None,
        }
    }

    /// Strict boolean cast.
    ///
    /// Text is accepted when it is one of the literal encodings (`True`, `true`, `1`,
    /// `False`, `false`, `0`), a number, or a missing marker. Anything else is an error
    /// carrying the offending value.
    pub fn cast_bool(&self) -> Result<bool, String> {
        if self.is_missing() {
            return Ok(false);
        }
        match self {
            Cell::Bool(b) => Ok(*b),
            Cell::Int(i) => Ok(*i != 0),
            Cell::Float(f) => Ok(*f != 0.0),
            Cell::Text(s) => {
                let s = s.trim();
                literal_bool(s)
                    .or_else(|| numeric_bool(s))
                    .ok_or_else(|| format!("cannot cast {s:?} to a boolean"))
            }
            Cell::Missing => Ok(false),
        }
    }

    /// Lenient boolean cast: any present value that has no strict reading is true.
    pub fn truthy(&self) -> bool {
        match self.cast_bool() {
            Ok(b) => b,
            Err(_) => !self.is_missing(),
        }
    }
}

fn literal_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" | "1" => Some(true),
        "False" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn numeric_bool(s: &str) -> Option<bool> {
    s.parse::<f64>().ok().map(|v| !v.is_nan() && v != 0.0)
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "nan"),
        }
    }
}

/// A column header, either a single name or the levels of a hierarchical header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnHeader {
    Flat(String),
    Levels(Vec<String>),
}

impl ColumnHeader {
    /// Recognizes headers written as stringified tuples, e.g. `('LIG', 'HIS51.A', 'HBDonor')`,
    /// which is how multi-level column names survive a round trip through parquet.
    ///
    /// Quoted levels may contain commas. Empty levels are kept, so `('LIG', '', 'HBDonor')`
    /// flattens to `LIG..HBDonor`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let Some(body) = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return ColumnHeader::Flat(raw.to_string());
        };
        if !body.contains('\'') && !body.contains('"') {
            return ColumnHeader::Flat(raw.to_string());
        }
        match split_tuple(body) {
            Some(levels) => ColumnHeader::Levels(levels),
            None => ColumnHeader::Flat(raw.to_string()),
        }
    }

    /// Single-string form: levels joined with `.`, whitespace runs collapsed.
    pub fn flatten(&self) -> String {
        let joined = match self {
            ColumnHeader::Flat(name) => name.clone(),
            ColumnHeader::Levels(levels) => levels.join("."),
        };
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Split the body of a tuple repr into its levels, honouring quotes and backslash escapes.
/// `None` when the body is not a well-formed tuple.
fn split_tuple(body: &str) -> Option<Vec<String>> {
    let mut levels = Vec::new();
    let mut chars = body.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };
        let level = if first == '\'' || first == '"' {
            chars.next();
            let mut level = String::new();
            loop {
                match chars.next()? {
                    '\\' => level.push(chars.next()?),
                    c if c == first => break,
                    c => level.push(c),
                }
            }
            level
        } else {
            let mut level = String::new();
            while let Some(c) = chars.next_if(|&c| c != ',') {
                level.push(c);
            }
            level.trim().to_string()
        };
        levels.push(level);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(_) => return None,
        }
    }
    Some(levels)
}

impl From<&str> for ColumnHeader {
    fn from(name: &str) -> Self {
        ColumnHeader::Flat(name.to_string())
    }
}

/// A loaded, not yet normalized table. Rows are stored row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub index: Vec<String>,
    pub headers: Vec<ColumnHeader>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(index: Vec<String>, headers: Vec<ColumnHeader>, rows: Vec<Vec<Cell>>) -> Self {
        RawTable {
            index,
            headers,
            rows,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Position of the first row carrying `label` in the index.
    pub fn row_position(&self, label: &str) -> Option<usize> {
        self.index.iter().position(|idx| idx == label)
    }

    /// Cell at `(row, column)`, `Missing` when the row is shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&MISSING)
    }
}

/// How a column reached its boolean form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coercion {
    Direct,
    /// The strict cast failed; values were coerced one cell at a time.
    PerCell { reason: String },
}

/// Normalized boolean matrix, one row per frame or molecule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionTable {
    pub(crate) index: Vec<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<bool>>,
    pub(crate) coercions: Vec<Coercion>,
}

impl InteractionTable {
    /// Build a table directly from booleans; every column counts as directly cast.
    pub fn from_rows(index: Vec<String>, columns: Vec<String>, rows: Vec<Vec<bool>>) -> Self {
        let coercions = vec![Coercion::Direct; columns.len()];
        InteractionTable {
            index,
            columns,
            rows,
            coercions,
        }
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Option<&[bool]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }

    /// Columns that needed per-cell coercion, with the reason the strict cast failed.
    pub fn coercion_fallbacks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .zip(&self.coercions)
            .filter_map(|(name, coercion)| match coercion {
                Coercion::PerCell { reason } => Some((name.as_str(), reason.as_str())),
                Coercion::Direct => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_strict_cast() {
        assert_eq!(Cell::text("True").cast_bool(), Ok(true));
        assert_eq!(Cell::text("1").cast_bool(), Ok(true));
        assert_eq!(Cell::Int(1).cast_bool(), Ok(true));
        assert_eq!(Cell::Bool(true).cast_bool(), Ok(true));
        assert_eq!(Cell::text("1.0").cast_bool(), Ok(true));

        assert_eq!(Cell::text("False").cast_bool(), Ok(false));
        assert_eq!(Cell::text("0").cast_bool(), Ok(false));
        assert_eq!(Cell::Int(0).cast_bool(), Ok(false));
        assert_eq!(Cell::Missing.cast_bool(), Ok(false));
        assert_eq!(Cell::Float(f64::NAN).cast_bool(), Ok(false));
        assert_eq!(Cell::text("nan").cast_bool(), Ok(false));

        assert!(Cell::text("yes").cast_bool().is_err());
    }

    #[test]
    fn test_cell_truthy() {
        assert!(Cell::text("yes").truthy());
        assert!(Cell::text("HBDonor").truthy());
        assert!(!Cell::text("").truthy());
        assert!(!Cell::text("false").truthy());
        assert!(!Cell::Missing.truthy());
    }

    #[test]
    fn test_header_parse_and_flatten() {
        let header = ColumnHeader::parse("('LIG1.G', 'HIS51.A', 'HBDonor')");
        assert_eq!(
            header,
            ColumnHeader::Levels(vec![
                "LIG1.G".to_string(),
                "HIS51.A".to_string(),
                "HBDonor".to_string()
            ])
        );
        assert_eq!(header.flatten(), "LIG1.G.HIS51.A.HBDonor");

        let flat = ColumnHeader::parse("  his   51  HBAcceptor ");
        assert_eq!(flat.flatten(), "his 51 HBAcceptor");

        let empty_level = ColumnHeader::parse("('LIG', '', 'HBDonor')");
        assert_eq!(empty_level.flatten(), "LIG..HBDonor");

        let with_comma = ColumnHeader::parse(r#"('LIG', "HIS51,A", 'it\'s', 'HBDonor')"#);
        assert_eq!(
            with_comma,
            ColumnHeader::Levels(vec![
                "LIG".to_string(),
                "HIS51,A".to_string(),
                "it's".to_string(),
                "HBDonor".to_string()
            ])
        );

        // unterminated quote is not a tuple
        assert_eq!(
            ColumnHeader::parse("('LIG', 'HIS51)"),
            ColumnHeader::Flat("('LIG', 'HIS51)".to_string())
        );

        // parentheses without quoted levels stay a flat name
        assert_eq!(
            ColumnHeader::parse("(unnamed)"),
            ColumnHeader::Flat("(unnamed)".to_string())
        );
    }

    #[test]
    fn test_raw_table_cell_padding() {
        let table = RawTable::new(
            vec!["0".to_string()],
            vec!["a".into(), "b".into()],
            vec![vec![Cell::Bool(true)]],
        );
        assert_eq!(table.cell(0, 0), &Cell::Bool(true));
        assert_eq!(table.cell(0, 1), &Cell::Missing);
        assert_eq!(table.cell(3, 0), &Cell::Missing);
    }
}
