//! Column normalization: header flattening, the single-row transpose heuristic and
//! boolean coercion.

use log::{debug, warn};

use crate::table::{Cell, Coercion, InteractionTable, RawTable, MISSING};

/// Name of the column produced when a single-record table is transposed.
pub const VALUE_COLUMN: &str = "value";

/// A column looks like an interaction column when it has a dotted name that mentions
/// one of the interaction keywords.
pub fn looks_like_interaction_column<S: AsRef<str>>(name: &str, keywords: &[S]) -> bool {
    if !name.contains('.') {
        return false;
    }
    let name = name.to_lowercase();
    keywords
        .iter()
        .any(|kw| name.contains(&kw.as_ref().to_lowercase()))
}

/// Normalize a raw table into a boolean interaction matrix.
///
/// `format_keywords` only drives the transpose heuristic; it is not used to select
/// interaction columns.
pub fn normalize<S: AsRef<str>>(raw: RawTable, format_keywords: &[S]) -> InteractionTable {
    let columns: Vec<String> = raw.headers.iter().map(|h| h.flatten()).collect();

    let (index, columns, rows) = if should_transpose(&raw, &columns, format_keywords) {
        debug!(
            "Transposing single-row table with {} columns into a `{VALUE_COLUMN}` column",
            columns.len()
        );
        let rows: Vec<Vec<Cell>> = (0..columns.len())
            .map(|i| vec![raw.cell(0, i).clone()])
            .collect();
        (columns, vec![VALUE_COLUMN.to_string()], rows)
    } else {
        (raw.index, columns, raw.rows)
    };

    let mut bool_rows = vec![Vec::with_capacity(columns.len()); rows.len()];
    let mut coercions = Vec::with_capacity(columns.len());
    for (j, name) in columns.iter().enumerate() {
        let cells: Vec<&Cell> = rows.iter().map(|row| cell_at(row, j)).collect();
        let (values, coercion) = coerce_column(&cells);
        if let Coercion::PerCell { reason } = &coercion {
            warn!("Column {name:?} needed per-cell boolean coercion: {reason}");
        }
        for (row, value) in bool_rows.iter_mut().zip(values) {
            row.push(value);
        }
        coercions.push(coercion);
    }

    InteractionTable {
        index,
        columns,
        rows: bool_rows,
        coercions,
    }
}

fn should_transpose<S: AsRef<str>>(raw: &RawTable, columns: &[String], keywords: &[S]) -> bool {
    raw.height() == 1
        && columns.len() > 1
        && !columns
            .iter()
            .any(|name| looks_like_interaction_column(name, keywords))
}

fn cell_at(row: &[Cell], j: usize) -> &Cell {
    row.get(j).unwrap_or(&MISSING)
}

/// Strict cast first; if any cell refuses, fall back to truthiness for the whole column.
pub fn coerce_column(cells: &[&Cell]) -> (Vec<bool>, Coercion) {
    let strict: Result<Vec<bool>, String> = cells.iter().map(|cell| cell.cast_bool()).collect();
    match strict {
        Ok(values) => (values, Coercion::Direct),
        Err(reason) => {
            let values = cells.iter().map(|cell| cell.truthy()).collect();
            (values, Coercion::PerCell { reason })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnHeader;

    const KEYWORDS: [&str; 7] = [
        "HBDonor",
        "HBAcceptor",
        "Ionic",
        "Cationic",
        "VdW",
        "Hydrophobic",
        "PiStacking",
    ];

    fn single_row(headers: &[&str], cells: Vec<Cell>) -> RawTable {
        RawTable::new(
            vec!["0".to_string()],
            headers.iter().map(|h| ColumnHeader::from(*h)).collect(),
            vec![cells],
        )
    }

    #[test]
    fn test_single_row_without_interaction_names_is_transposed() {
        let raw = single_row(
            &["a", "b", "c", "d", "e"],
            vec![
                Cell::text("True"),
                Cell::text("0"),
                Cell::Int(1),
                Cell::Missing,
                Cell::Bool(true),
            ],
        );
        let table = normalize(raw, &KEYWORDS);
        assert_eq!(table.height(), 5);
        assert_eq!(table.width(), 1);
        assert_eq!(table.columns(), &["value".to_string()]);
        assert_eq!(table.index(), &["a", "b", "c", "d", "e"]);
        let values: Vec<bool> = table.rows().iter().map(|row| row[0]).collect();
        assert_eq!(values, vec![true, false, true, false, true]);
    }

    #[test]
    fn test_single_row_with_interaction_names_is_kept_wide() {
        let raw = single_row(
            &["A.HBDonor", "A.Ionic"],
            vec![Cell::text("True"), Cell::text("False")],
        );
        let table = normalize(raw, &KEYWORDS);
        assert_eq!(table.height(), 1);
        assert_eq!(table.columns(), &["A.HBDonor", "A.Ionic"]);
        assert_eq!(table.row(0), Some(&[true, false][..]));
    }

    #[test]
    fn test_keyword_without_dot_does_not_prevent_transpose() {
        let raw = single_row(
            &["HBDonor", "Ionic"],
            vec![Cell::text("1"), Cell::text("0")],
        );
        let table = normalize(raw, &KEYWORDS);
        assert_eq!(table.width(), 1);
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn test_headers_are_flattened() {
        let raw = RawTable::new(
            vec!["0".to_string(), "1".to_string()],
            vec![
                ColumnHeader::Levels(vec!["LIG".into(), "HIS51.A".into(), "HBDonor".into()]),
                ColumnHeader::Flat("his   51\tHBAcceptor".into()),
            ],
            vec![
                vec![Cell::Bool(true), Cell::Bool(false)],
                vec![Cell::Bool(false), Cell::Bool(true)],
            ],
        );
        let table = normalize(raw, &KEYWORDS);
        assert_eq!(table.columns(), &["LIG.HIS51.A.HBDonor", "his 51 HBAcceptor"]);
    }

    #[test]
    fn test_boolean_coercion_encodings() {
        let truthy = [
            Cell::text("True"),
            Cell::text("true"),
            Cell::text("1"),
            Cell::Int(1),
            Cell::Bool(true),
        ];
        let falsy = [
            Cell::text("False"),
            Cell::text("false"),
            Cell::text("0"),
            Cell::Int(0),
            Cell::Missing,
        ];
        let cells: Vec<&Cell> = truthy.iter().chain(falsy.iter()).collect();
        let (values, coercion) = coerce_column(&cells);
        assert_eq!(coercion, Coercion::Direct);
        assert_eq!(values, [vec![true; 5], vec![false; 5]].concat());
    }

    #[test]
    fn test_per_cell_fallback_keeps_reason() {
        let cells = [Cell::text("contact"), Cell::Missing, Cell::text("0")];
        let refs: Vec<&Cell> = cells.iter().collect();
        let (values, coercion) = coerce_column(&refs);
        assert_eq!(values, vec![true, false, false]);
        match coercion {
            Coercion::PerCell { reason } => assert!(reason.contains("contact")),
            Coercion::Direct => panic!("expected a per-cell fallback"),
        }
    }

    #[test]
    fn test_fallback_is_reported_on_the_table() {
        let raw = RawTable::new(
            vec!["0".to_string(), "1".to_string()],
            vec!["A.HBDonor".into(), "A.Ionic".into()],
            vec![
                vec![Cell::text("yes"), Cell::text("1")],
                vec![Cell::Missing, Cell::text("0")],
            ],
        );
        let table = normalize(raw, &KEYWORDS);
        let fallbacks: Vec<&str> = table.coercion_fallbacks().map(|(name, _)| name).collect();
        assert_eq!(fallbacks, vec!["A.HBDonor"]);
        assert!(matches!(table.coercions()[0], Coercion::PerCell { .. }));
        assert_eq!(table.coercions()[1], Coercion::Direct);
        assert_eq!(table.rows(), &[vec![true, true], vec![false, false]]);
    }
}
