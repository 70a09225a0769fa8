//! Table loading.
//!
//! Delimited text is read without a header or dtype inference so that duplicated header
//! names and mixed cell encodings survive untouched; the first row becomes the header and
//! the first column the row index. Parquet files are read as-is.
//!
//! Fingerprint exports that carry their column identity in `protein`/`interaction` rows
//! instead of the header are detected after loading and their header is rebuilt.

use std::fs::File;
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use polars::prelude::*;
use strum::Display;

use crate::error::{Error, Result};
use crate::table::{Cell, ColumnHeader, RawTable};

/// Row labels that describe columns rather than observations.
pub const METADATA_ROWS: [&str; 4] = ["ligand", "protein", "interaction", "Frame"];

/// Column pandas uses to store an unnamed index in parquet files.
const PANDAS_INDEX_COLUMN: &str = "__index_level_0__";

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum TableFormat {
    #[strum(serialize = "csv")]
    Csv,
    #[strum(serialize = "tsv")]
    Tsv,
    #[strum(serialize = "parquet")]
    Parquet,
}

impl TableFormat {
    /// Dispatch on the file suffix. Unknown suffixes are read as comma-delimited text.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") | Some("pq") => TableFormat::Parquet,
            Some("tsv") | Some("tab") => TableFormat::Tsv,
            _ => TableFormat::Csv,
        }
    }

    fn separator(self) -> u8 {
        match self {
            TableFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Load a fingerprint table from `path`.
///
/// Fails with [`Error::NotFound`] when the path does not exist.
pub fn load_table(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let format = TableFormat::from_path(path);
    info!("Loading {format} table {path:?}");
    let table = match format {
        TableFormat::Parquet => read_parquet(path)?,
        TableFormat::Csv | TableFormat::Tsv => read_delimited(path, format.separator())?,
    };

    let table = if has_metadata_rows(&table) {
        reconstruct_metadata_header(table)
    } else {
        table
    };
    debug!(
        "Loaded {} rows x {} columns from {path:?}",
        table.height(),
        table.width()
    );
    Ok(table)
}

fn read_delimited(path: &Path, separator: u8) -> Result<RawTable> {
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_truncate_ragged_lines(true),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series().cast(&DataType::String)?;
        let values: Vec<Option<String>> = series
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        columns.push(values);
    }
    let mut lines = transpose(columns, df.height()).into_iter();

    let Some(header) = lines.next() else {
        return Err(Error::parse(path, "table has no header row"));
    };
    let headers: Vec<ColumnHeader> = header
        .into_iter()
        .enumerate()
        .skip(1)
        .map(|(i, name)| match name {
            Some(name) => ColumnHeader::parse(&name),
            None => ColumnHeader::Flat(format!("column_{i}")),
        })
        .collect();

    let mut index = Vec::new();
    let mut rows = Vec::new();
    for line in lines {
        let mut values = line.into_iter();
        index.push(values.next().flatten().unwrap_or_default());
        rows.push(values.map(|v| v.map_or(Cell::Missing, Cell::Text)).collect());
    }
    Ok(RawTable::new(index, headers, rows))
}

fn read_parquet(path: &Path) -> Result<RawTable> {
    let df = ParquetReader::new(File::open(path)?).finish()?;

    let mut index = None;
    let mut headers = Vec::new();
    let mut columns = Vec::new();
    for column in df.get_columns() {
        let cells = column_cells(column)?;
        if column.name().as_str() == PANDAS_INDEX_COLUMN {
            index = Some(
                cells
                    .iter()
                    .map(|cell| cell.as_text().unwrap_or_default())
                    .collect(),
            );
        } else {
            headers.push(ColumnHeader::parse(column.name().as_str()));
            columns.push(cells);
        }
    }

    let height = df.height();
    let index = index.unwrap_or_else(|| (0..height).map(|i| i.to_string()).collect());
    Ok(RawTable::new(index, headers, transpose(columns, height)))
}

/// Column-major to row-major.
fn transpose<T>(columns: Vec<Vec<T>>, height: usize) -> Vec<Vec<T>> {
    let mut rows: Vec<Vec<T>> = (0..height)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for values in columns {
        for (row, value) in rows.iter_mut().zip(values) {
            row.push(value);
        }
    }
    rows
}

fn column_cells(column: &Column) -> Result<Vec<Cell>> {
    let series = column.as_materialized_series();
    let dtype = series.dtype().clone();
    let cells = match dtype {
        DataType::Boolean => bool_cells(series)?,
        DataType::String => text_cells(series)?,
        dtype if dtype.is_integer() => int_cells(series)?,
        dtype if dtype.is_float() => float_cells(series)?,
        _ => text_cells(&series.cast(&DataType::String)?)?,
    };
    Ok(cells)
}

fn bool_cells(series: &Series) -> Result<Vec<Cell>> {
    let cells = series
        .bool()?
        .into_iter()
        .map(|v| v.map_or(Cell::Missing, Cell::Bool))
        .collect();
    Ok(cells)
}

fn int_cells(series: &Series) -> Result<Vec<Cell>> {
    let ints = series.cast(&DataType::Int64)?;
    let cells = ints
        .i64()?
        .into_iter()
        .map(|v| v.map_or(Cell::Missing, Cell::Int))
        .collect();
    Ok(cells)
}

fn float_cells(series: &Series) -> Result<Vec<Cell>> {
    let floats = series.cast(&DataType::Float64)?;
    let cells = floats
        .f64()?
        .into_iter()
        .map(|v| v.map_or(Cell::Missing, Cell::Float))
        .collect();
    Ok(cells)
}

fn text_cells(series: &Series) -> Result<Vec<Cell>> {
    let cells = series
        .str()?
        .into_iter()
        .map(|v| v.map_or(Cell::Missing, Cell::text))
        .collect();
    Ok(cells)
}

fn has_metadata_rows(table: &RawTable) -> bool {
    table.row_position("protein").is_some() && table.row_position("interaction").is_some()
}

/// Rebuild column names as `PROTEIN.INTERACTION` from the metadata rows, then drop
/// every metadata row.
fn reconstruct_metadata_header(table: RawTable) -> RawTable {
    let (Some(protein_row), Some(interaction_row)) = (
        table.row_position("protein"),
        table.row_position("interaction"),
    ) else {
        return table;
    };

    let headers: Vec<ColumnHeader> = (0..table.width())
        .map(|i| {
            let protein = table.cell(protein_row, i).as_text().unwrap_or_default();
            let interaction = table.cell(interaction_row, i).as_text().unwrap_or_default();
            match (protein.is_empty(), interaction.is_empty()) {
                (false, false) => ColumnHeader::Flat(format!("{protein}.{interaction}")),
                (false, true) => ColumnHeader::Flat(protein),
                (true, _) => table.headers[i].clone(),
            }
        })
        .collect();
    info!(
        "Rebuilt {} column names from protein/interaction rows",
        headers.len()
    );

    let (index, rows): (Vec<String>, Vec<Vec<Cell>>) = table
        .index
        .into_iter()
        .zip(table.rows)
        .filter(|(label, _)| !METADATA_ROWS.contains(&label.as_str()))
        .unzip();
    debug!("Kept observation rows: {}", index.iter().join(", "));

    RawTable::new(index, headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferritin_test_data::TestFile;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn flat_headers(table: &RawTable) -> Vec<String> {
        table.headers.iter().map(ColumnHeader::flatten).collect()
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(
            TableFormat::from_path(Path::new("fp.parquet")),
            TableFormat::Parquet
        );
        assert_eq!(TableFormat::from_path(Path::new("fp.PQ")), TableFormat::Parquet);
        assert_eq!(TableFormat::from_path(Path::new("fp.tsv")), TableFormat::Tsv);
        assert_eq!(TableFormat::from_path(Path::new("fp.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("fp")), TableFormat::Csv);
    }

    #[test]
    fn test_missing_file() {
        let err = load_table("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_plain_csv_uses_first_column_as_index() {
        let file = write_temp(
            ",PROTEIN.HIS51.HBDonor,PROTEIN.ASP75.Ionic\n0,True,\n1,0,1\n",
            ".csv",
        );
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.index, vec!["0", "1"]);
        assert_eq!(
            flat_headers(&table),
            vec!["PROTEIN.HIS51.HBDonor", "PROTEIN.ASP75.Ionic"]
        );
        assert_eq!(table.cell(0, 0), &Cell::text("True"));
        assert!(table.cell(0, 1).is_missing());
        assert_eq!(table.cell(1, 1), &Cell::text("1"));
    }

    #[test]
    fn test_tsv() {
        let file = write_temp("\tA.HBDonor\tA.Ionic\nmol\ttrue\tfalse\n", ".tsv");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.index, vec!["mol"]);
        assert_eq!(flat_headers(&table), vec!["A.HBDonor", "A.Ionic"]);
    }

    #[test]
    fn test_metadata_rows_rebuild_header() {
        let file = write_temp(
            ",c1,c2\n\
             ligand,LIG,LIG\n\
             protein,A,A\n\
             interaction,HBDonor,Ionic\n\
             Frame,,\n\
             frame0,True,False\n",
            ".csv",
        );
        let table = load_table(file.path()).unwrap();
        assert_eq!(flat_headers(&table), vec!["A.HBDonor", "A.Ionic"]);
        assert_eq!(table.index, vec!["frame0"]);
        assert_eq!(table.height(), 1);
        assert_eq!(table.cell(0, 0), &Cell::text("True"));
    }

    #[test]
    fn test_metadata_rows_placeholders() {
        let file = write_temp(
            "ligand,LIG,LIG,LIG\n\
             protein,HIS51.A,TYR130.A,\n\
             interaction,nan,None,\n\
             0,1,0,1\n",
            ".csv",
        );
        let table = load_table(file.path()).unwrap();
        // empty protein value keeps the original header
        assert_eq!(flat_headers(&table), vec!["HIS51.A", "TYR130.A", "LIG"]);
        assert_eq!(table.index, vec!["0"]);
    }

    #[test]
    fn test_resolved_fixture() {
        let (path, _tmp) = TestFile::resolved_frames().create_temp().unwrap();
        let table = load_table(path).unwrap();
        assert_eq!(
            flat_headers(&table),
            vec![
                "HIS51.A.HBDonor",
                "ASP75.A.HBAcceptor",
                "TYR130.A.Hydrophobic",
                "SER81.A.Ionic"
            ]
        );
        assert_eq!(table.index, vec!["0", "1"]);
    }

    #[test]
    fn test_parquet_with_pandas_index_and_tuple_headers() {
        let mut df = df!(
            "__index_level_0__" => ["frame0", "frame1"],
            "('LIG', 'HIS51.A', 'HBDonor')" => [true, false],
            "('LIG', 'ASP75.A', 'Ionic')" => [0i64, 1],
        )
        .unwrap();
        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        ParquetWriter::new(file.reopen().unwrap())
            .finish(&mut df)
            .unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.index, vec!["frame0", "frame1"]);
        assert_eq!(
            flat_headers(&table),
            vec!["LIG.HIS51.A.HBDonor", "LIG.ASP75.A.Ionic"]
        );
        assert_eq!(table.cell(0, 0), &Cell::Bool(true));
        assert_eq!(table.cell(1, 1), &Cell::Int(1));
    }
}
