//! Immutable, tract-indexed tables loaded from CSV.
//!
//! RULE: A table is built once and never mutated afterwards.
//! Everything downstream holds it behind a shared reference (usually an
//! `Arc<TractTable>`), so no locking is ever needed.
//!
//! Rows are kept in file order. A `HashMap` from tract id to row position
//! gives O(1) keyed lookup.

use crate::{
    error::{DashError, DashResult},
    types::TractId,
};
use serde::Serialize;
use std::{collections::HashMap, fs::File, io::Read, path::Path};

/// Cell texts read as an explicit missing value (the pandas default NA set).
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null",
];

/// Numeric cells are rounded to this many decimal places at load,
/// half to even.
pub const ROUND_DECIMALS: i32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || MISSING_MARKERS.contains(&raw) {
            return Cell::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_nan() => Cell::Missing,
            Ok(v)  => Cell::Number(round_to(v, ROUND_DECIMALS)),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[derive(Debug, Clone)]
pub struct TractTable {
    name:      String,
    id_column: String,
    columns:   Vec<String>,
    positions: HashMap<String, usize>,
    ids:       Vec<TractId>,
    rows:      Vec<Vec<Cell>>,
    index:     HashMap<TractId, usize>,
}

impl TractTable {
    /// Load a table from a CSV file with a header row.
    pub fn load(name: &str, id_column: &str, path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DashError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(name, id_column, file)?;
        log::info!(
            "loaded table '{name}' from {}: {} tracts, {} columns",
            path.display(),
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Parse CSV from any reader. Ragged rows are rejected by the CSV
    /// reader; duplicate tract ids are rejected here.
    pub fn from_reader<R: Read>(name: &str, id_column: &str, reader: R) -> DashResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let id_pos = columns
            .iter()
            .position(|c| c == id_column)
            .ok_or_else(|| DashError::MissingColumn {
                table:  name.to_string(),
                column: id_column.to_string(),
            })?;

        let mut ids = Vec::new();
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let row: Vec<Cell> = record
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    if i == id_pos {
                        Cell::Text(raw.to_string())
                    } else {
                        Cell::parse(raw)
                    }
                })
                .collect();
            ids.push(TractId::new(record.get(id_pos).unwrap_or_default()));
            rows.push(row);
        }

        Self::from_parts(name, id_column, columns, ids, rows)
    }

    fn from_parts(
        name: &str,
        id_column: &str,
        columns: Vec<String>,
        ids: Vec<TractId>,
        rows: Vec<Vec<Cell>>,
    ) -> DashResult<Self> {
        let mut index = HashMap::with_capacity(ids.len());
        for (pos, id) in ids.iter().enumerate() {
            if index.insert(id.clone(), pos).is_some() {
                return Err(DashError::DuplicateTract {
                    table:    name.to_string(),
                    tract_id: id.clone(),
                });
            }
        }
        let positions = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Ok(Self {
            name: name.to_string(),
            id_column: id_column.to_string(),
            columns,
            positions,
            ids,
            rows,
            index,
        })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn id_column(&self) -> &str { &self.id_column }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn has_column(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Tract ids in file order.
    pub fn tract_ids(&self) -> &[TractId] { &self.ids }

    pub fn contains(&self, tract: &TractId) -> bool {
        self.index.contains_key(tract)
    }

    fn row_of(&self, tract: &TractId) -> DashResult<&[Cell]> {
        self.index
            .get(tract)
            .map(|&pos| self.rows[pos].as_slice())
            .ok_or_else(|| DashError::UnknownTract { tract_id: tract.clone() })
    }

    fn position_of(&self, column: &str) -> DashResult<usize> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| DashError::MissingColumn {
                table:  self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn cell(&self, tract: &TractId, column: &str) -> DashResult<&Cell> {
        let pos = self.position_of(column)?;
        let row = self.row_of(tract)?;
        Ok(&row[pos])
    }

    /// Numeric value of one cell. `None` means the cell is explicitly
    /// missing; a text cell is an error.
    pub fn number(&self, tract: &TractId, column: &str) -> DashResult<Option<f64>> {
        match self.cell(tract, column)? {
            Cell::Number(v) => Ok(Some(*v)),
            Cell::Missing   => Ok(None),
            Cell::Text(s)   => Err(DashError::InvalidMetricValue {
                column:   column.to_string(),
                tract_id: tract.clone(),
                value:    s.clone(),
            }),
        }
    }

    /// Every value of a column in row order; non-numeric cells are `None`.
    pub fn numeric_column(&self, column: &str) -> DashResult<Vec<Option<f64>>> {
        let pos = self.position_of(column)?;
        Ok(self.rows.iter().map(|row| row[pos].as_f64()).collect())
    }

    /// Fails on the first text cell in the column. Used to check that a
    /// metric column holds only numbers or missing markers.
    pub fn ensure_numeric(&self, column: &str) -> DashResult<()> {
        let pos = self.position_of(column)?;
        for (id, row) in self.ids.iter().zip(&self.rows) {
            if let Cell::Text(s) = &row[pos] {
                return Err(DashError::InvalidMetricValue {
                    column:   column.to_string(),
                    tract_id: id.clone(),
                    value:    s.clone(),
                });
            }
        }
        Ok(())
    }

    /// Sum of a column. Missing and text cells are skipped.
    pub fn column_sum(&self, column: &str) -> DashResult<f64> {
        Ok(self.numeric_column(column)?.into_iter().flatten().sum())
    }

    /// Sum over several columns, i.e. the grand total of the block.
    pub fn columns_sum<S: AsRef<str>>(&self, columns: &[S]) -> DashResult<f64> {
        columns
            .iter()
            .map(|c| self.column_sum(c.as_ref()))
            .sum()
    }

    /// A new table holding only the rows whose `column` text equals `value`.
    pub fn filter_eq(&self, column: &str, value: &str) -> DashResult<TractTable> {
        let pos = self.position_of(column)?;
        let (ids, rows): (Vec<_>, Vec<_>) = self
            .ids
            .iter()
            .zip(&self.rows)
            .filter(|(_, row)| row[pos].as_text() == Some(value))
            .map(|(id, row)| (id.clone(), row.clone()))
            .unzip();
        Self::from_parts(
            &format!("{}[{column}={value}]", self.name),
            &self.id_column,
            self.columns.clone(),
            ids,
            rows,
        )
    }
}
