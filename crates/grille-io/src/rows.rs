//! Materialize a sheet as ordered rows of named cells.
//!
//! The first occupied row of a sheet is its header. Every later row becomes a
//! [`SheetRow`] mapping header names to the values found under them. Header
//! cells that are blank get a synthetic name starting with
//! [`EMPTY_COLUMN_PREFIX`], and repeated names get `_1`, `_2`, ... suffixes, so
//! header names within one sheet are always unique.

use crate::traits::SheetData;
use grille_common::CellValue;
use std::collections::HashMap;

/// Prefix of the synthetic names given to blank header cells.
pub const EMPTY_COLUMN_PREFIX: &str = "__EMPTY";

/// True for header names synthesized for blank header cells.
pub fn is_empty_column(name: &str) -> bool {
    name.starts_with(EMPTY_COLUMN_PREFIX)
}

/// One data row: `(header, value)` pairs in column order.
///
/// Only cells that hold a value are present; a column with nothing in this
/// row is simply missing and reads back as [`CellValue::Absent`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetRow {
    cells: Vec<(String, CellValue)>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((header.into(), value.into()));
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value)
    }

    /// Value under `header`, or `Absent` when the row has no such cell.
    pub fn value(&self, header: &str) -> CellValue {
        self.get(header).cloned().unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drop cells that sit under synthetic empty-column headers.
    pub fn without_empty_columns(mut self) -> Self {
        self.cells.retain(|(name, _)| !is_empty_column(name));
        self
    }
}

impl<K, V> FromIterator<(K, V)> for SheetRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = SheetRow::new();
        for (header, value) in iter {
            row.push(header, value);
        }
        row
    }
}

/// Convert sheet cells into header-keyed rows.
pub fn sheet_to_rows(data: &SheetData) -> Vec<SheetRow> {
    let Some((first_row, first_col, last_row, last_col)) = data.used_bounds() else {
        return Vec::new();
    };

    let headers = header_names(data, first_row, first_col, last_col);

    let mut rows = Vec::new();
    for row in (first_row + 1)..=last_row {
        let mut out = SheetRow::new();
        for (offset, header) in headers.iter().enumerate() {
            let col = first_col + offset as u32;
            if let Some(value) = data.get(row, col) {
                if !value.is_absent() {
                    out.push(header.clone(), value.clone());
                }
            }
        }
        if !out.is_empty() {
            rows.push(out);
        }
    }
    rows
}

fn header_names(data: &SheetData, row: u32, first_col: u32, last_col: u32) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity((last_col - first_col + 1) as usize);
    for col in first_col..=last_col {
        let base = match data.get(row, col) {
            Some(value) if !value.is_absent() && !value.to_string().is_empty() => {
                value.to_string()
            }
            _ => EMPTY_COLUMN_PREFIX.to_string(),
        };
        let name = match seen.get(&base).copied() {
            None => {
                seen.insert(base.clone(), 1);
                base
            }
            Some(mut counter) => {
                let mut candidate = format!("{base}_{counter}");
                counter += 1;
                while seen.contains_key(&candidate) {
                    candidate = format!("{base}_{counter}");
                    counter += 1;
                }
                seen.insert(base, counter);
                seen.insert(candidate.clone(), 1);
                candidate
            }
        };
        names.push(name);
    }
    names
}
