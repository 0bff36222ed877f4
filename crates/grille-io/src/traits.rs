use grille_common::CellValue;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Fully materialized sheet contents.
///
/// Only cells that hold a value are stored; coordinates are 1-based
/// `(row, col)` like the A1 grid.
#[derive(Clone, Debug, Default)]
pub struct SheetData {
    pub cells: BTreeMap<(u32, u32), CellValue>,
}

impl SheetData {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Smallest rectangle `(min_row, min_col, max_row, max_col)` covering every
    /// stored cell.
    pub fn used_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut keys = self.cells.keys();
        let &(r0, c0) = keys.next()?;
        Some(keys.fold((r0, c0, r0, c0), |(r0, c0, r1, c1), &(r, c)| {
            (r0.min(r), c0.min(c), r1.max(r), c1.max(c))
        }))
    }
}

/// Read-only access to a workbook, one sheet at a time.
pub trait SpreadsheetReader: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Result<Vec<String>, Self::Error>;

    fn has_sheet(&self, sheet: &str) -> Result<bool, Self::Error> {
        Ok(self.sheet_names()?.iter().any(|name| name == sheet))
    }

    /// Constructor variants for different environments
    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error>;
}
