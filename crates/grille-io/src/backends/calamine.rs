#![cfg(feature = "calamine")]

use crate::error::IoError;
use crate::traits::{SheetData, SpreadsheetReader};
use grille_common::CellValue;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto_from_rs};

type Workbook = Sheets<Cursor<Vec<u8>>>;

/// Reads xlsx/xlsm/xlsb/xls/ods workbooks through calamine.
///
/// The whole file is buffered in memory; calamine then decodes one sheet per
/// `read_sheet` call.
pub struct CalamineAdapter {
    workbook: Mutex<Workbook>,
    cached_names: Vec<String>,
}

impl CalamineAdapter {
    fn from_bytes(data: Vec<u8>) -> Result<Self, IoError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(data))
            .map_err(|e| IoError::from_backend("calamine", e))?;
        let cached_names = workbook.sheet_names().to_vec();
        Ok(Self {
            workbook: Mutex::new(workbook),
            cached_names,
        })
    }

    fn convert_value(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Absent,
            // Empty strings are treated as no value
            Data::String(s) if s.is_empty() => CellValue::Absent,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::Error(e) => CellValue::Text(e.to_string()),
            // Dates keep their Excel serial number
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }

    fn range_to_cells(range: &Range<Data>) -> BTreeMap<(u32, u32), CellValue> {
        let mut cells = BTreeMap::new();
        let (start_row, start_col) = range.start().unwrap_or_default();

        for (row, col, val) in range.used_cells() {
            let value = Self::convert_value(val);
            if value.is_absent() {
                continue;
            }
            // Calamine uses 0-based offsets into the range, convert to 1-based sheet coordinates
            let excel_row = row as u32 + start_row + 1;
            let excel_col = col as u32 + start_col + 1;
            cells.insert((excel_row, excel_col), value);
        }

        cells
    }
}

impl SpreadsheetReader for CalamineAdapter {
    type Error = IoError;

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.cached_names.clone())
    }

    fn has_sheet(&self, sheet: &str) -> Result<bool, Self::Error> {
        Ok(self.cached_names.iter().any(|name| name == sheet))
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    fn open_reader(mut reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::from_bytes(data)
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("io_read_sheet", backend = "calamine", sheet).entered();

        if !self.has_sheet(sheet)? {
            return Err(IoError::SheetNotFound(sheet.to_string()));
        }

        let mut wb = self.workbook.lock();
        let range = wb
            .worksheet_range(sheet)
            .map_err(|e| IoError::from_backend("calamine", e))?;
        let cells = Self::range_to_cells(&range);

        #[cfg(feature = "tracing")]
        tracing::debug!(cells = cells.len(), "calamine sheet decoded");

        Ok(SheetData { cells })
    }
}
