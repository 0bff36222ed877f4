use crate::IoError;
use crate::traits::{SheetData, SpreadsheetReader};
use grille_common::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct JsonWorkbook {
    #[serde(default = "default_version")]
    version: u32,
    /// Sheet order as it should be reported; names missing here follow in
    /// key order.
    #[serde(default)]
    order: Vec<String>,
    #[serde(default)]
    sheets: BTreeMap<String, JsonSheet>,
}

fn default_version() -> u32 {
    1
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct JsonSheet {
    #[serde(default)]
    cells: Vec<JsonCell>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct JsonCell {
    row: u32,
    col: u32,
    #[serde(default)]
    value: Option<JsonCellValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type", content = "value")]
enum JsonCellValue {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Empty,
}

/// Workbook stored as JSON, or built in memory.
///
/// The on-disk shape is
/// `{"version":1,"sheets":{"meta":{"cells":[{"row":1,"col":1,"value":{"type":"Text","value":"name"}}]}}}`.
pub struct JsonAdapter {
    data: JsonWorkbook,
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonAdapter {
    pub fn new() -> Self {
        Self {
            data: JsonWorkbook {
                version: default_version(),
                ..JsonWorkbook::default()
            },
        }
    }

    fn with_data(data: JsonWorkbook) -> Self {
        Self { data }
    }

    fn to_sheet_data(js: &JsonSheet) -> SheetData {
        let mut cells: BTreeMap<(u32, u32), CellValue> = BTreeMap::new();
        for c in &js.cells {
            let value = c.value.as_ref().map(json_to_cell).unwrap_or_default();
            if !value.is_absent() {
                cells.insert((c.row, c.col), value);
            }
        }
        SheetData { cells }
    }

    fn ensure_sheet_mut(&mut self, name: &str) -> &mut JsonSheet {
        if !self.data.sheets.contains_key(name) {
            self.data.order.push(name.to_string());
        }
        self.data.sheets.entry(name.to_string()).or_default()
    }

    /// Register an empty sheet.
    pub fn add_sheet(&mut self, name: &str) {
        self.ensure_sheet_mut(name);
    }

    /// Place a value at a 1-based `(row, col)`, replacing what was there.
    pub fn set_cell(&mut self, sheet: &str, row: u32, col: u32, value: impl Into<CellValue>) {
        let value = cell_to_json(&value.into());
        let js = self.ensure_sheet_mut(sheet);
        if let Some(cell) = js.cells.iter_mut().find(|c| c.row == row && c.col == col) {
            cell.value = Some(value);
        } else {
            js.cells.push(JsonCell {
                row,
                col,
                value: Some(value),
            });
        }
    }

    /// Append a row below the last occupied row, starting at column A.
    pub fn push_row<I, V>(&mut self, sheet: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let next_row = self
            .ensure_sheet_mut(sheet)
            .cells
            .iter()
            .map(|c| c.row)
            .max()
            .unwrap_or(0)
            + 1;
        for (idx, value) in values.into_iter().enumerate() {
            let value = value.into();
            if !value.is_absent() {
                self.set_cell(sheet, next_row, idx as u32 + 1, value);
            }
        }
    }

    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }
}

impl SpreadsheetReader for JsonAdapter {
    type Error = IoError;

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        let mut names: Vec<String> = self
            .data
            .order
            .iter()
            .filter(|name| self.data.sheets.contains_key(*name))
            .cloned()
            .collect();
        for name in self.data.sheets.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    fn has_sheet(&self, sheet: &str) -> Result<bool, Self::Error> {
        Ok(self.data.sheets.contains_key(sheet))
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let data: JsonWorkbook = serde_json::from_reader(reader)?;
        Ok(JsonAdapter::with_data(data))
    }

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let data: JsonWorkbook = serde_json::from_reader(reader)?;
        Ok(JsonAdapter::with_data(data))
    }

    fn open_bytes(bytes: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let data: JsonWorkbook = serde_json::from_slice(&bytes)?;
        Ok(JsonAdapter::with_data(data))
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        self.data
            .sheets
            .get(sheet)
            .map(Self::to_sheet_data)
            .ok_or_else(|| IoError::SheetNotFound(sheet.to_string()))
    }
}

fn cell_to_json(v: &CellValue) -> JsonCellValue {
    match v {
        CellValue::Absent => JsonCellValue::Empty,
        CellValue::Text(s) => JsonCellValue::Text(s.clone()),
        CellValue::Number(n) => JsonCellValue::Number(*n),
        CellValue::Boolean(b) => JsonCellValue::Boolean(*b),
    }
}

fn json_to_cell(v: &JsonCellValue) -> CellValue {
    match v {
        JsonCellValue::Int(i) => CellValue::Number(*i as f64),
        JsonCellValue::Number(n) => CellValue::Number(*n),
        JsonCellValue::Text(s) if s.is_empty() => CellValue::Absent,
        JsonCellValue::Text(s) => CellValue::Text(s.clone()),
        JsonCellValue::Boolean(b) => CellValue::Boolean(*b),
        JsonCellValue::Empty => CellValue::Absent,
    }
}
