//! The metadata table: one row per data sheet, naming the sheet, its shape
//! and where it lands in the output document.

use crate::error::{GrilleError, MetaIssue};
use crate::path::CollectionPath;
use grille_io::SheetRow;
use std::fmt;
use std::str::FromStr;

pub const NAME_COLUMN: &str = "name";
pub const FORMAT_COLUMN: &str = "format";
pub const COLLECTION_COLUMN: &str = "collection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    /// Ordered list of records.
    Array,
    /// Object keyed by each record's `id`.
    Hash,
    /// Flat `key -> value` object, merged into its path.
    KeyValue,
}

impl SheetFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SheetFormat::Array => "array",
            SheetFormat::Hash => "hash",
            SheetFormat::KeyValue => "keyvalue",
        }
    }
}

impl FromStr for SheetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "array" => Ok(SheetFormat::Array),
            "hash" => Ok(SheetFormat::Hash),
            "keyvalue" => Ok(SheetFormat::KeyValue),
            other => Err(format!("unknown format `{other}`")),
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEntry {
    pub name: String,
    pub format: SheetFormat,
    pub collection: CollectionPath,
}

/// Parsed metadata table, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTable {
    pub entries: Vec<MetaEntry>,
}

impl MetaTable {
    /// Parse the rows of the metadata sheet.
    ///
    /// Every row is checked before anything is returned, so one
    /// `InvalidMetadata` error reports all the problems in the table.
    pub fn from_rows(rows: &[SheetRow]) -> Result<Self, GrilleError> {
        let mut entries = Vec::with_capacity(rows.len());
        let mut issues = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row = row.clone().without_empty_columns();
            let name = required(&row, idx, NAME_COLUMN, &mut issues);
            let format = required(&row, idx, FORMAT_COLUMN, &mut issues).and_then(|raw| {
                raw.parse::<SheetFormat>()
                    .map_err(|msg| issues.push(MetaIssue::new(idx, FORMAT_COLUMN, msg)))
                    .ok()
            });
            let collection =
                required(&row, idx, COLLECTION_COLUMN, &mut issues).and_then(|raw| {
                    raw.parse::<CollectionPath>()
                        .map_err(|err| {
                            issues.push(MetaIssue::new(idx, COLLECTION_COLUMN, err.to_string()))
                        })
                        .ok()
                });

            if let (Some(name), Some(format), Some(collection)) = (name, format, collection) {
                entries.push(MetaEntry {
                    name,
                    format,
                    collection,
                });
            }
        }

        if issues.is_empty() {
            Ok(Self { entries })
        } else {
            Err(GrilleError::InvalidMetadata { issues })
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaEntry> {
        self.entries.iter()
    }
}

fn required(
    row: &SheetRow,
    idx: usize,
    column: &str,
    issues: &mut Vec<MetaIssue>,
) -> Option<String> {
    let value = row.value(column);
    if value.is_blank() {
        issues.push(MetaIssue::new(idx, column, "missing"));
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grille_common::CellValue;

    fn row(name: &str, format: &str, collection: &str) -> SheetRow {
        [
            ("name", CellValue::from(name)),
            ("format", CellValue::from(format)),
            ("collection", CellValue::from(collection)),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_absent() && !v.to_string().is_empty())
        .collect()
    }

    #[test]
    fn rows_parse_in_order() {
        let table = MetaTable::from_rows(&[
            row("weapons", "array", "items.weapons"),
            row("armor", " hash ", "items.armor"),
            row("consts", "keyvalue", "constants"),
        ])
        .unwrap();
        let summary: Vec<_> = table
            .iter()
            .map(|e| (e.name.as_str(), e.format, e.collection.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("weapons", SheetFormat::Array, "items.weapons".to_string()),
                ("armor", SheetFormat::Hash, "items.armor".to_string()),
                ("consts", SheetFormat::KeyValue, "constants".to_string()),
            ]
        );
    }

    #[test]
    fn synthetic_columns_are_ignored() {
        let mut r = row("a", "array", "a");
        r.push("__EMPTY", "designer notes");
        let table = MetaTable::from_rows(&[r]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn numeric_sheet_names_are_rendered_as_text() {
        let r: SheetRow = [
            ("name", CellValue::from(2024.0)),
            ("format", "array".into()),
            ("collection", "years".into()),
        ]
        .into_iter()
        .collect();
        let table = MetaTable::from_rows(&[r]).unwrap();
        assert_eq!(table.entries[0].name, "2024");
    }

    #[test]
    fn sheet_names_keep_surrounding_spaces() {
        let table =
            MetaTable::from_rows(&[row(" weapons ", " array ", " items.weapons ")]).unwrap();
        let entry = &table.entries[0];
        assert_eq!(entry.name, " weapons ");
        assert_eq!(entry.format, SheetFormat::Array);
        assert_eq!(entry.collection.to_string(), "items.weapons");
    }

    #[test]
    fn all_issues_are_reported_together() {
        let err = MetaTable::from_rows(&[
            row("ok", "array", "ok"),
            row("bad", "list", "a..b"),
            row("", "hash", ""),
        ])
        .unwrap_err();
        let issues: Vec<_> = err
            .issues()
            .iter()
            .map(|i| (i.row, i.field.as_str()))
            .collect();
        assert_eq!(
            issues,
            vec![
                (1, "format"),
                (1, "collection"),
                (2, "name"),
                (2, "collection"),
            ]
        );
    }

    #[test]
    fn empty_table_is_valid() {
        assert!(MetaTable::from_rows(&[]).unwrap().is_empty());
    }
}
