//! Turn the rows of one data sheet into the value placed in the document.

use crate::coerce::coerce;
use crate::convert::convert_rows;
use crate::error::GrilleError;
use crate::meta::{MetaEntry, SheetFormat};
use crate::options::DuplicateIdPolicy;
use crate::{Document, Record};
use grille_common::number_to_json;
use grille_io::{SheetRow, is_empty_column};
use serde_json::Value as JsonValue;

pub const ID_FIELD: &str = "id";
pub const KEY_COLUMN: &str = "key";
pub const TYPE_COLUMN: &str = "type";
pub const VALUE_COLUMN: &str = "value";

/// A shaped sheet, tagged with how it is written into the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    /// Replaces whatever sits at the collection path.
    Replace(JsonValue),
    /// Shallow-merged into the object at the collection path.
    Merge(Document),
}

/// Shape `rows` according to `entry.format`. `rows` must not be empty.
pub fn shape_sheet(
    entry: &MetaEntry,
    rows: &[SheetRow],
    duplicate_ids: DuplicateIdPolicy,
) -> Result<Shaped, GrilleError> {
    let sheet = entry.name.as_str();
    match entry.format {
        SheetFormat::KeyValue => shape_keyvalue(sheet, rows).map(Shaped::Merge),
        format => {
            let Some((type_map, data)) = rows.split_first() else {
                return Err(GrilleError::SheetMissingOrEmpty {
                    sheet: sheet.to_string(),
                });
            };
            let header = header_of(type_map);
            let records = convert_rows(sheet, &header, type_map, data)?;
            if format == SheetFormat::Hash {
                shape_hash(sheet, records, duplicate_ids)
                    .map(|map| Shaped::Replace(JsonValue::Object(map)))
            } else {
                Ok(Shaped::Replace(shape_array(records)))
            }
        }
    }
}

/// Column names of a sheet, read off its first row.
pub fn header_of(first: &SheetRow) -> Vec<String> {
    first
        .keys()
        .filter(|name| !is_empty_column(name))
        .map(str::to_string)
        .collect()
}

pub fn shape_array(records: Vec<Record>) -> JsonValue {
    JsonValue::Array(records.into_iter().map(JsonValue::Object).collect())
}

/// Key records by their `id`, in row order.
pub fn shape_hash(
    sheet: &str,
    records: Vec<Record>,
    duplicate_ids: DuplicateIdPolicy,
) -> Result<Document, GrilleError> {
    let mut out = Document::new();
    for (row, record) in records.into_iter().enumerate() {
        let Some(id) = record.get(ID_FIELD).and_then(id_key) else {
            return Err(GrilleError::MissingIdField {
                sheet: sheet.to_string(),
                row,
            });
        };
        if duplicate_ids == DuplicateIdPolicy::Reject && out.contains_key(&id) {
            return Err(GrilleError::DuplicateId {
                sheet: sheet.to_string(),
                id,
                row,
            });
        }
        out.insert(id, JsonValue::Object(record));
    }
    Ok(out)
}

/// Map key for an `id` value. Strings are used as-is, numbers and booleans
/// by their JSON rendering; anything else has no usable key. Whole floats
/// render without a fraction, so a `float` id of `1` is keyed `"1"`.
pub fn id_key(id: &JsonValue) -> Option<String> {
    match id {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => number_to_json(f).to_string(),
            _ => n.to_string(),
        }),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

/// Coerce each `key`/`type`/`value` row on its own.
pub fn shape_keyvalue(sheet: &str, rows: &[SheetRow]) -> Result<Document, GrilleError> {
    let mut out = Document::new();
    for (row, cells) in rows.iter().enumerate() {
        let key_cell = cells.value(KEY_COLUMN);
        if key_cell.is_blank() {
            return Err(GrilleError::MissingKey {
                sheet: sheet.to_string(),
                row,
            });
        }
        let key = key_cell.to_string().trim().to_string();
        let tag = cells.value(TYPE_COLUMN).to_string();
        let value = coerce(
            &format!("{sheet}:{key}"),
            tag.trim(),
            row,
            &cells.value(VALUE_COLUMN),
        )?;
        out.insert(key, value);
    }
    Ok(out)
}
