//! Row conversion for `array` and `hash` sheets.

use crate::Record;
use crate::coerce::coerce;
use crate::error::ConversionError;
use grille_io::SheetRow;

/// Type tag declared for `column` in the type-map row.
///
/// A column with no entry yields an empty tag, which coercion reports as
/// unknown.
pub fn column_type(type_map: &SheetRow, column: &str) -> String {
    type_map.value(column).to_string().trim().to_string()
}

/// Coerce every header column of every row.
///
/// `rows` are the data rows that follow the type-map row; the index passed
/// to coercion counts from 0 over those rows. Cells under columns that are
/// not part of `header` are dropped.
pub fn convert_rows(
    sheet: &str,
    header: &[String],
    type_map: &SheetRow,
    rows: &[SheetRow],
) -> Result<Vec<Record>, ConversionError> {
    let tags: Vec<(String, String)> = header
        .iter()
        .map(|column| (format!("{sheet}:{column}"), column_type(type_map, column)))
        .collect();

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut record = Record::new();
            for (column, (label, tag)) in header.iter().zip(&tags) {
                let value = coerce(label, tag, idx, &row.value(column))?;
                record.insert(column.clone(), value);
            }
            Ok(record)
        })
        .collect()
}
