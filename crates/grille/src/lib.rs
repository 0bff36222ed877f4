//! Metadata-driven spreadsheet to JSON conversion.
//!
//! A workbook carries a metadata sheet (`meta` by default) with one row per
//! data sheet: the sheet `name`, its `format` (`array`, `hash` or
//! `keyvalue`) and the dotted `collection` path it is written to. `array` and
//! `hash` sheets start with a type-map row declaring a type tag per column;
//! `keyvalue` sheets carry a `type` per row instead.
//!
//! ```no_run
//! # #[cfg(feature = "json")]
//! # fn demo() -> Result<(), grille::GrilleError> {
//! use grille::{Grille, JsonAdapter};
//!
//! let mut wb = JsonAdapter::new();
//! wb.push_row("meta", ["name", "format", "collection"]);
//! wb.push_row("meta", ["consts", "keyvalue", "config.consts"]);
//! wb.push_row("consts", ["key", "type", "value"]);
//! wb.push_row("consts", ["SPEED", "float", "1.5"]);
//!
//! let doc = Grille::new(wb).process()?;
//! assert_eq!(doc["config"]["consts"]["SPEED"], 1.5);
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod convert;
pub mod error;
pub mod meta;
pub mod options;
pub mod path;
pub mod runtime;
pub mod shape;

pub use coerce::{ElementType, TypeTag, coerce, coerce_as};
pub use convert::convert_rows;
pub use error::{ConversionError, ConversionErrorKind, GrilleError, MetaIssue};
pub use meta::{MetaEntry, MetaTable, SheetFormat};
pub use options::{DEFAULT_META_SHEET, DuplicateIdPolicy, GrilleOptions};
pub use path::{CollectionPath, InvalidPath, merge_path, set_path};
pub use runtime::{Grille, process_with, process_workbook};
#[cfg(feature = "calamine")]
pub use runtime::{xlsx_to_json, xlsx_to_json_with};
pub use shape::{Shaped, shape_array, shape_hash, shape_keyvalue, shape_sheet};

pub use grille_common::CellValue;
#[cfg(feature = "calamine")]
pub use grille_io::CalamineAdapter;
#[cfg(feature = "json")]
pub use grille_io::JsonAdapter;
pub use grille_io::{SheetRow, SpreadsheetReader};

/// The output document: a JSON object whose keys keep insertion order.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// One converted row of an `array` or `hash` sheet.
pub type Record = serde_json::Map<String, serde_json::Value>;
