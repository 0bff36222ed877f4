pub mod backends;
pub mod error;
pub mod rows;
pub mod traits;

#[cfg(feature = "calamine")]
pub use backends::CalamineAdapter;
#[cfg(feature = "json")]
pub use backends::JsonAdapter;
pub use error::IoError;
pub use rows::{EMPTY_COLUMN_PREFIX, SheetRow, is_empty_column, sheet_to_rows};
pub use traits::{SheetData, SpreadsheetReader};

// Re-export for convenience
pub use grille_common::CellValue;
