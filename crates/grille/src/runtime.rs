use crate::Document;
use crate::error::GrilleError;
use crate::meta::{MetaEntry, MetaTable};
use crate::options::GrilleOptions;
use crate::shape::{Shaped, shape_sheet};
use grille_io::{SheetRow, SpreadsheetReader, sheet_to_rows};

/// Pairs a workbook reader with conversion options.
pub struct Grille<R: SpreadsheetReader> {
    reader: R,
    options: GrilleOptions,
}

impl<R: SpreadsheetReader> Grille<R> {
    /// Converter reading its metadata from the `meta` sheet.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, GrilleOptions::default())
    }

    pub fn with_options(reader: R, options: GrilleOptions) -> Self {
        Self { reader, options }
    }

    /// Immutable access to the underlying reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Mutable access to the underlying reader.
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn options(&self) -> &GrilleOptions {
        &self.options
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    /// Read and validate the metadata table without converting anything.
    pub fn metadata(&mut self) -> Result<MetaTable, GrilleError> {
        read_metadata(&mut self.reader, &self.options.meta_sheet)
    }

    /// Convert the whole workbook into one document.
    ///
    /// Sheets are processed in metadata order and the first failure aborts
    /// the conversion; no partial document is returned.
    pub fn process(&mut self) -> Result<Document, GrilleError> {
        process_with(&mut self.reader, &self.options)
    }
}

/// Convert a workbook using the metadata table on `meta_sheet`.
pub fn process_workbook<R: SpreadsheetReader>(
    reader: &mut R,
    meta_sheet: &str,
) -> Result<Document, GrilleError> {
    process_with(reader, &GrilleOptions::default().meta_sheet(meta_sheet))
}

/// Convert a borrowed workbook with explicit options.
pub fn process_with<R: SpreadsheetReader>(
    reader: &mut R,
    options: &GrilleOptions,
) -> Result<Document, GrilleError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("grille_process", meta_sheet = %options.meta_sheet).entered();

    let table = read_metadata(reader, &options.meta_sheet)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(sheets = table.len(), "metadata table read");

    let mut doc = Document::new();
    for entry in table.iter() {
        process_entry(reader, entry, options, &mut doc)?;
    }
    Ok(doc)
}

fn read_metadata<R: SpreadsheetReader>(
    reader: &mut R,
    meta_sheet: &str,
) -> Result<MetaTable, GrilleError> {
    let rows = read_rows(reader, meta_sheet)?;
    MetaTable::from_rows(&rows)
}

fn process_entry<R: SpreadsheetReader>(
    reader: &mut R,
    entry: &MetaEntry,
    options: &GrilleOptions,
    doc: &mut Document,
) -> Result<(), GrilleError> {
    let rows = read_rows(reader, &entry.name)?;
    if rows.is_empty() {
        return Err(GrilleError::SheetMissingOrEmpty {
            sheet: entry.name.clone(),
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        sheet = %entry.name,
        format = %entry.format,
        collection = %entry.collection,
        rows = rows.len(),
        "processing sheet"
    );

    match shape_sheet(entry, &rows, options.duplicate_ids)? {
        Shaped::Replace(value) => entry.collection.set(doc, value),
        Shaped::Merge(entries) => entry.collection.merge(doc, entries),
    }
}

/// Rows of `sheet`, treating an absent sheet as missing.
fn read_rows<R: SpreadsheetReader>(
    reader: &mut R,
    sheet: &str,
) -> Result<Vec<SheetRow>, GrilleError> {
    if !reader.has_sheet(sheet).map_err(GrilleError::reader)? {
        return Err(GrilleError::SheetMissingOrEmpty {
            sheet: sheet.to_string(),
        });
    }
    let data = reader.read_sheet(sheet).map_err(GrilleError::reader)?;
    Ok(sheet_to_rows(&data))
}

/// Open a workbook file with calamine and convert it.
#[cfg(feature = "calamine")]
pub fn xlsx_to_json<P: AsRef<std::path::Path>>(path: P) -> Result<Document, GrilleError> {
    xlsx_to_json_with(path, GrilleOptions::default())
}

#[cfg(feature = "calamine")]
pub fn xlsx_to_json_with<P: AsRef<std::path::Path>>(
    path: P,
    options: GrilleOptions,
) -> Result<Document, GrilleError> {
    use grille_io::CalamineAdapter;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.as_ref().display(), "opening workbook");

    let reader = CalamineAdapter::open_path(path)?;
    Grille::with_options(reader, options).process()
}
