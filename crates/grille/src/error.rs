use grille_common::CellValue;
use grille_io::IoError;
use std::fmt;
use thiserror::Error;

/// Why a single cell could not be coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionErrorKind {
    #[error("Unknown type tag")]
    UnknownTypeTag,
    #[error("Not a boolean")]
    NotABoolean,
    #[error("Not a number")]
    NotANumber,
    #[error("Unable to parse JSON ({message})")]
    JsonParseFailure { message: String },
    #[error("Data is not of type array")]
    NotAnArray,
    #[error("Not an array of integers")]
    NotAnArrayOfIntegers,
    #[error("Not an array of strings")]
    NotAnArrayOfStrings,
    #[error("Not an array of booleans")]
    NotAnArrayOfBooleans,
    #[error("Not an array of floats")]
    NotAnArrayOfFloats,
}

/// A cell that failed coercion, with enough context to find it in the sheet.
///
/// `label` is `<sheet>:<column>` (or `<sheet>:<key>` on key/value sheets),
/// `row` is the 0-based data row (the type-map row is not counted) and `raw`
/// is the offending value rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} [column={label} row={row} type={type_tag} data={raw}]")]
pub struct ConversionError {
    pub label: String,
    pub row: usize,
    pub type_tag: String,
    pub raw: String,
    pub kind: ConversionErrorKind,
}

impl ConversionError {
    pub fn new(
        label: impl Into<String>,
        type_tag: impl Into<String>,
        row: usize,
        raw: &CellValue,
        kind: ConversionErrorKind,
    ) -> Self {
        Self {
            label: label.into(),
            row,
            type_tag: type_tag.into(),
            raw: raw.to_json_text(),
            kind,
        }
    }
}

/// One problem found in the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaIssue {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl MetaIssue {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MetaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} `{}`: {}", self.row, self.field, self.message)
    }
}

fn join_issues(issues: &[MetaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum GrilleError {
    /// A sheet named by the metadata table (or the metadata sheet itself) is
    /// absent, or a data sheet holds no rows.
    #[error("sheet `{sheet}` is missing or empty")]
    SheetMissingOrEmpty { sheet: String },

    #[error("record {row} of sheet `{sheet}` has no `id` field")]
    MissingIdField { sheet: String, row: usize },

    #[error("duplicate id `{id}` at record {row} of sheet `{sheet}`")]
    DuplicateId { sheet: String, id: String, row: usize },

    #[error("row {row} of key/value sheet `{sheet}` has no `key`")]
    MissingKey { sheet: String, row: usize },

    #[error("invalid metadata table: {}", join_issues(.issues))]
    InvalidMetadata { issues: Vec<MetaIssue> },

    #[error("cannot write `{path}`: `{segment}` already holds a non-object value")]
    PathConflict { path: String, segment: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("workbook read failed: {0}")]
    Reader(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl GrilleError {
    pub(crate) fn reader(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        GrilleError::Reader(Box::new(err))
    }

    /// Metadata issues, when this is an `InvalidMetadata` error.
    pub fn issues(&self) -> &[MetaIssue] {
        match self {
            GrilleError::InvalidMetadata { issues } => issues,
            _ => &[],
        }
    }
}

impl From<IoError> for GrilleError {
    fn from(err: IoError) -> Self {
        GrilleError::reader(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_locates_the_cell() {
        let err = ConversionError::new(
            "items:flag",
            "boolean",
            2,
            &CellValue::from("yes"),
            ConversionErrorKind::NotABoolean,
        );
        insta::assert_snapshot!(
            err.to_string(),
            @r#"Not a boolean [column=items:flag row=2 type=boolean data="yes"]"#
        );
    }

    #[test]
    fn metadata_issues_are_joined() {
        let err = GrilleError::InvalidMetadata {
            issues: vec![
                MetaIssue::new(0, "format", "unknown format `list`"),
                MetaIssue::new(3, "name", "missing"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid metadata table: row 0 `format`: unknown format `list`; row 3 `name`: missing"
        );
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn io_errors_become_reader_errors() {
        let err: GrilleError = IoError::SheetNotFound("x".into()).into();
        assert_eq!(err.to_string(), "workbook read failed: sheet `x` not found");
    }
}
