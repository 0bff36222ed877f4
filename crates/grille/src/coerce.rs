//! Cell coercion: one raw cell plus a type tag in, one typed JSON value out.
//!
//! The tags form a closed set mirroring JSON's scalar and array primitives,
//! plus `json` for raw passthrough and `ignore` for annotation-only columns.
//! Blank cells coerce to the zero value of their type. Anything malformed is
//! rejected rather than silently patched up.

use crate::error::{ConversionError, ConversionErrorKind};
use grille_common::{CellValue, number_to_json};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Element constraint carried by the `array.*` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Integer,
    String,
    Boolean,
    Float,
}

impl ElementType {
    fn accepts(self, value: &JsonValue) -> bool {
        match self {
            ElementType::Integer => is_whole_number(value),
            ElementType::String => value.is_string(),
            ElementType::Boolean => value.is_boolean(),
            ElementType::Float => value.is_number(),
        }
    }

    fn mismatch(self) -> ConversionErrorKind {
        match self {
            ElementType::Integer => ConversionErrorKind::NotAnArrayOfIntegers,
            ElementType::String => ConversionErrorKind::NotAnArrayOfStrings,
            ElementType::Boolean => ConversionErrorKind::NotAnArrayOfBooleans,
            ElementType::Float => ConversionErrorKind::NotAnArrayOfFloats,
        }
    }
}

/// Recognized column type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Ignore,
    Integer,
    Float,
    String,
    Boolean,
    Array(Option<ElementType>),
    Json,
}

impl TypeTag {
    /// Parse a tag as written in a type-map row. Surrounding whitespace is
    /// ignored; the tag itself is case-sensitive.
    pub fn parse(tag: &str) -> Option<Self> {
        Some(match tag.trim() {
            "ignore" => TypeTag::Ignore,
            "integer" => TypeTag::Integer,
            "float" => TypeTag::Float,
            "string" => TypeTag::String,
            "boolean" => TypeTag::Boolean,
            "array" => TypeTag::Array(None),
            "array.integer" => TypeTag::Array(Some(ElementType::Integer)),
            "array.string" => TypeTag::Array(Some(ElementType::String)),
            "array.boolean" => TypeTag::Array(Some(ElementType::Boolean)),
            "array.float" => TypeTag::Array(Some(ElementType::Float)),
            "json" => TypeTag::Json,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Ignore => "ignore",
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Array(None) => "array",
            TypeTag::Array(Some(ElementType::Integer)) => "array.integer",
            TypeTag::Array(Some(ElementType::String)) => "array.string",
            TypeTag::Array(Some(ElementType::Boolean)) => "array.boolean",
            TypeTag::Array(Some(ElementType::Float)) => "array.float",
            TypeTag::Json => "json",
        }
    }

    /// Value produced for a blank cell.
    pub fn zero_value(self) -> JsonValue {
        match self {
            TypeTag::Ignore | TypeTag::String => JsonValue::String(String::new()),
            TypeTag::Integer => JsonValue::from(0),
            TypeTag::Float => JsonValue::from(0.0),
            TypeTag::Boolean => JsonValue::Bool(false),
            TypeTag::Array(_) => JsonValue::Array(Vec::new()),
            TypeTag::Json => JsonValue::Object(Map::new()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerce one cell, tagging any failure with its location.
pub fn coerce(
    label: &str,
    type_tag: &str,
    row: usize,
    raw: &CellValue,
) -> Result<JsonValue, ConversionError> {
    let fail = |kind| ConversionError::new(label, type_tag, row, raw, kind);
    let tag = TypeTag::parse(type_tag).ok_or_else(|| fail(ConversionErrorKind::UnknownTypeTag))?;
    coerce_as(tag, raw).map_err(fail)
}

/// Coerce one cell to an already-parsed tag.
pub fn coerce_as(tag: TypeTag, raw: &CellValue) -> Result<JsonValue, ConversionErrorKind> {
    match tag {
        TypeTag::Ignore => Ok(tag.zero_value()),
        _ if raw.is_blank() => Ok(tag.zero_value()),
        TypeTag::String => Ok(JsonValue::String(raw.to_string())),
        TypeTag::Integer => to_number(raw).map(|n| number_to_json(n.trunc())),
        TypeTag::Float => to_number(raw).and_then(|n| {
            serde_json::Number::from_f64(n)
                .map(JsonValue::Number)
                .ok_or(ConversionErrorKind::NotANumber)
        }),
        TypeTag::Boolean => match raw {
            CellValue::Boolean(b) => Ok(JsonValue::Bool(*b)),
            CellValue::Text(s) if s == "TRUE" => Ok(JsonValue::Bool(true)),
            CellValue::Text(s) if s == "FALSE" => Ok(JsonValue::Bool(false)),
            _ => Err(ConversionErrorKind::NotABoolean),
        },
        TypeTag::Array(element) => {
            let CellValue::Text(text) = raw else {
                return Err(ConversionErrorKind::NotAnArray);
            };
            let JsonValue::Array(items) = parse_json(text)? else {
                return Err(ConversionErrorKind::NotAnArray);
            };
            if let Some(element) = element {
                if !items.iter().all(|item| element.accepts(item)) {
                    return Err(element.mismatch());
                }
            }
            Ok(JsonValue::Array(items))
        }
        TypeTag::Json => match raw {
            CellValue::Text(text) => parse_json(text),
            other => Ok(other.to_json()),
        },
    }
}

fn to_number(raw: &CellValue) -> Result<f64, ConversionErrorKind> {
    let n = match raw {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ConversionErrorKind::NotANumber)?,
        CellValue::Boolean(_) | CellValue::Absent => return Err(ConversionErrorKind::NotANumber),
    };
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ConversionErrorKind::NotANumber)
    }
}

fn parse_json(text: &str) -> Result<JsonValue, ConversionErrorKind> {
    serde_json::from_str(text).map_err(|e| ConversionErrorKind::JsonParseFailure {
        message: e.to_string(),
    })
}

fn is_whole_number(value: &JsonValue) -> bool {
    match value {
        JsonValue::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}
