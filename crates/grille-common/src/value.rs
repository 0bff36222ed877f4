use std::fmt::{self, Display};

use serde_json::Value as JsonValue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A raw cell value as delivered by a spreadsheet reader.
///
/// This is the loosely-typed input side of the conversion: a cell is either
/// missing, text, a number, or a boolean. Dates arrive as serial numbers and
/// error cells as their Excel text (`#DIV/0!`), so nothing else is needed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Absent,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl CellValue {
    /// `Absent`, or text that holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Absent => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Boolean(_) => false,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Render the value the way it would appear in a JSON document.
    ///
    /// Used when reporting offending cells: text is quoted, `Absent` is `null`
    /// and non-finite numbers also collapse to `null`.
    pub fn to_json_text(&self) -> String {
        self.to_json().to_string()
    }

    /// Lossless view of the value as JSON; `Absent` becomes `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            CellValue::Absent => JsonValue::Null,
            CellValue::Text(s) => JsonValue::String(s.clone()),
            CellValue::Number(n) => number_to_json(*n),
            CellValue::Boolean(b) => JsonValue::Bool(*b),
        }
    }
}

/// Whole numbers inside the `i64` range become JSON integers, everything else
/// a JSON float. NaN and infinities have no JSON form and map to `null`.
pub fn number_to_json(n: f64) -> JsonValue {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        JsonValue::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => write!(f, ""),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn blank_detection() {
        assert!(CellValue::Absent.is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(CellValue::from("  \t").is_blank());
        assert!(!CellValue::from("x").is_blank());
        assert!(!CellValue::from(0.0).is_blank());
        assert!(!CellValue::from(false).is_blank());
    }

    #[test]
    fn display_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::from(3.0).to_string(), "3");
        assert_eq!(CellValue::from(0.1).to_string(), "0.1");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::Absent.to_string(), "");
    }

    #[test]
    fn json_text_quotes_strings() {
        assert_eq!(CellValue::from("a\"b").to_json_text(), r#""a\"b""#);
        assert_eq!(CellValue::Absent.to_json_text(), "null");
        assert_eq!(CellValue::from(2.5).to_json_text(), "2.5");
        assert_eq!(CellValue::from(f64::NAN).to_json_text(), "null");
    }

    #[test]
    fn whole_numbers_become_json_integers() {
        assert_eq!(number_to_json(10.0), json!(10));
        assert_eq!(number_to_json(-4.0), json!(-4));
        assert_eq!(number_to_json(0.25), json!(0.25));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Absent);
        assert_eq!(CellValue::from(Some(7)), CellValue::Number(7.0));
    }

    proptest! {
        #[test]
        fn integers_render_like_i64(n in -1_000_000_000i64..1_000_000_000i64) {
            prop_assert_eq!(CellValue::from(n).to_string(), n.to_string());
            prop_assert_eq!(CellValue::from(n).to_json(), json!(n));
        }
    }
}
