//! Turns result rows into document field values.

use crate::document::DocumentSink;
use crate::rows::ResultRow;
use serde_json::{Map, Value};

/// The document value a row is written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The value of the only bound variable, written as is.
    Scalar(String),
    /// Every bound variable, written as a flat JSON object.
    Structured(String),
}

impl FieldValue {
    /// Computes the value of `row`, or `None` if no variable is bound.
    pub fn from_row(row: ResultRow) -> Option<Self> {
        if row.len() == 1 {
            return row.into_values().next().map(Self::Scalar);
        }
        if row.is_empty() {
            return None;
        }
        let object = row
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect::<Map<_, _>>();
        Some(Self::Structured(Value::Object(object).to_string()))
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Scalar(value) | Self::Structured(value) => value,
        }
    }
}

/// Writes `row` into `sink` under `name`.
///
/// Returns the written value, if any.
pub fn emit_row(
    name: &str,
    row: ResultRow,
    sink: &mut (impl DocumentSink + ?Sized),
) -> Option<FieldValue> {
    let value = FieldValue::from_row(row)?;
    sink.add_field(name, value.clone().into_string());
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SearchDocument;

    fn row(pairs: &[(&str, &str)]) -> ResultRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn single_variable_is_scalar() {
        assert_eq!(
            FieldValue::from_row(row(&[("label", "Hello")])),
            Some(FieldValue::Scalar("Hello".to_owned()))
        );
    }

    #[test]
    fn several_variables_are_structured() {
        assert_eq!(
            FieldValue::from_row(row(&[("b", "y"), ("a", "x")])),
            Some(FieldValue::Structured(r#"{"a":"x","b":"y"}"#.to_owned()))
        );
    }

    #[test]
    fn empty_row_is_skipped() {
        let mut document = SearchDocument::new();
        assert_eq!(emit_row("info", ResultRow::new(), &mut document), None);
        assert!(document.is_empty());
    }

    #[test]
    fn structured_values_are_escaped() {
        let mut document = SearchDocument::new();
        emit_row("info", row(&[("a", "say \"hi\""), ("b", "")]), &mut document);
        assert_eq!(
            document.fields(),
            [("info".to_owned(), r#"{"a":"say \"hi\"","b":""}"#.to_owned())]
        );
    }
}
