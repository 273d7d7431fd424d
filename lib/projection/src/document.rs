//! The output side of a projection.

use serde_json::{Map, Value};

/// An append-only, multi-valued document the projected fields are written to.
///
/// Adding a value for an existing field name appends to it instead of replacing it.
pub trait DocumentSink {
    fn add_field(&mut self, name: &str, value: String);
}

impl<T: DocumentSink + ?Sized> DocumentSink for &mut T {
    fn add_field(&mut self, name: &str, value: String) {
        (**self).add_field(name, value);
    }
}

/// An in-memory search document recording field values in insertion order.
///
/// ```
/// use rdf_projection::document::{DocumentSink, SearchDocument};
///
/// let mut document = SearchDocument::new();
/// document.add_field("name", "Paris".to_owned());
/// document.add_field("name", "la ville lumière".to_owned());
/// assert_eq!(document.values("name").collect::<Vec<_>>(), ["Paris", "la ville lumière"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDocument {
    fields: Vec<(String, String)>,
}

impl SearchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(name, value)` pairs in the order they were added.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The values of the field `name` in the order they were added.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Groups the values by field name, fields ordered by their first value.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.fields {
            let values = object
                .entry(name.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(values) = values {
                values.push(Value::String(value.clone()));
            }
        }
        Value::Object(object)
    }
}

impl DocumentSink for SearchDocument {
    fn add_field(&mut self, name: &str, value: String) {
        self.fields.push((name.to_owned(), value));
    }
}
