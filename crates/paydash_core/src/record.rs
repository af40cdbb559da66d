use serde_json::{Map, Value};

/// One heterogeneous row returned by the remote service.
///
/// Keys keep the order of the source document, which is what column
/// inference relies on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Map<String, Value>,
}

/// Result of looking a field up in a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

static JSON_NULL: Value = Value::Null;

impl<'a> FieldValue<'a> {
    /// The stored JSON value; an explicit null is `Value::Null`, only an absent field has none.
    pub fn value(self) -> Option<&'a Value> {
        match self {
            FieldValue::Present(value) => Some(value),
            FieldValue::Null => Some(&JSON_NULL),
            FieldValue::Absent => None,
        }
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON value; anything other than an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> FieldValue<'_> {
        match self.fields.get(name) {
            None => FieldValue::Absent,
            Some(Value::Null) => FieldValue::Null,
            Some(value) => FieldValue::Present(value),
        }
    }

    /// Field names in the record's own order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
