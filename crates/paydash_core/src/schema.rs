use indexmap::IndexSet;

use crate::Record;

/// Ordered, duplicate-free field names observed across a batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldCatalog {
    names: IndexSet<String>,
}

impl FieldCatalog {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

/// Union of field names across `records`; the first occurrence fixes the position.
pub fn infer_fields(records: &[Record]) -> FieldCatalog {
    let mut names = IndexSet::new();
    for record in records {
        for name in record.field_names() {
            if !names.contains(name) {
                names.insert(name.to_owned());
            }
        }
    }
    FieldCatalog { names }
}
