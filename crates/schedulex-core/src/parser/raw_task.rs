use serde::{Deserialize, Serialize};

/// Extended attributes attached to a task, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedAttributes(Vec<(String, String)>);

impl ExtendedAttributes {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Value of the first attribute with this field id.
    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One task record as it appears in the document, every field still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTask {
    pub id: Option<String>,
    pub name: Option<String>,
    pub start: Option<String>,
    pub finish: Option<String>,
    pub duration: Option<String>,
    pub percent_complete: Option<String>,
    pub priority: Option<String>,
    pub constraint_type: Option<String>,
    pub is_critical: Option<String>,
    pub milestone_flag: Option<String>,
    pub notes: Option<String>,
    pub extended_attributes: ExtendedAttributes,
}

impl RawTask {
    /// The only place inference reads untyped extended attributes.
    pub fn extended_attribute(&self, name: &str) -> Option<&str> {
        self.extended_attributes.get(name)
    }
}
