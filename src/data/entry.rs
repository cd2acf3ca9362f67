//! Registry document model.
//!
//! The registry is a flat YAML sequence of team entries. Fields are kept as
//! raw YAML values so that a wrongly typed field surfaces as a validation
//! error from the check that owns it, not as a parse failure.

use crate::RegistryCheckError;
use serde_yaml::{Mapping, Value};

/// One team's submission record.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    fields: Mapping,
}

impl RegistryEntry {
    pub fn from_mapping(fields: Mapping) -> Self {
        RegistryEntry { fields }
    }

    /// Raw value of a top-level field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Team name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// `github` handles, if present and a sequence
    pub fn github(&self) -> Option<&[Value]> {
        self.sequence("github")
    }

    /// `repos` URLs, if present and a sequence
    pub fn repos(&self) -> Option<&[Value]> {
        self.sequence("repos")
    }

    /// `x` handles, if present and a sequence
    pub fn x(&self) -> Option<&[Value]> {
        self.sequence("x")
    }

    /// Raw `wallets` block
    pub fn wallets(&self) -> Option<&Value> {
        self.field("wallets")
    }

    /// Name used in logs and reports
    pub fn display_name(&self) -> &str {
        match self.name().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "<unnamed>",
        }
    }

    fn sequence(&self, key: &str) -> Option<&[Value]> {
        self.field(key)
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
    }
}

/// A parsed registry file.
#[derive(Debug, Clone, Default)]
pub struct RegistryDocument {
    entries: Vec<RegistryEntry>,
}

impl RegistryDocument {
    /// Parse registry text. Non-mapping items in the sequence are ignored.
    pub fn parse(text: &str) -> Result<Self, RegistryCheckError> {
        let value: Value =
            serde_yaml::from_str(text).map_err(|e| RegistryCheckError::Parse(e.to_string()))?;

        let items = match value {
            Value::Sequence(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(RegistryCheckError::Parse(format!(
                    "expected a list of entries, found {}",
                    value_kind(&other)
                )))
            }
        };

        let entries = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Mapping(fields) => Some(RegistryEntry::from_mapping(fields)),
                _ => None,
            })
            .collect();

        Ok(RegistryDocument { entries })
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry under test: the last mapping in the document.
    pub fn latest(&self) -> Option<&RegistryEntry> {
        self.entries.last()
    }
}

/// Short YAML type name for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
