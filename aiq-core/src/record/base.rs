//! Base implementation of records.
use crate::error::AgentError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// A single floating-point value, e.g. a Q-value or a loss.
    Scalar(f64),

    /// An integer value, e.g. a state or an action.
    Integer(i64),
}

/// A container of named values.
///
/// Keys are kept sorted, so serialized records are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record(BTreeMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f64, AgentError> {
        match self.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(AgentError::RecordValueTypeError("Scalar".to_string())),
            None => Err(AgentError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets an integer value from the record.
    pub fn get_integer(&self, k: &str) -> Result<i64, AgentError> {
        match self.get(k) {
            Some(RecordValue::Integer(v)) => Ok(*v),
            Some(_) => Err(AgentError::RecordValueTypeError("Integer".to_string())),
            None => Err(AgentError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns `true` if the record contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of values in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
