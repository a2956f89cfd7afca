//! Ordered positional bindings produced by prepared rendering.

use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Values bound to the placeholders of a rendered statement.
///
/// Positions are 1-based and follow the left-to-right order in which the
/// placeholders appear in the rendered SQL text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    values: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Add a value and return its 1-based position.
    pub fn push(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len()
    }

    /// Get the value bound at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&Value> {
        position.checked_sub(1).and_then(|i| self.values.get(i))
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(position, value)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.values.iter().enumerate().map(|(i, v)| (i + 1, v))
    }

    /// All values in position order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Take the values (consuming the list).
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}
