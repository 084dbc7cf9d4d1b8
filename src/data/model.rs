use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A cell value. Loaded cells are always `Text`; `Number` only appears in
/// tables produced by an aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Verbatim text as read from the source file.
    Text(String),
    /// Computed numeric result.
    Number(f64),
}

impl Value {
    /// The value as a string, borrowed for `Text`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) => Cow::Borrowed(s),
            Value::Number(_) => Cow::Owned(self.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            // Debug keeps the shortest round-trip form and a trailing `.0`.
            Value::Number(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

// ---------------------------------------------------------------------------
// Record – one row
// ---------------------------------------------------------------------------

/// One row: column name → value, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Replaces the value if the column already exists.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    /// Look up a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Header – ordered, unique column names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("header has no columns")]
    Empty,

    #[error("duplicate column name '{0}'")]
    Duplicate(String),
}

/// Ordered list of unique column names; defines display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new<I, S>(names: I) -> Result<Self, HeaderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(HeaderError::Empty);
        }
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(HeaderError::Duplicate(name.clone()));
            }
        }
        Ok(Header { names })
    }

    /// A one-column header, which can never be invalid.
    pub fn single(name: impl Into<String>) -> Self {
        Header {
            names: vec![name.into()],
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.names.iter().any(|n| n == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – header plus rows
// ---------------------------------------------------------------------------

/// A header and its records. Stages never edit a table in place; they build
/// a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Header,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(header: Header, records: Vec<Record>) -> Self {
        Table { header, records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
