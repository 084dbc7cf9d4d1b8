use std::fmt;

use thiserror::Error;

use crate::data::model::{Record, Table};

// ---------------------------------------------------------------------------
// Predicate: `column<op>literal`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("no recognized operator in '{0}' (expected one of '=', '<', '>')")]
    NoOperator(String),

    #[error("more than one operator in '{0}'")]
    AmbiguousOperator(String),

    #[error("'{0}' must have a column name on the left and a value on the right")]
    EmptyOperand(String),

    #[error("unknown column '{0}'")]
    MissingColumn(String),
}

/// Comparison operator. Comparisons are on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    LessThan,
    GreaterThan,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Operator::Equal),
            '<' => Some(Operator::LessThan),
            '>' => Some(Operator::GreaterThan),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Operator::Equal => '=',
            Operator::LessThan => '<',
            Operator::GreaterThan => '>',
        }
    }

    /// Lexicographic for `<` and `>`, so `"9" > "10"` holds.
    pub fn matches(self, field: &str, literal: &str) -> bool {
        match self {
            Operator::Equal => field == literal,
            Operator::LessThan => field < literal,
            Operator::GreaterThan => field > literal,
        }
    }
}

/// A parsed `--where` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: String,
    pub op: Operator,
    pub literal: String,
}

impl Predicate {
    /// Parse `column<op>literal`. Exactly one of `=`, `<`, `>` may appear
    /// in the whole expression; neither side may be empty. No trimming.
    pub fn parse(expr: &str) -> Result<Self, FilterError> {
        let mut ops = expr
            .char_indices()
            .filter_map(|(i, c)| Operator::from_char(c).map(|op| (i, op)));

        let (pos, op) = ops
            .next()
            .ok_or_else(|| FilterError::NoOperator(expr.to_string()))?;
        if ops.next().is_some() {
            return Err(FilterError::AmbiguousOperator(expr.to_string()));
        }

        // Operators are single-byte ASCII.
        let (column, literal) = (&expr[..pos], &expr[pos + 1..]);
        if column.is_empty() || literal.is_empty() {
            return Err(FilterError::EmptyOperand(expr.to_string()));
        }

        Ok(Predicate {
            column: column.to_string(),
            op,
            literal: literal.to_string(),
        })
    }

    /// Test one record. `None` if the record lacks the column.
    pub fn evaluate(&self, record: &Record) -> Option<bool> {
        record
            .get(&self.column)
            .map(|v| self.op.matches(&v.as_text(), &self.literal))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.op.symbol(), self.literal)
    }
}

/// Keep the records matching `predicate`, header unchanged.
///
/// An unknown column fails the whole filter, even on an empty table.
pub fn filter(table: &Table, predicate: &Predicate) -> Result<Table, FilterError> {
    if !table.header.contains(&predicate.column) {
        return Err(FilterError::MissingColumn(predicate.column.clone()));
    }

    let mut kept = Vec::new();
    for record in &table.records {
        let hit = predicate
            .evaluate(record)
            .ok_or_else(|| FilterError::MissingColumn(predicate.column.clone()))?;
        if hit {
            kept.push(record.clone());
        }
    }

    log::debug!(
        "Filter '{predicate}' kept {} of {} rows",
        kept.len(),
        table.len()
    );
    Ok(Table::new(table.header.clone(), kept))
}
