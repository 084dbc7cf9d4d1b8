//! Query layer: an optional filter followed by an optional aggregate.
//!
//! ```text
//!   Table ──▶ filter (column<op>literal) ──▶ aggregate (column=function) ──▶ Table
//! ```

use thiserror::Error;

pub mod aggregate;
pub mod filter;

use crate::data::model::Table;
use aggregate::{AggregateError, AggregateSpec};
use filter::{FilterError, Predicate};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// A parsed query. Both stages are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub predicate: Option<Predicate>,
    pub aggregate: Option<AggregateSpec>,
}

impl Query {
    /// Parse the raw `--where` and `--aggregate` expressions.
    pub fn parse(
        where_expr: Option<&str>,
        aggregate_expr: Option<&str>,
    ) -> Result<Self, QueryError> {
        Ok(Query {
            predicate: where_expr.map(Predicate::parse).transpose()?,
            aggregate: aggregate_expr.map(AggregateSpec::parse).transpose()?,
        })
    }

    /// Run filter then aggregate. Each stage builds a new table.
    pub fn execute(&self, table: Table) -> Result<Table, QueryError> {
        let table = match &self.predicate {
            Some(predicate) => filter::filter(&table, predicate)?,
            None => table,
        };
        let table = match &self.aggregate {
            Some(spec) => aggregate::aggregate(&table, spec)?,
            None => table,
        };
        Ok(table)
    }
}
