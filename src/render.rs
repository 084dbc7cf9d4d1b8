use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Bordered text table
// ---------------------------------------------------------------------------

/// Render `table` as a bordered text table.
///
/// Column labels come from the header. Each record contributes its values
/// in record order, so an aggregate result shows its value under the
/// function name.
pub fn render_table(table: &Table) -> Result<String, ArrowError> {
    let fields: Vec<Field> = table
        .header
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();

    let columns: Vec<ArrayRef> = (0..table.header.len())
        .map(|idx| {
            let cells: Vec<Option<String>> = table
                .records
                .iter()
                .map(|rec| rec.values().nth(idx).map(|v| v.to_string()))
                .collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
