//! Time-indexed numeric dataset.
//!
//! [`TimeIndexedDataset::from_raw`] runs the ingestion half of the pipeline:
//! temporal index resolution, label normalization and numeric coercion. The
//! result stores every data column as a nullable Arrow `Float64Array`; the
//! validity bitmap is the only missing-value marker.

pub mod coercion;
pub mod normalize;
pub mod temporal;

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::datatypes::{DataType, Field, Float64Type, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use chrono::NaiveDateTime;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::sources::RawTable;

pub use coercion::{coerce_cell, coerce_column};
pub use normalize::{deduplicate_labels, normalize_composite, normalize_label};
pub use temporal::{
    parse_timestamp, IndexSource, IndexedRows, TemporalIndexResolver,
    RECOGNIZED_DATETIME_COLUMNS,
};

/// Rows keyed by a non-decreasing timestamp index, every cell numeric or
/// missing.
#[derive(Debug, Clone)]
pub struct TimeIndexedDataset {
    index_column: String,
    index: Vec<NaiveDateTime>,
    batch: RecordBatch,
}

impl TimeIndexedDataset {
    /// Resolves the index of `table`, normalizes its labels and coerces every
    /// cell.
    #[instrument(skip(resolver, table))]
    pub fn from_raw(table: RawTable, resolver: &TemporalIndexResolver) -> Result<Self> {
        let indexed = resolver.resolve(table)?;
        Self::from_indexed(indexed)
    }

    /// Normalizes and coerces already-indexed rows.
    pub fn from_indexed(indexed: IndexedRows) -> Result<Self> {
        let IndexedRows {
            index_column,
            timestamps,
            labels,
            rows,
            ..
        } = indexed;

        let names = deduplicate_labels(
            labels
                .iter()
                .map(|label| normalize_composite(label.parts()))
                .collect(),
        );
        let fields: Vec<Field> = names
            .into_iter()
            .map(|name| Field::new(name, DataType::Float64, true))
            .collect();
        let columns: Vec<ArrayRef> = (0..labels.len())
            .map(|col| coerce_column(&rows, col))
            .collect();

        let batch = RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            columns,
            &RecordBatchOptions::new().with_row_count(Some(timestamps.len())),
        )?;

        debug!(
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "Coerced dataset to numeric"
        );

        Ok(Self {
            index_column,
            index: timestamps,
            batch,
        })
    }

    /// Builds a dataset directly from an index and named columns.
    ///
    /// Column names are normalized and made unique; every column must have one value per
    /// timestamp and the index must already be sorted.
    pub fn from_columns(
        index: Vec<NaiveDateTime>,
        columns: Vec<(&str, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let names =
            deduplicate_labels(columns.iter().map(|(name, _)| normalize_label(name)).collect());
        let fields: Vec<Field> = names
            .into_iter()
            .map(|name| Field::new(name, DataType::Float64, true))
            .collect();
        let arrays: Vec<ArrayRef> = columns
            .into_iter()
            .map(|(_, values)| Arc::new(Float64Array::from(values)) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            arrays,
            &RecordBatchOptions::new().with_row_count(Some(index.len())),
        )?;
        Ok(Self {
            index_column: "index".to_string(),
            index,
            batch,
        })
    }

    /// Raw name of the column the index was built from.
    pub fn index_column(&self) -> &str {
        &self.index_column
    }

    /// The sorted timestamp index.
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// The underlying Arrow batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Normalized column names, in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Iterates over `(name, values)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Float64Array)> + '_ {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .zip(self.batch.columns())
            .map(|(field, array)| (field.name().as_str(), array.as_primitive::<Float64Type>()))
    }

    /// Values of the column called `name`, if present.
    pub fn column(&self, name: &str) -> Option<&Float64Array> {
        self.columns()
            .find(|(column, _)| *column == name)
            .map(|(_, values)| values)
    }

    /// Earliest timestamp, `None` for an empty dataset.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.index.first().copied()
    }

    /// Latest timestamp, `None` for an empty dataset.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.index.last().copied()
    }

    /// Number of missing cells in column `name`.
    pub fn missing_count(&self, name: &str) -> Option<usize> {
        self.column(name).map(|values| values.null_count())
    }
}
