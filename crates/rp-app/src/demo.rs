//! In-memory data sources for the panel host
//!
//! Stand-ins for the host's query layer: a synthetic site-metrics batch
//! and a one-shot CSV loader.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;

use rp_core::data::DataSource;

/// A source backed by a single in-memory batch
pub struct MemoryTableSource {
    name: String,
    batch: RecordBatch,
}

impl MemoryTableSource {
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }
}

#[async_trait]
impl DataSource for MemoryTableSource {
    async fn schema(&self) -> Arc<Schema> {
        self.batch.schema()
    }

    async fn query_all(&self) -> Result<RecordBatch> {
        Ok(self.batch.clone())
    }

    async fn row_count(&self) -> Result<usize> {
        Ok(self.batch.num_rows())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Synthetic site metrics in the shape the default options expect.
pub fn demo_source() -> Result<MemoryTableSource> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Site", DataType::Utf8, false),
        Field::new("Count", DataType::Int64, false),
        Field::new("Uptime", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec![
                "Site A", "Site B", "Site C", "Site D", "Site E",
            ])) as ArrayRef,
            Arc::new(Int64Array::from(vec![38, 24, 17, 11, 6])) as ArrayRef,
            Arc::new(Float64Array::from(vec![99.2, 97.5, 99.9, 95.1, 98.3])) as ArrayRef,
        ],
    )?;

    Ok(MemoryTableSource::new("demo", batch))
}

/// Load a CSV file into a single in-memory batch.
pub fn csv_source(path: &Path) -> Result<MemoryTableSource> {
    use std::fs::File;

    let mut file = File::open(path)?;
    let format = arrow::csv::reader::Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, Some(1024))?;
    let schema = Arc::new(schema);

    let file = File::open(path)?;
    let reader = arrow::csv::ReaderBuilder::new(schema.clone())
        .with_header(true)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let batch = arrow::compute::concat_batches(&schema, &batches)?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("data.csv")
        .to_string();

    Ok(MemoryTableSource::new(name, batch))
}
