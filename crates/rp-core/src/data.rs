//! Data source abstraction
//!
//! The host owns query execution; the panel only needs the schema and the
//! current result batch, re-fetched on every refresh.

use std::sync::Arc;

use arrow::record_batch::RecordBatch;

/// Trait for data sources feeding the panel
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Get the schema of this data source
    async fn schema(&self) -> Arc<arrow::datatypes::Schema>;

    /// Query the current result set
    async fn query_all(&self) -> anyhow::Result<RecordBatch>;

    /// Get total row count
    async fn row_count(&self) -> anyhow::Result<usize>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
