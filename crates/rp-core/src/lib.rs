//! Core logic for the rose chart panel
//!
//! This crate holds everything the chart views need that is independent of
//! rendering: the scalar cell model, the series extractor, panel option
//! parsing and tooltip formatting.

pub mod data;
pub mod extract;
pub mod format;
pub mod options;
pub mod scalar;

use thiserror::Error;

// Re-exports
pub use data::DataSource;
pub use extract::{extract_full, extract_series, ChartSeries, FullChartData, SeriesSelection};
pub use options::{ChartKind, LabelPosition, PanelOptions, RawPanelOptions, RoseType};
pub use scalar::ScalarValue;

/// Errors that can occur while shaping a batch into chart data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Not enough fields in the data.")]
    NotEnoughFields,
}
