//! Chart views for the rose chart panel
//!
//! The panel mounts one of two painter-drawn chart views (full-circle
//! Nightingale rose or semi-donut) plus a raw-data table dialog; all of
//! them are fed by the extractor in `rp-core`.

pub mod charts;
mod colors;
mod panel;
mod table_dialog;

pub use charts::{NightingaleView, SemiDonutView};
pub use colors::{categorical_color, parse_color};
pub use panel::PiePanel;
pub use table_dialog::TableDialog;

use std::sync::Arc;

use egui::Ui;
use parking_lot::RwLock;
use serde_json::Value;

use rp_core::data::DataSource;

/// Unique identifier for a panel view
pub type PanelViewId = uuid::Uuid;

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Current data source
    pub data_source: Arc<RwLock<Option<Box<dyn DataSource>>>>,

    /// Tokio runtime handle
    pub runtime_handle: tokio::runtime::Handle,
}

/// Base trait for the chart views the panel can mount
pub trait PanelView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> PanelViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Get the view type (for serialization)
    fn view_type(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);
}
