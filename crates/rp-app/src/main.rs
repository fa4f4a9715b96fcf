//! Demo host for the rose chart panel

use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context};
use parking_lot::RwLock;
use tracing::{error, info};

use rp_core::data::DataSource;
use rp_views::{PiePanel, ViewerContext};

mod demo;

/// Main application state
struct PanelHostApp {
    panel: PiePanel,

    /// Viewer context shared with the chart views
    viewer_context: Arc<ViewerContext>,

    /// Tokio runtime backing the data source queries
    _runtime: tokio::runtime::Runtime,
}

impl PanelHostApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let viewer_context = Arc::new(ViewerContext {
            data_source: Arc::new(RwLock::new(None)),
            runtime_handle: runtime.handle().clone(),
        });

        // A CSV path on the command line replaces the synthetic demo data
        let source = match std::env::args().nth(1) {
            Some(path) => demo::csv_source(std::path::Path::new(&path)),
            None => demo::demo_source(),
        };

        match source {
            Ok(source) => {
                info!("Loaded data source: {}", source.source_name());
                *viewer_context.data_source.write() = Some(Box::new(source));
            }
            Err(e) => {
                error!("Failed to load data source: {}", e);
            }
        }

        Self {
            panel: PiePanel::new(),
            viewer_context,
            _runtime: runtime,
        }
    }
}

impl eframe::App for PanelHostApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                {
                    let data_source = self.viewer_context.data_source.read();
                    match data_source.as_ref() {
                        Some(source) => {
                            let rows = self
                                .viewer_context
                                .runtime_handle
                                .block_on(source.row_count())
                                .unwrap_or(0);
                            ui.label(format!("{} ({} rows)", source.source_name(), rows));
                        }
                        None => {
                            ui.label("No data source loaded");
                        }
                    }
                }

                if ui.button("Reload").clicked() {
                    self.panel.refresh();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.ui(&self.viewer_context, ui);
        });
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting rose chart panel host");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Rose Chart Panel",
        options,
        Box::new(|cc| Box::new(PanelHostApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
