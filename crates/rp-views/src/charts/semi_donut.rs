//! Semi-donut chart view

use std::f64::consts::PI;

use arrow::record_batch::RecordBatch;
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Ui};
use serde_json::Value;

use rp_core::format::{default_title, format_tooltip};
use rp_core::options::{LabelPosition, PanelOptions};
use rp_core::{extract_full, FullChartData};

use crate::charts::nightingale::draw_legend;
use crate::charts::segments::{build_segments, PieSegment};
use crate::charts::{angle_contains, draw_sector, polar_offset};
use crate::colors::parse_color;
use crate::table_dialog::TableDialog;
use crate::{PanelView, PanelViewId, ViewerContext};

/// Half-circle donut: the sectors share the upper semicircle, sweeping
/// from 9 o'clock through 12 to 3 o'clock.
pub struct SemiDonutView {
    id: PanelViewId,
    title: String,
    pub options: PanelOptions,

    // State
    cached_data: Option<RecordBatch>,
    table_dialog: TableDialog,
    animation_progress: f32,
}

impl SemiDonutView {
    pub fn new(id: PanelViewId, title: String) -> Self {
        Self {
            id,
            title,
            options: PanelOptions::default(),
            cached_data: None,
            table_dialog: TableDialog::new("Metrics Data"),
            animation_progress: 0.0,
        }
    }

    pub fn set_options(&mut self, options: PanelOptions) {
        if self.options != options {
            self.animation_progress = 0.0;
            self.options = options;
        }
    }

    /// Drop the cached batch so the next frame re-queries the source.
    pub fn invalidate(&mut self) {
        self.cached_data = None;
        self.animation_progress = 0.0;
    }

    fn fetch_data(&self, ctx: &ViewerContext) -> Option<RecordBatch> {
        let data_source = ctx.data_source.read();
        let data_source = data_source.as_ref()?;

        match ctx.runtime_handle.block_on(data_source.query_all()) {
            Ok(batch) => Some(batch),
            Err(e) => {
                tracing::warn!("Failed to query {}: {}", data_source.source_name(), e);
                None
            }
        }
    }

    fn advance_animation(&mut self, ui: &Ui) {
        if !self.options.enable_animation {
            self.animation_progress = 1.0;
            return;
        }
        if self.animation_progress < 1.0 {
            let dt = ui.input(|i| i.stable_dt);
            self.animation_progress = (self.animation_progress + dt * 3.0).min(1.0);
            ui.ctx().request_repaint();
        }
    }

    fn draw_chart(
        &self,
        ui: &Ui,
        rect: Rect,
        full: &FullChartData,
        segments: &[PieSegment],
        response: &Response,
    ) {
        let painter = ui.painter_at(rect);

        let title_text = if self.options.title.is_empty() {
            default_title(&full.series.label_field, &full.series.value_field)
        } else {
            self.options.title.clone()
        };
        let title_color =
            parse_color(&self.options.title_color).unwrap_or(Color32::from_gray(200));
        painter.text(
            Pos2::new(rect.center().x, rect.top() + 4.0),
            Align2::CENTER_TOP,
            &title_text,
            FontId::proportional(self.options.font_size),
            title_color,
        );

        let title_band = self.options.font_size + 12.0;
        let legend_band = if self.options.show_legend { 24.0 } else { 0.0 };
        let plot_rect = Rect::from_min_max(
            Pos2::new(rect.left(), rect.top() + title_band),
            Pos2::new(rect.right(), rect.bottom() - legend_band),
        );

        // The flat edge sits on the bottom of the plot area
        let center = Pos2::new(plot_rect.center().x, plot_rect.bottom() - 8.0);
        let radius = (plot_rect.width() / 2.0).min(plot_rect.height()) * 0.9;
        let inner = (self.options.inner_radius_pct / 100.0).clamp(0.0, 1.0) * radius;
        let outer_max = (self.options.outer_radius_pct / 100.0).clamp(0.0, 1.0) * radius;
        let ring = (outer_max - inner).max(0.0);

        let progress = self.animation_progress as f64;
        let mut angle = PI;
        for segment in segments {
            let sweep = segment.fraction * PI * progress;
            let outer = inner + ring * segment.radius_scale;
            draw_sector(&painter, center, inner, outer, angle, angle + sweep, segment.color);
            angle += sweep;
        }

        if self.options.show_legend && progress >= 1.0 {
            let label_color =
                parse_color(&self.options.label_font_color).unwrap_or(Color32::WHITE);
            let font = FontId::proportional(self.options.label_font_size);
            let mut angle = PI;
            for segment in segments {
                let sweep = segment.fraction * PI;
                if sweep > 0.0 {
                    let mid = angle + sweep / 2.0;
                    let outer = inner + ring * segment.radius_scale;
                    let pos = match self.options.label_position {
                        LabelPosition::Inside => center + polar_offset(mid, (inner + outer) / 2.0),
                        LabelPosition::Outside => center + polar_offset(mid, outer + 12.0),
                        LabelPosition::Center => center,
                    };
                    painter.text(pos, Align2::CENTER_CENTER, &segment.name, font.clone(), label_color);
                }
                angle += sweep;
            }
        }

        if self.options.show_legend {
            draw_legend(&painter, rect, segments);
        }

        self.hover_tooltip(response, center, inner, ring, segments);
    }

    fn hover_tooltip(
        &self,
        response: &Response,
        center: Pos2,
        inner: f32,
        ring: f32,
        segments: &[PieSegment],
    ) {
        let Some(pos) = response.hover_pos() else {
            return;
        };
        let offset = pos - center;
        let distance = offset.length();
        let pointer_angle = (offset.y as f64).atan2(offset.x as f64);

        let mut angle = PI;
        for segment in segments {
            let sweep = segment.fraction * PI;
            let outer = inner + ring * segment.radius_scale;
            if sweep > 0.0
                && distance >= inner
                && distance <= outer
                && angle_contains(angle, angle + sweep, pointer_angle)
            {
                let tooltip = format_tooltip(
                    &self.options.tooltip_format,
                    &segment.name,
                    &segment.raw_value,
                    segment.fraction * 100.0,
                );
                response.clone().on_hover_text(tooltip);
                return;
            }
            angle += sweep;
        }
    }
}

impl PanelView for SemiDonutView {
    fn id(&self) -> PanelViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "SemiDonutChart"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.cached_data.is_none() {
            self.cached_data = self.fetch_data(ctx);
        }

        let Some(batch) = self.cached_data.clone() else {
            ui.centered_and_justified(|ui| {
                ui.label("No data source loaded");
            });
            return;
        };

        let full = match extract_full(&batch, &self.options.selection()) {
            Ok(full) => full,
            Err(e) => {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(Color32::LIGHT_RED, e.to_string());
                });
                return;
            }
        };

        let segments = build_segments(&full.series, &self.options);

        self.advance_animation(ui);

        let mut chart_size = ui.available_size();
        chart_size.y = (chart_size.y - 28.0).max(60.0);
        let (rect, response) = ui.allocate_exact_size(chart_size, Sense::hover());
        self.draw_chart(ui, rect, &full, &segments, &response);

        ui.horizontal(|ui| {
            if ui.button("Get the data").clicked() {
                self.table_dialog.open = true;
            }
            if ui.button("Refresh").clicked() {
                self.invalidate();
            }
        });

        self.table_dialog.show(ui.ctx(), &full);
    }

    fn save_config(&self) -> Value {
        serde_json::to_value(&self.options).unwrap_or(Value::Null)
    }

    fn load_config(&mut self, config: Value) {
        if let Ok(options) = serde_json::from_value(config) {
            self.options = options;
        }
    }
}
