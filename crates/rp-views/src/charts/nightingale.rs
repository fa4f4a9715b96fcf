//! Nightingale rose chart view

use std::f64::consts::{FRAC_PI_2, TAU};

use arrow::record_batch::RecordBatch;
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Ui, Vec2};
use serde_json::Value;

use rp_core::format::{default_title, format_tooltip};
use rp_core::options::{LabelPosition, PanelOptions};
use rp_core::{extract_full, FullChartData};

use crate::charts::segments::{build_segments, PieSegment};
use crate::charts::{angle_contains, draw_sector, polar_offset};
use crate::colors::parse_color;
use crate::table_dialog::TableDialog;
use crate::{PanelView, PanelViewId, ViewerContext};

/// Full-circle rose chart: one sector per row, angle by share of the
/// total, radius by magnitude.
pub struct NightingaleView {
    id: PanelViewId,
    title: String,
    pub options: PanelOptions,

    // State
    cached_data: Option<RecordBatch>,
    table_dialog: TableDialog,
    animation_progress: f32,
}

impl NightingaleView {
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

    /// Replace the options, restarting the entry animation when they
    /// actually changed.
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

        let center = plot_rect.center();
        let radius = plot_rect.width().min(plot_rect.height()) / 2.0 * 0.9;
        let inner = (self.options.inner_radius_pct / 100.0).clamp(0.0, 1.0) * radius;
        let outer_max = (self.options.outer_radius_pct / 100.0).clamp(0.0, 1.0) * radius;
        let ring = (outer_max - inner).max(0.0);

        // Sectors start at 12 o'clock and sweep clockwise
        let progress = self.animation_progress as f64;
        let mut angle = -FRAC_PI_2;
        for segment in segments {
            let sweep = segment.fraction * TAU * progress;
            let outer = inner + ring * segment.radius_scale;
            draw_sector(&painter, center, inner, outer, angle, angle + sweep, segment.color);
            angle += sweep;
        }

        // Labels ride on the final geometry, not the animation
        if self.options.show_legend && progress >= 1.0 {
            let label_color =
                parse_color(&self.options.label_font_color).unwrap_or(Color32::WHITE);
            let font = FontId::proportional(self.options.label_font_size);
            let mut angle = -FRAC_PI_2;
            for segment in segments {
                let sweep = segment.fraction * TAU;
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

        let mut angle = -FRAC_PI_2;
        for segment in segments {
            let sweep = segment.fraction * TAU;
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

/// Legend strip along the bottom edge; entries that run out of width are
/// dropped.
pub(crate) fn draw_legend(painter: &egui::Painter, rect: Rect, segments: &[PieSegment]) {
    let font = FontId::proportional(11.0);
    let y = rect.bottom() - 12.0;
    let mut x = rect.left() + 8.0;

    for segment in segments {
        let swatch = Rect::from_center_size(Pos2::new(x + 5.0, y), Vec2::splat(10.0));
        painter.rect_filled(swatch, 2.0, segment.color);
        let text_rect = painter.text(
            Pos2::new(x + 14.0, y),
            Align2::LEFT_CENTER,
            &segment.name,
            font.clone(),
            Color32::from_gray(200),
        );
        x = text_rect.right() + 12.0;
        if x > rect.right() - 20.0 {
            break;
        }
    }
}

impl PanelView for NightingaleView {
    fn id(&self) -> PanelViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "NightingaleChart"
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
                // The failure message takes the chart's place
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
