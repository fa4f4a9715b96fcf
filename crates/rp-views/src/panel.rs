//! The pie chart panel
//!
//! Owns the typed options and both chart views, and mounts whichever
//! renderer the chart-type option asks for.

use egui::Ui;

use rp_core::options::{parse_color_map, ChartKind, LabelPosition, PanelOptions, RoseType};
use rp_core::RawPanelOptions;

use crate::charts::{NightingaleView, SemiDonutView};
use crate::{PanelView, ViewerContext};

pub struct PiePanel {
    pub options: PanelOptions,

    // Edit buffer for the JSON color map, reparsed on change
    color_map_text: String,

    nightingale: NightingaleView,
    semi_donut: SemiDonutView,
}

impl PiePanel {
    pub fn new() -> Self {
        let options = PanelOptions::default();
        Self {
            color_map_text: "{}".to_string(),
            nightingale: NightingaleView::new(uuid::Uuid::new_v4(), "Nightingale".to_string()),
            semi_donut: SemiDonutView::new(uuid::Uuid::new_v4(), "SemiDonut".to_string()),
            options,
        }
    }

    /// Build a panel from the host's stringly option bag.
    pub fn from_raw_options(raw: &RawPanelOptions) -> Self {
        let mut panel = Self::new();
        panel.options = PanelOptions::from_raw(raw);
        panel.color_map_text = raw.field_color_map.clone();
        panel
    }

    /// Force both chart views to re-query the data source.
    pub fn refresh(&mut self) {
        self.nightingale.invalidate();
        self.semi_donut.invalidate();
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        egui::CollapsingHeader::new("Configuration")
            .default_open(false)
            .show(ui, |ui| {
                self.show_config(ui, ctx);
            });

        ui.separator();

        // Mount the renderer the options ask for
        match self.options.chart_kind {
            ChartKind::Nightingale => {
                self.nightingale.set_options(self.options.clone());
                self.nightingale.ui(ctx, ui);
            }
            ChartKind::SemiDonut => {
                self.semi_donut.set_options(self.options.clone());
                self.semi_donut.ui(ctx, ui);
            }
        }
    }

    fn show_config(&mut self, ui: &mut Ui, ctx: &ViewerContext) {
        let column_names: Vec<String> = {
            let data_source = ctx.data_source.read();
            match data_source.as_ref() {
                Some(source) => ctx
                    .runtime_handle
                    .block_on(source.schema())
                    .fields()
                    .iter()
                    .map(|f| f.name().clone())
                    .collect(),
                None => Vec::new(),
            }
        };

        ui.horizontal(|ui| {
            ui.label("Chart type:");
            egui::ComboBox::from_id_source("pie_panel_chart_kind")
                .selected_text(format!("{:?}", self.options.chart_kind))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.options.chart_kind,
                        ChartKind::Nightingale,
                        "Nightingale",
                    );
                    ui.selectable_value(
                        &mut self.options.chart_kind,
                        ChartKind::SemiDonut,
                        "SemiDonut",
                    );
                });
        });

        ui.horizontal(|ui| {
            ui.label("Label field:");
            egui::ComboBox::from_id_source("pie_panel_label_field")
                .selected_text(&self.options.label_field)
                .show_ui(ui, |ui| {
                    for col in &column_names {
                        ui.selectable_value(&mut self.options.label_field, col.clone(), col);
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Value field:");
            egui::ComboBox::from_id_source("pie_panel_value_field")
                .selected_text(&self.options.value_field)
                .show_ui(ui, |ui| {
                    for col in &column_names {
                        ui.selectable_value(&mut self.options.value_field, col.clone(), col);
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut self.options.title);
        });

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Inner radius (%):");
            ui.add(egui::Slider::new(&mut self.options.inner_radius_pct, 0.0..=100.0));
        });

        ui.horizontal(|ui| {
            ui.label("Outer radius (%):");
            ui.add(egui::Slider::new(&mut self.options.outer_radius_pct, 0.0..=100.0));
        });

        ui.horizontal(|ui| {
            ui.label("Rose type:");
            egui::ComboBox::from_id_source("pie_panel_rose_type")
                .selected_text(format!("{:?}", self.options.rose_type))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.options.rose_type, RoseType::Radius, "Radius");
                    ui.selectable_value(&mut self.options.rose_type, RoseType::Area, "Area");
                });
        });

        ui.horizontal(|ui| {
            ui.label("Label position:");
            egui::ComboBox::from_id_source("pie_panel_label_position")
                .selected_text(format!("{:?}", self.options.label_position))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.options.label_position,
                        LabelPosition::Inside,
                        "Inside",
                    );
                    ui.selectable_value(
                        &mut self.options.label_position,
                        LabelPosition::Outside,
                        "Outside",
                    );
                    ui.selectable_value(
                        &mut self.options.label_position,
                        LabelPosition::Center,
                        "Center",
                    );
                });
        });

        ui.checkbox(&mut self.options.show_legend, "Show legend and labels");
        ui.checkbox(&mut self.options.enable_animation, "Enable animation");

        ui.horizontal(|ui| {
            ui.label("Tooltip format:");
            ui.text_edit_singleline(&mut self.options.tooltip_format);
        });

        ui.horizontal(|ui| {
            ui.label("Color map (JSON):");
            let response = ui.text_edit_singleline(&mut self.color_map_text);
            if response.changed() {
                self.options.field_color_map = parse_color_map(&self.color_map_text);
            }
        });
    }
}

impl Default for PiePanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_options_dispatches_on_chart_type() {
        let mut raw = RawPanelOptions::default();
        raw.chart_type = "SemiDonut".to_string();

        let panel = PiePanel::from_raw_options(&raw);
        assert_eq!(panel.options.chart_kind, ChartKind::SemiDonut);
    }

    #[test]
    fn test_from_raw_options_keeps_color_map_text() {
        let mut raw = RawPanelOptions::default();
        raw.field_color_map = r##"{"Site A": "#FF0000"}"##.to_string();

        let panel = PiePanel::from_raw_options(&raw);
        assert_eq!(panel.color_map_text, raw.field_color_map);
        assert_eq!(panel.options.field_color_map["Site A"], "#FF0000");
    }

    #[test]
    fn test_new_defaults_to_nightingale() {
        let panel = PiePanel::new();
        assert_eq!(panel.options.chart_kind, ChartKind::Nightingale);
    }
}
