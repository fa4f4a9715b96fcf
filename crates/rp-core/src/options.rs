//! Panel options
//!
//! The host hands the panel an open-ended bag of user-edited strings:
//! booleans arrive as `"true"`/`"false"`, the per-label color override as a
//! JSON-encoded map. [`RawPanelOptions`] mirrors that bag verbatim;
//! [`PanelOptions`] is the typed record the rest of the panel works with.
//! Parsing happens once, here, and the extractor only ever sees the two
//! field-name strings via [`PanelOptions::selection`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extract::SeriesSelection;

/// Which chart renderer the panel mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Nightingale,
    SemiDonut,
}

impl ChartKind {
    fn parse(s: &str) -> Self {
        match s {
            "SemiDonut" => ChartKind::SemiDonut,
            _ => ChartKind::Nightingale,
        }
    }
}

/// How a rose chart encodes magnitude in the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoseType {
    /// Radius grows linearly with the value
    Radius,
    /// Area grows linearly with the value
    Area,
}

impl RoseType {
    fn parse(s: &str) -> Self {
        match s {
            "area" => RoseType::Area,
            _ => RoseType::Radius,
        }
    }
}

/// Where segment labels are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelPosition {
    Inside,
    Outside,
    Center,
}

impl LabelPosition {
    fn parse(s: &str) -> Self {
        match s {
            "inside" => LabelPosition::Inside,
            "center" => LabelPosition::Center,
            _ => LabelPosition::Outside,
        }
    }
}

/// Title/label font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
    Lighter,
}

impl FontWeight {
    fn parse(s: &str) -> Self {
        match s {
            "bold" => FontWeight::Bold,
            "lighter" => FontWeight::Lighter,
            _ => FontWeight::Normal,
        }
    }
}

/// The option bag exactly as the host serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPanelOptions {
    /// Field for the pie labels
    pub x_field: String,
    /// Field for the pie values
    pub y_field: String,
    pub title: String,
    pub font_size: f32,
    pub font_weight: String,
    pub title_color: String,
    /// Global color override for the chart segments
    pub field_color: String,
    /// JSON map like `{"Site A": "#FF0000"}`
    pub field_color_map: String,
    /// Inner radius as percentage of chart size
    pub inner_radius: f32,
    /// Outer radius as percentage of chart size
    pub outer_radius: f32,
    pub rose_type: String,
    pub show_legend: String,
    /// Format string for tooltips, e.g. `"{b}: {c} ({d}%)"`
    pub tooltip_format: String,
    pub label_font_color: String,
    pub label_font_size: f32,
    pub label_position: String,
    pub enable_animation: String,
    pub chart_type: String,
}

impl Default for RawPanelOptions {
    fn default() -> Self {
        Self {
            x_field: "Site".to_string(),
            y_field: "Count".to_string(),
            title: String::new(),
            font_size: 16.0,
            font_weight: "normal".to_string(),
            title_color: "#333".to_string(),
            field_color: "white".to_string(),
            field_color_map: "{}".to_string(),
            inner_radius: 25.0,
            outer_radius: 100.0,
            rose_type: "radius".to_string(),
            show_legend: "true".to_string(),
            tooltip_format: "{b}: {c} ({d}%)".to_string(),
            label_font_color: "white".to_string(),
            label_font_size: 12.0,
            label_position: "outside".to_string(),
            enable_animation: "true".to_string(),
            chart_type: "Nightingale".to_string(),
        }
    }
}

/// The typed options record used by the views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelOptions {
    pub label_field: String,
    pub value_field: String,
    pub title: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub title_color: String,
    pub field_color: String,
    /// Per-label color override, keyed by label text
    pub field_color_map: HashMap<String, String>,
    pub inner_radius_pct: f32,
    pub outer_radius_pct: f32,
    pub rose_type: RoseType,
    pub show_legend: bool,
    pub tooltip_format: String,
    pub label_font_color: String,
    pub label_font_size: f32,
    pub label_position: LabelPosition,
    pub enable_animation: bool,
    pub chart_kind: ChartKind,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self::from_raw(&RawPanelOptions::default())
    }
}

impl PanelOptions {
    /// Parse the stringly option bag into the typed record.
    ///
    /// Unknown enum strings fall back to their default variant; a malformed
    /// color map degrades to no overrides.
    pub fn from_raw(raw: &RawPanelOptions) -> Self {
        Self {
            label_field: raw.x_field.clone(),
            value_field: raw.y_field.clone(),
            title: raw.title.clone(),
            font_size: raw.font_size,
            font_weight: FontWeight::parse(&raw.font_weight),
            title_color: raw.title_color.clone(),
            field_color: raw.field_color.clone(),
            field_color_map: parse_color_map(&raw.field_color_map),
            inner_radius_pct: raw.inner_radius,
            outer_radius_pct: raw.outer_radius,
            rose_type: RoseType::parse(&raw.rose_type),
            show_legend: parse_flag(&raw.show_legend),
            tooltip_format: raw.tooltip_format.clone(),
            label_font_color: raw.label_font_color.clone(),
            label_font_size: raw.label_font_size,
            label_position: LabelPosition::parse(&raw.label_position),
            enable_animation: parse_flag(&raw.enable_animation),
            chart_kind: ChartKind::parse(&raw.chart_type),
        }
    }

    /// The two field names the extractor needs.
    pub fn selection(&self) -> SeriesSelection {
        SeriesSelection {
            label_field: Some(self.label_field.clone()),
            value_field: Some(self.value_field.clone()),
        }
    }
}

// The host emits exactly "true"/"false"; anything else reads as false.
fn parse_flag(s: &str) -> bool {
    s == "true"
}

/// Parse the JSON-encoded per-label color override map.
///
/// Malformed input degrades to no overrides.
pub fn parse_color_map(json: &str) -> HashMap<String, String> {
    if json.trim().is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str(json) {
        Ok(map) => map,
        Err(e) => {
            warn!("Ignoring malformed field color map: {}", e);
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PanelOptions::default();

        assert_eq!(options.label_field, "Site");
        assert_eq!(options.value_field, "Count");
        assert_eq!(options.chart_kind, ChartKind::Nightingale);
        assert_eq!(options.rose_type, RoseType::Radius);
        assert_eq!(options.label_position, LabelPosition::Outside);
        assert_eq!(options.inner_radius_pct, 25.0);
        assert_eq!(options.outer_radius_pct, 100.0);
        assert!(options.show_legend);
        assert!(options.enable_animation);
        assert!(options.field_color_map.is_empty());
        assert_eq!(options.tooltip_format, "{b}: {c} ({d}%)");
    }

    #[test]
    fn test_string_flags() {
        let mut raw = RawPanelOptions::default();
        raw.show_legend = "false".to_string();
        raw.enable_animation = "nonsense".to_string();

        let options = PanelOptions::from_raw(&raw);
        assert!(!options.show_legend);
        assert!(!options.enable_animation);
    }

    #[test]
    fn test_enum_parsing_with_fallbacks() {
        let mut raw = RawPanelOptions::default();
        raw.chart_type = "SemiDonut".to_string();
        raw.rose_type = "area".to_string();
        raw.label_position = "center".to_string();
        raw.font_weight = "bold".to_string();
        let options = PanelOptions::from_raw(&raw);
        assert_eq!(options.chart_kind, ChartKind::SemiDonut);
        assert_eq!(options.rose_type, RoseType::Area);
        assert_eq!(options.label_position, LabelPosition::Center);
        assert_eq!(options.font_weight, FontWeight::Bold);

        raw.chart_type = "customChart".to_string();
        raw.rose_type = "spiral".to_string();
        let options = PanelOptions::from_raw(&raw);
        assert_eq!(options.chart_kind, ChartKind::Nightingale);
        assert_eq!(options.rose_type, RoseType::Radius);
    }

    #[test]
    fn test_color_map_parsing() {
        let mut raw = RawPanelOptions::default();
        raw.field_color_map = r##"{"Site A": "#FF0000", "Site B": "#00FF00"}"##.to_string();

        let options = PanelOptions::from_raw(&raw);
        assert_eq!(options.field_color_map.len(), 2);
        assert_eq!(options.field_color_map["Site A"], "#FF0000");
    }

    #[test]
    fn test_malformed_color_map_degrades_to_empty() {
        let mut raw = RawPanelOptions::default();
        raw.field_color_map = "{not json".to_string();
        assert!(PanelOptions::from_raw(&raw).field_color_map.is_empty());

        raw.field_color_map = String::new();
        assert!(PanelOptions::from_raw(&raw).field_color_map.is_empty());
    }

    #[test]
    fn test_raw_options_deserialize_from_host_json() {
        let raw: RawPanelOptions = serde_json::from_str(
            r##"{
                "xField": "Region",
                "yField": "Total",
                "roseType": "area",
                "showLegend": "false",
                "fieldColorMap": "{\"West\": \"#112233\"}",
                "chartType": "SemiDonut"
            }"##,
        )
        .unwrap();

        let options = PanelOptions::from_raw(&raw);
        assert_eq!(options.label_field, "Region");
        assert_eq!(options.value_field, "Total");
        assert_eq!(options.rose_type, RoseType::Area);
        assert!(!options.show_legend);
        assert_eq!(options.field_color_map["West"], "#112233");
        assert_eq!(options.chart_kind, ChartKind::SemiDonut);
        // Unspecified fields keep their defaults
        assert_eq!(options.inner_radius_pct, 25.0);
    }

    #[test]
    fn test_selection_carries_both_field_names() {
        let options = PanelOptions::default();
        let selection = options.selection();
        assert_eq!(selection.label_field.as_deref(), Some("Site"));
        assert_eq!(selection.value_field.as_deref(), Some("Count"));
    }
}
