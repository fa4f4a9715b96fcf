//! Segment building shared by the chart views
//!
//! Turns an extracted series plus the panel options into drawable
//! segments: one per row, with its angular fraction, rose radius scale and
//! resolved color. Pure so the geometry is testable without a UI.

use egui::Color32;

use rp_core::options::{PanelOptions, RoseType};
use rp_core::{ChartSeries, ScalarValue};

use crate::colors::{categorical_color, parse_color};

/// One drawable chart segment
#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    /// Display name, from the label cell
    pub name: String,
    /// The raw value cell, kept for tooltip display
    pub raw_value: ScalarValue,
    /// Numeric magnitude; non-numeric and non-positive cells count as zero
    pub value: f64,
    /// Share of the total sweep, 0..=1
    pub fraction: f64,
    /// Outer-radius multiplier per the rose sub-mode, 0..=1
    pub radius_scale: f32,
    pub color: Color32,
}

/// Build segments in row order from an extracted series.
pub fn build_segments(series: &ChartSeries, options: &PanelOptions) -> Vec<PieSegment> {
    let magnitudes: Vec<f64> = series
        .values
        .iter()
        .map(|v| v.as_f64().filter(|m| *m > 0.0).unwrap_or(0.0))
        .collect();

    let total: f64 = magnitudes.iter().sum();
    let max = magnitudes.iter().cloned().fold(0.0_f64, f64::max);

    series
        .labels
        .iter()
        .zip(series.values.iter())
        .zip(magnitudes.iter())
        .enumerate()
        .map(|(index, ((label, raw_value), &value))| {
            let name = label.to_string();

            let fraction = if total > 0.0 { value / total } else { 0.0 };
            let relative = if max > 0.0 { value / max } else { 0.0 };
            let radius_scale = match options.rose_type {
                RoseType::Radius => relative,
                // Area tracks the value when the radius grows with sqrt
                RoseType::Area => relative.sqrt(),
            } as f32;

            let color = options
                .field_color_map
                .get(&name)
                .and_then(|c| parse_color(c))
                .unwrap_or_else(|| categorical_color(index));

            PieSegment {
                name,
                raw_value: raw_value.clone(),
                value,
                fraction,
                radius_scale,
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn series(labels: &[&str], values: &[ScalarValue]) -> ChartSeries {
        ChartSeries {
            label_field: "Site".to_string(),
            value_field: "Count".to_string(),
            labels: labels.iter().map(|s| ScalarValue::Str(s.to_string())).collect(),
            values: values.to_vec(),
        }
    }

    fn int_series(labels: &[&str], values: &[i64]) -> ChartSeries {
        series(
            labels,
            &values.iter().map(|v| ScalarValue::Int(*v)).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let segments = build_segments(
            &int_series(&["A", "B", "C"], &[1, 2, 5]),
            &PanelOptions::default(),
        );

        let sum: f64 = segments.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(segments[2].fraction, 5.0 / 8.0);
    }

    #[test]
    fn test_row_order_is_preserved() {
        let segments = build_segments(&int_series(&["B", "A"], &[1, 2]), &PanelOptions::default());
        assert_eq!(segments[0].name, "B");
        assert_eq!(segments[1].name, "A");
    }

    #[test]
    fn test_non_numeric_and_negative_values_get_zero_sweep() {
        let segments = build_segments(
            &series(
                &["A", "B", "C"],
                &[
                    ScalarValue::Int(5),
                    ScalarValue::Str("oops".to_string()),
                    ScalarValue::Int(-3),
                ],
            ),
            &PanelOptions::default(),
        );

        assert_eq!(segments[0].fraction, 1.0);
        assert_eq!(segments[1].fraction, 0.0);
        assert_eq!(segments[2].fraction, 0.0);
    }

    #[test]
    fn test_zero_total_yields_zero_fractions() {
        let segments = build_segments(&int_series(&["A", "B"], &[0, 0]), &PanelOptions::default());
        assert!(segments.iter().all(|s| s.fraction == 0.0));
        assert!(segments.iter().all(|s| s.radius_scale == 0.0));
    }

    #[test]
    fn test_radius_vs_area_scaling() {
        let series = int_series(&["A", "B"], &[1, 4]);

        let mut options = PanelOptions::default();
        options.rose_type = RoseType::Radius;
        let radius = build_segments(&series, &options);
        assert_eq!(radius[0].radius_scale, 0.25);
        assert_eq!(radius[1].radius_scale, 1.0);

        options.rose_type = RoseType::Area;
        let area = build_segments(&series, &options);
        assert_eq!(area[0].radius_scale, 0.5);
        assert_eq!(area[1].radius_scale, 1.0);
    }

    #[test]
    fn test_color_map_override_wins_over_palette() {
        let mut options = PanelOptions::default();
        options.field_color_map =
            HashMap::from([("B".to_string(), "#FF0000".to_string())]);

        let segments = build_segments(&int_series(&["A", "B"], &[1, 1]), &options);
        assert_eq!(segments[0].color, categorical_color(0));
        assert_eq!(segments[1].color, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_unparsable_override_falls_back_to_palette() {
        let mut options = PanelOptions::default();
        options.field_color_map =
            HashMap::from([("A".to_string(), "definitely-not-a-color".to_string())]);

        let segments = build_segments(&int_series(&["A"], &[1]), &options);
        assert_eq!(segments[0].color, categorical_color(0));
    }

    #[test]
    fn test_tooltip_keeps_raw_value() {
        let segments = build_segments(
            &series(&["A"], &[ScalarValue::Float(2.5)]),
            &PanelOptions::default(),
        );
        assert_eq!(segments[0].raw_value, ScalarValue::Float(2.5));
    }
}
