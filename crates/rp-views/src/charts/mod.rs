//! Chart view implementations

pub mod nightingale;
pub mod segments;
pub mod semi_donut;

// Re-exports
pub use nightingale::NightingaleView;
pub use segments::{build_segments, PieSegment};
pub use semi_donut::SemiDonutView;

use egui::{Color32, Painter, Pos2, Shape, Stroke, Vec2};

/// Displacement from a center point at `angle` radians and `radius` pixels.
///
/// Screen coordinates have y pointing down, so increasing angles sweep
/// clockwise; -pi/2 points at 12 o'clock.
pub(crate) fn polar_offset(angle: f64, radius: f32) -> Vec2 {
    Vec2::new(radius * angle.cos() as f32, radius * angle.sin() as f32)
}

/// Draw one filled ring sector between two radii and two angles.
pub(crate) fn draw_sector(
    painter: &Painter,
    center: Pos2,
    inner_radius: f32,
    outer_radius: f32,
    start_angle: f64,
    end_angle: f64,
    color: Color32,
) {
    let span = end_angle - start_angle;
    if span <= 0.0 || outer_radius <= inner_radius {
        return;
    }

    // One quad per ~1 degree of arc keeps the outline smooth
    let segments = ((span * 180.0 / std::f64::consts::PI).ceil() as usize).max(2);

    let mut inner_points = Vec::with_capacity(segments + 1);
    let mut outer_points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let angle = start_angle + span * (i as f64 / segments as f64);
        inner_points.push(center + polar_offset(angle, inner_radius));
        outer_points.push(center + polar_offset(angle, outer_radius));
    }

    let stroke = Stroke::new(1.0, Color32::from_gray(30));
    for i in 0..segments {
        let quad = vec![
            inner_points[i],
            outer_points[i],
            outer_points[i + 1],
            inner_points[i + 1],
        ];
        painter.add(Shape::convex_polygon(quad, color, stroke));
    }
}

/// Whether `angle` falls inside the arc `[start, end)`.
///
/// `angle` comes straight from `atan2` in (-pi, pi]; the arc may run past
/// pi, so the angle is lifted into the arc's own turn first.
pub(crate) fn angle_contains(start: f64, end: f64, angle: f64) -> bool {
    const TAU: f64 = std::f64::consts::TAU;
    let mut a = angle;
    while a < start {
        a += TAU;
    }
    while a >= start + TAU {
        a -= TAU;
    }
    a < end
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_contains_simple_arc() {
        assert!(angle_contains(0.0, FRAC_PI_2, 0.5));
        assert!(!angle_contains(0.0, FRAC_PI_2, 2.0));
        assert!(angle_contains(0.0, FRAC_PI_2, 0.0));
        assert!(!angle_contains(0.0, FRAC_PI_2, FRAC_PI_2));
    }

    #[test]
    fn test_angle_contains_wrapping_arc() {
        // Arc running from 12 o'clock past the atan2 seam
        let start = 3.0 * FRAC_PI_2 - 0.1;
        let end = start + 0.5;
        assert!(angle_contains(start, end, -FRAC_PI_2));
        assert!(!angle_contains(start, end, 0.0));
    }

    #[test]
    fn test_angle_contains_semicircle() {
        // The semi-donut sweep [pi, 2*pi)
        assert!(angle_contains(PI, 2.0 * PI, PI));
        assert!(angle_contains(PI, 2.0 * PI, -FRAC_PI_2));
        assert!(!angle_contains(PI, 2.0 * PI, FRAC_PI_2));
    }
}
