//! Color utilities for the chart views

use egui::Color32;

/// Get a categorical color from the default palette
pub fn categorical_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(84, 112, 198),   // Blue
        Color32::from_rgb(145, 204, 117),  // Green
        Color32::from_rgb(250, 200, 88),   // Yellow
        Color32::from_rgb(238, 102, 102),  // Red
        Color32::from_rgb(115, 192, 222),  // Light blue
        Color32::from_rgb(59, 162, 114),   // Teal
        Color32::from_rgb(252, 132, 82),   // Orange
        Color32::from_rgb(154, 96, 180),   // Purple
    ];
    PALETTE[index % PALETTE.len()]
}

/// Parse a user-supplied color string.
///
/// Accepts `#rgb`, `#rrggbb` and the named colors the panel options use.
/// Returns None for anything unrecognized so callers can keep their
/// default.
pub fn parse_color(s: &str) -> Option<Color32> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    match s.to_ascii_lowercase().as_str() {
        "white" => Some(Color32::WHITE),
        "black" => Some(Color32::BLACK),
        "red" => Some(Color32::from_rgb(255, 0, 0)),
        "green" => Some(Color32::from_rgb(0, 128, 0)),
        "blue" => Some(Color32::from_rgb(0, 0, 255)),
        "yellow" => Some(Color32::from_rgb(255, 255, 0)),
        "orange" => Some(Color32::from_rgb(255, 165, 0)),
        "purple" => Some(Color32::from_rgb(128, 0, 128)),
        "pink" => Some(Color32::from_rgb(255, 192, 203)),
        "cyan" => Some(Color32::from_rgb(0, 255, 255)),
        "magenta" => Some(Color32::from_rgb(255, 0, 255)),
        "gray" | "grey" => Some(Color32::from_rgb(128, 128, 128)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        // #rgb shorthand: each digit doubles
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color32::from_rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#FF0000"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_color("#00ff00"), Some(Color32::from_rgb(0, 255, 0)));
        assert_eq!(parse_color("#333"), Some(Color32::from_rgb(51, 51, 51)));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("white"), Some(Color32::WHITE));
        assert_eq!(parse_color("White "), Some(Color32::WHITE));
        assert_eq!(parse_color("grey"), parse_color("gray"));
    }

    #[test]
    fn test_invalid_colors() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(categorical_color(0), categorical_color(8));
        assert_ne!(categorical_color(0), categorical_color(1));
    }
}
