//! Tooltip and title text formatting

use crate::scalar::ScalarValue;

/// Expand a tooltip template for one segment.
///
/// `{b}` is the segment name, `{c}` the raw value, `{d}` the percentage of
/// the total with two decimal places. Each placeholder is replaced once.
pub fn format_tooltip(template: &str, name: &str, value: &ScalarValue, percent: f64) -> String {
    template
        .replacen("{b}", name, 1)
        .replacen("{c}", &value.to_string(), 1)
        .replacen("{d}", &format!("{:.2}", percent), 1)
}

/// The title used when none is configured.
pub fn default_title(label_field: &str, value_field: &str) -> String {
    format!("{} vs {}", label_field, value_field)
}
