//! Summary text shown on a dropdown's button.

use crate::option::PickOption;

/// Text shown when every option is selected.
pub const ALL_TEXT: &str = "All";

/// Summarize the current selection.
///
/// * nothing selected: empty
/// * everything selected: `"All"`
/// * one selected: its display text
/// * otherwise: `"(N) "` followed by the selected displays joined by `", "`
///
/// Always derived from the options as they are now.
pub fn button_text(options: &[PickOption]) -> String {
    let selected: Vec<&str> = options
        .iter()
        .filter(|o| o.is_selected)
        .map(|o| o.display.as_str())
        .collect();

    match selected.len() {
        0 => String::new(),
        n if n == options.len() => ALL_TEXT.to_string(),
        1 => selected[0].to_string(),
        n => format!("({n}) {}", selected.join(", ")),
    }
}
