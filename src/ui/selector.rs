//! Single-select dropdown driving a chart recompute.

use eframe::egui;

/// The one user-controlled value per chart. The option list comes from the
/// governing table's identifier column; the default is a fixed literal and is
/// kept even when absent from the options (the pipeline then degrades to an
/// empty chart).
pub struct Selector {
    id: String,
    options: Vec<String>,
    value: String,
}

impl Selector {
    pub fn new(id: &str, options: Vec<String>, default: &str) -> Self {
        Self {
            id: id.to_string(),
            options,
            value: default.to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Swap in a new option set (dependent dropdowns). When the set actually
    /// changes, the value resets to the first option in its stable order.
    /// Returns true on change.
    pub fn replace_options(&mut self, options: Vec<String>) -> bool {
        if options == self.options {
            return false;
        }
        self.value = options.first().cloned().unwrap_or_default();
        self.options = options;
        true
    }

    /// Render the dropdown; returns true when the user picked a new value.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        egui::ComboBox::from_id_salt(&self.id)
            .selected_text(self.value.clone())
            .width(240.0)
            .show_ui(ui, |ui| {
                for option in &self.options {
                    if ui
                        .selectable_value(&mut self.value, option.clone(), option)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_literal_is_kept_even_when_absent() {
        let selector = Selector::new("s", vec!["AML".into(), "CLL".into()], "GONE");
        assert_eq!(selector.value(), "GONE");
    }

    #[test]
    fn test_replace_options_resets_to_first() {
        let mut selector = Selector::new("s", vec!["b".into(), "c".into()], "c");
        assert!(selector.replace_options(vec!["x".into(), "y".into()]));
        assert_eq!(selector.value(), "x");
    }

    #[test]
    fn test_replace_with_same_options_keeps_value() {
        let mut selector = Selector::new("s", vec!["b".into(), "c".into()], "c");
        assert!(!selector.replace_options(vec!["b".into(), "c".into()]));
        assert_eq!(selector.value(), "c");
    }

    #[test]
    fn test_replace_with_empty_set_clears_value() {
        let mut selector = Selector::new("s", vec!["b".into()], "b");
        assert!(selector.replace_options(Vec::new()));
        assert_eq!(selector.value(), "");
        assert!(!selector.has_options());
    }
}
