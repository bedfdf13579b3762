//! Dropdown configuration and its precedence merge.
//!
//! A widget receives two partial configurations: per-field overrides and a
//! configuration object. [`DropdownConfig::resolve`] picks each field from
//! the override, then the configuration object, then the built-in default.
//! A list-valued field only counts as present when it is non-empty.

use std::collections::BTreeMap;

/// Text shown on the select-all row unless configured.
pub const DEFAULT_SELECT_ALL_TEXT: &str = "(Select All)";

const DEFAULT_BUTTON_CLASSES: &[&str] = &["btn", "btn-default"];
const DEFAULT_BUTTON_ICON_CLASSES: &[&str] = &["fa", "fa-angle-down", "align-self-center"];
const DEFAULT_BUTTON_WRAPPER_CLASSES: &[&str] = &["d-flex"];
const DEFAULT_CHECKED_CLASSES: &[&str] = &["fa", "fa-check-square-o"];
const DEFAULT_UNCHECKED_CLASSES: &[&str] = &["fa", "fa-square-o"];
const DEFAULT_OPTION_CLASSES: &[&str] = &["multi-select-option"];

/// Substring marking a column-layout class (`col`, `col-6`, `col-md-4`, ...).
const COLUMN_MARKER: &str = "col";

/// Style declarations for the button text, e.g. `{"flex": "1"}`.
pub type TextStyles = BTreeMap<String, String>;

/// A configuration where every field is optional.
///
/// Used both for per-field overrides and for a configuration object supplied
/// by the host. Absent fields fall through to the next source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PartialConfig {
    pub add_select_all_option: Option<bool>,
    pub allow_multiple: Option<bool>,
    pub button_classes: Option<Vec<String>>,
    pub button_icon_classes: Option<Vec<String>>,
    pub button_text_styles: Option<TextStyles>,
    pub button_wrapper_classes: Option<Vec<String>>,
    pub checked_classes: Option<Vec<String>>,
    pub container_classes: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(alias = "labelText"))]
    pub label: Option<String>,
    pub list_classes: Option<Vec<String>>,
    pub option_classes: Option<Vec<String>>,
    pub select_all_by_default: Option<bool>,
    pub select_all_text: Option<String>,
    pub select_all_value: Option<String>,
    pub unchecked_classes: Option<Vec<String>>,
}

fn classes<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_add_select_all_option(mut self, enabled: bool) -> Self {
        self.add_select_all_option = Some(enabled);
        self
    }

    pub fn with_allow_multiple(mut self, allowed: bool) -> Self {
        self.allow_multiple = Some(allowed);
        self
    }

    pub fn with_button_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.button_classes = Some(classes(items));
        self
    }

    pub fn with_button_icon_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.button_icon_classes = Some(classes(items));
        self
    }

    /// Replace the button text style declarations.
    pub fn with_button_text_styles<I, K, V>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.button_text_styles = Some(
            styles
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn with_button_wrapper_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.button_wrapper_classes = Some(classes(items));
        self
    }

    pub fn with_checked_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.checked_classes = Some(classes(items));
        self
    }

    pub fn with_container_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.container_classes = Some(classes(items));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_list_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.list_classes = Some(classes(items));
        self
    }

    pub fn with_option_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.option_classes = Some(classes(items));
        self
    }

    pub fn with_select_all_by_default(mut self, enabled: bool) -> Self {
        self.select_all_by_default = Some(enabled);
        self
    }

    pub fn with_select_all_text(mut self, text: impl Into<String>) -> Self {
        self.select_all_text = Some(text.into());
        self
    }

    pub fn with_select_all_value(mut self, value: impl Into<String>) -> Self {
        self.select_all_value = Some(value.into());
        self
    }

    pub fn with_unchecked_classes<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.unchecked_classes = Some(classes(items));
        self
    }
}

/// A fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownConfig {
    pub add_select_all_option: bool,
    pub allow_multiple: bool,
    pub button_classes: Vec<String>,
    pub button_icon_classes: Vec<String>,
    pub button_text_styles: TextStyles,
    pub button_wrapper_classes: Vec<String>,
    pub checked_classes: Vec<String>,
    pub container_classes: Vec<String>,
    pub label: Option<String>,
    pub list_classes: Vec<String>,
    pub option_classes: Vec<String>,
    pub select_all_by_default: bool,
    pub select_all_text: String,
    pub select_all_value: Option<String>,
    pub unchecked_classes: Vec<String>,
}

fn first_of<T: Clone>(overrides: &Option<T>, prior: &Option<T>) -> Option<T> {
    overrides.as_ref().or(prior.as_ref()).cloned()
}

fn first_list(
    overrides: &Option<Vec<String>>,
    prior: &Option<Vec<String>>,
    default: &[&str],
) -> Vec<String> {
    [overrides, prior]
        .into_iter()
        .flatten()
        .find(|list| !list.is_empty())
        .cloned()
        .unwrap_or_else(|| classes(default.iter().copied()))
}

fn is_column_class(class: &str) -> bool {
    class.contains(COLUMN_MARKER)
}

impl DropdownConfig {
    /// Merge `overrides` over `prior` over the built-in defaults.
    ///
    /// Pure: the same inputs always produce the same configuration.
    pub fn resolve(overrides: &PartialConfig, prior: &PartialConfig) -> Self {
        let (o, p) = (overrides, prior);
        Self {
            add_select_all_option: first_of(&o.add_select_all_option, &p.add_select_all_option)
                .unwrap_or(false),
            allow_multiple: first_of(&o.allow_multiple, &p.allow_multiple)
                .unwrap_or(true),
            button_classes: first_list(
                &o.button_classes,
                &p.button_classes,
                DEFAULT_BUTTON_CLASSES,
            ),
            button_icon_classes: first_list(
                &o.button_icon_classes,
                &p.button_icon_classes,
                DEFAULT_BUTTON_ICON_CLASSES,
            ),
            button_text_styles: first_of(&o.button_text_styles, &p.button_text_styles)
                .unwrap_or_else(|| TextStyles::from([("flex".to_string(), "1".to_string())])),
            button_wrapper_classes: first_list(
                &o.button_wrapper_classes,
                &p.button_wrapper_classes,
                DEFAULT_BUTTON_WRAPPER_CLASSES,
            ),
            checked_classes: first_list(
                &o.checked_classes,
                &p.checked_classes,
                DEFAULT_CHECKED_CLASSES,
            ),
            container_classes: first_list(&o.container_classes, &p.container_classes, &[]),
            label: first_of(&o.label, &p.label),
            list_classes: first_list(&o.list_classes, &p.list_classes, &[]),
            option_classes: first_list(
                &o.option_classes,
                &p.option_classes,
                DEFAULT_OPTION_CLASSES,
            ),
            select_all_by_default: first_of(&o.select_all_by_default, &p.select_all_by_default)
                .unwrap_or(false),
            select_all_text: first_of(&o.select_all_text, &p.select_all_text)
                .unwrap_or_else(|| DEFAULT_SELECT_ALL_TEXT.to_string()),
            select_all_value: first_of(&o.select_all_value, &p.select_all_value),
            unchecked_classes: first_list(
                &o.unchecked_classes,
                &p.unchecked_classes,
                DEFAULT_UNCHECKED_CLASSES,
            ),
        }
    }

    /// Apply the post-merge adjustments, in order:
    ///
    /// 1. When the list has no column class but the button does, the first
    ///    column class of the button is appended to the list so both line up.
    /// 2. Select-all is switched off when only one option may be selected.
    ///
    /// Running it again leaves the configuration unchanged.
    pub fn normalize(&mut self) {
        if !self.list_classes.iter().any(|c| is_column_class(c)) {
            if let Some(column) = self.button_classes.iter().find(|c| is_column_class(c)) {
                self.list_classes.push(column.clone());
            }
        }

        if !self.allow_multiple {
            self.add_select_all_option = false;
        }
    }

    /// Relative width of the button text, read from its `flex` declaration.
    /// Missing or unparsable declarations count as `1`.
    pub fn button_text_flex(&self) -> u16 {
        self.button_text_styles
            .get("flex")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(1)
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self::resolve(&PartialConfig::default(), &PartialConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = DropdownConfig::default();
        assert!(!config.add_select_all_option);
        assert!(config.allow_multiple);
        assert_eq!(config.button_classes, strings(&["btn", "btn-default"]));
        assert_eq!(
            config.button_icon_classes,
            strings(&["fa", "fa-angle-down", "align-self-center"])
        );
        assert_eq!(
            config.button_text_styles.get("flex").map(String::as_str),
            Some("1")
        );
        assert_eq!(config.button_wrapper_classes, strings(&["d-flex"]));
        assert_eq!(
            config.checked_classes,
            strings(&["fa", "fa-check-square-o"])
        );
        assert!(config.container_classes.is_empty());
        assert_eq!(config.label, None);
        assert!(config.list_classes.is_empty());
        assert_eq!(config.option_classes, strings(&["multi-select-option"]));
        assert!(!config.select_all_by_default);
        assert_eq!(config.select_all_text, "(Select All)");
        assert_eq!(config.select_all_value, None);
        assert_eq!(config.unchecked_classes, strings(&["fa", "fa-square-o"]));
    }

    #[test]
    fn override_beats_prior() {
        let overrides = PartialConfig::new()
            .with_add_select_all_option(true)
            .with_allow_multiple(false)
            .with_button_classes(["override-btn"])
            .with_button_icon_classes(["override-icon"])
            .with_button_text_styles([("flex", "3")])
            .with_button_wrapper_classes(["override-wrapper"])
            .with_checked_classes(["override-checked"])
            .with_container_classes(["override-container"])
            .with_label("Override")
            .with_list_classes(["override-list"])
            .with_option_classes(["override-option"])
            .with_select_all_by_default(true)
            .with_select_all_text("Everything")
            .with_select_all_value("override-value")
            .with_unchecked_classes(["override-unchecked"]);
        let prior = PartialConfig::new()
            .with_add_select_all_option(false)
            .with_allow_multiple(true)
            .with_button_classes(["prior-btn"])
            .with_button_icon_classes(["prior-icon"])
            .with_button_text_styles([("flex", "2")])
            .with_button_wrapper_classes(["prior-wrapper"])
            .with_checked_classes(["prior-checked"])
            .with_container_classes(["prior-container"])
            .with_label("Prior")
            .with_list_classes(["prior-list"])
            .with_option_classes(["prior-option"])
            .with_select_all_by_default(false)
            .with_select_all_text("Prior text")
            .with_select_all_value("prior-value")
            .with_unchecked_classes(["prior-unchecked"]);

        let config = DropdownConfig::resolve(&overrides, &prior);
        assert!(config.add_select_all_option);
        assert!(!config.allow_multiple);
        assert_eq!(config.button_classes, strings(&["override-btn"]));
        assert_eq!(config.button_icon_classes, strings(&["override-icon"]));
        assert_eq!(config.button_text_flex(), 3);
        assert_eq!(
            config.button_wrapper_classes,
            strings(&["override-wrapper"])
        );
        assert_eq!(config.checked_classes, strings(&["override-checked"]));
        assert_eq!(config.container_classes, strings(&["override-container"]));
        assert_eq!(config.label.as_deref(), Some("Override"));
        assert_eq!(config.list_classes, strings(&["override-list"]));
        assert_eq!(config.option_classes, strings(&["override-option"]));
        assert!(config.select_all_by_default);
        assert_eq!(config.select_all_text, "Everything");
        assert_eq!(config.select_all_value.as_deref(), Some("override-value"));
        assert_eq!(config.unchecked_classes, strings(&["override-unchecked"]));
    }

    #[test]
    fn prior_beats_default() {
        let prior = PartialConfig::new()
            .with_add_select_all_option(true)
            .with_allow_multiple(false)
            .with_button_classes(["prior-btn"])
            .with_button_icon_classes(["prior-icon"])
            .with_button_text_styles([("flex", "2")])
            .with_button_wrapper_classes(["prior-wrapper"])
            .with_checked_classes(["prior-checked"])
            .with_container_classes(["prior-container"])
            .with_label("Prior")
            .with_list_classes(["prior-list"])
            .with_option_classes(["prior-option"])
            .with_select_all_by_default(true)
            .with_select_all_text("Prior text")
            .with_select_all_value("prior-value")
            .with_unchecked_classes(["prior-unchecked"]);

        let config = DropdownConfig::resolve(&PartialConfig::default(), &prior);
        assert!(config.add_select_all_option);
        assert!(!config.allow_multiple);
        assert_eq!(config.button_classes, strings(&["prior-btn"]));
        assert_eq!(config.button_icon_classes, strings(&["prior-icon"]));
        assert_eq!(config.button_text_flex(), 2);
        assert_eq!(config.button_wrapper_classes, strings(&["prior-wrapper"]));
        assert_eq!(config.checked_classes, strings(&["prior-checked"]));
        assert_eq!(config.container_classes, strings(&["prior-container"]));
        assert_eq!(config.label.as_deref(), Some("Prior"));
        assert_eq!(config.list_classes, strings(&["prior-list"]));
        assert_eq!(config.option_classes, strings(&["prior-option"]));
        assert!(config.select_all_by_default);
        assert_eq!(config.select_all_text, "Prior text");
        assert_eq!(config.select_all_value.as_deref(), Some("prior-value"));
        assert_eq!(config.unchecked_classes, strings(&["prior-unchecked"]));
    }

    #[test]
    fn explicit_false_override_is_not_skipped() {
        let overrides = PartialConfig::new().with_allow_multiple(false);
        let prior = PartialConfig::new().with_allow_multiple(true);
        assert!(!DropdownConfig::resolve(&overrides, &prior).allow_multiple);
    }

    #[test]
    fn empty_list_falls_through() {
        let empty: [&str; 0] = [];
        let overrides = PartialConfig::new().with_button_classes(empty);
        let prior = PartialConfig::new().with_button_classes(["prior-btn"]);
        let config = DropdownConfig::resolve(&overrides, &prior);
        assert_eq!(config.button_classes, strings(&["prior-btn"]));

        let both_empty = PartialConfig::new()
            .with_checked_classes(empty)
            .with_list_classes(empty);
        let config = DropdownConfig::resolve(&both_empty, &both_empty);
        assert_eq!(
            config.checked_classes,
            strings(&["fa", "fa-check-square-o"])
        );
        assert!(config.list_classes.is_empty());
    }

    #[test]
    fn empty_text_styles_count_as_present() {
        let no_styles: [(&str, &str); 0] = [];
        let overrides = PartialConfig::new().with_button_text_styles(no_styles);
        let config = DropdownConfig::resolve(&overrides, &PartialConfig::default());
        assert!(config.button_text_styles.is_empty());
        assert_eq!(config.button_text_flex(), 1);
    }

    #[test]
    fn resolve_is_repeatable() {
        let overrides = PartialConfig::new().with_select_all_text("Any");
        let prior = PartialConfig::new().with_list_classes(["list"]);
        assert_eq!(
            DropdownConfig::resolve(&overrides, &prior),
            DropdownConfig::resolve(&overrides, &prior)
        );
    }

    #[test]
    fn single_selection_disables_select_all() {
        let overrides = PartialConfig::new()
            .with_add_select_all_option(true)
            .with_allow_multiple(false);
        let mut config = DropdownConfig::resolve(&overrides, &PartialConfig::default());
        assert!(config.add_select_all_option);
        config.normalize();
        assert!(!config.add_select_all_option);
    }

    #[test]
    fn first_button_column_class_is_copied_to_list() {
        let prior = PartialConfig::new()
            .with_list_classes(["dropdown-list"])
            .with_button_classes(["col-1", "col-12"]);
        let mut config = DropdownConfig::resolve(&PartialConfig::default(), &prior);
        config.normalize();
        assert_eq!(config.list_classes, strings(&["dropdown-list", "col-1"]));

        config.normalize();
        assert_eq!(config.list_classes, strings(&["dropdown-list", "col-1"]));
    }

    #[test]
    fn list_column_class_is_kept() {
        let prior = PartialConfig::new()
            .with_list_classes(["dropdown-list", "col-9"])
            .with_button_classes(["col-1", "col-12"]);
        let mut config = DropdownConfig::resolve(&PartialConfig::default(), &prior);
        config.normalize();
        assert_eq!(config.list_classes, strings(&["dropdown-list", "col-9"]));
    }

    #[test]
    fn no_column_class_anywhere_leaves_list_alone() {
        let mut config = DropdownConfig::default();
        config.normalize();
        assert!(config.list_classes.is_empty());
    }

    #[test]
    fn unparsable_flex_counts_as_one() {
        let overrides = PartialConfig::new()
            .with_button_text_styles([("flex", "wide")]);
        let config = DropdownConfig::resolve(&overrides, &PartialConfig::default());
        assert_eq!(config.button_text_flex(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_camel_case_object() {
        let json = r#"{
            "allowMultiple": false,
            "buttonClasses": ["btn", "col-4"],
            "labelText": "Regions",
            "selectAllText": "Every region"
        }"#;
        let prior: PartialConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(prior.allow_multiple, Some(false));
        assert_eq!(prior.label.as_deref(), Some("Regions"));
        assert_eq!(prior.add_select_all_option, None);

        let config = DropdownConfig::resolve(&PartialConfig::default(), &prior);
        assert_eq!(config.button_classes, strings(&["btn", "col-4"]));
        assert_eq!(config.select_all_text, "Every region");
    }
}
