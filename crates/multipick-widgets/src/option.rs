//! Option records shown in a [`MultiSelect`](crate::multi_select::MultiSelect).

use std::fmt;

/// Id reserved for the synthetic "select all" option.
pub const SELECT_ALL_ID: &str = "select-all";

/// Identity of an option, unique within one widget's option list.
///
/// Hosts key options either by number or by string; the two never compare
/// equal, so `1` and `"1"` are distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionId::Number(n) => write!(f, "{n}"),
            OptionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(n: i64) -> Self {
        OptionId::Number(n)
    }
}

impl From<i32> for OptionId {
    fn from(n: i32) -> Self {
        OptionId::Number(n.into())
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        OptionId::Text(s.to_string())
    }
}

impl From<String> for OptionId {
    fn from(s: String) -> Self {
        OptionId::Text(s)
    }
}

/// One selectable item.
///
/// `value` is what the host acts on; `display` is what the user sees. The
/// select-all record has no value unless one is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PickOption {
    pub id: OptionId,
    pub display: String,
    pub value: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_selected: bool,
}

impl PickOption {
    /// An unselected option whose value is `value`.
    pub fn new(
        id: impl Into<OptionId>,
        display: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            value: Some(value.into()),
            is_selected: false,
        }
    }

    /// Mark the option selected.
    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    /// The placeholder select-all record a widget holds before (or without)
    /// the select-all feature.
    pub fn select_all_placeholder() -> Self {
        Self {
            id: OptionId::from(SELECT_ALL_ID),
            display: String::new(),
            value: None,
            is_selected: false,
        }
    }

    pub fn is_select_all(&self) -> bool {
        matches!(&self.id, OptionId::Text(s) if s == SELECT_ALL_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_differ() {
        assert_ne!(OptionId::from(1), OptionId::from("1"));
        assert_eq!(OptionId::from(1).to_string(), "1");
        assert_eq!(OptionId::from("first").to_string(), "first");
    }

    #[test]
    fn new_option_is_unselected() {
        let opt = PickOption::new(1, "First Option", "[First].[Option]");
        assert!(!opt.is_selected);
        assert_eq!(opt.value.as_deref(), Some("[First].[Option]"));
        assert!(opt.selected().is_selected);
    }

    #[test]
    fn placeholder_is_select_all() {
        let placeholder = PickOption::select_all_placeholder();
        assert!(placeholder.is_select_all());
        assert!(!placeholder.is_selected);
        assert!(!PickOption::new("a", "A", "a").is_select_all());
    }
}
