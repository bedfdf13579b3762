//! Multi-select dropdown widget for the **multipick** component model.
//!
//! [`MultiSelect`](multi_select::MultiSelect) implements
//! [`multipick_core::Component`], so it can be embedded in any
//! [`multipick_core::Model`] and placed freely within [`ratatui`] layouts.
//! Sibling dropdowns share a [`Registry`](registry::Registry) that keeps at
//! most one of them open.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`multi_select`] | The dropdown component and its builder |
//! | [`registry`] | One-open-at-a-time coordination and outside-click dismissal |
//! | [`config`] | Partial and resolved configuration, precedence merge |
//! | [`option`] | Option records and ids |
//! | [`button_text`] | Selection summary shown on the button |
//! | [`classes`] | Class-name to style and glyph resolution |
//! | [`highlight`] | Keyboard highlight and scrolling over list rows |
//! | [`text`] | Width-aware label fitting |

pub mod button_text;
pub mod classes;
pub mod config;
pub mod error;
pub mod highlight;
pub mod multi_select;
pub mod option;
pub mod registry;
pub mod text;

pub use config::{DropdownConfig, PartialConfig};
pub use error::{Error, Result};
pub use multi_select::{MultiSelect, MultiSelectBuilder};
pub use option::{OptionId, PickOption};
pub use registry::Registry;
