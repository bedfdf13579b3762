//! **multipick** -- a multi-select dropdown widget for [`ratatui`] applications.
//!
//! This is the umbrella crate that re-exports everything needed to put
//! dropdowns in an application from a single dependency:
//!
//! * All public items from [`multipick_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`], etc.).
//! * The [`widgets`] module re-exports [`multipick_widgets`].
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use multipick::widgets::{multi_select, MultiSelect, PickOption, Registry};
//! use multipick::{Command, Component, Model, TerminalEvent};
//!
//! struct App { registry: Registry, regions: MultiSelect }
//!
//! enum Msg { Regions(multi_select::Message), Pointer(crossterm::event::MouseEvent) }
//!
//! impl Model for App {
//!     // ...
//!     fn event(&self, event: TerminalEvent) -> Option<Msg> {
//!         match event {
//!             TerminalEvent::Mouse(m) => Some(Msg::Pointer(m)),
//!             _ => None,
//!         }
//!     }
//! }
//! ```
//!
//! See `demos/multi_select.rs` for a complete program.

pub use multipick_core::*;
pub mod widgets {
    pub use multipick_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
