use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` is nearly identical to [`Model`](crate::Model) but its
/// [`view`](Component::view) method receives an `area: Rect`, so a parent
/// decides *where* each child renders by passing it a sub-region of the frame.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] to translate the commands it returns:
///
/// ```rust,ignore
/// use multipick_core::{Command, Component, Model};
/// use multipick_widgets::multi_select::{self, MultiSelect};
///
/// struct App { regions: MultiSelect }
///
/// enum AppMsg { Regions(multi_select::Message) }
///
/// impl Model for App {
///     // ...
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Regions(m) => self.regions.update(m).map(AppMsg::Regions),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it into the parent
    /// message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A parent can query `focused()` to decide which child should receive
    /// keyboard events. The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
