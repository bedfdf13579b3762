use crate::command::Command;
use crate::event::TerminalEvent;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives a continuous **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) creates the initial state.
/// 2. [`view`](Model::view) renders the current state to a [`ratatui::Frame`].
/// 3. Terminal events are offered to [`event`](Model::event), which maps the
///    ones the model cares about into messages.
/// 4. [`update`](Model::update) processes each message and optionally
///    returns a [`Command`].
/// 5. Steps 2--4 repeat until a command asks to quit.
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state to a ratatui [`Frame`].
    fn view(&self, frame: &mut Frame);

    /// Map a terminal event into a message. Returning `None` drops the event.
    ///
    /// The default implementation ignores every event.
    fn event(&self, event: TerminalEvent) -> Option<Self::Message> {
        let _ = event;
        None
    }
}
