use crate::command::{Action, Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// `TestProgram` exercises the init/update/view cycle in a plain `#[test]`
/// function. Messages produced by commands are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages), so tests can observe the
/// state between an interaction and the notifications it produced.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<App>::new(());
/// prog.send_event(click(3, 1));
/// prog.drain_messages();
/// assert!(prog.model().regions.is_open());
/// assert!(prog.render_string(40, 6).contains("(Select All)"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            quit: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle. Messages returned by
    /// the update are queued, not processed.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Offer a terminal event to [`Model::event`] and send the resulting
    /// message, if any. Returns whether the model accepted the event.
    pub fn send_event(&mut self, event: TerminalEvent) -> bool {
        match self.model.event(event) {
            Some(msg) => {
                self.send(msg);
                true
            }
            None => false,
        }
    }

    /// Process pending messages until no new ones are generated.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.model.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Messages queued by the last updates and not yet drained.
    pub fn pending(&self) -> &[M::Message] {
        &self.pending_messages
    }

    /// Whether any command so far asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push(msg),
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Flatten a rendered buffer into a string, rows separated by newlines.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::widgets::Paragraph;

    // Collects picked labels; "pick" chains into "picked".
    struct Picker {
        picked: Vec<String>,
    }

    #[derive(Debug)]
    enum PickerMsg {
        Pick(String),
        Picked(String),
        Quit,
    }

    impl Model for Picker {
        type Message = PickerMsg;
        type Flags = Vec<String>;

        fn init(picked: Vec<String>) -> (Self, Command<PickerMsg>) {
            (Picker { picked }, Command::none())
        }

        fn update(&mut self, msg: PickerMsg) -> Command<PickerMsg> {
            match msg {
                PickerMsg::Pick(label) => Command::message(PickerMsg::Picked(label)),
                PickerMsg::Picked(label) => {
                    self.picked.push(label);
                    Command::none()
                }
                PickerMsg::Quit => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.picked.join(", ")), frame.area());
        }

        fn event(&self, event: TerminalEvent) -> Option<PickerMsg> {
            match event.key_press()?.code {
                KeyCode::Char('q') => Some(PickerMsg::Quit),
                KeyCode::Char(c) => Some(PickerMsg::Pick(c.to_string())),
                _ => None,
            }
        }
    }

    fn key(c: char) -> TerminalEvent {
        TerminalEvent::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn init_uses_flags() {
        let prog = TestProgram::<Picker>::new(vec!["a".into()]);
        assert_eq!(prog.model().picked, vec!["a"]);
    }

    #[test]
    fn send_queues_follow_up_messages() {
        let mut prog = TestProgram::<Picker>::new(vec![]);
        prog.send(PickerMsg::Pick("x".into()));
        assert_eq!(prog.pending().len(), 1);
        assert!(prog.model().picked.is_empty());

        prog.drain_messages();
        assert!(prog.pending().is_empty());
        assert_eq!(prog.model().picked, vec!["x"]);
    }

    #[test]
    fn send_event_maps_through_model() {
        let mut prog = TestProgram::<Picker>::new(vec![]);
        assert!(prog.send_event(key('b')));
        assert!(!prog.send_event(TerminalEvent::FocusLost));
        prog.drain_messages();
        assert_eq!(prog.model().picked, vec!["b"]);
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Picker>::new(vec![]);
        prog.send_event(key('q'));
        assert!(prog.quit_requested());
    }

    #[test]
    fn render_string_shows_view() {
        let mut prog = TestProgram::<Picker>::new(vec!["one".into()]);
        prog.send(PickerMsg::Picked("two".into()));
        let content = prog.render_string(20, 2);
        assert!(content.starts_with("one, two"));
        assert_eq!(content.lines().count(), 2);
    }
}
