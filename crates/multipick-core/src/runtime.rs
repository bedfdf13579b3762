use crate::command::{Action, Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only the options you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     mouse_capture: true,
///     title: Some("Filters".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, max: 120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse clicks (default: true). Dropdowns need this for
    /// click-to-open and outside-click dismissal.
    pub mouse_capture: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to restore the terminal when a panic unwinds (default: true).
    pub catch_panics: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: true,
            title: None,
            catch_panics: true,
        }
    }
}

/// The program runtime. Manages terminal setup, the event loop, and the
/// full [`Model`] lifecycle.
///
/// Every message is processed to completion (update, then the messages its
/// command produced) before the next terminal event is read, so a model never
/// observes interleaved interactions.
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let model = Program::<App>::new(())?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// Returns an error if terminal initialization fails.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;

        let mut program = Self {
            model,
            terminal,
            options,
            needs_redraw: true,
            should_quit: false,
        };
        tracing::debug!("program initialized");
        program.execute_command(init_cmd);
        Ok(program)
    }

    /// Run the program until a command asks to quit or ctrl-c is received.
    /// Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;
        tracing::debug!("shutting down");
        restore_terminal(self.options.alt_screen)?;
        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("received ctrl+c signal");
                    return Ok(());
                }

                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(msg) = self.model.event(TerminalEvent::from(event)) {
                            self.process_message(msg);
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                },

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
        Ok(())
    }

    /// Run `update` for a message and for every synchronous message its
    /// command produces, depth-first, before returning.
    fn process_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);
        self.needs_redraw = true;
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.process_message(msg),
            CommandInner::Action(Action::Quit) => self.should_quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| {
            self.model.view(frame);
        })?;
        Ok(())
    }
}

fn init_terminal(
    options: &ProgramOptions,
) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Install the restoring panic hook only once to avoid stacking.
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();
    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.mouse_capture {
        execute!(writer, EnableMouseCapture)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(writer))?;
    Ok(terminal)
}

fn restore_terminal(alt_screen: bool) -> Result<(), io::Error> {
    // Best effort: keep restoring even if a step fails, report raw mode.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
