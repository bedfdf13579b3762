//! # Multi-select Example
//!
//! Three dropdowns sharing one `Registry`:
//! - "Regions" allows several choices and has a select-all row
//! - "Teams" is configured from a configuration object
//! - "Sort by" allows a single choice and closes after each pick
//!
//! Opening one dropdown closes the others; clicking outside closes them all.
//! Tab moves focus, Enter/Space opens and picks, Esc closes, q quits.
//! Debug logs go to `multi_select.log`.
//!
//! Run with: `cargo run --example multi_select`

use multipick::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use multipick::ratatui::layout::{Constraint, Layout};
use multipick::ratatui::style::{Color, Style};
use multipick::ratatui::text::Line;
use multipick::ratatui::widgets::{Block, Borders, Paragraph};
use multipick::ratatui::Frame;
use multipick::widgets::classes::StyleSheet;
use multipick::widgets::multi_select::{self, MultiSelect};
use multipick::widgets::{PartialConfig, PickOption, Registry};
use multipick::{Command, Component, Model, ProgramOptions, TerminalEvent};

const FIELDS: usize = 3;

struct FilterApp {
    registry: Registry,
    fields: [MultiSelect; FIELDS],
    focused: usize,
    events: Vec<String>,
}

#[derive(Debug)]
enum Msg {
    Field(usize, multi_select::Message),
    Pointer(MouseEvent),
    Key(KeyEvent),
}

fn regions(registry: &Registry) -> multipick::widgets::Result<MultiSelect> {
    MultiSelect::builder("regions")
        .with_options(vec![
            PickOption::new(1, "North", "region:north"),
            PickOption::new(2, "South", "region:south"),
            PickOption::new(3, "East", "region:east"),
            PickOption::new(4, "West", "region:west"),
        ])
        .with_select_all(true)
        .with_select_all_by_default(true)
        .with_label(" Regions ")
        .build(registry)
}

fn teams(registry: &Registry) -> multipick::widgets::Result<MultiSelect> {
    // A configuration object as a host would load it; overrides still win.
    let config = PartialConfig::new()
        .with_label(" Teams ")
        .with_button_classes(["btn", "btn-primary", "col-4"])
        .with_checked_classes(["fa", "fa-check"])
        .with_select_all_text("Every team");
    MultiSelect::builder("teams")
        .with_options(vec![
            PickOption::new("platform", "Platform", "team:platform"),
            PickOption::new("payments", "Payments", "team:payments"),
            PickOption::new("search", "Search", "team:search"),
            PickOption::new("mobile", "Mobile", "team:mobile"),
            PickOption::new("data", "Data Engineering", "team:data"),
        ])
        .with_config(config)
        .with_overrides(PartialConfig::new().with_add_select_all_option(true))
        .with_stylesheet(
            StyleSheet::new()
                .with_glyph("fa-check", "✓ ")
                .with_highlight(Style::default().fg(Color::Black).bg(Color::Cyan)),
        )
        .with_max_visible(4)
        .build(registry)
}

fn sort_by(registry: &Registry) -> multipick::widgets::Result<MultiSelect> {
    MultiSelect::builder("sort")
        .with_options(vec![
            PickOption::new("newest", "Newest first", "created:desc")
                .selected(),
            PickOption::new("oldest", "Oldest first", "created:asc"),
            PickOption::new("name", "Name", "name:asc"),
        ])
        .with_allow_multiple(false)
        .with_label(" Sort by ")
        .build(registry)
}

impl FilterApp {
    fn focus(&mut self, index: usize) {
        self.fields[self.focused].blur();
        self.focused = index % FIELDS;
        self.fields[self.focused].focus();
    }

    fn any_open(&self) -> bool {
        self.fields.iter().any(MultiSelect::is_open)
    }

    fn record(&mut self, entry: String) {
        tracing::info!(%entry, "selection changed");
        self.events.push(entry);
    }
}

impl Model for FilterApp {
    type Message = Msg;
    type Flags = (Registry, [MultiSelect; FIELDS]);

    fn init((registry, fields): Self::Flags) -> (Self, Command<Msg>) {
        let mut app = FilterApp {
            registry,
            fields,
            focused: 0,
            events: Vec::new(),
        };
        app.fields[0].focus();
        (app, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Field(i, multi_select::Message::Selected(option)) => {
                let state = if option.is_selected { "on" } else { "off" };
                let id = self.fields[i].id();
                let entry = format!("{id}: {} {state}", option.display);
                self.record(entry);
                Command::none()
            }
            Msg::Field(i, multi_select::Message::AllSelected(option)) => {
                let state = if option.is_selected { "all" } else { "none" };
                self.record(format!("{}: {}", self.fields[i].id(), state));
                Command::none()
            }
            Msg::Field(i, m) => self.fields[i].update(m).map(move |m| Msg::Field(i, m)),
            Msg::Pointer(mouse) => {
                self.registry.handle_pointer(&mouse);
                Command::batch((0..FIELDS).map(|i| {
                    Command::message(Msg::Field(i, multi_select::Message::Mouse(mouse)))
                }))
            }
            Msg::Key(key) => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Command::quit()
                }
                KeyCode::Char('q') if !self.any_open() => Command::quit(),
                KeyCode::Tab => {
                    self.focus(self.focused + 1);
                    Command::none()
                }
                KeyCode::BackTab => {
                    self.focus(self.focused + FIELDS - 1);
                    Command::none()
                }
                _ => Command::message(Msg::Field(
                    self.focused,
                    multi_select::Message::KeyPress(key),
                )),
            },
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [controls, summary, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let mut lines: Vec<Line> = self
            .fields
            .iter()
            .map(|f| {
                let values: Vec<&str> = f.selected().filter_map(|o| o.value.as_deref()).collect();
                Line::from(format!("{:>8}: {}", f.id(), values.join(" ")))
            })
            .collect();
        lines.push(Line::from(""));
        let recent = self.events.iter().rev().take(8);
        lines.extend(recent.map(|e| Line::from(e.as_str())));
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::new()
                    .borders(Borders::ALL)
                    .title(" Query ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            summary,
        );
        frame.render_widget(
            Paragraph::new("tab: next field  enter/space: open/pick  esc: close  q: quit")
                .style(Style::default().fg(Color::DarkGray)),
            help,
        );

        // Dropdowns last so open lists draw over the summary.
        let columns = Layout::horizontal([Constraint::Ratio(1, 3); FIELDS]).split(controls);
        for (field, area) in self.fields.iter().zip(columns.iter()) {
            field.view(frame, *area);
        }
    }

    fn event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Mouse(mouse) => Some(Msg::Pointer(mouse)),
            _ => event.key_press().map(Msg::Key),
        }
    }
}

#[multipick::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = std::fs::File::create("multi_select.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log))
        .with_ansi(false)
        .init();

    let options = ProgramOptions {
        title: Some("multipick".into()),
        ..ProgramOptions::default()
    };
    let registry = Registry::new();
    let fields = [regions(&registry)?, teams(&registry)?, sort_by(&registry)?];
    let app = multipick::run_with::<FilterApp>((registry, fields), options).await?;
    for field in &app.fields {
        println!("{}: {}", field.id(), field.button_text());
    }
    Ok(())
}
