//! Multi-select dropdown: a button summarizing the selection and a list of
//! checkable options that opens below it.
//!
//! Build one per field with [`MultiSelect::builder`], passing the host's
//! shared [`Registry`] so sibling dropdowns close each other. The widget
//! reports changes through its [`Message`] type: [`Message::Selected`]
//! carries the option that was toggled and [`Message::AllSelected`] the
//! select-all record.
//!
//! Configuration is merged once, at [`build`](MultiSelectBuilder::build).
//! Later changes to the inputs the builder was given have no effect on a
//! built widget.

use crate::button_text::button_text;
use crate::classes::StyleSheet;
use crate::config::{DropdownConfig, PartialConfig};
use crate::error::{Error, Result};
use crate::highlight::Highlight;
use crate::option::{OptionId, PickOption, SELECT_ALL_ID};
use crate::registry::{Registration, Registry};
use crate::text::{display_width, fit};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use multipick_core::command::Command;
use multipick_core::component::Component;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::collections::HashSet;

const DEFAULT_MAX_VISIBLE: usize = 8;
const BUTTON_HEIGHT: u16 = 3;
const FALLBACK_ICON: &str = "▾";
const FALLBACK_CHECKED: &str = "[x]";
const FALLBACK_UNCHECKED: &str = "[ ]";

/// Messages for the multi-select component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press, handled while the dropdown has focus.
    KeyPress(KeyEvent),
    /// A mouse event in screen coordinates.
    Mouse(MouseEvent),
    /// Open the list if closed, close it if open.
    Toggle,
    /// Close the list.
    Close,
    /// Flip the selection of one option.
    Select(OptionId),
    /// Flip the select-all option.
    SelectAll,
    /// Emitted after [`Message::Select`] with the option as it is now.
    Selected(PickOption),
    /// Emitted after [`Message::SelectAll`] with the select-all record.
    AllSelected(PickOption),
}

/// Collects the inputs of a [`MultiSelect`] before it is mounted.
pub struct MultiSelectBuilder {
    id: String,
    options: Vec<PickOption>,
    overrides: PartialConfig,
    config: PartialConfig,
    stylesheet: StyleSheet,
    max_visible: usize,
    placeholder: String,
}

impl MultiSelectBuilder {
    /// Set the options shown in the list.
    pub fn with_options(mut self, options: Vec<PickOption>) -> Self {
        self.options = options;
        self
    }

    /// Per-field overrides; these win over [`with_config`](Self::with_config).
    pub fn with_overrides(mut self, overrides: PartialConfig) -> Self {
        self.overrides = overrides;
        self
    }

    /// The configuration object, consulted for fields the overrides leave out.
    pub fn with_config(mut self, config: PartialConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_allow_multiple(mut self, allowed: bool) -> Self {
        self.overrides.allow_multiple = Some(allowed);
        self
    }

    pub fn with_select_all(mut self, enabled: bool) -> Self {
        self.overrides.add_select_all_option = Some(enabled);
        self
    }

    pub fn with_select_all_by_default(mut self, enabled: bool) -> Self {
        self.overrides.select_all_by_default = Some(enabled);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.overrides.label = Some(label.into());
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: StyleSheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Maximum number of list rows shown before the list scrolls.
    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = rows.max(1);
        self
    }

    /// Text shown on the button while nothing is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Mount the dropdown: merge the configuration, set up select-all,
    /// derive the button text and register with `registry`.
    ///
    /// Fails if two options share an id.
    pub fn build(self, registry: &Registry) -> Result<MultiSelect> {
        {
            let mut seen = HashSet::new();
            if let Some(dup) = self.options.iter().find(|o| !seen.insert(&o.id)) {
                return Err(Error::DuplicateOptionId(dup.id.clone()));
            }
        }

        let mut config = DropdownConfig::resolve(&self.overrides, &self.config);
        config.normalize();

        let mut options = self.options;
        let mut select_all_option = PickOption::select_all_placeholder();
        if config.add_select_all_option {
            select_all_option = PickOption {
                id: OptionId::from(SELECT_ALL_ID),
                display: config.select_all_text.clone(),
                value: config.select_all_value.clone(),
                is_selected: config.select_all_by_default,
            };
            if config.select_all_by_default {
                for option in &mut options {
                    option.is_selected = true;
                }
            }
        }

        let rows = options.len() + usize::from(config.add_select_all_option);
        let mut widget = MultiSelect {
            registration: registry.register(self.id),
            options,
            select_all_option,
            config,
            button_text: String::new(),
            highlight: Highlight::new(rows, self.max_visible),
            stylesheet: self.stylesheet,
            max_visible: self.max_visible,
            placeholder: self.placeholder,
            focus: false,
        };
        widget.refresh_button_text();
        Ok(widget)
    }
}

/// A dropdown of checkable options with an optional select-all row.
///
/// # Example
///
/// ```rust,ignore
/// use multipick_widgets::multi_select::MultiSelect;
/// use multipick_widgets::option::PickOption;
/// use multipick_widgets::registry::Registry;
///
/// let registry = Registry::new();
/// let regions = MultiSelect::builder("regions")
///     .with_options(vec![
///         PickOption::new(1, "North", "N"),
///         PickOption::new(2, "South", "S"),
///     ])
///     .with_select_all(true)
///     .with_label(" Regions ")
///     .build(&registry)?;
/// ```
pub struct MultiSelect {
    registration: Registration,
    options: Vec<PickOption>,
    select_all_option: PickOption,
    config: DropdownConfig,
    button_text: String,
    highlight: Highlight,
    stylesheet: StyleSheet,
    max_visible: usize,
    placeholder: String,
    focus: bool,
}

impl MultiSelect {
    pub fn builder(id: impl Into<String>) -> MultiSelectBuilder {
        MultiSelectBuilder {
            id: id.into(),
            options: Vec::new(),
            overrides: PartialConfig::default(),
            config: PartialConfig::default(),
            stylesheet: StyleSheet::default(),
            max_visible: DEFAULT_MAX_VISIBLE,
            placeholder: "Select...".to_string(),
        }
    }

    pub fn id(&self) -> &str {
        self.registration.id()
    }

    pub fn options(&self) -> &[PickOption] {
        &self.options
    }

    /// Options that are currently selected, in list order.
    pub fn selected(&self) -> impl Iterator<Item = &PickOption> {
        self.options.iter().filter(|o| o.is_selected)
    }

    pub fn select_all_option(&self) -> &PickOption {
        &self.select_all_option
    }

    /// The merged configuration.
    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    /// Summary of the selection; see [`button_text`](crate::button_text::button_text).
    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    pub fn is_open(&self) -> bool {
        self.registration.is_open()
    }

    /// The list row under the keyboard highlight. Row 0 is the select-all
    /// row when it is shown.
    pub fn highlighted_row(&self) -> usize {
        self.highlight.row()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus and close the list.
    pub fn blur(&mut self) {
        self.focus = false;
        self.close();
    }

    /// Close the list. Emits nothing.
    pub fn close(&mut self) {
        self.registration.close();
    }

    /// Flip the list open or closed. Opening closes every sibling dropdown.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.registration.set_open(true);
            self.registration.registry().open(&self.registration);
        }
    }

    /// Flip the selection of the option with `id` and return it as it is now.
    ///
    /// Keeps the select-all row in step when it is shown. When only one
    /// option may be selected, every other option is deselected and the list
    /// closes. An unknown id leaves the widget untouched.
    pub fn select(&mut self, id: &OptionId) -> Result<PickOption> {
        let index = self
            .options
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| Error::OptionNotFound(id.clone()))?;
        self.options[index].is_selected = !self.options[index].is_selected;

        if self.config.add_select_all_option {
            self.select_all_option.is_selected = self.options.iter().all(|o| o.is_selected);
        }

        if !self.config.allow_multiple {
            self.close();
            for (i, option) in self.options.iter_mut().enumerate() {
                if i != index {
                    option.is_selected = false;
                }
            }
        }

        self.refresh_button_text();
        Ok(self.options[index].clone())
    }

    /// Flip the select-all record and give every option its new state.
    /// Returns the select-all record.
    ///
    /// This runs whether or not the select-all row is shown.
    pub fn select_all(&mut self) -> PickOption {
        self.select_all_option.is_selected = !self.select_all_option.is_selected;
        let selected = self.select_all_option.is_selected;
        for option in &mut self.options {
            option.is_selected = selected;
        }
        self.refresh_button_text();
        self.select_all_option.clone()
    }

    /// Recompute the button text from the options.
    pub fn refresh_button_text(&mut self) {
        self.button_text = button_text(&self.options);
    }

    fn row_count(&self) -> usize {
        self.options.len() + usize::from(self.config.add_select_all_option)
    }

    fn select_message(&mut self, id: OptionId) -> Command<Message> {
        match self.select(&id) {
            Ok(option) => Command::message(Message::Selected(option)),
            Err(err) => {
                tracing::warn!(dropdown = %self.id(), "{err}");
                Command::none()
            }
        }
    }

    /// Select whatever sits on list `row`.
    fn activate_row(&mut self, row: usize) -> Command<Message> {
        self.highlight.set(row);
        if self.config.add_select_all_option {
            if row == 0 {
                return Command::message(Message::AllSelected(self.select_all()));
            }
            return self.activate_option(row - 1);
        }
        self.activate_option(row)
    }

    fn activate_option(&mut self, index: usize) -> Command<Message> {
        match self.options.get(index) {
            Some(option) => {
                let id = option.id.clone();
                self.select_message(id)
            }
            None => Command::none(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.is_open() {
            if matches!(
                key.code,
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down
            ) {
                self.toggle();
            }
            return Command::none();
        }

        self.fit_highlight_to_list();
        match key.code {
            KeyCode::Up => self.highlight.up(),
            KeyCode::Down => self.highlight.down(),
            KeyCode::Home => self.highlight.first(),
            KeyCode::End => self.highlight.last(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return self.activate_row(self.highlight.row());
            }
            KeyCode::Esc | KeyCode::Tab => self.close(),
            _ => {}
        }
        Command::none()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::none();
        }
        let position = Position::new(mouse.column, mouse.row);
        let areas = self.registration.areas();

        if areas.first().is_some_and(|button| button.contains(position)) {
            self.toggle();
            return Command::none();
        }

        match areas.get(1) {
            Some(list) if self.is_open() => {
                let inner = list_block().inner(*list);
                if !inner.contains(position) {
                    return Command::none();
                }
                let row = self.highlight.offset() + usize::from(position.y - inner.y);
                if row < self.row_count() {
                    self.activate_row(row)
                } else {
                    Command::none()
                }
            }
            _ => Command::none(),
        }
    }

    /// Keep the highlight within the rows the list was last drawn with,
    /// which may be fewer than `max_visible` near the frame edge.
    fn fit_highlight_to_list(&mut self) {
        if let Some(list) = self.registration.areas().get(1) {
            let rows = list_block().inner(*list).height;
            self.highlight.set_visible(usize::from(rows).max(1));
        }
    }

    /// Below the button, or above it when that leaves more room.
    fn list_area(&self, button: Rect, bounds: Rect) -> Rect {
        let wanted = self.row_count().min(self.max_visible) as u16 + 2;
        let below = bounds.bottom().saturating_sub(button.bottom());
        let above = button.y.saturating_sub(bounds.y);
        if below < wanted && above > below {
            let height = wanted.min(above);
            Rect::new(button.x, button.y - height, button.width, height)
        } else {
            Rect::new(button.x, button.bottom(), button.width, wanted.min(below))
        }
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus || self.is_open() {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let mut block = Block::new()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(
                self.stylesheet
                    .style(&self.config.container_classes)
                    .patch(self.stylesheet.style(&self.config.button_wrapper_classes)),
            );
        if let Some(label) = &self.config.label {
            block = block.title(label.as_str());
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let icon = self
            .stylesheet
            .glyph(&self.config.button_icon_classes)
            .unwrap_or(FALLBACK_ICON);
        let [text_area, icon_area] = Layout::horizontal([
            Constraint::Fill(self.config.button_text_flex()),
            Constraint::Length(display_width(icon) as u16 + 1),
        ])
        .areas(inner);

        let (text, style) = if self.button_text.is_empty() {
            (
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                self.button_text.as_str(),
                self.stylesheet.style(&self.config.button_classes),
            )
        };
        let text = fit(text, usize::from(text_area.width), "…");
        frame.render_widget(Paragraph::new(Span::styled(text, style)), text_area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {icon}"),
                self.stylesheet.style(&self.config.button_icon_classes),
            )),
            icon_area,
        );
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let list_style = self.stylesheet.style(&self.config.list_classes);
        let block = list_block().style(list_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = std::iter::once(&self.select_all_option)
            .filter(|_| self.config.add_select_all_option)
            .chain(self.options.iter());
        let offset = self.highlight.offset();
        let option_style = self.stylesheet.style(&self.config.option_classes);

        for (i, option) in rows
            .enumerate()
            .skip(offset)
            .take(usize::from(inner.height))
        {
            let row_area = Rect {
                y: inner.y + (i - offset) as u16,
                height: 1,
                ..inner
            };
            let (check_classes, fallback) = if option.is_selected {
                (&self.config.checked_classes, FALLBACK_CHECKED)
            } else {
                (&self.config.unchecked_classes, FALLBACK_UNCHECKED)
            };
            let glyph = self.stylesheet.glyph(check_classes).unwrap_or(fallback);
            let mut style = option_style;
            if i == self.highlight.row() {
                style = style.patch(self.stylesheet.highlight());
            }

            let glyph_width = display_width(glyph) + 1;
            let label_width = usize::from(row_area.width).saturating_sub(glyph_width);
            let line = Line::from(vec![
                Span::styled(glyph.to_string(), self.stylesheet.style(check_classes)),
                Span::raw(" "),
                Span::styled(fit(&option.display, label_width, "…"), style),
            ]);
            frame.render_widget(Paragraph::new(line), row_area);
        }
    }
}

fn list_block() -> Block<'static> {
    Block::new().borders(Borders::ALL)
}

impl Component for MultiSelect {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::Toggle => {
                self.toggle();
                Command::none()
            }
            Message::Close => {
                self.close();
                Command::none()
            }
            Message::Select(id) => self.select_message(id),
            Message::SelectAll => Command::message(Message::AllSelected(self.select_all())),
            Message::Selected(_) | Message::AllSelected(_) => Command::none(),
        }
    }

    /// Draws the button into the top of `area` and, while open, the list
    /// directly below it (allowed to overflow `area` down to the frame edge).
    fn view(&self, frame: &mut Frame, area: Rect) {
        let button = Rect {
            height: area.height.min(BUTTON_HEIGHT),
            ..area
        };
        if button.width < 6 || button.height < BUTTON_HEIGHT {
            self.registration.set_areas(&[]);
            return; // not enough space
        }
        self.render_button(frame, button);

        if !self.is_open() {
            self.registration.set_areas(&[button]);
            return;
        }
        let list = self.list_area(button, frame.area());
        if list.height > 2 {
            self.render_list(frame, list);
            self.registration.set_areas(&[button, list]);
        } else {
            self.registration.set_areas(&[button]);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
