//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides the full-screen interface using Ratatui.
//!
//! # Architecture
//! - `TuiApp`: owns the terminal, the flow controller and the on-screen buttons
//! - `key_to_command`: keyboard mapping, kept free of terminal state
//!
//! # Frame loop
//! Each frame draws the current screen, drains at most `MAX_EVENTS_PER_FRAME`
//! input events (waiting no longer than one frame), lets the controller fire
//! the round-finished latch and plays whatever sounds it queued.

use crate::audio::AudioSink;
use crate::button::Button;
use crate::event_log::LogSink;
use crate::flow::{NavAction, Screen, ScreenFlowController};
use crate::game_state::{MAX_TRIES, RoundState, RoundStatus};
use crate::selector::CategoryChoice;
use crate::wordbank::Difficulty;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const MAX_EVENTS_PER_FRAME: usize = 32;
const WIN_FRAME_MS: u64 = 300;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const BUTTON_WIDTH: u16 = 30;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_GAP: u16 = 1;
const GALLOWS_WIDTH: u16 = 24;

const TITLE_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new().fg(Color::Blue);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const CORRECT_STYLE: Style = Style::new().fg(Color::Green);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const WIN_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const BUTTON_STYLE: Style = Style::new().fg(Color::Magenta);
const BUTTON_HOVER_STYLE: Style = Style::new().fg(Color::White).bg(Color::Magenta);
const BUTTON_ACTIVE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightMagenta);

/// Gallows drawing indexed by the number of wrong guesses.
const GALLOWS: [&str; MAX_TRIES + 1] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

const WIN_FRAMES: [&str; 2] = [
    "\n\n \\O/\n  |\n / \\\n",
    "\n\n  O\n \\|/\n / \\\n",
];

#[derive(Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Action(NavAction),
    Quit,
    Nothing,
}

/// Map a key press to what it means on `screen`.
pub fn key_to_command(screen: Screen, key: &KeyEvent) -> KeyCommand {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if has_ctrl => return KeyCommand::Quit,
        KeyCode::F(2) => return KeyCommand::Action(NavAction::ToggleSound),
        KeyCode::Esc if screen == Screen::Menu => return KeyCommand::Quit,
        KeyCode::Esc => return KeyCommand::Action(NavAction::Back),
        _ if has_ctrl || has_alt => return KeyCommand::Nothing,
        _ => {}
    }

    let action = match (screen, key.code) {
        (Screen::Menu, KeyCode::Enter | KeyCode::Char('s' | 'S')) => Some(NavAction::Start),
        (Screen::Categories, KeyCode::Char('r' | 'R')) => {
            Some(NavAction::ChooseCategory(CategoryChoice::Riddle))
        }
        (Screen::Categories, KeyCode::Char('w' | 'W')) => {
            Some(NavAction::ChooseCategory(CategoryChoice::Words))
        }
        (Screen::Difficulty, KeyCode::Char('e' | 'E')) => {
            Some(NavAction::ChooseDifficulty(Difficulty::Easy))
        }
        (Screen::Difficulty, KeyCode::Char('m' | 'M')) => {
            Some(NavAction::ChooseDifficulty(Difficulty::Medium))
        }
        (Screen::Difficulty, KeyCode::Char('h' | 'H')) => {
            Some(NavAction::ChooseDifficulty(Difficulty::Hard))
        }
        (Screen::Game, KeyCode::Enter) => Some(NavAction::Restart),
        (Screen::Game, KeyCode::Char(c)) if c.is_alphabetic() => {
            Some(NavAction::Guess(c.to_lowercase().next().unwrap_or(c)))
        }
        _ => None,
    };
    action.map_or(KeyCommand::Nothing, KeyCommand::Action)
}

/// Buttons shown in the body of each screen.
pub fn buttons_for(screen: Screen) -> Vec<Button> {
    match screen {
        Screen::Menu => vec![Button::new("Start Game", NavAction::Start)],
        Screen::Categories => vec![
            Button::new("Riddles", NavAction::ChooseCategory(CategoryChoice::Riddle)),
            Button::new("Words", NavAction::ChooseCategory(CategoryChoice::Words)),
        ],
        Screen::Difficulty => vec![
            Button::new("Easy", NavAction::ChooseDifficulty(Difficulty::Easy)),
            Button::new("Medium", NavAction::ChooseDifficulty(Difficulty::Medium)),
            Button::new("Hard", NavAction::ChooseDifficulty(Difficulty::Hard)),
        ],
        Screen::Game => vec![Button::new("Restart", NavAction::Restart)],
    }
}

/// Dispatch one input action, then settle the round-finished latch.
///
/// Several actions can arrive in one frame; settling after each keeps a
/// finished round from being replaced before its effect fires.
pub fn apply_action<L: LogSink>(
    controller: &mut ScreenFlowController<'_, L>,
    action: NavAction,
) -> Option<RoundStatus> {
    match controller.dispatch(action) {
        Ok(transition) => {
            debug_log!("apply_action() - {:?} -> {:?}", action, transition);
        }
        Err(e) => {
            info_log!("apply_action() - {:?} failed: {}", action, e);
        }
    }
    controller.update()
}

fn sound_label(enabled: bool) -> &'static str {
    if enabled { "Sound: on" } else { "Sound: off" }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

struct WinAnimation {
    frame: usize,
    last_switch: Instant,
}

impl WinAnimation {
    fn new() -> Self {
        Self {
            frame: 0,
            last_switch: Instant::now(),
        }
    }

    fn tick(&mut self) {
        if self.last_switch.elapsed() >= Duration::from_millis(WIN_FRAME_MS) {
            self.frame = (self.frame + 1) % WIN_FRAMES.len();
            self.last_switch = Instant::now();
        }
    }

    fn current(&self) -> &'static str {
        WIN_FRAMES[self.frame]
    }
}

/// Widgets that need placing every frame, borrowed out of `TuiApp` while drawing.
struct Chrome<'a> {
    buttons: &'a mut [Button],
    back_button: &'a mut Button,
    sound_button: &'a mut Button,
    win_animation: Option<&'a WinAnimation>,
}

/// Main TUI application.
///
/// Restores the terminal when dropped.
pub struct TuiApp<'c, L: LogSink> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    controller: ScreenFlowController<'c, L>,
    audio: Box<dyn AudioSink>,
    buttons: Vec<Button>,
    buttons_screen: Screen,
    back_button: Button,
    sound_button: Button,
    frame_duration: Duration,
    win_animation: Option<WinAnimation>,
    running: bool,
}

impl<'c, L: LogSink> TuiApp<'c, L> {
    pub fn new(
        controller: ScreenFlowController<'c, L>,
        audio: Box<dyn AudioSink>,
        fps: u32,
    ) -> Result<Self, io::Error> {
        info_log!("TuiApp::new() - Initializing TUI at {} fps", fps);
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, mouse capture, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let screen = controller.screen();
        let sound_button = Button::new(sound_label(controller.sound_enabled()), NavAction::ToggleSound);
        Ok(Self {
            terminal,
            controller,
            audio,
            buttons: buttons_for(screen),
            buttons_screen: screen,
            back_button: Button::new("<", NavAction::Back),
            sound_button,
            frame_duration: Duration::from_millis(1000 / u64::from(fps.max(1))),
            win_animation: None,
            running: true,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), io::Error> {
        while self.running {
            let frame_start = Instant::now();
            self.sync_buttons();
            self.draw()?;
            self.process_events(frame_start)?;

            let finished = self.controller.update();
            self.round_finished(finished);
            if !self.controller.is_game_over() {
                self.win_animation = None;
            }
            if let Some(animation) = self.win_animation.as_mut() {
                animation.tick();
            }
            for sound in self.controller.take_sounds() {
                self.audio.play(sound);
            }
        }
        Ok(())
    }

    /// Rebuild the body buttons after a screen change; refresh the sound label.
    fn sync_buttons(&mut self) {
        let screen = self.controller.screen();
        if screen != self.buttons_screen {
            self.buttons = buttons_for(screen);
            self.buttons_screen = screen;
        }
        self.sound_button
            .set_label(sound_label(self.controller.sound_enabled()));
    }

    fn process_events(&mut self, frame_start: Instant) -> Result<(), io::Error> {
        let deadline = frame_start + self.frame_duration;
        for _ in 0..MAX_EVENTS_PER_FRAME {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let event = event::read()?;
            self.handle_event(event);
            if !self.running {
                break;
            }
            // Later events in this frame must see the buttons of the new screen.
            self.sync_buttons();
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    debug_log!("handle_event() - Ignoring non-Press key event: {:?}", key.kind);
                    return;
                }
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("handle_event() - Ignoring invalid character: {:?}", c);
                    return;
                }
                match key_to_command(self.controller.screen(), &key) {
                    KeyCommand::Quit => {
                        info_log!("handle_event() - Quit requested");
                        self.running = false;
                    }
                    KeyCommand::Action(action) => self.apply(action),
                    KeyCommand::Nothing => {
                        debug_log!("handle_event() - Ignoring key: {:?}", key.code);
                    }
                }
            }
            Event::Mouse(mouse) => {
                if let Some(action) = self.handle_mouse(&mouse) {
                    self.apply(action);
                }
            }
            _ => {
                debug_log!("handle_event() - Ignoring event: {:?}", event);
            }
        }
    }

    /// Every button sees every mouse event so hover and press state stay current.
    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<NavAction> {
        let mut fired = None;
        for button in &mut self.buttons {
            fired = fired.or(button.handle_mouse(mouse));
        }
        if self.controller.screen() != Screen::Menu {
            fired = fired.or(self.back_button.handle_mouse(mouse));
        }
        fired.or(self.sound_button.handle_mouse(mouse))
    }

    fn apply(&mut self, action: NavAction) {
        let finished = apply_action(&mut self.controller, action);
        self.round_finished(finished);
    }

    fn round_finished(&mut self, status: Option<RoundStatus>) {
        if let Some(status) = status {
            info_log!("round_finished() - {:?}", status);
            if status == RoundStatus::Won {
                self.win_animation = Some(WinAnimation::new());
            }
        }
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let controller = &self.controller;
        let mut chrome = Chrome {
            buttons: &mut self.buttons,
            back_button: &mut self.back_button,
            sound_button: &mut self.sound_button,
            win_animation: self.win_animation.as_ref(),
        };
        self.terminal.draw(|f| {
            Self::render(f, controller, &mut chrome);
        })?;
        Ok(())
    }

    fn render(f: &mut Frame, controller: &ScreenFlowController<'c, L>, chrome: &mut Chrome) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Top bar
                Constraint::Min(10),   // Screen body
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let screen = controller.screen();
        Self::render_top_bar(f, chunks[0], screen, chrome);
        match screen {
            Screen::Menu => Self::render_choice_screen(f, chunks[1], "HANGMAN GAME", None, chrome.buttons),
            Screen::Categories => {
                Self::render_choice_screen(f, chunks[1], "Categories", None, chrome.buttons);
            }
            Screen::Difficulty => {
                let error = controller.last_error().map(ToString::to_string);
                Self::render_choice_screen(
                    f,
                    chunks[1],
                    "Difficulty Level",
                    error.as_deref(),
                    chrome.buttons,
                );
            }
            Screen::Game => {
                if let Some(round) = controller.round() {
                    Self::render_game(f, chunks[1], round, chrome);
                }
            }
        }
        Self::render_instructions(f, chunks[2], screen);
    }

    fn render_top_bar(f: &mut Frame, area: Rect, screen: Screen, chrome: &mut Chrome) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(10),
                Constraint::Length(14),
            ])
            .split(area);

        if screen == Screen::Menu {
            chrome.back_button.set_area(Rect::default());
        } else {
            Self::render_button(f, columns[0], chrome.back_button);
        }

        let title = Paragraph::new("Hangman")
            .style(TITLE_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, columns[1]);

        Self::render_button(f, columns[2], chrome.sound_button);
    }

    fn render_button(f: &mut Frame, area: Rect, button: &mut Button) {
        button.set_area(area);
        let style = if button.is_pressed() {
            BUTTON_ACTIVE_STYLE
        } else if button.is_hovered() {
            BUTTON_HOVER_STYLE
        } else {
            BUTTON_STYLE
        };
        let paragraph = Paragraph::new(button.label().to_string())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Title plus a centered column of buttons; used by menu, categories and difficulty.
    fn render_choice_screen(
        f: &mut Frame,
        area: Rect,
        title: &str,
        error: Option<&str>,
        buttons: &mut [Button],
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(BUTTON_HEIGHT),
                Constraint::Length(2),
            ])
            .split(area);

        let heading = Paragraph::new(Line::from(Span::styled(title.to_string(), TITLE_STYLE)))
            .alignment(Alignment::Center);
        f.render_widget(heading, rows[0]);

        #[allow(clippy::cast_possible_truncation)]
        let count = buttons.len() as u16;
        let column_height = count * BUTTON_HEIGHT + count.saturating_sub(1) * BUTTON_GAP;
        let column = centered(rows[1], BUTTON_WIDTH, column_height);
        for (i, button) in buttons.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = column.y + i as u16 * (BUTTON_HEIGHT + BUTTON_GAP);
            if y + BUTTON_HEIGHT > column.y + column.height {
                button.set_area(Rect::default());
                continue;
            }
            Self::render_button(f, Rect::new(column.x, y, column.width, BUTTON_HEIGHT), button);
        }

        if let Some(error) = error {
            let message = Paragraph::new(format!("Cannot start a round: {error}"))
                .style(ERROR_STYLE)
                .alignment(Alignment::Center);
            f.render_widget(message, rows[2]);
        }
    }

    fn render_game(f: &mut Frame, area: Rect, round: &RoundState, chrome: &mut Chrome) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(area);

        let status = round.status();
        let art = match (status, chrome.win_animation) {
            (RoundStatus::Won, Some(animation)) => animation.current(),
            _ => GALLOWS[round.incorrect_count().min(MAX_TRIES)],
        };
        let art_style = if status == RoundStatus::Won { WIN_STYLE } else { Style::default() };
        let gallows = Paragraph::new(art)
            .style(art_style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(gallows, columns[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(BUTTON_HEIGHT)])
            .split(columns[1]);

        let join = |letters: Vec<char>| {
            letters
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        let mut lines = vec![
            Line::from(vec![Span::raw("Hint: "), Span::styled(round.hint().to_string(), HINT_STYLE)]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Word: "),
                Span::styled(round.display_word(), WORD_STYLE),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Correct guesses: "),
                Span::styled(join(round.correct_letters()), CORRECT_STYLE),
            ]),
            Line::from(vec![
                Span::raw("Incorrect guesses: "),
                Span::styled(join(round.incorrect_letters()), ERROR_STYLE),
            ]),
            Line::from(format!("Attempts left: {}/{MAX_TRIES}", round.remaining_tries())),
            Line::from(""),
        ];
        match status {
            RoundStatus::Won => lines.push(Line::from(Span::styled("You Won!", WIN_STYLE))),
            RoundStatus::Lost => lines.push(Line::from(Span::styled(
                format!("You Lost! Word: {}", round.answer()),
                LOSE_STYLE,
            ))),
            RoundStatus::InProgress => {}
        }

        let info = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(info, rows[0]);

        let restart_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(14)])
            .split(rows[1]);
        for button in chrome.buttons.iter_mut() {
            Self::render_button(f, restart_row[1], button);
        }
    }

    fn render_instructions(f: &mut Frame, area: Rect, screen: Screen) {
        let text = match screen {
            Screen::Menu => "ENTER/S: Start | F2: Sound | ESC: Quit",
            Screen::Categories => "R: Riddles | W: Words | ESC: Back | F2: Sound",
            Screen::Difficulty => "E: Easy | M: Medium | H: Hard | ESC: Back | F2: Sound",
            Screen::Game => "Type a letter to guess | ENTER: Restart | ESC: Back | F2: Sound",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl<L: LogSink> Drop for TuiApp<'_, L> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
