//! Full-screen terminal interface built on Ratatui.
//!
//! # Layout
//! - Title
//! - Board: one tile per letter of the word
//! - Information: guesses left, messages, the outcome once decided
//! - Time left gauge
//! - Instructions
//!
//! The screen is redrawn on every change and on a short tick while waiting
//! for a key, so the time left keeps counting down.

use crate::error::{Error, Result};
use crate::game_state::{GameInterface, KeyInput, Outcome};
use crate::input::{TerminalGuard, next_key};
use crate::round::{HIDDEN_CHAR, Round};
use crate::{debug_log, info_log};
use crossterm::event::{Event, EventStream};
use futures::Stream;
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::time::Instant;

const REDRAW_INTERVAL_MS: u64 = 100;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const HIDDEN_TILE_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const REVEALED_TILE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);

/// What is on screen, kept apart from the terminal so both can be borrowed
/// at once while drawing.
#[derive(Debug, Default)]
struct View {
    mask: Vec<Option<char>>,
    guesses_left: usize,
    max_guesses: usize,
    timeout: Duration,
    deadline: Option<Instant>,
    messages: Vec<String>,
    outcome: Option<Outcome>,
}

impl View {
    fn time_left(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

pub struct TuiInterface<B: Backend, S> {
    terminal: Terminal<B>,
    events: S,
    view: View,
    wait_on_exit: bool,
    _terminal_guard: Option<TerminalGuard>,
}

impl<B, S> TuiInterface<B, S>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    pub fn new(terminal: Terminal<B>, events: S) -> Self {
        Self {
            terminal,
            events,
            view: View::default(),
            wait_on_exit: false,
            _terminal_guard: None,
        }
    }

    /// Keep the final screen up until a key is pressed.
    pub fn wait_on_exit(mut self, wait: bool) -> Self {
        self.wait_on_exit = wait;
        self
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn draw(&mut self) -> Result<()> {
        let view = &self.view;
        self.terminal.draw(|f| render_screen(f, view))?;
        Ok(())
    }

    fn show_message(&mut self, message: impl Into<String>) -> Result<()> {
        self.view.messages.push(message.into());
        self.draw()
    }
}

impl TuiInterface<CrosstermBackend<Stdout>, EventStream> {
    /// Takes over the real terminal until dropped.
    pub fn stdout() -> Result<Self> {
        info_log!("Initializing TUI");
        let guard = TerminalGuard::alternate_screen()?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let mut tui = Self::new(terminal, EventStream::new()).wait_on_exit(true);
        tui._terminal_guard = Some(guard);
        Ok(tui)
    }
}

impl<B, S> GameInterface for TuiInterface<B, S>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    fn greet(&mut self) -> Result<()> {
        self.show_message("Hello and welcome to Hangman")
    }

    fn display_choosing_word(&mut self) -> Result<()> {
        self.show_message("Choosing a word please wait...")
    }

    fn display_timer_started(&mut self, timeout: Duration) -> Result<()> {
        self.view.timeout = timeout;
        self.view.deadline = Some(Instant::now() + timeout);
        self.show_message(format!(
            "Timer has started. You have {} minute(s). Here's your word.",
            timeout.as_secs() / 60
        ))
    }

    fn render(&mut self, round: &Round) -> Result<()> {
        self.view.mask = round.mask();
        self.view.guesses_left = round.guesses_left();
        self.view.max_guesses = round.len();
        self.draw()
    }

    async fn read_key(&mut self) -> Result<KeyInput> {
        let mut ticker = tokio::time::interval(Duration::from_millis(REDRAW_INTERVAL_MS));
        loop {
            tokio::select! {
                key = next_key(&mut self.events) => return key,
                _ = ticker.tick() => {
                    let view = &self.view;
                    self.terminal.draw(|f| render_screen(f, view))?;
                }
            }
        }
    }

    async fn display_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        self.view.outcome = Some(outcome.clone());
        self.view.deadline = None;
        self.draw()?;
        if self.wait_on_exit && *outcome != Outcome::Cancelled {
            match next_key(&mut self.events).await {
                Ok(_) | Err(Error::InputClosed) => {}
                Err(e) => return Err(e),
            }
        }
        debug_log!("TUI finished with {:?}", outcome);
        Ok(())
    }
}

fn render_screen(f: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Board
            Constraint::Min(6),    // Information
            Constraint::Length(3), // Time left
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], &view.mask);
    render_info(f, chunks[2], view);
    render_timer(f, chunks[3], view);
    render_instructions(f, chunks[4], view.outcome.is_some());
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("HANGMAN")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, mask: &[Option<char>]) {
    let mut spans = vec![Span::raw("  ")];
    for slot in mask {
        let (letter, style) = match slot {
            Some(c) => (c.to_uppercase().to_string(), REVEALED_TILE_STYLE),
            None => (HIDDEN_CHAR.to_string(), HIDDEN_TILE_STYLE),
        };
        spans.push(Span::styled(format!(" {letter} "), style));
        spans.push(Span::raw(" "));
    }

    let board = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .block(Block::default().title("Word").borders(Borders::ALL));
    f.render_widget(board, area);
}

fn render_info(f: &mut Frame, area: Rect, view: &View) {
    let mut lines = Vec::new();

    if view.max_guesses > 0 {
        let style = if view.guesses_left <= 1 {
            ERROR_STYLE
        } else {
            INFO_STYLE
        };
        lines.push(Line::from(vec![Span::styled(
            format!("Guesses left: {}/{}", view.guesses_left, view.max_guesses),
            style,
        )]));
        lines.push(Line::from(""));
    }

    for message in &view.messages {
        lines.push(Line::from(vec![Span::styled(message.as_str(), MESSAGE_STYLE)]));
    }

    if let Some(outcome) = &view.outcome {
        lines.push(Line::from(""));
        for (text, style) in outcome_lines(outcome) {
            lines.push(Line::from(vec![Span::styled(text, style)]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn outcome_lines(outcome: &Outcome) -> Vec<(String, Style)> {
    match outcome {
        Outcome::Won => vec![("Congratulations. You Won!".to_string(), SUCCESS_STYLE)],
        Outcome::Lost { answer } => vec![
            ("Out of guesses.".to_string(), ERROR_STYLE),
            (format!("The word was: '{answer}'"), INFO_STYLE),
        ],
        Outcome::TimedOut { answer } => vec![
            ("Time out. Better luck next time.".to_string(), ERROR_STYLE),
            (format!("The word was: '{answer}'"), INFO_STYLE),
        ],
        Outcome::Cancelled => vec![("Cancelled.".to_string(), ERROR_STYLE)],
    }
}

fn render_timer(f: &mut Frame, area: Rect, view: &View) {
    let block = Block::default().title("Time left").borders(Borders::ALL);
    let Some(left) = view.time_left() else {
        f.render_widget(Paragraph::new("--:--").block(block), area);
        return;
    };

    let total = view.timeout.as_secs_f64();
    let ratio = if total > 0.0 {
        (left.as_secs_f64() / total).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let secs = left.as_secs();
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
        .ratio(ratio)
        .label(format!("{}:{:02}", secs / 60, secs % 60));
    f.render_widget(gauge, area);
}

fn render_instructions(f: &mut Frame, area: Rect, finished: bool) {
    let text = if finished {
        "Press any key to exit"
    } else {
        "Type a letter to guess | CTRL+C: Quit"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    type TestTui = TuiInterface<TestBackend, futures::stream::Iter<std::vec::IntoIter<io::Result<Event>>>>;

    fn tui() -> TestTui {
        let terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        TuiInterface::new(terminal, futures::stream::iter(Vec::new()))
    }

    fn screen(tui: &TestTui) -> String {
        tui.terminal()
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_mask_and_guesses() {
        let mut tui = tui();
        let mut round = Round::new("cat");
        round.guess('a');
        round.guess('q');
        tui.render(&round).unwrap();
        let text = screen(&tui);
        assert!(text.contains("HANGMAN"));
        assert!(text.contains(" - "));
        assert!(text.contains(" A "));
        assert!(text.contains("Guesses left: 2/3"));
    }

    #[test]
    fn test_messages_shown() {
        let mut tui = tui();
        tui.greet().unwrap();
        tui.display_choosing_word().unwrap();
        let text = screen(&tui);
        assert!(text.contains("Hello and welcome to Hangman"));
        assert!(text.contains("Choosing a word"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_label() {
        let mut tui = tui();
        tui.display_timer_started(Duration::from_secs(120)).unwrap();
        assert!(screen(&tui).contains("2:00"));
    }

    #[tokio::test]
    async fn test_outcome_shows_answer() {
        let mut tui = tui();
        tui.display_outcome(&Outcome::Lost {
            answer: "dog".to_string(),
        })
        .await
        .unwrap();
        let text = screen(&tui);
        assert!(text.contains("Out of guesses."));
        assert!(text.contains("The word was: 'dog'"));
        assert!(text.contains("Press any key to exit"));
    }

    #[tokio::test]
    async fn test_wait_on_exit_tolerates_closed_input() {
        let mut tui = tui().wait_on_exit(true);
        tui.display_outcome(&Outcome::Won).await.unwrap();
        assert!(screen(&tui).contains("Congratulations. You Won!"));
    }
}
