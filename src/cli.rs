use crate::difficulty::{Difficulty, read_difficulty};
use crate::error::Result;
use crate::game_state::{GameInterface, KeyInput, Outcome};
use crate::input::{TerminalGuard, next_key};
use crate::provider::DEFAULT_WORD_URL;
use crate::round::Round;
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::Stream;
use std::io::{self, BufRead, Stdout, Write};
use std::time::Duration;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Skip the difficulty menu
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Time limit in seconds, overrides the difficulty
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Endpoint answering with a JSON array holding one word
    #[arg(long, env = "HANGMAN_WORD_URL", default_value = DEFAULT_WORD_URL)]
    pub url: String,

    /// Play this word instead of fetching one
    #[arg(short, long)]
    pub word: Option<String>,

    /// Full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    /// Time limit for the round. Shows the difficulty menu only when neither
    /// `--timeout` nor `--difficulty` was given.
    pub fn resolve_timeout<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> io::Result<Duration> {
        if let Some(secs) = self.timeout {
            return Ok(Duration::from_secs(secs));
        }
        let difficulty = match self.difficulty {
            Some(difficulty) => difficulty,
            None => read_difficulty(reader, writer)?,
        };
        Ok(difficulty.timeout())
    }
}

/// Line-oriented console frontend.
///
/// The status line is redrawn in place with a carriage return. Lines end in
/// `\r\n` because the terminal is in raw mode while keys are read.
pub struct CliInterface<W: Write, S> {
    writer: W,
    events: S,
    _terminal: Option<TerminalGuard>,
}

impl<W, S> CliInterface<W, S>
where
    W: Write,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    pub fn new(writer: W, events: S) -> Self {
        Self {
            writer,
            events,
            _terminal: None,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn line(&mut self, text: &str) -> Result<()> {
        write!(self.writer, "{text}\r\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl CliInterface<Stdout, EventStream> {
    /// Console frontend on the real terminal, in raw mode until dropped.
    pub fn stdout() -> Result<Self> {
        let guard = TerminalGuard::raw_mode()?;
        Ok(Self {
            writer: io::stdout(),
            events: EventStream::new(),
            _terminal: Some(guard),
        })
    }
}

pub fn format_status_line(round: &Round) -> String {
    format!(
        "\r[ {round} ]\t\tGuesses left: {}    ",
        round.guesses_left()
    )
}

pub fn format_timer_message(timeout: Duration) -> String {
    format!(
        "Timer has started. You have {} minute(s).",
        timeout.as_secs() / 60
    )
}

impl<W, S> GameInterface for CliInterface<W, S>
where
    W: Write,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    fn greet(&mut self) -> Result<()> {
        self.line("Hello and welcome to Hangman")
    }

    fn display_choosing_word(&mut self) -> Result<()> {
        self.line("Choosing a word please wait...")
    }

    fn display_timer_started(&mut self, timeout: Duration) -> Result<()> {
        self.line(&format_timer_message(timeout))?;
        self.line("Here's your word.")
    }

    fn render(&mut self, round: &Round) -> Result<()> {
        write!(self.writer, "{}", format_status_line(round))?;
        self.writer.flush()?;
        Ok(())
    }

    async fn read_key(&mut self) -> Result<KeyInput> {
        next_key(&mut self.events).await
    }

    async fn display_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        self.line("")?;
        match outcome {
            Outcome::Won => self.line("Congratulations. You Won!"),
            Outcome::Lost { answer } => {
                self.line("Out of guesses.")?;
                self.line(&format!("The word was: '{answer}'"))
            }
            Outcome::TimedOut { .. } => {
                self.line("Time out. Better luck next time.")?;
                self.line("")
            }
            Outcome::Cancelled => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hangman").chain(args.iter().copied())).unwrap()
    }

    fn no_events() -> futures::stream::Iter<std::vec::IntoIter<io::Result<Event>>> {
        futures::stream::iter(Vec::new())
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.timeout, None);
        assert_eq!(cli.word, None);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_cli_flags() {
        let cli = cli(&["--difficulty", "hard", "--word", "bee", "--tui"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert_eq!(cli.word.as_deref(), Some("bee"));
        assert!(cli.tui);
    }

    #[test]
    fn test_parse_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["hangman", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_resolve_timeout_from_menu() {
        let cli = cli(&[]);
        let mut reader = Cursor::new("3\n");
        let mut out = Vec::new();
        let timeout = cli.resolve_timeout(&mut reader, &mut out).unwrap();
        assert_eq!(timeout, Duration::from_secs(60));
        assert!(String::from_utf8(out).unwrap().contains("3. Hard"));
    }

    #[test]
    fn test_resolve_timeout_menu_default() {
        let cli = cli(&[]);
        let mut out = Vec::new();
        let timeout = cli
            .resolve_timeout(&mut Cursor::new("9\n"), &mut out)
            .unwrap();
        assert_eq!(timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_resolve_timeout_flags_skip_menu() {
        let mut out = Vec::new();
        let timeout = cli(&["-d", "easy"])
            .resolve_timeout(&mut Cursor::new(""), &mut out)
            .unwrap();
        assert_eq!(timeout, Duration::from_secs(300));
        assert!(out.is_empty());

        let timeout = cli(&["-d", "easy", "-t", "45"])
            .resolve_timeout(&mut Cursor::new(""), &mut out)
            .unwrap();
        assert_eq!(timeout, Duration::from_secs(45));
        assert!(out.is_empty());
    }

    #[test]
    fn test_status_line() {
        let mut round = Round::new("cat");
        round.guess('a');
        round.guess('z');
        assert_eq!(
            format_status_line(&round),
            "\r[ - a - ]\t\tGuesses left: 2    "
        );
    }

    #[test]
    fn test_timer_message_whole_minutes() {
        assert_eq!(
            format_timer_message(Duration::from_secs(300)),
            "Timer has started. You have 5 minute(s)."
        );
        assert_eq!(
            format_timer_message(Duration::from_secs(90)),
            "Timer has started. You have 1 minute(s)."
        );
    }

    #[tokio::test]
    async fn test_outcome_messages() {
        let mut interface = CliInterface::new(Vec::new(), no_events());
        interface
            .display_outcome(&Outcome::Lost {
                answer: "dog".to_string(),
            })
            .await
            .unwrap();
        let text = String::from_utf8(interface.into_writer()).unwrap();
        assert_eq!(text, "\r\nOut of guesses.\r\nThe word was: 'dog'\r\n");

        let mut interface = CliInterface::new(Vec::new(), no_events());
        interface.display_outcome(&Outcome::Won).await.unwrap();
        let text = String::from_utf8(interface.into_writer()).unwrap();
        assert_eq!(text, "\r\nCongratulations. You Won!\r\n");
    }

    #[tokio::test]
    async fn test_timeout_message() {
        let mut interface = CliInterface::new(Vec::new(), no_events());
        interface
            .display_outcome(&Outcome::TimedOut {
                answer: "dog".to_string(),
            })
            .await
            .unwrap();
        let text = String::from_utf8(interface.into_writer()).unwrap();
        assert!(text.contains("Time out. Better luck next time."));
        assert!(!text.contains("dog"));
    }
}
