use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::provider::WordProvider;
use crate::round::Round;
use crate::{debug_log, info_log};
use std::time::Duration;

/// A key read from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    /// Ctrl+C.
    Cancel,
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost { answer: String },
    TimedOut { answer: String },
    Cancelled,
}

impl Outcome {
    /// Process exit status for this outcome. Only cancellation fails.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Cancelled => 1,
            Self::Won | Self::Lost { .. } | Self::TimedOut { .. } => 0,
        }
    }
}

/// Everything the round needs from the console, implemented by the CLI and
/// TUI frontends.
#[allow(async_fn_in_trait)]
pub trait GameInterface {
    fn greet(&mut self) -> Result<()>;
    fn display_choosing_word(&mut self) -> Result<()>;
    fn display_timer_started(&mut self, timeout: Duration) -> Result<()>;
    fn render(&mut self, round: &Round) -> Result<()>;
    async fn read_key(&mut self) -> Result<KeyInput>;
    async fn display_outcome(&mut self, outcome: &Outcome) -> Result<()>;
}

/// One game session with a fixed time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    timeout: Duration,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Difficulty::default().timeout())
    }
}

impl Game {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches a word and plays it to the end.
    ///
    /// Provider failures are returned before the countdown starts.
    pub async fn start<P, I>(&self, provider: &P, interface: &mut I) -> Result<Outcome>
    where
        P: WordProvider,
        I: GameInterface,
    {
        interface.greet()?;
        interface.display_choosing_word()?;
        let word = provider.fetch_word().await?;
        info_log!("Round started with a {} letter word", word.chars().count());

        let round = Round::new(&word);
        let countdown = Countdown::start(self.timeout);
        interface.display_timer_started(self.timeout)?;

        let outcome = game_loop(round, countdown, interface).await?;
        interface.display_outcome(&outcome).await?;
        Ok(outcome)
    }
}

/// Runs guess steps until the round is decided, the countdown expires, or the
/// player cancels. The countdown is stopped on every exit path.
pub async fn game_loop<I: GameInterface>(
    mut round: Round,
    mut countdown: Countdown,
    interface: &mut I,
) -> Result<Outcome> {
    interface.render(&round)?;

    while !round.is_over() {
        let key = tokio::select! {
            () = countdown.expired() => {
                return Ok(Outcome::TimedOut { answer: round.answer() });
            }
            key = interface.read_key() => key?,
        };

        match key {
            KeyInput::Cancel => {
                info_log!("Round cancelled by player");
                countdown.cancel();
                return Ok(Outcome::Cancelled);
            }
            KeyInput::Char(c) => {
                let result = round.guess(c);
                debug_log!(
                    "Guess '{}' -> {:?}, {} guesses left",
                    c,
                    result,
                    round.guesses_left()
                );
            }
        }
        interface.render(&round)?;
    }

    countdown.cancel();
    let outcome = if round.is_solved() {
        Outcome::Won
    } else {
        Outcome::Lost {
            answer: round.answer(),
        }
    };
    info_log!("Round finished: {:?}", outcome);
    Ok(outcome)
}
