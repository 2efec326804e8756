// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod countdown;
pub mod difficulty;
pub mod error;
pub mod game_state;
pub mod input;
pub mod logging;
pub mod provider;
pub mod round;
pub mod tui;

// Re-export commonly used items for easier testing
pub use difficulty::Difficulty;
pub use error::{Error, Result};
pub use game_state::{Game, GameInterface, KeyInput, Outcome, game_loop};
pub use provider::{HttpWordProvider, StaticWordProvider, WordProvider};
pub use round::{GuessResult, Round};
