use std::fmt;

/// Rendered in place of a letter the player has not found yet.
pub const HIDDEN_CHAR: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// The letter was found; `index` is the position that got revealed.
    Hit { index: usize },
    Miss,
}

/// State of a single round: the word, which positions are revealed, and how
/// many misses the player can still afford.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    word: Vec<char>,
    revealed: Vec<bool>,
    guesses_left: usize,
}

impl Round {
    pub fn new(word: &str) -> Self {
        let word: Vec<char> = word.chars().collect();
        let len = word.len();
        Self {
            word,
            revealed: vec![false; len],
            guesses_left: len,
        }
    }

    /// Reveals the first unrevealed occurrence of `guess`, or spends a guess.
    ///
    /// Only one occurrence is revealed per call, so a letter that appears
    /// twice has to be guessed twice. Guessing a letter whose occurrences are
    /// all revealed already counts as a miss.
    pub fn guess(&mut self, guess: char) -> GuessResult {
        let guess = guess.to_lowercase().next().unwrap_or(guess);
        let found = self
            .word
            .iter()
            .zip(&self.revealed)
            .position(|(&c, &revealed)| !revealed && c == guess);

        match found {
            Some(index) => {
                self.revealed[index] = true;
                GuessResult::Hit { index }
            }
            None => {
                self.guesses_left = self.guesses_left.saturating_sub(1);
                GuessResult::Miss
            }
        }
    }

    pub fn guesses_left(&self) -> usize {
        self.guesses_left
    }

    pub fn is_solved(&self) -> bool {
        self.revealed.iter().all(|&r| r)
    }

    pub fn is_over(&self) -> bool {
        self.guesses_left == 0 || self.is_solved()
    }

    /// The full answer, regardless of what has been revealed.
    pub fn answer(&self) -> String {
        self.word.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// One slot per letter: `Some(letter)` once revealed.
    pub fn mask(&self) -> Vec<Option<char>> {
        self.word
            .iter()
            .zip(&self.revealed)
            .map(|(&c, &revealed)| revealed.then_some(c))
            .collect()
    }
}

/// Space-separated mask, e.g. `c - t`.
impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.mask().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", slot.unwrap_or(HIDDEN_CHAR))?;
        }
        Ok(())
    }
}
