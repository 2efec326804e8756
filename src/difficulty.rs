use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn timeout(self) -> Duration {
        Duration::from_secs(match self {
            Self::Easy => 300,
            Self::Medium => 120,
            Self::Hard => 60,
        })
    }

    /// Maps a menu answer to a difficulty; anything unrecognised is Medium.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => Self::Easy,
            "3" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

pub fn display_menu<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "Please choose a difficulty: ")?;
    writeln!(writer, "1. Easy")?;
    writeln!(writer, "2. Medium")?;
    writeln!(writer, "3. Hard")?;
    writeln!(writer)?;
    writer.flush()
}

/// Shows the menu and reads one line of input. End of input picks the default.
pub fn read_difficulty<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> std::io::Result<Difficulty> {
    display_menu(writer)?;
    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(Difficulty::from_choice(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn choose(input: &str) -> Difficulty {
        let mut reader = Cursor::new(input);
        let mut out = Vec::new();
        read_difficulty(&mut reader, &mut out).unwrap()
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(Difficulty::Easy.timeout(), Duration::from_secs(300));
        assert_eq!(Difficulty::Medium.timeout(), Duration::from_secs(120));
        assert_eq!(Difficulty::Hard.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(choose("1\n"), Difficulty::Easy);
        assert_eq!(choose("2\n"), Difficulty::Medium);
        assert_eq!(choose("3\n"), Difficulty::Hard);
    }

    #[test]
    fn test_hard_choice_is_sixty_seconds() {
        assert_eq!(choose("3\n").timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_unknown_or_empty_choice_defaults_to_medium() {
        assert_eq!(choose("9\n").timeout(), Duration::from_secs(120));
        assert_eq!(choose("\n").timeout(), Duration::from_secs(120));
        assert_eq!(choose("").timeout(), Duration::from_secs(120));
        assert_eq!(choose("easy\n"), Difficulty::Medium);
    }

    #[test]
    fn test_choice_whitespace_trimmed() {
        assert_eq!(choose("  1  \n"), Difficulty::Easy);
    }

    #[test]
    fn test_menu_text() {
        let mut out = Vec::new();
        display_menu(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Please choose a difficulty: \n"));
        assert!(text.contains("1. Easy\n2. Medium\n3. Hard\n"));
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
