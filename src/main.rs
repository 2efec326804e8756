use hangman::cli::{Cli, CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{Error, Game, GameInterface, HttpWordProvider, Outcome, StaticWordProvider};
use hangman::{info_log, Result};
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = parse_cli();

    let timeout = match cli.resolve_timeout(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(timeout) => timeout,
        Err(e) => {
            eprintln!("Failed to read difficulty: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("Playing with a {:?} time limit", timeout);

    match run(&cli, Game::new(timeout)).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e @ (Error::Request(_)
        | Error::Status(_)
        | Error::Decode(_)
        | Error::EmptyResponse
        | Error::InvalidWord(_))) => {
            eprintln!("Could not fetch a word, aborting: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, game: Game) -> Result<Outcome> {
    if cli.tui {
        let mut interface = TuiInterface::stdout()?;
        play(cli, game, &mut interface).await
    } else {
        let mut interface = CliInterface::stdout()?;
        play(cli, game, &mut interface).await
    }
}

async fn play<I: GameInterface>(cli: &Cli, game: Game, interface: &mut I) -> Result<Outcome> {
    match &cli.word {
        Some(word) => game.start(&StaticWordProvider::new(word.as_str()), interface).await,
        None => game.start(&HttpWordProvider::new(cli.url.as_str()), interface).await,
    }
}
