//! Terminal chess against the heuristic computer opponent.

mod terminal;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chess_core::{PieceKind, Side};
use clap::Parser;
use game_session::{ChoiceProvider, GameSession, SessionConfig};
use heuristic_engine::Difficulty;
use tracing_subscriber::EnvFilter;

use terminal::{parse_command, Command, Terminal, HELP};

/// Play chess against a simple computer opponent.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess against a heuristic computer opponent")]
struct Args {
    /// TOML file with session defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side to play (white or black); asked interactively when omitted
    #[arg(long)]
    side: Option<Side>,

    /// Computer strength (easy, medium or hard); asked interactively when omitted
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let config = merge_flags(file, &args);
    tracing::debug!(?config, "configuration loaded");

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());

    let session = open_session(&mut term, &config, args.difficulty.is_some());
    let Some(mut session) = session else {
        term.say("No side chosen. Bye.");
        return Ok(());
    };

    term.say(HELP);
    session.start(&mut term)?;

    loop {
        term.prompt("> ");
        let Some(line) = term.read_line() else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                term.say(&e.to_string());
                continue;
            }
        };

        match command {
            Command::Click(sq) => session.square_clicked(sq, &mut term)?,
            Command::Move(from, to) => {
                session.clear_selection();
                session.square_clicked(from, &mut term)?;
                session.square_clicked(to, &mut term)?;
            }
            Command::Difficulty(difficulty) => {
                session.set_difficulty(difficulty);
                term.say(&format!("Difficulty set to {difficulty}."));
            }
            Command::Score => term.say(&session.scores().to_string()),
            Command::Help => term.say(HELP),
            Command::Quit => break,
        }
    }

    term.say(&format!("Final score: {}", session.scores()));
    Ok(())
}

/// Command-line flags win over the config file.
fn merge_flags(mut config: SessionConfig, args: &Args) -> SessionConfig {
    if args.side.is_some() {
        config.human_side = args.side;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config
}

/// Asks whatever the flags and the config left open.
fn open_session<C: ChoiceProvider>(
    choices: &mut C,
    config: &SessionConfig,
    difficulty_given: bool,
) -> Option<GameSession> {
    if difficulty_given {
        GameSession::from_choices(&mut SkipDifficulty(choices), config)
    } else {
        GameSession::from_choices(choices, config)
    }
}

/// Leaves the difficulty question unasked.
struct SkipDifficulty<'a, T>(&'a mut T);

impl<T: ChoiceProvider> ChoiceProvider for SkipDifficulty<'_, T> {
    fn choose_promotion(&mut self) -> Option<PieceKind> {
        self.0.choose_promotion()
    }

    fn choose_side(&mut self) -> Option<Side> {
        self.0.choose_side()
    }

    fn choose_difficulty(&mut self, _current: Difficulty) -> Option<Difficulty> {
        None
    }
}
