//! Terminal front end for skrambol.
//!
//! Tiles are addressed by grid position; `swap 1 5` exchanges the tiles in
//! slots 1 and 5. Progress is saved under `--state-dir` and resumed on the
//! next run of the same `--puzzle-id`.

use std::{
    error::Error,
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use skrambol_app::{
    config::{Difficulty, ScrambleMode, SessionConfig},
    persistence::FileStore,
    puzzle::PuzzleInfo,
    session::{LoadOutcome, MoveOutcome, PuzzleSession},
    submission::{LocalLeaderboard, PlayerName},
    version,
};
use skrambol_core::{GridDimensions, Position};
use skrambol_game::{SystemClock, format_elapsed};
use skrambol_generator::GridSeed;

type Session = PuzzleSession<FileStore, SystemClock>;

const HELP: &str = "\
commands:
  swap <a> <b>  exchange the tiles at positions a and b
  show          print the board
  restart       discard progress and reshuffle
  help          show this message
  quit          save and exit";

#[derive(Debug, Parser)]
#[command(author, version, about = "Swap tiles until the picture is whole again")]
struct Args {
    /// Grid columns.
    #[arg(long, default_value_t = 4)]
    cols: u16,
    /// Grid rows.
    #[arg(long, default_value_t = 3)]
    rows: u16,
    /// Puzzle identifier; progress is resumed per puzzle.
    #[arg(long, default_value = "local")]
    puzzle_id: String,
    /// Directory the session snapshot is kept in.
    #[arg(long, value_name = "DIR", default_value = ".skrambol")]
    state_dir: PathBuf,
    /// Seconds between autosaves.
    ///
    /// The clock is only polled when a command arrives, so an idle prompt
    /// does not save. Every swap is saved as it happens.
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    autosave_secs: u64,
    /// Shuffle from this seed (64 hex characters).
    #[arg(long, conflicts_with = "nearly_solved")]
    seed: Option<GridSeed>,
    /// Start one swap away from solved.
    #[arg(long)]
    nearly_solved: bool,
    /// Difficulty recorded with the result.
    #[arg(long, value_enum, default_value_t)]
    difficulty: Difficulty,
    /// Name entered on the leaderboard when the puzzle is solved.
    #[arg(long, value_name = "NAME")]
    player: Option<PlayerName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Swap(Position, Position),
    Show,
    Restart,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let command = match head {
            "swap" | "s" => {
                let a = parse_position(words.next())?;
                let b = parse_position(words.next())?;
                Self::Swap(a, b)
            }
            "show" => Self::Show,
            "restart" => Self::Restart,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}`; try `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_position(word: Option<&str>) -> Result<Position, String> {
    let word = word.ok_or("usage: swap <a> <b>")?;
    word.parse()
        .ok()
        .and_then(Position::try_new)
        .ok_or_else(|| format!("`{word}` is not a grid position"))
}

fn print_board(session: &Session, dimensions: GridDimensions) {
    let Some(pieces) = session.pieces() else {
        return;
    };
    let cols = usize::from(dimensions.cols());
    let width = pieces.len().to_string().len();
    for (index, pos) in Position::all(pieces.len()).enumerate() {
        match pieces.tile_at(pos) {
            Some(tile) => {
                let mark = if tile.is_home() { '*' } else { ' ' };
                print!(" {:>width$}{mark}", tile.id().raw());
            }
            None => print!(" {:>width$} ", "?"),
        }
        if (index + 1) % cols == 0 {
            println!();
        }
    }
    if let Some(progress) = session.progress() {
        println!(
            "{}/{} in place ({}%), {}",
            progress.correct(),
            progress.total(),
            progress.rounded_percent(),
            format_elapsed(session.elapsed())
        );
    }
}

fn swap(session: &mut Session, a: Position, b: Position) -> Option<MoveOutcome> {
    let pieces = session.pieces()?;
    let (Some(first), Some(second)) = (pieces.tile_at(a), pieces.tile_at(b)) else {
        println!("positions run from 1 to {}", pieces.len());
        return None;
    };
    let (first, second) = (first.id(), second.id());
    Some(session.apply_move(first, second))
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn main() -> Result<(), Box<dyn Error>> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    log::info!("Starting skrambol, version={}", version::build_version());

    let dimensions = GridDimensions::new(args.cols, args.rows)?;
    let scramble = match (args.nearly_solved, args.seed) {
        (true, _) => ScrambleMode::NearlySolved,
        (false, Some(seed)) => ScrambleMode::Seeded(seed),
        (false, None) => ScrambleMode::Random,
    };
    let config = SessionConfig::default()
        .with_dimensions(dimensions)
        .with_autosave_period(Duration::from_secs(args.autosave_secs))
        .with_difficulty(args.difficulty)
        .with_scramble(scramble);
    let store = FileStore::new(&args.state_dir)?;
    let mut session = Session::new(config, store, SystemClock);

    let puzzle = PuzzleInfo::new(args.puzzle_id.clone(), "", args.puzzle_id);
    match session.load(puzzle)? {
        LoadOutcome::Fresh { seed } => println!("New board (seed {seed})."),
        LoadOutcome::Restored { elapsed } => {
            println!("Resuming at {}.", format_elapsed(elapsed));
        }
    }
    print_board(&session, dimensions);
    println!("{HELP}");

    let mut leaderboard = LocalLeaderboard::default();
    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        session.tick();

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                prompt()?;
                continue;
            }
            Err(message) => {
                println!("{message}");
                prompt()?;
                continue;
            }
        };

        match command {
            Command::Swap(a, b) => match swap(&mut session, a, b) {
                Some(MoveOutcome::Moved(_)) => print_board(&session, dimensions),
                Some(MoveOutcome::Won(payload)) => {
                    print_board(&session, dimensions);
                    println!("Solved in {}!", format_elapsed(payload.final_elapsed));
                    if let Some(player) = args.player.clone() {
                        session.hand_off(&mut leaderboard, player.clone())?;
                        if let Some(rank) = leaderboard.rank_of(&payload.puzzle_id, &player) {
                            println!("{player} is ranked #{rank}.");
                        }
                        return Ok(());
                    }
                    println!("Type `restart` to play again or `quit` to leave.");
                }
                Some(MoveOutcome::Rejected(phase)) => println!("The board is {phase}."),
                Some(MoveOutcome::Unchanged | MoveOutcome::UnknownTile(_)) | None => {}
            },
            Command::Show => print_board(&session, dimensions),
            Command::Restart => {
                if let LoadOutcome::Fresh { seed } = session.restart()? {
                    println!("New board (seed {seed}).");
                }
                print_board(&session, dimensions);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
        prompt()?;
    }

    session.tick();
    if session.suspend() {
        println!("Progress saved.");
    }
    Ok(())
}
