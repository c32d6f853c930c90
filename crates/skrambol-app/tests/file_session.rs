//! Sessions backed by the filesystem store.

use std::{fs, time::Duration};

use skrambol_app::{
    config::{ScrambleMode, SessionConfig},
    persistence::{FileStore, KeyValueStore as _},
    puzzle::PuzzleInfo,
    session::{LoadOutcome, MoveOutcome, PuzzleSession},
    submission::{LocalLeaderboard, PlayerName},
};
use skrambol_core::{GridDimensions, Position, TileId};
use skrambol_game::ManualClock;
use skrambol_generator::GridSeed;

fn config() -> SessionConfig {
    SessionConfig::default()
        .with_dimensions(GridDimensions::new(4, 3).unwrap())
        .with_scramble(ScrambleMode::Seeded(GridSeed::derive("file-session")))
}

fn puzzle(id: &str) -> PuzzleInfo {
    PuzzleInfo::new(id, "https://example.com/tile.jpg", "Tiles").with_attribution("author", "test")
}

fn advance(session: &mut PuzzleSession<FileStore, ManualClock>, clock: &ManualClock, ms: u64) {
    for _ in 0..ms / 100 {
        clock.advance(Duration::from_millis(100));
        session.tick();
    }
}

#[test]
fn test_progress_survives_a_restart_of_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new();

    let mut first = PuzzleSession::new(config(), FileStore::new(dir.path()).unwrap(), clock.clone());
    first.load(puzzle("harbour")).unwrap();
    advance(&mut first, &clock, 6_000);
    let before: Vec<Position> = first.pieces().unwrap().current_positions();
    assert!(first.suspend());
    drop(first);

    let json = fs::read_to_string(dir.path().join("skrambol__game-session.json")).unwrap();
    assert!(json.contains("\"puzzle_id\":\"harbour\""));
    assert!(json.contains("\"version\":1"));

    let mut second = PuzzleSession::new(config(), FileStore::new(dir.path()).unwrap(), clock.clone());
    assert_eq!(
        second.load(puzzle("harbour")).unwrap(),
        LoadOutcome::Restored {
            elapsed: Duration::from_secs(6)
        }
    );
    assert_eq!(second.pieces().unwrap().current_positions(), before);
}

#[test]
fn test_other_puzzle_and_corrupt_file_start_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new();

    let mut session = PuzzleSession::new(config(), FileStore::new(dir.path()).unwrap(), clock.clone());
    session.load(puzzle("a")).unwrap();
    assert!(session.suspend());
    let mut store = session.into_store();

    let mut other = PuzzleSession::new(config(), store.clone(), clock.clone());
    assert!(other.load(puzzle("b")).unwrap().is_fresh());

    store.set("skrambol__game-session", "{ definitely not json").unwrap();
    let mut corrupt = PuzzleSession::new(config(), store, clock);
    assert!(corrupt.load(puzzle("a")).unwrap().is_fresh());
}

#[test]
fn test_solve_and_hand_off_clears_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new();
    let config = SessionConfig::default()
        .with_dimensions(GridDimensions::new(3, 2).unwrap())
        .with_scramble(ScrambleMode::NearlySolved);

    let mut session = PuzzleSession::new(config, FileStore::new(dir.path()).unwrap(), clock.clone());
    session.load(puzzle("a")).unwrap();
    advance(&mut session, &clock, 2_500);

    let MoveOutcome::Won(payload) = session.apply_move(TileId::new(1), TileId::new(2)) else {
        panic!("expected a win");
    };
    assert_eq!(payload.final_elapsed, Duration::from_millis(2_500));
    let path = dir.path().join("skrambol__game-session.json");
    assert!(fs::read_to_string(&path).unwrap().contains("\"is_finished\":true"));

    let mut leaderboard = LocalLeaderboard::default();
    let player = PlayerName::new("ann").unwrap();
    session.hand_off(&mut leaderboard, player.clone()).unwrap();

    assert!(!path.exists());
    let entries = leaderboard.entries_for(&payload.puzzle_id);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].time_spent_ms, 2_500);
    assert_eq!(entries[0].player, player);
}
