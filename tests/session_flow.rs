use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use onslaught::config::GameConfig;
use onslaught::game::{Outcome, Phase, Session};
use onslaught::input::Command;
use onslaught::scores::{FileLeaderboard, LeaderboardError, LeaderboardStore, MemoryLeaderboard, ScoreEntry};

/// Ticks until the phase changes or `limit` runs out.
fn run_until(session: &mut Session, board: &mut dyn LeaderboardStore, phase: Phase, limit: usize) -> usize {
    for n in 0..limit {
        if session.phase() == phase {
            return n;
        }
        session.tick(board);
    }
    panic!("never reached {phase:?}, stuck in {:?}", session.phase());
}

#[test]
fn idle_player_reaches_the_leaderboard() {
    let mut session = Session::with_rng(GameConfig::default(), "idle", StdRng::seed_from_u64(1));
    let mut board = MemoryLeaderboard::with_entries(vec![ScoreEntry::new("Ace", 12)]);

    run_until(&mut session, &mut board, Phase::GameOver, 5_000);
    assert_eq!(session.lives(), 0);
    assert_eq!(session.level(), 1);

    // Three seconds of animation before the board comes up.
    let waited = run_until(&mut session, &mut board, Phase::Leaderboard, 400);
    assert!(waited >= 180, "board shown after {waited} ticks");

    let shown = session.leaderboard().expect("board is shown");
    assert_eq!(shown, &[ScoreEntry::new("Ace", 12), ScoreEntry::new("Idle", 0)][..]);

    // The board screen is static.
    let clock = session.clock();
    session.tick(&mut board);
    assert_eq!(session.clock(), clock);

    assert_eq!(session.handle(Command::Shoot), Outcome::Continue);
    assert_eq!(session.handle(Command::Return), Outcome::ReturnToMenu);
}

#[test]
fn score_is_written_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.txt");
    fs::write(&path, "Idle 0\nAce 12\n").unwrap();
    let mut board = FileLeaderboard::new(&path);

    let mut session = Session::with_rng(GameConfig::default(), "idle", StdRng::seed_from_u64(2));
    session.handle(Command::ToggleMode);
    // Powered hull only loses lives to escapes, so this takes a few waves.
    for _ in 0..20_000 {
        if session.phase() != Phase::Playing {
            break;
        }
        session.handle(Command::Shoot);
        session.tick(&mut board);
    }
    assert_eq!(session.phase(), Phase::GameOver);
    run_until(&mut session, &mut board, Phase::Leaderboard, 400);

    let text = fs::read_to_string(&path).unwrap();
    let expected = if session.score() > 0 {
        format!("Idle {}\nAce 12\n", session.score())
    } else {
        "Idle 0\nAce 12\n".to_string()
    };
    assert_eq!(text, expected);
}

/// Store that cannot be written.
struct BrokenStore;

impl LeaderboardStore for BrokenStore {
    fn read(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Ok(Vec::new())
    }

    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::InvalidName(entry.name.clone()))
    }

    fn update(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::InvalidName(entry.name.clone()))
    }
}

#[test]
fn broken_store_skips_the_board_but_still_returns() {
    let mut session = Session::with_rng(GameConfig::default(), "idle", StdRng::seed_from_u64(3));
    let mut board = BrokenStore;

    run_until(&mut session, &mut board, Phase::GameOver, 5_000);
    assert!(session.board_error().is_some());

    for _ in 0..600 {
        session.tick(&mut board);
    }
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.leaderboard().is_none());
    assert_eq!(session.handle(Command::Return), Outcome::ReturnToMenu);
}

#[test]
fn pausing_holds_the_whole_game() {
    let mut session = Session::with_rng(GameConfig::default(), "idle", StdRng::seed_from_u64(4));
    let mut board = MemoryLeaderboard::new();
    for _ in 0..30 {
        session.tick(&mut board);
    }
    session.handle(Command::Pause);
    let before = session.scene();
    for _ in 0..1_000 {
        session.tick(&mut board);
    }
    let after = session.scene();
    assert_eq!(before.commands, after.commands);
    assert_eq!(before.backdrop_offset, after.backdrop_offset);
    assert_eq!(session.phase(), Phase::Paused);

    session.handle(Command::Pause);
    session.tick(&mut board);
    assert_ne!(session.scene().backdrop_offset, before.backdrop_offset);
}
