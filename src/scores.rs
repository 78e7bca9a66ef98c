use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        ScoreEntry {
            name: name.into(),
            score,
        }
    }

    /// Parses a `name score` line. Anything else is rejected.
    fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let name = fields.next()?;
        let score = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(ScoreEntry::new(name, score))
    }

    fn to_line(&self) -> String {
        format!("{} {}", self.name, self.score)
    }
}

#[derive(Debug)]
pub enum LeaderboardError {
    Io { path: PathBuf, source: io::Error },
    /// Names are stored whitespace-separated, so they must be a single token.
    InvalidName(String),
}

impl LeaderboardError {
    fn io(path: &Path, source: io::Error) -> Self {
        LeaderboardError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "leaderboard {}: {source}", path.display()),
            Self::InvalidName(name) => write!(f, "invalid player name {name:?}"),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidName(_) => None,
        }
    }
}

fn check_name(name: &str) -> Result<(), LeaderboardError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(LeaderboardError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Durable name/score storage consulted at game over.
pub trait LeaderboardStore {
    fn read(&self) -> Result<Vec<ScoreEntry>, LeaderboardError>;

    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError>;

    /// Replaces the score of every entry named `entry.name`.
    fn update(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError>;

    /// Highest scores first; equal scores keep their stored order.
    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let mut entries = self.read()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(n);
        Ok(entries)
    }
}

/// Plain text file, one `name score` pair per line.
#[derive(Clone, Debug)]
pub struct FileLeaderboard {
    path: PathBuf,
}

impl FileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLeaderboard { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty board.
    fn read_text(&self) -> Result<String, LeaderboardError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(LeaderboardError::io(&self.path, err)),
        }
    }
}

impl LeaderboardStore for FileLeaderboard {
    fn read(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let text = self.read_text()?;
        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ScoreEntry::parse(line) {
                Some(entry) => entries.push(entry),
                None => warn!(path = %self.path.display(), line = number + 1, "skipping malformed leaderboard line"),
            }
        }
        Ok(entries)
    }

    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        check_name(&entry.name)?;
        let text = self.read_text()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| LeaderboardError::io(&self.path, err))?;
        let mut line = String::new();
        if !text.is_empty() && !text.ends_with('\n') {
            line.push('\n');
        }
        line.push_str(&entry.to_line());
        line.push('\n');
        file.write_all(line.as_bytes())
            .map_err(|err| LeaderboardError::io(&self.path, err))
    }

    fn update(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        check_name(&entry.name)?;
        let text = self.read_text()?;
        // Lines that don't parse are carried over untouched.
        let mut out = String::with_capacity(text.len());
        for line in text.lines() {
            match ScoreEntry::parse(line) {
                Some(existing) if existing.name == entry.name => out.push_str(&entry.to_line()),
                _ => out.push_str(line),
            }
            out.push('\n');
        }
        fs::write(&self.path, out).map_err(|err| LeaderboardError::io(&self.path, err))
    }
}

/// Board held in memory; nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<ScoreEntry>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        MemoryLeaderboard { entries }
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn read(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        check_name(&entry.name)?;
        self.entries.push(entry.clone());
        Ok(())
    }

    fn update(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        check_name(&entry.name)?;
        for existing in self.entries.iter_mut().filter(|e| e.name == entry.name) {
            existing.score = entry.score;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recorded {
    Appended,
    Updated { previous: u32 },
    /// The player already holds an equal or better score.
    Kept { best: u32 },
}

/// Files a finished game: known players are only ever raised, unknown ones
/// are appended.
pub fn record(board: &mut dyn LeaderboardStore, entry: &ScoreEntry) -> Result<Recorded, LeaderboardError> {
    let best = board
        .read()?
        .into_iter()
        .filter(|e| e.name == entry.name)
        .map(|e| e.score)
        .max();

    let outcome = match best {
        None => {
            board.append(entry)?;
            Recorded::Appended
        }
        Some(previous) if entry.score > previous => {
            board.update(entry)?;
            Recorded::Updated { previous }
        }
        Some(best) => Recorded::Kept { best },
    };
    info!(name = %entry.name, score = entry.score, ?outcome, "leaderboard recorded");
    Ok(outcome)
}
