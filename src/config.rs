use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const GAME_TITLE: &str = "Galactic Onslaught";
pub const GAME_WIDTH: u32 = 1440;
pub const GAME_HEIGHT: u32 = 900;
/// Ticks per second.
pub const GAME_SPEED: u32 = 60;

pub const PLAYER_NAME_MAX_LENGTH: usize = 10;
pub const PLAYER_NAME_MIN_LENGTH: usize = 3;
pub const DEFAULT_PLAYER_NAME: &str = "Player01";

pub const DEFAULT_SCORES_FILE: &str = "leaderboard.txt";
pub const DEFAULT_LOG_FILE: &str = "onslaught.log";

// Smallest field that still leaves the fighter room to move and aliens room to spawn.
const MIN_WIDTH: u32 = 320;
const MIN_HEIGHT: u32 = 600;
const MAX_FPS: u32 = 240;

/// Playfield size in world pixels, fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH as f32,
            height: GAME_HEIGHT as f32,
        }
    }
}

/// Validated playfield size and tick length. Only built through `new`, so a
/// session never sees a field too small for its sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    geometry: Geometry,
    /// Simulation time covered by one tick.
    tick: Duration,
}

impl GameConfig {
    pub fn new(geometry: Geometry, fps: u32) -> Result<Self, String> {
        let (width, height) = (geometry.width, geometry.height);
        if !(width >= MIN_WIDTH as f32 && height >= MIN_HEIGHT as f32) {
            return Err(format!(
                "playfield must be at least {MIN_WIDTH}x{MIN_HEIGHT}, got {width}x{height}"
            ));
        }
        if fps == 0 || fps > MAX_FPS {
            return Err(format!("fps must be between 1 and {MAX_FPS}, got {fps}"));
        }
        Ok(Self {
            geometry,
            tick: Duration::from_secs(1) / fps,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            tick: Duration::from_secs(1) / GAME_SPEED,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "onslaught", version, about = "Galactic Onslaught, a wave shooter for the terminal")]
pub struct Args {
    /// Playfield width in world pixels
    #[arg(long, default_value_t = GAME_WIDTH)]
    pub width: u32,

    /// Playfield height in world pixels
    #[arg(long, default_value_t = GAME_HEIGHT)]
    pub height: u32,

    /// Simulation ticks per second
    #[arg(long, default_value_t = GAME_SPEED)]
    pub fps: u32,

    /// Leaderboard file (one `name score` pair per line)
    #[arg(long, default_value = DEFAULT_SCORES_FILE)]
    pub scores: PathBuf,

    /// Log file; filter with RUST_LOG
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig, String> {
        let geometry = Geometry {
            width: self.width as f32,
            height: self.height as f32,
        };
        GameConfig::new(geometry, self.fps)
    }
}

/// Turn whatever was typed in the menu into a leaderboard-safe name.
pub fn normalize_player_name(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }

    let mut chars = compact.chars();
    let mut name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };

    let len = name.chars().count();
    if len < PLAYER_NAME_MIN_LENGTH {
        name.extend(std::iter::repeat('0').take(PLAYER_NAME_MIN_LENGTH - len));
    } else if len > PLAYER_NAME_MAX_LENGTH {
        name = name.chars().take(PLAYER_NAME_MAX_LENGTH).collect();
    }
    name
}
