//! One game from the first wave to the leaderboard screen.
//!
//! The session owns score, lives and level; entities only report what
//! happened to them. Everything runs on simulation time, which advances by
//! one `GameConfig::tick` per unpaused tick, so pausing also holds every
//! pending animation.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{normalize_player_name, GameConfig};
use crate::input::Command;
use crate::scores::{self, LeaderboardStore, ScoreEntry, LEADERBOARD_SIZE};
use crate::sprites::SpriteId;

use super::alien::{Alien, AlienEvent, Wreck, WreckStage};
use super::collision::overlaps;
use super::draw::{Banner, DrawCommand, Hud, Scene};
use super::fighter::{Fighter, Mode};
use super::timeline::Timeline;
use super::wave::{restore_life, Wave, BANNER_DURATION, MAX_LIVES};

/// Gap between frames of the hit and destroy animations.
const ANIMATION_STEP: Duration = Duration::from_millis(200);
/// Wait between filing the score and showing the board.
const LEADERBOARD_DELAY: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
    Leaderboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    ReturnToMenu,
}

/// Follow-up actions. Each one checks its target still exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cue {
    WreckExplodes(u64),
    WreckCleared(u64),
    FighterRecovered(u64),
    FighterExplodes,
    FighterGone,
    BannerExpired(u32),
    ShowLeaderboard,
}

pub struct Session {
    config: GameConfig,
    player_name: String,
    phase: Phase,
    /// Boss screen is up. Freezes the game like a pause, in any phase.
    hidden: bool,
    clock: Duration,
    score: u32,
    lives: u32,
    level: u32,
    alien_speed: u32,
    fighter: Fighter,
    aliens: Vec<Alien>,
    wrecks: Vec<Wreck>,
    banner: Option<u32>,
    backdrop_offset: f32,
    timeline: Timeline<Cue>,
    next_id: u64,
    hit_serial: u64,
    leaderboard: Option<Vec<ScoreEntry>>,
    board_error: Option<String>,
    rng: StdRng,
}

impl Session {
    pub fn new(config: GameConfig, player_name: &str) -> Self {
        Self::with_rng(config, player_name, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, player_name: &str, rng: StdRng) -> Self {
        let player_name = normalize_player_name(player_name);
        info!(player = %player_name, "session started");
        Self {
            config,
            player_name,
            phase: Phase::Playing,
            hidden: false,
            clock: Duration::ZERO,
            score: 0,
            lives: MAX_LIVES,
            level: 0,
            alien_speed: 0,
            fighter: Fighter::new(config.geometry()),
            aliens: Vec::new(),
            wrecks: Vec::new(),
            banner: None,
            backdrop_offset: 0.0,
            timeline: Timeline::new(),
            next_id: 0,
            hit_serial: 0,
            leaderboard: None,
            board_error: None,
            rng,
        }
    }

    /// Advances the game by one tick. Paused, hidden and leaderboard screens
    /// are frozen; after game over only the pending animations keep running.
    pub fn tick(&mut self, board: &mut dyn LeaderboardStore) {
        if self.hidden || matches!(self.phase, Phase::Paused | Phase::Leaderboard) {
            return;
        }
        self.clock += self.config.tick();
        self.run_due(board);

        if self.phase != Phase::Playing {
            return;
        }

        self.scroll_backdrop();
        self.fighter.advance_lasers();
        if self.aliens.is_empty() {
            self.on_wave_cleared();
        }
        self.advance_aliens();

        self.enemy_fire_hits();
        self.ramming();
        self.fighter_fire_hits();

        if self.lives == 0 {
            self.game_over(board);
        }
    }

    pub fn handle(&mut self, command: Command) -> Outcome {
        if command == Command::Boss {
            self.hidden = !self.hidden;
            debug!(hidden = self.hidden, "boss screen toggled");
            return Outcome::Continue;
        }
        if self.hidden {
            return Outcome::Continue;
        }
        match (self.phase, command) {
            (Phase::Playing, Command::MoveLeft) => {
                self.fighter.move_left();
            }
            (Phase::Playing, Command::MoveRight) => {
                self.fighter.move_right();
            }
            (Phase::Playing, Command::MoveUp) => {
                self.fighter.move_up();
            }
            (Phase::Playing, Command::MoveDown) => {
                self.fighter.move_down();
            }
            (Phase::Playing, Command::Shoot) => self.fighter.shoot(),
            (Phase::Playing, Command::ToggleMode) => {
                self.fighter.toggle_mode();
                debug!(mode = ?self.fighter.mode(), "mode toggled");
            }
            (Phase::Playing, Command::Pause) => self.phase = Phase::Paused,
            (Phase::Paused, Command::Pause) => self.phase = Phase::Playing,
            (Phase::Leaderboard, Command::Return) => return Outcome::ReturnToMenu,
            // Without a board to show there is nothing to wait for.
            (Phase::GameOver, Command::Return) if self.board_error.is_some() => {
                return Outcome::ReturnToMenu;
            }
            _ => {}
        }
        Outcome::Continue
    }

    fn run_due(&mut self, board: &mut dyn LeaderboardStore) {
        for cue in self.timeline.drain_due(self.clock) {
            self.run_cue(cue, board);
        }
    }

    fn run_cue(&mut self, cue: Cue, board: &mut dyn LeaderboardStore) {
        match cue {
            Cue::WreckExplodes(id) => {
                if let Some(wreck) = self.wrecks.iter_mut().find(|w| w.id == id) {
                    wreck.stage = WreckStage::Explosion;
                    self.timeline.schedule(self.clock + ANIMATION_STEP, Cue::WreckCleared(id));
                }
            }
            Cue::WreckCleared(id) => self.wrecks.retain(|w| w.id != id),
            Cue::FighterRecovered(serial) => {
                // A newer hit restarts the flash.
                if serial == self.hit_serial {
                    self.fighter.recover();
                }
            }
            Cue::FighterExplodes => {
                self.fighter.explode();
                self.timeline.schedule(self.clock + ANIMATION_STEP, Cue::FighterGone);
            }
            Cue::FighterGone => self.fighter.vanish(),
            Cue::BannerExpired(level) => {
                if self.banner == Some(level) {
                    self.banner = None;
                }
            }
            Cue::ShowLeaderboard => {
                if self.phase == Phase::GameOver {
                    self.show_leaderboard(board);
                }
            }
        }
    }

    fn scroll_backdrop(&mut self) {
        let height = self.config.geometry().height;
        // Whole pixels only: an odd speed rounds down.
        self.backdrop_offset = (self.backdrop_offset + (self.alien_speed / 2) as f32) % height;
    }

    fn on_wave_cleared(&mut self) {
        self.level += 1;
        let wave = Wave::for_level(self.level);
        self.alien_speed = wave.alien_speed;
        self.fighter.speed = wave.fighter_speed;
        self.lives = restore_life(self.lives);

        self.banner = Some(self.level);
        self.timeline.schedule(self.clock + BANNER_DURATION, Cue::BannerExpired(self.level));

        let fresh = wave.spawn(&mut self.next_id, self.config.geometry(), &mut self.rng);
        self.aliens.extend(fresh);
        info!(level = self.level, aliens = wave.length, speed = wave.alien_speed, "level up");
    }

    fn advance_aliens(&mut self) {
        let height = self.config.geometry().height;
        let mut escaped_ids = Vec::new();
        for alien in &mut self.aliens {
            if alien.advance(self.clock, height) == AlienEvent::Escaped {
                escaped_ids.push(alien.id);
            }
            alien.advance_lasers(height);
        }
        if escaped_ids.is_empty() {
            return;
        }

        let (escaped, active): (Vec<Alien>, Vec<Alien>) = std::mem::take(&mut self.aliens)
            .into_iter()
            .partition(|alien| escaped_ids.contains(&alien.id));
        self.aliens = active;
        for alien in escaped {
            debug!(id = alien.id, "alien escaped");
            self.lose_life();
            self.wreck_alien(alien);
        }
    }

    /// Enemy bolts against the fighter. Bolts that connect are spent even
    /// when the powered hull shrugs them off.
    fn enemy_fire_hits(&mut self) {
        if !self.fighter.is_flying() {
            return;
        }
        let (pos, mask) = (self.fighter.pos(), self.fighter.mask());
        let mut hits = 0;
        for alien in &mut self.aliens {
            alien.lasers_mut().retain(|laser| {
                let hit = overlaps(laser.pos(), laser.mask(), pos, mask);
                if hit {
                    hits += 1;
                }
                !hit
            });
        }
        if self.fighter.mode() == Mode::Normal {
            for _ in 0..hits {
                self.strike_fighter();
            }
        }
    }

    /// Alien hulls against the fighter. The alien is lost either way.
    fn ramming(&mut self) {
        if !self.fighter.is_flying() {
            return;
        }
        let (pos, mask) = (self.fighter.pos(), self.fighter.mask());
        let (rammed, clear): (Vec<Alien>, Vec<Alien>) = std::mem::take(&mut self.aliens)
            .into_iter()
            .partition(|alien| overlaps(alien.pos(), alien.mask(), pos, mask));
        self.aliens = clear;
        for alien in rammed {
            match self.fighter.mode() {
                Mode::Normal => self.strike_fighter(),
                Mode::Powered => self.score += 1,
            }
            self.wreck_alien(alien);
        }
    }

    /// Fighter bolts against alien hulls. One bolt downs at most one alien.
    fn fighter_fire_hits(&mut self) {
        let mut lasers = self.fighter.take_lasers();
        let mut survivors = Vec::with_capacity(self.aliens.len());
        let mut downed = Vec::new();
        for alien in std::mem::take(&mut self.aliens) {
            let hit = lasers
                .iter()
                .position(|laser| overlaps(laser.pos(), laser.mask(), alien.pos(), alien.mask()));
            match hit {
                Some(index) => {
                    lasers.remove(index);
                    downed.push(alien);
                }
                None => survivors.push(alien),
            }
        }
        self.aliens = survivors;
        self.fighter.restore_lasers(lasers);

        for alien in downed {
            self.score += 1;
            self.wreck_alien(alien);
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn strike_fighter(&mut self) {
        self.lose_life();
        self.fighter.mark_hit();
        self.hit_serial += 1;
        self.timeline
            .schedule(self.clock + ANIMATION_STEP, Cue::FighterRecovered(self.hit_serial));
    }

    fn wreck_alien(&mut self, alien: Alien) {
        let wreck = alien.into_wreck();
        self.timeline.schedule(self.clock + ANIMATION_STEP, Cue::WreckExplodes(wreck.id));
        self.wrecks.push(wreck);
    }

    fn game_over(&mut self, board: &mut dyn LeaderboardStore) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::GameOver;
        self.banner = None;
        self.fighter.wreck();
        for alien in &mut self.aliens {
            alien.freeze();
        }
        self.timeline.schedule(self.clock + ANIMATION_STEP, Cue::FighterExplodes);
        info!(player = %self.player_name, score = self.score, level = self.level, "game over");

        let entry = ScoreEntry::new(self.player_name.clone(), self.score);
        match scores::record(board, &entry) {
            Ok(_) => self.timeline.schedule(self.clock + LEADERBOARD_DELAY, Cue::ShowLeaderboard),
            Err(err) => {
                warn!(%err, "could not record score, skipping leaderboard");
                self.board_error = Some(err.to_string());
            }
        }
    }

    fn show_leaderboard(&mut self, board: &mut dyn LeaderboardStore) {
        match board.top_n(LEADERBOARD_SIZE) {
            Ok(entries) => {
                self.leaderboard = Some(entries);
                self.phase = Phase::Leaderboard;
            }
            Err(err) => {
                warn!(%err, "could not read leaderboard");
                self.board_error = Some(err.to_string());
            }
        }
    }

    pub fn scene(&self) -> Scene {
        let mut commands = Vec::new();
        commands.extend(self.wrecks.iter().map(|w| DrawCommand::new(w.sprite(), (w.x, w.y))));
        commands.extend(self.aliens.iter().map(|a| DrawCommand::new(SpriteId::Alien, a.pos())));
        commands.extend(
            self.aliens
                .iter()
                .flat_map(|a| a.lasers())
                .map(|l| DrawCommand::new(l.sprite, l.pos())),
        );
        commands.extend(self.fighter.lasers().iter().map(|l| DrawCommand::new(l.sprite, l.pos())));
        if let Some(sprite) = self.fighter.sprite() {
            commands.push(DrawCommand::new(sprite, self.fighter.pos()));
        }

        let banner = match self.phase {
            Phase::GameOver | Phase::Leaderboard => Some(Banner::GameOver),
            Phase::Playing | Phase::Paused => self.banner.map(Banner::Level),
        };

        Scene {
            commands,
            backdrop_offset: self.backdrop_offset,
            banner,
            hud: Hud {
                player: self.player_name.clone(),
                score: self.score,
                lives: self.lives,
                level: self.level,
                mode: self.fighter.mode(),
                paused: self.phase == Phase::Paused,
            },
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn alien_speed(&self) -> u32 {
        self.alien_speed
    }

    pub fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn wrecks(&self) -> &[Wreck] {
        &self.wrecks
    }

    pub fn leaderboard(&self) -> Option<&[ScoreEntry]> {
        self.leaderboard.as_deref()
    }

    pub fn board_error(&self) -> Option<&str> {
        self.board_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fighter::Hull;
    use crate::game::laser::{Direction, Laser};
    use crate::scores::{LeaderboardError, MemoryLeaderboard};

    /// Memory board that counts writes.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryLeaderboard,
        writes: usize,
    }

    impl LeaderboardStore for CountingStore {
        fn read(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
            self.inner.read()
        }

        fn append(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
            self.writes += 1;
            self.inner.append(entry)
        }

        fn update(&mut self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
            self.writes += 1;
            self.inner.update(entry)
        }
    }

    fn session() -> Session {
        Session::with_rng(GameConfig::default(), "tester", StdRng::seed_from_u64(7))
    }

    /// A session already on level 1 with a hand-placed wave.
    fn playing(aliens: Vec<Alien>) -> Session {
        let mut s = session();
        s.level = 1;
        s.alien_speed = 2;
        s.fighter.speed = 15.0;
        s.next_id = aliens.iter().map(|a| a.id + 1).max().unwrap_or(0);
        s.aliens = aliens;
        s
    }

    /// Parked far above the field so it neither fires nor escapes soon.
    fn idle_alien(id: u64) -> Alien {
        Alien::at(id, 100.0, -800.0, 2)
    }

    /// Already on screen with its first shot spent, so it won't fire for a while.
    fn holding_fire(id: u64, x: f32, y: f32) -> Alien {
        let mut alien = Alien::at(id, x, y, 2);
        alien.advance(Duration::ZERO, 900.0);
        alien.lasers_mut().clear();
        alien
    }

    #[test]
    fn first_tick_starts_level_one() {
        let mut s = session();
        let mut board = MemoryLeaderboard::new();
        assert_eq!(s.player_name(), "Tester");
        s.tick(&mut board);
        assert_eq!(s.level(), 1);
        assert_eq!(s.aliens().len(), 3);
        assert!(s.aliens().iter().all(|a| a.speed() == 2));
        assert_eq!(s.fighter().speed, 15.0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.scene().banner, Some(Banner::Level(1)));
    }

    #[test]
    fn escaped_alien_costs_exactly_one_life() {
        let mut s = playing(vec![Alien::at(0, 300.0, 901.0, 2), idle_alien(1)]);
        let mut board = MemoryLeaderboard::new();
        s.tick(&mut board);
        assert_eq!(s.lives(), 2);
        assert_eq!(s.aliens().len(), 1);
        assert_eq!(s.wrecks().len(), 1);
        s.tick(&mut board);
        assert_eq!(s.lives(), 2);
        assert_eq!(s.wrecks().len(), 1);
    }

    #[test]
    fn every_escape_in_one_tick_is_charged() {
        let mut s = playing(vec![
            Alien::at(0, 300.0, 899.0, 2),
            idle_alien(1),
            Alien::at(2, 900.0, 950.0, 2),
        ]);
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.lives(), 1);
        assert_eq!(s.aliens().iter().map(|a| a.id).collect::<Vec<_>>(), [1]);
        assert_eq!(s.wrecks().len(), 2);
    }

    #[test]
    fn frozen_ship_below_the_edge_is_not_charged() {
        let mut alien = Alien::at(0, 300.0, 950.0, 2);
        alien.freeze();
        let mut s = playing(vec![alien, idle_alien(1)]);
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.lives(), 3);
        assert_eq!(s.aliens().len(), 2);
    }

    #[test]
    fn laser_hit_scores_once_and_removes_both() {
        let mut s = playing(vec![Alien::at(0, 500.0, 300.0, 2), idle_alien(1)]);
        s.fighter
            .restore_lasers(vec![Laser::new(500.0, 320.0, 10.0, Direction::Up, SpriteId::Laser)]);
        let mut board = MemoryLeaderboard::new();
        s.tick(&mut board);
        assert_eq!(s.score(), 1);
        assert_eq!(s.aliens().len(), 1);
        assert_eq!(s.aliens()[0].id, 1);
        assert!(s.fighter().lasers().is_empty());
        assert_eq!(s.wrecks()[0].id, 0);
    }

    #[test]
    fn one_bolt_downs_only_one_alien() {
        let mut s = playing(vec![Alien::at(0, 500.0, 300.0, 2), Alien::at(1, 500.0, 300.0, 2)]);
        s.fighter
            .restore_lasers(vec![Laser::new(500.0, 320.0, 10.0, Direction::Up, SpriteId::Laser)]);
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.score(), 1);
        assert_eq!(s.aliens().len(), 1);
    }

    #[test]
    fn enemy_bolt_hurts_only_in_normal_mode() {
        for (mode, lives) in [(Mode::Normal, 2), (Mode::Powered, 3)] {
            let mut alien = idle_alien(0);
            alien
                .lasers_mut()
                .push(Laser::new(720.0, 790.0, 5.0, Direction::Down, SpriteId::AlienLaser));
            let mut s = playing(vec![alien]);
            if mode == Mode::Powered {
                s.fighter.toggle_mode();
            }
            s.tick(&mut MemoryLeaderboard::new());
            assert_eq!(s.lives(), lives, "{mode:?}");
            assert!(s.aliens()[0].lasers().is_empty(), "bolt is spent in {mode:?}");
        }
    }

    #[test]
    fn ramming_depends_on_mode() {
        let mut s = playing(vec![holding_fire(0, 720.0, 800.0), idle_alien(1)]);
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!((s.lives(), s.score()), (2, 0));
        assert_eq!(s.fighter().hull(), Hull::Hit);
        assert_eq!(s.aliens().len(), 1);

        let mut s = playing(vec![holding_fire(0, 720.0, 800.0), idle_alien(1)]);
        s.fighter.toggle_mode();
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!((s.lives(), s.score()), (3, 1));
        assert_eq!(s.aliens().len(), 1);
    }

    #[test]
    fn game_over_happens_once() {
        let mut alien = idle_alien(0);
        alien
            .lasers_mut()
            .push(Laser::new(720.0, 790.0, 5.0, Direction::Down, SpriteId::AlienLaser));
        let mut s = playing(vec![alien]);
        s.lives = 1;
        let mut board = CountingStore::default();

        s.tick(&mut board);
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.lives(), 0);
        assert_eq!(board.writes, 1);
        assert_eq!(s.fighter().hull(), Hull::Wrecked);
        assert!(s.aliens().iter().all(|a| a.speed() == 0));

        for _ in 0..100 {
            s.tick(&mut board);
        }
        assert_eq!(board.writes, 1);
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.fighter().hull(), Hull::Gone);
    }

    #[test]
    fn leaderboard_follows_after_the_delay() {
        let mut s = playing(vec![idle_alien(0)]);
        s.lives = 0;
        let mut board = MemoryLeaderboard::new();
        s.tick(&mut board);
        assert_eq!(s.phase(), Phase::GameOver);

        let started = s.clock();
        while s.phase() == Phase::GameOver {
            s.tick(&mut board);
            assert!(s.clock() - started <= LEADERBOARD_DELAY + s.config().tick());
        }
        assert_eq!(s.phase(), Phase::Leaderboard);
        assert_eq!(s.leaderboard(), Some(&[ScoreEntry::new("Tester", 0)][..]));
        assert_eq!(s.handle(Command::Return), Outcome::ReturnToMenu);
    }

    #[test]
    fn return_is_ignored_while_playing() {
        let mut s = session();
        assert_eq!(s.handle(Command::Return), Outcome::Continue);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn pause_freezes_everything() {
        let mut s = session();
        let mut board = MemoryLeaderboard::new();
        s.tick(&mut board);
        s.handle(Command::Pause);
        assert_eq!(s.phase(), Phase::Paused);
        assert!(s.scene().hud.paused);

        let clock = s.clock();
        let positions: Vec<_> = s.aliens().iter().map(Alien::pos).collect();
        s.handle(Command::Shoot);
        s.handle(Command::MoveLeft);
        for _ in 0..120 {
            s.tick(&mut board);
        }
        assert_eq!(s.clock(), clock);
        assert_eq!(s.aliens().iter().map(Alien::pos).collect::<Vec<_>>(), positions);
        assert!(s.fighter().lasers().is_empty());
        assert_eq!(s.fighter().x, 720.0);

        s.handle(Command::Pause);
        s.tick(&mut board);
        assert_eq!(s.clock(), clock + s.config().tick());
    }

    #[test]
    fn boss_screen_holds_the_clock_until_dismissed() {
        let mut s = session();
        let mut board = MemoryLeaderboard::new();
        s.tick(&mut board);
        let clock = s.clock();
        let positions: Vec<_> = s.aliens().iter().map(Alien::pos).collect();

        assert_eq!(s.handle(Command::Boss), Outcome::Continue);
        assert!(s.is_hidden());
        assert_eq!(s.phase(), Phase::Playing);
        s.handle(Command::Shoot);
        s.handle(Command::Pause);
        for _ in 0..100 {
            s.tick(&mut board);
        }
        assert_eq!(s.clock(), clock);
        assert_eq!(s.aliens().iter().map(Alien::pos).collect::<Vec<_>>(), positions);
        assert!(s.fighter().lasers().is_empty());
        assert_eq!(s.phase(), Phase::Playing);

        s.handle(Command::Boss);
        assert!(!s.is_hidden());
        s.tick(&mut board);
        assert_eq!(s.clock(), clock + s.config().tick());
    }

    #[test]
    fn boss_screen_covers_the_board_too() {
        let mut s = playing(vec![idle_alien(0)]);
        s.lives = 0;
        let mut board = MemoryLeaderboard::new();
        s.tick(&mut board);
        s.handle(Command::Boss);
        let clock = s.clock();
        for _ in 0..400 {
            s.tick(&mut board);
        }
        assert_eq!(s.clock(), clock);
        assert_eq!(s.phase(), Phase::GameOver);
        assert_eq!(s.handle(Command::Return), Outcome::Continue);
    }

    #[test]
    fn wreck_animates_then_clears() {
        let mut s = playing(vec![idle_alien(0)]);
        let mut board = MemoryLeaderboard::new();
        s.wreck_alien(Alien::at(9, 300.0, 300.0, 2));
        s.clock += ANIMATION_STEP;
        s.run_due(&mut board);
        assert_eq!(s.wrecks()[0].stage, WreckStage::Explosion);
        s.clock += ANIMATION_STEP;
        s.run_due(&mut board);
        assert!(s.wrecks().is_empty());
    }

    #[test]
    fn stale_cues_are_no_ops() {
        let mut s = playing(vec![idle_alien(0)]);
        let mut board = MemoryLeaderboard::new();
        s.wreck_alien(Alien::at(9, 300.0, 300.0, 2));
        s.wrecks.clear();
        s.clock += ANIMATION_STEP * 3;
        s.run_due(&mut board);
        assert!(s.wrecks().is_empty());
        assert!(s.timeline.is_empty());

        s.run_cue(Cue::WreckCleared(42), &mut board);
        s.run_cue(Cue::ShowLeaderboard, &mut board);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.leaderboard().is_none());
    }

    #[test]
    fn older_banner_timer_keeps_a_newer_banner() {
        let mut s = session();
        let mut board = MemoryLeaderboard::new();
        s.on_wave_cleared();
        s.clock = Duration::from_millis(2_000);
        s.on_wave_cleared();
        assert_eq!(s.banner, Some(2));

        s.clock = BANNER_DURATION;
        s.run_due(&mut board);
        assert_eq!(s.banner, Some(2));
        s.clock = Duration::from_millis(5_000);
        s.run_due(&mut board);
        assert_eq!(s.banner, None);
    }

    #[test]
    fn second_hit_extends_the_flash() {
        let mut s = playing(vec![idle_alien(0)]);
        let mut board = MemoryLeaderboard::new();
        s.strike_fighter();
        s.clock += Duration::from_millis(100);
        s.strike_fighter();
        s.clock += Duration::from_millis(100);
        s.run_due(&mut board);
        assert_eq!(s.fighter().hull(), Hull::Hit);
        s.clock += Duration::from_millis(100);
        s.run_due(&mut board);
        assert_eq!(s.fighter().hull(), Hull::Intact);
        assert_eq!(s.lives(), 1);
    }

    #[test]
    fn cleared_wave_restores_a_life_up_to_the_cap() {
        let mut s = playing(Vec::new());
        s.lives = 2;
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.level(), 2);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.aliens().len(), 3);

        s.aliens.clear();
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.lives(), 3);
        assert_eq!(s.level(), 3);
    }

    #[test]
    fn backdrop_scrolls_at_half_alien_speed_and_wraps() {
        let mut s = playing(vec![idle_alien(0)]);
        s.alien_speed = 3;
        s.backdrop_offset = 899.0;
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.scene().backdrop_offset, 0.0);

        s.alien_speed = 5;
        s.backdrop_offset = 10.0;
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.scene().backdrop_offset, 12.0);

        s.alien_speed = 1;
        s.tick(&mut MemoryLeaderboard::new());
        assert_eq!(s.scene().backdrop_offset, 12.0);
    }

    #[test]
    fn scene_paints_the_fighter_last() {
        let mut s = playing(vec![idle_alien(0)]);
        s.fighter.shoot();
        let scene = s.scene();
        assert_eq!(scene.commands.first().map(|c| c.sprite), Some(SpriteId::Alien));
        assert_eq!(scene.commands.last().map(|c| c.sprite), Some(SpriteId::FighterMain));
        assert_eq!(scene.commands.len(), 3);
        assert_eq!(scene.hud.level, 1);
    }
}
