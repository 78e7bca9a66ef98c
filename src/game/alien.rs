use std::time::Duration;

use rand::Rng;

use crate::config::Geometry;
use crate::sprites::{Sprite, SpriteId, ALIEN_MAIN};

use super::laser::{Direction, Laser};

pub const SHOOT_DELAY: Duration = Duration::from_millis(5000);
/// Horizontal spawn keeps the hull clear of the side walls.
const SPAWN_MARGIN: i32 = 75;
/// Ships start anywhere up to one screen above the field.
const SPAWN_CEILING: i32 = -900;
const WEAVE_AMPLITUDE: f32 = 2.0;
const WEAVE_PERIOD: f32 = 50.0;
const MUZZLE_OFFSET: f32 = 40.0;
const LASER_SPEED_BONUS: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienEvent {
    Cruising,
    /// Reported exactly once, on the tick the ship crosses the bottom edge.
    Escaped,
}

#[derive(Clone, Debug)]
pub struct Alien {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    speed: u32,
    last_shot: Option<Duration>,
    escaped: bool,
    lasers: Vec<Laser>,
}

impl Alien {
    pub fn at(id: u64, x: f32, y: f32, speed: u32) -> Self {
        Self {
            id,
            x,
            y,
            speed,
            last_shot: None,
            escaped: false,
            lasers: Vec::new(),
        }
    }

    /// Random start above the visible field.
    pub fn spawn(id: u64, speed: u32, geometry: Geometry, rng: &mut impl Rng) -> Self {
        let x_max = (geometry.width as i32 - SPAWN_MARGIN).max(SPAWN_MARGIN);
        let x = rng.gen_range(SPAWN_MARGIN..=x_max);
        let y = rng.gen_range(SPAWN_CEILING..=0);
        Self::at(id, x as f32, y as f32, speed)
    }

    /// One step of descent plus the shoot check. The sideways weave is a
    /// function of depth, not of time. A stopped ship neither moves nor fires.
    pub fn advance(&mut self, now: Duration, height: f32) -> AlienEvent {
        if self.escaped || self.speed == 0 {
            return AlienEvent::Cruising;
        }

        self.y += self.speed as f32;
        self.x += WEAVE_AMPLITUDE * (self.y / WEAVE_PERIOD).sin();

        if self.y >= height {
            self.escaped = true;
            return AlienEvent::Escaped;
        }

        if self.y > 0.0 && self.shot_ready(now) {
            self.shoot();
            self.last_shot = Some(now);
        }
        AlienEvent::Cruising
    }

    fn shot_ready(&self, now: Duration) -> bool {
        match self.last_shot {
            None => true,
            Some(last) => now.saturating_sub(last) > SHOOT_DELAY,
        }
    }

    fn shoot(&mut self) {
        self.lasers.push(Laser::new(
            self.x,
            self.y + MUZZLE_OFFSET,
            self.speed as f32 + LASER_SPEED_BONUS,
            Direction::Down,
            SpriteId::AlienLaser,
        ));
    }

    pub fn advance_lasers(&mut self, height: f32) {
        for laser in &mut self.lasers {
            laser.advance();
        }
        self.lasers.retain(|laser| !laser.is_off_screen(height));
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn has_escaped(&self) -> bool {
        self.escaped
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub(crate) fn lasers_mut(&mut self) -> &mut Vec<Laser> {
        &mut self.lasers
    }

    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn mask(&self) -> &'static Sprite {
        &ALIEN_MAIN
    }

    pub(crate) fn freeze(&mut self) {
        self.speed = 0;
        self.lasers.clear();
    }

    /// Takes the ship out of play; its bolts in flight go with it.
    pub fn into_wreck(self) -> Wreck {
        Wreck {
            id: self.id,
            x: self.x,
            y: self.y,
            stage: WreckStage::Destroyed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WreckStage {
    Destroyed,
    Explosion,
}

/// What is left on screen of a destroyed alien while it animates out.
#[derive(Clone, Debug)]
pub struct Wreck {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub stage: WreckStage,
}

impl Wreck {
    pub fn sprite(&self) -> SpriteId {
        match self.stage {
            WreckStage::Destroyed => SpriteId::AlienWreck,
            WreckStage::Explosion => SpriteId::AlienExplosion,
        }
    }
}
