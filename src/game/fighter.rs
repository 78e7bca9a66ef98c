use crate::config::Geometry;
use crate::sprites::{Sprite, SpriteId, FIGHTER_MAIN, FIGHTER_SUPER};

use super::laser::{Direction, Laser};

/// Gap kept between the fighter and the left, right and bottom edges.
const EDGE_MARGIN: f32 = 15.0;
/// The fighter may not climb into the top part of the field.
const CEILING: f32 = 400.0;
/// Spawn height measured from the bottom edge.
const START_OFFSET: f32 = 90.0;
/// Bolts leave from just above the nose.
const MUZZLE_OFFSET: f32 = 40.0;
const LASER_SPEED_PENALTY: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Powered,
}

/// Visual/structural state of the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hull {
    Intact,
    /// Flashing after taking a hit; still flies and still collides.
    Hit,
    Wrecked,
    Exploding,
    Gone,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    /// A field too small for the sprite pins that axis to a single point.
    pub fn for_sprite(geometry: Geometry, sprite: &Sprite) -> Self {
        let half_w = sprite.width as f32 / 2.0;
        let half_h = sprite.height as f32 / 2.0;
        let x_min = half_w + EDGE_MARGIN;
        let x_max = geometry.width - (half_w + EDGE_MARGIN);
        let y_min = half_h + CEILING;
        let y_max = geometry.height - (half_h + EDGE_MARGIN);
        Self {
            x_min,
            x_max: x_max.max(x_min),
            y_min,
            y_max: y_max.max(y_min),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.x_min, self.x_max), y.clamp(self.y_min, self.y_max))
    }
}

/// The player's ship and the bolts it has fired.
#[derive(Clone, Debug)]
pub struct Fighter {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    mode: Mode,
    hull: Hull,
    bounds: Bounds,
    lasers: Vec<Laser>,
}

impl Fighter {
    pub fn new(geometry: Geometry) -> Self {
        let bounds = Bounds::for_sprite(geometry, &FIGHTER_MAIN);
        let (x, y) = bounds.clamp(geometry.width / 2.0, geometry.height - START_OFFSET);
        Self {
            x,
            y,
            speed: 0.0,
            mode: Mode::Normal,
            hull: Hull::Intact,
            bounds,
            lasers: Vec::new(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-self.speed, 0.0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(self.speed, 0.0)
    }

    pub fn move_up(&mut self) -> bool {
        self.try_move(0.0, -self.speed)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0.0, self.speed)
    }

    /// Applies the step only if the ship lands inside its bounds.
    fn try_move(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_flying() {
            return false;
        }
        let (x, y) = (self.x + dx, self.y + dy);
        if !self.bounds.contains(x, y) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Normal => Mode::Powered,
            Mode::Powered => Mode::Normal,
        };
    }

    pub fn shoot(&mut self) {
        if !self.is_flying() {
            return;
        }
        // Bolts must always outrun the ship upwards, even before the first level sets a speed.
        let speed = (self.speed - LASER_SPEED_PENALTY).max(1.0);
        self.lasers.push(Laser::new(
            self.x,
            self.y - MUZZLE_OFFSET,
            speed,
            Direction::Up,
            SpriteId::Laser,
        ));
    }

    /// Moves every bolt and drops those past the top edge.
    pub fn advance_lasers(&mut self) {
        for laser in &mut self.lasers {
            laser.advance();
        }
        self.lasers.retain(|laser| !laser.is_off_screen(0.0));
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hull(&self) -> Hull {
        self.hull
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub(crate) fn take_lasers(&mut self) -> Vec<Laser> {
        std::mem::take(&mut self.lasers)
    }

    pub(crate) fn restore_lasers(&mut self, lasers: Vec<Laser>) {
        self.lasers = lasers;
    }

    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Collision mask follows the mode, not the hit flash.
    pub fn mask(&self) -> &'static Sprite {
        match self.mode {
            Mode::Normal => &FIGHTER_MAIN,
            Mode::Powered => &FIGHTER_SUPER,
        }
    }

    pub fn sprite(&self) -> Option<SpriteId> {
        match self.hull {
            Hull::Intact => Some(match self.mode {
                Mode::Normal => SpriteId::FighterMain,
                Mode::Powered => SpriteId::FighterSuper,
            }),
            Hull::Hit => Some(SpriteId::FighterHit),
            Hull::Wrecked => Some(SpriteId::FighterWreck),
            Hull::Exploding => Some(SpriteId::FighterExplosion),
            Hull::Gone => None,
        }
    }

    /// Able to move, shoot and be hit.
    pub fn is_flying(&self) -> bool {
        matches!(self.hull, Hull::Intact | Hull::Hit)
    }

    pub(crate) fn mark_hit(&mut self) {
        if self.is_flying() {
            self.hull = Hull::Hit;
        }
    }

    pub(crate) fn recover(&mut self) {
        if self.hull == Hull::Hit {
            self.hull = Hull::Intact;
        }
    }

    /// Stops the ship for good and starts the destroy sequence.
    pub(crate) fn wreck(&mut self) {
        self.speed = 0.0;
        self.lasers.clear();
        self.hull = Hull::Wrecked;
    }

    pub(crate) fn explode(&mut self) {
        if self.hull == Hull::Wrecked {
            self.hull = Hull::Exploding;
        }
    }

    pub(crate) fn vanish(&mut self) {
        if self.hull == Hull::Exploding {
            self.hull = Hull::Gone;
        }
    }
}
