use crate::sprites::{Sprite, SpriteId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A laser bolt travelling straight up or down at a fixed speed.
#[derive(Clone, Debug)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub direction: Direction,
    pub sprite: SpriteId,
}

impl Laser {
    pub fn new(x: f32, y: f32, speed: f32, direction: Direction, sprite: SpriteId) -> Self {
        Self { x, y, speed, direction, sprite }
    }

    pub fn advance(&mut self) {
        match self.direction {
            Direction::Up => self.y -= self.speed,
            Direction::Down => self.y += self.speed,
        }
    }

    /// `bound` is the top edge for upward bolts and the bottom edge for
    /// downward ones.
    pub fn is_off_screen(&self, bound: f32) -> bool {
        match self.direction {
            Direction::Up => self.y <= bound,
            Direction::Down => self.y >= bound,
        }
    }

    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn mask(&self) -> &'static Sprite {
        self.sprite.sprite()
    }
}
