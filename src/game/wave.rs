//! Level progression curves.
//!
//! Both enemy count and speed grow sub-linearly with the level so the first
//! waves stay gentle and later ones don't run away.

use std::time::Duration;

use rand::Rng;

use crate::config::Geometry;

use super::alien::Alien;

pub const MAX_LIVES: u32 = 3;
pub const BANNER_DURATION: Duration = Duration::from_millis(3000);

pub fn wave_length(level: u32) -> usize {
    (level as f64).powf(0.7).floor() as usize + 2
}

pub fn alien_speed(level: u32) -> u32 {
    (level as f64).powf(0.6).floor() as u32 + 1
}

pub fn fighter_speed(level: u32) -> f32 {
    ((level as f64).powf(0.6).floor() + 14.0) as f32
}

/// One life back per cleared wave, never above the cap.
pub fn restore_life(lives: u32) -> u32 {
    if lives < MAX_LIVES {
        lives + 1
    } else {
        lives
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub level: u32,
    pub length: usize,
    pub alien_speed: u32,
    pub fighter_speed: f32,
}

impl Wave {
    pub fn for_level(level: u32) -> Self {
        Self {
            level,
            length: wave_length(level),
            alien_speed: alien_speed(level),
            fighter_speed: fighter_speed(level),
        }
    }

    /// Ids are handed out from `next_id`, which is advanced past the batch.
    pub fn spawn(&self, next_id: &mut u64, geometry: Geometry, rng: &mut impl Rng) -> Vec<Alien> {
        (0..self.length)
            .map(|_| {
                let id = *next_id;
                *next_id += 1;
                Alien::spawn(id, self.alien_speed, geometry, rng)
            })
            .collect()
    }
}
