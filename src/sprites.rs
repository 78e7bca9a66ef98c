//! Built-in sprite art.
//!
//! Every sprite is a coarse bitmap (`#` opaque, `.` transparent) stretched
//! over a box measured in world pixels, so collision tests run at world
//! resolution while the art stays small enough to read in source.

use crate::game::collision::Mask;

#[derive(Debug)]
pub struct Sprite {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    rows: &'static [&'static str],
}

impl Sprite {
    fn cols(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }
}

impl Mask for Sprite {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height || self.rows.is_empty() {
            return false;
        }
        let row = (y as usize * self.rows.len()) / self.height as usize;
        let col = (x as usize * self.cols()) / self.width as usize;
        self.rows[row].as_bytes().get(col) == Some(&b'#')
    }
}

const FIGHTER_MAIN_ROWS: &[&str] = &[
    ".......#.......",
    "......###......",
    "......###......",
    ".....#####.....",
    ".....#####.....",
    "....#######....",
    "...#########...",
    "..###########..",
    ".#############.",
    "###############",
    "###.#######.###",
    "##...#####...##",
    "#.....###.....#",
    "......#.#......",
    "...............",
];

const FIGHTER_SUPER_ROWS: &[&str] = &[
    ".......#.......",
    "......###......",
    ".....#####.....",
    "....#######....",
    "...#########...",
    "..###########..",
    ".#############.",
    "###############",
    "###############",
    "###.#######.###",
    "##..#######..##",
    "#...#######...#",
    "....##...##....",
    "....#.....#....",
    "...............",
];

const ALIEN_MAIN_ROWS: &[&str] = &[
    "...####...",
    ".########.",
    "##########",
    "##.####.##",
    "##########",
    "..##..##..",
    ".##.##.##.",
    "##......##",
    ".#......#.",
    "..........",
];

const WRECK_ROWS: &[&str] = &[
    "...#..#...",
    ".#.##.#.#.",
    "##.#..#.##",
    "#..#.#..##",
    ".#######..",
    "..#..##.#.",
    ".##.#..#..",
    "#.......##",
    ".#.....#..",
    "..........",
];

const EXPLOSION_ROWS: &[&str] = &[
    "#...#...#.",
    ".#..#..#..",
    "..#.#.#...",
    "...###....",
    "#########.",
    "...###....",
    "..#.#.#...",
    ".#..#..#..",
    "#...#...#.",
    "..........",
];

const LASER_ROWS: &[&str] = &["#", "#", "#", "#"];

const LASER_ALT_ROWS: &[&str] = &["#", "#", ".", "#", "#", ".", "#", "#"];

pub static FIGHTER_MAIN: Sprite = Sprite { name: "space-fighter-main", width: 150, height: 150, rows: FIGHTER_MAIN_ROWS };
pub static FIGHTER_SUPER: Sprite = Sprite { name: "space-fighter-super", width: 150, height: 150, rows: FIGHTER_SUPER_ROWS };
pub static FIGHTER_WRECK: Sprite = Sprite { name: "space-fighter-destroyed", width: 150, height: 150, rows: WRECK_ROWS };
pub static FIGHTER_EXPLOSION: Sprite = Sprite { name: "space-fighter-explosion", width: 150, height: 150, rows: EXPLOSION_ROWS };
pub static ALIEN_MAIN: Sprite = Sprite { name: "alien-ship-main", width: 100, height: 100, rows: ALIEN_MAIN_ROWS };
pub static ALIEN_WRECK: Sprite = Sprite { name: "alien-ship-destroyed", width: 100, height: 100, rows: WRECK_ROWS };
pub static ALIEN_EXPLOSION: Sprite = Sprite { name: "alien-ship-explosion", width: 100, height: 100, rows: EXPLOSION_ROWS };
pub static LASER: Sprite = Sprite { name: "laser-beam", width: 6, height: 40, rows: LASER_ROWS };
pub static LASER_ALT: Sprite = Sprite { name: "laser-beam-alt", width: 6, height: 40, rows: LASER_ALT_ROWS };

/// Handle the draw surface uses to pick art and colour for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    FighterMain,
    FighterSuper,
    FighterHit,
    FighterWreck,
    FighterExplosion,
    Alien,
    AlienWreck,
    AlienExplosion,
    Laser,
    AlienLaser,
}

impl SpriteId {
    pub fn sprite(self) -> &'static Sprite {
        match self {
            SpriteId::FighterMain | SpriteId::FighterHit => &FIGHTER_MAIN,
            SpriteId::FighterSuper => &FIGHTER_SUPER,
            SpriteId::FighterWreck => &FIGHTER_WRECK,
            SpriteId::FighterExplosion => &FIGHTER_EXPLOSION,
            SpriteId::Alien => &ALIEN_MAIN,
            SpriteId::AlienWreck => &ALIEN_WRECK,
            SpriteId::AlienExplosion => &ALIEN_EXPLOSION,
            SpriteId::Laser => &LASER,
            SpriteId::AlienLaser => &LASER_ALT,
        }
    }
}
