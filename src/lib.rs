pub mod config;
pub mod game;
pub mod input;
pub mod scores;
pub mod sprites;
