pub mod alien;
pub mod collision;
pub mod draw;
pub mod fighter;
pub mod laser;
pub mod session;
pub mod timeline;
pub mod wave;

pub use session::{Outcome, Phase, Session};
