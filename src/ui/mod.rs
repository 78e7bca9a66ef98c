pub mod decoy;
pub mod field;
pub mod leaderboard;
pub mod menu;

use ratatui::prelude::*;

use onslaught::game::Phase;
use onslaught::scores::LeaderboardStore;

use crate::app::{App, Screen};

pub fn render<B: LeaderboardStore>(frame: &mut Frame, app: &App<B>) {
    let area = frame.area();
    match &app.screen {
        Screen::Menu => menu::render_menu(frame, area, app),
        Screen::Game(session) if session.is_hidden() => decoy::render_decoy(frame, area),
        Screen::Game(session) => match session.phase() {
            Phase::Leaderboard => leaderboard::render_leaderboard(frame, area, session),
            Phase::Playing | Phase::Paused | Phase::GameOver => field::render_field(frame, area, session, app.scheme),
        },
    }
}

/// Centred rectangle no larger than `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
