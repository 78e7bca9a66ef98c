use std::collections::HashMap;

use ratatui::prelude::*;
use ratatui::widgets::*;

use onslaught::config::Geometry;
use onslaught::game::collision::Mask;
use onslaught::game::draw::{Banner, DrawCommand, Scene};
use onslaught::game::fighter::Mode;
use onslaught::game::{Phase, Session};
use onslaught::input::ControlScheme;
use onslaught::sprites::SpriteId;

use super::centered;

const BG: Color = Color::Rgb(0, 0, 5);
const STAR_COUNT: u32 = 80;

type DotMap = HashMap<(usize, usize), u8>;

pub fn render_field(frame: &mut Frame, area: Rect, session: &Session, scheme: ControlScheme) {
    let scene = session.scene();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Galactic Onslaught ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(&scene)), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = field_lines(&scene, session.config().geometry(), fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    if let Some((text, color)) = overlay(&scene) {
        render_banner(frame, chunks[1], &text, color);
    }

    frame.render_widget(Paragraph::new(help_line(session, scheme)), chunks[2]);
}

/// Pause wins over the level banner.
fn overlay(scene: &Scene) -> Option<(String, Color)> {
    if scene.hud.paused {
        return Some(("PAUSED".to_string(), Color::Yellow));
    }
    match scene.banner? {
        Banner::Level(level) => Some((format!("LEVEL {level}"), Color::Rgb(80, 200, 255))),
        Banner::GameOver => Some(("GAME OVER".to_string(), Color::Red)),
    }
}

fn status_line(scene: &Scene) -> Line<'static> {
    let hud = &scene.hud;
    let lives_str = "\u{2665} ".repeat(hud.lives as usize);
    let (mode, mode_color) = match hud.mode {
        Mode::Normal => ("Normal", Color::Rgb(80, 255, 80)),
        Mode::Powered => ("Powered", Color::Rgb(255, 160, 60)),
    };
    Line::from(vec![
        Span::styled(format!(" {} ", hud.player), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Score: {} ", hud.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {lives_str}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("Level: {} ", hud.level), Style::default().fg(Color::Green)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("Mode: {mode}"), Style::default().fg(mode_color)),
    ])
}

fn help_line(session: &Session, scheme: ControlScheme) -> Line<'static> {
    let sep = || Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));
    match session.phase() {
        Phase::GameOver if session.board_error().is_some() => Line::from(vec![
            Span::styled(" GAME OVER ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Leaderboard unavailable. Press R to return to Menu", Style::default().fg(Color::Gray)),
        ]),
        Phase::GameOver => Line::from(Span::styled(
            " GAME OVER ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Phase::Paused => Line::from(Span::styled(
            " PAUSED - Press P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        _ => Line::from(vec![
            Span::styled(format!(" {} Move ", scheme.label()), Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            sep(),
            Span::styled("F Mode ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("B Boss", Style::default().fg(Color::DarkGray)),
        ]),
    }
}

fn render_banner(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let rect = centered(area, text.len() as u16 + 6, 3);
    frame.render_widget(Clear, rect);
    let banner = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(BG)),
    );
    frame.render_widget(banner, rect);
}

// ── Braille rendering ──────────────────────────────────────────────

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn set_dot(map: &mut DotMap, bx: i32, by: i32, bw: i32, bh: i32) {
    if bx < 0 || by < 0 || bx >= bw || by >= bh {
        return;
    }
    let cx = bx as usize / 2;
    let cy = by as usize / 4;
    let sx = bx as usize % 2;
    let sy = by as usize % 4;
    *map.entry((cx, cy)).or_insert(0) |= braille_bit(sx, sy);
}

fn write_layer(grid: &mut [Vec<(char, Style)>], map: &DotMap, w: usize, h: usize, color: Color, bold: bool) {
    for (&(cx, cy), &bits) in map {
        if cx < w && cy < h && bits != 0 {
            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
            let mut style = Style::default().fg(color).bg(BG);
            if bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            grid[cy][cx] = (ch, style);
        }
    }
}

/// World-to-dot scale for a field of `bw` x `bh` braille dots.
struct Scale {
    x: f32,
    y: f32,
    bw: i32,
    bh: i32,
}

/// Samples the sprite mask at the centre of every dot its box covers.
fn stamp(map: &mut DotMap, cmd: &DrawCommand, scale: &Scale) {
    let sprite = cmd.sprite.sprite();
    let left = cmd.x - sprite.width() as f32 / 2.0;
    let top = cmd.y - sprite.height() as f32 / 2.0;
    let x0 = (left * scale.x).floor() as i32;
    let x1 = ((left + sprite.width() as f32) * scale.x).ceil() as i32;
    let y0 = (top * scale.y).floor() as i32;
    let y1 = ((top + sprite.height() as f32) * scale.y).ceil() as i32;

    for by in y0.max(0)..y1.min(scale.bh) {
        for bx in x0.max(0)..x1.min(scale.bw) {
            let wx = (bx as f32 + 0.5) / scale.x - left;
            let wy = (by as f32 + 0.5) / scale.y - top;
            if wx >= 0.0 && wy >= 0.0 && sprite.is_opaque(wx as u32, wy as u32) {
                set_dot(map, bx, by, scale.bw, scale.bh);
            }
        }
    }
    // Thin bolts can fall between dot centres at small sizes.
    if map.is_empty() {
        set_dot(map, (cmd.x * scale.x) as i32, (cmd.y * scale.y) as i32, scale.bw, scale.bh);
    }
}

fn sprite_style(sprite: SpriteId) -> (Color, bool) {
    match sprite {
        SpriteId::FighterMain => (Color::Rgb(80, 255, 80), true),
        SpriteId::FighterSuper => (Color::Rgb(255, 160, 60), true),
        SpriteId::FighterHit => (Color::Rgb(255, 60, 60), true),
        SpriteId::FighterWreck | SpriteId::AlienWreck => (Color::Rgb(150, 150, 150), false),
        SpriteId::FighterExplosion | SpriteId::AlienExplosion => (Color::Rgb(255, 200, 60), true),
        SpriteId::Alien => (Color::Rgb(200, 180, 255), false),
        SpriteId::Laser => (Color::Rgb(255, 255, 200), true),
        SpriteId::AlienLaser => (Color::Rgb(255, 100, 100), true),
    }
}

/// Fixed pseudo-random star field, in world pixels.
fn star(i: u32, geometry: Geometry) -> (f32, f32) {
    let mut h = i.wrapping_mul(2_654_435_761) ^ 0x9e37_79b9;
    h ^= h >> 15;
    let x = (h % 10_000) as f32 / 10_000.0 * geometry.width;
    h = h.wrapping_mul(2_246_822_519);
    h ^= h >> 13;
    let y = (h % 10_000) as f32 / 10_000.0 * geometry.height;
    (x, y)
}

fn field_lines(scene: &Scene, geometry: Geometry, w: usize, h: usize) -> Vec<Line<'static>> {
    let scale = Scale {
        x: (w * 2) as f32 / geometry.width,
        y: (h * 4) as f32 / geometry.height,
        bw: (w * 2) as i32,
        bh: (h * 4) as i32,
    };

    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(BG)); w]; h];

    // ── Backdrop ───────────────────────────────────────────────────
    let mut stars = DotMap::new();
    for i in 0..STAR_COUNT {
        let (x, y) = star(i, geometry);
        let y = (y + scene.backdrop_offset) % geometry.height;
        set_dot(&mut stars, (x * scale.x) as i32, (y * scale.y) as i32, scale.bw, scale.bh);
    }
    write_layer(&mut grid, &stars, w, h, Color::Rgb(70, 70, 100), false);

    // ── Entities, in paint order ───────────────────────────────────
    for cmd in &scene.commands {
        let mut map = DotMap::new();
        stamp(&mut map, cmd, &scale);
        let (color, bold) = sprite_style(cmd.sprite);
        write_layer(&mut grid, &map, w, h, color, bold);
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}
