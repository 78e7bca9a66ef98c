use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use onslaught::config::{GameConfig, PLAYER_NAME_MAX_LENGTH};
use onslaught::game::{Outcome, Session};
use onslaught::input::ControlScheme;
use onslaught::scores::{LeaderboardStore, ScoreEntry, LEADERBOARD_SIZE};

pub enum Screen {
    Menu,
    Game(Box<Session>),
}

pub struct App<B: LeaderboardStore> {
    pub should_quit: bool,
    pub screen: Screen,
    pub scheme: ControlScheme,
    // Name entry state
    pub name_buffer: String,
    /// Top of the board, shown on the menu.
    pub best: Vec<ScoreEntry>,
    pub board_error: Option<String>,
    config: GameConfig,
    board: B,
}

impl<B: LeaderboardStore> App<B> {
    pub fn new(config: GameConfig, board: B) -> Self {
        let mut app = Self {
            should_quit: false,
            screen: Screen::Menu,
            scheme: ControlScheme::default(),
            name_buffer: String::new(),
            best: Vec::new(),
            board_error: None,
            config,
            board,
        };
        app.refresh_best();
        app
    }

    fn refresh_best(&mut self) {
        match self.board.top_n(LEADERBOARD_SIZE) {
            Ok(entries) => {
                self.best = entries;
                self.board_error = None;
            }
            Err(err) => {
                warn!(%err, "could not load leaderboard");
                self.board_error = Some(err.to_string());
            }
        }
    }

    pub fn on_tick(&mut self) {
        if let Screen::Game(session) = &mut self.screen {
            session.tick(&mut self.board);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let Screen::Game(session) = &mut self.screen else {
            self.handle_menu_input(key);
            return;
        };
        let Some(command) = self.scheme.command_for(key) else { return };
        if session.handle(command) == Outcome::ReturnToMenu {
            info!("back to menu");
            // Dropping the session drops every pending animation with it.
            self.screen = Screen::Menu;
            self.refresh_best();
        }
    }

    fn handle_menu_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.start_game(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.scheme = self.scheme.toggled();
            }
            KeyCode::Backspace => {
                self.name_buffer.pop();
            }
            KeyCode::Char(c) => {
                // Only printable ASCII, up to the stored name length
                if self.name_buffer.chars().count() < PLAYER_NAME_MAX_LENGTH && c.is_ascii_graphic() {
                    self.name_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        let session = Session::new(self.config, &self.name_buffer);
        info!(player = session.player_name(), scheme = self.scheme.label(), "new game");
        self.screen = Screen::Game(Box::new(session));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught::game::Phase;
    use onslaught::scores::{FileLeaderboard, MemoryLeaderboard};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn menu_app() -> App<MemoryLeaderboard> {
        let board = MemoryLeaderboard::with_entries(vec![ScoreEntry::new("Ace", 3), ScoreEntry::new("Bob", 8)]);
        App::new(GameConfig::default(), board)
    }

    #[test]
    fn menu_shows_best_scores_first() {
        let app = menu_app();
        assert_eq!(app.best[0], ScoreEntry::new("Bob", 8));
    }

    #[test]
    fn typing_then_enter_starts_a_named_game() {
        let mut app = menu_app();
        for c in "zed".chars() {
            app.on_key(press(KeyCode::Char(c)));
        }
        app.on_key(press(KeyCode::Enter));
        let Screen::Game(session) = &app.screen else { panic!("still on the menu") };
        assert_eq!(session.player_name(), "Zed");
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn name_entry_is_capped() {
        let mut app = menu_app();
        for _ in 0..20 {
            app.on_key(press(KeyCode::Char('x')));
        }
        assert_eq!(app.name_buffer.len(), PLAYER_NAME_MAX_LENGTH);
        app.on_key(press(KeyCode::Backspace));
        assert_eq!(app.name_buffer.len(), PLAYER_NAME_MAX_LENGTH - 1);
    }

    #[test]
    fn scheme_toggles_on_the_menu() {
        let mut app = menu_app();
        app.on_key(press(KeyCode::Tab));
        assert_eq!(app.scheme, ControlScheme::Wasd);
        app.on_key(press(KeyCode::Right));
        assert_eq!(app.scheme, ControlScheme::Arrows);
    }

    #[test]
    fn esc_quits_from_the_menu_and_ctrl_c_anywhere() {
        let mut app = menu_app();
        app.on_key(press(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = menu_app();
        app.on_key(press(KeyCode::Enter));
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn b_hides_the_game_and_types_on_the_menu() {
        let mut app = menu_app();
        app.on_key(press(KeyCode::Char('b')));
        assert_eq!(app.name_buffer, "b");
        app.on_key(press(KeyCode::Enter));
        app.on_tick();

        app.on_key(press(KeyCode::Char('B')));
        let Screen::Game(session) = &app.screen else { panic!("left the game") };
        assert!(session.is_hidden());
        let clock = session.clock();
        for _ in 0..30 {
            app.on_tick();
        }
        let Screen::Game(session) = &app.screen else { panic!("left the game") };
        assert_eq!(session.clock(), clock);
    }

    #[test]
    fn file_backed_app_reads_the_board_on_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.txt");
        std::fs::write(&path, "Ace 4\nBob 9\n").unwrap();
        let app: App<FileLeaderboard> = App::new(GameConfig::default(), FileLeaderboard::new(path));
        assert_eq!(app.best[0], ScoreEntry::new("Bob", 9));
        assert!(app.board_error.is_none());
    }
}
