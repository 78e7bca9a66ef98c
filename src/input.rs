use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Shoot,
    ToggleMode,
    Pause,
    Return,
    /// Swap the game for a harmless-looking screen, and back.
    Boss,
}

/// Movement keys picked on the menu. Action keys are shared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlScheme {
    #[default]
    Arrows,
    Wasd,
}

impl ControlScheme {
    pub fn label(&self) -> &'static str {
        match self {
            ControlScheme::Arrows => "Arrow keys",
            ControlScheme::Wasd => "WASD",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ControlScheme::Arrows => ControlScheme::Wasd,
            ControlScheme::Wasd => ControlScheme::Arrows,
        }
    }

    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        let movement = match (self, key.code) {
            (ControlScheme::Arrows, KeyCode::Left) => Some(Command::MoveLeft),
            (ControlScheme::Arrows, KeyCode::Right) => Some(Command::MoveRight),
            (ControlScheme::Arrows, KeyCode::Up) => Some(Command::MoveUp),
            (ControlScheme::Arrows, KeyCode::Down) => Some(Command::MoveDown),
            (ControlScheme::Wasd, KeyCode::Char(c)) => match c.to_ascii_lowercase() {
                'a' => Some(Command::MoveLeft),
                'd' => Some(Command::MoveRight),
                'w' => Some(Command::MoveUp),
                's' => Some(Command::MoveDown),
                _ => None,
            },
            _ => None,
        };
        if movement.is_some() {
            return movement;
        }

        match key.code {
            KeyCode::Char(' ') => Some(Command::Shoot),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::ToggleMode),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Return),
            KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::Boss),
            _ => None,
        }
    }
}
