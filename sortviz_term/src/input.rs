use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sortviz_core::{AlgorithmKind, Command};

pub const HELP: &str =
    "space start/stop   r reset   s shuffle   a/tab algorithm   1-5 pick   +/- speed   q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Quit,
}

/// Maps a key press onto an action. Key releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Command::Toggle,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('s') => Command::Shuffle,
        KeyCode::Char('a') | KeyCode::Tab => Command::CycleAlgorithm,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Command::Faster,
        KeyCode::Char('-') | KeyCode::Left => Command::Slower,
        KeyCode::Char(digit @ '1'..='5') => {
            let index = digit as usize - '1' as usize;
            Command::Select(AlgorithmKind::ALL[index])
        }
        _ => return None,
    };

    Some(Action::Command(command))
}
