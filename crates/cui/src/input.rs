use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Dismiss,
    NextFocus,
    PrevFocus,
    MoveUp,
    MoveDown,
    Activate,
    Draw,
    HoldCurrent,
    DiscardCurrent,
    PlayHeld,
    DiscardHeld,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Dismiss,
        KeyCode::Tab => InputAction::NextFocus,
        KeyCode::BackTab => InputAction::PrevFocus,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Delete => InputAction::DiscardHeld,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('d') => InputAction::Draw,
        KeyCode::Char('h') => InputAction::HoldCurrent,
        KeyCode::Char('x') => InputAction::DiscardCurrent,
        KeyCode::Char('p') => InputAction::PlayHeld,
        KeyCode::Char('D') => InputAction::DiscardHeld,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn maps_basic_actions() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            InputAction::Draw
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            InputAction::HoldCurrent
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
    }

    #[test]
    fn maps_held_row_actions() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE)),
            InputAction::PlayHeld
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            InputAction::DiscardHeld
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)),
            InputAction::DiscardHeld
        );
    }
}
