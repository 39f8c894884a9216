use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Dismiss => app.show_help = false,
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::Activate => app.activate_primary(),
        InputAction::Draw => app.draw_card(),
        InputAction::HoldCurrent => app.hold_card(),
        InputAction::DiscardCurrent => app.discard_card(),
        InputAction::PlayHeld => app.play_held(),
        InputAction::DiscardHeld => app.discard_held(),
    }
}
