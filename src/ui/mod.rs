pub mod layout;
mod menu;
mod quiz;
mod summary;

use crate::app::{App, AppState};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::{draw_menu, draw_message};
pub use quiz::{draw_confirmation, draw_quiz};
pub use summary::{draw_summary, summary_line_count};

fn key_hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(action),
    ]
}

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Menu => draw_menu(f, &app.banks, app.selected_bank, &app.config.data_dir),
        AppState::Message => draw_message(f, app.message.as_deref().unwrap_or("")),
        AppState::Quiz => {
            if let Some(session) = &app.session {
                draw_quiz(f, session, app.highlighted_choice, app.status.as_deref());
            }
        }
        AppState::Summary => {
            if let Some(session) = &app.session {
                draw_summary(f, session, app.summary_scroll, app.status.as_deref());
            }
        }
        AppState::ConfirmSubmit => draw_confirmation(
            f,
            "Submit Test",
            "Are you sure you want to submit? You cannot change your answers after this.",
        ),
        AppState::ConfirmRetry => draw_confirmation(
            f,
            "Retry Test",
            "Are you sure you want to retry the test? All your progress will be lost.",
        ),
        AppState::ConfirmQuit => draw_confirmation(
            f,
            "Quit to Menu",
            "Return to the main menu? All your progress will be lost.",
        ),
    }
}
