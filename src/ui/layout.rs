use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 24;
const FEEDBACK_HEIGHT: u16 = 8;

pub struct QuizLayout {
    pub header_area: Rect,
    pub sidebar_area: Rect,
    pub question_area: Rect,
    pub choices_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

/// The feedback pane only takes space once the test is graded.
pub fn calculate_quiz_chunks(area: Rect, graded: bool) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(3),
            Constraint::Length(if graded { FEEDBACK_HEIGHT } else { 0 }),
        ])
        .split(body[1]);

    QuizLayout {
        header_area: chunks[0],
        sidebar_area: body[0],
        question_area: main[0],
        choices_area: main[1],
        feedback_area: main[2],
        help_area: chunks[2],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    SummaryLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}
