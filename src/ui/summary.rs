use super::key_hint;
use crate::grading::feedback;
use crate::models::Verdict;
use crate::session::QuizSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Unwrapped line count of the results body, used to bound scrolling.
pub fn summary_line_count(session: &QuizSession, status: Option<&str>) -> usize {
    let header = 2 + usize::from(session.is_graded()) + usize::from(status.is_some());
    header + 2 * session.len()
}

pub fn draw_summary(f: &mut Frame, session: &QuizSession, scroll: u16, status: Option<&str>) {
    let layout = calculate_summary_chunks(f.area());

    let title_text = format!("Results - {}", session.bank_name());
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let verdicts = session.verdicts().unwrap_or_default();
    let count = |wanted: Verdict| verdicts.iter().filter(|v| **v == wanted).count();

    let mut summary_text = Text::default();
    if let Some(score) = session.score() {
        summary_text.push_line(Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    summary_text.push_line(Line::from(format!(
        "Correct: {}   Incorrect: {}   Unanswered: {}",
        count(Verdict::Correct),
        count(Verdict::Incorrect),
        count(Verdict::Unanswered)
    )));
    if let Some(status) = status {
        summary_text.push_line(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }
    summary_text.push_line(Line::from(""));

    let width = layout.content_area.width.saturating_sub(12) as usize;
    for question in session.questions() {
        let fb = feedback(question, session.response(question.id));
        let (mark, color) = match fb.verdict {
            Verdict::Correct => ("[✓]", Color::Green),
            Verdict::Incorrect => ("[✗]", Color::Red),
            Verdict::Unanswered => ("[ ]", Color::DarkGray),
        };
        summary_text.push_line(Line::from(vec![
            Span::styled(mark, Style::default().fg(color)),
            Span::from(format!(
                " {}. {}",
                question.id + 1,
                truncate_string(&question.prompt, width)
            )),
        ]));
        summary_text.push_line(Line::from(format!(
            "    You selected: {}   Correct Answer: {}",
            fb.selected, fb.correct
        )));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let mut keys = Vec::new();
    keys.extend(key_hint("↑/↓", " Scroll  "));
    keys.extend(key_hint("Enter", " Review Answers  "));
    keys.extend(key_hint("r", " Retry Test  "));
    keys.extend(key_hint("m", " Main Menu"));
    let help = Paragraph::new(Line::from(keys))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
