use super::key_hint;
use crate::models::{ChoiceMark, QuestionType, Verdict};
use crate::session::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Correct => Style::default().fg(Color::Green),
        Verdict::Incorrect => Style::default().fg(Color::Red),
        Verdict::Unanswered => Style::default().fg(Color::DarkGray),
    }
}

fn verdict_icon(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "✓",
        Verdict::Incorrect => "✗",
        Verdict::Unanswered => "-",
    }
}

/// Question list grouped under one header per question type.
fn draw_sidebar(f: &mut Frame, area: Rect, session: &QuizSession) {
    let mut items = Vec::new();
    let mut selected_row = 0;
    let mut current_type: Option<QuestionType> = None;

    for question in session.questions() {
        if current_type != Some(question.question_type) {
            current_type = Some(question.question_type);
            items.push(ListItem::new(question.question_type.label()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let (icon, style) = match session.verdict(question.id) {
            Some(verdict) => (verdict_icon(verdict), verdict_style(verdict)),
            None if session.is_answered(question.id) => {
                ("*", Style::default().fg(Color::Magenta))
            }
            None => (" ", Style::default()),
        };

        let style = if question.id == session.cursor() {
            selected_row = items.len();
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        };
        items.push(ListItem::new(format!("{} Question {}", icon, question.id + 1)).style(style));
    }

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Questions"));
    let mut state = ListState::default().with_selected(Some(selected_row));
    f.render_stateful_widget(list, area, &mut state);
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, highlighted: usize, status: Option<&str>) {
    let view = session.current_view();
    let layout = calculate_quiz_chunks(f.area(), view.graded);

    let mut progress = format!(
        "Question {} / {} - {}",
        view.index + 1,
        view.total,
        session.bank_name()
    );
    match session.score() {
        Some(score) => progress.push_str(&format!("  |  Score: {}", score)),
        None => progress.push_str(&format!(
            "  |  Answered: {} / {}",
            session.answered_count(),
            view.total
        )),
    }
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    draw_sidebar(f, layout.sidebar_area, session);

    let question = Paragraph::new(Text::from(view.prompt))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Question {} ({})", view.index + 1, view.question_type.label())),
        );
    f.render_widget(question, layout.question_area);

    let multiple = view.question_type == QuestionType::Multiple;
    let mut choice_text = Text::default();
    for (i, choice) in view.choices.iter().enumerate() {
        let pointer = if i == highlighted && !view.graded { "> " } else { "  " };
        let mark = match (multiple, choice.selected) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(*)",
            (false, false) => "( )",
        };

        let mut style = match choice.mark {
            Some(ChoiceMark::Correct) => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Some(ChoiceMark::Incorrect) => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            None => Style::default(),
        };
        if i == highlighted && !view.graded {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }

        choice_text.push_line(Line::from(Span::styled(
            format!("{}{} {}", pointer, mark, choice.text),
            style,
        )));
    }
    let choices_title = if multiple {
        "Choices (select all that apply)"
    } else {
        "Choices"
    };
    let choices = Paragraph::new(choice_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(choices_title));
    f.render_widget(choices, layout.choices_area);

    if let Some(feedback) = &view.feedback {
        let detail = match feedback.verdict {
            Verdict::Correct => format!("You selected: {}", feedback.selected),
            Verdict::Unanswered => format!("Correct Answer: {}", feedback.correct),
            Verdict::Incorrect => format!(
                "You selected: {} | Correct Answer: {}",
                feedback.selected, feedback.correct
            ),
        };

        let mut text = Text::default();
        text.push_line(Line::from(Span::styled(
            feedback.verdict.label(),
            verdict_style(feedback.verdict).add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(detail));
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            "Explanation:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        text.extend(Text::from(feedback.explanation.as_str()));

        let panel = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(verdict_style(feedback.verdict))
                    .title("Answer"),
            );
        f.render_widget(panel, layout.feedback_area);
    }

    let mut keys = Vec::new();
    keys.extend(key_hint("↑/↓", " Choice  "));
    keys.extend(key_hint("←/→", " Question  "));
    if view.graded {
        keys.extend(key_hint("v", " Results  "));
        keys.extend(key_hint("r", " Retry Test  "));
    } else {
        keys.extend(key_hint("Space", " Select  "));
        keys.extend(key_hint("s", " Submit Test  "));
    }
    keys.extend(key_hint("Esc", " Menu"));

    let mut help_text = vec![Line::from(keys)];
    if let Some(status) = status {
        let width = layout.help_area.width.saturating_sub(2) as usize;
        help_text.push(Line::from(Span::styled(
            truncate_string(status, width),
            Style::default().fg(Color::Yellow),
        )));
    }
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_confirmation(f: &mut Frame, title: &str, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
