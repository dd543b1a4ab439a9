#[cfg(test)]
mod ui_render_tests {
    use crate::app::{App, AppState};
    use crate::config::Config;
    use crate::models::{Answer, BankEntry, RawQuestion};
    use crate::session::QuizSession;
    use crate::ui;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui::draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn quiz_app() -> App {
        let bank = vec![
            RawQuestion {
                question: "What is the capital of France?".to_string(),
                choices: vec!["A. Paris".to_string(), "B. Lyon".to_string()],
                answer: "A".to_string(),
                explanation: "Paris has been the capital since 987.".to_string(),
                question_type: Some("single".to_string()),
            },
            RawQuestion {
                question: "The sky is blue.".to_string(),
                choices: vec!["True".to_string(), "False".to_string()],
                answer: "True".to_string(),
                explanation: String::new(),
                question_type: Some("true_false".to_string()),
            },
        ];
        let mut app = App::with_banks(Config::default(), Vec::new());
        let session = QuizSession::load("Geography", bank, &mut StdRng::seed_from_u64(5)).unwrap();
        app.begin_session(session);
        app
    }

    #[test]
    fn test_menu_lists_banks() {
        let banks = vec![BankEntry {
            file_name: "bank_1.json".to_string(),
            test_name: "Question Bank 1".to_string(),
        }];
        let app = App::with_banks(Config::default(), banks);
        let screen = render(&app);

        assert!(screen.contains("Quiz Runner"));
        assert!(screen.contains("Question Bank 1"));
        assert!(screen.contains("bank_1.json"));
    }

    #[test]
    fn test_menu_without_banks() {
        let app = App::with_banks(Config::default(), Vec::new());
        let screen = render(&app);
        assert!(screen.contains("No question banks found"));
    }

    #[test]
    fn test_quiz_screen_before_grading() {
        let app = quiz_app();
        let screen = render(&app);

        assert!(screen.contains("Question 1 / 2 - Geography"));
        assert!(screen.contains("Answered: 0 / 2"));
        assert!(screen.contains("What is the capital of France?"));
        assert!(screen.contains("Paris"));
        assert!(screen.contains("Lyon"));
        assert!(screen.contains("Single Choice"));
        assert!(screen.contains("True / False"));
        assert!(!screen.contains("Explanation:"));
    }

    #[test]
    fn test_quiz_screen_after_grading() {
        let mut app = quiz_app();
        {
            let session = app.session.as_mut().unwrap();
            session
                .record_answer(0, Some(Answer::Single("B".to_string())))
                .unwrap();
            session.grade().unwrap();
        }
        app.state = AppState::Quiz;
        let screen = render(&app);

        assert!(screen.contains("Score: 0 / 20"));
        assert!(screen.contains("Incorrect"));
        assert!(screen.contains("You selected: B | Correct Answer: A"));
        assert!(screen.contains("Paris has been the capital since 987."));
    }

    #[test]
    fn test_summary_screen() {
        let mut app = quiz_app();
        {
            let session = app.session.as_mut().unwrap();
            session
                .record_answer(0, Some(Answer::Single("A".to_string())))
                .unwrap();
            session.grade().unwrap();
        }
        app.state = AppState::Summary;
        let screen = render(&app);

        assert!(screen.contains("Results - Geography"));
        assert!(screen.contains("Score: 10 / 20"));
        assert!(screen.contains("Correct: 1   Incorrect: 0   Unanswered: 1"));
    }

    #[test]
    fn test_confirmation_and_message_screens() {
        let mut app = quiz_app();
        app.state = AppState::ConfirmSubmit;
        assert!(render(&app).contains("Submit Test"));

        app.state = AppState::Message;
        app.message = Some("Error: question bank is empty".to_string());
        assert!(render(&app).contains("question bank is empty"));
    }
}
