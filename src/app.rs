use crate::bank::{bank_path, discover_banks, load_bank_file};
use crate::config::Config;
use crate::error::BankError;
use crate::file_io::write_results_report;
use crate::logger;
use crate::models::{Answer, BankEntry, QuestionType};
use crate::session::{Navigation, QuizSession};
use crate::ui::summary_line_count;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    ConfirmSubmit,
    ConfirmRetry,
    ConfirmQuit,
    Summary,
    Message,
}

/// Front-end state. Holds at most one quiz session and turns key presses
/// into controller calls.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub banks: Vec<BankEntry>,
    pub selected_bank: usize,
    pub active_bank: Option<usize>,
    pub session: Option<QuizSession>,
    pub highlighted_choice: usize,
    pub summary_scroll: u16,
    pub state: AppState,
    /// State restored when a confirmation dialog is cancelled.
    pub confirm_return: AppState,
    pub message: Option<String>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut app = Self::with_banks(config, Vec::new());
        app.refresh_banks();
        app
    }

    pub fn with_banks(config: Config, banks: Vec<BankEntry>) -> Self {
        Self {
            config,
            banks,
            selected_bank: 0,
            active_bank: None,
            session: None,
            highlighted_choice: 0,
            summary_scroll: 0,
            state: AppState::Menu,
            confirm_return: AppState::Quiz,
            message: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn refresh_banks(&mut self) {
        match discover_banks(&self.config.data_dir) {
            Ok(banks) => {
                logger::log(&format!(
                    "Found {} banks in {}",
                    banks.len(),
                    self.config.data_dir.display()
                ));
                self.banks = banks;
                self.selected_bank = self.selected_bank.min(self.banks.len().saturating_sub(1));
            }
            Err(e) => {
                self.banks.clear();
                self.selected_bank = 0;
                self.show_message(format!("Error: {}", e));
            }
        }
    }

    fn show_message(&mut self, message: String) {
        logger::log(&message);
        self.message = Some(message);
        self.state = AppState::Message;
    }

    /// Swaps in a freshly loaded session and shows its first question.
    pub fn begin_session(&mut self, session: QuizSession) {
        self.session = Some(session);
        self.highlighted_choice = 0;
        self.summary_scroll = 0;
        self.status = None;
        self.state = AppState::Quiz;
    }

    pub fn start_bank(&mut self, index: usize) {
        self.start_bank_with(index, &mut rand::thread_rng());
    }

    pub fn start_bank_with<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let Some(entry) = self.banks.get(index) else {
            return;
        };
        let path = bank_path(&self.config.data_dir, entry);
        let result = load_bank_file(&path).and_then(|records| {
            QuizSession::load(entry.test_name.clone(), records, rng).map_err(BankError::from)
        });

        match result {
            Ok(session) => {
                self.active_bank = Some(index);
                self.begin_session(session);
            }
            Err(e) => {
                self.session = None;
                self.show_message(format!("Error: {}", e));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::Quiz => self.handle_quiz_key(key),
            AppState::ConfirmSubmit | AppState::ConfirmRetry | AppState::ConfirmQuit => {
                self.handle_confirm_key(key)
            }
            AppState::Summary => self.handle_summary_key(key),
            AppState::Message => {
                self.message = None;
                self.state = AppState::Menu;
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_bank = self.selected_bank.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_bank < self.banks.len().saturating_sub(1) {
                    self.selected_bank += 1;
                }
            }
            KeyCode::Enter => {
                if !self.banks.is_empty() {
                    self.start_bank(self.selected_bank);
                }
            }
            KeyCode::Char('r') => self.refresh_banks(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        let Some(session) = self.session.as_ref() else {
            self.state = AppState::Menu;
            return;
        };
        let graded = session.is_graded();
        let choice_count = session.current_question().presentation.len();
        let last = session.len().saturating_sub(1);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlighted_choice = self.highlighted_choice.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.highlighted_choice < choice_count.saturating_sub(1) {
                    self.highlighted_choice += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.navigate(Navigation::Previous),
            KeyCode::Right | KeyCode::Char('l') => self.navigate(Navigation::Next),
            KeyCode::Home => self.navigate(Navigation::Jump(0)),
            KeyCode::End => self.navigate(Navigation::Jump(last)),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_choice(),
            KeyCode::Char('s') if !graded => self.confirm(AppState::ConfirmSubmit),
            KeyCode::Char('r') if graded => self.confirm(AppState::ConfirmRetry),
            KeyCode::Char('v') if graded => self.state = AppState::Summary,
            KeyCode::Esc => self.confirm(AppState::ConfirmQuit),
            _ => {}
        }
    }

    fn confirm(&mut self, dialog: AppState) {
        self.confirm_return = self.state;
        self.state = dialog;
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let confirmed = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };

        match (self.state, confirmed) {
            (AppState::ConfirmSubmit, true) => self.submit(),
            (AppState::ConfirmRetry, true) => self.retry(),
            (AppState::ConfirmQuit, true) => {
                self.session = None;
                self.active_bank = None;
                self.state = AppState::Menu;
            }
            _ => self.state = self.confirm_return,
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.summary_scroll = self.summary_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.summary_scroll < self.max_summary_scroll() {
                    self.summary_scroll += 1;
                }
            }
            KeyCode::Enter | KeyCode::Esc => self.state = AppState::Quiz,
            KeyCode::Char('r') => self.confirm(AppState::ConfirmRetry),
            KeyCode::Char('m') => {
                self.session = None;
                self.active_bank = None;
                self.state = AppState::Menu;
            }
            _ => {}
        }
    }

    /// Last scroll offset that still shows a line of the results body.
    fn max_summary_scroll(&self) -> u16 {
        let lines = self
            .session
            .as_ref()
            .map(|session| summary_line_count(session, self.status.as_deref()))
            .unwrap_or(0);
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn navigate(&mut self, navigation: Navigation) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let before = session.cursor();
        match session.navigate(navigation) {
            Ok(view) => {
                if view.index != before {
                    self.highlighted_choice = 0;
                }
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Selects the highlighted choice, or toggles it for multiple-answer
    /// questions.
    fn activate_choice(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_graded() {
            self.status = Some("Test submitted. Press r to retry.".to_string());
            return;
        }

        let index = session.cursor();
        let question = session.current_question();
        let Some(choice) = question.presentation.get(self.highlighted_choice) else {
            return;
        };
        let letter = choice.letter.clone();

        let answer = match question.question_type {
            QuestionType::Multiple => {
                let mut letters = match session.response(index) {
                    Some(Answer::Multiple(letters)) => letters.clone(),
                    _ => BTreeSet::new(),
                };
                if !letters.remove(&letter) {
                    letters.insert(letter);
                }
                Answer::Multiple(letters)
            }
            QuestionType::Single | QuestionType::TrueFalse => Answer::Single(letter),
        };

        if let Err(e) = session.record_answer(index, Some(answer)) {
            self.status = Some(e.to_string());
        }
    }

    fn submit(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.state = AppState::Menu;
            return;
        };

        match session.grade() {
            Ok(score) => {
                self.status = Some(format!("Score: {}", score));
                if let Some(dir) = &self.config.report_dir {
                    match write_results_report(dir, session) {
                        Ok(path) => {
                            self.status =
                                Some(format!("Score: {}  Saved {}", score, path.display()));
                        }
                        Err(e) => {
                            logger::log(&format!("Failed to write report: {}", e));
                            self.status =
                                Some(format!("Score: {}  (report not saved: {})", score, e));
                        }
                    }
                }
                self.summary_scroll = 0;
                self.state = AppState::Summary;
            }
            Err(e) => {
                self.status = Some(e.to_string());
                self.state = AppState::Quiz;
            }
        }
    }

    /// Reloads the active bank from disk with a fresh shuffle.
    fn retry(&mut self) {
        match self.active_bank {
            Some(index) => self.start_bank(index),
            None => {
                self.session = None;
                self.state = AppState::Menu;
            }
        }
    }
}
