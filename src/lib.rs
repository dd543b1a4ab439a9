pub mod app;
pub mod bank;
pub mod choice;
pub mod config;
pub mod error;
pub mod file_io;
pub mod grading;
pub mod logger;
pub mod models;
pub mod session;
pub mod shuffle;
pub mod ui;
pub mod utils;

mod ui_tests;

// Re-exports for convenience
pub use app::{App, AppState};
pub use bank::{discover_banks, load_bank_file, load_manifest};
pub use config::Config;
pub use error::{BankError, SessionError};
pub use file_io::write_results_report;
pub use models::{
    Answer, BankEntry, Choice, Feedback, Question, QuestionType, QuestionView, RawQuestion, Score,
    Verdict,
};
pub use session::{Navigation, QuizSession};
