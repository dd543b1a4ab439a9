use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "QUIZ_RUNNER_DATA_DIR";
pub const REPORT_DIR_VAR: &str = "QUIZ_RUNNER_REPORT_DIR";
pub const LOG_FILE_VAR: &str = "QUIZ_RUNNER_LOG";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `manifest.json` and the bank files.
    pub data_dir: PathBuf,
    /// Where graded results are written; `None` disables reports.
    pub report_dir: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            report_dir: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn get_home_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home)
    }
}

pub fn default_report_dir() -> PathBuf {
    get_home_dir()
        .join(".local")
        .join("share")
        .join("quiz-runner")
        .join("reports")
}

impl Config {
    /// Builds the configuration from command-line arguments (program name
    /// already skipped) and a variable lookup.
    ///
    /// The first argument, when present, names the data directory and wins
    /// over `QUIZ_RUNNER_DATA_DIR`. An empty `QUIZ_RUNNER_REPORT_DIR`
    /// disables reports.
    pub fn resolve<I, F>(args: I, var: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = args
            .into_iter()
            .next()
            .or_else(|| var(DATA_DIR_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let report_dir = match var(REPORT_DIR_VAR) {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => Some(default_report_dir()),
        };

        let log_file = var(LOG_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Self {
            data_dir,
            report_dir,
            log_file,
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(std::env::args().skip(1), |name| std::env::var(name).ok())
    }
}
