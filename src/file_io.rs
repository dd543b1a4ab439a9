use crate::grading::feedback;
use crate::session::QuizSession;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "quiz".to_string()
    } else {
        cleaned
    }
}

pub fn report_file_name(bank_name: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}.md", sanitize(bank_name), at.format("%Y%m%d_%H%M%S"))
}

/// Markdown results for a graded session.
pub fn render_report(session: &QuizSession, at: &DateTime<Local>) -> io::Result<String> {
    let Some(score) = session.score() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "session has not been graded",
        ));
    };

    let mut out = String::new();
    out.push_str(&format!("# Results: {}\n\n", session.bank_name()));
    out.push_str(&format!("Taken: {}\n\n", at.format("%Y-%m-%d %H:%M")));
    out.push_str(&format!("**Score: {}**\n\n", score));

    for question in session.questions() {
        let fb = feedback(question, session.response(question.id));
        out.push_str(&format!("## Question {}\n\n", question.id + 1));
        out.push_str(&format!("{}\n\n", question.prompt));
        out.push_str(&format!("- Result: {}\n", fb.verdict.label()));
        out.push_str(&format!("- You selected: {}\n", fb.selected));
        out.push_str(&format!("- Correct answer: {}\n\n", fb.correct));
        out.push_str(&format!("{}\n\n", fb.explanation));
    }

    Ok(out)
}

/// Opens a file that did not exist before, appending `_1`, `_2`, ... to the
/// stem while the name is taken.
fn create_unique(dir: &Path, file_name: &str) -> io::Result<(PathBuf, fs::File)> {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let mut attempt = 0usize;
    loop {
        let path = if attempt == 0 {
            dir.join(file_name)
        } else {
            dir.join(format!("{}_{}.md", stem, attempt))
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Writes the report into `dir`, creating it if needed, and returns the
/// file path.
pub fn write_results_report(dir: &Path, session: &QuizSession) -> io::Result<PathBuf> {
    let now = Local::now();
    let content = render_report(session, &now)?;

    fs::create_dir_all(dir)?;
    let (path, mut file) = create_unique(dir, &report_file_name(session.bank_name(), &now))?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    crate::logger::log(&format!("Wrote results report to {}", path.display()));
    Ok(path)
}
