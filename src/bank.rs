use crate::error::{BankError, SessionError};
use crate::logger;
use crate::models::{BankEntry, RawQuestion};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Produced by the scraper but not supported by the runner.
const FILL_IN_THE_BLANK: &str = "fill_in_the_blank";

fn read(path: &Path) -> Result<String, BankError> {
    fs::read_to_string(path).map_err(|source| BankError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_manifest(path: &Path) -> Result<Vec<BankEntry>, BankError> {
    let content = read(path)?;
    let entries: Vec<BankEntry> = serde_json::from_str(&content).map_err(|source| {
        BankError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if entries.is_empty() {
        return Err(BankError::EmptyManifest {
            path: path.to_path_buf(),
        });
    }
    Ok(entries)
}

/// Lists the banks offered in `data_dir`.
///
/// `manifest.json` decides when it exists; otherwise every other `.json`
/// file in the directory is offered under its file stem. A missing
/// directory yields an empty list.
pub fn discover_banks(data_dir: &Path) -> Result<Vec<BankEntry>, BankError> {
    let manifest = data_dir.join(MANIFEST_FILE);
    if manifest.is_file() {
        return load_manifest(&manifest);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    if data_dir.is_dir()
        && let Ok(entries) = fs::read_dir(data_dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(ext) = path.extension()
                && ext == "json"
            {
                files.push(path);
            }
        }
    }
    files.sort();

    Ok(files
        .iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_string_lossy().to_string();
            let test_name = path.file_stem()?.to_string_lossy().to_string();
            Some(BankEntry {
                file_name,
                test_name,
            })
        })
        .collect())
}

fn is_supported(record: &RawQuestion) -> bool {
    record.question_type.as_deref().map(str::trim) != Some(FILL_IN_THE_BLANK)
}

/// Reads a bank file, dropping question types the runner cannot present.
pub fn load_bank_file(path: &Path) -> Result<Vec<RawQuestion>, BankError> {
    let content = read(path)?;
    let records: Vec<RawQuestion> =
        serde_json::from_str(&content).map_err(|source| BankError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let total = records.len();
    let records: Vec<RawQuestion> = records.into_iter().filter(is_supported).collect();
    if records.len() < total {
        logger::log(&format!(
            "Skipped {} unsupported questions in {}",
            total - records.len(),
            path.display()
        ));
    }

    if records.is_empty() {
        return Err(SessionError::EmptyBank.into());
    }
    Ok(records)
}

pub fn bank_path(data_dir: &Path, entry: &BankEntry) -> PathBuf {
    data_dir.join(&entry.file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"[
        {"question": "Capital of France?", "choices": ["A. Paris", "B. Lyon"],
         "answer": "A", "explanation": "Paris.", "questionType": "single"},
        {"question": "Primes?", "choices": ["A. 2", "B. 4", "C. 5"],
         "answer": "AC", "questionType": "multiple"},
        {"question": "Config name?", "choices": [],
         "answer": "DateStyle", "questionType": "fill_in_the_blank"}
    ]"#;

    #[test]
    fn test_load_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(
            &path,
            r#"[{"fileName": "b.json", "test_name": "Bank B"},
                {"fileName": "a.json", "test_name": "Bank A"}]"#,
        )
        .unwrap();

        let entries = load_manifest(&path).unwrap();
        assert_eq!(entries.len(), 2);
        // manifest order is kept
        assert_eq!(entries[0].test_name, "Bank B");
        assert_eq!(entries[1].file_name, "a.json");
    }

    #[test]
    fn test_empty_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            load_manifest(&path),
            Err(BankError::EmptyManifest { .. })
        ));
    }

    #[test]
    fn test_invalid_manifest_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_manifest(&path), Err(BankError::Json { .. })));
    }

    #[test]
    fn test_discover_prefers_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other.json"), BANK).unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"[{"fileName": "listed.json", "test_name": "Listed"}]"#,
        )
        .unwrap();

        let entries = discover_banks(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].test_name, "Listed");
    }

    #[test]
    fn test_discover_without_manifest_scans_json_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z_bank.json"), BANK).unwrap();
        fs::write(dir.path().join("a_bank.json"), BANK).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let entries = discover_banks(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                BankEntry {
                    file_name: "a_bank.json".to_string(),
                    test_name: "a_bank".to_string(),
                },
                BankEntry {
                    file_name: "z_bank.json".to_string(),
                    test_name: "z_bank".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entries = discover_banks(&dir.path().join("nope")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_bank_filters_fill_in_the_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, BANK).unwrap();

        let records = load_bank_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.question_type.as_deref() != Some("fill_in_the_blank")));
        assert_eq!(records[0].explanation, "Paris.");
        assert_eq!(records[1].explanation, "");
    }

    #[test]
    fn test_load_empty_bank_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            load_bank_file(&path),
            Err(BankError::Session(SessionError::EmptyBank))
        ));
    }

    #[test]
    fn test_load_missing_bank_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bank_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BankError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_bank_path() {
        let entry = BankEntry {
            file_name: "bank_1.json".to_string(),
            test_name: "Bank 1".to_string(),
        };
        assert_eq!(
            bank_path(Path::new("data"), &entry),
            PathBuf::from("data/bank_1.json")
        );
    }
}
