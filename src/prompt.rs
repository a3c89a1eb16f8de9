//! Prompt capture: keeps the most recent prompt plus an append-only history.
//!
//! Layout under the prompts directory:
//!
//! - `latest.txt`: the last prompt, verbatim, no trailing newline
//! - `history.txt`: one `[<UTC ISO-8601 millis>] <prompt>` line per save

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::foundation::error::{ReelError, ReelResult};

pub const DEFAULT_PROMPTS_DIR: &str = "prompts";
pub const LATEST_FILE: &str = "latest.txt";
pub const HISTORY_FILE: &str = "history.txt";

/// Join command-line words into a prompt; `None` when nothing but whitespace.
pub fn normalize_prompt<I, S>(words: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = words
        .into_iter()
        .map(|w| w.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

pub fn history_line(at: DateTime<Utc>, prompt: &str) -> String {
    format!(
        "[{}] {}\n",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        prompt
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub prompt: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedPrompt {
    pub latest_path: PathBuf,
    pub history_path: PathBuf,
    pub entry: HistoryEntry,
    /// `true` when appending failed and the history was rewritten from scratch.
    pub history_reset: bool,
}

#[derive(Clone, Debug)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn latest_path(&self) -> PathBuf {
        self.dir.join(LATEST_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    pub fn save(&self, prompt: &str) -> ReelResult<SavedPrompt> {
        self.save_at(prompt, Utc::now())
    }

    #[tracing::instrument(skip(self, prompt), fields(dir = %self.dir.display()))]
    pub fn save_at(&self, prompt: &str, at: DateTime<Utc>) -> ReelResult<SavedPrompt> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ReelError::io(format!("create prompts dir '{}'", self.dir.display()), e)
        })?;

        let latest_path = self.latest_path();
        fs::write(&latest_path, prompt)
            .map_err(|e| ReelError::io(format!("write '{}'", latest_path.display()), e))?;

        let history_path = self.history_path();
        let line = history_line(at, prompt);
        let history_reset = record_history(&history_path, &line, append)?;

        tracing::debug!(bytes = prompt.len(), "saved prompt");
        Ok(SavedPrompt {
            latest_path,
            history_path,
            entry: HistoryEntry {
                at,
                prompt: prompt.to_owned(),
            },
            history_reset,
        })
    }

    pub fn latest(&self) -> ReelResult<Option<String>> {
        let path = self.latest_path();
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReelError::io(format!("read '{}'", path.display()), e)),
        }
    }

    /// Parsed history, oldest first.
    ///
    /// Lines that do not start a new entry continue the previous one, so
    /// prompts containing newlines survive.
    pub fn history(&self) -> ReelResult<Vec<HistoryEntry>> {
        let path = self.history_path();
        let text = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReelError::io(format!("read '{}'", path.display()), e)),
        };

        let mut out: Vec<HistoryEntry> = Vec::new();
        for line in text.lines() {
            match parse_history_line(line) {
                Some(entry) => out.push(entry),
                None => match out.last_mut() {
                    Some(prev) => {
                        prev.prompt.push('\n');
                        prev.prompt.push_str(line);
                    }
                    None => tracing::debug!(line, "skipping unparseable history line"),
                },
            }
        }
        Ok(out)
    }
}

/// Append `line`, or replace the whole file with it if appending fails.
///
/// Returns `true` when the history was replaced.
fn record_history(
    path: &Path,
    line: &str,
    append: impl FnOnce(&Path, &str) -> std::io::Result<()>,
) -> ReelResult<bool> {
    match append(path, line) {
        Ok(()) => Ok(false),
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %path.display(),
                "history append failed; rewriting history file"
            );
            fs::write(path, line)
                .map_err(|e| ReelError::io(format!("rewrite '{}'", path.display()), e))?;
            Ok(true)
        }
    }
}

fn append(path: &Path, line: &str) -> std::io::Result<()> {
    let mut f = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    f.write_all(line.as_bytes())
}

fn parse_history_line(line: &str) -> Option<HistoryEntry> {
    let rest = line.strip_prefix('[')?;
    let (stamp, prompt) = rest.split_once("] ")?;
    let at = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
    Some(HistoryEntry {
        at,
        prompt: prompt.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn normalize_joins_and_trims() {
        assert_eq!(
            normalize_prompt(["  Product", "demo", "with fade  "]),
            Some("Product demo with fade".to_string())
        );
        assert_eq!(normalize_prompt(["   ", ""]), None);
        assert_eq!(normalize_prompt(Vec::<String>::new()), None);
    }

    #[test]
    fn history_line_uses_millisecond_utc_stamp() {
        assert_eq!(
            history_line(at(), "Cinematic intro"),
            "[2026-03-14T15:09:26.000Z] Cinematic intro\n"
        );
    }

    #[test]
    fn save_writes_latest_and_appends_history() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PromptStore::new(tmp.path().join("nested").join("prompts"));

        let first = store.save_at("first prompt", at()).unwrap();
        assert!(!first.history_reset);
        store
            .save_at("second prompt", at() + chrono::Duration::seconds(1))
            .unwrap();

        assert_eq!(store.latest().unwrap().as_deref(), Some("second prompt"));
        let raw = fs::read_to_string(store.history_path()).unwrap();
        assert_eq!(
            raw,
            "[2026-03-14T15:09:26.000Z] first prompt\n[2026-03-14T15:09:27.000Z] second prompt\n"
        );

        let history = store.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].prompt, "second prompt");
        assert_eq!(history[0].at, at());
    }

    #[test]
    fn falls_back_to_rewrite_when_append_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(HISTORY_FILE);
        fs::write(&path, "[2020-01-01T00:00:00.000Z] old\n").unwrap();

        let reset = record_history(&path, "[2026-03-14T15:09:26.000Z] new\n", |_, _| {
            Err(std::io::Error::other("append refused"))
        })
        .unwrap();
        assert!(reset);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[2026-03-14T15:09:26.000Z] new\n"
        );
    }

    #[test]
    fn fails_when_history_cannot_be_written_at_all() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PromptStore::new(tmp.path());
        fs::create_dir(store.history_path()).unwrap();
        assert!(store.save_at("x", at()).is_err());
    }

    #[test]
    fn multi_line_prompts_round_trip_through_history() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PromptStore::new(tmp.path());
        store.save_at("line one\nline two", at()).unwrap();
        let history = store.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].prompt, "line one\nline two");
    }

    #[test]
    fn missing_files_read_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PromptStore::new(tmp.path().join("absent"));
        assert_eq!(store.latest().unwrap(), None);
        assert!(store.history().unwrap().is_empty());
    }
}
