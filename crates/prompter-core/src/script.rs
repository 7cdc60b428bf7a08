//! Script model and on-disk library.
//!
//! Scripts imported through the CLI are stored as TOML files under the
//! config directory (`scripts/<id>.toml`); the active script itself lives in
//! the settings file, so the library is only a shelf to pull from.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Script {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// The script shown on first launch.
    pub fn welcome() -> Self {
        Self::new(
            "Welcome Script",
            "Welcome to Prompter. Paste your script here and start reading! \
             Adjust speed with + and - and play/pause with Space.",
        )
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Directory of stored scripts.
pub struct ScriptLibrary {
    dir: PathBuf,
}

impl ScriptLibrary {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Write a script to the library, returning its path.
    pub fn save(&self, script: &Script) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.toml", script.id));
        let content =
            toml::to_string_pretty(script).map_err(|e| Error::ScriptParse(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// All stored scripts, newest first. Unreadable entries are skipped
    /// with a warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<Script>> {
        let mut scripts = Vec::new();
        if !self.dir.exists() {
            return Ok(scripts);
        }
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            match std::fs::read_to_string(&path)
                .map_err(Error::Io)
                .and_then(|text| {
                    toml::from_str::<Script>(&text).map_err(|e| Error::ScriptParse(e.to_string()))
                }) {
                Ok(script) => scripts.push(script),
                Err(e) => warn!("Skipping unreadable script {}: {}", path.display(), e),
            }
        }
        scripts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(scripts)
    }

    /// Look up a stored script by id prefix.
    pub fn find(&self, id_prefix: &str) -> Result<Script> {
        let prefix = id_prefix.to_lowercase();
        let mut matches: Vec<Script> = self
            .list()?
            .into_iter()
            .filter(|s| s.id.to_string().starts_with(&prefix))
            .collect();
        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(Error::ScriptNotFound(id_prefix.to_string())),
            n => Err(Error::ScriptNotFound(format!(
                "{id_prefix} (ambiguous, matches {n} scripts)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_script() {
        let script = Script::welcome();
        assert_eq!(script.title, "Welcome Script");
        assert!(script.word_count() > 10);
    }

    #[test]
    fn test_library_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let library = ScriptLibrary::new(dir.path().to_path_buf());

        let script = Script::new("Keynote", "First line\nSecond line");
        library.save(&script).unwrap();

        let listed = library.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, script.id);
        assert_eq!(listed[0].content, "First line\nSecond line");
    }

    #[test]
    fn test_list_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let library = ScriptLibrary::new(dir.path().to_path_buf());

        let mut old = Script::new("old", "a");
        old.created_at = Utc::now() - chrono::Duration::days(2);
        let new = Script::new("new", "b");
        library.save(&old).unwrap();
        library.save(&new).unwrap();

        let listed = library.list().unwrap();
        assert_eq!(listed[0].title, "new");
        assert_eq!(listed[1].title, "old");
    }

    #[test]
    fn test_find_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let library = ScriptLibrary::new(dir.path().to_path_buf());

        let script = Script::new("Keynote", "text");
        library.save(&script).unwrap();

        let prefix = &script.id.to_string()[..8];
        assert_eq!(library.find(prefix).unwrap().id, script.id);
        assert!(matches!(
            library.find("ffffffff"),
            Err(Error::ScriptNotFound(_))
        ));
    }

    #[test]
    fn test_list_skips_unreadable_entries() {
        let dir = tempfile::tempdir().unwrap();
        let library = ScriptLibrary::new(dir.path().to_path_buf());

        let script = Script::new("ok", "text");
        library.save(&script).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not a script").unwrap();

        let listed = library.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "ok");
    }
}
