//! Shared helpers for response resolver tests

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `custom_sentences` tree in a temp directory
pub struct SentenceDir {
    pub root: TempDir,
}

impl SentenceDir {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn base(&self) -> &Path {
        self.root.path()
    }

    /// Write `<base>/<language>/<name>`
    pub fn write(&self, language: &str, name: &str, content: &str) -> PathBuf {
        let dir = self.root.path().join(language);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }
}

pub const INTENT_DOC: &str = r#"
responses:
  intents:
    my_intent:
      greet: "Hi {{ slots.name.text }}"
"#;
