use std::collections::HashSet;
use std::path::Path;

/// Fallback used when no stop-word file can be read.
const BUILTIN: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// An explicitly constructed, immutable stop-word set.
///
/// Stop words are still indexed (so "rock and roll" matches properly) but are
/// weighted lower at ranking time. The set is built once and passed into the
/// ranking engine; there is no lazily loaded global.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in minimal set.
    pub fn builtin() -> Self {
        Self::from_lines(&BUILTIN.join("\n"))
    }

    /// Parses a line-oriented word list: one lowercase word per line, blank
    /// lines and `#`-prefixed comment lines ignored.
    pub fn from_lines(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.to_lowercase())
            .collect();
        Self { words }
    }

    /// Loads a stop-word file, falling back to the built-in set with a
    /// warning when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_lines(&content),
            Err(e) => {
                tracing::warn!(
                    "Could not read stop words from {} ({e}); using built-in set",
                    path.display()
                );
                Self::builtin()
            }
        }
    }

    pub fn is_stop(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
