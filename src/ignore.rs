use crate::errors::HeapError;
use glob::Pattern;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};

/// Dependency folders excluded wherever they appear in a path.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Appended after the patterns file so the heap never copies into itself.
pub const HEAP_DIR_PATTERN: &str = "code_heap";

/// Reads a gitignore-style file into trimmed patterns, skipping blank lines
/// and `#` comments. A missing file yields no patterns.
pub fn load_ignore_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<String>, HeapError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No ignore file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(HeapError::io(path, e)),
    };

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect();

    debug!("Loaded {} patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

pub struct IgnoreRules {
    patterns: Vec<Pattern>,
    source_root: PathBuf,
    destination: PathBuf,
}

impl IgnoreRules {
    /// `source_root` and `destination` are expected to be absolute.
    pub fn new(patterns: &[String], source_root: PathBuf, destination: PathBuf) -> Self {
        let compiled_patterns = patterns
            .iter()
            .map(|p| match Pattern::new(&to_shell_glob(p)) {
                Ok(pattern) => pattern,
                Err(e) => {
                    warn!("Invalid ignore pattern '{}' ({}), matching it literally", p, e);
                    Pattern::new(&Pattern::escape(p))
                        .expect("escaped pattern is always valid")
                }
            })
            .collect();

        debug!("Using ignore patterns: {:?}", patterns);

        IgnoreRules {
            patterns: compiled_patterns,
            source_root,
            destination,
        }
    }

    pub fn should_ignore<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();

        if path
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == DEPENDENCY_DIR))
        {
            trace!("{} is inside {}", path.display(), DEPENDENCY_DIR);
            return true;
        }

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.source_root.join(path)
        };
        if absolute.starts_with(&self.destination) {
            trace!("{} is inside the destination", path.display());
            return true;
        }

        let path_str = path.to_string_lossy();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        self.patterns.iter().any(|pattern| {
            let matched = pattern.matches(&path_str) || pattern.matches(&file_name);
            if matched {
                trace!("{} matched pattern '{}'", path.display(), pattern);
            }
            matched
        })
    }
}

/// Rewrites a gitignore line into plain shell-glob syntax for `glob::Pattern`:
/// runs of `*` collapse to one `*` (no recursive `**`), and a `[` without a
/// closing `]` becomes a literal `[`.
pub fn to_shell_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                glob.push('*');
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    i += 1;
                }
            }
            '[' => {
                // A leading `!` negates and a leading `]` is a member, not the end.
                let mut j = i + 1;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    glob.push_str("[[]");
                } else {
                    glob.extend(&chars[i..=j]);
                    i = j;
                }
            }
            c => glob.push(c),
        }
        i += 1;
    }
    glob
}
