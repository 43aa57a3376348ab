use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub filter: FilterConfig,
}

/// Resolved filtering rules for one run. Built before the walk, read-only during it.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub include_dirs: HashSet<String>,
    pub include_files: HashSet<String>,
    pub include_patterns: Vec<String>,
    pub exclude_dirs: HashSet<String>,
    pub exclude_files: HashSet<String>,
    pub exclude_patterns: Vec<String>,
    pub inclusion_mode_active: bool,
}

impl FilterConfig {
    /// Registers a file that must never end up in the output, e.g. the summary itself.
    pub fn with_excluded_file(mut self, rel_path: &str) -> Self {
        let normalized = normalize_path(rel_path);
        if !normalized.is_empty() {
            self.exclude_files.insert(normalized);
        }
        self
    }
}

/// Why a file was accepted or rejected by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileVerdict {
    Included,
    /// Inclusion mode is on and no include rule matched.
    NotIncluded,
    Excluded,
}

/// Tallies for one summary run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub dirs_pruned: usize,
    pub files_processed: usize,
    pub files_considered: usize, // passed the include rules while inclusion mode was on
    pub skipped_excluded: usize,
    pub skipped_not_included: usize,
    pub skipped_binary: usize,
    pub skipped_errors: usize,
    /// The final flush of the output failed, so buffered entries may be missing.
    pub output_incomplete: bool,
}

impl RunCounters {
    pub fn files_skipped(&self) -> usize {
        self.skipped_excluded + self.skipped_not_included + self.skipped_binary + self.skipped_errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Walking,
    Finalizing,
    Done,
    Failed,
}

/// Turns user-supplied path text into the slash-separated, relative form used
/// for exact matching: `./src\lib/` becomes `src/lib`.
pub fn normalize_path(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(part) => {
                if let Some(part) = part.to_str() {
                    parts.push(part);
                }
            }
            Component::ParentDir => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Relative path of `path` under `root` with forward slashes.
pub fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let relative = pathdiff::diff_paths(path, root)?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Some(joined)
}
