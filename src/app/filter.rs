use crate::app::models::{FileVerdict, FilterConfig};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Include/exclude decisions for directories and files, compiled once per run.
///
/// Patterns follow shell wildcard rules where `*` also crosses `/`, so `*.log`
/// matches `logs/app.log` through the full path as well as through the bare name.
/// Only `*`, `?` and `[seq]` are special; braces and backslashes are literal, and a
/// pattern that doesn't parse matches itself.
pub struct FilterEngine {
    include_dirs: Vec<String>,
    include_files: HashSet<String>,
    include_set: GlobSet,
    exclude_dirs: HashSet<String>,
    exclude_files: HashSet<String>,
    /// Exclude patterns plus direct exclusions (`dir/` and file entries).
    exclude_set: GlobSet,
    /// Same as `exclude_set`, trailing slash stripped, for bare directory names.
    exclude_name_set: GlobSet,
    inclusion_mode_active: bool,
}

impl FilterEngine {
    pub fn new(config: &FilterConfig) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut name_builder = GlobSetBuilder::new();

        // Direct entries are treated as patterns too.
        let mut direct: Vec<String> = config.exclude_files.iter().cloned().collect();
        direct.extend(config.exclude_dirs.iter().map(|d| format!("{}/", d)));
        direct.sort();

        for pattern in config.exclude_patterns.iter().chain(direct.iter()) {
            if let Some(glob) = compile(pattern) {
                builder.add(glob);
            }
            let stripped = pattern.trim_end_matches('/');
            if let Some(glob) = compile(stripped).filter(|_| !stripped.is_empty()) {
                name_builder.add(glob);
            }
        }

        let mut include_dirs: Vec<String> = config.include_dirs.iter().cloned().collect();
        include_dirs.sort();

        Self {
            include_dirs,
            include_files: config.include_files.clone(),
            include_set: build_globset(&config.include_patterns),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_files: config.exclude_files.clone(),
            exclude_set: finish(builder),
            exclude_name_set: finish(name_builder),
            inclusion_mode_active: config.inclusion_mode_active,
        }
    }

    /// Whether the walk should enter `rel_dir_path`. Include rules never prune.
    pub fn should_descend(&self, rel_dir_path: &str, dir_name: &str) -> bool {
        if self.exclude_dirs.contains(rel_dir_path) {
            return false;
        }

        let with_slash = format!("{}/", rel_dir_path);
        !(self.exclude_set.is_match(&with_slash)
            || self.exclude_set.is_match(rel_dir_path)
            || self.exclude_name_set.is_match(dir_name))
    }

    pub fn should_include(&self, rel_file_path: &str, file_name: &str) -> bool {
        self.classify(rel_file_path, file_name) == FileVerdict::Included
    }

    /// Runs the inclusion phase (inclusion mode only) and then the exclusion
    /// phase. Exclusion always wins.
    pub fn classify(&self, rel_file_path: &str, file_name: &str) -> FileVerdict {
        if self.inclusion_mode_active && !self.is_included(rel_file_path, file_name) {
            return FileVerdict::NotIncluded;
        }

        if self.is_excluded(rel_file_path, file_name) {
            return FileVerdict::Excluded;
        }

        FileVerdict::Included
    }

    pub fn inclusion_mode_active(&self) -> bool {
        self.inclusion_mode_active
    }

    fn is_included(&self, rel_file_path: &str, file_name: &str) -> bool {
        if self.include_files.contains(rel_file_path) || self.include_files.contains(file_name) {
            return true;
        }

        let under_included_dir = self.include_dirs.iter().any(|dir| {
            rel_file_path
                .strip_prefix(dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        });
        if under_included_dir {
            return true;
        }

        self.include_set.is_match(rel_file_path) || self.include_set.is_match(file_name)
    }

    fn is_excluded(&self, rel_file_path: &str, file_name: &str) -> bool {
        self.exclude_files.contains(rel_file_path)
            || self.exclude_files.contains(file_name)
            || self.exclude_set.is_match(rel_file_path)
            || self.exclude_set.is_match(file_name)
    }
}

/// Compiles one shell-style pattern. Never fails: when the pattern isn't a
/// valid glob (e.g. an unclosed `[`), it matches its own text literally.
fn compile(pattern: &str) -> Option<Glob> {
    match build_glob(&literal_braces(pattern)) {
        Ok(glob) => Some(glob),
        Err(err) => {
            log::warn!("Pattern '{}' is not a valid glob ({}), matching it literally", pattern, err);
            // `escape` wraps every meta character in a class, which always parses.
            build_glob(&globset::escape(pattern)).ok()
        }
    }
}

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).backslash_escape(false).build()
}

/// Rewrites `{` and `}` outside character classes as `[{]` and `[}]`, so they
/// lose their alternation meaning.
fn literal_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    // Characters seen inside the open class; `None` when outside one.
    let mut class: Option<usize> = None;

    for ch in pattern.chars() {
        match class {
            None => match ch {
                '{' => out.push_str("[{]"),
                '}' => out.push_str("[}]"),
                '[' => {
                    out.push(ch);
                    class = Some(0);
                }
                _ => out.push(ch),
            },
            Some(seen) => {
                out.push(ch);
                class = match ch {
                    ']' if seen > 0 => None,
                    '!' if seen == 0 && out.ends_with("[!") => Some(0),
                    _ => Some(seen + 1),
                };
            }
        }
    }
    out
}

fn finish(builder: GlobSetBuilder) -> GlobSet {
    match builder.build() {
        Ok(set) => set,
        Err(err) => {
            log::warn!("Failed to build pattern set, ignoring it: {}", err);
            GlobSet::empty()
        }
    }
}

/// Compiles a list of patterns into one matcher.
pub fn build_globset(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for glob in patterns.iter().filter_map(|pat| compile(pat)) {
        builder.add(glob);
    }
    finish(builder)
}
