use crate::app::detect::looks_like_text;
use crate::app::error::SummaryError;
use crate::app::filter::FilterEngine;
use crate::app::formatter::OutputGenerator;
use crate::app::models::{relative_slash_path, FileVerdict, FilterConfig, RunCounters, RunState};
use ignore::{DirEntry, WalkBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the summary of `root` into `output` and returns the run counters.
///
/// The output file is excluded from its own contents whenever it lives inside
/// `root`. Failing to create it is the only fatal error.
pub fn create_summary(
    root: &Path,
    output: &Path,
    config: FilterConfig,
) -> Result<RunCounters, SummaryError> {
    let config = match output_relative_to(root, output) {
        Some(rel) => {
            log::debug!("Excluding summary file from its own contents: {}", rel);
            config.with_excluded_file(&rel)
        }
        None => config,
    };
    let engine = FilterEngine::new(&config);
    Scanner::new(root.to_path_buf(), &engine).summarize_to_file(output)
}

/// Depth-first, top-down walker that feeds accepted files to the output.
pub struct Scanner<'a> {
    root: PathBuf,
    engine: &'a FilterEngine,
    state: RunState,
    counters: RunCounters,
}

impl<'a> Scanner<'a> {
    pub fn new(root: PathBuf, engine: &'a FilterEngine) -> Self {
        Self {
            root,
            engine,
            state: RunState::Init,
            counters: RunCounters::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Creates (or truncates) `output` and summarizes into it.
    pub fn summarize_to_file(&mut self, output: &Path) -> Result<RunCounters, SummaryError> {
        let file = File::create(output).map_err(|source| {
            self.transition(RunState::Failed);
            SummaryError::OutputOpen {
                path: output.to_path_buf(),
                source,
            }
        })?;

        let mut out = BufWriter::new(file);
        Ok(self.summarize(&mut out))
    }

    /// Walks the whole tree once, writing every accepted file to `out`.
    pub fn summarize<W: Write>(&mut self, out: &mut W) -> RunCounters {
        self.counters = RunCounters::default();
        self.transition(RunState::Walking);

        let root = self.root.clone();
        self.walk_dir(&root, "", out);

        self.transition(RunState::Finalizing);
        if let Err(err) = out.flush() {
            log::error!("Failed to flush summary output: {}", err);
            self.counters.output_incomplete = true;
        }

        self.transition(RunState::Done);
        self.counters
    }

    fn transition(&mut self, next: RunState) {
        log::trace!("Scanner state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn walk_dir<W: Write>(&mut self, dir: &Path, rel_dir: &str, out: &mut W) {
        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in list_dir(dir) {
            let name = entry.file_name().to_string_lossy().to_string();
            let rel = join_rel(rel_dir, &name);

            match entry_kind(&entry) {
                EntryKind::Dir => {
                    if self.engine.should_descend(&rel, &name) {
                        subdirs.push((entry.into_path(), rel));
                    } else {
                        log::debug!("Excluding directory tree: {}", rel);
                        self.counters.dirs_pruned += 1;
                    }
                }
                EntryKind::File => files.push((entry.into_path(), rel, name)),
                // Counted when excluded, never entered either way.
                EntryKind::LinkedDir => {
                    if self.engine.should_descend(&rel, &name) {
                        log::debug!("Not following directory link: {}", rel);
                    } else {
                        log::debug!("Excluding directory link: {}", rel);
                        self.counters.dirs_pruned += 1;
                    }
                }
            }
        }

        for (path, rel, name) in files {
            self.process_file(&path, &rel, &name, out);
        }

        for (path, rel) in subdirs {
            self.walk_dir(&path, &rel, out);
        }
    }

    fn process_file<W: Write>(&mut self, path: &Path, rel: &str, name: &str, out: &mut W) {
        let verdict = self.engine.classify(rel, name);
        if self.engine.inclusion_mode_active() && verdict != FileVerdict::NotIncluded {
            self.counters.files_considered += 1;
        }

        match verdict {
            FileVerdict::NotIncluded => {
                self.counters.skipped_not_included += 1;
                return;
            }
            FileVerdict::Excluded => {
                log::debug!("Skipping excluded file: {}", rel);
                self.counters.skipped_excluded += 1;
                return;
            }
            FileVerdict::Included => {}
        }

        if !looks_like_text(path) {
            self.counters.skipped_binary += 1;
            return;
        }

        match OutputGenerator::write_entry(out, rel, path) {
            Ok(()) => {
                log::debug!("Adding: {}", rel);
                self.counters.files_processed += 1;
            }
            Err(err) => {
                log::warn!("Error reading or writing file {}: {}", rel, err);
                self.counters.skipped_errors += 1;
            }
        }
    }
}

enum EntryKind {
    Dir,
    File,
    /// Symlink to a directory; filtered like a directory but never entered.
    LinkedDir,
}

fn entry_kind(entry: &DirEntry) -> EntryKind {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => EntryKind::Dir,
        Some(ft) if ft.is_symlink() => match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::LinkedDir,
            _ => EntryKind::File,
        },
        _ => EntryKind::File,
    }
}

/// Immediate children of `dir` in the order the filesystem returns them.
fn list_dir(dir: &Path) -> Vec<DirEntry> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(1))
        .build();

    let mut entries = Vec::new();
    for result in walker {
        match result {
            Ok(entry) if entry.depth() == 0 => {}
            Ok(entry) => entries.push(entry),
            Err(err) => log::warn!("Error walking entry: {}", err),
        }
    }
    entries
}

fn join_rel(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Slash path of `output` relative to `root`, if it sits inside the tree.
fn output_relative_to(root: &Path, output: &Path) -> Option<String> {
    let root = fs::canonicalize(root).ok()?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let output = fs::canonicalize(parent).ok()?.join(output.file_name()?);

    let rel = relative_slash_path(&output, &root)?;
    if rel.is_empty() || rel == ".." || rel.starts_with("../") {
        return None;
    }
    Some(rel)
}
