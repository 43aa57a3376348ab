use std::fs;
use std::path::Path;

/// Parses `.gitignore`-like content: one pattern per line, blank lines and
/// `#` comments skipped, surrounding whitespace trimmed.
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Loads a pattern file. A missing or unreadable file yields no patterns and a
/// warning; it never aborts the run.
pub fn load_pattern_file(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_patterns(&content),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Pattern file not found: {}", path.display());
            Vec::new()
        }
        Err(err) => {
            log::warn!("Error reading pattern file {}: {}", path.display(), err);
            Vec::new()
        }
    }
}
