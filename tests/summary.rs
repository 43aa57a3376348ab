use pathsum::app::patterns::parse_patterns;
use pathsum::{create_summary, FilterConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn headers(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .collect()
}

#[test]
fn ignore_file_patterns_prune_and_filter() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    write(root, "src/main.rs", b"fn main() {}\n");
    write(root, "src/gen/out.rs", b"// generated\n");
    write(root, "target/debug/app.d", b"deps\n");
    write(root, "notes.log", b"noise\n");
    write(root, "logo.png", &[0x89, b'P', b'N', b'G', 0xff, 0x00]);

    let patterns = parse_patterns("# build\ntarget/\n*.log\n\nsrc/gen\n");
    let config = FilterConfig {
        exclude_patterns: patterns,
        ..Default::default()
    };

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("summary.txt");
    let counters = create_summary(root, &output, config).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    assert_eq!(headers(&text), vec!["src/main.rs"]);
    assert_eq!(text, "# src/main.rs\nfn main() {}\n\n\n");
    assert_eq!(counters.dirs_pruned, 2);
    assert_eq!(counters.skipped_excluded, 1);
    assert_eq!(counters.skipped_binary, 1);
}

#[test]
fn include_dirs_and_patterns_combine() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    write(root, "docs/guide.md", b"guide");
    write(root, "src/lib.rs", b"lib");
    write(root, "src/app/cli.rs", b"cli");
    write(root, "Cargo.toml", b"[package]");
    write(root, "README.md", b"readme");

    let config = FilterConfig {
        include_dirs: ["src".to_string()].into_iter().collect(),
        include_patterns: vec!["*.toml".to_string()],
        exclude_files: ["cli.rs".to_string()].into_iter().collect(),
        inclusion_mode_active: true,
        ..Default::default()
    };

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("summary.txt");
    let counters = create_summary(root, &output, config).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    let mut found = headers(&text);
    found.sort();
    assert_eq!(found, vec!["Cargo.toml", "src/lib.rs"]);
    assert_eq!(counters.files_processed, 2);
    assert_eq!(counters.files_considered, 3);
    assert_eq!(counters.skipped_not_included, 2);
    assert_eq!(counters.skipped_excluded, 1);
}

#[test]
fn repeated_runs_in_place_are_identical() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    write(root, "a.txt", b"alpha");
    write(root, "nested/b.txt", b"beta");
    let output = root.join("__SUMMARY__project.txt");

    create_summary(root, &output, FilterConfig::default()).unwrap();
    let first = fs::read(&output).unwrap();
    create_summary(root, &output, FilterConfig::default()).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    let text = String::from_utf8(first).unwrap();
    assert!(!text.contains("__SUMMARY__"));
    assert_eq!(headers(&text).len(), 2);
}

#[test]
fn invalid_bytes_after_the_sniff_window_are_dropped() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    let mut content = vec![b'x'; 2048];
    content.push(0xff);
    content.extend_from_slice(b"tail");
    write(root, "big.txt", &content);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("summary.txt");
    let counters = create_summary(root, &output, FilterConfig::default()).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    assert_eq!(counters.files_processed, 1);
    assert!(text.ends_with("xtail\n\n"));
}

#[test]
fn odd_pattern_lines_do_not_abort_the_run() {
    let project = TempDir::new().unwrap();
    let root = project.path();
    write(root, "[draft", b"literal bracket");
    write(root, "a{1}.txt", b"braces");
    write(root, "a1.txt", b"plain");

    let config = FilterConfig {
        include_patterns: vec!["a{1}.txt".to_string(), "*.md".to_string()],
        inclusion_mode_active: true,
        exclude_patterns: parse_patterns("[draft\n"),
        ..Default::default()
    };

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("summary.txt");
    let counters = create_summary(root, &output, config).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    assert_eq!(text, "# a{1}.txt\nbraces\n\n");
    assert_eq!(counters.files_processed, 1);
    assert_eq!(counters.skipped_not_included, 2);
}
