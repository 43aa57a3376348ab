use crate::app::cli::Cli;
use crate::app::models::{normalize_path, FilterConfig, RuntimeConfig};
use crate::app::patterns::load_pattern_file;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PresetConfig {
    include_dirs: Option<Vec<String>>,
    include_files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    include_from: Option<PathBuf>,
    exclude_dirs: Option<Vec<String>>,
    exclude_files: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    exclude_from: Option<PathBuf>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("pathsum").join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content).context(format!("Failed to parse {:?}", config_path))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

/// Preset items first, then CLI items, duplicates dropped keeping the first.
fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn normalized_set(items: Vec<String>) -> HashSet<String> {
    items
        .iter()
        .map(|item| normalize_path(item))
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets = load_presets_file(&presets_path()?)?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    resolve_with_presets(cli, &presets, &cwd)
}

/// Merges CLI arguments with the selected preset.
///
/// Preset selection: `--preset` > name of the start directory > none. An
/// explicitly requested preset must exist.
pub fn resolve_with_presets(
    cli: Cli,
    presets: &HashMap<String, PresetConfig>,
    cwd: &Path,
) -> Result<RuntimeConfig> {
    let root = fs::canonicalize(&cli.root)
        .context(format!("Failed to resolve start directory {:?}", cli.root))?;
    if !root.is_dir() {
        bail!("Start path {:?} is not a directory", cli.root);
    }
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string());

    let preset = match cli.preset.as_deref() {
        Some(key) => match presets.get(key) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset '{}'", key),
        },
        None => presets.get(&project_name).cloned().unwrap_or_default(),
    };

    let include_dirs = merge_vecs(preset.include_dirs, cli.include_dirs);
    let include_files = merge_vecs(preset.include_files, cli.include_files);
    let exclude_dirs = merge_vecs(preset.exclude_dirs, cli.exclude_dirs);
    let exclude_files = merge_vecs(preset.exclude_files, cli.exclude_files);

    let include_from = cli.include_from.or(preset.include_from);
    let exclude_from = cli.exclude_from.or(preset.exclude_from);

    let mut include_patterns = Vec::new();
    if let Some(path) = &include_from {
        include_patterns = load_pattern_file(path);
        if include_patterns.is_empty() {
            log::warn!(
                "Include file {:?} was empty or not found. No files will match it.",
                path
            );
        }
    }
    let include_patterns = merge_vecs(
        Some(include_patterns),
        Some(merge_vecs(preset.include, cli.include)),
    );

    let exclude_patterns = merge_vecs(
        exclude_from.as_deref().map(load_pattern_file),
        Some(merge_vecs(preset.exclude, cli.exclude)),
    );

    let inclusion_mode_active = include_from.is_some()
        || !include_dirs.is_empty()
        || !include_files.is_empty()
        || !include_patterns.is_empty();

    let output = cli
        .output
        .unwrap_or_else(|| cwd.join(format!("__SUMMARY__{}.txt", project_name)));

    Ok(RuntimeConfig {
        root,
        output,
        filter: FilterConfig {
            include_dirs: normalized_set(include_dirs),
            include_files: normalized_set(include_files),
            include_patterns,
            exclude_dirs: normalized_set(exclude_dirs),
            exclude_files: normalized_set(exclude_files),
            exclude_patterns,
            inclusion_mode_active,
        },
    })
}
