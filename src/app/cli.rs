use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Summarize text files in a directory tree into a single file",
    after_help = "Pattern files (--include-from/--exclude-from) use .gitignore-like syntax:\n  \
        one pattern per line, '#' starts a comment, blank lines are ignored.\n  \
        Patterns match paths relative to the start directory using '/'.\n  \
        Wildcards *, ? and [seq] are supported; a trailing '/' matches directories only."
)]
pub struct Cli {
    /// Directory to summarize
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Summary file to write (default: __SUMMARY__<dir name>.txt)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Directory paths to exclude directly (e.g., node_modules build)
    #[arg(long, num_args = 1.., value_name = "DIR")]
    pub exclude_dirs: Option<Vec<String>>,

    /// File names or paths to exclude directly (e.g., secrets.yaml '*.log')
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub exclude_files: Option<Vec<String>>,

    /// Glob patterns for files or directories to exclude
    #[arg(long, num_args = 1.., value_name = "PATTERN")]
    pub exclude: Option<Vec<String>>,

    /// File containing patterns to exclude (like .gitignore)
    #[arg(long, value_name = "FILE")]
    pub exclude_from: Option<PathBuf>,

    /// Only include files under these directories
    #[arg(long, num_args = 1.., value_name = "DIR")]
    pub include_dirs: Option<Vec<String>>,

    /// Only include these file names or paths
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub include_files: Option<Vec<String>>,

    /// Only include files matching these glob patterns (e.g., '*.rs')
    #[arg(long, num_args = 1.., value_name = "PATTERN")]
    pub include: Option<Vec<String>>,

    /// File containing patterns; ONLY matching files are included
    #[arg(long, value_name = "FILE")]
    pub include_from: Option<PathBuf>,

    /// Log every file as it is added
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
