//! Shared CLI utilities for reading input, configuration and output paths

use lastexpr_core::config::{Config, ConfigError, DEFAULT_CONFIG_FILE};
use lastexpr_core::diagnostics::Diagnostic;
use lastexpr_core::transform::Strategy;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "swift";
const EXPANDED_SUFFIX: &str = ".expanded.swift";

/// Read source code from a file or stdin.
/// If `file` is "-", reads from stdin. Otherwise reads from the specified file.
pub fn read_source(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

/// The explicit config file if given, else `lastexpr.ron` in the working
/// directory if present, else the defaults. `strategy` overrides every
/// registered attribute.
pub fn load_config(explicit: Option<&Path>, strategy: Option<Strategy>) -> Result<Config, ConfigError> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            debug!(path = DEFAULT_CONFIG_FILE, "using config from working directory");
            Config::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };

    Ok(match strategy {
        Some(strategy) => config.with_strategy_override(strategy),
        None => config,
    })
}

/// Load the config or exit with an error message
pub fn load_config_or_exit(explicit: Option<&Path>, strategy: Option<Strategy>) -> Config {
    load_config(explicit, strategy).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    })
}

/// Whether `path` is an input file for directory walks: `.swift`, but not a
/// previous `.expanded.swift` output
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
        && !path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(EXPANDED_SUFFIX))
}

/// Every source file under `dir`, sorted for stable output
pub fn source_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_source_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// `dir/name.swift` becomes `dir/name.expanded.swift`
pub fn expanded_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{EXPANDED_SUFFIX}"))
}

/// Format and print diagnostics to stderr
pub fn print_diagnostics(diagnostics: &[Diagnostic], source: &str) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.format(source));
    }
}
