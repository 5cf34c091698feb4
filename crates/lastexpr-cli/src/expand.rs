//! `expand` subcommand handler

use crate::utils::{
    expanded_path, load_config_or_exit, print_diagnostics, read_source, source_files,
};
use lastexpr_core::config::Config;
use lastexpr_core::pipeline::{InputFormat, Pipeline};
use lastexpr_core::transform::Strategy;
use std::fs;
use std::path::Path;
use std::process;
use tracing::{debug, info};

pub struct ExpandOptions<'a> {
    pub path: &'a str,
    pub output: Option<&'a Path>,
    pub strategy: Option<Strategy>,
    pub config: Option<&'a Path>,
    pub input_format: InputFormat,
}

/// Expand a file (or `-` for stdin) or every source file under a directory
pub fn handle_expand(options: ExpandOptions) {
    let config = load_config_or_exit(options.config, options.strategy);

    if options.path != "-" && Path::new(options.path).is_dir() {
        if let Err(message) = check_directory_format(options.input_format) {
            eprintln!("Error: {message}");
            process::exit(1);
        }
        expand_dir(Path::new(options.path), options.output, &config);
    } else {
        expand_file(&options, config);
    }
}

/// Directory walks collect `.swift` sources, so a JSON tree can only come
/// from a single file or stdin
pub fn check_directory_format(input_format: InputFormat) -> Result<(), String> {
    match input_format {
        InputFormat::Source => Ok(()),
        InputFormat::Json => {
            Err("--input-format json needs a single file or stdin, not a directory".to_string())
        }
    }
}

fn expand_file(options: &ExpandOptions, config: Config) {
    let file = options.path;
    let source = match read_source(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading file '{file}': {err}");
            process::exit(1);
        }
    };

    let pipeline = Pipeline::new(source, file.to_string())
        .with_config(config)
        .with_input_format(options.input_format);

    let output = match pipeline.run_all() {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}", e.format_with_source(pipeline.source()));
            process::exit(1);
        }
    };
    print_diagnostics(&output.warnings, pipeline.source());

    match options.output {
        Some(target) => {
            if let Err(e) = fs::write(target, &output.text) {
                eprintln!("Error writing to '{}': {e}", target.display());
                process::exit(1);
            }
            info!(input = file, output = %target.display(), "expanded");
        }
        None => print!("{}", output.text),
    }
}

/// Expand each source file under `dir`. Results go next to their input as
/// `<name>.expanded.swift`, or mirror the tree under `output` when given.
fn expand_dir(dir: &Path, output: Option<&Path>, config: &Config) {
    let files = source_files(dir);
    debug!(dir = %dir.display(), files = files.len(), "expanding directory");

    let mut expanded = 0;
    let mut failed = 0;

    for path in files {
        let source = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        let pipeline =
            Pipeline::new(source, path.display().to_string()).with_config(config.clone());
        let result = match pipeline.run_all() {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{}", e.format_with_source(pipeline.source()));
                failed += 1;
                continue;
            }
        };
        print_diagnostics(&result.warnings, pipeline.source());

        let target = match output {
            Some(out_dir) => out_dir.join(path.strip_prefix(dir).unwrap_or(&path)),
            None => expanded_path(&path),
        };
        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Failed to create {}: {}", parent.display(), e);
                failed += 1;
                continue;
            }
        }
        if let Err(e) = fs::write(&target, &result.text) {
            eprintln!("Failed to write {}: {}", target.display(), e);
            failed += 1;
            continue;
        }

        expanded += 1;
        println!("Expanded {} -> {}", path.display(), target.display());
    }

    println!("\nExpansion complete:");
    println!("  Expanded: {expanded}");
    println!("  Failed: {failed}");

    if failed > 0 {
        process::exit(1);
    }
}
