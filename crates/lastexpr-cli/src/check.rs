//! `check` subcommand handler

use crate::utils::{load_config_or_exit, print_diagnostics, read_source, source_files};
use lastexpr_core::config::Config;
use lastexpr_core::pipeline::Pipeline;
use std::path::Path;
use std::process;

/// Parse and expand without writing anything; exit 1 if any file fails
pub fn handle_check(path: &str, config: Option<&Path>) {
    let config = load_config_or_exit(config, None);

    let files: Vec<String> = if path != "-" && Path::new(path).is_dir() {
        source_files(Path::new(path))
            .into_iter()
            .map(|file| file.display().to_string())
            .collect()
    } else {
        vec![path.to_string()]
    };

    let failed = files
        .iter()
        .filter(|file| !check_file(file, &config))
        .count();

    if failed > 0 {
        eprintln!("Check failed: {failed} of {} file(s) had errors", files.len());
        process::exit(1);
    }
    println!("Check: OK");
}

fn check_file(file: &str, config: &Config) -> bool {
    let source = match read_source(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading file '{file}': {err}");
            return false;
        }
    };

    let pipeline = Pipeline::new(source, file.to_string()).with_config(config.clone());
    let result = pipeline
        .parse()
        .and_then(|parsed| pipeline.expand(parsed));

    match result {
        Ok(expanded) => {
            print_diagnostics(&expanded.warnings, pipeline.source());
            true
        }
        Err(e) => {
            eprintln!("{}", e.format_with_source(pipeline.source()));
            false
        }
    }
}
