//! Debug subcommand: `ast`

use crate::utils::{print_diagnostics, read_source};
use clap::ValueEnum;
use lastexpr_core::ast::SourceFile;
use lastexpr_core::parser;
use std::process;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AstFormat {
    #[default]
    Debug,
    Json,
    Ron,
}

/// Render a parsed tree in the requested format
pub fn render_ast(file: &SourceFile, format: AstFormat) -> Result<String, String> {
    match format {
        AstFormat::Debug => Ok(format!("{file:#?}")),
        AstFormat::Json => serde_json::to_string_pretty(file).map_err(|e| e.to_string()),
        AstFormat::Ron => ron::ser::to_string_pretty(
            file,
            ron::ser::PrettyConfig::new()
                .depth_limit(100)
                .extensions(ron::extensions::Extensions::IMPLICIT_SOME),
        )
        .map_err(|e| e.to_string()),
    }
}

/// Print the parsed AST for debugging
pub fn handle_ast(file: &str, format: AstFormat) {
    let source = match read_source(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading file '{file}': {err}");
            process::exit(1);
        }
    };

    let ast = match parser::parse(&source, file) {
        Ok(ast) => ast,
        Err(errors) => {
            print_diagnostics(&errors, &source);
            process::exit(1);
        }
    };

    match render_ast(&ast, format) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error serializing AST: {e}");
            process::exit(1);
        }
    }
}
