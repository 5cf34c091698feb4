use clap::{Parser, Subcommand, ValueEnum};
use lastexpr_core::pipeline::InputFormat;
use lastexpr_core::transform::Strategy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod check;
mod debug;
mod expand;
mod utils;


use check::handle_check;
use debug::{handle_ast, AstFormat};
use expand::{handle_expand, ExpandOptions};

/// Get the version string including git revision
fn version() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (git:", env!("GIT_HASH"), ")")
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Rewrite last-expression bodies into explicit returns",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    /// Log each expansion site (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// `--strategy` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Direct,
    ClosureWrap,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Direct => Strategy::Direct,
            StrategyArg::ClosureWrap => Strategy::ClosureWrap,
        }
    }
}

/// `--input-format` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormatArg {
    Source,
    Json,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Source => InputFormat::Source,
            InputFormatArg::Json => InputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Expand attributed functions and print the result
    Expand {
        /// File, directory, or "-" for stdin
        path: String,
        /// Output file, or output directory when expanding a directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Use this strategy for every registered attribute
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Configuration file (defaults to ./lastexpr.ron when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// What the input holds
        #[arg(long, value_enum, default_value_t = InputFormatArg::Source)]
        input_format: InputFormatArg,
    },
    /// Parse and expand without output, reporting diagnostics
    Check {
        /// File, directory, or "-" for stdin
        path: String,
        /// Configuration file (defaults to ./lastexpr.ron when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the parsed AST (debug)
    #[command(hide = true)]
    Ast {
        /// The file to parse
        file: String,
        #[arg(long, value_enum, default_value_t = AstFormat::Debug)]
        format: AstFormat,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the expanded source
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Expand {
            path,
            output,
            strategy,
            config,
            input_format,
        } => {
            handle_expand(ExpandOptions {
                path,
                output: output.as_deref(),
                strategy: strategy.map(Strategy::from),
                config: config.as_deref(),
                input_format: (*input_format).into(),
            });
        }
        Commands::Check { path, config } => {
            handle_check(path, config.as_deref());
        }
        Commands::Ast { file, format } => {
            handle_ast(file, *format);
        }
    }
}
