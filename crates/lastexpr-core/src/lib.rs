pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod parser;
pub mod pipeline;
pub mod printer;
pub mod transform;

// Re-export commonly used types for convenience
pub use ast::{Block, Decl, Expr, SourceFile, Stmt};
pub use config::Config;
pub use diagnostics::{Diagnostic, Severity};
pub use pipeline::Pipeline;
pub use transform::{ExpansionError, Strategy};
