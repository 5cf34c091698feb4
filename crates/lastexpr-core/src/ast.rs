//! Syntax tree for the Swift-style host language
//!
//! The tree mirrors what a host parser hands to a body macro: a source file
//! made of items, function declarations with optional bodies, and blocks of
//! statements. Statements are split three ways (expression, declaration,
//! control statement) because the tail rewrite treats those differently.
//!
//! Operator chains are deliberately left flat (`Expr::Sequence`); folding them
//! is not the rewriter's business, apart from the `target = value` shape that
//! `transform::quirk` re-associates.

use serde::{Deserialize, Serialize};

mod span;
mod types;

pub use span::{Location, Span};
pub use types::{ClosureParam, Param, TypeText};

/// `@Name` attached to a declaration
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub span: Option<Span>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            span: None,
        }
    }
}

/// Ordered statement list between braces
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub span: Option<Span>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Block { stmts, span: None }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn last(&self) -> Option<&Stmt> {
        self.stmts.last()
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal, kept as written
    Integer(String),
    /// Floating point literal, kept as written
    Float(String),
    /// String literal contents between the quotes, escapes and
    /// interpolations left untouched
    String(String),
    Boolean(bool),
    Nil,
}

/// Argument in a call, subscript or tuple, with an optional label
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Argument {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub label: Option<String>,
    pub value: Expr,
}

impl Argument {
    pub fn positional(value: Expr) -> Self {
        Argument { label: None, value }
    }

    pub fn labeled(label: impl Into<String>, value: Expr) -> Self {
        Argument {
            label: Some(label.into()),
            value,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum PrefixOp {
    Not,    // !x
    Negate, // -x
}

impl PrefixOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOp::Not => "!",
            PrefixOp::Negate => "-",
        }
    }
}

/// Infix operators other than plain assignment
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Identical,
    NotIdentical,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    NilCoalesce,
    HalfOpenRange,
    ClosedRange,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Identical => "===",
            BinaryOp::NotIdentical => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::NilCoalesce => "??",
            BinaryOp::HalfOpenRange => "..<",
            BinaryOp::ClosedRange => "...",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::RemAssign => "%=",
        }
    }

    pub fn is_compound_assignment(&self) -> bool {
        matches!(
            self,
            BinaryOp::AddAssign
                | BinaryOp::SubAssign
                | BinaryOp::MulAssign
                | BinaryOp::DivAssign
                | BinaryOp::RemAssign
        )
    }

    /// Range operators are conventionally written without surrounding spaces
    pub fn is_range(&self) -> bool {
        matches!(self, BinaryOp::HalfOpenRange | BinaryOp::ClosedRange)
    }
}

/// `(params) -> Type in` header of a closure literal
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ClosureSignature {
    pub params: Vec<ClosureParam>,
    /// Whether the parameter list was written inside parentheses
    pub parenthesized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub return_type: Option<TypeText>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Closure {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub signature: Option<ClosureSignature>,
    pub body: Block,
}

/// `if cond { ... } else if cond { ... } else { ... }`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_block: Block,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfExpr>),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SwitchExpr {
    pub subject: Box<Expr>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum SwitchCase {
    Case { label: CaseLabel, body: Block },
    /// A case form the rewriter does not model (e.g. an `#if` guarded group),
    /// kept as its source text
    Unrecognized { text: String },
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum CaseLabel {
    /// `case p1, p2:` with each pattern kept as source text
    Patterns(Vec<String>),
    Default,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Identifier {
        name: String,
    },
    /// `.name` with the base type inferred from context
    ImplicitMember {
        name: String,
    },
    Member {
        base: Box<Expr>,
        name: String,
    },
    Subscript {
        base: Box<Expr>,
        arguments: Vec<Argument>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
    },
    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },
    /// Parenthesized expression (one element) or tuple
    Tuple {
        elements: Vec<Argument>,
    },
    Array {
        elements: Vec<Expr>,
    },
    Closure(Closure),
    If(IfExpr),
    Switch(SwitchExpr),
    /// Flat operand/operator/operand... list, exactly as the host parser
    /// produces it for every operator chain
    Sequence {
        elements: Vec<Expr>,
    },
    /// Operator element of a `Sequence`
    BinaryOperator {
        op: BinaryOp,
    },
    /// The `=` element of a `Sequence`
    AssignmentOperator,
    /// `target = value` after re-association
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// Host syntax the rewriter does not model; printed back verbatim
    Unrecognized {
        text: String,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Expr::Literal(Literal::Integer(value.to_string()))
    }

    pub fn call(callee: Expr, arguments: Vec<Argument>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `{ <block> }()`
    pub fn immediately_invoked(body: Block) -> Self {
        Expr::call(
            Expr::Closure(Closure {
                signature: None,
                body,
            }),
            Vec::new(),
        )
    }

    /// Whether this is an `if` or `switch` expression
    pub fn is_branching(&self) -> bool {
        matches!(self, Expr::If(_) | Expr::Switch(_))
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Expr::Call { .. })
    }

    /// Syntactic guess at whether evaluating this expression yields a value
    /// worth returning. Assignments (including the not yet re-associated
    /// `target = value` sequence) do not.
    pub fn produces_value(&self) -> bool {
        match self {
            Expr::Assignment { .. } | Expr::AssignmentOperator => false,
            Expr::Sequence { elements } => !elements.iter().any(|e| match e {
                Expr::AssignmentOperator => true,
                Expr::BinaryOperator { op } => op.is_compound_assignment(),
                _ => false,
            }),
            _ => true,
        }
    }
}

/// One `pattern: Type = initializer` entry of a `let`/`var` declaration
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub pattern: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub declared_type: Option<TypeText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub initializer: Option<Expr>,
}

impl Binding {
    pub fn new(pattern: impl Into<String>, initializer: Option<Expr>) -> Self {
        Binding {
            pattern: pattern.into(),
            declared_type: None,
            initializer,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub mutable: bool,
    pub bindings: Vec<Binding>,
    /// Body of a computed property (`var x: Int { ... }`)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub accessor: Option<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub name: String,
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub return_type: Option<TypeText>,
    /// `None` for requirements without a body (`func f() -> Int`)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Decl {
    Variable(VarDecl),
    Function(FunctionDecl),
}

impl Decl {
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Decl::Variable(var) => &var.attributes,
            Decl::Function(func) => &func.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        match self {
            Decl::Variable(var) => &mut var.attributes,
            Decl::Function(func) => &mut func.attributes,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Decl::Variable(var) => var.span,
            Decl::Function(func) => func.span,
        }
    }

    /// Replace the body (or computed property accessor) of this declaration
    pub fn set_body(&mut self, block: Block) {
        match self {
            Decl::Variable(var) => var.accessor = Some(block),
            Decl::Function(func) => func.body = Some(block),
        }
    }
}

/// Statements that are neither bare expressions nor declarations
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ControlStmt {
    /// An `if` or `switch` written in statement position
    Expression(Expr),
    Return(Option<Expr>),
    While {
        condition: Expr,
        body: Block,
    },
    For {
        pattern: String,
        sequence: Expr,
        body: Block,
    },
    Break,
    Continue,
}

/// Block item
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Expr(Expr),
    Decl(Decl),
    Control(ControlStmt),
}

impl Stmt {
    /// `return <expr>`
    pub fn ret(expr: Expr) -> Self {
        Stmt::Control(ControlStmt::Return(Some(expr)))
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Stmt::Control(ControlStmt::Return(_)))
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Item {
    Import {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(default)]
        span: Option<Span>,
    },
    Decl(Decl),
    Statement(Stmt),
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    pub items: Vec<Item>,
}
