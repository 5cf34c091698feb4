//! Type annotations and parameter lists

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type annotation kept as its (trimmed) source spelling.
///
/// The rewriter never resolves types; it only compares spellings, so the
/// text is all that is carried around.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeText(String);

impl TypeText {
    pub fn new(text: impl Into<String>) -> Self {
        TypeText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeText {
    fn from(text: &str) -> Self {
        TypeText::new(text)
    }
}

/// Function parameter: `label name: Type`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Param {
    /// External argument label (`_` included) when it differs from the name
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub label: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: TypeText,
}

impl Param {
    pub fn new(label: Option<&str>, name: &str, r#type: &str) -> Self {
        Param {
            label: label.map(str::to_string),
            name: name.to_string(),
            r#type: TypeText::new(r#type),
        }
    }
}

/// Closure parameter, type annotation optional: `x` or `x: Int`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ClosureParam {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub r#type: Option<TypeText>,
}
