//! Return type classification

use crate::ast::TypeText;

/// Whether a declared return type means "returns nothing".
///
/// Only the exact spellings `Void` and `()` count (surrounding whitespace
/// ignored). Parenthesized forms such as `(Void)` are treated as non-void.
pub fn returns_void(return_type: Option<&TypeText>) -> bool {
    match return_type {
        None => true,
        Some(ty) => matches!(ty.as_str().trim(), "Void" | "()"),
    }
}

/// Result type of a function type spelling: `R` in `(A, B) -> R`.
///
/// Splits at the first `->` outside any brackets, so `() -> () -> Int`
/// yields `() -> Int`. Returns `None` for anything that is not a function
/// type.
pub fn function_result(ty: &TypeText) -> Option<TypeText> {
    let text = ty.as_str();
    let mut depth = 0usize;
    let mut prev = '\0';

    for (i, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            // the `>` of `->` is not a closing bracket
            '>' if prev == '-' && depth == 0 => {
                return Some(TypeText::new(text[i + 1..].trim()));
            }
            '>' if prev != '-' => depth = depth.saturating_sub(1),
            _ => {}
        }
        prev = ch;
    }

    None
}
