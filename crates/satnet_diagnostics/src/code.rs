//! Diagnostic codes with category prefixes for structured error identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit number,
/// e.g., `E101`, `W301`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// A gate, flip-flop, mux, selector, or concat references an undeclared wire.
    pub const DANGLING_WIRE: Self = Self::new(Category::Error, 101);
    /// A wire was declared with width zero.
    pub const ZERO_WIDTH_WIRE: Self = Self::new(Category::Error, 102);
    /// A selector or concat uses a bit index beyond the wire's width.
    pub const RANGE_OUT_OF_BOUNDS: Self = Self::new(Category::Error, 103);
    /// A selector or concat has `left > right`.
    pub const INVERTED_RANGE: Self = Self::new(Category::Error, 104);
    /// A loader record could not be decoded (fail-fast policy).
    pub const MALFORMED_RECORD: Self = Self::new(Category::Error, 105);
    /// A rewrite rule found the store in an impossible state.
    pub const INTERNAL: Self = Self::new(Category::Error, 901);
    /// A loader record could not be decoded and was dropped.
    pub const MALFORMED_RECORD_IGNORED: Self = Self::new(Category::Warning, 201);
    /// Saturation stopped at the pass limit before reaching a fixpoint.
    pub const NOT_CONVERGED: Self = Self::new(Category::Warning, 301);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
