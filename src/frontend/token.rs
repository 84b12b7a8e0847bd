use std::fmt::{Display, Formatter};

/// A whitespace-delimited lexical unit tagged with the position it was
/// found at. `row` and `col` are 0-based; diagnostics add 1 to both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub row: usize,
    pub col: usize,
    pub text: String,
}

impl Token {
    pub fn new(row: usize, col: usize, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            text: text.into(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.row, self.col, self.text)
    }
}
