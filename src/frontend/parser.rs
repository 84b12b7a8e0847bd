use crate::frontend::ast::{Op, Program};
use crate::frontend::token::Token;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct Parser {
    path: String,
    tokens: Vec<Token>,
}

impl Parser {
    pub fn new(path: impl Into<String>, tokens: Vec<Token>) -> Self {
        Parser {
            path: path.into(),
            tokens,
        }
    }

    /// Maps every token to an operation, failing fast on the first token
    /// that matches no recognized form. A failed parse yields no program at
    /// all, never a partial one.
    pub fn parse(self) -> Result<Program, ParserError> {
        let mut ops = Vec::with_capacity(self.tokens.len());
        for token in self.tokens {
            ops.push(Self::parse_op(&self.path, token)?);
        }
        Ok(Program::new(ops))
    }

    fn parse_op(path: &str, token: Token) -> Result<Op, ParserError> {
        match token.text.as_str() {
            "+" => Ok(Op::Plus),
            "-" => Ok(Op::Minus),
            "." => Ok(Op::Dump),
            text => match text.parse::<i64>() {
                Ok(value) => Ok(Op::PushInt(value)),
                Err(_) => Err(ParserError::InvalidToken {
                    path: path.to_string(),
                    token,
                }),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    InvalidToken { path: String, token: Token },
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserError::InvalidToken { path, token } => write!(
                f,
                "Error at {}:{}:{}: Invalid token {}",
                path,
                token.row + 1,
                token.col + 1,
                token.text
            ),
        }
    }
}

impl Error for ParserError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::lex_source;

    fn parse_str(src: &str) -> Result<Program, ParserError> {
        Parser::new("test.stk", lex_source(src)).parse()
    }

    #[test]
    fn symbols_map_to_their_ops() {
        let program = parse_str("+ - .").unwrap();
        assert_eq!(program.ops, vec![Op::Plus, Op::Minus, Op::Dump]);
    }

    #[test]
    fn integer_literals_push() {
        let program = parse_str("42 -17 0").unwrap();
        assert_eq!(
            program.ops,
            vec![Op::PushInt(42), Op::PushInt(-17), Op::PushInt(0)]
        );
    }

    #[test]
    fn invalid_token_reports_one_based_position() {
        let err = parse_str("1 2\n  abc .").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error at test.stk:2:3: Invalid token abc"
        );
    }

    #[test]
    fn parse_aborts_on_first_invalid_token() {
        let err = parse_str("abc def").unwrap_err();
        let ParserError::InvalidToken { token, .. } = err;
        assert_eq!(token.text, "abc");
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        assert!(parse_str("   \n\t\n").unwrap().is_empty());
    }
}
