use crate::frontend::token::Token;
use std::str::Chars;

/// Splits one source line into whitespace-delimited tokens. Each token is a
/// maximal run of non-whitespace characters tagged with the 0-based column
/// the run starts at. Whitespace itself is never yielded, so lexing cannot
/// fail.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    chars: Chars<'src>,
    row: usize,
    col: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(row: usize, line: &'src str) -> Lexer<'src> {
        Lexer {
            chars: line.chars(),
            row,
            col: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.col += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();
        self.peek()?;

        let start = self.col;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            self.advance();
        }
        Some(Token::new(self.row, start, text))
    }
}

/// Lexes a whole source text: lines in file order (0-based rows), tokens
/// within a line left to right.
pub fn lex_source(src: &str) -> Vec<Token> {
    src.lines()
        .enumerate()
        .flat_map(|(row, line)| Lexer::new(row, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_line_yields_no_tokens() {
        assert_eq!(Lexer::new(0, "").count(), 0);
        assert_eq!(Lexer::new(0, "   \t  ").count(), 0);
    }

    #[test]
    fn tokens_carry_text_and_start_column() {
        let tokens: Vec<Token> = Lexer::new(0, "  2 34  + .").collect();
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 2, "2"),
                Token::new(0, 4, "34"),
                Token::new(0, 8, "+"),
                Token::new(0, 10, "."),
            ]
        );
    }

    #[test]
    fn token_text_is_a_maximal_run() {
        let tokens: Vec<Token> = Lexer::new(3, "abc-def ghi").collect();
        assert_eq!(
            tokens,
            vec![Token::new(3, 0, "abc-def"), Token::new(3, 8, "ghi")]
        );
    }

    #[test]
    fn lex_source_flattens_lines_in_order() {
        let tokens = lex_source("2 3\n\n   + .\n");
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 0, "2"),
                Token::new(0, 2, "3"),
                Token::new(2, 3, "+"),
                Token::new(2, 5, "."),
            ]
        );
    }
}
