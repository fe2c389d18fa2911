//! Formula lexer
//!
//! Turns formula text (without the leading `=`) into a flat token stream.
//! The lexer only holds a cursor; it scans one token per call and cannot be
//! rewound, so re-scanning needs a fresh [`Lexer`].

use crate::error::{FormulaError, FormulaResult};

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Cell reference text like `A1` or `AA12`
    CellRef(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    // Delimiters
    LeftParen,
    RightParen,

    /// End of input
    End,
}

/// Forward-only formula tokenizer
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// Current byte offset into the input
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Scan the next token.
    ///
    /// Once the input is exhausted every further call returns [`Token::End`].
    pub fn next_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::End),
        };

        if c.is_ascii_digit() {
            return self.scan_number();
        }

        if c.is_ascii_uppercase() {
            return Ok(self.scan_cell_ref());
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => {
                return Err(FormulaError::InvalidCharacter {
                    character: c,
                    position: self.pos,
                })
            }
        };
        self.advance();
        Ok(token)
    }

    /// Maximal run of digits and dots.
    ///
    /// More than one `.` is accepted; the value is read from the leading
    /// decimal prefix, so `1.2.3` scans as one token worth `1.2`.
    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_digit() || c == '.')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        let prefix = match text.match_indices('.').nth(1) {
            Some((second_dot, _)) => &text[..second_dot],
            None => text,
        };

        match prefix.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Number(value)),
            _ => Err(FormulaError::InvalidNumber(text.to_string())),
        }
    }

    /// Maximal run of uppercase letters followed by a maximal run of digits.
    ///
    /// Shape is not validated here; the parser rejects letters without a row.
    fn scan_cell_ref(&mut self) -> Token {
        let start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_uppercase()) {
            self.advance();
        }
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        Token::CellRef(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }
}

/// Yields every token up to and including [`Token::End`], or up to the first
/// error, then stops.
impl Iterator for Lexer<'_> {
    type Item = FormulaResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.next_token();
        if matches!(result, Ok(Token::End) | Err(_)) {
            self.done = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}
