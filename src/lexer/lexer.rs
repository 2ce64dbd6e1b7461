use crate::error::LexError;

use super::{
    token::{KEYWORDS, SINGLE_CHAR_TOKENS},
    Token, TokenKind,
};

#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            tokens: vec![],
        }
    }

    /// Scan the whole source into a token sequence terminated by one `Eof`.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        lexer.scan()?;

        Ok(lexer.tokens)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while self.current().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Digits with an optional single decimal point followed by more digits.
    /// One extra character of lookahead distinguishes `2.5` from `2.`.
    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        while let Some(c) = self.current().filter(|c| c.is_ascii_digit()) {
            text.push(c);
            self.advance();
        }

        if self.current() == Some('.') && self.peek().is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.advance();
            while let Some(c) = self.current().filter(|c| c.is_ascii_digit()) {
                text.push(c);
                self.advance();
            }
        }

        Token::new(TokenKind::Number, text, line, column)
    }

    fn read_identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        while let Some(c) = self
            .current()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        {
            text.push(c);
            self.advance();
        }

        let kind = KEYWORDS
            .get(text.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        Token::new(kind, text, line, column)
    }

    fn scan(&mut self) -> Result<(), LexError> {
        while self.position < self.chars.len() {
            self.skip_whitespace();

            let Some(c) = self.current() else {
                break;
            };

            if c == '\n' {
                self.tokens
                    .push(Token::new(TokenKind::Newline, "\n", self.line, self.column));
                self.advance();
            } else if c.is_ascii_digit() {
                let token = self.read_number();
                self.tokens.push(token);
            } else if c.is_ascii_alphabetic() || c == '_' {
                let token = self.read_identifier();
                self.tokens.push(token);
            } else if let Some(kind) = SINGLE_CHAR_TOKENS.get(&c) {
                self.tokens
                    .push(Token::new(*kind, c.to_string(), self.line, self.column));
                self.advance();
            } else if c == '#' {
                self.skip_comment();
            } else {
                return Err(LexError::UnexpectedCharacter {
                    ch: c,
                    line: self.line,
                    column: self.column,
                });
            }
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, "", self.line, self.column));
        Ok(())
    }
}
