use std::fmt;

use phf::phf_map;

pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "let" => TokenKind::Let,
    "print" => TokenKind::Print,
};

pub static SINGLE_CHAR_TOKENS: phf::Map<char, TokenKind> = phf_map! {
    '+' => TokenKind::Plus,
    '-' => TokenKind::Minus,
    '*' => TokenKind::Multiply,
    '/' => TokenKind::Divide,
    '=' => TokenKind::Assign,
    ';' => TokenKind::Semicolon,
    '(' => TokenKind::LParen,
    ')' => TokenKind::RParen,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,

    Let,
    Print,

    Plus,
    Minus,
    Multiply,
    Divide,
    Assign,

    Semicolon,
    LParen,
    RParen,

    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Let => "LET",
            TokenKind::Print => "PRINT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A single token with its source text and position. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// Render the token sequence as an aligned table, one token per line.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let text = if token.kind == TokenKind::Newline {
            "\\n".to_string()
        } else {
            token.text.clone()
        };
        out.push_str(&format!(
            "{:<12} | {:<10} | line {}, col {}\n",
            token.kind.to_string(),
            text,
            token.line,
            token.column
        ));
    }
    out
}
