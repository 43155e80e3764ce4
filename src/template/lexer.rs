//! Tokeniser for the expression language inside template delimiters.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use super::parser::ParseError;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    // Delimiters
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Dot,       // .
    Question,  // ?
    Colon,     // :
    Semicolon, // ;

    // Operators
    Bang,           // !
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Less,           // <
    LessEqual,      // <=
    Greater,        // >
    GreaterEqual,   // >=
    Assign,         // =
    Equal,          // ==
    NotEqual,       // !=
    StrictEqual,    // ===
    StrictNotEqual, // !==
    And,            // &&
    Or,             // ||

    // Literals and names
    Number(f64),
    String(String),
    Identifier(String),

    Eof,
}

impl Token {
    pub(crate) fn is_identifier(&self, text: &str) -> bool {
        matches!(self, Self::Identifier(name) if name == text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Bang => "!",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Assign => "=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
            Self::And => "&&",
            Self::Or => "||",
            Self::Number(number) => return write!(formatter, "{number}"),
            Self::String(text) => return write!(formatter, "{text:?}"),
            Self::Identifier(name) => name,
            Self::Eof => "end of input",
        };
        formatter.write_str(text)
    }
}

/// Converts expression text into tokens carrying their byte offset.
pub(crate) struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// The next token and the offset it starts at.
    pub(crate) fn next_token(&mut self) -> Result<(Token, usize), ParseError> {
        self.skip_whitespace();

        let Some((start, character)) = self.advance() else {
            return Ok((Token::Eof, self.source.len()));
        };

        let token = match character {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            '.' => Token::Dot,
            '?' => Token::Question,
            ':' => Token::Colon,
            ';' => Token::Semicolon,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '<' => self.either('=', Token::LessEqual, Token::Less),
            '>' => self.either('=', Token::GreaterEqual, Token::Greater),
            '=' => match self.either('=', Token::Equal, Token::Assign) {
                Token::Equal => self.either('=', Token::StrictEqual, Token::Equal),
                other => other,
            },
            '!' => match self.either('=', Token::NotEqual, Token::Bang) {
                Token::NotEqual => self.either('=', Token::StrictNotEqual, Token::NotEqual),
                other => other,
            },
            '&' if self.eat('&') => Token::And,
            '|' if self.eat('|') => Token::Or,
            '"' | '\'' => self.read_string(character, start)?,
            '0'..='9' => self.read_number(start)?,
            _ if is_identifier_start(character) => self.read_identifier(start),
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{character}'"),
                    start,
                ));
            }
        };
        Ok((token, start))
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn advance(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, character)| character)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn either(&mut self, next: char, matched: Token, otherwise: Token) -> Token {
        if self.eat(next) { matched } else { otherwise }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_string(&mut self, quote: char, start: usize) -> Result<Token, ParseError> {
        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::new("unterminated string literal", start)),
                Some((_, character)) if character == quote => return Ok(Token::String(text)),
                Some((_, '\\')) => match self.advance() {
                    Some((_, 'n')) => text.push('\n'),
                    Some((_, 't')) => text.push('\t'),
                    Some((_, 'r')) => text.push('\r'),
                    Some((_, '0')) => text.push('\0'),
                    Some((_, escaped)) => text.push(escaped),
                    None => return Err(ParseError::new("unterminated string literal", start)),
                },
                Some((_, character)) => text.push(character),
            }
        }
    }

    fn read_number(&mut self, start: usize) -> Result<Token, ParseError> {
        while self.peek().is_some_and(|character| character.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if lookahead.peek().is_some_and(|&(_, character)| character.is_ascii_digit()) {
                self.advance();
                while self.peek().is_some_and(|character| character.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while self.peek().is_some_and(|character| character.is_ascii_digit()) {
                self.advance();
            }
        }
        let end = self.offset();
        self.source[start..end]
            .parse()
            .map(Token::Number)
            .map_err(|_| ParseError::new(format!("invalid number '{}'", &self.source[start..end]), start))
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }
        let end = self.offset();
        Token::Identifier(self.source[start..end].to_string())
    }
}

pub(crate) fn is_identifier_start(character: char) -> bool {
    character.is_alphabetic() || character == '_' || character == '$'
}

fn is_identifier_part(character: char) -> bool {
    is_identifier_start(character) || character.is_ascii_digit()
}
