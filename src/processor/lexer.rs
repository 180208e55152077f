//! Hand-written lexer for SVG path data.
//!
//! The lexer only splits the raw `d` string into command letters and
//! numbers; which letters are valid and how many numbers each one takes
//! is decided by the parser.
//
//  Lexical items (informal):
//
//      Command   ::= any alphabetic character
//      Number    ::= [+-]? ( digit+ ( '.' digit* )? | '.' digit+ ) ( [eE] [+-]? digit+ )?
//      Separator ::= whitespace | ','          (discarded, optional)
//
//  Numbers are greedy but stop where a new number must begin, so the
//  compact encodings `10-5` and `.5.5` each yield two numbers.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// A token plus the slice of source it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    pub position: usize,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == ',' {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn consume_digits(&mut self) -> usize {
        let mut n = 0;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.chars.next();
            n += 1;
        }
        n
    }

    /// Reads the single next non-separator character. Arc flags are one
    /// character wide and may be packed together (`a1 1 0 11 5 5`), so
    /// they cannot go through the number lexer.
    pub fn next_raw(&mut self) -> Option<(usize, char)> {
        self.skip_separators();
        self.chars.next()
    }

    fn read_number(&mut self, start: usize) -> Result<Lexeme<'a>, ParseError> {
        if matches!(self.peek_char(), Some('+' | '-')) {
            self.chars.next();
        }

        let mut digits = self.consume_digits();
        if self.peek_char() == Some('.') {
            self.chars.next();
            digits += self.consume_digits();
        }

        let mut well_formed = digits > 0;
        if well_formed && matches!(self.peek_char(), Some('e' | 'E')) {
            self.chars.next();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.chars.next();
            }
            well_formed = self.consume_digits() > 0;
        }

        let end = self.offset();
        let text = &self.src[start..end];
        let malformed = || ParseError::MalformedNumber {
            token: text.to_string(),
            position: start,
        };
        if !well_formed {
            return Err(malformed());
        }
        let value: f64 = text.parse().map_err(|_| malformed())?;
        // overflowing exponents parse to infinity
        if !value.is_finite() {
            return Err(malformed());
        }

        Ok(Lexeme {
            token: Token::Number(value),
            text,
            position: start,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Lexeme<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();

        let (position, ch) = *self.chars.peek()?;

        let lexeme = match ch {
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.read_number(position),
            c if c.is_alphabetic() => {
                self.chars.next();
                Ok(Lexeme {
                    token: Token::Command(c),
                    text: &self.src[position..position + c.len_utf8()],
                    position,
                })
            }
            c => {
                self.chars.next();
                Err(ParseError::UnknownCommand {
                    letter: c,
                    position,
                })
            }
        };

        Some(lexeme)
    }
}
