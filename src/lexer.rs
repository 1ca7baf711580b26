use log::trace;
use thiserror::Error;

use crate::ast::{Function, Operator, Spanned, Token};

/// 0-based character offset into the filter text.
pub type Position = usize;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("empty filter expression")]
    EmptyInput,

    #[error("unterminated string literal starting at position {0}")]
    UnterminatedString(Position),

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: Position },
}

impl LexError {
    /// Where the error was detected, if it points at a character.
    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::EmptyInput => None,
            LexError::UnterminatedString(position)
            | LexError::UnexpectedCharacter { position, .. }
            | LexError::InvalidNumber { position, .. } => Some(*position),
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || matches!(ch, '_' | '.' | '/') {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a single-quoted literal. A doubled quote (`''`) stands for one
    /// quote character.
    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            if ch == '\'' {
                if self.peek_char(1) == Some('\'') {
                    result.push('\'');
                    self.advance();
                    self.advance();
                    continue;
                }
                self.advance();
                return Ok(result);
            }
            result.push(ch);
            self.advance();
        }

        Err(LexError::UnterminatedString(start))
    }

    fn read_digits(&mut self, number: &mut String) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        self.read_digits(&mut number);

        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            number.push('.');
            self.advance();
            self.read_digits(&mut number);
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let digits_at = match self.peek_char(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digits_at {
                    if let Some(ch) = self.current_char() {
                        number.push(ch);
                    }
                    self.advance();
                }
                self.read_digits(&mut number);
            }
        }

        // A number running straight into a word (`12ab`) is not a number.
        if let Some(ch) = self.current_char()
            && (ch.is_alphabetic() || ch == '_')
        {
            number.push(ch);
            return Err(LexError::InvalidNumber {
                text: number,
                position: start,
            });
        }

        let invalid = |text: String| LexError::InvalidNumber {
            text,
            position: start,
        };

        if is_float {
            match number.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Token::Float(n)),
                _ => Err(invalid(number)),
            }
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| invalid(number))
        }
    }

    fn word_token(word: String) -> Token {
        if let Some(op) = Operator::from_keyword(&word) {
            return Token::Operator(op);
        }
        if let Some(func) = Function::from_keyword(&word) {
            return Token::Function(func);
        }
        match word.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            _ => Token::Identifier(word),
        }
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Spanned>, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let token = match self.current_char() {
            None => return Ok(None),
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('\'') => Token::String(self.read_string()?),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let word = self.read_identifier();
                Self::word_token(word)
            }
            Some(ch) => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: self.position,
                });
            }
        };

        trace!("token {:?} at {}", token, start);
        Ok(Some(Spanned::new(token, start)))
    }

    /// Consumes the lexer and returns every token in order.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        if tokens.is_empty() {
            return Err(LexError::EmptyInput);
        }
        Ok(tokens)
    }
}

/// Splits a filter expression into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_keywords() {
    let tokens: Vec<Token> = tokenize("eq and or contains true false")
        .unwrap()
        .into_iter()
        .map(|s| s.token)
        .collect();
    assert_eq!(
        tokens,
        vec![
            Token::Operator(Operator::from_keyword("eq").unwrap()),
            Token::Operator(Operator::from_keyword("and").unwrap()),
            Token::Operator(Operator::from_keyword("or").unwrap()),
            Token::Function(Function::Contains),
            Token::Boolean(true),
            Token::Boolean(false),
        ]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize("Name eq 'x'").unwrap();
    let positions: Vec<usize> = tokens.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 5, 8]);
}
