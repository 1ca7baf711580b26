use log::debug;
use thiserror::Error;

use crate::{
    ast::{Expr, Function, Literal, LogicalOp, Operator, Spanned, Token},
    lexer::{self, LexError, Position},
};

/// Limit on both the `and`/`or` depth of a parsed tree and the nesting of
/// parentheses.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found '{found}' at position {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: Position,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected a literal value at position {position}, found '{found}'")]
    ExpectedLiteral { found: Token, position: Position },

    #[error("{function} expects a string literal at position {position}, found '{found}'")]
    ExpectedString {
        function: Function,
        found: Token,
        position: Position,
    },

    #[error("filter nests deeper than {max} levels at position {position}", max = MAX_DEPTH)]
    TooDeep { position: Position },
}

/// Joins two operands under `op`, rejecting trees deeper than [`MAX_DEPTH`].
fn fold(
    op: LogicalOp,
    (left, left_depth): (Expr, usize),
    (right, right_depth): (Expr, usize),
    position: Position,
) -> Result<(Expr, usize), ParseError> {
    let depth = left_depth.max(right_depth) + 1;
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep { position });
    }
    Ok((Expr::logical(op, left, right), depth))
}

/// Recursive-descent parser over a token stream.
///
/// ```text
/// or_expr    := and_expr ('or' and_expr)*
/// and_expr   := comparison ('and' comparison)*
/// comparison := identifier compare_op literal
///             | identifier function string
///             | function '(' identifier ',' string ')'
///             | '(' or_expr ')'
/// ```
pub struct Parser {
    tokens: Vec<Spanned>,
    position: usize,
    nesting: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            position: 0,
            nesting: 0,
        }
    }

    fn current(&self) -> Option<&Spanned> {
        self.tokens.get(self.position)
    }

    fn current_token(&self) -> Option<&Token> {
        self.current().map(|s| &s.token)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(spanned) => ParseError::UnexpectedToken {
                expected,
                found: spanned.token.clone(),
                position: spanned.position,
            },
            None => ParseError::UnexpectedEnd { expected },
        }
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if self.current_token() != Some(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance();
        Ok(())
    }

    /// Position of the current token when it is the logical keyword `op`.
    fn logical_at(&self, op: LogicalOp) -> Option<Position> {
        self.current()
            .filter(|s| s.token == Token::Operator(Operator::Logical(op)))
            .map(|s| s.position)
    }

    fn parse_identifier(&mut self) -> Result<Expr, ParseError> {
        match self.current_token() {
            Some(Token::Identifier(name)) => {
                let expr = Expr::Identifier(name.clone());
                self.advance();
                Ok(expr)
            }
            _ => Err(self.unexpected("a field name")),
        }
    }

    fn parse_literal(&mut self) -> Result<Expr, ParseError> {
        let Some(spanned) = self.current() else {
            return Err(ParseError::UnexpectedEnd {
                expected: "a literal value",
            });
        };
        let literal = match &spanned.token {
            Token::String(s) => Literal::String(s.clone()),
            Token::Integer(n) => Literal::Integer(*n),
            Token::Float(n) => Literal::Float(*n),
            Token::Boolean(b) => Literal::Boolean(*b),
            other => {
                return Err(ParseError::ExpectedLiteral {
                    found: other.clone(),
                    position: spanned.position,
                });
            }
        };
        self.advance();
        Ok(Expr::Literal(literal))
    }

    fn parse_string_argument(&mut self, function: Function) -> Result<Expr, ParseError> {
        match self.current() {
            Some(Spanned {
                token: Token::String(s),
                ..
            }) => {
                let expr = Expr::string(s.clone());
                self.advance();
                Ok(expr)
            }
            Some(spanned) => Err(ParseError::ExpectedString {
                function,
                found: spanned.token.clone(),
                position: spanned.position,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: "a string literal",
            }),
        }
    }

    /// `startswith(Name, 'Jo')`
    fn parse_call(&mut self, function: Function) -> Result<Expr, ParseError> {
        self.advance(); // function keyword
        self.expect(Token::LParen, "'('")?;
        let field = self.parse_identifier()?;
        self.expect(Token::Comma, "','")?;
        let argument = self.parse_string_argument(function)?;
        self.expect(Token::RParen, "')'")?;
        Ok(Expr::call(function, field, argument))
    }

    /// `Name eq 'john'` or the infix form `Name startswith 'Jo'`
    fn parse_field_predicate(&mut self) -> Result<Expr, ParseError> {
        let field = self.parse_identifier()?;

        match self.current_token() {
            Some(Token::Operator(Operator::Compare(op))) => {
                let op = *op;
                self.advance();
                let value = self.parse_literal()?;
                Ok(Expr::compare(op, field, value))
            }
            Some(Token::Function(function)) => {
                let function = *function;
                self.advance();
                let argument = self.parse_string_argument(function)?;
                Ok(Expr::call(function, field, argument))
            }
            _ => Err(self.unexpected("a comparison operator")),
        }
    }

    /// Parses one operand of a logical chain along with the depth of its tree.
    fn parse_comparison(&mut self) -> Result<(Expr, usize), ParseError> {
        match self.current() {
            Some(Spanned {
                token: Token::LParen,
                position,
            }) => {
                if self.nesting >= MAX_DEPTH {
                    return Err(ParseError::TooDeep {
                        position: *position,
                    });
                }
                self.nesting += 1;
                self.advance();
                let inner = self.parse_or()?;
                self.expect(Token::RParen, "')'")?;
                self.nesting -= 1;
                Ok(inner)
            }
            Some(Spanned {
                token: Token::Function(function),
                ..
            }) => {
                let function = *function;
                Ok((self.parse_call(function)?, 0))
            }
            Some(Spanned {
                token: Token::Identifier(_),
                ..
            }) => Ok((self.parse_field_predicate()?, 0)),
            _ => Err(self.unexpected("a comparison, function call or '('")),
        }
    }

    fn parse_and(&mut self) -> Result<(Expr, usize), ParseError> {
        let mut left = self.parse_comparison()?;

        while let Some(position) = self.logical_at(LogicalOp::And) {
            self.advance();
            let right = self.parse_comparison()?;
            left = fold(LogicalOp::And, left, right, position)?;
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<(Expr, usize), ParseError> {
        let mut left = self.parse_and()?;

        while let Some(position) = self.logical_at(LogicalOp::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = fold(LogicalOp::Or, left, right, position)?;
        }
        Ok(left)
    }

    /// Parses the whole token stream as one filter expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::Lex(LexError::EmptyInput));
        }
        let (expr, _) = self.parse_or()?;
        if self.current().is_some() {
            return Err(self.unexpected("end of input"));
        }
        debug!("parsed filter: {}", expr);
        Ok(expr)
    }
}

/// Builds the operator tree for a token stream.
pub fn parse(tokens: Vec<Spanned>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses a filter expression.
pub fn parse_str(input: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(input)?;
    parse(tokens)
}
