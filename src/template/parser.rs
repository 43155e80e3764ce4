//! Recursive-descent parser for expressions and block statements.

use std::fmt;

use super::lexer::{Lexer, Token};

/// A parse failure with the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseError {
    pub(crate) message: String,
    pub(crate) offset: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// A constant written in a template expression.
///
/// Kept separate from [`Value`](crate::Value) so compiled templates stay
/// shareable across threads.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Box<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOperator {
    Not,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOperator {
    Multiply,
    Divide,
    Remainder,
    Add,
    Subtract,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    And,
    Or,
}

impl BinaryOperator {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Literal),
    Array(Vec<Expr>),
    Name(String),
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternative: Box<Expr>,
    },
}

/// One statement of an evaluate block.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    If(Expr),
    ElseIf(Expr),
    Else,
    End,
    For {
        value: String,
        key: Option<String>,
        iterable: Expr,
    },
    Let {
        name: String,
        value: Expr,
    },
    Print(Vec<Expr>),
    Expression(Expr),
}

/// Words that open statements and cannot be used as variable names.
const RESERVED: [&str; 10] = [
    "if", "else", "end", "for", "in", "let", "true", "false", "null", "undefined",
];

/// Deepest expression tree the parser builds. Evaluation and listing
/// recurse over the tree, so this bounds their stack use too.
pub(crate) const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    offset: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let (current, offset) = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            offset,
            depth: 0,
        })
    }

    /// Parses a complete expression; trailing input is an error.
    pub(crate) fn parse_expression_str(source: &str) -> Result<Expr, ParseError> {
        let mut parser = Parser::new(source)?;
        let expression = parser.parse_expression()?;
        parser.expect_end()?;
        Ok(expression)
    }

    /// Parses `;`-separated statements. Empty statements are skipped.
    pub(crate) fn parse_statements_str(source: &str) -> Result<Vec<(Statement, usize)>, ParseError> {
        let mut parser = Parser::new(source)?;
        let mut statements = Vec::new();
        loop {
            while parser.current == Token::Semicolon {
                parser.advance()?;
            }
            if parser.current == Token::Eof {
                return Ok(statements);
            }
            let offset = parser.offset;
            statements.push((parser.parse_statement()?, offset));
            match parser.current {
                Token::Semicolon | Token::Eof => {}
                _ => return Err(parser.unexpected("';'")),
            }
        }
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let (next, offset) = self.lexer.next_token()?;
        self.offset = offset;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Counts one more level of tree depth.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::new("expression nested too deeply", self.offset));
        }
        self.depth += 1;
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(format!("expected {expected}, found {}", self.current), self.offset)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{expected}'")))
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.current == Token::Eof {
            Ok(())
        } else {
            Err(self.unexpected("end of expression"))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match &self.current {
            Token::Identifier(name) if !RESERVED.contains(&name.as_str()) => {
                let name = name.clone();
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.unexpected("a variable name")),
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.current.is_identifier("if") {
            self.advance()?;
            return Ok(Statement::If(self.parse_expression()?));
        }
        if self.current.is_identifier("else") {
            self.advance()?;
            if self.current.is_identifier("if") {
                self.advance()?;
                return Ok(Statement::ElseIf(self.parse_expression()?));
            }
            return Ok(Statement::Else);
        }
        if self.current.is_identifier("end") {
            self.advance()?;
            return Ok(Statement::End);
        }
        if self.current.is_identifier("for") {
            self.advance()?;
            let value = self.expect_name()?;
            let key = if self.current == Token::Comma {
                self.advance()?;
                Some(self.expect_name()?)
            } else {
                None
            };
            if !self.current.is_identifier("in") {
                return Err(self.unexpected("'in'"));
            }
            self.advance()?;
            let iterable = self.parse_expression()?;
            return Ok(Statement::For {
                value,
                key,
                iterable,
            });
        }
        if self.current.is_identifier("let") {
            self.advance()?;
            let name = self.expect_name()?;
            self.expect(&Token::Assign)?;
            let value = self.parse_expression()?;
            return Ok(Statement::Let { name, value });
        }
        if self.current.is_identifier("print") {
            self.advance()?;
            self.expect(&Token::LParen)?;
            let arguments = self.parse_list(&Token::RParen)?;
            return Ok(Statement::Print(arguments));
        }
        Ok(Statement::Expression(self.parse_expression()?))
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.descend()?;
        let expression = self.parse_conditional();
        self.depth -= 1;
        expression
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let test = self.parse_binary(0)?;
        if self.current != Token::Question {
            return Ok(test);
        }
        self.advance()?;
        let consequent = self.parse_expression()?;
        self.expect(&Token::Colon)?;
        let alternative = self.parse_expression()?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
        })
    }

    /// Precedence climbing over the binary operator levels, loosest first.
    fn parse_binary(&mut self, level: usize) -> Result<Expr, ParseError> {
        const LEVELS: usize = 6;
        if level == LEVELS {
            return self.parse_unary();
        }
        let mut left = self.parse_binary(level + 1)?;
        let mut wraps = 0;
        while let Some(operator) = binary_operator(&self.current, level) {
            self.descend()?;
            wraps += 1;
            self.advance()?;
            let right = self.parse_binary(level + 1)?;
            left = Expr::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.depth -= wraps;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let mut operators = Vec::new();
        loop {
            let operator = match self.current {
                Token::Bang => UnaryOperator::Not,
                Token::Minus => UnaryOperator::Negate,
                _ => break,
            };
            self.descend()?;
            operators.push(operator);
            self.advance()?;
        }
        let operand = self.parse_postfix()?;
        self.depth -= operators.len();
        Ok(operators
            .into_iter()
            .rev()
            .fold(operand, |operand, operator| Expr::Unary {
                operator,
                operand: Box::new(operand),
            }))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expression = self.parse_primary()?;
        let mut wraps = 0;
        loop {
            if matches!(self.current, Token::Dot | Token::LBracket | Token::LParen) {
                self.descend()?;
                wraps += 1;
            }
            expression = match self.current {
                Token::Dot => {
                    self.advance()?;
                    let offset = self.offset;
                    let Token::Identifier(name) = self.advance()? else {
                        return Err(ParseError::new("expected a property name after '.'", offset));
                    };
                    Expr::Member {
                        object: Box::new(expression),
                        property: Box::new(Expr::Literal(Literal::String(name.into()))),
                    }
                }
                Token::LBracket => {
                    self.advance()?;
                    let property = self.parse_expression()?;
                    self.expect(&Token::RBracket)?;
                    Expr::Member {
                        object: Box::new(expression),
                        property: Box::new(property),
                    }
                }
                Token::LParen => {
                    self.advance()?;
                    let arguments = self.parse_list(&Token::RParen)?;
                    Expr::Call {
                        callee: Box::new(expression),
                        arguments,
                    }
                }
                _ => {
                    self.depth -= wraps;
                    return Ok(expression);
                }
            };
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let offset = self.offset;
        match self.advance()? {
            Token::Number(number) => Ok(Expr::Literal(Literal::Number(number))),
            Token::String(text) => Ok(Expr::Literal(Literal::String(text.into()))),
            Token::LParen => {
                let expression = self.parse_expression()?;
                self.expect(&Token::RParen)?;
                Ok(expression)
            }
            Token::LBracket => Ok(Expr::Array(self.parse_list(&Token::RBracket)?)),
            Token::Identifier(name) => match name.as_str() {
                "true" => Ok(Expr::Literal(Literal::Bool(true))),
                "false" => Ok(Expr::Literal(Literal::Bool(false))),
                "null" => Ok(Expr::Literal(Literal::Null)),
                "undefined" => Ok(Expr::Literal(Literal::Undefined)),
                reserved if RESERVED.contains(&reserved) => Err(ParseError::new(
                    format!("unexpected keyword '{reserved}'"),
                    offset,
                )),
                _ => Ok(Expr::Name(name)),
            },
            other => Err(ParseError::new(
                format!("expected an expression, found {other}"),
                offset,
            )),
        }
    }

    /// Comma separated expressions up to and including `close`.
    fn parse_list(&mut self, close: &Token) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while &self.current != close {
            items.push(self.parse_expression()?);
            if self.current == Token::Comma {
                self.advance()?;
            } else if &self.current != close {
                return Err(self.unexpected(&format!("',' or '{close}'")));
            }
        }
        self.advance()?;
        Ok(items)
    }
}

fn binary_operator(token: &Token, level: usize) -> Option<BinaryOperator> {
    let operator = match (level, token) {
        (0, Token::Or) => BinaryOperator::Or,
        (1, Token::And) => BinaryOperator::And,
        (2, Token::Equal) => BinaryOperator::Equal,
        (2, Token::NotEqual) => BinaryOperator::NotEqual,
        (2, Token::StrictEqual) => BinaryOperator::StrictEqual,
        (2, Token::StrictNotEqual) => BinaryOperator::StrictNotEqual,
        (3, Token::Less) => BinaryOperator::Less,
        (3, Token::LessEqual) => BinaryOperator::LessEqual,
        (3, Token::Greater) => BinaryOperator::Greater,
        (3, Token::GreaterEqual) => BinaryOperator::GreaterEqual,
        (4, Token::Plus) => BinaryOperator::Add,
        (4, Token::Minus) => BinaryOperator::Subtract,
        (5, Token::Star) => BinaryOperator::Multiply,
        (5, Token::Slash) => BinaryOperator::Divide,
        (5, Token::Percent) => BinaryOperator::Remainder,
        _ => return None,
    };
    Some(operator)
}

// ============================================================================
// Listing
// ============================================================================

impl fmt::Display for Literal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::String(text) => write!(formatter, "{text:?}"),
        }
    }
}

fn write_list(formatter: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            formatter.write_str(", ")?;
        }
        write!(formatter, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(formatter, "{literal}"),
            Self::Array(items) => {
                formatter.write_str("[")?;
                write_list(formatter, items)?;
                formatter.write_str("]")
            }
            Self::Name(name) => formatter.write_str(name),
            Self::Member { object, property } => match property.as_ref() {
                Self::Literal(Literal::String(name)) => write!(formatter, "{object}.{name}"),
                property => write!(formatter, "{object}[{property}]"),
            },
            Self::Call { callee, arguments } => {
                write!(formatter, "{callee}(")?;
                write_list(formatter, arguments)?;
                formatter.write_str(")")
            }
            Self::Unary { operator, operand } => match operator {
                UnaryOperator::Not => write!(formatter, "!{operand}"),
                UnaryOperator::Negate => write!(formatter, "-{operand}"),
            },
            Self::Binary {
                operator,
                left,
                right,
            } => write!(formatter, "({left} {} {right})", operator.symbol()),
            Self::Conditional {
                test,
                consequent,
                alternative,
            } => write!(formatter, "({test} ? {consequent} : {alternative})"),
        }
    }
}
