//! Compiles template text into a tree of instructions.

use std::fmt::Write as _;

use regex::Regex;

use super::TemplateError;
use super::parser::{Expr, MAX_DEPTH, ParseError, Parser, Statement};
use super::settings::TemplateSettings;

/// Never matches; stands in for a disabled delimiter.
const NO_MATCH: &str = "(.)^";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(Box<str>),
    Escape(Expr),
    Interpolate(Expr),
    Let {
        name: String,
        value: Expr,
    },
    Print(Vec<Expr>),
    Expression(Expr),
    If {
        branches: Vec<(Expr, Vec<Node>)>,
        otherwise: Vec<Node>,
    },
    For {
        value: String,
        key: Option<String>,
        iterable: Expr,
        body: Vec<Node>,
    },
}

enum BlockKind {
    Root,
    If {
        branches: Vec<(Expr, Vec<Node>)>,
        condition: Option<Expr>,
    },
    For {
        value: String,
        key: Option<String>,
        iterable: Expr,
    },
}

struct Block {
    kind: BlockKind,
    nodes: Vec<Node>,
}

/// Collects instructions into nested blocks while writing the listing.
struct Builder {
    blocks: Vec<Block>,
    listing: String,
    instructions: usize,
}

impl Builder {
    fn new(variable: Option<&str>) -> Self {
        let mut listing = String::new();
        match variable {
            Some(name) => {
                let _ = writeln!(listing, "bind {name} = data");
            }
            None => listing.push_str("bind own properties of data\n"),
        }
        Self {
            blocks: vec![Block {
                kind: BlockKind::Root,
                nodes: Vec::new(),
            }],
            listing,
            instructions: 0,
        }
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let depth = self.blocks.len() - 1;
        for _ in 0..depth {
            self.listing.push_str("  ");
        }
        let _ = self.listing.write_fmt(text);
        self.listing.push('\n');
    }

    fn push(&mut self, node: Node) {
        self.instructions += 1;
        if let Some(block) = self.blocks.last_mut() {
            block.nodes.push(node);
        }
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.line(format_args!("append \"{}\"", escape_literal(text)));
        self.push(Node::Text(text.into()));
    }

    fn escape(&mut self, expression: Expr) {
        self.line(format_args!("append escape({expression})"));
        self.push(Node::Escape(expression));
    }

    fn interpolate(&mut self, expression: Expr) {
        self.line(format_args!("append {expression}"));
        self.push(Node::Interpolate(expression));
    }

    fn statement(&mut self, statement: Statement) -> Result<(), String> {
        match statement {
            Statement::If(condition) => {
                self.line(format_args!("if {condition}"));
                self.open(BlockKind::If {
                    branches: Vec::new(),
                    condition: Some(condition),
                })?;
            }
            Statement::ElseIf(next) => {
                self.next_branch(Some(next), "else if")?;
            }
            Statement::Else => self.next_branch(None, "else")?,
            Statement::End => self.close()?,
            Statement::For {
                value,
                key,
                iterable,
            } => {
                match &key {
                    Some(key) => self.line(format_args!("for {value}, {key} in {iterable}")),
                    None => self.line(format_args!("for {value} in {iterable}")),
                }
                self.open(BlockKind::For {
                    value,
                    key,
                    iterable,
                })?;
            }
            Statement::Let { name, value } => {
                self.line(format_args!("let {name} = {value}"));
                self.push(Node::Let { name, value });
            }
            Statement::Print(arguments) => {
                let listed: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                self.line(format_args!("print({})", listed.join(", ")));
                self.push(Node::Print(arguments));
            }
            Statement::Expression(expression) => {
                self.line(format_args!("{expression}"));
                self.push(Node::Expression(expression));
            }
        }
        Ok(())
    }

    fn open(&mut self, kind: BlockKind) -> Result<(), String> {
        if self.blocks.len() > MAX_DEPTH {
            return Err("blocks nested too deeply".to_string());
        }
        self.blocks.push(Block {
            kind,
            nodes: Vec::new(),
        });
        Ok(())
    }

    fn next_branch(&mut self, next: Option<Expr>, keyword: &str) -> Result<(), String> {
        let label = match &next {
            Some(expression) => format!("else if {expression}"),
            None => "else".to_string(),
        };
        let Some(Block {
            kind: BlockKind::If {
                branches,
                condition,
            },
            nodes,
        }) = self.blocks.last_mut()
        else {
            return Err(format!("'{keyword}' outside of an 'if' block"));
        };
        let Some(finished) = condition.take() else {
            return Err(format!("'{keyword}' after 'else'"));
        };
        branches.push((finished, std::mem::take(nodes)));
        *condition = next;

        let depth = self.blocks.len() - 2;
        self.listing.push_str(&"  ".repeat(depth));
        self.listing.push_str(&label);
        self.listing.push('\n');
        Ok(())
    }

    fn close(&mut self) -> Result<(), String> {
        const UNOPENED: &str = "'end' without an open block";
        if self.blocks.len() < 2 {
            return Err(UNOPENED.to_string());
        }
        let Some(Block { kind, nodes }) = self.blocks.pop() else {
            return Err(UNOPENED.to_string());
        };
        let node = match kind {
            BlockKind::Root => return Err(UNOPENED.to_string()),
            BlockKind::If {
                mut branches,
                condition: Some(condition),
            } => {
                branches.push((condition, nodes));
                Node::If {
                    branches,
                    otherwise: Vec::new(),
                }
            }
            BlockKind::If {
                branches,
                condition: None,
            } => Node::If {
                branches,
                otherwise: nodes,
            },
            BlockKind::For {
                value,
                key,
                iterable,
            } => Node::For {
                value,
                key,
                iterable,
                body: nodes,
            },
        };
        self.line(format_args!("end"));
        self.push(node);
        Ok(())
    }

    fn finish(mut self) -> Result<(Vec<Node>, String, usize), String> {
        if self.blocks.len() > 1 {
            let open = match self.blocks.last().map(|block| &block.kind) {
                Some(BlockKind::For { .. }) => "for",
                _ => "if",
            };
            return Err(format!("unclosed '{open}' block"));
        }
        let nodes = self.blocks.pop().map(|block| block.nodes).unwrap_or_default();
        Ok((nodes, self.listing, self.instructions))
    }
}

/// Escapes characters that would end or break a quoted literal.
fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A compiled program together with its listing.
pub(crate) struct Program {
    pub(crate) nodes: Vec<Node>,
    pub(crate) listing: String,
    pub(crate) instructions: usize,
}

fn combined_pattern(settings: &TemplateSettings) -> Result<Regex, TemplateError> {
    let source = |pattern: Option<&Regex>| pattern.map_or(NO_MATCH, Regex::as_str).to_owned();
    let pattern = format!(
        "{}|{}|{}|$",
        source(settings.escape()),
        source(settings.interpolate()),
        source(settings.evaluate())
    );
    Regex::new(&pattern).map_err(|error| TemplateError {
        message: format!("invalid delimiters: {error}"),
        offset: 0,
        generated_source: String::new(),
    })
}

/// Scans `text` once, left to right, turning literal runs and delimited
/// fragments into instructions.
pub(crate) fn compile(text: &str, settings: &TemplateSettings) -> Result<Program, TemplateError> {
    let matcher = combined_pattern(settings)?;
    let mut builder = Builder::new(settings.variable());
    let fail = |builder: &Builder, message: String, offset: usize| TemplateError {
        message,
        offset,
        generated_source: builder.listing.clone(),
    };

    let mut index = 0;
    for captures in matcher.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        builder.text(&text[index..whole.start()]);
        index = whole.end();

        if let Some(fragment) = captures.get(1) {
            let expression = Parser::parse_expression_str(fragment.as_str())
                .map_err(|error| located(&builder, error, fragment.start()))?;
            builder.escape(expression);
        } else if let Some(fragment) = captures.get(2) {
            let expression = Parser::parse_expression_str(fragment.as_str())
                .map_err(|error| located(&builder, error, fragment.start()))?;
            builder.interpolate(expression);
        } else if let Some(fragment) = captures.get(3) {
            let statements = Parser::parse_statements_str(fragment.as_str())
                .map_err(|error| located(&builder, error, fragment.start()))?;
            for (statement, offset) in statements {
                builder
                    .statement(statement)
                    .map_err(|message| fail(&builder, message, fragment.start() + offset))?;
            }
        }
    }
    builder.text(&text[index..]);

    let end = text.len();
    let listing = builder.listing.clone();
    let (nodes, listing, instructions) = builder.finish().map_err(|message| TemplateError {
        message,
        offset: end,
        generated_source: listing,
    })?;
    Ok(Program {
        nodes,
        listing,
        instructions,
    })
}

fn located(builder: &Builder, error: ParseError, base: usize) -> TemplateError {
    TemplateError {
        message: error.message,
        offset: base + error.offset,
        generated_source: builder.listing.clone(),
    }
}
