//! Runs a compiled program against a data value.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::parser::{BinaryOperator, Expr, Literal, UnaryOperator};
use super::program::Node;
use crate::collection::traversal::Traversal;
use crate::error::{Error, Result};
use crate::utility::escape;
use crate::value::Value;

type Frame = HashMap<String, Value>;

pub(crate) struct Interpreter<'a> {
    data: &'a Value,
    variable: Option<&'a str>,
    frames: Vec<Frame>,
    output: String,
}

impl<'a> Interpreter<'a> {
    pub(crate) fn new(data: &'a Value, variable: Option<&'a str>) -> Self {
        Self {
            data,
            variable,
            frames: vec![Frame::new()],
            output: String::new(),
        }
    }

    pub(crate) fn render(mut self, nodes: &[Node]) -> Result<String> {
        self.execute(nodes)?;
        Ok(self.output)
    }

    fn execute(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.execute_node(node)?;
        }
        Ok(())
    }

    fn execute_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Text(text) => self.output.push_str(text),
            Node::Escape(expression) => {
                let value = self.evaluate(expression)?;
                if !value.is_nil() {
                    self.output.push_str(&escape(&value.to_string()));
                }
            }
            Node::Interpolate(expression) => {
                let value = self.evaluate(expression)?;
                self.append(&value);
            }
            Node::Let { name, value } => {
                let value = self.evaluate(value)?;
                if let Some(frame) = self.frames.last_mut() {
                    frame.insert(name.clone(), value);
                }
            }
            Node::Print(arguments) => {
                for argument in arguments {
                    let value = self.evaluate(argument)?;
                    self.append(&value);
                }
            }
            Node::Expression(expression) => {
                self.evaluate(expression)?;
            }
            Node::If {
                branches,
                otherwise,
            } => {
                for (condition, body) in branches {
                    if self.evaluate(condition)?.is_truthy() {
                        return self.execute(body);
                    }
                }
                self.execute(otherwise)?;
            }
            Node::For {
                value,
                key,
                iterable,
                body,
            } => {
                let collection = self.evaluate(iterable)?;
                let traversal = Traversal::of(&collection);
                for (element, index) in traversal.entries(&collection) {
                    let mut frame = Frame::new();
                    frame.insert(value.clone(), element);
                    if let Some(key) = key {
                        frame.insert(key.clone(), index);
                    }
                    self.frames.push(frame);
                    let outcome = self.execute(body);
                    self.frames.pop();
                    outcome?;
                }
            }
        }
        Ok(())
    }

    /// Appends the string form of `value`; `null` and `undefined` append
    /// nothing.
    fn append(&mut self, value: &Value) {
        if !value.is_nil() {
            self.output.push_str(&value.to_string());
        }
    }

    fn lookup(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.frames.iter().rev().find_map(|frame| frame.get(name)) {
            return Ok(value.clone());
        }
        match self.variable {
            Some(variable) if variable == name => return Ok(self.data.clone()),
            None if self.data.has_own(name) => return Ok(self.data.get(name)),
            _ => {}
        }
        Err(Error::Reference {
            name: name.to_string(),
        })
    }

    fn evaluate(&self, expression: &Expr) -> Result<Value> {
        match expression {
            Expr::Literal(literal) => Ok(literal_value(literal)),
            Expr::Array(items) => items.iter().map(|item| self.evaluate(item)).collect(),
            Expr::Name(name) => self.lookup(name),
            Expr::Member { object, property } => {
                let (_, value) = self.member(object, property)?;
                Ok(value)
            }
            Expr::Call { callee, arguments } => {
                let (receiver, function) = match callee.as_ref() {
                    Expr::Member { object, property } => self.member(object, property)?,
                    other => (Value::Undefined, self.evaluate(other)?),
                };
                let Value::Function(function) = function else {
                    return Err(Error::Type {
                        message: format!("{callee} is not a function"),
                    });
                };
                let arguments = arguments
                    .iter()
                    .map(|argument| self.evaluate(argument))
                    .collect::<Result<Vec<_>>>()?;
                function.call(&receiver, &arguments)
            }
            Expr::Unary { operator, operand } => {
                let operand = self.evaluate(operand)?;
                Ok(match operator {
                    UnaryOperator::Not => Value::from(!operand.is_truthy()),
                    UnaryOperator::Negate => Value::from(-operand.to_number()),
                })
            }
            Expr::Binary {
                operator: BinaryOperator::And,
                left,
                right,
            } => {
                let left = self.evaluate(left)?;
                if left.is_truthy() { self.evaluate(right) } else { Ok(left) }
            }
            Expr::Binary {
                operator: BinaryOperator::Or,
                left,
                right,
            } => {
                let left = self.evaluate(left)?;
                if left.is_truthy() { Ok(left) } else { self.evaluate(right) }
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => Ok(binary(*operator, &self.evaluate(left)?, &self.evaluate(right)?)),
            Expr::Conditional {
                test,
                consequent,
                alternative,
            } => {
                if self.evaluate(test)?.is_truthy() {
                    self.evaluate(consequent)
                } else {
                    self.evaluate(alternative)
                }
            }
        }
    }

    /// Evaluates `object[property]`, returning the object as well so calls
    /// can use it as receiver.
    fn member(&self, object: &Expr, property: &Expr) -> Result<(Value, Value)> {
        let target = self.evaluate(object)?;
        let key = self.evaluate(property)?.to_property_key();
        if target.is_nil() {
            return Err(Error::Type {
                message: format!("cannot read property '{key}' of {target}"),
            });
        }
        let value = target.get(&key);
        Ok((target, value))
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Undefined => Value::Undefined,
        Literal::Null => Value::Null,
        Literal::Bool(flag) => Value::from(*flag),
        Literal::Number(number) => Value::from(*number),
        Literal::String(text) => Value::from(text.as_ref()),
    }
}

/// Whether `+` concatenates rather than adds.
const fn concatenates(value: &Value) -> bool {
    !matches!(
        value,
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::Symbol(_)
    )
}

fn binary(operator: BinaryOperator, left: &Value, right: &Value) -> Value {
    let ordering = || left.loose_compare(right);
    match operator {
        BinaryOperator::Add if concatenates(left) || concatenates(right) => {
            Value::from(format!("{left}{right}"))
        }
        BinaryOperator::Add => Value::from(left.to_number() + right.to_number()),
        BinaryOperator::Subtract => Value::from(left.to_number() - right.to_number()),
        BinaryOperator::Multiply => Value::from(left.to_number() * right.to_number()),
        BinaryOperator::Divide => Value::from(left.to_number() / right.to_number()),
        BinaryOperator::Remainder => Value::from(left.to_number() % right.to_number()),
        BinaryOperator::Less => Value::from(ordering() == Some(Ordering::Less)),
        BinaryOperator::LessEqual => {
            Value::from(matches!(ordering(), Some(Ordering::Less | Ordering::Equal)))
        }
        BinaryOperator::Greater => Value::from(ordering() == Some(Ordering::Greater)),
        BinaryOperator::GreaterEqual => {
            Value::from(matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)))
        }
        BinaryOperator::Equal => Value::from(left.loose_equals(right)),
        BinaryOperator::NotEqual => Value::from(!left.loose_equals(right)),
        BinaryOperator::StrictEqual => Value::from(left.strict_equals(right)),
        BinaryOperator::StrictNotEqual => Value::from(!left.strict_equals(right)),
        BinaryOperator::And | BinaryOperator::Or => Value::Undefined,
    }
}
