//! Micro-templates with ERB style delimiters.
//!
//! A template is compiled once into an instruction tree and can then be
//! rendered any number of times, from any thread.
//!
//! # Delimiters
//!
//! | Default     | Kind        | Effect                                          |
//! |-------------|-------------|-------------------------------------------------|
//! | `<%- e %>`  | escape      | appends `e` HTML-escaped (`null`/`undefined` → "") |
//! | `<%= e %>`  | interpolate | appends `e` as is (`null`/`undefined` → "")     |
//! | `<% s %>`   | evaluate    | runs statements `s`                             |
//!
//! # Expression language
//!
//! Expressions support number, string, boolean, `null` and `undefined`
//! literals, array literals, names, member access (`a.b`, `a[i]`), calls
//! (member calls bind the receiver), `!`, unary `-`, the binary operators
//! `* / % + - < <= > >= == != === !== && ||` and `c ? a : b`.
//!
//! Evaluate blocks hold `;`-separated statements:
//!
//! - `if e`, `else if e`, `else`, `end`
//! - `for value in e`, `for value, key in e`, closed by `end`
//! - `let name = e`
//! - `print(e, ...)`
//! - any expression, evaluated for its effect
//!
//! Blocks may span several delimiters, with literal text in between.
//!
//! # Examples
//!
//! ```rust
//! use lowbar::template::{Template, TemplateSettings};
//! use lowbar::{record, seq};
//!
//! let list = Template::compile(
//!     "<% for name in people %><li><%- name %></li><% end %>",
//!     &TemplateSettings::default(),
//! )
//! .unwrap();
//! let data = record! { "people" => seq!["moe", "curly & larry"] };
//! assert_eq!(list.render(&data).unwrap(), "<li>moe</li><li>curly &amp; larry</li>");
//! ```

mod error;
mod interpreter;
mod lexer;
mod parser;
mod program;
mod settings;

use std::rc::Rc;

pub use error::TemplateError;
pub use settings::TemplateSettings;

use self::interpreter::Interpreter;
use self::lexer::is_identifier_start;
use self::program::Node;
use crate::error::Result;
use crate::value::{Function, Value};

/// A compiled template.
///
/// Holds no [`Value`]s, so it is `Send + Sync` and can be shared freely.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
    variable: Option<String>,
    source: String,
}

impl Template {
    /// Compiles `text` with the given delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for malformed expressions, unbalanced
    /// blocks and invalid variable names.
    pub fn compile(text: &str, settings: &TemplateSettings) -> Result<Self, TemplateError> {
        let outcome = Self::build(text, settings);
        if let Err(error) = &outcome {
            tracing::warn!(offset = error.offset, message = %error.message, "template compilation failed");
        }
        outcome
    }

    fn build(text: &str, settings: &TemplateSettings) -> Result<Self, TemplateError> {
        if let Some(variable) = settings.variable()
            && !is_identifier(variable)
        {
            return Err(TemplateError {
                message: format!("variable '{variable}' is not a valid name"),
                offset: 0,
                generated_source: String::new(),
            });
        }
        let program = program::compile(text, settings)?;
        tracing::debug!(
            instructions = program.instructions,
            variable = settings.variable().unwrap_or("<own properties>"),
            "compiled template"
        );
        Ok(Self {
            nodes: program.nodes,
            variable: settings.variable().map(str::to_owned),
            source: program.listing,
        })
    }

    /// Renders the template against `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reference`](crate::Error::Reference) for unbound
    /// names, [`Error::Type`](crate::Error::Type) for calls of non-functions
    /// or property reads on `null`/`undefined`, and any error raised by a
    /// called function.
    pub fn render(&self, data: &Value) -> Result<String> {
        Interpreter::new(data, self.variable.as_deref()).render(&self.nodes)
    }

    /// A readable listing of the compiled program.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Wraps the template into a function of one data argument returning
    /// the rendered string.
    pub fn into_function(self) -> Function {
        let template = Rc::new(self);
        Function::named("template", move |_, arguments| {
            let data = arguments.first().cloned().unwrap_or_default();
            template.render(&data).map(Value::from)
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();
    characters.next().is_some_and(is_identifier_start)
        && characters.all(|character| is_identifier_start(character) || character.is_ascii_digit())
}

/// Compiles `text`, using the default delimiters when `settings` is `None`.
///
/// # Errors
///
/// Returns [`Error::Template`](crate::Error::Template) when compilation
/// fails.
///
/// # Examples
///
/// ```rust
/// use lowbar::template::template;
/// use lowbar::record;
///
/// let compiled = template("hello: <%= name %>", None).unwrap();
/// assert_eq!(compiled.render(&record! { "name" => "moe" }).unwrap(), "hello: moe");
/// ```
pub fn template(text: &str, settings: Option<&TemplateSettings>) -> Result<Template> {
    let compiled = match settings {
        Some(settings) => Template::compile(text, settings),
        None => Template::compile(text, &TemplateSettings::default()),
    };
    Ok(compiled?)
}

static_assertions::assert_impl_all!(Template: Send, Sync);
static_assertions::assert_impl_all!(TemplateSettings: Send, Sync);
