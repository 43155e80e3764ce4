use regex::Regex;

/// Delimiter configuration for [`Template::compile`](super::Template::compile).
///
/// Each delimiter is a regular expression whose first capture group holds
/// the fragment. A delimiter set to `None` never matches. Without a
/// `variable`, the data's own properties are bound as names; with one, the
/// data is reachable only through that name.
///
/// # Examples
///
/// ```rust
/// use lowbar::template::TemplateSettings;
/// use regex::Regex;
///
/// let mustache = TemplateSettings::default()
///     .with_interpolate(Regex::new(r"\{\{(.+?)\}\}").unwrap())
///     .without_escape()
///     .with_variable("data");
/// assert!(mustache.escape().is_none());
/// assert_eq!(mustache.variable(), Some("data"));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateSettings {
    escape: Option<Regex>,
    interpolate: Option<Regex>,
    evaluate: Option<Regex>,
    variable: Option<String>,
}

const ESCAPE: &str = r"<%-([\s\S]+?)%>";
const INTERPOLATE: &str = r"<%=([\s\S]+?)%>";
const EVALUATE: &str = r"<%([\s\S]+?)%>";

impl Default for TemplateSettings {
    /// ERB style delimiters: `<%- %>`, `<%= %>` and `<% %>`.
    fn default() -> Self {
        Self {
            escape: Regex::new(ESCAPE).ok(),
            interpolate: Regex::new(INTERPOLATE).ok(),
            evaluate: Regex::new(EVALUATE).ok(),
            variable: None,
        }
    }
}

impl TemplateSettings {
    /// Settings with every delimiter disabled.
    pub const fn none() -> Self {
        Self {
            escape: None,
            interpolate: None,
            evaluate: None,
            variable: None,
        }
    }

    /// Sets the HTML-escaping delimiter.
    #[must_use]
    pub fn with_escape(mut self, pattern: Regex) -> Self {
        self.escape = Some(pattern);
        self
    }

    /// Sets the raw interpolation delimiter.
    #[must_use]
    pub fn with_interpolate(mut self, pattern: Regex) -> Self {
        self.interpolate = Some(pattern);
        self
    }

    /// Sets the statement delimiter.
    #[must_use]
    pub fn with_evaluate(mut self, pattern: Regex) -> Self {
        self.evaluate = Some(pattern);
        self
    }

    /// Disables the HTML-escaping delimiter.
    #[must_use]
    pub fn without_escape(mut self) -> Self {
        self.escape = None;
        self
    }

    /// Disables the raw interpolation delimiter.
    #[must_use]
    pub fn without_interpolate(mut self) -> Self {
        self.interpolate = None;
        self
    }

    /// Disables the statement delimiter.
    #[must_use]
    pub fn without_evaluate(mut self) -> Self {
        self.evaluate = None;
        self
    }

    /// Binds the data to `name` instead of exposing its properties.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = Some(name.into());
        self
    }

    /// The HTML-escaping delimiter.
    pub const fn escape(&self) -> Option<&Regex> {
        self.escape.as_ref()
    }

    /// The raw interpolation delimiter.
    pub const fn interpolate(&self) -> Option<&Regex> {
        self.interpolate.as_ref()
    }

    /// The statement delimiter.
    pub const fn evaluate(&self) -> Option<&Regex> {
        self.evaluate.as_ref()
    }

    /// The name the data is bound to, if any.
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }
}
