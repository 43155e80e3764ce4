use std::borrow::Cow;

const ENTITIES: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('`', "&#x60;"),
];

fn entity_of(character: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find_map(|&(escaped, entity)| (escaped == character).then_some(entity))
}

/// Replaces `&`, `<`, `>`, `"`, `'` and the backtick with their HTML entities.
///
/// Borrows the input when nothing needs escaping.
///
/// # Examples
///
/// ```rust
/// use lowbar::utility::escape;
///
/// assert_eq!(escape("Curly, Larry & Moe"), "Curly, Larry &amp; Moe");
/// assert_eq!(escape("<a href='x'>"), "&lt;a href=&#x27;x&#x27;&gt;");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|character| entity_of(character).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for character in text.chars() {
        match entity_of(character) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(character),
        }
    }
    Cow::Owned(escaped)
}

/// Inverse of [`escape`]. Only the six entities `escape` produces are
/// recognized; anything else is left as written.
///
/// # Examples
///
/// ```rust
/// use lowbar::utility::unescape;
///
/// assert_eq!(unescape("Curly, Larry &amp; Moe"), "Curly, Larry & Moe");
/// assert_eq!(unescape("&copy;"), "&copy;");
/// ```
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        unescaped.push_str(&rest[..start]);
        rest = &rest[start..];
        match ENTITIES.iter().find(|(_, entity)| rest.starts_with(entity)) {
            Some(&(character, entity)) => {
                unescaped.push(character);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }
    unescaped.push_str(rest);
    Cow::Owned(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("plain", "plain")]
    #[case("a & b", "a &amp; b")]
    #[case("\"quoted\"", "&quot;quoted&quot;")]
    #[case("`tick`", "&#x60;tick&#x60;")]
    #[case("&amp;", "&amp;amp;")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[rstest]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape("clean"), Cow::Borrowed(_)));
    }

    #[rstest]
    #[case("&lt;p&gt;", "<p>")]
    #[case("&#x27;&#x60;", "'`")]
    #[case("a & b", "a & b")]
    #[case("&amp;amp;", "&amp;")]
    #[case("trailing &", "trailing &")]
    fn test_unescape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape(input), expected);
    }

    #[rstest]
    fn test_unescape_reverses_escape() {
        let text = "<script>alert('x & \"y\"')</script>`";
        assert_eq!(unescape(&escape(text)), text);
    }
}
