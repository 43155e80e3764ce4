//! Integration tests for the template compiler.
//!
//! Renders templates through the public API only: delimiters, the
//! expression language, block statements, settings and error reporting.

use lowbar::prelude::*;
use lowbar::template::{TemplateError, template};
use regex::Regex;
use rstest::rstest;

fn render(text: &str, data: &Value) -> String {
    template(text, None).unwrap().render(data).unwrap()
}

// =============================================================================
// Delimiters
// =============================================================================

#[rstest]
fn test_interpolation() {
    assert_eq!(render("Hello <%= name %>!", &record! { "name" => "World" }), "Hello World!");
}

#[rstest]
fn test_escape_delimiter_escapes_html() {
    assert_eq!(
        render("<b><%- value %></b>", &record! { "value" => "<script>&'\"`" }),
        "<b>&lt;script&gt;&amp;&#x27;&quot;&#x60;</b>"
    );
}

#[rstest]
#[case(Value::Null)]
#[case(Value::Undefined)]
fn test_nil_values_render_empty(#[case] missing: Value) {
    let data = record! { "value" => missing };
    assert_eq!(render("[<%= value %>][<%- value %>]", &data), "[][]");
}

#[rstest]
fn test_literal_text_is_preserved() {
    let text = "line one\nline \"two\"\r\n\\ back\u{2028}slash";
    assert_eq!(render(text, &record! {}), text);
}

#[rstest]
fn test_multiline_fragment() {
    assert_eq!(render("<%=\n  a\n  + b\n%>", &record! { "a" => 1, "b" => 2 }), "3");
}

// =============================================================================
// Expressions
// =============================================================================

#[rstest]
#[case("<%= 1 + 2 * 3 %>", "7")]
#[case("<%= (1 + 2) * 3 %>", "9")]
#[case("<%= 'a' + 1 %>", "a1")]
#[case("<%= 7 % 4 %>", "3")]
#[case("<%= -n %>", "-5")]
#[case("<%= !flag %>", "false")]
#[case("<%= n > 3 ? 'big' : 'small' %>", "big")]
#[case("<%= n == '5' %>", "true")]
#[case("<%= n === '5' %>", "false")]
#[case("<%= missing_ok || 'fallback' %>", "fallback")]
#[case("<%= flag && 'yes' %>", "yes")]
#[case("<%= list[1] %>", "b")]
#[case("<%= list.length %>", "3")]
#[case("<%= person.name %>", "moe")]
#[case("<%= person['name'] %>", "moe")]
#[case("<%= [1, 2, 3] %>", "1,2,3")]
#[case("<%= null %>", "")]
fn test_expressions(#[case] text: &str, #[case] expected: &str) {
    let data = record! {
        "n" => 5,
        "flag" => true,
        "missing_ok" => Value::Null,
        "list" => seq!["a", "b", "c"],
        "person" => record! { "name" => "moe" },
    };
    assert_eq!(render(text, &data), expected);
}

#[rstest]
fn test_member_calls_bind_receiver() {
    let greet = Function::new(|receiver, arguments| {
        Ok(Value::from(format!("{}, {}", arguments[0], receiver.get("name"))))
    });
    let data = record! { "person" => record! { "name" => "moe", "greet" => greet } };
    assert_eq!(render("<%= person.greet('hi') %>", &data), "hi, moe");
}

#[rstest]
fn test_plain_calls() {
    let shout = Function::unary(|text| Value::from(text.to_string().to_uppercase()));
    assert_eq!(render("<%= shout(word) %>", &record! { "shout" => shout, "word" => "hey" }), "HEY");
}

// =============================================================================
// Statements
// =============================================================================

#[rstest]
fn test_for_loop_over_array() {
    let text = "<ul><% for person in people %><li><%= person %></li><% end %></ul>";
    assert_eq!(
        render(text, &record! { "people" => seq!["moe", "curly", "larry"] }),
        "<ul><li>moe</li><li>curly</li><li>larry</li></ul>"
    );
}

#[rstest]
fn test_for_loop_with_key_over_record() {
    let text = "<% for value, key in scores %><%= key %>=<%= value %>;<% end %>";
    assert_eq!(render(text, &record! { "scores" => record! { "a" => 1, "b" => 2 } }), "a=1;b=2;");
}

#[rstest]
#[case(5, "many")]
#[case(1, "one")]
#[case(0, "none")]
fn test_if_else_chain(#[case] count: i32, #[case] expected: &str) {
    let text = "<% if count > 1 %>many<% else if count == 1 %>one<% else %>none<% end %>";
    assert_eq!(render(text, &record! { "count" => count }), expected);
}

#[rstest]
fn test_let_and_print() {
    let text = "<% let total = a + b; print('sum=', total) %>!";
    assert_eq!(render(text, &record! { "a" => 2, "b" => 3 }), "sum=5!");
}

#[rstest]
fn test_nested_blocks() {
    let text = "<% for row in rows %><% for cell in row %><% if cell %>x<% else %>.<% end %><% end %>|<% end %>";
    let data = record! { "rows" => seq![seq![true, false], seq![false, true]] };
    assert_eq!(render(text, &data), "x.|.x|");
}

// =============================================================================
// Settings
// =============================================================================

#[rstest]
fn test_custom_delimiters() {
    let settings = TemplateSettings::none()
        .with_interpolate(Regex::new(r"\{\{(.+?)\}\}").unwrap())
        .with_evaluate(Regex::new(r"\{%(.+?)%\}").unwrap());
    let compiled = Template::compile("{% if show %}Hi {{ name }}{% end %} <%= name %>", &settings).unwrap();
    assert_eq!(
        compiled.render(&record! { "show" => true, "name" => "moe" }).unwrap(),
        "Hi moe <%= name %>"
    );
}

#[rstest]
fn test_variable_setting_binds_data_under_a_name() {
    let settings = TemplateSettings::default().with_variable("data");
    let compiled = template("<%= data.answer %>", Some(&settings)).unwrap();
    assert_eq!(compiled.render(&record! { "answer" => 42 }).unwrap(), "42");
    assert!(matches!(
        template("<%= answer %>", Some(&settings)).unwrap().render(&record! { "answer" => 42 }),
        Err(Error::Reference { .. })
    ));
}

#[rstest]
fn test_template_is_reusable_and_shareable() {
    let compiled = template("<%= n * 2 %>", None).unwrap();
    let cloned = compiled.clone();
    let handle = std::thread::spawn(move || cloned.source().to_owned());
    let listing = handle.join().unwrap();
    assert_eq!(listing, compiled.source());
    assert_eq!(compiled.render(&record! { "n" => 2 }).unwrap(), "4");
    assert_eq!(compiled.render(&record! { "n" => 5 }).unwrap(), "10");
}

#[rstest]
fn test_into_function_renders() {
    let function = template("<%= a %>-<%= b %>", None).unwrap().into_function();
    assert_eq!(function.invoke(&[record! { "a" => 1, "b" => 2 }]).unwrap(), Value::from("1-2"));
}

// =============================================================================
// Errors
// =============================================================================

#[rstest]
#[case("<%= 1 + %>")]
#[case("<% if a %>open")]
#[case("<% end %>")]
#[case("<% else %>")]
#[case("<% for in list %><% end %>")]
fn test_compile_errors(#[case] text: &str) {
    let error: TemplateError = Template::compile(text, &TemplateSettings::default()).unwrap_err();
    assert!(!error.message.is_empty());
}

#[rstest]
fn test_compile_error_reports_offset() {
    let error = Template::compile("abc <%= ) %>", &TemplateSettings::default()).unwrap_err();
    assert!(error.offset >= 4);
    assert!(error.to_string().starts_with("template error at byte"));
}

#[rstest]
#[case(format!("<%= {}1{} %>", "(".repeat(10_000), ")".repeat(10_000)))]
#[case(format!("<% if {}1{} %><% end %>", "(".repeat(10_000), ")".repeat(10_000)))]
#[case(format!("{}{}", "<% for x in xs %>".repeat(10_000), "<% end %>".repeat(10_000)))]
fn test_deep_nesting_fails_compilation(#[case] text: String) {
    let error = template(&text, None).unwrap_err();
    assert!(matches!(error, Error::Template(_)));
}

#[rstest]
fn test_runtime_errors() {
    let compiled = template("<%= missing %>", None).unwrap();
    assert_eq!(
        compiled.render(&record! {}).unwrap_err(),
        Error::Reference { name: "missing".to_owned() }
    );
    let compiled = template("<%= a.b.c %>", None).unwrap();
    assert!(matches!(compiled.render(&record! { "a" => record! {} }), Err(Error::Type { .. })));
    let compiled = template("<%= a() %>", None).unwrap();
    assert!(matches!(compiled.render(&record! { "a" => 1 }), Err(Error::Type { .. })));
}

#[rstest]
fn test_callback_errors_propagate() {
    let failing = Function::new(|_, _| Err(Error::callback("boom")));
    let compiled = template("<%= fail() %>", None).unwrap();
    assert_eq!(compiled.render(&record! { "fail" => failing }).unwrap_err(), Error::callback("boom"));
}
