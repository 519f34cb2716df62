//! Pretty-printing and minification of decoded JSON values.

use crate::value::JsonValue;

/// Pretty-print with `indent_width` spaces per nesting level.
pub fn pretty(value: &JsonValue, indent_width: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, Some(indent_width));
    out
}

/// Emit the most compact text form.
pub fn minify(value: &JsonValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, None);
    out
}

fn write_value(out: &mut String, value: &JsonValue, depth: usize, indent: Option<usize>) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Num(n) => out.push_str(&n.to_string()),
        JsonValue::Str(s) => write_string(out, s),
        JsonValue::Array(elems) => {
            if elems.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (idx, elem) in elems.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                break_line(out, depth + 1, indent);
                write_value(out, elem, depth + 1, indent);
            }
            break_line(out, depth, indent);
            out.push(']');
        }
        JsonValue::Object(members) => {
            if members.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (idx, (key, val)) in members.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                break_line(out, depth + 1, indent);
                write_string(out, key);
                out.push(':');
                if indent.is_some() {
                    out.push(' ');
                }
                write_value(out, val, depth + 1, indent);
            }
            break_line(out, depth, indent);
            out.push('}');
        }
    }
}

fn break_line(out: &mut String, depth: usize, indent: Option<usize>) {
    if let Some(width) = indent {
        out.push('\n');
        out.push_str(&" ".repeat(depth * width));
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::value::JsonValue;

    #[test]
    fn pretty_matches_two_space_stringify() {
        let value = JsonValue::from(json!({"name": "John", "age": 30, "active": true}));
        assert_eq!(
            pretty(&value, 2),
            "{\n  \"name\": \"John\",\n  \"age\": 30,\n  \"active\": true\n}"
        );
    }

    #[test]
    fn pretty_nests_and_inlines_empty_composites() {
        let value = JsonValue::from(json!({"a": [1, 2], "b": {}, "c": []}));
        assert_eq!(
            pretty(&value, 2),
            "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": {},\n  \"c\": []\n}"
        );
    }

    #[test]
    fn pretty_honors_indent_width() {
        let value = JsonValue::from(json!([true]));
        assert_eq!(pretty(&value, 4), "[\n    true\n]");
    }

    #[test]
    fn minify_strips_all_whitespace() {
        let value = JsonValue::from(json!({"a": [1, null, "x"], "b": false}));
        assert_eq!(minify(&value), r#"{"a":[1,null,"x"],"b":false}"#);
    }

    #[test]
    fn integral_numbers_print_without_decimal_point() {
        assert_eq!(minify(&JsonValue::Num(30.0)), "30");
        assert_eq!(minify(&JsonValue::Num(1.5)), "1.5");
        assert_eq!(minify(&JsonValue::Num(-2.0)), "-2");
    }

    #[test]
    fn strings_are_escaped() {
        let value = JsonValue::Str("a\"b\\c\nd\u{1}".to_string());
        assert_eq!(minify(&value), "\"a\\\"b\\\\c\\nd\\u0001\"");
    }

    #[test]
    fn scalar_roots() {
        assert_eq!(pretty(&JsonValue::Null, 2), "null");
        assert_eq!(minify(&JsonValue::Bool(true)), "true");
    }
}
