//! Parser for JSON documents.
//!
//! Produces a span-carrying parse tree so that diagnostics and lints can
//! point back into the source text. Escape sequences are decoded during
//! parsing; the tree is lowered to [`crate::value::JsonValue`] afterwards.

use chumsky::prelude::*;

/// A value paired with its source span.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub span: SimpleSpan<usize>,
    pub val: T,
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    /// Placeholder produced by error recovery. Parse errors abort before
    /// lowering, so this never reaches the value model.
    Invalid,
    Null,
    Bool(bool),
    Str(String),
    Num(f64),
    Array(Vec<Spanned<Json>>),
    /// Members in source order. Duplicate keys are preserved here so lints
    /// can see them; lowering collapses them.
    Object(Vec<(Spanned<String>, Spanned<Json>)>),
}

impl Json {
    pub fn kind_desc(&self) -> &'static str {
        match self {
            Json::Invalid => "invalid",
            Json::Null => "null",
            Json::Bool(_) => "bool",
            Json::Str(_) => "string",
            Json::Num(_) => "number",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
        }
    }
}

/// Adapted from: <https://github.com/zesterer/chumsky/blob/main/examples/json.rs>.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Spanned<Json>, extra::Err<Rich<'a, char>>> {
    recursive(|value| {
        let digits = text::digits(10).to_slice();

        let frac = just('.').then(digits);

        let exp = just('e')
            .or(just('E'))
            .then(one_of("+-").or_not())
            .then(digits)
            .labelled("exponent");

        let number = just('-')
            .or_not()
            .then(text::int(10))
            .then(frac.or_not())
            .then(exp.or_not())
            .to_slice()
            .map(|s: &str| s.parse().unwrap())
            .boxed()
            .labelled("number");

        let escape = just('\\')
            .ignore_then(choice((
                just('\\'),
                just('/'),
                just('"'),
                just('b').to('\x08'),
                just('f').to('\x0C'),
                just('n').to('\n'),
                just('r').to('\r'),
                just('t').to('\t'),
                just('u').ignore_then(text::digits(16).exactly(4).to_slice().validate(
                    |digits, e, emitter| {
                        char::from_u32(u32::from_str_radix(digits, 16).unwrap()).unwrap_or_else(
                            || {
                                emitter.emit(Rich::custom(e.span(), "invalid unicode character"));
                                '\u{FFFD}' // unicode replacement character
                            },
                        )
                    },
                )),
            )))
            .boxed()
            .labelled("escape character");

        let string = none_of("\\\"")
            .or(escape)
            .repeated()
            .collect::<String>()
            .delimited_by(just('"'), just('"'))
            .map_with(|val, e| Spanned {
                span: e.span(),
                val,
            })
            .boxed()
            .labelled("string");

        let array = value
            .clone()
            .separated_by(just(',').padded())
            .collect::<Vec<_>>()
            .padded()
            .delimited_by(just('['), just(']'))
            .boxed()
            .labelled("array");

        let member = string
            .clone()
            .then_ignore(just(':').padded())
            .then(value)
            .labelled("object member");
        let object = member
            .separated_by(just(',').padded())
            .collect::<Vec<_>>()
            .padded()
            .delimited_by(just('{'), just('}'))
            .boxed()
            .labelled("object");

        choice((
            just("null").to(Json::Null).labelled("null"),
            just("true").to(Json::Bool(true)).labelled("true"),
            just("false").to(Json::Bool(false)).labelled("false"),
            number.map(Json::Num),
            string.map(|s: Spanned<String>| Json::Str(s.val)),
            array.map(Json::Array),
            object.map(Json::Object),
        ))
        .map_with(|val, e| Spanned {
            span: e.span(),
            val,
        })
        .recover_with(via_parser(nested_delimiters(
            '{',
            '}',
            [('[', ']')],
            |span| Spanned {
                span,
                val: Json::Invalid,
            },
        )))
        .recover_with(via_parser(nested_delimiters(
            '[',
            ']',
            [('{', '}')],
            |span| Spanned {
                span,
                val: Json::Invalid,
            },
        )))
        .recover_with(skip_then_retry_until(any().ignored(), end()))
        .padded()
    })
    .labelled("JSON document")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> Spanned<Json> {
        let (out, errors) = parser().parse(src).into_output_errors();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        out.expect("no output")
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_ok("null").val, Json::Null);
        assert_eq!(parse_ok("true").val, Json::Bool(true));
        assert_eq!(parse_ok("false").val, Json::Bool(false));
        assert_eq!(parse_ok("-12.5e2").val, Json::Num(-1250.0));
        assert_eq!(parse_ok(r#""hi""#).val, Json::Str("hi".to_string()));
    }

    #[test]
    fn decodes_string_escapes() {
        assert_eq!(
            parse_ok(r#""a\n\t\"\\A""#).val,
            Json::Str("a\n\t\"\\A".to_string())
        );
    }

    #[test]
    fn parses_nested_structures() {
        let doc = parse_ok(r#" { "a" : [ 1 , true , "x" ] , "b" : { } } "#);
        let Json::Object(members) = doc.val else {
            panic!("expected object");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].0.val, "a");
        let Json::Array(elems) = &members[0].1.val else {
            panic!("expected array");
        };
        assert_eq!(elems.len(), 3);
        assert_eq!(members[1].0.val, "b");
        assert_eq!(members[1].1.val, Json::Object(Vec::new()));
    }

    #[test]
    fn keeps_duplicate_members_in_parse_tree() {
        let doc = parse_ok(r#"{"a": 1, "a": 2}"#);
        let Json::Object(members) = doc.val else {
            panic!("expected object");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].0.val, "a");
        assert_eq!(members[1].0.val, "a");
    }

    #[test]
    fn member_keys_carry_their_spans() {
        let src = r#"{"key": 1}"#;
        let doc = parse_ok(src);
        let Json::Object(members) = doc.val else {
            panic!("expected object");
        };
        let span = members[0].0.span;
        assert_eq!(&src[span.into_range()], r#""key""#);
    }

    #[test]
    fn rejects_malformed_input() {
        let (_, errors) = parser().parse(r#"{"a": }"#).into_output_errors();
        assert!(!errors.is_empty());

        let (_, errors) = parser().parse("[1, 2").into_output_errors();
        assert!(!errors.is_empty());

        let (_, errors) = parser().parse("{} trailing").into_output_errors();
        assert!(!errors.is_empty());
    }
}
