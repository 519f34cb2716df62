use ariadne::{Color, Fmt, Label, Report, ReportKind};

use crate::config::Config;
use crate::parser::{Json, Spanned};
use crate::Diagnostics;

/// Warns once when composites nest deeper than the configured limit. The
/// tree renderer recurses without guards, so very deep documents are worth
/// flagging before they are viewed.
pub fn lint_deep_nesting<'d>(
    config: &Config,
    doc: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    check_depth(doc, 0, config.max_nesting_depth, path, diag);
}

fn check_depth<'d>(
    node: &Spanned<Json>,
    depth: usize,
    limit: usize,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) -> bool {
    match &node.val {
        Json::Array(_) | Json::Object(_) if depth >= limit => {
            diag.push(
                Report::build(ReportKind::Warning, path, node.span.start)
                    .with_message(format!(
                        "document nests deeper than {} levels",
                        limit.fg(Color::Blue)
                    ))
                    .with_label(
                        Label::new((path, node.span.into_range()))
                            .with_message("this value exceeds the nesting limit")
                            .with_color(Color::Yellow),
                    )
                    .with_help("deeply nested documents are hard to read in the tree view")
                    .finish(),
            );
            true
        }
        Json::Array(elems) => {
            for elem in elems {
                if check_depth(elem, depth + 1, limit, path, diag) {
                    return true;
                }
            }
            false
        }
        Json::Object(members) => {
            for (_, value) in members {
                if check_depth(value, depth + 1, limit, path, diag) {
                    return true;
                }
            }
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use chumsky::Parser;

    use super::*;
    use crate::parser;

    fn lint(src: &str, limit: usize) -> usize {
        let (doc, errors) = parser::parser().parse(src).into_output_errors();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        let doc = doc.expect("no output");
        let path = "test.json".to_string();
        let config = Config {
            indent_width: 2,
            tree_expand_depth: 2,
            max_nesting_depth: limit,
        };
        let mut diag = Vec::new();
        lint_deep_nesting(&config, &doc, &path, &mut diag);
        diag.len()
    }

    #[test]
    fn shallow_documents_are_fine() {
        assert_eq!(lint(r#"{"a": [1, {"b": 2}]}"#, 128), 0);
        assert_eq!(lint("null", 0), 0);
    }

    #[test]
    fn warns_once_past_the_limit() {
        assert_eq!(lint(r#"{"a": {"b": {"c": 1}}}"#, 2), 1);
        // Several offending subtrees still produce a single report.
        assert_eq!(lint(r#"{"a": {"b": 1}, "c": {"d": 2}, "e": {"f": 3}}"#, 1), 1);
    }

    #[test]
    fn limit_counts_composite_levels() {
        assert_eq!(lint(r#"{"a": {"b": 1}}"#, 2), 0);
        assert_eq!(lint(r#"{"a": {"b": {}}}"#, 2), 1);
    }
}
