use std::collections::HashMap;

use ariadne::{Color, Fmt, Label, Report, ReportKind};

use crate::config::Config;
use crate::parser::{Json, Spanned};
use crate::Diagnostics;

/// Walks every object in the document and reports members whose key already
/// appeared earlier in the same object. Decoding keeps only the later value,
/// which is rarely what the author meant.
pub fn lint_duplicate_keys<'d>(
    _config: &Config,
    doc: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    check_node(doc, path, diag);
}

fn check_node<'d>(node: &Spanned<Json>, path: &'d String, diag: &mut Diagnostics<'d>) {
    match &node.val {
        Json::Array(elems) => {
            for elem in elems {
                check_node(elem, path, diag);
            }
        }
        Json::Object(members) => {
            let mut seen: HashMap<&str, &Spanned<String>> = HashMap::new();
            for (name, value) in members {
                if let Some(first) = seen.get(name.val.as_str()) {
                    diag.push(
                        Report::build(ReportKind::Warning, path, name.span.start)
                            .with_message(format!(
                                "member \"{}\" defined multiple times",
                                name.val.as_str().fg(Color::Blue)
                            ))
                            .with_label(
                                Label::new((path, first.span.into_range()))
                                    .with_message(format!(
                                        "member \"{}\" first defined here",
                                        name.val.as_str().fg(Color::Blue)
                                    ))
                                    .with_color(Color::Yellow),
                            )
                            .with_label(
                                Label::new((path, name.span.into_range()))
                                    .with_message(format!(
                                        "member \"{}\" later redefined here",
                                        name.val.as_str().fg(Color::Blue)
                                    ))
                                    .with_color(Color::Red),
                            )
                            .with_help("only the last definition survives decoding")
                            .finish(),
                    );
                } else {
                    seen.insert(name.val.as_str(), name);
                }
                check_node(value, path, diag);
            }
        }
        _ => {}
    }
}
