//! Rendering of a decoded JSON value as collapsible display lines.
//!
//! `render` is a pure function of the value and the expansion state; the
//! painter turns one structured line into terminal text. Recursion is
//! unguarded: JSON has no cycles, and nesting is bounded only by the host
//! stack.

use ariadne::{Color, Fmt};

use super::{TreePath, TreeState};
use crate::value::JsonValue;

/// Spaces per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Which delimiter pair a composite renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Brace,
    Bracket,
}

impl Delim {
    fn open(self) -> char {
        match self {
            Delim::Brace => '{',
            Delim::Bracket => '[',
        }
    }

    fn close(self) -> char {
        match self {
            Delim::Brace => '}',
            Delim::Bracket => ']',
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Delim::Brace => "keys",
            Delim::Bracket => "items",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Null,
    Bool,
    Num,
    Str,
}

/// What a line displays after its optional key.
#[derive(Debug, Clone, PartialEq)]
pub enum LineBody {
    /// A scalar literal, rendered inline.
    Scalar(ScalarKind, String),
    /// The header of an expanded composite: `{` or `[`.
    Open(Delim),
    /// The footer of an expanded composite: `}` or `]`.
    Close(Delim),
    /// A collapsed composite: `{...} (N keys)` or `[...] (N items)`.
    Summary(Delim, usize),
}

/// One rendered line of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine {
    pub path: TreePath,
    pub depth: usize,
    pub key: Option<String>,
    pub body: LineBody,
    /// `Some(expanded)` on composite header/summary lines, which toggle.
    /// `None` on scalar and closing lines.
    pub marker: Option<bool>,
    pub comma: bool,
}

/// Render the whole document, honoring `state`.
pub fn render(root: &JsonValue, state: &TreeState) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    // The root is always the last (only) entry at its level: no comma.
    render_node(root, None, TreePath::root(), true, state, &mut lines);
    lines
}

fn render_node(
    value: &JsonValue,
    key: Option<&str>,
    path: TreePath,
    is_last: bool,
    state: &TreeState,
    lines: &mut Vec<TreeLine>,
) {
    let depth = path.depth();
    match value {
        JsonValue::Null => {
            push_scalar(lines, path, depth, key, ScalarKind::Null, "null".to_string(), is_last);
        }
        JsonValue::Bool(b) => {
            push_scalar(lines, path, depth, key, ScalarKind::Bool, b.to_string(), is_last);
        }
        JsonValue::Num(n) => {
            push_scalar(lines, path, depth, key, ScalarKind::Num, n.to_string(), is_last);
        }
        JsonValue::Str(s) => {
            push_scalar(lines, path, depth, key, ScalarKind::Str, format!("\"{s}\""), is_last);
        }
        JsonValue::Array(elems) => {
            if !state.is_expanded(&path) {
                lines.push(TreeLine {
                    path,
                    depth,
                    key: key.map(str::to_owned),
                    body: LineBody::Summary(Delim::Bracket, elems.len()),
                    marker: Some(false),
                    comma: !is_last,
                });
                return;
            }
            lines.push(TreeLine {
                path: path.clone(),
                depth,
                key: key.map(str::to_owned),
                body: LineBody::Open(Delim::Bracket),
                marker: Some(true),
                comma: false,
            });
            for (idx, elem) in elems.iter().enumerate() {
                // The original keys array entries by their index.
                let child_key = idx.to_string();
                render_node(
                    elem,
                    Some(&child_key),
                    path.child_index(idx),
                    idx + 1 == elems.len(),
                    state,
                    lines,
                );
            }
            lines.push(TreeLine {
                path,
                depth,
                key: None,
                body: LineBody::Close(Delim::Bracket),
                marker: None,
                comma: !is_last,
            });
        }
        JsonValue::Object(members) => {
            if !state.is_expanded(&path) {
                lines.push(TreeLine {
                    path,
                    depth,
                    key: key.map(str::to_owned),
                    body: LineBody::Summary(Delim::Brace, members.len()),
                    marker: Some(false),
                    comma: !is_last,
                });
                return;
            }
            lines.push(TreeLine {
                path: path.clone(),
                depth,
                key: key.map(str::to_owned),
                body: LineBody::Open(Delim::Brace),
                marker: Some(true),
                comma: false,
            });
            for (idx, (member_key, member_val)) in members.iter().enumerate() {
                render_node(
                    member_val,
                    Some(member_key),
                    path.child_key(member_key),
                    idx + 1 == members.len(),
                    state,
                    lines,
                );
            }
            lines.push(TreeLine {
                path,
                depth,
                key: None,
                body: LineBody::Close(Delim::Brace),
                marker: None,
                comma: !is_last,
            });
        }
    }
}

fn push_scalar(
    lines: &mut Vec<TreeLine>,
    path: TreePath,
    depth: usize,
    key: Option<&str>,
    kind: ScalarKind,
    text: String,
    is_last: bool,
) {
    lines.push(TreeLine {
        path,
        depth,
        key: key.map(str::to_owned),
        body: LineBody::Scalar(kind, text),
        marker: None,
        comma: !is_last,
    });
}

/// Paint a line as terminal text, optionally with ANSI colors.
pub fn paint(line: &TreeLine, colors: bool) -> String {
    let mut out = " ".repeat(line.depth * INDENT_WIDTH);
    out.push_str(match line.marker {
        Some(true) => "▾ ",
        Some(false) => "▸ ",
        None => "  ",
    });
    if let Some(key) = &line.key {
        let quoted = format!("\"{key}\"");
        if colors {
            out.push_str(&format!("{}", quoted.fg(Color::Cyan)));
        } else {
            out.push_str(&quoted);
        }
        out.push_str(": ");
    }
    let (text, color) = match &line.body {
        LineBody::Scalar(kind, text) => (text.clone(), Some(scalar_color(*kind))),
        LineBody::Open(delim) => (delim.open().to_string(), None),
        LineBody::Close(delim) => (delim.close().to_string(), None),
        LineBody::Summary(delim, count) => (
            format!(
                "{}...{} ({count} {})",
                delim.open(),
                delim.close(),
                delim.unit()
            ),
            None,
        ),
    };
    match color {
        Some(color) if colors => out.push_str(&format!("{}", text.fg(color))),
        _ => out.push_str(&text),
    }
    if line.comma {
        out.push(',');
    }
    out
}

fn scalar_color(kind: ScalarKind) -> Color {
    match kind {
        ScalarKind::Null => Color::Red,
        ScalarKind::Bool => Color::Magenta,
        ScalarKind::Num => Color::Green,
        ScalarKind::Str => Color::Yellow,
    }
}
