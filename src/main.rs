use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::prelude::*;
use clap::{Parser as ClapParser, Subcommand};
use confique::Config as _;
use serde::Serialize;
use tracing::*;

use crate::config::Config;
use crate::parser::{Json, Spanned};
use crate::tree::TreeState;
use crate::value::JsonValue;

mod config;
mod format;
mod lints;
mod logging;
mod parser;
mod tree;
mod value;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a JSON document and report anything suspicious.
    Check {
        /// Path to a JSON file; stdin when absent or `-`.
        input: Option<PathBuf>,
        /// Print a machine-readable summary instead of prose.
        #[arg(long)]
        json: bool,
    },
    /// Pretty-print a JSON document.
    Format {
        /// Path to a JSON file; stdin when absent or `-`.
        input: Option<PathBuf>,
        /// Spaces per indentation level (defaults to the configured width).
        #[arg(long)]
        indent: Option<usize>,
        /// Rewrite the input file in place instead of printing.
        #[arg(long)]
        write: bool,
    },
    /// Strip all insignificant whitespace from a JSON document.
    Minify {
        /// Path to a JSON file; stdin when absent or `-`.
        input: Option<PathBuf>,
        /// Rewrite the input file in place instead of printing.
        #[arg(long)]
        write: bool,
    },
    /// Render a JSON document as a collapsible tree.
    Tree {
        /// Path to a JSON file; stdin when absent or `-`.
        input: Option<PathBuf>,
        /// Composite values nested this deep (or deeper) start out
        /// collapsed (defaults to the configured depth).
        #[arg(long)]
        depth: Option<usize>,
        /// Expand the composite at this JSON pointer (repeatable).
        #[arg(long)]
        expand: Vec<String>,
        /// Collapse the composite at this JSON pointer (repeatable).
        #[arg(long)]
        collapse: Vec<String>,
        /// Plain output without ANSI colors.
        #[arg(long)]
        no_color: bool,
    },
}

type DiagnosticReport<'a> = Report<'a, (&'a String, std::ops::Range<usize>)>;
type Diagnostics<'a> = Vec<DiagnosticReport<'a>>;

#[derive(Debug, Serialize)]
struct CheckSummary<'a> {
    path: &'a str,
    valid: bool,
    kind: &'static str,
    warnings: usize,
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(?cli);

    let config = Config::builder()
        .env()
        .file("jfv.toml")
        .load()
        .context("failed to load configuration")?;

    debug!(?config);

    match cli.command {
        Command::Check { input, json } => check(&config, input.as_deref(), json),
        Command::Format {
            input,
            indent,
            write,
        } => format_document(&config, input.as_deref(), indent, write),
        Command::Minify { input, write } => minify_document(input.as_deref(), write),
        Command::Tree {
            input,
            depth,
            expand,
            collapse,
            no_color,
        } => tree_document(&config, input.as_deref(), depth, &expand, &collapse, no_color),
    }
}

fn check(config: &Config, input: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (path, src) = read_input(input)?;
    let doc = parse_document(&path, &src)?;

    debug!(?doc);

    let mut diagnostics = Vec::new();
    lints::lint_duplicate_keys(config, &doc, &path, &mut diagnostics);
    lints::lint_deep_nesting(config, &doc, &path, &mut diagnostics);

    let warnings = diagnostics.len();
    for diagnostic in diagnostics {
        if json {
            // Keep stdout machine-readable; reports go to stderr.
            diagnostic.eprint((&path, Source::from(&src)))?;
        } else {
            diagnostic.print((&path, Source::from(&src)))?;
        }
    }

    if json {
        let summary = CheckSummary {
            path: &path,
            valid: true,
            kind: doc.val.kind_desc(),
            warnings,
        };
        println!("{}", serde_json::to_string(&summary)?);
    } else if warnings == 0 {
        println!("{path}: valid JSON ({})", doc.val.kind_desc());
    } else {
        println!(
            "{path}: valid JSON ({}), {warnings} warning(s)",
            doc.val.kind_desc()
        );
    }

    Ok(())
}

fn format_document(
    config: &Config,
    input: Option<&Path>,
    indent: Option<usize>,
    write: bool,
) -> anyhow::Result<()> {
    let (path, src) = read_input(input)?;
    let doc = parse_document(&path, &src)?;
    let value = JsonValue::from(&doc);

    let out = format::pretty(&value, indent.unwrap_or(config.indent_width));
    emit(input, &out, write)
}

fn minify_document(input: Option<&Path>, write: bool) -> anyhow::Result<()> {
    let (path, src) = read_input(input)?;
    let doc = parse_document(&path, &src)?;
    let value = JsonValue::from(&doc);

    let out = format::minify(&value);
    emit(input, &out, write)
}

fn tree_document(
    config: &Config,
    input: Option<&Path>,
    depth: Option<usize>,
    expand: &[String],
    collapse: &[String],
    no_color: bool,
) -> anyhow::Result<()> {
    let (path, src) = read_input(input)?;
    let doc = parse_document(&path, &src)?;
    let value = JsonValue::from(&doc);

    let mut state = TreeState::new(depth.unwrap_or(config.tree_expand_depth));
    for pointer in expand {
        let (node_path, target) = tree::resolve_pointer(&value, pointer)?;
        if !target.is_composite() {
            bail!("cannot expand {} value at `{pointer}`", target.kind_desc());
        }
        state.expand(node_path);
    }
    for pointer in collapse {
        let (node_path, target) = tree::resolve_pointer(&value, pointer)?;
        if !target.is_composite() {
            bail!("cannot collapse {} value at `{pointer}`", target.kind_desc());
        }
        state.collapse(node_path);
    }

    for line in tree::render(&value, &state) {
        println!("{}", tree::paint(&line, !no_color));
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> anyhow::Result<(String, String)> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let src = match std::fs::read_to_string(path) {
                Ok(file) => file,
                Err(e) => {
                    error!(?path, "failed to read input");
                    return Err(e)
                        .with_context(|| format!("failed to read file `{}`", path.display()));
                }
            };
            Ok((path.display().to_string(), src))
        }
        _ => {
            let mut src = String::new();
            std::io::stdin()
                .read_to_string(&mut src)
                .context("failed to read stdin")?;
            Ok(("<stdin>".to_string(), src))
        }
    }
}

#[instrument(skip(src))]
fn parse_document(path: &String, src: &str) -> anyhow::Result<Spanned<Json>> {
    if src.trim().is_empty() {
        bail!("input is empty");
    }

    let (doc, errors) = parser::parser().parse(src).into_output_errors();

    let parse_failed = !errors.is_empty();
    errors.into_iter().for_each(|e| {
        Report::build(ReportKind::Error, path, e.span().start)
            .with_message(e.to_string())
            .with_label(
                Label::new((path, e.span().into_range()))
                    .with_message(e.reason().to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .print((path, Source::from(src)))
            .unwrap()
    });

    let Some(doc) = doc else {
        bail!("failed to parse JSON document");
    };
    if parse_failed {
        bail!("failed to parse JSON document");
    }

    Ok(doc)
}

fn emit(input: Option<&Path>, out: &str, write: bool) -> anyhow::Result<()> {
    if !write {
        println!("{out}");
        return Ok(());
    }
    match input {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::write(path, format!("{out}\n"))
                .with_context(|| format!("failed to write file `{}`", path.display()))?;
            debug!(?path, "rewrote input in place");
            Ok(())
        }
        _ => bail!("--write requires a file input"),
    }
}
