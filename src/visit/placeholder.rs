//! Placeholder Visitor (§4.11): leaf substitution, plus the shared
//! paragraph run-reconstruction pipeline also used by the Conditional
//! Visitor's inline mode (§4.9) once it has flattened away any inline
//! conditionals.

use std::rc::Rc;

use ego_tree::NodeId;

use crate::blocks::PlaceholderMatch;
use crate::context::EvaluationContext;
use crate::detect::{self, InlineNode};
use crate::doctree::format::RunFormat;
use crate::doctree::DocTree;
use crate::engine::{MissingVariableBehavior, VisitState};
use crate::error::EngineError;
use crate::expr;
use crate::format::{self, markdown::MarkdownPiece};

use super::conditional;

/// Entry point the walker dispatches every `Paragraph` without a
/// block-level construct to (§4.8 step 3). Handles plain leaf placeholders
/// and, when the parsed text contains an inline conditional, first
/// delegates branch selection to `visit::conditional::resolve_inline`.
pub fn visit_paragraph(
    tree: &mut DocTree,
    paragraph: NodeId,
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
) -> Result<(), EngineError> {
    let text = tree.concatenated_text(paragraph);
    if !text.contains("{{") {
        return Ok(());
    }

    let nodes = detect::parse_inline(&text)?;
    let has_dynamic = nodes.iter().any(|n| !matches!(n, InlineNode::Text(..)));
    if !has_dynamic {
        return Ok(());
    }

    let flat = conditional::resolve_inline(nodes, ctx)?;
    let spans = run_format_spans(tree, paragraph);
    let new_children = render(&flat, ctx, state, &spans)?;

    let before = tree.children(paragraph).len();
    tree.replace_children(paragraph, new_children);
    let after = tree.children(paragraph).len();
    log::debug!("paragraph spliced: {before} run(s) -> {after} run(s)");

    Ok(())
}

/// The paragraph's existing runs, as `(start, end, RunFormat)` byte-offset
/// spans into its concatenated text. A piece of literal text or a
/// placeholder match inherits the `RunFormat` of whichever original run its
/// own offset falls inside (§4.11 step 5) — text outside a match keeps the
/// format of the run it always belonged to, rather than being forced to
/// match the paragraph's first run.
fn run_format_spans(tree: &DocTree, paragraph: NodeId) -> Vec<(usize, usize, RunFormat)> {
    let mut spans = Vec::new();
    let mut offset = 0usize;
    for id in tree.children(paragraph) {
        if let Some((text, format)) = tree.value(id).and_then(|d| d.as_run()) {
            let start = offset;
            offset += text.len();
            spans.push((start, offset, format.clone()));
        }
    }
    spans
}

/// The `RunFormat` of whichever span in `spans` covers `offset`. A paragraph
/// built from scratch with no runs, or an offset past the last span (an
/// empty trailing run), falls back to the last known span or plain.
fn format_at(spans: &[(usize, usize, RunFormat)], offset: usize) -> RunFormat {
    spans
        .iter()
        .find(|(start, end, _)| offset >= *start && offset < *end)
        .or_else(|| spans.last())
        .map(|(_, _, fmt)| fmt.clone())
        .unwrap_or_default()
}

/// Render a flattened `Text`/`Placeholder` sequence into `(text, RunFormat)`
/// runs, resolving and formatting each placeholder and splitting markdown
/// fragments out of string substitutions (§4.2, §4.11 step 5).
fn render(
    nodes: &[InlineNode],
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
    spans: &[(usize, usize, RunFormat)],
) -> Result<Vec<(String, RunFormat)>, EngineError> {
    let mut runs = Vec::new();
    for node in nodes {
        match node {
            InlineNode::Text(text, start) => push_text_by_spans(&mut runs, text, *start, spans),
            InlineNode::Placeholder(p) => render_placeholder(p, ctx, state, spans, &mut runs)?,
            InlineNode::Conditional(_) => {
                unreachable!("inline conditionals are flattened before render")
            }
        }
    }
    Ok(runs)
}

/// Push a literal text span, splitting it at any original-run boundary it
/// crosses so each piece keeps the format of the run it came from.
fn push_text_by_spans(
    runs: &mut Vec<(String, RunFormat)>,
    text: &str,
    start: usize,
    spans: &[(usize, usize, RunFormat)],
) {
    let end = start + text.len();
    let mut offset = start;
    while offset < end {
        let span_end = spans
            .iter()
            .find(|(s, e, _)| offset >= *s && offset < *e)
            .map(|(_, e, _)| *e)
            .unwrap_or(end)
            .min(end);
        let format = format_at(spans, offset);
        push_plain(runs, &text[offset - start..span_end - start], &format);
        offset = span_end;
    }
}

fn render_placeholder(
    p: &PlaceholderMatch,
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
    spans: &[(usize, usize, RunFormat)],
    runs: &mut Vec<(String, RunFormat)>,
) -> Result<(), EngineError> {
    let base_format = format_at(spans, p.start);
    let resolved = match &p.inline_expr {
        Some(expr_ast) => Some(expr::eval(expr_ast, ctx)?),
        None => {
            let path = p
                .variable_path
                .as_ref()
                .expect("leaf placeholder always carries a path or an inline expr");
            ctx.resolve(path)
        }
    };

    let value = match resolved {
        Some(v) => v,
        None => {
            let name = p
                .variable_path
                .as_ref()
                .map(|path| path.raw.clone())
                .unwrap_or_else(|| p.raw.clone());
            state.missing_variables.insert(name.clone());
            return match state.missing_variable_behavior {
                MissingVariableBehavior::LeaveUnchanged => {
                    push_plain(runs, &p.raw, &base_format);
                    Ok(())
                }
                MissingVariableBehavior::ReplaceWithEmpty => Ok(()),
                MissingVariableBehavior::Throw => Err(EngineError::MissingVariable(name)),
            };
        }
    };

    let formatted = format::format(&value, p.format.as_ref(), state.locale, state.registry)?;
    state.replacement_count += 1;

    if formatted.markdown.is_empty() {
        push_plain(runs, &formatted.text, &base_format);
    } else {
        for piece in &formatted.markdown {
            match piece {
                MarkdownPiece::Fragment(f) => {
                    let merged = base_format.merged_with_markdown(f.bold, f.italic, f.strike);
                    runs.push((f.text.clone(), merged));
                }
                MarkdownPiece::LineBreak => runs.push(("\n".to_string(), base_format.clone())),
            }
        }
    }

    Ok(())
}

/// Append `text` to the last run if its format matches exactly, else start
/// a new run. Keeps adjacent literal text and same-format substitutions
/// from fragmenting into runs the output tree never needed.
fn push_plain(runs: &mut Vec<(String, RunFormat)>, text: &str, format: &RunFormat) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = runs.last_mut() {
        if &last.1 == format {
            last.0.push_str(text);
            return;
        }
    }
    runs.push((text.to_string(), format.clone()));
}
