//! Inline placeholder and inline conditional detection (§4.7 item 3).
//!
//! Operates on a paragraph's concatenated run text as one buffer. Finds
//! every leaf `{{VAR[:FMT]}}` placeholder and every inline `{{#if}}...{{/if}}`
//! block that lives entirely inside the paragraph, recursing into each
//! branch's text to pick up further nesting — the same depth-counted style
//! the block-level detectors use, just over a string instead of a sibling
//! list.

use crate::blocks::PlaceholderMatch;
use crate::detect::markers;
use crate::error::EngineError;
use crate::expr::Expr;
use crate::format::Specifier;
use crate::path::PropertyPath;

/// One node of the parsed inline structure of a paragraph's text.
#[derive(Debug, Clone)]
pub enum InlineNode {
    /// Literal text plus its starting byte offset in the paragraph's
    /// concatenated run text, so it can later be traced back to the
    /// original run(s) it came from.
    Text(String, usize),
    Placeholder(PlaceholderMatch),
    Conditional(InlineConditional),
}

#[derive(Debug, Clone)]
pub struct InlineConditional {
    /// `None` condition marks the trailing `else` branch.
    pub branches: Vec<(Option<Expr>, Vec<InlineNode>)>,
}

/// Parse `text` into a flat sequence of text/placeholder/conditional nodes.
pub fn parse_inline(text: &str) -> Result<Vec<InlineNode>, EngineError> {
    parse_inline_at(text, 0)
}

/// As `parse_inline`, but every offset recorded on the resulting nodes is
/// `base` plus the position within `text` — lets a conditional branch's body
/// (parsed from a substring of the paragraph's full text) still carry
/// offsets into that full text rather than restarting from zero.
fn parse_inline_at(text: &str, base: usize) -> Result<Vec<InlineNode>, EngineError> {
    let mut nodes = Vec::new();
    let mut cursor = 0usize;

    loop {
        match markers::inline_top_level().captures_at(text, cursor) {
            None => {
                if cursor < text.len() {
                    nodes.push(InlineNode::Text(text[cursor..].to_string(), base + cursor));
                }
                break;
            }
            Some(caps) => {
                let m = caps.get(0).unwrap();
                if m.start() > cursor {
                    nodes.push(InlineNode::Text(
                        text[cursor..m.start()].to_string(),
                        base + cursor,
                    ));
                }

                if let Some(expr_m) = caps.name("t_if_expr") {
                    let (spans, after) = scan_conditional(text, expr_m.as_str(), m.end())?;
                    let mut branches = Vec::with_capacity(spans.len());
                    for (cond_text, start, end) in spans {
                        let cond = match cond_text {
                            Some(t) => Some(
                                crate::expr::parse(&t)
                                    .map_err(|e| EngineError::InvalidExpression(e.0))?,
                            ),
                            None => None,
                        };
                        let inner = parse_inline_at(&text[start..end], base + start)?;
                        branches.push((cond, inner));
                    }
                    nodes.push(InlineNode::Conditional(InlineConditional { branches }));
                    cursor = after;
                    continue;
                }

                let body = caps
                    .name("t_ph_body")
                    .map(|b| b.as_str().to_string())
                    .unwrap_or_default();
                let fmt = caps.name("t_ph_fmt").map(|f| f.as_str().to_string());
                nodes.push(InlineNode::Placeholder(build_match(
                    &body,
                    fmt.as_deref(),
                    base + m.start(),
                    m.len(),
                    m.as_str(),
                )?));
                cursor = m.end();
            }
        }
    }

    Ok(nodes)
}

/// Walk forward from just after an opening `{{#if EXPR}}` marker (whose
/// condition text is `open_expr`), depth-counting over nested `#if`/`/if`
/// pairs to find the matching end. Returns each branch as
/// `(condition_text, content_start, content_end)` plus the buffer position
/// right after the closing `{{/if}}`.
fn scan_conditional(
    text: &str,
    open_expr: &str,
    after_open: usize,
) -> Result<(Vec<(Option<String>, usize, usize)>, usize), EngineError> {
    let mut depth = 1u32;
    let mut branch_start = after_open;
    let mut current_cond = Some(open_expr.to_string());
    let mut branches = Vec::new();
    let mut pos = after_open;

    loop {
        let caps = markers::inline_block_marker()
            .captures_at(text, pos)
            .ok_or_else(|| {
                EngineError::InvalidExpression("unterminated inline conditional".to_string())
            })?;
        let m = caps.get(0).unwrap();

        if caps.name("b_if_expr").is_some() {
            depth += 1;
            pos = m.end();
            continue;
        }
        if caps.name("b_endif").is_some() {
            depth -= 1;
            if depth == 0 {
                branches.push((current_cond.take(), branch_start, m.start()));
                return Ok((branches, m.end()));
            }
            pos = m.end();
            continue;
        }
        if depth == 1 {
            if let Some(e) = caps.name("b_elseif_expr") {
                branches.push((current_cond.take(), branch_start, m.start()));
                current_cond = Some(e.as_str().to_string());
                branch_start = m.end();
                pos = m.end();
                continue;
            }
            if caps.name("b_else").is_some() {
                branches.push((current_cond.take(), branch_start, m.start()));
                current_cond = None;
                branch_start = m.end();
                pos = m.end();
                continue;
            }
        }
        // Nested elseif/else at a deeper depth belongs to that inner block;
        // it is re-discovered when `parse_inline` recurses into this branch.
        pos = m.end();
    }
}

fn build_match(
    body: &str,
    fmt: Option<&str>,
    start: usize,
    len: usize,
    raw: &str,
) -> Result<PlaceholderMatch, EngineError> {
    let trimmed = body.trim();
    let format = fmt.map(Specifier::parse);
    let raw = raw.to_string();

    if let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        let expr = crate::expr::parse(inner).map_err(|e| EngineError::InvalidExpression(e.0))?;
        return Ok(PlaceholderMatch {
            variable_path: None,
            inline_expr: Some(expr),
            format,
            start,
            len,
            raw,
        });
    }

    Ok(PlaceholderMatch {
        variable_path: Some(PropertyPath::parse(trimmed)),
        inline_expr: None,
        format,
        start,
        len,
        raw,
    })
}
