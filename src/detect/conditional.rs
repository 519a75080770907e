//! Paragraph-level (and table-row-level) conditional detection (§4.7 item 1).

use ego_tree::NodeId;

use crate::blocks::{ConditionalBlock, ConditionalBranch};
use crate::detect::markers;
use crate::error::EngineError;

/// Detect a conditional block starting exactly at `siblings[start]`, whose
/// text is `texts[start]`. `texts` is precomputed once per sibling range
/// (concatenated run text for a paragraph, or concatenated cell text for a
/// table row) so detection never touches the tree itself.
///
/// Returns `None` when `siblings[start]` is not an `{{#if}}` marker, or when
/// no matching `{{/if}}` is found before the range ends — the latter is the
/// "malformed template" case (§4.7, §7): the caller leaves the text alone.
pub fn detect_at(
    siblings: &[NodeId],
    texts: &[String],
    start: usize,
    is_table_row_form: bool,
) -> Result<Option<(ConditionalBlock, usize)>, EngineError> {
    let caps = match markers::if_start().captures(&texts[start]) {
        Some(c) => c,
        None => return Ok(None),
    };
    let condition =
        crate::expr::parse(&caps["expr"]).map_err(|e| EngineError::InvalidExpression(e.0))?;

    let mut branches = vec![ConditionalBranch {
        condition: Some(condition),
        marker_node: siblings[start],
        content_nodes: Vec::new(),
    }];
    let mut depth = 1u32;
    let mut content_start = start + 1;
    let mut j = start + 1;

    loop {
        if j >= siblings.len() {
            log::warn!(
                "unterminated {{{{#if}}}} at sibling {start}: no matching {{{{/if}}}} found, \
                 leaving marker as literal text"
            );
            return Ok(None);
        }
        let text = &texts[j];

        if markers::if_start().is_match(text) {
            depth += 1;
            j += 1;
            continue;
        }
        if markers::if_end().is_match(text) {
            depth -= 1;
            if depth == 0 {
                branches.last_mut().unwrap().content_nodes = siblings[content_start..j].to_vec();
                let block = ConditionalBlock {
                    branches,
                    end_marker: siblings[j],
                    is_inline: false,
                    is_table_row_form,
                };
                return Ok(Some((block, j + 1)));
            }
            j += 1;
            continue;
        }
        if depth == 1 {
            if let Some(caps) = markers::elseif().captures(text) {
                branches.last_mut().unwrap().content_nodes = siblings[content_start..j].to_vec();
                let cond = crate::expr::parse(&caps["expr"])
                    .map_err(|e| EngineError::InvalidExpression(e.0))?;
                branches.push(ConditionalBranch {
                    condition: Some(cond),
                    marker_node: siblings[j],
                    content_nodes: Vec::new(),
                });
                content_start = j + 1;
                j += 1;
                continue;
            }
            if markers::else_marker().is_match(text) {
                branches.last_mut().unwrap().content_nodes = siblings[content_start..j].to_vec();
                branches.push(ConditionalBranch {
                    condition: None,
                    marker_node: siblings[j],
                    content_nodes: Vec::new(),
                });
                content_start = j + 1;
                j += 1;
                continue;
            }
        }
        j += 1;
    }
}
