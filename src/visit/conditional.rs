//! Conditional Visitor (§4.9): block-mode branch selection, and the
//! branch-selection half of inline mode (text reassembly itself lives in
//! `visit::placeholder`, which owns the shared run-reconstruction pipeline
//! also used by plain placeholder substitution).

use std::rc::Rc;

use crate::blocks::ConditionalBlock;
use crate::context::EvaluationContext;
use crate::detect::InlineNode;
use crate::doctree::DocTree;
use crate::error::EngineError;
use crate::expr;

/// Block mode (§4.9 steps 1-5): evaluate branches in order, the first true
/// one (or a trailing `Else`) wins. Detach every marker and every
/// non-winning branch's content; the winning branch's nodes are left where
/// they were, so the walker's next step re-examines that same position.
pub fn apply_block(
    tree: &mut DocTree,
    block: &ConditionalBlock,
    ctx: &Rc<EvaluationContext>,
) -> Result<(), EngineError> {
    let mut winner_idx = None;
    for (i, branch) in block.branches.iter().enumerate() {
        let wins = match &branch.condition {
            Some(cond) => expr::eval_bool(cond, ctx)?,
            None => true,
        };
        if wins {
            winner_idx = Some(i);
            break;
        }
    }

    let mut detached = 0usize;
    let mut kept = 0usize;
    for (i, branch) in block.branches.iter().enumerate() {
        tree.detach(branch.marker_node);
        detached += 1;
        if Some(i) == winner_idx {
            kept += branch.content_nodes.len();
        } else {
            for &n in &branch.content_nodes {
                tree.detach(n);
                detached += 1;
            }
        }
    }
    tree.detach(block.end_marker);
    detached += 1;

    log::debug!(
        "conditional resolved: branch {winner_idx:?} won, {detached} marker/branch node(s) \
         detached, {kept} node(s) kept"
    );

    Ok(())
}

/// Inline mode's branch selection (§4.9): recursively resolve every
/// `InlineNode::Conditional` into its winning branch's nodes, flattening
/// the parsed sequence into plain `Text`/`Placeholder` nodes. Nested inline
/// conditionals are picked up by the recursive call into the winning
/// branch's own body.
pub fn resolve_inline(
    nodes: Vec<InlineNode>,
    ctx: &Rc<EvaluationContext>,
) -> Result<Vec<InlineNode>, EngineError> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            InlineNode::Conditional(cond) => {
                let mut winner = None;
                for (condition, body) in cond.branches {
                    let wins = match &condition {
                        Some(expr_ast) => expr::eval_bool(expr_ast, ctx)?,
                        None => true,
                    };
                    if wins {
                        winner = Some(body);
                        break;
                    }
                }
                if let Some(body) = winner {
                    out.extend(resolve_inline(body, ctx)?);
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
