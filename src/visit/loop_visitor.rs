//! Loop Visitor (§4.10): per-item body expansion under a fresh loop frame.
//!
//! Each iteration's clone is fully resolved (including any further-nested
//! conditionals, loops or placeholders) before the next iteration's clone is
//! even created, by recursing into `visit::composite::walk_ids` with the
//! freshly pushed per-item context. The outer walker cannot do this part of
//! the work itself: siblings before and after the loop body share the
//! enclosing context, but the cloned body needs a new one per item, so the
//! loop visitor drives that sub-traversal directly.

use std::rc::Rc;

use ego_tree::NodeId;

use crate::blocks::LoopBlock;
use crate::context::EvaluationContext;
use crate::doctree::DocTree;
use crate::engine::VisitState;
use crate::error::EngineError;
use crate::value::Value;

pub fn apply_loop(
    tree: &mut DocTree,
    block: &LoopBlock,
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
) -> Result<(), EngineError> {
    let items = match ctx.resolve(&block.collection_path) {
        None => Vec::new(),
        Some(Value::Sequence(items)) => items,
        Some(other) => {
            return Err(EngineError::TypeError(format!(
                "{} does not resolve to a collection (got {other:?})",
                block.collection_name
            )));
        }
    };

    let count = items.len();
    for (index, item) in items.into_iter().enumerate() {
        let loop_ctx = Rc::new(ctx.push_loop(item, index, count, block.collection_name.clone()));

        let mut clone_ids: Vec<NodeId> = Vec::with_capacity(block.content_nodes.len());
        for &content in &block.content_nodes {
            clone_ids.push(tree.clone_subtree_before(content, block.end_marker));
        }

        if block.is_table_row_form {
            super::composite::walk_rows(tree, &clone_ids, &loop_ctx, state)?;
        } else {
            super::composite::walk_ids(tree, &clone_ids, &loop_ctx, state)?;
        }
    }

    tree.detach(block.start_marker);
    for &content in &block.content_nodes {
        tree.detach(content);
    }
    tree.detach(block.end_marker);

    log::debug!(
        "loop '{}' expanded {count} item(s) over {} body node(s)",
        block.collection_name,
        block.content_nodes.len()
    );

    Ok(())
}
