//! Document Walker (§4.8): a single traversal that dispatches each
//! recognized construct to a visitor, processing innermost constructs
//! before their enclosing ones.
//!
//! The walker never recomputes a parent's child list after a dispatch.
//! Instead it snapshots the sibling ids once, and relies on `detach`
//! leaving a node's id valid but parentless (§4.6): a block's marker nodes
//! and losing branches become unreachable via `parent()`, so the index
//! cursor just skips past them on its next step, landing naturally on
//! whatever now occupies that position — surviving content, a newly
//! exposed nested marker, or the next original sibling. This is how
//! "innermost first" falls out of the simple dispatch loop below rather
//! than needing a separate upfront nesting-level pass.

use std::rc::Rc;

use ego_tree::NodeId;

use crate::context::EvaluationContext;
use crate::detect::{self, Detected};
use crate::doctree::{DocTree, NodeData};
use crate::engine::VisitState;
use crate::error::EngineError;

use super::{conditional, loop_visitor, placeholder};

/// Walk every child of `parent`, dispatching blocks and placeholders.
pub fn walk(
    tree: &mut DocTree,
    parent: NodeId,
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
) -> Result<(), EngineError> {
    let ids = tree.children(parent);
    walk_ids(tree, &ids, ctx, state)
}

/// Walk an explicit, already-known list of sibling ids. Used directly by
/// the loop visitor over a single iteration's freshly cloned body, where
/// there is no single `parent` whose *entire* child list shares one
/// context (siblings before/after the loop keep the enclosing context).
pub(crate) fn walk_ids(
    tree: &mut DocTree,
    ids: &[NodeId],
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
) -> Result<(), EngineError> {
    let mut idx = 0usize;

    while idx < ids.len() {
        let node = ids[idx];

        if tree.parent(node).is_none() {
            idx += 1;
            continue;
        }

        let data = match tree.value(node).cloned() {
            Some(d) => d,
            None => {
                idx += 1;
                continue;
            }
        };

        match data {
            NodeData::Paragraph => {
                let texts = detect::sibling_texts(tree, &ids[idx..]);
                match detect::detect_block(&ids[idx..], &texts, 0, false)? {
                    Detected::Conditional(block, _) => {
                        log::trace!("dispatching conditional block at paragraph {node:?}");
                        conditional::apply_block(tree, &block, ctx)?;
                        continue;
                    }
                    Detected::Loop(block, _) => {
                        log::trace!("dispatching loop block at paragraph {node:?}");
                        loop_visitor::apply_loop(tree, &block, ctx, state)?;
                        continue;
                    }
                    Detected::None => {
                        placeholder::visit_paragraph(tree, node, ctx, state)?;
                        idx += 1;
                    }
                }
            }
            NodeData::Table => {
                let rows = tree.children(node);
                walk_rows(tree, &rows, ctx, state)?;
                idx += 1;
            }
            NodeData::TableRow => {
                // Only reached when the loop visitor hands `walk_ids` a
                // paragraph-form content list that happens to contain a row
                // directly (never via `walk_rows`, which has its own
                // dispatch below); treat it the same as an ordinary
                // no-block row: descend into its cells.
                for cell in tree.children(node) {
                    walk(tree, cell, ctx, state)?;
                }
                idx += 1;
            }
            _ => {
                // Run/TableCell/Document never appear as a direct entry in
                // a sibling list the walker iterates: runs live under
                // paragraphs, cells are handled by the row dispatch above.
                idx += 1;
            }
        }
    }

    Ok(())
}

/// Table-row-form detection happens at the table level before ordinary
/// per-row traversal (§4.8 step 5): a loop or conditional whose markers
/// occupy whole rows is recognized here first. Shared between a table's own
/// traversal and the loop visitor's re-entry on a table-row-form loop's
/// freshly cloned rows, so nested row-form blocks resolve the same way
/// whether or not they sit inside another loop's per-iteration clone.
pub(crate) fn walk_rows(
    tree: &mut DocTree,
    rows: &[NodeId],
    ctx: &Rc<EvaluationContext>,
    state: &mut VisitState,
) -> Result<(), EngineError> {
    let mut idx = 0usize;

    while idx < rows.len() {
        let row = rows[idx];

        if tree.parent(row).is_none() {
            idx += 1;
            continue;
        }

        let texts = detect::sibling_texts(tree, &rows[idx..]);
        match detect::detect_block(&rows[idx..], &texts, 0, true)? {
            Detected::Conditional(block, _) => {
                log::trace!("dispatching table-row conditional at row {row:?}");
                conditional::apply_block(tree, &block, ctx)?;
                continue;
            }
            Detected::Loop(block, _) => {
                log::trace!("dispatching table-row loop at row {row:?}");
                loop_visitor::apply_loop(tree, &block, ctx, state)?;
                continue;
            }
            Detected::None => {
                for cell in tree.children(row) {
                    walk(tree, cell, ctx, state)?;
                }
                idx += 1;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctree::format::RunFormat;
    use crate::engine::MissingVariableBehavior;
    use crate::format::BooleanFormatterRegistry;
    use crate::locale::Locale;
    use crate::value::{Mapping, Value};
    use std::collections::BTreeSet;

    fn state() -> VisitState<'static> {
        let locale: &'static Locale = Box::leak(Box::new(Locale::invariant()));
        let registry: &'static BooleanFormatterRegistry =
            Box::leak(Box::new(BooleanFormatterRegistry::with_builtins()));
        VisitState {
            locale,
            registry,
            missing_variable_behavior: MissingVariableBehavior::LeaveUnchanged,
            replacement_count: 0,
            missing_variables: BTreeSet::new(),
        }
    }

    fn row_with_cell_text(tree: &mut DocTree, parent: NodeId, text: &str) -> NodeId {
        let row = tree.append_child(parent, NodeData::TableRow);
        let cell = tree.append_child(row, NodeData::TableCell);
        let para = tree.append_child(cell, NodeData::Paragraph);
        tree.append_child(
            para,
            NodeData::Run {
                text: text.to_string(),
                format: RunFormat::plain(),
            },
        );
        row
    }

    /// A table-row-form loop's cloned rows must still have their cells
    /// walked for placeholder substitution, not just detached/re-parented.
    #[test]
    fn table_row_loop_substitutes_cell_placeholders() {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        let table = tree.append_child(root, NodeData::Table);

        row_with_cell_text(&mut tree, table, "Header");
        row_with_cell_text(&mut tree, table, "{{#foreach Rows}}");
        row_with_cell_text(&mut tree, table, "{{P}}");
        row_with_cell_text(&mut tree, table, "{{/foreach}}");

        let mut rows_data = Vec::new();
        for p in ["W", "G"] {
            let mut m = Mapping::new();
            m.insert("P", Value::String(p.to_string()));
            rows_data.push(Value::Mapping(m));
        }
        let mut root_data = Mapping::new();
        root_data.insert("Rows", Value::Sequence(rows_data));
        let ctx = Rc::new(EvaluationContext::global(Value::Mapping(root_data)));
        let mut st = state();

        walk(&mut tree, root, &ctx, &mut st).unwrap();

        let rows = tree.children(table);
        assert_eq!(rows.len(), 3);
        let texts: Vec<String> = rows.iter().map(|&r| tree.concatenated_text(r)).collect();
        assert_eq!(texts, vec!["Header", "W", "G"]);
    }
}
