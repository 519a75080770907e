//! Block detectors (§4.7): pure readers over the document tree that locate
//! conditional/loop blocks and inline placeholders without ever mutating it.

pub mod conditional;
pub mod loop_detect;
pub mod markers;
pub mod placeholder;

use ego_tree::NodeId;

use crate::blocks::{ConditionalBlock, LoopBlock};
use crate::doctree::DocTree;
use crate::error::EngineError;

pub use placeholder::{parse_inline, InlineConditional, InlineNode};

/// What the document walker found when it looked at `siblings[start]`.
pub enum Detected {
    Conditional(ConditionalBlock, usize),
    Loop(LoopBlock, usize),
    None,
}

/// Compute the text a block detector should read for each sibling: a
/// paragraph's concatenated run text, or (in table-row form) a table row's
/// concatenated cell text.
pub fn sibling_texts(tree: &DocTree, siblings: &[NodeId]) -> Vec<String> {
    siblings.iter().map(|&id| tree.concatenated_text(id)).collect()
}

/// Try conditional detection, then loop detection, at `siblings[start]`.
/// Conditional wins ties because a template never starts a loop and a
/// conditional on the same marker text.
pub fn detect_block(
    siblings: &[NodeId],
    texts: &[String],
    start: usize,
    is_table_row_form: bool,
) -> Result<Detected, EngineError> {
    if let Some((block, next)) = conditional::detect_at(siblings, texts, start, is_table_row_form)?
    {
        return Ok(Detected::Conditional(block, next));
    }
    if let Some((block, next)) = loop_detect::detect_at(siblings, texts, start, is_table_row_form)?
    {
        return Ok(Detected::Loop(block, next));
    }
    Ok(Detected::None)
}
