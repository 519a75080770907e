//! Detected-construct data (§3): `ConditionalBlock`, `LoopBlock` and
//! `PlaceholderMatch` are ephemeral — built by the detectors, consumed by the
//! visitors within a single `process_template` call, and never retained.

use ego_tree::NodeId;

use crate::expr::Expr;
use crate::format::Specifier;
use crate::path::PropertyPath;

/// One branch of a conditional block: `Some(expr)` for `{{#if}}`/`{{#elseif}}`,
/// `None` for the trailing `{{else}}`.
#[derive(Debug, Clone)]
pub struct ConditionalBranch {
    pub condition: Option<Expr>,
    pub marker_node: NodeId,
    pub content_nodes: Vec<NodeId>,
}

/// A detected `{{#if}}...{{#elseif}}...{{else}}...{{/if}}` construct.
///
/// Invariants (§3): branches are ordered; at most one `Else` branch, always
/// last if present. "Innermost first" processing order falls out of the
/// walker's dispatch loop itself (§4.8) rather than from a nesting level
/// recorded here: a block's own depth-counted scan finds only its own
/// matching end marker, and nested blocks are re-discovered by later calls
/// into the same sibling range once an outer block's markers are detached.
#[derive(Debug, Clone)]
pub struct ConditionalBlock {
    pub branches: Vec<ConditionalBranch>,
    pub end_marker: NodeId,
    pub is_inline: bool,
    pub is_table_row_form: bool,
}

/// A detected `{{#foreach NAME}}...{{/foreach}}` construct.
#[derive(Debug, Clone)]
pub struct LoopBlock {
    pub collection_path: PropertyPath,
    pub collection_name: String,
    pub start_marker: NodeId,
    pub end_marker: NodeId,
    pub content_nodes: Vec<NodeId>,
    pub is_table_row_form: bool,
}

/// A detected `{{name[:fmt]}}` or `{{(expr)[:fmt]}}` leaf placeholder inside
/// a paragraph's concatenated run text.
#[derive(Debug, Clone)]
pub struct PlaceholderMatch {
    pub variable_path: Option<PropertyPath>,
    pub inline_expr: Option<Expr>,
    pub format: Option<Specifier>,
    pub start: usize,
    pub len: usize,
    /// The literal `{{...}}` text as matched, kept verbatim so
    /// `MissingVariableBehavior::LeaveUnchanged` can splice back exactly
    /// what the author wrote rather than a reconstruction of it.
    pub raw: String,
}
