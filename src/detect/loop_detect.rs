//! Paragraph-level and table-row-level loop detection (§4.7 item 2).

use ego_tree::NodeId;

use crate::blocks::LoopBlock;
use crate::detect::markers;
use crate::error::EngineError;
use crate::path::PropertyPath;

/// Detect a `{{#foreach NAME}}...{{/foreach}}` block starting exactly at
/// `siblings[start]`. Symmetric to `detect::conditional::detect_at`: depth
/// counting over nested `{{#foreach}}` pairs finds the matching end.
pub fn detect_at(
    siblings: &[NodeId],
    texts: &[String],
    start: usize,
    is_table_row_form: bool,
) -> Result<Option<(LoopBlock, usize)>, EngineError> {
    let caps = match markers::foreach_start().captures(&texts[start]) {
        Some(c) => c,
        None => return Ok(None),
    };
    let name = caps["name"].to_string();
    let collection_path = PropertyPath::parse(&name);

    let mut depth = 1u32;
    let mut j = start + 1;

    loop {
        if j >= siblings.len() {
            log::warn!(
                "unterminated {{{{#foreach}}}} at sibling {start}: no matching {{{{/foreach}}}} \
                 found, leaving marker as literal text"
            );
            return Ok(None);
        }
        let text = &texts[j];
        if markers::foreach_start().is_match(text) {
            depth += 1;
            j += 1;
            continue;
        }
        if markers::foreach_end().is_match(text) {
            depth -= 1;
            if depth == 0 {
                let block = LoopBlock {
                    collection_path,
                    collection_name: name,
                    start_marker: siblings[start],
                    end_marker: siblings[j],
                    content_nodes: siblings[start + 1..j].to_vec(),
                    is_table_row_form,
                };
                return Ok(Some((block, j + 1)));
            }
            j += 1;
            continue;
        }
        j += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctree::{DocTree, NodeData};

    fn fake_ids(n: usize) -> Vec<NodeId> {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        (0..n)
            .map(|_| tree.append_child(root, NodeData::Paragraph))
            .collect()
    }

    #[test]
    fn detects_simple_loop() {
        let ids = fake_ids(3);
        let texts = vec![
            "{{#foreach Orders}}".to_string(),
            "body".to_string(),
            "{{/foreach}}".to_string(),
        ];
        let (block, next) = detect_at(&ids, &texts, 0, false).unwrap().unwrap();
        assert_eq!(next, 3);
        assert_eq!(block.collection_name, "Orders");
        assert_eq!(block.content_nodes, vec![ids[1]]);
    }

    #[test]
    fn nested_loops_counted_by_depth() {
        let ids = fake_ids(5);
        let texts = vec![
            "{{#foreach Outer}}".to_string(),
            "{{#foreach Inner}}".to_string(),
            "x".to_string(),
            "{{/foreach}}".to_string(),
            "{{/foreach}}".to_string(),
        ];
        let (block, next) = detect_at(&ids, &texts, 0, false).unwrap().unwrap();
        assert_eq!(next, 5);
        assert_eq!(block.content_nodes, vec![ids[1], ids[2], ids[3]]);
    }

    #[test]
    fn unmatched_foreach_yields_none() {
        let ids = fake_ids(2);
        let texts = vec!["{{#foreach X}}".to_string(), "no end".to_string()];
        assert!(detect_at(&ids, &texts, 0, false).unwrap().is_none());
    }
}
