//! Property-based tests (§8 "Universal invariants" + §9's call for
//! `proptest` coverage of the inline-conditional reassembly path) that
//! randomize input shape rather than pinning it to one literal example.

use proptest::prelude::*;

use docx_template::doctree::format::RunFormat;
use docx_template::value::Mapping;
use docx_template::{DocTree, MissingVariableBehavior, NodeData, ProcessOptions, TemplateProcessor, Value};

fn paragraph(tree: &mut DocTree, parent: ego_tree::NodeId, text: &str) -> ego_tree::NodeId {
    let para = tree.append_child(parent, NodeData::Paragraph);
    tree.append_child(
        para,
        NodeData::Run {
            text: text.to_string(),
            format: RunFormat::plain(),
        },
    );
    para
}

fn run_format_of(tree: &DocTree, para: ego_tree::NodeId) -> RunFormat {
    let runs = tree.children(para);
    let (_, fmt) = tree.value(runs[0]).unwrap().as_run().unwrap();
    fmt.clone()
}

/// A string with no template syntax in it: proptest's default `char`
/// strategy happily produces `{`/`}`, which would turn the generated text
/// into a (most likely malformed) template rather than plain prose.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{0,40}".prop_filter("no marker syntax", |s| !s.contains("{{"))
}

proptest! {
    /// A paragraph with no `{{…}}` tokens at all passes through unchanged,
    /// text and `RunFormat` alike — the "idempotence on static templates"
    /// invariant (§8) and "formatting preservation" invariant combined.
    #[test]
    fn static_paragraph_is_untouched(text in plain_text(), bold in any::<bool>()) {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        let para = tree.append_child(root, NodeData::Paragraph);
        let original_format = RunFormat { bold, ..RunFormat::default() };
        tree.append_child(
            para,
            NodeData::Run {
                text: text.clone(),
                format: original_format.clone(),
            },
        );

        let processor = TemplateProcessor::new(ProcessOptions::default());
        let result = processor.process_template(&mut tree, Value::Mapping(Mapping::new()));

        prop_assert!(result.success);
        prop_assert_eq!(tree.concatenated_text(para), text);
        prop_assert_eq!(run_format_of(&tree, para), original_format);
    }

    /// A well-formed `{{#foreach}}` over a sequence of length `n`, with a
    /// `k`-paragraph body, leaves exactly `n * k` paragraphs behind (the
    /// start/end marker paragraphs are removed, not counted) — the
    /// "cardinality" invariant (§8).
    #[test]
    fn loop_cardinality_matches_item_count(n in 0usize..8) {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        paragraph(&mut tree, root, "{{#foreach Items}}");
        paragraph(&mut tree, root, "{{.}}");
        paragraph(&mut tree, root, "line two");
        paragraph(&mut tree, root, "{{/foreach}}");

        let mut data = Mapping::new();
        data.insert(
            "Items",
            Value::Sequence((0..n).map(|i| Value::String(i.to_string())).collect()),
        );

        let processor = TemplateProcessor::new(ProcessOptions::default());
        let result = processor.process_template(&mut tree, Value::Mapping(data));

        prop_assert!(result.success);
        prop_assert_eq!(tree.children(root).len(), n * 2);
    }

    /// `@index`/`@first`/`@last`/`@count` track position within the
    /// collection regardless of its length (§8 "loop metadata correctness").
    #[test]
    fn loop_metadata_tracks_position(n in 1usize..12) {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        paragraph(&mut tree, root, "{{#foreach Items}}");
        paragraph(&mut tree, root, "{{@index}}/{{@count}}/{{@first}}/{{@last}}");
        paragraph(&mut tree, root, "{{/foreach}}");

        let mut data = Mapping::new();
        data.insert(
            "Items",
            Value::Sequence((0..n).map(|_| Value::Null).collect()),
        );

        let processor = TemplateProcessor::new(ProcessOptions::default());
        let result = processor.process_template(&mut tree, Value::Mapping(data));
        prop_assert!(result.success);

        let lines: Vec<String> = tree
            .children(root)
            .iter()
            .map(|&p| tree.concatenated_text(p))
            .collect();
        prop_assert_eq!(lines.len(), n);
        for (i, line) in lines.iter().enumerate() {
            let expected = format!(
                "{i}/{n}/{}/{}",
                if i == 0 { "True" } else { "False" },
                if i == n - 1 { "True" } else { "False" },
            );
            prop_assert_eq!(line, &expected);
        }
    }

    /// An inner loop item field masks an outer field of the same name, with
    /// no escape mechanism back to the outer value (§8 "shadowing").
    #[test]
    fn inner_field_shadows_outer(outer in "[a-zA-Z]{1,10}", inner in "[a-zA-Z]{1,10}") {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        paragraph(&mut tree, root, "{{#foreach Items}}");
        paragraph(&mut tree, root, "{{A}}");
        paragraph(&mut tree, root, "{{/foreach}}");

        let mut item = Mapping::new();
        item.insert("A", Value::String(inner.clone()));
        let mut data = Mapping::new();
        data.insert("A", Value::String(outer));
        data.insert("Items", Value::Sequence(vec![Value::Mapping(item)]));

        let processor = TemplateProcessor::new(ProcessOptions::default());
        let result = processor.process_template(&mut tree, Value::Mapping(data));
        prop_assert!(result.success);

        let lines: Vec<String> = tree
            .children(root)
            .iter()
            .map(|&p| tree.concatenated_text(p))
            .collect();
        prop_assert_eq!(lines, vec![inner]);
    }

    /// `and`/`or` short-circuit: the right-hand side is never evaluated once
    /// the result is already decided, so a missing variable there never
    /// raises `MissingVariable` even under `Throw` (§8 "short-circuit"). The
    /// missing name is varied to make sure nothing about its spelling
    /// matters.
    #[test]
    fn short_circuit_never_touches_missing_variable(missing_name in "[A-Z][a-zA-Z]{0,8}") {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        paragraph(
            &mut tree,
            root,
            &format!("{{{{#if false and {missing_name}}}}}x{{{{/if}}}}"),
        );

        let options = ProcessOptions::new()
            .with_missing_variable_behavior(MissingVariableBehavior::Throw);
        let processor = TemplateProcessor::new(options);
        let result = processor.process_template(&mut tree, Value::Mapping(Mapping::new()));

        prop_assert!(result.success);
    }

    /// Whatever the randomized condition and randomized branch text, an
    /// inline `{{#if}}…{{else}}…{{/if}}` leaves no marker syntax behind in
    /// the rendered output (§8 "no leftover markers"), and picks exactly the
    /// branch its condition selects.
    #[test]
    fn inline_conditional_reassembly_picks_one_branch_cleanly(
        cond in any::<bool>(),
        prefix in "[a-zA-Z ]{0,6}",
        then_text in "[a-zA-Z]{1,8}",
        else_text in "[a-zA-Z]{1,8}",
        suffix in "[a-zA-Z ]{0,6}",
    ) {
        let mut tree = DocTree::new();
        let root = tree.root_id();
        let text = format!(
            "{prefix}{{{{#if Flag}}}}{then_text}{{{{else}}}}{else_text}{{{{/if}}}}{suffix}"
        );
        let para = paragraph(&mut tree, root, &text);

        let mut data = Mapping::new();
        data.insert("Flag", Value::Bool(cond));

        let processor = TemplateProcessor::new(ProcessOptions::default());
        let result = processor.process_template(&mut tree, Value::Mapping(data));
        prop_assert!(result.success);

        let out = tree.concatenated_text(para);
        let expected = if cond {
            format!("{prefix}{then_text}{suffix}")
        } else {
            format!("{prefix}{else_text}{suffix}")
        };
        prop_assert_eq!(&out, &expected);
        for marker in ["{{#if", "{{/if}}", "{{#foreach", "{{/foreach}}", "{{else}}", "{{#elseif"] {
            prop_assert!(!out.contains(marker));
        }
    }
}
