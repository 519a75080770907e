//! End-to-end scenarios: literal data + a hand-built document tree in,
//! expected text/formatting out. Mirrors the concrete walkthroughs used to
//! validate the engine during design, each one exercising the full
//! detect → walk → visit pipeline rather than a single component.

use docx_template::doctree::format::RunFormat;
use docx_template::value::Mapping;
use docx_template::{
    DocTree, EngineError, MissingVariableBehavior, NodeData, ProcessOptions, TemplateProcessor,
    Value,
};

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

fn table_row(tree: &mut DocTree, table: ego_tree::NodeId, cells: &[&str]) -> ego_tree::NodeId {
    let row = tree.append_child(table, NodeData::TableRow);
    for text in cells {
        let cell = tree.append_child(row, NodeData::TableCell);
        paragraph(tree, cell, text);
    }
    row
}

#[test]
fn placeholder_with_markdown_splits_into_three_runs() {
    let mut tree = DocTree::new();
    let root = tree.root_id();
    let para = paragraph(&mut tree, root, "{{Msg}}");

    let mut data = Mapping::new();
    data.insert("Msg", Value::String("Hello **Alice**!".into()));

    let processor = TemplateProcessor::new(ProcessOptions::default());
    let result = processor.process_template(&mut tree, Value::Mapping(data));
    assert!(result.success);

    let runs = tree.children(para);
    assert_eq!(runs.len(), 3);
    let (t0, f0) = tree.value(runs[0]).unwrap().as_run().unwrap();
    assert_eq!(t0, "Hello ");
    assert!(!f0.bold);
    let (t1, f1) = tree.value(runs[1]).unwrap().as_run().unwrap();
    assert_eq!(t1, "Alice");
    assert!(f1.bold);
    let (t2, f2) = tree.value(runs[2]).unwrap().as_run().unwrap();
    assert_eq!(t2, "!");
    assert!(!f2.bold);
}

#[test]
fn conditional_in_loop_produces_three_lines() {
    let mut tree = DocTree::new();
    let root = tree.root_id();
    paragraph(&mut tree, root, "{{#foreach Orders}}");
    paragraph(
        &mut tree,
        root,
        "{{#if Amount > 1000}}HIGH {{Amount}}{{else}}STD {{Amount}}{{/if}}",
    );
    paragraph(&mut tree, root, "{{/foreach}}");

    let mut data = Mapping::new();
    let mut orders = Vec::new();
    for amount in [500, 1500, 800] {
        let mut m = Mapping::new();
        m.insert("Amount", Value::Integer(amount));
        orders.push(Value::Mapping(m));
    }
    data.insert("Orders", Value::Sequence(orders));

    let processor = TemplateProcessor::new(ProcessOptions::default());
    let result = processor.process_template(&mut tree, Value::Mapping(data));
    assert!(result.success);

    let lines: Vec<String> = tree
        .children(root)
        .iter()
        .map(|&p| tree.concatenated_text(p))
        .collect();
    assert_eq!(lines, vec!["STD 500", "HIGH 1,500", "STD 800"]);
}

#[test]
fn nested_loops_keep_outer_scope_reachable() {
    let mut tree = DocTree::new();
    let root = tree.root_id();
    paragraph(&mut tree, root, "{{#foreach Depts}}");
    paragraph(&mut tree, root, "{{Company}}/{{Name}}: ");
    paragraph(&mut tree, root, "{{#foreach Emps}}");
    paragraph(&mut tree, root, "{{N}} ");
    paragraph(&mut tree, root, "{{/foreach}}");
    paragraph(&mut tree, root, "{{/foreach}}");

    let mut emps = Vec::new();
    for n in ["A", "B"] {
        let mut m = Mapping::new();
        m.insert("N", Value::String(n.into()));
        emps.push(Value::Mapping(m));
    }
    let mut dept = Mapping::new();
    dept.insert("Name", Value::String("Eng".into()));
    dept.insert("Emps", Value::Sequence(emps));

    let mut data = Mapping::new();
    data.insert("Company", Value::String("Acme".into()));
    data.insert("Depts", Value::Sequence(vec![Value::Mapping(dept)]));

    let processor = TemplateProcessor::new(ProcessOptions::default());
    let result = processor.process_template(&mut tree, Value::Mapping(data));
    assert!(result.success);

    let joined: String = tree
        .children(root)
        .iter()
        .map(|&p| tree.concatenated_text(p))
        .collect();
    assert_eq!(joined, "Acme/Eng: A B ");
}

#[test]
fn inline_conditional_with_else_mid_paragraph() {
    let mut tree = DocTree::new();
    let root = tree.root_id();
    let para = paragraph(&mut tree, root, "Hello {{#if VIP}}Premium{{else}}Guest{{/if}}!");

    let mut data = Mapping::new();
    data.insert("VIP", Value::Bool(false));

    let processor = TemplateProcessor::new(ProcessOptions::default());
    let result = processor.process_template(&mut tree, Value::Mapping(data));
    assert!(result.success);
    assert_eq!(tree.concatenated_text(para), "Hello Guest!");
}

#[test]
fn table_row_loop_expands_rows_in_place() {
    let mut tree = DocTree::new();
    let root = tree.root_id();
    let table = tree.append_child(root, NodeData::Table);
    table_row(&mut tree, table, &["Product", "Qty"]);
    table_row(&mut tree, table, &["{{#foreach Rows}}"]);
    table_row(&mut tree, table, &["{{P}}", "{{Q}}"]);
    table_row(&mut tree, table, &["{{/foreach}}"]);

    let mut data = Mapping::new();
    let rows_data = vec![("W", 1), ("G", 2)]
        .into_iter()
        .map(|(p, q)| {
            let mut m = Mapping::new();
            m.insert("P", Value::String(p.into()));
            m.insert("Q", Value::Integer(q));
            Value::Mapping(m)
        })
        .collect();
    data.insert("Rows", Value::Sequence(rows_data));

    let processor = TemplateProcessor::new(ProcessOptions::default());
    let result = processor.process_template(&mut tree, Value::Mapping(data));
    assert!(result.success);

    let rows = tree.children(table);
    assert_eq!(rows.len(), 3);
    let row_texts: Vec<String> = rows.iter().map(|&r| tree.concatenated_text(r)).collect();
    assert_eq!(row_texts, vec!["ProductQty", "W1", "G2"]);
}

#[test]
fn missing_variable_under_throw_aborts_with_error() {
    let mut tree = DocTree::new();
    let root = tree.root_id();
    paragraph(&mut tree, root, "{{X}}");

    let options = ProcessOptions::new().with_missing_variable_behavior(MissingVariableBehavior::Throw);
    let processor = TemplateProcessor::new(options);
    let result = processor.process_template(&mut tree, Value::Mapping(Mapping::new()));

    assert!(!result.success);
    assert_eq!(result.error, Some(EngineError::MissingVariable("X".into())));
}
