//! Template Processor Demo CLI
//!
//! A minimal illustrative binary showing `TemplateProcessor` wired up
//! against the in-crate `DocTree`. Not part of the public API, and not
//! wired into `[[bin]]` in `Cargo.toml` — this crate stays a pure library;
//! a real front-end would drive the engine against a `.docx` reader/writer
//! instead of building a `DocTree` by hand from a JSON data file.
//!
//! Usage:
//!   template_cli --data `<data.json>`
//!   template_cli --demo

use std::env;
use std::fs;
use std::process::ExitCode;

use docx_template::doctree::format::RunFormat;
use docx_template::value::Mapping;
use docx_template::{DocTree, NodeData, ProcessOptions, TemplateProcessor, Value};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let data = if args.iter().any(|a| a == "--demo") {
        demo_data()
    } else if let Some(pos) = args.iter().position(|a| a == "--data") {
        let Some(path) = args.get(pos + 1) else {
            eprintln!("Error: --data requires a file path");
            return ExitCode::FAILURE;
        };
        match fs::read_to_string(path).and_then(|s| {
            serde_json::from_str::<serde_json::Value>(&s).map_err(std::io::Error::other)
        }) {
            Ok(json) => Value::from_json(json),
            Err(e) => {
                eprintln!("Error: failed to read data file '{path}': {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        eprintln!("Usage: template_cli --data <data.json>");
        eprintln!("       template_cli --demo");
        return ExitCode::FAILURE;
    };

    let mut tree = demo_tree();
    let processor = TemplateProcessor::new(ProcessOptions::default());
    let result = processor.process_template(&mut tree, data);

    if !result.success {
        eprintln!("Error: {}", result.error.expect("failure carries an error"));
        return ExitCode::FAILURE;
    }

    println!("Replacements made: {}", result.replacement_count);
    if !result.missing_variables.is_empty() {
        println!("Missing variables: {:?}", result.missing_variables);
    }
    println!();
    print_tree(&tree, tree.root_id(), 0);

    ExitCode::SUCCESS
}

fn demo_data() -> Value {
    let mut customer = Mapping::new();
    customer.insert("Name", Value::String("Ada Lovelace".into()));
    customer.insert("VIP", Value::Bool(true));

    let mut root = Mapping::new();
    root.insert("Customer", Value::Mapping(customer));
    root.insert(
        "Items",
        Value::Sequence(vec![
            Value::String("Widget".into()),
            Value::String("Gadget".into()),
        ]),
    );
    Value::Mapping(root)
}

/// A tree with one placeholder paragraph and one loop, standing in for
/// what a real `.docx` reader would hand back.
fn demo_tree() -> DocTree {
    let mut tree = DocTree::new();
    let root = tree.root_id();

    let greeting = tree.append_child(root, NodeData::Paragraph);
    tree.append_child(
        greeting,
        NodeData::Run {
            text: "Dear {{Customer.Name}},".into(),
            format: RunFormat::plain(),
        },
    );

    let start = tree.append_child(root, NodeData::Paragraph);
    tree.append_child(
        start,
        NodeData::Run {
            text: "{{#foreach Items}}".into(),
            format: RunFormat::plain(),
        },
    );
    let body = tree.append_child(root, NodeData::Paragraph);
    tree.append_child(
        body,
        NodeData::Run {
            text: "- {{.}}".into(),
            format: RunFormat::plain(),
        },
    );
    let end = tree.append_child(root, NodeData::Paragraph);
    tree.append_child(
        end,
        NodeData::Run {
            text: "{{/foreach}}".into(),
            format: RunFormat::plain(),
        },
    );

    tree
}

fn print_tree(tree: &DocTree, id: ego_tree::NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    if let Some(data) = tree.value(id) {
        match data {
            NodeData::Run { text, .. } => println!("{indent}Run: {text:?}"),
            other => println!("{indent}{other:?}"),
        }
    }
    for child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}
