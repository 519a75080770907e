//! `docx-template`: a template engine for `.docx` documents.
//!
//! Given a document tree containing `{{name}}` placeholders, `{{#if}}`/
//! `{{#foreach}}` blocks and a structured data bundle, [`engine::TemplateProcessor`]
//! expands every construct in place, preserving run-level formatting and
//! table/list structure. The `.docx` container itself (zip + OOXML), a real
//! reader/writer, and any CLI/GUI front-end are out of scope for this
//! crate — see [`doctree::backend::DocumentBackend`] for the boundary a host
//! implements to supply its own document model.
//!
//! ```
//! use docx_template::{DocTree, NodeData, ProcessOptions, TemplateProcessor, Value};
//! use docx_template::doctree::format::RunFormat;
//!
//! let mut tree = DocTree::new();
//! let root = tree.root_id();
//! let para = tree.append_child(root, NodeData::Paragraph);
//! tree.append_child(para, NodeData::Run { text: "Hello {{Name}}!".into(), format: RunFormat::plain() });
//!
//! let mut data = docx_template::value::Mapping::new();
//! data.insert("Name", Value::String("Ada".into()));
//!
//! let processor = TemplateProcessor::new(ProcessOptions::default());
//! let result = processor.process_template(&mut tree, Value::Mapping(data));
//! assert!(result.success);
//! assert_eq!(tree.concatenated_text(para), "Hello Ada!");
//! ```

pub mod adapters;
pub mod blocks;
pub mod context;
pub mod detect;
pub mod doctree;
pub mod engine;
pub mod error;
pub mod expr;
pub mod format;
pub mod locale;
pub mod path;
pub mod value;

mod visit;

pub use context::EvaluationContext;
pub use doctree::{DocTree, NodeData};
pub use engine::{MissingVariableBehavior, ProcessOptions, ProcessResult, TemplateProcessor};
pub use error::EngineError;
pub use locale::Locale;
pub use value::Value;
