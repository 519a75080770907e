//! Illustrative host-adapter notes (§1, §3): this crate ships only the
//! in-memory [`crate::doctree::DocTree`] reference backend. A host embedding
//! the engine against a real `.docx` reader/writer (e.g. the `docx-rust`
//! crate's object model) implements [`crate::doctree::backend::DocumentBackend`]
//! over its own node types instead of `DocTree`.
//!
//! This module carries no code of its own — it is not a dependency, just a
//! map from this crate's node shapes to the nearest equivalent in
//! `docx-rust`, kept here so a future adapter crate has somewhere to start
//! from without re-deriving the mapping.
//!
//! | This crate               | `docx-rust` (`docx_rust::document`)       |
//! |---------------------------|-------------------------------------------|
//! | [`crate::doctree::NodeData::Paragraph`] | `document::Paragraph`            |
//! | [`crate::doctree::NodeData::Run`]       | `document::Run` + `RunProperty`   |
//! | [`crate::doctree::format::RunFormat`]   | `RunProperty` (`bold`, `italics`, `strike`, `fonts`, `color`, `size`) |
//! | [`crate::doctree::NodeData::Table`]     | `document::Table`                 |
//! | [`crate::doctree::NodeData::TableRow`]  | `document::TableRow`              |
//! | [`crate::doctree::NodeData::TableCell`] | `document::TableCell`             |
//!
//! `RunFormat` is deliberately a flat, opaque bag rather than a typed
//! wrapper over any specific OOXML run-property schema (§3): the engine
//! only ever copies and merges it, never interprets individual fields, so a
//! host backend can carry its own richer property type behind the same
//! shape without this crate needing to track OOXML's full run-property
//! grammar.
