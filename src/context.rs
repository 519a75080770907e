//! Evaluation Context (§3, §4.5)
//!
//! A linked chain of frames: a `Global` root and zero or more `Loop` frames.
//! Resolution is strictly innermost-first with no shadowing escape — an
//! inner name masks an outer name of the same text, permanently, for the
//! lifetime of that frame.

use std::rc::Rc;

use crate::path::{PathSegment, PropertyPath};
use crate::value::Value;

/// One level of the evaluation-context chain.
///
/// Built as an `Rc`-chained linked list: pushing a loop frame is O(1) and
/// shares the parent chain rather than deep-cloning it, matching how the
/// document walker pushes/pops frames once per loop iteration.
#[derive(Debug, Clone)]
pub enum EvaluationContext {
    Global {
        root: Rc<Value>,
    },
    Loop {
        item: Value,
        index: usize,
        count: usize,
        #[allow(dead_code)]
        collection_name: String,
        parent: Rc<EvaluationContext>,
    },
}

impl EvaluationContext {
    pub fn global(root: Value) -> EvaluationContext {
        EvaluationContext::Global { root: Rc::new(root) }
    }

    /// Push a new loop frame on top of `self`, returning the child context.
    pub fn push_loop(
        self: &Rc<Self>,
        item: Value,
        index: usize,
        count: usize,
        collection_name: impl Into<String>,
    ) -> EvaluationContext {
        EvaluationContext::Loop {
            item,
            index,
            count,
            collection_name: collection_name.into(),
            parent: self.clone(),
        }
    }

    pub fn parent(&self) -> Option<&EvaluationContext> {
        match self {
            EvaluationContext::Global { .. } => None,
            EvaluationContext::Loop { parent, .. } => Some(parent),
        }
    }

    pub fn root_data(&self) -> &Value {
        match self {
            EvaluationContext::Global { root } => root,
            EvaluationContext::Loop { parent, .. } => parent.root_data(),
        }
    }

    /// Resolve a path, trying loop metadata and the current frame first, then
    /// falling back to the parent chain. Returns `None` only when no frame in
    /// the chain (including the `Global` root mapping) resolves the path.
    pub fn resolve(&self, path: &PropertyPath) -> Option<Value> {
        match self {
            EvaluationContext::Global { root } => crate::path::resolve(root, path),
            EvaluationContext::Loop {
                item,
                index,
                count,
                parent,
                ..
            } => {
                if let Some(first_name) = first_name(path) {
                    match first_name {
                        "@index" => return Some(Value::Integer(*index as i64)),
                        "@first" => return Some(Value::Bool(*index == 0)),
                        "@last" => return Some(Value::Bool(*index + 1 == *count)),
                        "@count" => return Some(Value::Integer(*count as i64)),
                        "." | "this" => {
                            return resolve_rest(item, path, 1);
                        }
                        _ => {}
                    }
                }
                // Try the current item's own fields before delegating outward.
                if let Some(v) = crate::path::resolve(item, path) {
                    return Some(v);
                }
                parent.resolve(path)
            }
        }
    }
}

fn first_name(path: &PropertyPath) -> Option<&str> {
    match path.segments.first()? {
        PathSegment::Name(n) => Some(n.as_str()),
        PathSegment::Index(_) => None,
    }
}

/// Resolve the remaining segments of `path` (after `skip` leading segments)
/// against `base`, used for `.`/`this` followed by further navigation (e.g.
/// `this.Name`, though the typical case is bare `.`/`this`).
fn resolve_rest(base: &Value, path: &PropertyPath, skip: usize) -> Option<Value> {
    if path.segments.len() <= skip {
        return Some(base.clone());
    }
    let rest = PropertyPath {
        raw: path.raw.clone(),
        segments: path.segments[skip..].to_vec(),
    };
    crate::path::resolve(base, &rest)
}
