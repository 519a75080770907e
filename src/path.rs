//! Property-Path Resolver (§4.1)
//!
//! Navigates a `Value` by a dotted/indexed path into nested maps, sequences
//! and records. Parsing happens once, at placeholder/expression detection
//! time; resolution happens per-context, possibly many times for the same
//! parsed path (e.g. once per loop iteration).

use crate::value::Value;

/// A single step in a property path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// A bare identifier, e.g. `Name` in `Customer.Name`.
    Name(String),
    /// A bracketed indexer, e.g. `0` or `"key"` in `Items[0]` / `Items["key"]`.
    Index(IndexKey),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndexKey {
    Integer(usize),
    String(String),
}

/// An ordered sequence of path segments, with the original dotted text kept
/// around for the resolver's top-level fast path.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPath {
    pub raw: String,
    pub segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// Parse `Customer.Address[0].City` / `Items["k"]` style text into
    /// segments. Does not fail: an unparsable trailing fragment is treated as
    /// a literal name segment, since detectors only ever hand this function
    /// text that already matched the placeholder grammar.
    pub fn parse(text: &str) -> PropertyPath {
        let raw = text.trim().to_string();

        // The bare `.` path segment means "current loop item" (§3); it would
        // otherwise vanish since `.` is ordinarily a segment separator.
        if raw == "." {
            return PropertyPath {
                segments: vec![PathSegment::Name(".".to_string())],
                raw,
            };
        }

        let mut segments = Vec::new();
        let mut chars = raw.chars().peekable();
        let mut current = String::new();

        fn flush_name(buf: &mut String, segments: &mut Vec<PathSegment>) {
            if !buf.is_empty() {
                segments.push(PathSegment::Name(std::mem::take(buf)));
            }
        }

        while let Some(&c) = chars.peek() {
            match c {
                '.' => {
                    chars.next();
                    flush_name(&mut current, &mut segments);
                }
                '[' => {
                    chars.next();
                    flush_name(&mut current, &mut segments);
                    let mut index_text = String::new();
                    for ic in chars.by_ref() {
                        if ic == ']' {
                            break;
                        }
                        index_text.push(ic);
                    }
                    segments.push(PathSegment::Index(parse_index(index_text.trim())));
                }
                _ => {
                    current.push(c);
                    chars.next();
                }
            }
        }
        flush_name(&mut current, &mut segments);

        PropertyPath { raw, segments }
    }

    pub fn single_name(name: impl Into<String>) -> PropertyPath {
        let name = name.into();
        PropertyPath {
            segments: vec![PathSegment::Name(name.clone())],
            raw: name,
        }
    }
}

fn parse_index(text: &str) -> IndexKey {
    if let Some(stripped) = text
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
    {
        return IndexKey::String(stripped.to_string());
    }
    match text.parse::<usize>() {
        Ok(i) => IndexKey::Integer(i),
        Err(_) => IndexKey::String(text.to_string()),
    }
}

/// Resolve `path` against `root`, per the segment semantics in §4.1.
///
/// Never fails: a missing segment yields `None`.
pub fn resolve(root: &Value, path: &PropertyPath) -> Option<Value> {
    // Fast path: a dotted-and-bracket-free name matching a top-level mapping
    // key short-circuits the segment walk entirely.
    if path.segments.len() == 1 {
        if let (Value::Mapping(m), PathSegment::Name(name)) = (root, &path.segments[0]) {
            if let Some(v) = m.get(name) {
                return Some(v.clone());
            }
        }
    }

    let mut current = root.clone();
    for segment in &path.segments {
        current = resolve_segment(&current, segment)?;
    }
    Some(current)
}

fn resolve_segment(value: &Value, segment: &PathSegment) -> Option<Value> {
    match (value, segment) {
        (Value::Mapping(m), PathSegment::Name(name)) => m.get(name).cloned(),
        (Value::Mapping(m), PathSegment::Index(IndexKey::String(key))) => m.get(key).cloned(),
        (Value::Mapping(_), PathSegment::Index(IndexKey::Integer(_))) => None,

        (Value::Record(r), PathSegment::Name(name)) => resolve_record_field(r.as_ref(), name),
        (Value::Record(r), PathSegment::Index(IndexKey::String(key))) => {
            resolve_record_field(r.as_ref(), key)
        }
        (Value::Record(_), PathSegment::Index(IndexKey::Integer(_))) => None,

        (Value::Sequence(_), PathSegment::Name(_)) => None,
        (Value::Sequence(seq), PathSegment::Index(IndexKey::Integer(i))) => seq.get(*i).cloned(),
        (Value::Sequence(_), PathSegment::Index(IndexKey::String(_))) => None,

        _ => None,
    }
}

fn resolve_record_field(record: &dyn crate::value::Record, name: &str) -> Option<Value> {
    // Name on Record is case-insensitive; the trait contract already performs
    // the case-insensitive match, but we normalize here too so records that
    // do a naive exact match still behave per spec.
    record.field(name).or_else(|| {
        let lower = name.to_ascii_lowercase();
        if lower != name {
            record.field(&lower)
        } else {
            None
        }
    })
}
