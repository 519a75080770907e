//! Shared marker regexes for the three detection passes (§4.7).

use regex::Regex;
use std::sync::OnceLock;

fn cell(re: &'static str) -> Regex {
    Regex::new(re).expect("static marker regex must compile")
}

// `expr` excludes `{`/`}` rather than using a bare `.+?`: a whole-paragraph
// inline conditional like `{{#if A}}x{{/if}}` has no surrounding literal
// text, so an unrestricted lazy match would happily stretch `expr` past the
// first `}}` looking for *some* trailing `}}` to anchor `$` on (the last one
// in the string), capturing garbage and failing `expr::parse` instead of
// correctly falling through to inline mode (§4.7, §4.9).
pub fn if_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"^\s*\{\{\s*#if\s+(?P<expr>[^{}]+?)\s*\}\}\s*$"))
}

pub fn elseif() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"^\s*\{\{\s*#elseif\s+(?P<expr>[^{}]+?)\s*\}\}\s*$"))
}

/// Tolerates both `{{else}}` and `{{#else}}` spellings (§9 open question).
pub fn else_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"^\s*\{\{\s*#?else\s*\}\}\s*$"))
}

pub fn if_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"^\s*\{\{\s*/if\s*\}\}\s*$"))
}

pub fn foreach_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"^\s*\{\{\s*#foreach\s+(?P<name>[^}\s]+)\s*\}\}\s*$"))
}

pub fn foreach_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"^\s*\{\{\s*/foreach\s*\}\}\s*$"))
}

/// Inline (non-anchored) versions of the same markers, used when scanning a
/// paragraph's concatenated run text rather than a whole-paragraph string.
pub fn inline_if_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"\{\{\s*#if\s+(?P<expr>[^}]+?)\s*\}\}"))
}

pub fn inline_elseif() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"\{\{\s*#elseif\s+(?P<expr>[^}]+?)\s*\}\}"))
}

pub fn inline_else() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"\{\{\s*#?else\s*\}\}"))
}

pub fn inline_if_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| cell(r"\{\{\s*/if\s*\}\}"))
}

/// `{{name[:fmt]}}` / `{{(expr)[:fmt]}}` leaf placeholder, per the wire
/// grammar in §6. Captures the inner `name_or_expr` and the optional
/// specifier text separately.
pub fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        cell(r"\{\{\s*(?P<body>[^{}:]+?)\s*(:\s*(?P<fmt>[^{}]+?)\s*)?\}\}")
    })
}

/// Combined scanner used by `detect::placeholder::parse_inline`: at any
/// position it is either the start of an inline conditional or a leaf
/// placeholder, never both — alternation order makes `#if` win the tie.
pub fn inline_top_level() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        cell(
            r"\{\{\s*#if\s+(?P<t_if_expr>[^}]+?)\s*\}\}|\{\{\s*(?P<t_ph_body>[^{}:]+?)\s*(:\s*(?P<t_ph_fmt>[^{}]+?)\s*)?\}\}",
        )
    })
}

/// Combined block-marker scanner used once inside an inline conditional to
/// find its matching end via depth counting over nested `#if`/`/if` pairs.
pub fn inline_block_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        cell(
            r"\{\{\s*#if\s+(?P<b_if_expr>[^}]+?)\s*\}\}|\{\{\s*#elseif\s+(?P<b_elseif_expr>[^}]+?)\s*\}\}|\{\{\s*(?P<b_else>#?else)\s*\}\}|\{\{\s*(?P<b_endif>/if)\s*\}\}",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_if_start() {
        let caps = if_start().captures("  {{#if Amount > 10}}  ").unwrap();
        assert_eq!(&caps["expr"], "Amount > 10");
    }

    #[test]
    fn else_marker_tolerates_both_spellings() {
        assert!(else_marker().is_match("{{else}}"));
        assert!(else_marker().is_match("{{#else}}"));
    }

    #[test]
    fn matches_foreach_start() {
        let caps = foreach_start().captures("{{#foreach Orders}}").unwrap();
        assert_eq!(&caps["name"], "Orders");
    }

    #[test]
    fn placeholder_splits_name_and_format() {
        let caps = placeholder().captures("{{Amount:N2}}").unwrap();
        assert_eq!(&caps["body"], "Amount");
        assert_eq!(&caps["fmt"], "N2");
    }

    #[test]
    fn placeholder_without_format() {
        let caps = placeholder().captures("{{Name}}").unwrap();
        assert_eq!(&caps["body"], "Name");
        assert!(caps.name("fmt").is_none());
    }
}
