//! Format specifier parsing: the optional `:fmt` tail of a placeholder.
//!
//! A specifier is a named boolean format (`yesno`), a numeric pattern (`N2`),
//! a date pattern (anything containing a `%` strftime directive), or an
//! inline boolean expression when the *variable position itself* is a
//! parenthesized expression (that case is detected upstream, in
//! `detect::placeholder`, not here).

/// The parsed `:fmt` portion of a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Specifier {
    /// A named specifier such as `yesno`, `checkbox`, or a registry custom
    /// name, optionally carrying an argument after a second `:`.
    Named { name: String, arg: Option<String> },
    /// A numeric pattern, e.g. `N2` (2 fractional digits) or `N0`.
    Numeric { decimals: u32 },
    /// A `strftime`-style date pattern, passed through to `chrono` verbatim.
    DatePattern(String),
}

impl Specifier {
    /// Parse specifier text (everything after the `:` in `{{VAR:FMT}}`).
    pub fn parse(text: &str) -> Specifier {
        let text = text.trim();
        if let Some(decimals) = parse_numeric_pattern(text) {
            return Specifier::Numeric { decimals };
        }
        if text.contains('%') {
            return Specifier::DatePattern(text.to_string());
        }
        match text.split_once(':') {
            Some((name, arg)) => Specifier::Named {
                name: name.to_string(),
                arg: Some(arg.to_string()),
            },
            None => Specifier::Named {
                name: text.to_string(),
                arg: None,
            },
        }
    }
}

/// Recognizes patterns like `N0`, `N2`, `n4` (.NET-style numeric format).
fn parse_numeric_pattern(text: &str) -> Option<u32> {
    let mut chars = text.chars();
    match chars.next() {
        Some('N') | Some('n') => {}
        _ => return None,
    }
    let rest: String = chars.collect();
    if rest.is_empty() {
        return Some(0);
    }
    rest.parse::<u32>().ok()
}
