//! Markdown-inline scanner (§4.2)
//!
//! Splits a resolved string value into formatting fragments (bold/italic/
//! strike) and explicit line breaks, for re-assembly into document runs by
//! the placeholder visitor. This is a tiny, non-recursive variant of
//! Markdown inline emphasis: no links, no code spans, no escaping — those
//! belong to the document's own rich-text model, not to substituted data.

/// One run of text with the formatting flags active for it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownFragment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
}

/// A scanned value: an ordered sequence of fragments and line breaks.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownPiece {
    Fragment(MarkdownFragment),
    LineBreak,
}

/// Scan `text` for `**bold**`/`__bold__`, `*italic*`/`_italic_`, `~~strike~~`
/// and `***bold+italic***`, and for line breaks (`\n`, `\r\n`, `\r`).
pub fn scan(text: &str) -> Vec<MarkdownPiece> {
    let mut pieces = Vec::new();
    for (i, line) in split_lines(text).into_iter().enumerate() {
        if i > 0 {
            pieces.push(MarkdownPiece::LineBreak);
        }
        scan_line(&line, false, false, false, &mut pieces);
    }
    pieces
}

fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(|s| s.to_string())
        .collect()
}

fn scan_line(
    line: &str,
    inherit_bold: bool,
    inherit_italic: bool,
    inherit_strike: bool,
    out: &mut Vec<MarkdownPiece>,
) {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    let mut plain = String::new();

    macro_rules! flush_plain {
        () => {
            if !plain.is_empty() {
                out.push(MarkdownPiece::Fragment(MarkdownFragment {
                    text: std::mem::take(&mut plain),
                    bold: inherit_bold,
                    italic: inherit_italic,
                    strike: inherit_strike,
                }));
            }
        };
    }

    while i < chars.len() {
        if let Some((delim_len, bold, italic, strike)) = delimiter_at(&chars, i) {
            if let Some(end) = find_closing(&chars, i + delim_len, delim_len, chars[i]) {
                flush_plain!();
                let inner: String = chars[i + delim_len..end].iter().collect();
                scan_line(
                    &inner,
                    inherit_bold || bold,
                    inherit_italic || italic,
                    inherit_strike || strike,
                    out,
                );
                i = end + delim_len;
                continue;
            }
        }
        plain.push(chars[i]);
        i += 1;
    }
    flush_plain!();
}

/// Returns `(delimiter_len, bold, italic, strike)` if `chars[i..]` starts a
/// recognized delimiter run.
fn delimiter_at(chars: &[char], i: usize) -> Option<(usize, bool, bool, bool)> {
    let c = *chars.get(i)?;
    if c != '*' && c != '_' && c != '~' {
        return None;
    }
    let run_len = chars[i..].iter().take_while(|&&ch| ch == c).count();
    match (c, run_len.min(3)) {
        ('~', n) if n >= 2 => Some((2, false, false, true)),
        (_, 3) => Some((3, true, true, false)),
        (_, 2) => Some((2, true, false, false)),
        (_, 1) => Some((1, false, true, false)),
        _ => None,
    }
}

/// Find the index of a matching closing delimiter of the same `marker`
/// repeated `len` times, starting the search at `from`.
fn find_closing(chars: &[char], from: usize, len: usize, marker: char) -> Option<usize> {
    let mut i = from;
    while i + len <= chars.len() {
        if chars[i..i + len].iter().all(|&c| c == marker) {
            // Require the delimiter not to bleed into a longer run, to avoid
            // e.g. closing a single `*` on the first char of `**`.
            let extends = chars.get(i + len) == Some(&marker);
            if !extends {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
