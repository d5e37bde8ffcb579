// src/core/html.rs
// Low-level HTML string helpers.
// Deliberately naive, tailored to the plan and overview pages.
// Tag and attribute names match case-insensitively (ASCII only).

use once_cell::sync::Lazy;
use regex::Regex;

use super::sanitize::{decode_entities, normalize_ws};

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>|</(?:p|div)\s*>").unwrap());

/// ASCII-only lowercasing. Byte offsets stay valid for the original string.
pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Locate `<tag ...>...</tag>` in `s` starting at `from`, with `lc` the
/// lowercased copy of `s`. `open_lc`/`close_lc` are lowercase patterns.
///
/// The char after the opening pattern must end the tag name, so `<a` does not
/// match `<abbr` and `<tr` does not match `<track`.
fn find_block(
    s: &str,
    lc: &str,
    open_lc: &str,
    close_lc: &str,
    mut from: usize,
) -> Option<(usize, usize)> {
    loop {
        let start = lc.get(from..)?.find(open_lc)? + from;
        let after = start + open_lc.len();
        let boundary = lc[after..]
            .chars()
            .next()
            .map_or(true, |c| c.is_ascii_whitespace() || c == '>' || c == '/');
        if !boundary {
            from = after;
            continue;
        }
        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc[open_end..].find(close_lc)?;
        return Some((start, open_end + end_rel + close_lc.len()));
    }
}

/// Find the next complete tag block from `from` onwards, case-insensitive.
/// A block runs from the start of the opening tag to the end of the first
/// matching closing tag (no nesting awareness).
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    find_block(s, &to_lower(s), &to_lower(open_tag), &to_lower(close_tag), from)
}

/// Iterator over successive tag blocks; lowercases the haystack once.
pub struct TagBlocks<'a> {
    s: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

impl<'a> Iterator for TagBlocks<'a> {
    /// (start offset, block text)
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let (start, end) = find_block(self.s, &self.lc, &self.open, &self.close, self.pos)?;
        self.pos = end;
        Some((start, &self.s[start..end]))
    }
}

pub fn blocks<'a>(s: &'a str, open_tag: &str, close_tag: &str) -> TagBlocks<'a> {
    TagBlocks {
        s,
        lc: to_lower(s),
        open: to_lower(open_tag),
        close: to_lower(close_tag),
        pos: 0,
    }
}

/// Byte offsets of every `open_tag` opener whose class list contains `class`.
pub fn openers_with_class(s: &str, open_tag: &str, class: &str) -> Vec<usize> {
    let lc = to_lower(s);
    let open = to_lower(open_tag);
    let mut out = Vec::new();
    let mut from = 0usize;
    while let Some(rel) = lc[from..].find(&open) {
        let start = from + rel;
        from = start + open.len();
        let Some(end) = s[start..].find('>') else { break };
        if has_class(&s[start..start + end + 1], class) {
            out.push(start);
        }
    }
    out
}

/// The opening tag of a block, `<td class="v" ...>` (including the `>`).
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(e) => &block[..=e],
        None => block,
    }
}

/// Given `<td ...>INNER</td>`, return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let (Some(open_end), Some(close_start)) = (block.find('>'), block.rfind('<')) {
        if close_start > open_end {
            return &block[open_end + 1..close_start];
        }
    }
    ""
}

/// Value of attribute `name` in an opening tag. Quotes are optional.
pub fn attr_value<'a>(opener: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower(opener);
    let name = to_lower(name);
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find(&name) {
        let at = from + rel;
        from = at + name.len();

        // must be a whole attribute name: preceded by whitespace, followed by '='
        let preceded = lc[..at].chars().next_back().is_some_and(|c| c.is_ascii_whitespace());
        let rest = lc[from..].trim_start();
        if !preceded || !rest.starts_with('=') {
            continue;
        }
        let val_off = opener.len() - rest.len() + 1;
        let val = opener[val_off..].trim_start();

        let value = match val.as_bytes().first() {
            Some(&q) if q == b'"' || q == b'\'' => {
                let body = &val[1..];
                &body[..body.find(q as char).unwrap_or(body.len())]
            }
            _ => {
                let end = val
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(val.len());
                val[..end].trim_end_matches('/')
            }
        };
        return Some(value);
    }
    None
}

/// Numeric attribute (`rowspan`, `colspan`), defaulting to 1.
/// Zero or garbage also yields 1.
pub fn span_attr(opener: &str, name: &str) -> usize {
    attr_value(opener, name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

pub fn has_class(opener: &str, class: &str) -> bool {
    attr_value(opener, "class")
        .is_some_and(|v| v.split_ascii_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
}

/// Replace `<br>` variants and closing block tags with `\n`.
pub fn breaks_to_newlines(s: &str) -> String {
    LINE_BREAK.replace_all(s, "\n").into_owned()
}

/// Remove all tags `<...>`; text and whitespace are kept as-is.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Visible single-line text of a markup fragment.
pub fn text_of(fragment: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(fragment)))
}
