// src/core/html.rs
//! Tolerant, allocation-light HTML tag scanner.
//!
//! Not a DOM: it walks tags in document order and finds where an element ends
//! by keeping a small stack of the elements opened inside it. That is all the
//! calendar page needs for a descendant selector like `.day .author a`.
//!
//! Recovery follows what browsers and libxml2 do for the common cases: optional
//! end tags (`<td>`, `<li>`, `<p>`, ...) close at the next sibling, an element
//! still open when its parent closes ends there, and anything left open at end
//! of input ends at end of input. The only hard error is a tag with no `>`.
//!
//! Offsets are byte offsets into the scanned string. Every delimiter we split
//! on (`<`, `>`, quotes) is ASCII, so the offsets are always char boundaries.

use log::debug;

use crate::core::sanitize::decode_entities;
use crate::error::{Result, ScrapeError};

/// Elements whose content is raw text; tags inside them are not tags.
const RAW_TEXT: [&str; 2] = ["script", "style"];

/// Elements that never have content or an end tag.
const VOID: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Open elements that keep an outer `<td>`/`<li>`/... from being closed by
/// a same-named tag nested inside them.
const SCOPES: [&str; 5] = ["table", "ul", "ol", "dl", "select"];

/// Whether starting `next` implicitly ends an open `open` element.
fn closes_implicitly(open: &str, next: &str) -> bool {
    match open {
        "td" | "th" => matches!(next, "td" | "th" | "tr" | "tbody" | "thead" | "tfoot"),
        "tr" => matches!(next, "tr" | "tbody" | "thead" | "tfoot"),
        "li" => next == "li",
        "dt" | "dd" => matches!(next, "dt" | "dd"),
        "option" => matches!(next, "option" | "optgroup"),
        "p" => matches!(
            next,
            "p" | "div" | "table" | "ul" | "ol" | "dl" | "section" | "article"
                | "header" | "footer" | "nav" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
        ),
        _ => false,
    }
}

fn is_void(name: &str) -> bool {
    VOID.contains(&name)
}

fn is_raw_text(name: &str) -> bool {
    RAW_TEXT.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased tag name, without the `/` of a closing tag.
    pub name: String,
    pub closing: bool,
    pub self_closing: bool,
    /// Lowercased attribute names, entity-decoded values, in source order.
    pub attrs: Vec<(String, String)>,
    /// Offset of the `<`.
    pub start: usize,
    /// Offset just past the `>`.
    pub end: usize,
}

impl Tag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Class-token match: `has_class("a")` is true for `class="a b"`, false for `class="ab"`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_ascii_whitespace().any(|t| t == class))
            .unwrap_or(false)
    }

    pub fn is_open(&self, name: &str) -> bool {
        !self.closing && self.name == name
    }
}

fn markup_err(msg: String) -> ScrapeError {
    ScrapeError::Markup(msg)
}

/// Next tag at or after `from`. Comments, doctypes and processing
/// instructions are skipped, an unterminated one runs to end of input; a
/// stray `<` in text is treated as text. `Ok(None)` at end of input.
pub fn next_tag(s: &str, from: usize) -> Result<Option<Tag>> {
    let bytes = s.as_bytes();
    let mut i = from;

    while let Some(off) = bytes.get(i..).and_then(|b| b.iter().position(|&c| c == b'<')) {
        let lt = i + off;
        let rest = &s[lt..];

        if rest.starts_with("<!--") {
            let Some(close) = rest.find("-->") else { return Ok(None) };
            i = lt + close + 3;
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            let Some(gt) = rest.find('>') else { return Ok(None) };
            i = lt + gt + 1;
            continue;
        }

        let (closing, name_at) = if rest.as_bytes().get(1) == Some(&b'/') { (true, 2) } else { (false, 1) };
        let starts_name = rest.as_bytes().get(name_at).is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_name {
            // "a < b" in text
            i = lt + 1;
            continue;
        }

        let gt = find_tag_end(bytes, lt + name_at).ok_or_else(|| markup_err(format!("unterminated tag at {lt}")))?;
        let tag = parse_tag(&s[lt + name_at..gt], closing, lt, gt + 1);
        return Ok(Some(tag));
    }
    Ok(None)
}

/// Offset of the `>` closing the tag, skipping quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (off, &c) in bytes.get(from..)?.iter().enumerate() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(c),
            (None, b'>') => return Some(from + off),
            _ => {}
        }
    }
    None
}

/// `body` is the text between `<` (or `</`) and `>`.
fn parse_tag(body: &str, closing: bool, start: usize, end: usize) -> Tag {
    let name_len = body
        .bytes()
        .position(|c| !(c.is_ascii_alphanumeric() || c == b'-' || c == b':'))
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    let rest = &body[name_len..];
    let self_closing = rest.trim_end().ends_with('/');

    Tag {
        name,
        closing,
        self_closing,
        attrs: if closing { Vec::new() } else { parse_attrs(rest) },
        start,
        end,
    }
}

fn parse_attrs(s: &str) -> Vec<(String, String)> {
    let b = s.as_bytes();
    let n = b.len();
    let mut out = Vec::new();
    let mut i = 0;

    let skip_ws = |mut i: usize| {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        i
    };

    loop {
        i = skip_ws(i);
        if i >= n { break; }

        let name_start = i;
        while i < n && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'/') { i += 1; }
        let name = s[name_start..i].to_ascii_lowercase();

        let mut j = i;
        while j < n && b[j].is_ascii_whitespace() { j += 1; }
        if j >= n || b[j] != b'=' {
            // boolean attribute
            out.push((name, String::new()));
            continue;
        }

        j += 1;
        while j < n && b[j].is_ascii_whitespace() { j += 1; }
        let value = match b.get(j) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let close = s[j + 1..].find(q as char).map(|o| j + 1 + o).unwrap_or(n);
                let v = &s[j + 1..close];
                i = (close + 1).min(n);
                v
            }
            _ => {
                let vs = j;
                while j < n && !b[j].is_ascii_whitespace() { j += 1; }
                i = j;
                &s[vs..j]
            }
        };
        out.push((name, decode_entities(value)));
    }
    out
}

/// Offset where `open`'s inner HTML ends: its own end tag, the start of a
/// sibling that implicitly closes it, an unmatched end tag of an ancestor, or
/// end of input. Fails only on a tag cut off before its `>`.
pub fn element_end(s: &str, open: &Tag) -> Result<usize> {
    if open.self_closing || is_void(&open.name) {
        return Ok(open.end);
    }
    if is_raw_text(&open.name) {
        return Ok(raw_text_end(s, open));
    }

    // Elements opened inside `open` and not yet closed.
    let mut stack: Vec<String> = Vec::new();
    let mut pos = open.end;

    while let Some(tag) = next_tag(s, pos)? {
        pos = tag.end;

        if tag.closing {
            match stack.iter().rposition(|n| *n == tag.name) {
                Some(at) => stack.truncate(at),
                // ours, or a parent's closing over us
                None => return Ok(tag.start),
            }
            continue;
        }

        let scoped = stack.iter().any(|n| SCOPES.contains(&n.as_str()));
        if !scoped && closes_implicitly(&open.name, &tag.name) {
            return Ok(tag.start);
        }
        if stack.last().is_some_and(|top| closes_implicitly(top, &tag.name)) {
            stack.pop();
        }

        if is_raw_text(&tag.name) {
            pos = after_raw_text(s, &tag);
        } else if !tag.self_closing && !is_void(&tag.name) {
            stack.push(tag.name);
        }
    }
    Ok(s.len())
}

/// Start of the raw-text end tag, or end of input if there is none.
fn raw_text_end(s: &str, open: &Tag) -> usize {
    let close = format!("</{}", open.name);
    s.get(open.end..)
        .map(|rest| rest.to_ascii_lowercase())
        .and_then(|lc| lc.find(&close))
        .map_or(s.len(), |off| open.end + off)
}

/// Just past the raw-text element's end tag.
fn after_raw_text(s: &str, open: &Tag) -> usize {
    let end = raw_text_end(s, open);
    s[end..].find('>').map_or(s.len(), |off| end + off + 1)
}

/// Walk every top-level element in `s[from..]` carrying `class`, calling
/// `visit(start_of_inner, end_of_inner)`. Elements nested inside a match are
/// not visited separately. Script/style bodies are skipped.
///
/// A cut-off tag between matches only stops the walk, unless more `class`
/// markup follows it, which it would hide.
pub fn for_each_with_class<F>(s: &str, from: usize, class: &str, mut visit: F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<()>,
{
    let mut pos = from;
    loop {
        let tag = match next_tag(s, pos) {
            Ok(Some(tag)) => tag,
            Ok(None) => break,
            Err(e) if s[pos..].contains(class) => return Err(e),
            Err(e) => {
                debug!("stopping scan for .{class}: {e}");
                break;
            }
        };
        pos = tag.end;
        if tag.closing {
            continue;
        }
        if tag.has_class(class) {
            let inner_end = element_end(s, &tag)?;
            visit(tag.end, inner_end)?;
            pos = inner_end;
        } else if is_raw_text(&tag.name) {
            pos = after_raw_text(s, &tag);
        }
    }
    Ok(())
}
