//! HTML parsing and serialization for the enhancer's document model.
//!
//! The parser is forgiving in the way server-rendered pages need. Unmatched
//! end tags pop back to the nearest open element with that name, void
//! elements never take children, and optional end tags (`li`, `p`, `option`,
//! table rows and cells...) are implied when a sibling starts. `script` and
//! `style` bodies are kept as raw text; `title` and `textarea` bodies are text
//! with character references decoded. References are decoded in text and
//! attribute values too, so JSON emitted as `data-labels="[&quot;Jan&quot;]"`
//! arrives intact.

use std::fmt::Write as _;

use crate::error::{EnhanceError, EnhanceResult};

use super::document::{Document, NodeId, NodeKind};

impl Document {
    /// Parses an HTML document or fragment.
    pub fn parse(html: &str) -> EnhanceResult<Self> {
        parse_html(html)
    }

    /// Serializes the whole document back to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_subtree(self.root(), &mut out);
        out
    }

    /// Serializes one node and its subtree.
    pub fn outer_html(&self, id: NodeId) -> EnhanceResult<String> {
        self.node(id)?;
        let mut out = String::new();
        self.write_subtree(id, &mut out);
        Ok(out)
    }

    fn write_subtree(&self, id: NodeId, out: &mut String) {
        // Children are pushed in reverse so they pop in document order.
        let mut pending = vec![Emit::Node(id)];
        while let Some(step) = pending.pop() {
            let id = match step {
                Emit::EndTag(tag) => {
                    let _ = write!(out, "</{tag}>");
                    continue;
                }
                Emit::Node(id) => id,
            };
            let Ok(node) = self.node(id) else {
                continue;
            };
            match node.kind() {
                NodeKind::Document => {}
                NodeKind::Doctype(name) => {
                    let _ = write!(out, "<!DOCTYPE {name}>");
                }
                NodeKind::Comment(text) => {
                    let _ = write!(out, "<!--{text}-->");
                }
                NodeKind::Text(text) => {
                    let raw_parent = node
                        .parent()
                        .and_then(|parent| self.element(parent).ok())
                        .is_some_and(|parent| is_raw_text_tag(parent.tag_name()));
                    if raw_parent {
                        out.push_str(text);
                    } else {
                        out.push_str(&escape_text(text));
                    }
                }
                NodeKind::Element(element) => {
                    out.push('<');
                    out.push_str(element.tag_name());
                    for (name, value) in element.attributes() {
                        out.push(' ');
                        out.push_str(name);
                        if !value.is_empty() {
                            let _ = write!(out, "=\"{}\"", escape_attribute(value));
                        }
                    }
                    out.push('>');
                    if is_void_tag(element.tag_name()) {
                        continue;
                    }
                    pending.push(Emit::EndTag(element.tag_name()));
                }
            }
            pending.extend(node.children().iter().rev().map(|child| Emit::Node(*child)));
        }
    }
}

enum Emit<'a> {
    Node(NodeId),
    EndTag(&'a str),
}

fn parse_html(html: &str) -> EnhanceResult<Document> {
    let mut doc = Document::new();
    let mut stack = vec![doc.root()];
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| EnhanceError::HtmlParse("unclosed HTML comment".into()))?;
            let parent = current_parent(&stack)?;
            doc.append_comment(parent, &html[i + 4..end])?;
            i = end + 3;
            continue;
        }

        if starts_with_at(bytes, i, b"<!") {
            let end = find_subslice(bytes, i, b">")
                .ok_or_else(|| EnhanceError::HtmlParse("unclosed doctype".into()))?;
            let body = html[i + 2..end].trim();
            let name = body
                .get(..7)
                .filter(|keyword| keyword.eq_ignore_ascii_case("doctype"))
                .map_or(body, |_| body[7..].trim());
            doc.append_doctype(name)?;
            i = end + 1;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1) == Some(&b'/') {
            let (tag, next) = parse_end_tag(html, i)?;
            i = next;
            close_element(&doc, &mut stack, &tag);
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
            let start = parse_start_tag(html, i)?;
            i = start.next;

            close_implied_end_tags(&doc, &mut stack, &start.tag);
            let parent = current_parent(&stack)?;
            let node = doc.create_element(parent, &start.tag)?;
            {
                let element = doc.element_mut(node)?;
                for (name, value) in &start.attributes {
                    if !element.has_attribute(name) {
                        element.set_attribute(name, value.as_str());
                    }
                }
            }

            let raw = is_raw_text_tag(&start.tag);
            if (raw || is_escapable_raw_text_tag(&start.tag)) && !start.self_closing {
                let close = find_case_insensitive_end_tag(bytes, i, start.tag.as_bytes())
                    .ok_or_else(|| {
                        EnhanceError::HtmlParse(format!("unclosed <{}>", start.tag))
                    })?;
                if close > i {
                    let body = &html[i..close];
                    if raw {
                        doc.append_text(node, body)?;
                    } else {
                        doc.append_text(node, decode_character_references(body))?;
                    }
                }
                let (_, after_end) = parse_end_tag(html, close)?;
                i = after_end;
                continue;
            }

            if !start.self_closing && !is_void_tag(&start.tag) {
                stack.push(node);
            }
            continue;
        }

        let text_start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        let parent = current_parent(&stack)?;
        doc.append_text(parent, decode_character_references(&html[text_start..i]))?;
    }

    Ok(doc)
}

fn current_parent(stack: &[NodeId]) -> EnhanceResult<NodeId> {
    stack
        .last()
        .copied()
        .ok_or_else(|| EnhanceError::HtmlParse("invalid stack state".into()))
}

/// Pops open elements up to and including the nearest one named `tag`.
/// End tags without a matching open element are ignored.
fn close_element(doc: &Document, stack: &mut Vec<NodeId>, tag: &str) {
    let position = stack.iter().rposition(|id| {
        doc.element(*id)
            .is_ok_and(|element| element.tag_name().eq_ignore_ascii_case(tag))
    });
    if let Some(position) = position {
        stack.truncate(position.max(1));
    }
}

/// Start tags that end an open element whose end tag is optional.
///
/// When a tag in `opens` starts, the nearest open element in `closes` is
/// popped with everything above it, unless an element in `scope` is found
/// first.
struct ImpliedEnd {
    opens: &'static [&'static str],
    closes: &'static [&'static str],
    scope: &'static [&'static str],
}

const IMPLIED_ENDS: &[ImpliedEnd] = &[
    ImpliedEnd {
        opens: &[
            "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
            "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
            "h6", "header", "hr", "li", "main", "menu", "nav", "ol", "p", "pre", "section",
            "table", "ul",
        ],
        closes: &["p"],
        scope: &["button", "caption", "table", "td", "template", "th"],
    },
    ImpliedEnd {
        opens: &["li"],
        closes: &["li"],
        scope: &["menu", "ol", "ul"],
    },
    ImpliedEnd {
        opens: &["dd", "dt"],
        closes: &["dd", "dt"],
        scope: &["dl"],
    },
    ImpliedEnd {
        opens: &["optgroup", "option"],
        closes: &["option"],
        scope: &["datalist", "optgroup", "select"],
    },
    ImpliedEnd {
        opens: &["optgroup"],
        closes: &["optgroup"],
        scope: &["select"],
    },
    ImpliedEnd {
        opens: &["tbody", "td", "tfoot", "th", "thead", "tr"],
        closes: &["td", "th"],
        scope: &["table"],
    },
    ImpliedEnd {
        opens: &["tbody", "tfoot", "thead", "tr"],
        closes: &["tr"],
        scope: &["table"],
    },
    ImpliedEnd {
        opens: &["tbody", "tfoot", "thead"],
        closes: &["tbody", "tfoot", "thead"],
        scope: &["table"],
    },
];

fn close_implied_end_tags(doc: &Document, stack: &mut Vec<NodeId>, tag: &str) {
    for rule in IMPLIED_ENDS.iter().filter(|rule| rule.opens.contains(&tag)) {
        let mut close_index = None;
        for index in (1..stack.len()).rev() {
            let Ok(open) = doc.element(stack[index]) else {
                continue;
            };
            if rule.closes.contains(&open.tag_name()) {
                close_index = Some(index);
                break;
            }
            if rule.scope.contains(&open.tag_name()) {
                break;
            }
        }
        if let Some(index) = close_index {
            stack.truncate(index);
        }
    }
}

struct StartTag {
    tag: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
    next: usize,
}

fn parse_start_tag(html: &str, at: usize) -> EnhanceResult<StartTag> {
    let bytes = html.as_bytes();
    let mut i = at + 1;

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();
    if tag.is_empty() {
        return Err(EnhanceError::HtmlParse("empty tag name".into()));
    }

    let mut attributes = Vec::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(EnhanceError::HtmlParse(format!("unclosed start tag <{tag}>")));
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }
        if bytes[i] == b'/' {
            if bytes.get(i + 1) == Some(&b'>') {
                self_closing = true;
                i += 2;
                break;
            }
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }
        if name_start == i {
            return Err(EnhanceError::HtmlParse(format!(
                "invalid attribute name in <{tag}>"
            )));
        }
        let name = html[name_start..i].to_ascii_lowercase();

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            decode_character_references(&parse_attr_value(html, &mut i)?)
        } else {
            String::new()
        };
        attributes.push((name, value));
    }

    Ok(StartTag {
        tag,
        attributes,
        self_closing,
        next: i,
    })
}

fn parse_end_tag(html: &str, at: usize) -> EnhanceResult<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();

    while i < bytes.len() && bytes[i] != b'>' {
        i += 1;
    }
    if i >= bytes.len() {
        return Err(EnhanceError::HtmlParse("unclosed end tag".into()));
    }
    Ok((tag, i + 1))
}

fn parse_attr_value(html: &str, i: &mut usize) -> EnhanceResult<String> {
    let bytes = html.as_bytes();
    if *i >= bytes.len() {
        return Err(EnhanceError::HtmlParse("missing attribute value".into()));
    }

    if bytes[*i] == b'\'' || bytes[*i] == b'"' {
        let quote = bytes[*i];
        *i += 1;
        let start = *i;
        while *i < bytes.len() && bytes[*i] != quote {
            *i += 1;
        }
        if *i >= bytes.len() {
            return Err(EnhanceError::HtmlParse(
                "unclosed quoted attribute value".into(),
            ));
        }
        let value = html[start..*i].to_owned();
        *i += 1;
        return Ok(value);
    }

    let start = *i;
    while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
        *i += 1;
    }
    Ok(html[start..*i].to_owned())
}

/// Decodes named (common subset) and numeric character references.
/// Unknown or unterminated references are kept verbatim.
pub(crate) fn decode_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_owned();
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|end| *end > 0 && *end <= 10)
            .and_then(|end| decode_reference(&tail[..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let hex = numeric
            .strip_prefix('x')
            .or_else(|| numeric.strip_prefix('X'));
        let (digits, radix) = match hex {
            Some(hex) => (hex, 16),
            None => (numeric, 10),
        };
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
            return None;
        }
        // NUL, surrogates and out-of-range values decode to U+FFFD.
        let decoded = u32::from_str_radix(digits, radix)
            .ok()
            .and_then(char::from_u32)
            .filter(|ch| *ch != '\0');
        return Some(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "copy" => Some('©'),
        "euro" => Some('€'),
        "hellip" => Some('…'),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        "deg" => Some('°'),
        _ => None,
    }
}

pub(crate) fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_char(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'' | b'<')
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

fn is_escapable_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "textarea" | "title")
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|window| window == needle)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from > bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

fn find_case_insensitive_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while i + 2 + tag.len() <= bytes.len() {
        if bytes[i] == b'<'
            && bytes[i + 1] == b'/'
            && bytes[i + 2..i + 2 + tag.len()].eq_ignore_ascii_case(tag)
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{decode_character_references, escape_attribute};

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(
            decode_character_references("[&quot;Jan&quot;,&#34;Feb&#x22;]"),
            "[\"Jan\",\"Feb\"]"
        );
    }

    #[test]
    fn keeps_unknown_and_bare_ampersands() {
        assert_eq!(decode_character_references("a & b &bogus; c"), "a & b &bogus; c");
    }

    #[test]
    fn invalid_numeric_references_become_replacement_characters() {
        assert_eq!(
            decode_character_references("a&#0;b&#xD800;c&#x110000;d&#x7FFFFFFF;e"),
            "a\u{FFFD}b\u{FFFD}c\u{FFFD}d\u{FFFD}e"
        );
        assert_eq!(decode_character_references("&#x;&#12a;"), "&#x;&#12a;");
    }

    #[test]
    fn escapes_quotes_in_attributes() {
        assert_eq!(escape_attribute(r#"{"a":"<b>"}"#), "{&quot;a&quot;:&quot;&lt;b&gt;&quot;}");
    }
}
