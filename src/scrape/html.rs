//! Minimal HTML scanning: just enough to walk the company page's table and
//! metric blocks without a DOM.
//!
//! Tag matching is ASCII case-insensitive. Offsets found in the lowercased copy
//! are valid in the input because ASCII lowercasing preserves byte length.

/// One element found by [`elements`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Element<'a> {
    /// The opening tag, including `<` and `>`.
    pub(crate) open_tag: &'a str,
    /// Everything between the opening and closing tag.
    pub(crate) inner: &'a str,
    /// Byte offset of `<` in the scanned string.
    pub(crate) start: usize,
    /// Byte offset just past the closing tag.
    pub(crate) end: usize,
}

impl Element<'_> {
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        attr(self.open_tag, name)
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|x| x == class))
    }

    pub(crate) fn text(&self) -> String {
        clean_text(self.inner)
    }
}

/// Position of the next `<tag` (followed by whitespace, `>` or `/`) at or after `from`.
fn find_open(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let bytes = lower.as_bytes();
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&pat) {
        let at = pos + i;
        match bytes.get(at + pat.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => pos = at + pat.len(),
        }
    }
    None
}

/// Parse the element of kind `tag` whose opening tag starts at `start`.
fn element_at<'a>(html: &'a str, lower: &str, tag: &str, start: usize) -> Option<Element<'a>> {
    let open_end = start + lower[start..].find('>')?;
    let open_tag = &html[start..=open_end];
    if open_tag.ends_with("/>") {
        return Some(Element {
            open_tag,
            inner: "",
            start,
            end: open_end + 1,
        });
    }

    let close_pat = format!("</{tag}");
    let mut depth = 1usize;
    let mut cur = open_end + 1;
    loop {
        let next_close = cur + lower[cur..].find(&close_pat)?;
        match find_open(lower, tag, cur) {
            Some(o) if o < next_close => {
                depth += 1;
                cur = o + tag.len() + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    let close_end = next_close + lower[next_close..].find('>')? + 1;
                    return Some(Element {
                        open_tag,
                        inner: &html[open_end + 1..next_close],
                        start,
                        end: close_end,
                    });
                }
                cur = next_close + close_pat.len();
            }
        }
    }
}

/// All outermost `tag` elements of `html`, in document order.
///
/// Same-tag elements nested inside a match are part of its `inner` and are not
/// returned separately. Unterminated elements end the scan.
pub(crate) fn elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lower, tag, pos) {
        match element_at(html, &lower, tag, start) {
            Some(el) => {
                pos = el.end;
                out.push(el);
            }
            None => break,
        }
    }
    out
}

pub(crate) fn first<'a>(html: &'a str, tag: &str) -> Option<Element<'a>> {
    elements(html, tag).into_iter().next()
}

/// The innermost `tag` element of `html` that contains byte offset `idx`.
pub(crate) fn enclosing<'a>(html: &'a str, tag: &str, idx: usize) -> Option<Element<'a>> {
    let lower = html.to_ascii_lowercase();
    let pat = format!("<{tag}");
    let mut search_end = idx;
    while let Some(start) = lower[..search_end].rfind(&pat) {
        if let Some(el) = element_at(html, &lower, tag, start)
            && el.end > idx
        {
            return Some(el);
        }
        search_end = start;
    }
    None
}

/// `html` with every `tag` element cut out.
pub(crate) fn without(html: &str, tag: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pos = 0usize;
    for el in elements(html, tag) {
        out.push_str(&html[pos..el.start]);
        pos = el.end;
    }
    out.push_str(&html[pos..]);
    out
}

/// Value of attribute `name` in an opening tag, quoted or bare.
pub(crate) fn attr<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    let lower = open_tag.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut pos = 0usize;
    while let Some(i) = lower[pos..].find(name) {
        let at = pos + i;
        pos = at + name.len();
        let boundary = at > 0 && bytes[at - 1].is_ascii_whitespace();
        let rest = lower[pos..].trim_start();
        if !boundary || !rest.starts_with('=') {
            continue;
        }
        let val_start = lower.len() - rest.len() + 1;
        let raw = &open_tag[val_start..];
        let trimmed = raw.trim_start();
        let offset = raw.len() - trimmed.len();
        let val_start = val_start + offset;
        return match trimmed.chars().next()? {
            q @ ('"' | '\'') => {
                let body = &open_tag[val_start + 1..];
                body.find(q).map(|end| &body[..end])
            }
            _ => {
                let body = &open_tag[val_start..];
                let end = body
                    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .unwrap_or(body.len());
                Some(&body[..end])
            }
        };
    }
    None
}

/// Text content: tags removed and entities decoded, whitespace preserved.
pub(crate) fn raw_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
}

/// Text content with runs of whitespace collapsed to one space and trimmed.
pub(crate) fn clean_text(html: &str) -> String {
    raw_text(html).split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
