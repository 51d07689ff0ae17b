//! Minimal HTML slicing for the handful of Backloggery pages we read.
//!
//! Pages are matched on tag and class substrings rather than parsed into a
//! DOM; the markup we care about is small and flat.

/// Lowercase ASCII only, so byte offsets stay valid against the original.
fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next `<tag ...>...</tag>` block starting at or after `from`
/// whose opening tag contains `attr_needle` (if given). Returns the byte
/// range of the whole block. Nested tags of the same name are not tracked.
pub(crate) fn next_block(
    html: &str,
    tag: &str,
    attr_needle: Option<&str>,
    from: usize,
) -> Option<(usize, usize)> {
    let lc = to_lower(html);
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}>", tag.to_ascii_lowercase());
    let mut cursor = from;

    loop {
        let start = lc.get(cursor..)?.find(&open)? + cursor;
        let after_name = start + open.len();
        // Reject prefixes like `<bold` when looking for `<b`.
        let boundary = lc[after_name..].chars().next()?;
        if !(boundary == '>' || boundary.is_ascii_whitespace() || boundary == '/') {
            cursor = after_name;
            continue;
        }
        let open_end = lc[start..].find('>')? + start + 1;
        let matches = match attr_needle {
            Some(needle) => lc[start..open_end].contains(&needle.to_ascii_lowercase()),
            None => true,
        };
        if !matches {
            cursor = open_end;
            continue;
        }
        let end = lc[open_end..].find(&close)? + open_end + close.len();
        return Some((start, end));
    }
}

/// All blocks of `tag` whose opening tag contains `attr_needle`.
pub(crate) fn blocks<'a>(html: &'a str, tag: &str, attr_needle: Option<&str>) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut from = 0;
    while let Some((start, end)) = next_block(html, tag, attr_needle, from) {
        out.push(&html[start..end]);
        from = end;
    }
    out
}

/// Text between the opening tag's `>` and the last `<` of a block.
pub(crate) fn inner(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

/// Value of `name="..."` (or single-quoted) inside an opening tag.
pub(crate) fn attr(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let needle = format!("{}=", name.to_ascii_lowercase());
    let mut from = 0;
    loop {
        let pos = lc.get(from..)?.find(&needle)? + from;
        // Must be a whole attribute name, not the tail of another one.
        let preceded_ok = pos == 0 || lc[..pos].ends_with(|c: char| c.is_ascii_whitespace());
        let value_start = pos + needle.len();
        if !preceded_ok {
            from = value_start;
            continue;
        }
        let rest = &open_tag[value_start..];
        let quote = rest.chars().next()?;
        return if quote == '"' || quote == '\'' {
            let body = &rest[1..];
            body.find(quote).map(|e| decode_entities(&body[..e]))
        } else {
            let e = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Some(decode_entities(&rest[..e]))
        };
    }
}

/// Drop tags, decode entities, and collapse whitespace.
pub(crate) fn text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    let decoded = decode_entities(&out);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the named entities that show up in titles plus numeric references.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';').filter(|&i| i <= 10) else {
            out.push('&');
            rest = &tail[1..];
            continue;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
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

/// One `<option>` of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Options of the first `<select>` whose `name` attribute equals `name`.
pub(crate) fn select_options(html: &str, name: &str) -> Option<Vec<SelectOption>> {
    let select = blocks(html, "select", Some("name="))
        .into_iter()
        .find(|block| {
            let open_end = block.find('>').map_or(block.len(), |i| i + 1);
            attr(&block[..open_end], "name").as_deref() == Some(name)
        })?;

    // Options usually omit `</option>`, so split on the opening tag instead.
    let lc = to_lower(select);
    let mut starts: Vec<usize> = lc.match_indices("<option").map(|(i, _)| i).collect();
    starts.push(lc.rfind("</select>").unwrap_or(select.len()));

    let options = starts
        .windows(2)
        .filter_map(|w| {
            let chunk = &select[w[0]..w[1]];
            let open_end = chunk.find('>')? + 1;
            let label = text(&chunk[open_end..]);
            let value = attr(&chunk[..open_end], "value").unwrap_or_else(|| label.clone());
            Some(SelectOption { value, label })
        })
        .collect();
    Some(options)
}

#[cfg(test)]
#[path = "tests/html_tests.rs"]
mod tests;
