/// Trailing words providers append to species names ("Coconut trees",
/// "Vetiver grass clumps recommended").
const TRAILING_DESCRIPTORS: &[&str] = &[
    "recommended",
    "tree",
    "trees",
    "plant",
    "plants",
    "clump",
    "clumps",
    "cluster",
    "clusters",
];

/// Canonical display name, or `None` when nothing nameable is left.
pub(super) fn normalize_item_name(raw: &str) -> Option<String> {
    let mut current = raw.trim().to_string();

    loop {
        let stripped = strip_leading_markers(&current);
        if stripped == current {
            break;
        }
        current = stripped;
    }

    let mut words = current.split_whitespace().collect::<Vec<&str>>();
    while let Some(last) = words.last() {
        let bare = trim_trailing_punctuation(last);
        if bare.is_empty() {
            words.pop();
            continue;
        }
        if TRAILING_DESCRIPTORS.contains(&bare.to_lowercase().as_str()) {
            words.pop();
            continue;
        }
        break;
    }

    let joined = words.join(" ");
    let name = trim_trailing_punctuation(&joined).trim().to_string();
    if name.chars().any(char::is_alphanumeric) {
        Some(name)
    } else {
        None
    }
}

fn strip_leading_markers(text: &str) -> String {
    let mut words = text.split_whitespace().collect::<Vec<&str>>();
    while let Some(first) = words.first() {
        if is_marker_token(first) {
            words.remove(0);
        } else {
            break;
        }
    }

    let joined = words.join(" ");
    let glyph_free = joined.trim_start_matches(|ch: char| !ch.is_alphanumeric());
    strip_list_numbering(strip_glued_mojibake(glyph_free)).to_string()
}

/// Mis-decoded emoji glued to the name (`ðŸŒ´Coconut`): a `ð`/`â` lead
/// followed by characters that UTF-8 continuation bytes decode to under
/// Latin-1 or Windows-1252.
fn strip_glued_mojibake(text: &str) -> &str {
    let mut chars = text.char_indices();
    if !matches!(chars.next(), Some((_, 'ð' | 'â'))) {
        return text;
    }

    let mut lead_end = None;
    for (index, ch) in chars {
        if !is_continuation_byte_char(ch) {
            break;
        }
        lead_end = Some(index + ch.len_utf8());
    }

    match lead_end {
        Some(end) => &text[end..],
        None => text,
    }
}

fn is_continuation_byte_char(ch: char) -> bool {
    matches!(ch, '\u{0080}'..='\u{00BF}')
        || matches!(
            ch,
            'Œ' | 'œ' | 'Š' | 'š' | 'Ÿ' | 'Ž' | 'ž' | 'ƒ' | 'ˆ' | '˜' | '–' | '—' | '‘' | '’'
                | '‚' | '“' | '”' | '„' | '†' | '‡' | '•' | '…' | '‰' | '‹' | '›' | '€' | '™'
        )
}

fn strip_list_numbering(text: &str) -> &str {
    let digits = text.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if digits == 0 {
        return text;
    }

    let rest = &text[digits..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => {
            after.trim_start()
        }
        _ => text,
    }
}

fn trim_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(|ch: char| !ch.is_alphanumeric() && ch != ')')
}
