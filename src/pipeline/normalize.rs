use unicode_normalization::UnicodeNormalization;

/// Canonical text form every stage works on.
///
/// Invisible characters are removed before composition, otherwise a stripped
/// zero-width mark could leave a base/combining pair that only composes on a
/// second pass.
pub(crate) fn normalize_text(input: &str) -> String {
    let unified_newlines = input.replace("\r\n", "\n").replace('\r', "\n");
    let visible = unified_newlines
        .chars()
        .filter(|ch| !is_invisible_mark(*ch))
        .collect::<String>();
    let composed = visible
        .nfc()
        .map(|ch| if is_dash_variant(ch) { '-' } else { ch })
        .collect::<String>();

    composed
        .split('\n')
        .map(|line| collapse_horizontal_whitespace(line.trim()))
        .collect::<Vec<String>>()
        .join("\n")
}

pub(crate) fn is_dash_variant(ch: char) -> bool {
    matches!(
        ch,
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}'
    )
}

pub(crate) fn is_invisible_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}'..='\u{200D}'
            | '\u{2060}'
            | '\u{FEFF}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{E0100}'..='\u{E01EF}'
    )
}

pub(crate) fn collapse_horizontal_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut previous_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() && ch != '\n' {
            if !previous_was_space {
                out.push(' ');
                previous_was_space = true;
            }
        } else {
            out.push(ch);
            previous_was_space = false;
        }
    }

    out
}
