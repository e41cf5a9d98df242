use unicode_normalization::UnicodeNormalization;

use super::normalize::{collapse_horizontal_whitespace, is_dash_variant};

/// Degraded copy of `input` that a Latin-only document renderer can draw.
/// Pictographs, zero-width marks and combining marks are dropped; typographic
/// punctuation is folded to ASCII.
pub fn sanitize_for_export(input: &str) -> String {
    let unified_newlines = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut folded = String::with_capacity(unified_newlines.len());

    for ch in unified_newlines.nfc() {
        match ch {
            '\n' => folded.push('\n'),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => folded.push('"'),
            '\u{2022}' | '\u{2023}' | '\u{25AA}' | '\u{25CF}' | '\u{25E6}' => folded.push('-'),
            '\u{2026}' => folded.push_str("..."),
            other if is_dash_variant(other) => folded.push('-'),
            other if other.is_whitespace() => folded.push(' '),
            other if is_renderer_safe(other) => folded.push(other),
            _ => {}
        }
    }

    folded
        .split('\n')
        .map(|line| collapse_horizontal_whitespace(line.trim()))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Printable ASCII, Latin-1 and Latin Extended-A/B, minus the soft hyphen.
fn is_renderer_safe(ch: char) -> bool {
    matches!(ch, ' '..='~' | '\u{00A1}'..='\u{00AC}' | '\u{00AE}'..='\u{024F}')
}
