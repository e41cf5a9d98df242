use regex::Regex;

/// Phrases that mark a line as provider narration rather than data.
const HEDGING_PHRASES: &[&str] = &[
    "based on",
    "important:",
    "additional",
    "hectare",
    "i think",
    "i believe",
    "i would",
    "i will",
    "i'll",
    "i've",
    "let me",
    "let's",
    "here are",
    "here is",
    "these species",
    "these plants",
    "thinking",
    "note:",
    "in summary",
    "in conclusion",
    "overall",
    "however",
    "therefore",
    "because",
    "this will",
    "this helps",
    "this list",
    "as requested",
    "please note",
    "keep in mind",
];

const HEADER_PREFIXES: &[&str] = &["#", "**", "__", ">"];

pub(super) fn filter_noise_lines<'a>(
    lines: &[&'a str],
    item_shape: &Regex,
    max_line_chars: usize,
) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| !line_is_noise(line, item_shape, max_line_chars))
        .collect()
}

fn line_is_noise(line: &str, item_shape: &Regex, max_line_chars: usize) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return true;
    }

    // Data lines win over every other rule.
    if item_shape.is_match(trimmed) {
        return false;
    }

    if HEADER_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return true;
    }

    if trimmed.ends_with(':') {
        return true;
    }

    if contains_hedging(trimmed) {
        return true;
    }

    trimmed.chars().count() > max_line_chars
}

pub(super) fn contains_hedging(text: &str) -> bool {
    let lower = text.to_lowercase();
    HEDGING_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
