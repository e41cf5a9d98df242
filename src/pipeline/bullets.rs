use anyhow::{Context, Result};
use regex::Regex;

use super::normalize::normalize_text;

/// Narration that should never survive as an advice bullet.
const BULLET_NOISE_PHRASES: &[&str] = &[
    "based on",
    "i think",
    "i believe",
    "let me",
    "here are",
    "here is",
    "as an ai",
    "thinking process",
    "meta-commentary",
    "i hope this",
];

#[derive(Debug)]
pub(super) struct BulletPatterns {
    pub(super) bullet_line: Regex,
    bold: Regex,
    placeholder: Regex,
}

impl BulletPatterns {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            // Glyph bullets may touch the text; `-`, `*` and numbers need a space.
            bullet_line: Regex::new(r"^(?:[•●▪◦‣]\s*|[-*]\s+|[0-9]{1,2}[.)]\s+)(?P<body>\S.*)$")
                .context("failed to compile bullet line regex")?,
            bold: Regex::new(r"\*\*([^*]+)\*\*").context("failed to compile bold markup regex")?,
            placeholder: Regex::new(r"(?i)^recommendation\s*[0-9]+\.?$")
                .context("failed to compile placeholder regex")?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct BulletLimits {
    pub(super) min_chars: usize,
    pub(super) max_chars: usize,
}

pub(super) fn bulletize_block(
    block: &str,
    patterns: &BulletPatterns,
    limits: BulletLimits,
) -> Vec<String> {
    let normalized = normalize_text(block);
    let lines = normalized
        .lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>();

    let bullet_bodies = lines
        .iter()
        .filter_map(|line| patterns.bullet_line.captures(line))
        .filter_map(|captures| captures.name("body").map(|body| body.as_str().to_string()))
        .collect::<Vec<String>>();

    let atoms = if bullet_bodies.is_empty() {
        let prose = lines
            .iter()
            .copied()
            .filter(|line| !line_is_heading(line))
            .collect::<Vec<&str>>()
            .join(" ");
        split_sentences(&prose)
    } else {
        bullet_bodies
    };

    atoms
        .into_iter()
        .map(|atom| clean_atom(&atom, patterns))
        .filter(|atom| keep_atom(atom, patterns, limits))
        .collect()
}

fn line_is_heading(line: &str) -> bool {
    line.starts_with('#') || line.ends_with(':')
}

fn clean_atom(atom: &str, patterns: &BulletPatterns) -> String {
    let unwrapped = patterns.bold.replace_all(atom, "$1");
    unwrapped.trim().to_string()
}

fn keep_atom(atom: &str, patterns: &BulletPatterns, limits: BulletLimits) -> bool {
    let length = atom.chars().count();
    if length < limits.min_chars || length > limits.max_chars {
        return false;
    }

    if patterns.placeholder.is_match(atom) {
        return false;
    }

    let lower = atom.to_lowercase();
    !BULLET_NOISE_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}

/// Splits after `.`, `!` or `?` when followed by whitespace or the end, so
/// decimals like `7.82` stay intact.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::<String>::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        let at_boundary = chars.peek().is_none_or(|next| next.is_whitespace());
        if at_boundary && !current.trim().is_empty() {
            sentences.push(current.trim().to_string());
            current.clear();
        }
    }

    if !current.trim().is_empty() {
        sentences.push(current.trim().to_string());
    }

    sentences
}
