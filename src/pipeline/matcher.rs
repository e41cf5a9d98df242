use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use crate::model::StrategyKind;

use super::names::normalize_item_name;

/// Integer with optional thousands separators (`25`, `1,000`), optionally a
/// range (`25-30`).
const COUNT: &str = r"(?P<count>(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:[ \t]*-[ \t]*(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+))?)";
const UNIT: &str = r"(?P<unit>\p{L}+)\b";

/// Most specific shapes first; looser strategies would mis-segment
/// well-formed lists.
pub(super) const STRATEGY_ORDER: [StrategyKind; 4] = [
    StrategyKind::Multiline,
    StrategyKind::SingleLineGlobal,
    StrategyKind::GlyphSplit,
    StrategyKind::Plain,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Candidate {
    pub(super) name: String,
    pub(super) quantity_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum StrategyOutcome {
    Found(Vec<Candidate>),
    NoneFound,
}

impl StrategyOutcome {
    fn from_candidates(candidates: Vec<Candidate>) -> Self {
        if candidates.is_empty() {
            Self::NoneFound
        } else {
            Self::Found(candidates)
        }
    }
}

#[derive(Debug)]
pub(super) struct ItemPatterns {
    pub(super) item_shape: Regex,
    multiline: Regex,
    global: Regex,
    glyph_segment: Regex,
    plain: Regex,
}

impl ItemPatterns {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            item_shape: Regex::new(r"[-:=]\s*[0-9][0-9,]*\s*\p{L}{1,15}\b")
                .context("failed to compile item shape regex")?,
            multiline: Regex::new(&format!(
                r"^(?P<marker>[^\p{{L}}\p{{N}}\s]{{0,3}})[ \t]*(?P<name>.+?)[ \t]*[-:][ \t]*{COUNT}[ \t]*{UNIT}"
            ))
            .context("failed to compile multiline item regex")?,
            global: Regex::new(&format!(
                r"(?P<name>[^0-9\n,;|:\-]+?)[ \t]*[-:][ \t]*{COUNT}[ \t]*{UNIT}"
            ))
            .context("failed to compile single-line item regex")?,
            glyph_segment: Regex::new(&format!(
                r"(?P<name>[^0-9\n]+?)[ \t]*[-:=]?[ \t]*{COUNT}[ \t]*{UNIT}"
            ))
            .context("failed to compile glyph segment regex")?,
            plain: Regex::new(&format!(
                r"^(?P<name>\p{{L}}[\p{{L}}\p{{M}}'.\- ]*?)[ \t]*(?:[-:=(][ \t]*)?{COUNT}[ \t]*{UNIT}"
            ))
            .context("failed to compile plain item regex")?,
        })
    }
}

/// Runs strategies in priority order; the first one with candidates wins.
pub(super) fn run_cascade(
    patterns: &ItemPatterns,
    normalized: &str,
    filtered_lines: &[&str],
) -> Option<(StrategyKind, Vec<Candidate>)> {
    for kind in STRATEGY_ORDER {
        match run_strategy(kind, patterns, normalized, filtered_lines) {
            StrategyOutcome::Found(candidates) => {
                debug!(
                    strategy = kind.as_str(),
                    candidates = candidates.len(),
                    "strategy produced candidates"
                );
                return Some((kind, candidates));
            }
            StrategyOutcome::NoneFound => {
                debug!(strategy = kind.as_str(), "strategy found nothing");
            }
        }
    }

    None
}

pub(super) fn run_strategy(
    kind: StrategyKind,
    patterns: &ItemPatterns,
    normalized: &str,
    filtered_lines: &[&str],
) -> StrategyOutcome {
    match kind {
        StrategyKind::Multiline => multiline_strategy(&patterns.multiline, filtered_lines),
        StrategyKind::SingleLineGlobal => global_strategy(&patterns.global, normalized),
        StrategyKind::GlyphSplit => glyph_split_strategy(&patterns.glyph_segment, normalized),
        StrategyKind::Plain => plain_strategy(&patterns.plain, filtered_lines),
    }
}

fn multiline_strategy(regex: &Regex, lines: &[&str]) -> StrategyOutcome {
    if lines.len() <= 1 {
        return StrategyOutcome::NoneFound;
    }

    StrategyOutcome::from_candidates(
        lines
            .iter()
            .filter_map(|line| regex.captures(line))
            .filter_map(|captures| candidate_from_captures(&captures))
            .collect(),
    )
}

fn global_strategy(regex: &Regex, text: &str) -> StrategyOutcome {
    StrategyOutcome::from_candidates(
        regex
            .captures_iter(text)
            .filter_map(|captures| candidate_from_captures(&captures))
            .collect(),
    )
}

fn glyph_split_strategy(regex: &Regex, text: &str) -> StrategyOutcome {
    if !text.chars().any(is_marker_glyph) {
        return StrategyOutcome::NoneFound;
    }

    StrategyOutcome::from_candidates(
        marker_led_segments(text)
            .into_iter()
            .filter_map(|segment| regex.captures(segment))
            .filter_map(|captures| candidate_from_captures(&captures))
            .collect(),
    )
}

fn plain_strategy(regex: &Regex, lines: &[&str]) -> StrategyOutcome {
    StrategyOutcome::from_candidates(
        lines
            .iter()
            .filter_map(|line| regex.captures(line))
            .filter_map(|captures| candidate_from_captures(&captures))
            .collect(),
    )
}

fn candidate_from_captures(captures: &Captures<'_>) -> Option<Candidate> {
    let name = normalize_item_name(captures.name("name")?.as_str())?;
    let count = captures.name("count")?.as_str();
    let unit = captures.name("unit")?.as_str();

    Some(Candidate {
        name,
        quantity_text: format!("{} {}", count, unit),
    })
}

/// Decorative lead glyphs: bullets, the replacement character left by
/// corrupted emoji, and symbols/pictographs from the arrows block upward.
pub(super) fn is_marker_glyph(ch: char) -> bool {
    if matches!(ch, '•' | '‣' | '\u{FFFD}') {
        return true;
    }

    (ch as u32) >= 0x2190 && !ch.is_alphanumeric() && !ch.is_whitespace()
}

/// Text following each run of marker glyphs, up to the next run. Text before
/// the first marker is not an item.
fn marker_led_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::<&str>::new();
    let mut segment_start: Option<usize> = None;
    let mut in_marker = false;

    for (index, ch) in text.char_indices() {
        if is_marker_glyph(ch) {
            if let Some(start) = segment_start.take() {
                segments.push(&text[start..index]);
            }
            in_marker = true;
            continue;
        }

        if in_marker {
            segment_start = Some(index);
            in_marker = false;
        }
    }

    if let Some(start) = segment_start {
        segments.push(&text[start..]);
    }

    segments
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
