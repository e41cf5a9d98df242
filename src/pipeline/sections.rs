use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{AdviceLabel, DetailedBlocks};

pub(super) fn section_heading_regex() -> Result<Regex> {
    Regex::new(r"(?i)[#*_]*[ \t]*\bsection[ \t]*(?P<number>[1-3])\b[*_]*[ \t]*[:\-]?[*_]*")
        .context("failed to compile section heading regex")
}

#[derive(Debug)]
struct HeadingMatch {
    number: u32,
    start: usize,
    end: usize,
}

/// Splits a `SECTION 1:` / `SECTION 2:` / `SECTION 3:` response into the
/// three labeled blocks. Each block runs to the next heading.
pub(super) fn split_detailed_sections(
    text: &str,
    heading: &Regex,
    bullet_line: &Regex,
) -> DetailedBlocks {
    let headings = heading
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let number = captures.name("number")?.as_str().parse::<u32>().ok()?;
            Some(HeadingMatch {
                number,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect::<Vec<HeadingMatch>>();

    let mut blocks = DetailedBlocks::default();
    for label in AdviceLabel::ALL {
        let Some(position) = headings
            .iter()
            .position(|candidate| AdviceLabel::from_section_number(candidate.number) == Some(label))
        else {
            continue;
        };

        let body_start = headings[position].end;
        let body_end = headings
            .get(position + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());
        let body = drop_title_remainder(&text[body_start..body_end], bullet_line);
        blocks.set(label, body.trim().to_string());
    }

    blocks
}

/// `SECTION 1: Soil Loss Mitigation` carries a title after the heading; it is
/// dropped when the block continues on further lines.
fn drop_title_remainder<'a>(body: &'a str, bullet_line: &Regex) -> &'a str {
    let Some((first, rest)) = body.split_once('\n') else {
        return body;
    };

    if rest.trim().is_empty() || bullet_line.is_match(first.trim()) {
        return body;
    }

    rest
}
