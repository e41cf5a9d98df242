use anyhow::{Context, Result};
use askama::Template;

use crate::model::{AdviceSection, ExtractionResult, RecommendationItem, SafeRow};

use super::sanitize::sanitize_for_export;

/// Stand-in for icons that sanitize down to nothing.
const SAFE_ICON_PLACEHOLDER: &str = "*";

const VEGETATION_TITLE: &str = "Recommended Vegetation";

pub(super) fn safe_rows(items: &[RecommendationItem]) -> Vec<SafeRow> {
    items
        .iter()
        .map(|item| {
            let icon = sanitize_for_export(&item.icon);
            SafeRow {
                name: sanitize_for_export(&item.name),
                quantity_text: sanitize_for_export(&item.quantity_text),
                icon: if icon.is_empty() {
                    SAFE_ICON_PLACEHOLDER.to_string()
                } else {
                    icon
                },
            }
        })
        .collect()
}

pub fn safe_sections(sections: &[AdviceSection]) -> Vec<AdviceSection> {
    sections
        .iter()
        .map(|section| AdviceSection {
            label: section.label,
            bullets: section
                .bullets
                .iter()
                .map(|bullet| sanitize_for_export(bullet))
                .filter(|bullet| !bullet.is_empty())
                .collect(),
        })
        .collect()
}

/// Clipboard/export text: the vegetation list (or the verbatim fallback)
/// followed by every non-empty advice section.
pub fn render_plain_text(result: &ExtractionResult, sections: &[AdviceSection]) -> String {
    let mut blocks = Vec::<String>::new();

    let vegetation = match result {
        ExtractionResult::Items { items } => items
            .iter()
            .map(|item| format!("• {} - {}", item.name, item.quantity_text))
            .collect::<Vec<String>>()
            .join("\n"),
        ExtractionResult::RawFallback { text } => text.clone(),
    };
    if !vegetation.trim().is_empty() {
        blocks.push(format!("{}:\n{}", VEGETATION_TITLE, vegetation));
    }

    for section in sections {
        if section.bullets.is_empty() {
            continue;
        }
        let bullets = section
            .bullets
            .iter()
            .map(|bullet| format!("• {}", bullet))
            .collect::<Vec<String>>()
            .join("\n");
        blocks.push(format!("{}:\n{}", section.label.title(), bullets));
    }

    blocks.join("\n\n")
}

#[derive(Template)]
#[template(path = "vegetation_table.html")]
struct VegetationTableTemplate<'a> {
    items: &'a [RecommendationItem],
}

#[derive(Template)]
#[template(path = "raw_fallback.html")]
struct RawFallbackTemplate<'a> {
    text: &'a str,
}

/// HTML fragment for the vegetation list; the fallback text is shown
/// verbatim in a `<pre>` block. Cells are escaped by the templates.
pub fn render_html(result: &ExtractionResult) -> Result<String> {
    match result {
        ExtractionResult::Items { items } => VegetationTableTemplate { items }
            .render()
            .context("failed to render vegetation table"),
        ExtractionResult::RawFallback { text } => RawFallbackTemplate { text }
            .render()
            .context("failed to render fallback text"),
    }
}
