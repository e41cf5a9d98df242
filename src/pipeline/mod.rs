use anyhow::Result;
use regex::Regex;

use crate::model::{
    AdviceLabel, AdviceSection, DetailedBlocks, ExtractionResult, RawProviderPayload,
    RecommendationItem, SafeRow, StrategyKind,
};

mod bullets;
mod dedupe;
mod icons;
mod matcher;
mod names;
mod noise;
mod normalize;
mod render;
mod sanitize;
mod sections;
#[cfg(test)]
mod tests;

pub use render::{render_html, render_plain_text, safe_sections};
pub use sanitize::sanitize_for_export;

use bullets::*;
use dedupe::*;
use icons::*;
use matcher::*;
use noise::*;
use normalize::*;
use render::safe_rows;
use sections::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    pub max_noise_line_chars: usize,
    pub min_bullet_chars: usize,
    pub max_bullet_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_noise_line_chars: 120,
            min_bullet_chars: 6,
            max_bullet_chars: 220,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemExtraction {
    pub result: ExtractionResult,
    pub strategy: Option<StrategyKind>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub extraction: ItemExtraction,
    pub sections: Vec<AdviceSection>,
    pub safe_rows: Vec<SafeRow>,
    pub safe_fallback_text: Option<String>,
    pub safe_sections: Vec<AdviceSection>,
    pub plain_text: String,
}

/// Compiled patterns and lookup tables. Holds no per-request state, so one
/// parser can serve any number of payloads, from any thread.
#[derive(Debug)]
pub struct RecommendationParser {
    config: ExtractConfig,
    items: ItemPatterns,
    bullets: BulletPatterns,
    section_heading: Regex,
    icons: IconResolver,
}

impl RecommendationParser {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        Ok(Self {
            config,
            items: ItemPatterns::new()?,
            bullets: BulletPatterns::new()?,
            section_heading: section_heading_regex()?,
            icons: IconResolver::new(),
        })
    }

    pub fn extract_items(&self, raw: &str) -> ItemExtraction {
        let normalized = normalize_text(raw);
        let lines = normalized.lines().collect::<Vec<&str>>();
        let filtered = filter_noise_lines(
            &lines,
            &self.items.item_shape,
            self.config.max_noise_line_chars,
        );

        match run_cascade(&self.items, &normalized, &filtered) {
            Some((strategy, candidates)) => {
                let items = candidates
                    .into_iter()
                    .map(|candidate| RecommendationItem {
                        icon: self.icons.resolve(&candidate.name).to_string(),
                        name: candidate.name,
                        quantity_text: candidate.quantity_text,
                    })
                    .collect::<Vec<RecommendationItem>>();

                ItemExtraction {
                    result: ExtractionResult::Items {
                        items: dedupe_items(items),
                    },
                    strategy: Some(strategy),
                }
            }
            None => ItemExtraction {
                result: ExtractionResult::RawFallback { text: normalized },
                strategy: None,
            },
        }
    }

    pub fn bulletize(&self, block: &str) -> Vec<String> {
        bulletize_block(
            block,
            &self.bullets,
            BulletLimits {
                min_chars: self.config.min_bullet_chars,
                max_chars: self.config.max_bullet_chars,
            },
        )
    }

    /// Always three sections, in label order; missing blocks give no bullets.
    pub fn advice_sections(&self, detailed: &DetailedBlocks) -> Vec<AdviceSection> {
        AdviceLabel::ALL
            .iter()
            .map(|label| AdviceSection {
                label: *label,
                bullets: detailed
                    .get(*label)
                    .map(|block| self.bulletize(block))
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn split_detailed_sections(&self, text: &str) -> DetailedBlocks {
        split_detailed_sections(text, &self.section_heading, &self.bullets.bullet_line)
    }

    pub fn process(&self, payload: &RawProviderPayload) -> PipelineOutput {
        let extraction = self.extract_items(&payload.recommendations_text);
        let sections = self.advice_sections(&payload.detailed);

        let safe_fallback_text = match &extraction.result {
            ExtractionResult::RawFallback { text } => Some(sanitize_for_export(text)),
            ExtractionResult::Items { .. } => None,
        };

        PipelineOutput {
            safe_rows: safe_rows(extraction.result.items()),
            safe_fallback_text,
            safe_sections: safe_sections(&sections),
            plain_text: render_plain_text(&extraction.result, &sections),
            extraction,
            sections,
        }
    }
}
