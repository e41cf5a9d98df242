use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub name: String,
    pub quantity_text: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceLabel {
    SoilLoss,
    SoilType,
    Vegetation,
}

impl AdviceLabel {
    pub const ALL: [AdviceLabel; 3] = [Self::SoilLoss, Self::SoilType, Self::Vegetation];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SoilLoss => "soil_loss",
            Self::SoilType => "soil_type",
            Self::Vegetation => "vegetation",
        }
    }

    pub fn camel_case(self) -> &'static str {
        match self {
            Self::SoilLoss => "soilLoss",
            Self::SoilType => "soilType",
            Self::Vegetation => "vegetation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SoilLoss => "Soil Loss Recommendations",
            Self::SoilType => "Soil Type Recommendations",
            Self::Vegetation => "Vegetation Recommendations",
        }
    }

    /// Heading number used by providers that answer with `SECTION n:` blocks.
    pub fn from_section_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::SoilLoss),
            2 => Some(Self::SoilType),
            3 => Some(Self::Vegetation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceSection {
    pub label: AdviceLabel,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedBlocks {
    pub soil_loss: Option<String>,
    pub soil_type: Option<String>,
    pub vegetation: Option<String>,
}

impl DetailedBlocks {
    pub fn get(&self, label: AdviceLabel) -> Option<&str> {
        match label {
            AdviceLabel::SoilLoss => self.soil_loss.as_deref(),
            AdviceLabel::SoilType => self.soil_type.as_deref(),
            AdviceLabel::Vegetation => self.vegetation.as_deref(),
        }
    }

    pub fn set(&mut self, label: AdviceLabel, text: String) {
        let slot = match label {
            AdviceLabel::SoilLoss => &mut self.soil_loss,
            AdviceLabel::SoilType => &mut self.soil_type,
            AdviceLabel::Vegetation => &mut self.vegetation,
        };
        *slot = Some(text);
    }

    pub fn is_empty(&self) -> bool {
        AdviceLabel::ALL.iter().all(|label| self.get(*label).is_none())
    }
}

/// One provider response, consumed once and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProviderPayload {
    pub recommendations_text: String,
    pub detailed: DetailedBlocks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Multiline,
    SingleLineGlobal,
    GlyphSplit,
    Plain,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multiline => "multiline",
            Self::SingleLineGlobal => "single_line_global",
            Self::GlyphSplit => "glyph_split",
            Self::Plain => "plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionResult {
    Items { items: Vec<RecommendationItem> },
    RawFallback { text: String },
}

impl ExtractionResult {
    pub fn items(&self) -> &[RecommendationItem] {
        match self {
            Self::Items { items } => items,
            Self::RawFallback { .. } => &[],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::RawFallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeRow {
    pub name: String,
    pub quantity_text: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub report_version: u32,
    pub generated_at: String,
    pub payload_sha256: String,
    pub strategy: Option<StrategyKind>,
    pub result: ExtractionResult,
    pub safe_table: Vec<SafeRow>,
    pub safe_fallback_text: Option<String>,
    pub sections: Vec<AdviceSection>,
    pub safe_sections: Vec<AdviceSection>,
    pub plain_text: String,
}
