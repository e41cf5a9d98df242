use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::{ExtractArgs, OutputFormat};
use crate::model::{
    AdviceLabel, DetailedBlocks, ExtractionReport, RawProviderPayload, StrategyKind,
};
use crate::pipeline::{RecommendationParser, render_html};
use crate::util::{now_utc_string, read_input, sha256_hex, to_json_pretty, write_output};

const REPORT_VERSION: u32 = 1;

const RECOMMENDATION_TEXT_KEYS: &[&str] =
    &["recommendationsText", "recommendations_text", "recommendations"];
const DETAILED_KEYS: &[&str] = &[
    "detailed",
    "detailed_recommendations",
    "detailedRecommendations",
];
const DETAILED_TEXT_KEYS: &[&str] = &["detailed_text", "detailedText"];

pub fn run(args: ExtractArgs) -> Result<()> {
    let raw = read_input(&args.payload)?;
    let payload_sha256 = sha256_hex(&raw);
    let value: Value = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse payload json: {}", args.payload.display()))?;

    let parser = RecommendationParser::new(args.tuning.to_config())?;
    let payload = payload_from_json(&value, &parser);

    info!(
        payload = %args.payload.display(),
        sha256 = %payload_sha256,
        format = args.format.as_str(),
        "extracting recommendations"
    );

    let output = parser.process(&payload);
    if output.extraction.result.is_fallback() {
        warn!("no extraction strategy matched; emitting raw fallback");
    } else {
        info!(
            strategy = output.extraction.strategy.map(StrategyKind::as_str).unwrap_or_default(),
            items = output.extraction.result.items().len(),
            "structured items extracted"
        );
    }

    let empty_sections = output
        .sections
        .iter()
        .filter(|section| section.bullets.is_empty())
        .map(|section| section.label.as_str())
        .collect::<Vec<&str>>();
    if !empty_sections.is_empty() {
        warn!(labels = ?empty_sections, "advice sections without bullets");
    }

    let rendered = match args.format {
        OutputFormat::Json => to_json_pretty(&ExtractionReport {
            report_version: REPORT_VERSION,
            generated_at: now_utc_string(),
            payload_sha256,
            strategy: output.extraction.strategy,
            result: output.extraction.result.clone(),
            safe_table: output.safe_rows.clone(),
            safe_fallback_text: output.safe_fallback_text.clone(),
            sections: output.sections.clone(),
            safe_sections: output.safe_sections.clone(),
            plain_text: output.plain_text.clone(),
        })?,
        OutputFormat::Text => output.plain_text.clone(),
        OutputFormat::Html => render_html(&output.extraction.result)?,
    };

    write_output(args.output.as_deref(), &rendered)?;

    if let Some(path) = &args.output {
        info!(path = %path.display(), "wrote extraction output");
    }

    Ok(())
}

/// Builds a payload from loosely-shaped JSON. Missing or non-string fields
/// become empty text or missing blocks rather than errors.
fn payload_from_json(value: &Value, parser: &RecommendationParser) -> RawProviderPayload {
    if let Value::String(text) = value {
        return RawProviderPayload {
            recommendations_text: text.clone(),
            detailed: DetailedBlocks::default(),
        };
    }

    let recommendations_text = first_string(value, RECOMMENDATION_TEXT_KEYS)
        .unwrap_or_default()
        .to_string();

    let mut detailed = DetailedBlocks::default();
    match DETAILED_KEYS.iter().find_map(|key| value.get(*key)) {
        Some(map @ Value::Object(_)) => {
            for label in AdviceLabel::ALL {
                if let Some(text) = first_string(map, &[label.as_str(), label.camel_case()]) {
                    detailed.set(label, text.to_string());
                }
            }
        }
        Some(Value::String(text)) => detailed = parser.split_detailed_sections(text),
        Some(Value::Null) | None => {}
        Some(other) => warn!(kind = json_kind(other), "ignoring malformed detailed field"),
    }

    if detailed.is_empty() {
        if let Some(text) = first_string(value, DETAILED_TEXT_KEYS) {
            detailed = parser.split_detailed_sections(text);
        }
    }

    RawProviderPayload {
        recommendations_text,
        detailed,
    }
}

fn first_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
