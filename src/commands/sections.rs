use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::SectionsArgs;
use crate::model::AdviceSection;
use crate::pipeline::{RecommendationParser, safe_sections};
use crate::util::{now_utc_string, read_input, sha256_hex, to_json_pretty, write_output};

#[derive(Debug, Serialize)]
struct SectionsReport {
    generated_at: String,
    input_sha256: String,
    sections: Vec<AdviceSection>,
    safe_sections: Vec<AdviceSection>,
}

pub fn run(args: SectionsArgs) -> Result<()> {
    let raw = read_input(&args.input)?;
    let input_sha256 = sha256_hex(&raw);
    let text = String::from_utf8_lossy(&raw);

    info!(input = %args.input.display(), sha256 = %input_sha256, "splitting detailed advice");

    let parser = RecommendationParser::new(args.tuning.to_config())?;
    let blocks = parser.split_detailed_sections(&text);
    if blocks.is_empty() {
        warn!("no SECTION headings found in detailed advice");
    }

    let sections = parser.advice_sections(&blocks);
    for section in &sections {
        info!(
            label = section.label.as_str(),
            bullets = section.bullets.len(),
            "bulletized section"
        );
    }

    let report = SectionsReport {
        generated_at: now_utc_string(),
        input_sha256,
        safe_sections: safe_sections(&sections),
        sections,
    };

    write_output(args.output.as_deref(), &to_json_pretty(&report)?)
}
