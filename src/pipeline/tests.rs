use super::*;

fn parser() -> RecommendationParser {
    RecommendationParser::new(ExtractConfig::default()).expect("parser should build")
}

fn item_pairs(extraction: &ItemExtraction) -> Vec<(String, String)> {
    extraction
        .result
        .items()
        .iter()
        .map(|item| (item.name.clone(), item.quantity_text.clone()))
        .collect()
}

#[test]
fn multiline_emoji_list_extracts_items_in_order() {
    let extraction = parser().extract_items("🌴 Coconut - 25 trees\n🌿 Pandan - 50 clumps");

    assert_eq!(extraction.strategy, Some(StrategyKind::Multiline));
    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25 trees".to_string()),
            ("Pandan".to_string(), "50 clumps".to_string()),
        ]
    );

    let items = extraction.result.items();
    assert_eq!(items[0].icon, "🌴");
    assert_eq!(items[1].icon, "🌿");
}

#[test]
fn duplicate_names_keep_first_casing() {
    let extraction = parser().extract_items("Mahogany - 10 trees\nmahogany - 5 trees");

    assert_eq!(
        item_pairs(&extraction),
        vec![("Mahogany".to_string(), "10 trees".to_string())]
    );
}

#[test]
fn narrative_prose_falls_back_verbatim() {
    let prose = "The coastline needs protection from strong waves.\nPlanting native species is a good idea.";
    let extraction = parser().extract_items(prose);

    assert_eq!(extraction.strategy, None);
    assert_eq!(
        extraction.result,
        ExtractionResult::RawFallback {
            text: prose.to_string()
        }
    );
}

#[test]
fn empty_text_is_empty_fallback() {
    let extraction = parser().extract_items("");

    assert_eq!(extraction.strategy, None);
    assert_eq!(
        extraction.result,
        ExtractionResult::RawFallback {
            text: String::new()
        }
    );
}

#[test]
fn fallback_carries_normalized_text() {
    let extraction = parser().extract_items("Keep  the dunes\u{200B} planted \u{2014} always.\r\n");

    assert_eq!(
        extraction.result,
        ExtractionResult::RawFallback {
            text: "Keep the dunes planted - always.\n".to_string()
        }
    );
}

#[test]
fn run_on_single_line_uses_global_scan() {
    let extraction = parser().extract_items(
        "🌴 Coconut – 25 trees 🌿 Pandan – 50 clumps 🌾 Vetiver grass – 100 clumps",
    );

    assert_eq!(extraction.strategy, Some(StrategyKind::SingleLineGlobal));
    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25 trees".to_string()),
            ("Pandan".to_string(), "50 clumps".to_string()),
            ("Vetiver grass".to_string(), "100 clumps".to_string()),
        ]
    );
}

#[test]
fn items_without_separators_split_on_glyphs() {
    let extraction = parser().extract_items("🌴 Coconut 25 trees 🌿 Pandan 50 clumps");

    assert_eq!(extraction.strategy, Some(StrategyKind::GlyphSplit));
    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25 trees".to_string()),
            ("Pandan".to_string(), "50 clumps".to_string()),
        ]
    );
}

#[test]
fn bare_parenthesized_item_uses_plain_strategy() {
    let extraction = parser().extract_items("Coconut (25 trees)");

    assert_eq!(extraction.strategy, Some(StrategyKind::Plain));
    assert_eq!(
        item_pairs(&extraction),
        vec![("Coconut".to_string(), "25 trees".to_string())]
    );
}

#[test]
fn narration_lines_are_dropped_around_data() {
    let raw = "Here are the best species for sandy soil:\n\
               ## Recommendations\n\
               🌴 Coconut - 25 trees\n\
               Based on the predicted soil loss, these species stabilize dunes.\n\
               🌾 Vetiver grass - 100 clumps";
    let extraction = parser().extract_items(raw);

    assert_eq!(extraction.strategy, Some(StrategyKind::Multiline));
    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25 trees".to_string()),
            ("Vetiver grass".to_string(), "100 clumps".to_string()),
        ]
    );
}

#[test]
fn corrupted_emoji_markers_are_tolerated() {
    let extraction = parser().extract_items("ðŸŒ´ Coconut - 25 trees\nðŸŒ¿ Pandan - 50 clumps");

    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25 trees".to_string()),
            ("Pandan".to_string(), "50 clumps".to_string()),
        ]
    );
}

#[test]
fn unitless_counts_do_not_borrow_the_next_line() {
    let extraction = parser().extract_items("Coconut - 25\nPandan - 50");

    assert_eq!(extraction.strategy, None);
    assert!(extraction.result.is_fallback());
}

#[test]
fn global_scan_stays_within_one_line() {
    let patterns = ItemPatterns::new().expect("patterns should build");
    let outcome = run_strategy(
        StrategyKind::SingleLineGlobal,
        &patterns,
        "Coconut - 25\nPandan - 50 clumps",
        &[],
    );

    let StrategyOutcome::Found(candidates) = outcome else {
        panic!("expected the second line to match");
    };
    assert_eq!(
        candidates,
        vec![Candidate {
            name: "Pandan".to_string(),
            quantity_text: "50 clumps".to_string(),
        }]
    );
}

#[test]
fn range_quantities_stay_whole() {
    let extraction =
        parser().extract_items("🌴 Coconut – 25-30 trees\n🌿 Pandan – 40 - 50 clumps");

    assert_eq!(extraction.strategy, Some(StrategyKind::Multiline));
    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25-30 trees".to_string()),
            ("Pandan".to_string(), "40 - 50 clumps".to_string()),
        ]
    );
}

#[test]
fn range_quantities_survive_single_line_scan() {
    let extraction = parser().extract_items("🌴 Coconut – 25–30 trees 🌿 Pandan – 1,000-1,200 clumps");

    assert_eq!(extraction.strategy, Some(StrategyKind::SingleLineGlobal));
    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25-30 trees".to_string()),
            ("Pandan".to_string(), "1,000-1,200 clumps".to_string()),
        ]
    );
}

#[test]
fn glued_corrupted_emoji_is_stripped_from_names() {
    let extraction = parser().extract_items("ðŸŒ´Coconut - 25 trees\nðŸŒ¿Pandan - 50 clumps");

    assert_eq!(
        item_pairs(&extraction),
        vec![
            ("Coconut".to_string(), "25 trees".to_string()),
            ("Pandan".to_string(), "50 clumps".to_string()),
        ]
    );
    assert_eq!(extraction.result.items()[0].icon, "🌴");
}

#[test]
fn accented_leading_letters_are_kept_in_names() {
    assert_eq!(
        names::normalize_item_name("âçaí palm").as_deref(),
        Some("âçaí palm")
    );
    assert_eq!(
        names::normalize_item_name("â€¢Vetiver grass").as_deref(),
        Some("Vetiver grass")
    );
}

#[test]
fn thousands_separators_stay_in_quantity() {
    let extraction = parser().extract_items("Coconut - 1,200 trees\nPandan - 50 clumps");

    assert_eq!(extraction.result.items()[0].quantity_text, "1,200 trees");
}

#[test]
fn extracted_items_satisfy_record_invariants() {
    let extraction = parser().extract_items(
        "1. 🌳 Mahogany trees - 10 trees\n2. 🎋 Bamboo - 5 clusters\n3. 🌱 Sea grape: 12 plants",
    );

    let items = extraction.result.items();
    assert_eq!(items.len(), 3);
    for item in items {
        assert!(!item.name.is_empty());
        assert_eq!(item.name, item.name.trim());
        assert!(item.quantity_text.chars().any(|ch| ch.is_ascii_digit()));
        assert!(!item.icon.is_empty());
    }
    assert_eq!(items[0].name, "Mahogany");
    assert_eq!(items[2].name, "Sea grape");
    assert_eq!(items[2].icon, "🍇");
}

#[test]
fn single_line_input_skips_multiline_strategy() {
    let patterns = ItemPatterns::new().expect("patterns should build");
    let outcome = run_strategy(
        StrategyKind::Multiline,
        &patterns,
        "Coconut - 25 trees",
        &["Coconut - 25 trees"],
    );

    assert_eq!(outcome, StrategyOutcome::NoneFound);
}

#[test]
fn glyph_split_ignores_text_before_first_marker() {
    let patterns = ItemPatterns::new().expect("patterns should build");
    let outcome = run_strategy(
        StrategyKind::GlyphSplit,
        &patterns,
        "Plant 40 seedlings 🌴 Coconut 25 trees",
        &[],
    );

    let StrategyOutcome::Found(candidates) = outcome else {
        panic!("expected glyph candidates");
    };
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Coconut");
}

#[test]
fn candidates_with_empty_names_are_discarded() {
    let extraction = parser().extract_items("🌴 Trees - 25 trees\n🌿 Plants - 10 plants");

    assert!(extraction.result.is_fallback());
}

#[test]
fn noise_filter_keeps_item_shaped_lines() {
    let patterns = ItemPatterns::new().expect("patterns should build");
    let long_line = "word ".repeat(40);
    let lines = vec![
        "Additional Mahogany - 10 trees",
        "Additional notes on spacing",
        "**Important:** water daily",
        "Use one clump per hectare",
        "",
        long_line.trim(),
        "Pandan - 50 clumps",
    ];

    let kept = filter_noise_lines(&lines, &patterns.item_shape, 120);
    assert_eq!(kept, vec!["Additional Mahogany - 10 trees", "Pandan - 50 clumps"]);
}

#[test]
fn noise_filter_respects_configured_line_cutoff() {
    let patterns = ItemPatterns::new().expect("patterns should build");
    let lines = vec!["Plant along the shore", "Coconut palms"];

    let kept = filter_noise_lines(&lines, &patterns.item_shape, 15);
    assert_eq!(kept, vec!["Coconut palms"]);
}

#[test]
fn normalizer_unifies_dashes_and_invisible_marks() {
    assert_eq!(normalize_text("Coconut – 25 trees"), "Coconut - 25 trees");
    assert_eq!(normalize_text("Pandan — 5 ― x"), "Pandan - 5 - x");
    assert_eq!(normalize_text("🌿\u{FE0F} Pandan\u{200B}"), "🌿 Pandan");
    assert_eq!(normalize_text("a \t  b\r\n  c  \rd"), "a b\nc\nd");
    assert_eq!(normalize_text("cafe\u{0301}"), "caf\u{00E9}");
    assert_eq!(
        normalize_text("Sea\u{2011}grape \u{2010} 5 trees"),
        "Sea-grape - 5 trees"
    );
    assert_eq!(
        normalize_text("a\u{FE58}b\u{FE63}c\u{FF0D}d"),
        "a-b-c-d"
    );
}

#[test]
fn normalizer_is_idempotent() {
    let samples = [
        "",
        "  🌴 Coconut \u{2013} 25 trees  \r\n\r\n🌿\u{FE0F} Pandan\t-\t50 clumps ",
        "e\u{200B}\u{0301} mixed\u{00A0}\u{00A0}spaces",
        "\u{FEFF}SECTION 1:\n• Mulch\u{2060} soil",
    ];

    for sample in samples {
        let once = normalize_text(sample);
        assert_eq!(normalize_text(&once), once, "sample: {sample:?}");
    }
}

#[test]
fn name_normalizer_strips_markers_and_descriptors() {
    assert_eq!(
        names::normalize_item_name("🌴 Coconut trees").as_deref(),
        Some("Coconut")
    );
    assert_eq!(
        names::normalize_item_name("Beach morning glory").as_deref(),
        Some("Beach morning glory")
    );
    assert_eq!(
        names::normalize_item_name("1. Mahogany").as_deref(),
        Some("Mahogany")
    );
    assert_eq!(
        names::normalize_item_name("ðŸŒ´ Coconut").as_deref(),
        Some("Coconut")
    );
    assert_eq!(
        names::normalize_item_name("**Bamboo**").as_deref(),
        Some("Bamboo")
    );
    assert_eq!(
        names::normalize_item_name("Vetiver grass clumps recommended").as_deref(),
        Some("Vetiver grass")
    );
    assert_eq!(names::normalize_item_name("Trees"), None);
    assert_eq!(names::normalize_item_name("🌿 "), None);
}

#[test]
fn icon_resolution_prefers_specific_keys() {
    let icons = IconResolver::new();

    assert_eq!(icons.resolve("Coconut"), "🌴");
    assert_eq!(icons.resolve("Giant bamboo grove"), "🎋");
    assert_eq!(icons.resolve("Vetiver grass hedge"), "🌾");
    assert_eq!(icons.resolve("Beach morning glory vine"), "🌸");
    assert_eq!(icons.resolve("Royal palm"), "🌴");
    assert_eq!(icons.resolve("Sea lavender shrub"), "🌿");
    assert_eq!(icons.resolve("Zzyzx"), DEFAULT_ICON);
}

#[test]
fn icon_resolution_is_total_and_deterministic() {
    let icons = IconResolver::new();
    let names = [
        "Coconut",
        "Pandan",
        "Napier grass",
        "Unknown creeper",
        "Ω",
        "x",
        "Talisay tree",
    ];

    for name in names {
        let first = icons.resolve(name);
        let second = icons.resolve(name);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}

#[test]
fn bulletizer_drops_overlong_lines_and_keeps_order() {
    let long = "Install coir logs along the eroding dune face ".repeat(6);
    let block = format!(
        "- Mulch bare soil after planting\n- {long}\n- Build low terraces on slopes\n- {long}\n- Keep livestock off the dunes"
    );

    assert_eq!(
        parser().bulletize(&block),
        vec![
            "Mulch bare soil after planting",
            "Build low terraces on slopes",
            "Keep livestock off the dunes",
        ]
    );
}

#[test]
fn bulletizer_cleans_markers_and_markup() {
    let block = "Soil loss plan:\n\
                 • **Terraces** reduce runoff on slopes\n\
                 1. Plant vetiver along contours\n\
                 - ok\n\
                 • Recommendation 1\n\
                 - Based on the soil loss, act fast\n\
                 * Check erosion pins monthly";

    assert_eq!(
        parser().bulletize(block),
        vec![
            "Terraces reduce runoff on slopes",
            "Plant vetiver along contours",
            "Check erosion pins monthly",
        ]
    );
}

#[test]
fn bulletizer_accepts_glyphs_without_following_space() {
    let parser = parser();

    assert_eq!(
        parser.bulletize("•Mulch the dunes weekly\n•Plant vetiver on contours"),
        vec!["Mulch the dunes weekly", "Plant vetiver on contours"]
    );
    assert_eq!(
        parser.bulletize("**Mulch the dunes weekly**.\n-5 degrees is too cold."),
        vec!["Mulch the dunes weekly.", "-5 degrees is too cold."]
    );
}

#[test]
fn bulletizer_splits_unbulleted_prose_into_sentences() {
    let block = "Mulch the slopes after rain. Plant grass on 7.82 ha plots!\nIs irrigation needed? ok.";

    assert_eq!(
        parser().bulletize(block),
        vec![
            "Mulch the slopes after rain.",
            "Plant grass on 7.82 ha plots!",
            "Is irrigation needed?",
        ]
    );
}

#[test]
fn bulletizer_handles_empty_block() {
    assert!(parser().bulletize("").is_empty());
    assert!(parser().bulletize("\n  \n").is_empty());
}

#[test]
fn sectioned_response_splits_into_three_blocks() {
    let text = "**SECTION 1: Soil Loss Mitigation**\n\
                • Build terraces on steep slopes\n\
                • Mulch exposed soil after rain\n\
                \n\
                SECTION 2:\n\
                • Add organic matter to sandy soil\n\
                \n\
                SECTION 3 - Vegetation\n\
                - Water seedlings during dry months";

    let parser = parser();
    let blocks = parser.split_detailed_sections(text);
    assert_eq!(
        blocks.soil_loss.as_deref(),
        Some("• Build terraces on steep slopes\n• Mulch exposed soil after rain")
    );
    assert_eq!(
        blocks.soil_type.as_deref(),
        Some("• Add organic matter to sandy soil")
    );
    assert_eq!(
        blocks.vegetation.as_deref(),
        Some("- Water seedlings during dry months")
    );

    let sections = parser.advice_sections(&blocks);
    let labels = sections
        .iter()
        .map(|section| section.label)
        .collect::<Vec<AdviceLabel>>();
    assert_eq!(labels, AdviceLabel::ALL.to_vec());
    assert_eq!(sections[0].bullets.len(), 2);
    assert_eq!(sections[1].bullets, vec!["Add organic matter to sandy soil"]);
    assert_eq!(sections[2].bullets, vec!["Water seedlings during dry months"]);
}

#[test]
fn missing_section_headings_leave_blocks_missing() {
    let blocks = parser().split_detailed_sections("SECTION 2: Keep the soil covered.");

    assert_eq!(blocks.soil_loss, None);
    assert_eq!(blocks.soil_type.as_deref(), Some("Keep the soil covered."));
    assert_eq!(blocks.vegetation, None);
}

#[test]
fn missing_detailed_blocks_give_empty_sections() {
    let sections = parser().advice_sections(&DetailedBlocks::default());

    assert_eq!(sections.len(), 3);
    assert!(sections.iter().all(|section| section.bullets.is_empty()));
}

#[test]
fn sanitizer_folds_to_renderer_safe_text() {
    assert_eq!(
        sanitize_for_export("🌴 Coconut – 25 trees"),
        "Coconut - 25 trees"
    );
    assert_eq!(
        sanitize_for_export("\u{201C}Quoted\u{201D} caf\u{00E9}\u{2026}"),
        "\"Quoted\" caf\u{00E9}..."
    );
    assert_eq!(
        sanitize_for_export("  line one  \n\tline two "),
        "line one\nline two"
    );
    assert_eq!(sanitize_for_export("Pandan\u{FE0F}\u{200B}"), "Pandan");
    assert_eq!(sanitize_for_export("• Mulch"), "- Mulch");
    assert_eq!(sanitize_for_export("Ipil\u{2011}ipil"), "Ipil-ipil");
    assert_eq!(sanitize_for_export("Bamboo\u{FF0D}grass"), "Bamboo-grass");
    assert_eq!(sanitize_for_export("🌿"), "");
}

#[test]
fn sanitizer_is_idempotent() {
    let samples = [
        "",
        "🌴 Coconut – 25 trees\r\n🌿\u{FE0F} Pandan — 50 clumps",
        "A\u{0301}\u{0327} mixed 🌊 marks\u{00AD}",
        "\u{2018}single\u{2019}\t\t\u{00A0}spaced\u{2026}",
        "漢字 and ελληνικά",
    ];

    for sample in samples {
        let once = sanitize_for_export(sample);
        assert_eq!(sanitize_for_export(&once), once, "sample: {sample:?}");
    }
}

#[test]
fn process_builds_every_output_contract() {
    let payload = RawProviderPayload {
        recommendations_text: "🌴 Coconut - 25 trees\n🌿 Pandan - 50 clumps".to_string(),
        detailed: DetailedBlocks {
            soil_loss: Some("• Build terraces on steep slopes".to_string()),
            soil_type: None,
            vegetation: Some("• Water seedlings 🌱 during dry months".to_string()),
        },
    };

    let output = parser().process(&payload);

    assert_eq!(output.safe_rows.len(), 2);
    assert_eq!(output.safe_rows[0].name, "Coconut");
    assert_eq!(output.safe_rows[0].quantity_text, "25 trees");
    assert!(output.safe_rows.iter().all(|row| row.icon == "*"));
    assert_eq!(output.safe_fallback_text, None);

    assert_eq!(output.sections[1].bullets.len(), 0);
    assert_eq!(
        output.safe_sections[2].bullets,
        vec!["Water seedlings during dry months"]
    );

    assert!(output.plain_text.starts_with("Recommended Vegetation:\n• Coconut - 25 trees\n• Pandan - 50 clumps"));
    assert!(output
        .plain_text
        .contains("Soil Loss Recommendations:\n• Build terraces on steep slopes"));
    assert!(!output.plain_text.contains("Soil Type Recommendations"));
}

#[test]
fn process_sanitizes_fallback_text() {
    let payload = RawProviderPayload {
        recommendations_text: "Sorry 🌊 the provider is unavailable".to_string(),
        detailed: DetailedBlocks::default(),
    };

    let output = parser().process(&payload);

    assert!(output.extraction.result.is_fallback());
    assert!(output.safe_rows.is_empty());
    assert_eq!(
        output.safe_fallback_text.as_deref(),
        Some("Sorry the provider is unavailable")
    );
    assert_eq!(
        output.plain_text,
        "Recommended Vegetation:\nSorry 🌊 the provider is unavailable"
    );
}

#[test]
fn html_rendering_escapes_cells() {
    let result = ExtractionResult::Items {
        items: vec![RecommendationItem {
            name: "Sea <grape> & co".to_string(),
            quantity_text: "3 trees".to_string(),
            icon: "🍇".to_string(),
        }],
    };

    let html = render_html(&result).expect("table should render");
    assert!(html.contains("<td>Sea &lt;grape&gt; &amp; co</td>"));
    assert!(html.contains("<td>🍇</td>"));
    assert!(html.starts_with("<table>"));

    let fallback = render_html(&ExtractionResult::RawFallback {
        text: "<b>raw</b>".to_string(),
    })
    .expect("fallback should render");
    assert_eq!(fallback.trim(), "<pre>&lt;b&gt;raw&lt;/b&gt;</pre>");
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = parser();
    let inputs = [
        "🌴 Coconut - 25 trees\n🌿 Pandan - 50 clumps",
        "Mahogany - 10 trees",
        "nothing to see here",
        "🌴 Coconut 25 trees 🌿 Pandan 50 clumps",
    ];
    let expected = inputs
        .iter()
        .map(|input| parser.extract_items(input))
        .collect::<Vec<ItemExtraction>>();

    let shared = &parser;
    std::thread::scope(|scope| {
        let handles = inputs
            .iter()
            .map(|input| scope.spawn(move || shared.extract_items(input)))
            .collect::<Vec<_>>();

        for (handle, expected) in handles.into_iter().zip(expected.iter()) {
            let actual = handle.join().expect("worker should not panic");
            assert_eq!(&actual, expected);
        }
    });
}
