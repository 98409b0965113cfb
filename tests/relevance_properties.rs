//! Behavioral properties of the relevance engine, checked over a small
//! hand-built catalog and a spread of queries.

use toolrank::relevance::predicate::like_pattern;
use toolrank::{build_predicate, classify, score, tokenize, Category, QueryEngine, ToolRecord};

const EPSILON: f64 = 1e-9;

fn claude() -> ToolRecord {
    ToolRecord::new(1, "Claude", Category::Chatbot)
        .with_tags(["assistant"])
        .with_description("An AI chatbot")
        .with_quality_score(80.0)
}

fn catalog() -> Vec<ToolRecord> {
    vec![
        claude(),
        ToolRecord::new(2, "Runway", Category::Video)
            .with_tags(["video", "editing"])
            .with_description("Generate and edit video clips")
            .with_quality_score(90.0),
        ToolRecord::new(3, "Copy Genie", Category::Writing)
            .with_tags(["copywriting"])
            .with_description("Marketing copy generator"),
        ToolRecord::new(4, "SiteForge", Category::Code)
            .with_description("Website builder for landing pages")
            .with_quality_score(40.0),
        ToolRecord::new(5, "Notion AI", Category::Productivity)
            .with_tags(["notes", "writing"])
            .with_description("Notes, docs and tasks")
            .with_quality_score(100.0),
        ToolRecord::new(6, "100% Free Bot", Category::Chatbot),
    ]
}

const QUERIES: &[&str] = &[
    "chatbot",
    "video editor",
    "website maker",
    "writing",
    "notes",
    "claude",
    "bots",
    "copy",
    "100%",
    "free_bot",
    "landing page",
    "  Video  ",
    "zzz",
];

/// True when every token group has a member in at least one searchable field.
fn every_group_matches(tool: &ToolRecord, query: &str) -> bool {
    let name = tool.name.to_lowercase();
    let category = tool.category.as_str().to_lowercase();
    let description = tool.description.to_lowercase();
    let tags: Vec<String> = tool.tags.iter().map(|t| t.to_lowercase()).collect();

    tokenize(query).iter().all(|group| {
        group.members().any(|w| {
            name.contains(w)
                || category.contains(w)
                || description.contains(w)
                || tags.iter().any(|t| t.contains(w))
        })
    })
}

/// Emulate `field ILIKE ANY(patterns)` for the `%word%` patterns the builder emits.
fn ilike_any(field: &str, patterns: &[String]) -> bool {
    let field = field.to_lowercase();
    patterns.iter().any(|pattern| {
        let inner = &pattern[1..pattern.len() - 1];
        let mut literal = String::new();
        let mut escaped = false;
        for c in inner.chars() {
            if escaped || c != '\\' {
                literal.push(c);
                escaped = false;
            } else {
                escaped = true;
            }
        }
        field.contains(&literal.to_lowercase())
    })
}

#[test]
fn test_positive_score_iff_every_group_matches() {
    for tool in catalog() {
        for query in QUERIES {
            let s = score(&tool, query).unwrap();
            assert_eq!(
                s > 0.0,
                every_group_matches(&tool, query),
                "tool {} query {:?} score {}",
                tool.name,
                query,
                s
            );
        }
    }
}

#[test]
fn test_empty_query_always_scores_zero() {
    for tool in catalog() {
        assert_eq!(score(&tool, "").unwrap(), 0.0);
    }
}

#[test]
fn test_tokenize_is_idempotent() {
    for query in QUERIES {
        assert_eq!(tokenize(query), tokenize(query));
    }
}

#[test]
fn test_quality_boost_is_monotonic() {
    for base in catalog() {
        for query in QUERIES {
            let low = score(&base.clone().with_quality_score(0.0), query).unwrap();
            let mid = score(&base.clone().with_quality_score(50.0), query).unwrap();
            let high = score(&base.clone().with_quality_score(100.0), query).unwrap();

            if low > 0.0 {
                assert!(low < mid && mid < high, "{} / {:?}", base.name, query);
                assert!((high - 2.0 * low).abs() < EPSILON);
            } else {
                assert_eq!(high, 0.0);
            }
        }
    }
}

#[test]
fn test_exact_name_outranks_non_exact() {
    for query in ["Claude", "Runway", "Copy Genie", "Notion"] {
        let exact = ToolRecord::new(1, query, Category::Other);
        let prefixed = ToolRecord::new(2, format!("{} Pro", query), Category::Other);
        let embedded = ToolRecord::new(3, format!("My {} Kit", query), Category::Other);

        let exact_score = score(&exact, query).unwrap();
        assert!(exact_score > score(&prefixed, query).unwrap());
        assert!(exact_score > score(&embedded, query).unwrap());
    }
}

#[test]
fn test_chatbot_scenario() {
    let groups = tokenize("chatbot");
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].members().collect::<Vec<_>>(),
        vec!["assistant", "bot", "chatbot", "conversational"]
    );

    // category: bot + chatbot (10 + 10); tags: assistant (15);
    // description: bot + chatbot (5 + 5); raw 45, boosted by 1.8
    let s = score(&claude(), "chatbot").unwrap();
    assert!((s - 45.0 * 1.8).abs() < EPSILON, "score was {}", s);
}

#[test]
fn test_video_editor_scenario() {
    let groups = tokenize("video editor");
    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[0].members().collect::<Vec<_>>(),
        vec!["animation", "clip", "editing", "movie", "video"]
    );
    assert_eq!(groups[1].members().collect::<Vec<_>>(), vec!["editor"]);

    assert_eq!(score(&claude(), "video editor").unwrap(), 0.0);
}

#[test]
fn test_exact_name_scenario() {
    // exact 100 + name hit 20, boosted by 1.8
    let s = score(&claude(), "Claude").unwrap();
    assert!((s - 120.0 * 1.8).abs() < EPSILON, "score was {}", s);
}

#[test]
fn test_seo_classification_scenario() {
    assert_eq!(classify("AI-driven SEO tool"), Category::Other);
}

#[test]
fn test_predicate_mode_agrees_with_in_memory_mode_without_tags() {
    let engine = QueryEngine::builtin();

    for tool in catalog() {
        let tool = tool.with_tags(Vec::<String>::new());
        for query in QUERIES {
            let predicate = build_predicate(query);
            if predicate.is_empty() {
                continue;
            }

            let sql_match = predicate.params.iter().all(|patterns| {
                ilike_any(&tool.name, patterns)
                    || ilike_any(&tool.description, patterns)
                    || ilike_any(tool.category.as_str(), patterns)
            });

            assert_eq!(
                sql_match,
                engine.matches(&tool, query).unwrap(),
                "tool {} query {:?}",
                tool.name,
                query
            );
        }
    }
}

#[test]
fn test_like_patterns_round_trip_through_emulation() {
    let patterns = vec![like_pattern("100%")];
    assert!(ilike_any("100% Free Bot", &patterns));
    assert!(!ilike_any("1000 Free Bot", &patterns));
}

#[test]
fn test_filter_and_rank_orders_catalog() {
    let records = catalog();
    let ranked = QueryEngine::builtin()
        .filter_and_rank(&records, "writing")
        .unwrap();

    let names: Vec<&str> = ranked.iter().map(|r| r.tool.name.as_str()).collect();
    // Copy Genie: "writing" and "writ" hit the category (20), and together
    // with "copywriting" they hit the tag (45) = 65.
    // Notion AI: "writing" and "writ" hit a tag (30), doubled by quality = 60.
    assert_eq!(names, vec!["Copy Genie", "Notion AI"]);
    assert!((ranked[0].score - 65.0).abs() < EPSILON);
    assert!((ranked[1].score - 60.0).abs() < EPSILON);
}
