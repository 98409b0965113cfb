//! Ingestion-time category heuristics.
//!
//! None of this runs at query time. Records are normalized onto the closed
//! [`Category`] set once, when the catalog is loaded.

use crate::taxonomy::category::Category;

/// Ordered keyword rules for free-text category labels. First hit wins.
const CATEGORY_RULES: &[(&str, Category)] = &[
    ("code", Category::Code),
    ("dev", Category::Code),
    ("business", Category::Business),
    ("writing", Category::Writing),
    ("copy", Category::Writing),
    ("image", Category::Image),
    ("art", Category::Image),
    ("chat", Category::Chatbot),
    ("assistant", Category::Chatbot),
    ("productivity", Category::Productivity),
    ("video", Category::Video),
    ("music", Category::Audio),
    ("audio", Category::Audio),
];

/// Keyword vocabularies for inferring a category from a tool's name and
/// description. Order matters for ties.
const INFERENCE_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Code,
        &[
            "code", "developer", "programming", "git", "api", "database", "website", "builder",
            "no-code", "nocode", "low-code", "app", "deployment", "hosting", "frontend",
            "backend", "full stack",
        ],
    ),
    (
        Category::Writing,
        &[
            "copywriting", "blog", "text", "writer", "essay", "seo", "content", "email", "story",
            "novel", "script", "paraphrase",
        ],
    ),
    (
        Category::Business,
        &[
            "business", "marketing", "sales", "finance", "crm", "workflow", "startup",
            "entrepreneur", "management", "strategy", "analytics", "branding", "business plan",
        ],
    ),
    (
        Category::Image,
        &[
            "image", "photo", "drawing", "art", "avatar", "logo", "generator", "visual",
            "picture", "diffusion", "rendering", "portrait",
        ],
    ),
    (
        Category::Video,
        &["video", "editor", "clip", "animation", "movie", "film", "subtitle"],
    ),
    (
        Category::Audio,
        &[
            "voice", "speech", "music", "audio", "transcription", "podcast", "sound", "vocals",
        ],
    ),
    (
        Category::Chatbot,
        &["chat", "assistant", "support", "bot", "conversational", "gpt", "llm"],
    ),
    (
        Category::Productivity,
        &[
            "note", "task", "schedule", "calendar", "organize", "search", "browser", "extension",
            "summar",
        ],
    ),
];

/// Tags that carry no signal in an AI tool directory.
const JUNK_TAGS: &[&str] = &[
    "ai",
    "ai-powered",
    "ai-driven",
    "innovation",
    "technology",
    "artificial intelligence",
];

/// Map an arbitrary category label onto the closed set.
///
/// Exact labels win outright; otherwise the first keyword rule contained in the
/// lower-cased text decides, falling back to [`Category::Other`].
pub fn classify(text: &str) -> Category {
    if let Some(category) = Category::from_label(text) {
        return category;
    }

    let lowered = text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// Infer a category from descriptive text by counting keyword hits.
///
/// The category with the most distinct keyword hits wins; ties go to the
/// category listed first. No hits at all yields [`Category::Other`].
pub fn infer_category(name: &str, description: &str) -> Category {
    let text = format!("{} {}", name, description).to_lowercase();

    let mut best = Category::Other;
    let mut best_hits = 0;

    for (category, keywords) in INFERENCE_KEYWORDS {
        let hits = keywords.iter().filter(|k| text.contains(*k)).count();
        if hits > best_hits {
            best_hits = hits;
            best = *category;
        }
    }

    best
}

/// Trim tags and drop empty, junk and duplicate entries (case-insensitive),
/// keeping the first spelling seen.
pub fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut cleaned = Vec::new();

    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            continue;
        }

        let key = tag.to_lowercase();
        if JUNK_TAGS.contains(&key.as_str()) || seen.contains(&key) {
            continue;
        }

        seen.push(key);
        cleaned.push(tag.to_string());
    }

    cleaned
}
