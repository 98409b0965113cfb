use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of directory categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Code,
    Writing,
    Business,
    Image,
    Video,
    Audio,
    Chatbot,
    Productivity,
    #[default]
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 9] = [
        Category::Code,
        Category::Writing,
        Category::Business,
        Category::Image,
        Category::Video,
        Category::Audio,
        Category::Chatbot,
        Category::Productivity,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Code => "Code",
            Category::Writing => "Writing",
            Category::Business => "Business",
            Category::Image => "Image",
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Chatbot => "Chatbot",
            Category::Productivity => "Productivity",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup of an exact label, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
