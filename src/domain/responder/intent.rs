//! Intent categories and keyword matching

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Keywords at least this long may also match inside words
pub const LONG_KEYWORD_LEN: usize = 7;

/// Topic of a question, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Diet,
    Origin,
    Lifespan,
    Climate,
    Grooming,
    Training,
    Size,
    Greeting,
    /// Anything else; answered with the breed biography
    General,
}

impl Intent {
    /// Keyword-driven intents, highest priority first
    pub const PRIORITY: [Intent; 8] = [
        Intent::Diet,
        Intent::Origin,
        Intent::Lifespan,
        Intent::Climate,
        Intent::Grooming,
        Intent::Training,
        Intent::Size,
        Intent::Greeting,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Diet => &[
                "eat", "eats", "eating", "food", "foods", "diet", "feed", "feeding", "fed",
                "hungry", "treat", "treats", "nutrition",
            ],
            Self::Origin => &[
                "origin", "origins", "originate", "from", "country", "history", "where",
            ],
            Self::Lifespan => &["live", "lives", "life", "lifespan", "age", "years", "old", "die"],
            Self::Climate => &[
                "weather", "cold", "hot", "heat", "winter", "winters", "summer", "summers",
                "climate", "temp", "temperature",
            ],
            Self::Grooming => &[
                "groom", "groomed", "grooming", "brush", "brushed", "brushing", "hair", "shed",
                "shedding", "fur", "coat", "bath",
            ],
            Self::Training => &[
                "train", "trained", "training", "sit", "stay", "behavior", "behaviour", "smart",
                "intelligent", "obedience",
            ],
            Self::Size => &["big", "small", "size", "height", "weight", "tall", "large"],
            Self::Greeting => &["hello", "hi", "hey"],
            Self::General => &[],
        }
    }

    /// Whether any of this intent's keywords occur in the question
    pub fn matches(&self, question: &Question) -> bool {
        self.keywords().iter().any(|keyword| question.mentions(keyword))
    }

    /// First intent in priority order that the question mentions
    pub fn classify(question: &Question) -> Intent {
        Self::PRIORITY
            .into_iter()
            .find(|intent| intent.matches(question))
            .unwrap_or(Intent::General)
    }
}

/// A lowercased question split into words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    tokens: Vec<String>,
}

impl Question {
    pub fn new(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let tokens = text.unicode_words().map(str::to_string).collect();

        Self { text, tokens }
    }

    /// Lowercased question text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Short keywords must be a whole word; long ones may appear anywhere.
    pub fn mentions(&self, keyword: &str) -> bool {
        if self.tokens.iter().any(|token| token == keyword) {
            return true;
        }

        keyword.chars().count() >= LONG_KEYWORD_LEN && self.text.contains(keyword)
    }
}
