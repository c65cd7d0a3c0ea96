//! Raw model labels and their canonical breed names

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the synset code and the breed tokens
const CODE_SEPARATOR: char = '-';

/// A class label exactly as it appears in the label catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawLabel(String);

impl RawLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Synset code prefix, if the label carries one
    pub fn code(&self) -> Option<&str> {
        self.0.split_once(CODE_SEPARATOR).map(|(code, _)| code)
    }

    /// Human-readable breed name for this label
    pub fn canonical_name(&self) -> String {
        canonicalize_label(&self.0)
    }
}

impl fmt::Display for RawLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RawLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Turn a raw label like `n02099601-golden_retriever` into `Golden Retriever`.
///
/// Everything up to the first `-` is treated as a code and dropped. Underscores
/// become spaces and every word is title-cased, so hyphenated names such as
/// `Shih-Tzu` keep a capital after the hyphen.
pub fn canonicalize_label(raw: &str) -> String {
    let tokens = match raw.split_once(CODE_SEPARATOR) {
        Some((_, rest)) => rest,
        None => raw,
    };

    tokens
        .replace('_', " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut run_start = true;

    for c in word.chars() {
        if run_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        run_start = !c.is_alphabetic();
    }

    out
}
