//! Turning a raw score vector into a breed prediction

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog::LabelCatalog;
use super::label::RawLabel;
use crate::domain::DomainError;

/// One entry of a top-K ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBreed {
    pub breed: String,
    pub raw_label: RawLabel,
    pub index: usize,
    /// Percentage in `[0, 100]`
    pub confidence: f32,
}

/// Best breed guess for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    breed: String,
    raw_label: RawLabel,
    index: usize,
    confidence: f32,
    top_k: Vec<RankedBreed>,
}

impl Prediction {
    pub fn new(breed: impl Into<String>, raw_label: RawLabel, index: usize, confidence: f32) -> Self {
        Self {
            breed: breed.into(),
            raw_label,
            index,
            confidence,
            top_k: Vec::new(),
        }
    }

    pub fn with_top_k(mut self, top_k: Vec<RankedBreed>) -> Self {
        self.top_k = top_k;
        self
    }

    /// Canonical breed name
    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn raw_label(&self) -> &RawLabel {
        &self.raw_label
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Percentage in `[0, 100]`
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn top_k(&self) -> &[RankedBreed] {
        &self.top_k
    }
}

/// Pick the highest-scoring catalog entry.
///
/// Ties go to the lowest index. NaN scores are never selected.
pub fn interpret(
    scores: &[f32],
    catalog: &LabelCatalog,
    top_k: usize,
) -> Result<Prediction, DomainError> {
    if scores.len() != catalog.len() {
        return Err(DomainError::inference(format!(
            "Score vector has {} entries but the catalog has {} labels",
            scores.len(),
            catalog.len()
        )));
    }

    let (index, score) = arg_max(scores)
        .ok_or_else(|| DomainError::inference("Model produced no usable scores"))?;

    let raw_label = catalog
        .get(index)
        .cloned()
        .ok_or_else(|| DomainError::inference(format!("No label for index {}", index)))?;

    Ok(Prediction::new(raw_label.canonical_name(), raw_label, index, score * 100.0)
        .with_top_k(rank(scores, catalog, top_k)))
}

/// Top `k` catalog entries by descending score
pub fn rank(scores: &[f32], catalog: &LabelCatalog, k: usize) -> Vec<RankedBreed> {
    let mut indexed: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .collect();

    // Stable sort keeps lower indices first among equal scores
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    indexed
        .into_iter()
        .take(k)
        .filter_map(|(index, score)| {
            catalog.get(index).map(|label| RankedBreed {
                breed: label.canonical_name(),
                raw_label: label.clone(),
                index,
                confidence: score * 100.0,
            })
        })
        .collect()
}

fn arg_max(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }

        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    best
}
