//! Classify command - identify the breed in one image

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::debug;

use crate::domain::{ConfidencePolicy, Verdict};
use crate::infrastructure::logging;

#[derive(Args, Clone)]
pub struct ClassifyArgs {
    /// Image file (JPEG or PNG)
    pub image: PathBuf,

    /// Number of ranked candidates to print (overrides config)
    #[arg(long)]
    pub top_k: Option<usize>,
}

pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let mut config = super::load_config();
    logging::init_cli_logging(&config.logging.level);

    if let Some(top_k) = args.top_k {
        config.classifier.top_k = top_k;
    }

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    debug!(path = %args.image.display(), bytes = bytes.len(), "Read image");

    let classifier = crate::create_classifier(&config.classifier)?;
    let policy = ConfidencePolicy::new(config.classifier.confidence_threshold)?;

    let prediction = classifier.identify(&bytes).await?;
    let verdict = policy.evaluate(prediction);

    print!("{}", render_verdict(&verdict, policy.threshold()));
    Ok(())
}

/// Human-readable report for one classification
pub fn render_verdict(verdict: &Verdict, threshold: f32) -> String {
    let prediction = verdict.prediction();
    let mut out = String::new();

    let _ = writeln!(out, "Breed:      {}", prediction.breed());
    let _ = writeln!(out, "Label:      {}", prediction.raw_label());
    let _ = writeln!(out, "Confidence: {:.1}%", prediction.confidence());

    match verdict {
        Verdict::Accepted(_) => {
            let _ = writeln!(out, "Verdict:    identified (threshold {:.1}%)", threshold);
        }
        Verdict::LowConfidence(_) => {
            let _ = writeln!(
                out,
                "Verdict:    no dog detected (below {:.1}%); try a clearer photo",
                threshold
            );
        }
    }

    if !prediction.top_k().is_empty() {
        let _ = writeln!(out, "Candidates:");
        for (rank, candidate) in prediction.top_k().iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<32} {:>5.1}%",
                rank + 1,
                candidate.breed,
                candidate.confidence
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Prediction, RankedBreed, RawLabel};

    fn prediction(confidence: f32) -> Prediction {
        Prediction::new("Pug", RawLabel::new("n02110958-pug"), 1, confidence).with_top_k(vec![
            RankedBreed {
                breed: "Pug".to_string(),
                raw_label: RawLabel::new("n02110958-pug"),
                index: 1,
                confidence,
            },
        ])
    }

    #[test]
    fn test_render_accepted() {
        let out = render_verdict(&Verdict::Accepted(prediction(72.3)), 50.0);

        assert!(out.contains("Breed:      Pug"));
        assert!(out.contains("Confidence: 72.3%"));
        assert!(out.contains("identified (threshold 50.0%)"));
        assert!(out.contains("  1. Pug"));
    }

    #[test]
    fn test_render_low_confidence() {
        let out = render_verdict(&Verdict::LowConfidence(prediction(31.0)), 50.0);
        assert!(out.contains("no dog detected"));
    }
}
