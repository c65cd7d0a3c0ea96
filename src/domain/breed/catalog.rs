//! Label catalog - one raw label per model output index

use std::path::Path;

use super::label::RawLabel;
use crate::domain::DomainError;

/// Ordered list of raw class labels
///
/// Position `i` holds the label for model output index `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalog {
    labels: Vec<RawLabel>,
}

impl LabelCatalog {
    pub fn new(labels: Vec<RawLabel>) -> Self {
        Self { labels }
    }

    /// Parse newline-delimited catalog text. Blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RawLabel::new)
            .collect();

        Self { labels }
    }

    /// Read and parse a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::model_unavailable(format!(
                "Failed to read label catalog '{}': {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::parse(&text);

        if catalog.is_empty() {
            return Err(DomainError::model_unavailable(format!(
                "Label catalog '{}' contains no labels",
                path.display()
            )));
        }

        Ok(catalog)
    }

    pub fn get(&self, index: usize) -> Option<&RawLabel> {
        self.labels.get(index)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawLabel> {
        self.labels.iter()
    }

    /// Check the catalog against the model's output dimensionality
    pub fn ensure_matches(&self, output_len: usize) -> Result<(), DomainError> {
        if self.len() != output_len {
            return Err(DomainError::model_unavailable(format!(
                "Label catalog has {} labels but the model produces {} scores",
                self.len(),
                output_len
            )));
        }

        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for LabelCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(RawLabel::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let catalog = LabelCatalog::parse("n1-pug\n\n  \nn2-beagle\r\nboxer\n");

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().as_str(), "n1-pug");
        assert_eq!(catalog.get(1).unwrap().as_str(), "n2-beagle");
        assert_eq!(catalog.get(2).unwrap().as_str(), "boxer");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_ensure_matches() {
        let catalog: LabelCatalog = ["a", "b", "c"].into_iter().collect();

        assert!(catalog.ensure_matches(3).is_ok());

        let err = catalog.ensure_matches(120).unwrap_err();
        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("3 labels"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabelCatalog::load("/nonexistent/classes.txt").unwrap_err();
        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, "n02110958-pug\n\nn02088364-beagle\n").unwrap();

        let catalog = LabelCatalog::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_empty_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, "\n\n").unwrap();

        let err = LabelCatalog::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
    }
}
