use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Classifier, ClassifierError};

/// TF-IDF nearest-centroid text classifier, deserialized from the
/// trained model artifact.
///
/// The artifact stores the training-time vocabulary with per-term IDF
/// weights and one centroid vector per class; prediction vectorizes the
/// input and picks the class whose centroid has the highest cosine
/// similarity. Ties resolve to the lowest class id.
#[derive(Serialize, Deserialize)]
pub struct CentroidClassifier {
    /// Term -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Class id -> centroid in feature space.
    centroids: Vec<Vec<f64>>,
}

impl std::fmt::Debug for CentroidClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CentroidClassifier")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_classes", &self.centroids.len())
            .finish()
    }
}

impl CentroidClassifier {
    pub fn n_classes(&self) -> usize {
        self.centroids.len()
    }

    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.idf.len()];
        let mut n_tokens = 0usize;
        for token in Self::tokenize(text) {
            n_tokens += 1;
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }
        if n_tokens > 0 {
            for (count, idf) in features.iter_mut().zip(&self.idf) {
                *count = *count / n_tokens as f64 * idf;
            }
        }
        features
    }

    fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
        let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a * norm_b)
        }
    }

    fn predict_one(&self, text: &str) -> Result<usize, ClassifierError> {
        if self.centroids.is_empty() {
            return Err(ClassifierError::PredictionFailed(
                "model has no classes".to_string(),
            ));
        }
        let features = self.vectorize(text);
        let mut best = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for (id, centroid) in self.centroids.iter().enumerate() {
            let score = Self::cosine_similarity(&features, centroid);
            if score > best_score {
                best = id;
                best_score = score;
            }
        }
        Ok(best)
    }
}

#[async_trait]
impl Classifier for CentroidClassifier {
    async fn predict_batch(&self, texts: &[String]) -> Result<Vec<usize>, ClassifierError> {
        texts.iter().map(|t| self.predict_one(t)).collect()
    }
}
