use async_trait::async_trait;

/// Port for the trained classification model.
///
/// Predictions are batched: one class id per input text, in input order.
/// Row alignment downstream depends on that ordering.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn predict_batch(&self, texts: &[String]) -> Result<Vec<usize>, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("prediction failed: {0}")]
    PredictionFailed(String),
}
