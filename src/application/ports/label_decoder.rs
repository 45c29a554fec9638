use async_trait::async_trait;

/// Port for the label encoder artifact: class id back to its compound
/// label string.
///
/// A single unknown id fails the whole batch. Decoding is positional, so
/// a partial result would silently attach labels to the wrong rows.
#[async_trait]
pub trait LabelDecoder: Send + Sync {
    async fn decode_batch(&self, ids: &[usize]) -> Result<Vec<String>, LabelDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LabelDecoderError {
    #[error("unknown label id: {0}")]
    UnknownId(usize),
}
