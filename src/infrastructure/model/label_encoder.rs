use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LabelDecoder, LabelDecoderError};

/// The label encoder artifact: an ordered class table mapping the
/// classifier's ids back to compound label strings.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredLabelEncoder {
    classes: Vec<String>,
}

impl StoredLabelEncoder {
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

#[async_trait]
impl LabelDecoder for StoredLabelEncoder {
    async fn decode_batch(&self, ids: &[usize]) -> Result<Vec<String>, LabelDecoderError> {
        ids.iter()
            .map(|&id| {
                self.classes
                    .get(id)
                    .cloned()
                    .ok_or(LabelDecoderError::UnknownId(id))
            })
            .collect()
    }
}
