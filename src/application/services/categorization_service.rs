use std::sync::Arc;

use crate::application::ports::{Classifier, ClassifierError, LabelDecoder, LabelDecoderError};
use crate::domain::{
    COL_DATE, COL_FLAG, COL_MAJOR, COL_MINOR, CategoryError, CategoryLabel, CellValue, DataTable,
    Prediction, TableError,
};

/// Runs the trained model over a table's description column and merges
/// the derived category columns back in.
///
/// Constructed once at startup and shared read-only across requests.
/// When the model artifacts failed to load the service is degraded:
/// `is_ready` is false and `categorize` fails with `ModelNotReady`
/// without touching the table.
pub struct CategorizationService<C, D>
where
    C: Classifier,
    D: LabelDecoder,
{
    classifier: Option<Arc<C>>,
    decoder: Option<Arc<D>>,
}

impl<C, D> CategorizationService<C, D>
where
    C: Classifier,
    D: LabelDecoder,
{
    pub fn new(classifier: Arc<C>, decoder: Arc<D>) -> Self {
        Self {
            classifier: Some(classifier),
            decoder: Some(decoder),
        }
    }

    /// A service with no model behind it. Requests still flow, files
    /// pass through unmodified.
    pub fn degraded() -> Self {
        Self {
            classifier: None,
            decoder: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some() && self.decoder.is_some()
    }

    /// Predict categories for every row and merge them into the table.
    ///
    /// Derived columns are created when absent; only blank cells are
    /// filled, so manually entered values survive and a second run over
    /// an already categorized table changes nothing.
    #[tracing::instrument(skip(self, table), fields(rows = table.n_rows()))]
    pub async fn categorize(
        &self,
        table: &mut DataTable,
        description_column: &str,
    ) -> Result<(), CategorizationError> {
        let (Some(classifier), Some(decoder)) = (&self.classifier, &self.decoder) else {
            return Err(CategorizationError::ModelNotReady);
        };

        let description_idx = table.column_index(description_column)?;

        // Normalize in place: coerce to text, lower-case, trim. The
        // model was trained on normalized descriptions.
        let mut texts = Vec::with_capacity(table.n_rows());
        for row in 0..table.n_rows() {
            let normalized = table
                .cell(row, description_idx)
                .coerce_text()
                .to_lowercase()
                .trim()
                .to_string();
            table.set_cell(row, description_idx, CellValue::Text(normalized.clone()));
            texts.push(normalized);
        }

        tracing::debug!(rows = texts.len(), "Predicting categories");
        let ids = classifier.predict_batch(&texts).await?;
        if ids.len() != texts.len() {
            return Err(CategorizationError::PredictionMismatch {
                expected: texts.len(),
                got: ids.len(),
            });
        }

        tracing::debug!(predictions = ids.len(), "Decoding labels");
        let compounds = decoder.decode_batch(&ids).await?;
        if compounds.len() != ids.len() {
            return Err(CategorizationError::PredictionMismatch {
                expected: ids.len(),
                got: compounds.len(),
            });
        }

        let date = chrono::Local::now().format("%d-%m-%Y").to_string();
        let predictions = compounds
            .iter()
            .map(|compound| {
                Ok(Prediction {
                    label: CategoryLabel::parse(compound)?,
                    date: date.clone(),
                })
            })
            .collect::<Result<Vec<_>, CategoryError>>()?;

        self.merge_predictions(table, &predictions);

        tracing::info!(rows = predictions.len(), "Categorization complete");
        Ok(())
    }

    /// Merge-if-blank: write a derived value only where the cell is
    /// missing or trims to empty.
    fn merge_predictions(&self, table: &mut DataTable, predictions: &[Prediction]) {
        let flag_idx = table.ensure_column(COL_FLAG);
        let major_idx = table.ensure_column(COL_MAJOR);
        let minor_idx = table.ensure_column(COL_MINOR);
        let date_idx = table.ensure_column(COL_DATE);

        for (row, prediction) in predictions.iter().enumerate() {
            let derived = [
                (flag_idx, &prediction.label.flag),
                (major_idx, &prediction.label.major),
                (minor_idx, &prediction.label.minor),
                (date_idx, &prediction.date),
            ];
            for (idx, value) in derived {
                if table.cell(row, idx).is_blank() {
                    table.set_cell(row, idx, CellValue::Text(value.clone()));
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CategorizationError {
    #[error("classification model is not loaded")]
    ModelNotReady,
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("classification: {0}")]
    Classification(#[from] ClassifierError),
    #[error("label decoding: {0}")]
    Decoding(#[from] LabelDecoderError),
    #[error("label parsing: {0}")]
    Label(#[from] CategoryError),
    #[error("model returned {got} results for {expected} rows")]
    PredictionMismatch { expected: usize, got: usize },
}
