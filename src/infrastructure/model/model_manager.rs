use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::application::services::CategorizationService;

use super::centroid_classifier::CentroidClassifier;
use super::label_encoder::StoredLabelEncoder;

/// Loads the classifier and label encoder artifacts once at startup and
/// owns them for the process lifetime.
///
/// Loading never aborts the process: every failure path logs what went
/// wrong and leaves the manager unloaded, and the service built from an
/// unloaded manager runs in degraded pass-through mode.
#[derive(Default)]
pub struct ModelManager {
    classifier: Option<Arc<CentroidClassifier>>,
    decoder: Option<Arc<StoredLabelEncoder>>,
    is_loaded: bool,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Attempt to load both artifacts. Returns true only when both
    /// deserialized successfully.
    pub fn load_models(&mut self, model_path: &Path, encoder_path: &Path) -> bool {
        tracing::info!(
            model_path = %model_path.display(),
            encoder_path = %encoder_path.display(),
            "Loading classification model artifacts"
        );

        if let Some(dir) = model_path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            tracing::error!(directory = %dir.display(), "Model directory not found");
            return false;
        }
        if !model_path.exists() {
            tracing::error!(path = %model_path.display(), "Model file not found");
            Self::log_directory_contents(model_path);
            return false;
        }
        if !encoder_path.exists() {
            tracing::error!(path = %encoder_path.display(), "Encoder file not found");
            Self::log_directory_contents(encoder_path);
            return false;
        }

        let classifier: CentroidClassifier = match Self::read_artifact(model_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(path = %model_path.display(), error = %e, "Failed to load model");
                self.reset();
                return false;
            }
        };

        let decoder: StoredLabelEncoder = match Self::read_artifact(encoder_path) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(path = %encoder_path.display(), error = %e, "Failed to load encoder");
                self.reset();
                return false;
            }
        };

        if classifier.n_classes() != decoder.n_classes() {
            tracing::error!(
                model_classes = classifier.n_classes(),
                encoder_classes = decoder.n_classes(),
                "Model and encoder disagree on class count"
            );
            self.reset();
            return false;
        }

        tracing::info!(classes = classifier.n_classes(), "Model artifacts loaded");
        self.classifier = Some(Arc::new(classifier));
        self.decoder = Some(Arc::new(decoder));
        self.is_loaded = true;
        true
    }

    /// Build the request-facing service. Degraded when loading failed
    /// or was never attempted.
    pub fn into_service(self) -> CategorizationService<CentroidClassifier, StoredLabelEncoder> {
        match (self.classifier, self.decoder) {
            (Some(classifier), Some(decoder)) => CategorizationService::new(classifier, decoder),
            _ => CategorizationService::degraded(),
        }
    }

    fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn log_directory_contents(missing: &Path) {
        let Some(dir) = missing.parent() else {
            return;
        };
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        let available: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        tracing::error!(
            directory = %dir.display(),
            available = ?available,
            "Files present in model directory"
        );
    }

    fn reset(&mut self) {
        self.classifier = None;
        self.decoder = None;
        self.is_loaded = false;
    }
}
